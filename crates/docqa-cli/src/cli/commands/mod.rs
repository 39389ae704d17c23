//! CLI command handlers.

pub mod ask;
pub mod chat;
pub mod config;
pub mod health;
pub mod reset;
pub mod upload;

use anyhow::{Context, Result};
use docqa_core::config::Config;
use docqa_core::transport::{HttpTransport, SessionId};
use docqa_session::{SessionRuntime, SessionState};

/// HTTP client for the configured service.
fn connect(config: &Config) -> Result<HttpTransport> {
    HttpTransport::new(&config.server)
        .with_context(|| format!("connect to {}", config.server.base_url))
}

/// Runtime over a fresh session (or `session` when resuming one).
fn session_runtime(
    config: &Config,
    session: Option<String>,
) -> Result<SessionRuntime<HttpTransport>> {
    let transport = connect(config)?;
    let session = session
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty());
    let state = match session {
        Some(id) => SessionState::with_session(config.session, SessionId::new(id)),
        None => SessionState::new(config.session),
    };
    Ok(SessionRuntime::new(state, transport))
}

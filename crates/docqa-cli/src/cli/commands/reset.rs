//! One-shot session reset.

use anyhow::{Result, bail};
use docqa_core::config::Config;
use docqa_session::SessionEvent;
use docqa_session::update::RESET_FAILED_MESSAGE;

pub async fn run(config: &Config, session: String) -> Result<()> {
    let mut runtime = super::session_runtime(config, Some(session))?;
    runtime.dispatch(SessionEvent::ResetRequested);
    runtime.dispatch(SessionEvent::ResetConfirmed);
    runtime.settle_all().await;

    if runtime.state().session.id.is_some() {
        bail!("{RESET_FAILED_MESSAGE}");
    }
    println!("Session reset.");
    Ok(())
}

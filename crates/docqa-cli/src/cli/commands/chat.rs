//! Chat command handler.

use std::io::IsTerminal;

use anyhow::{Context, Result};
use docqa_core::config::Config;

use crate::modes;

pub async fn run(config: &Config, wait: bool) -> Result<()> {
    // Piped input is a script: settle each line before reading the next.
    let wait = wait || !std::io::stdin().is_terminal();

    let mut runtime = super::session_runtime(config, None)?;
    modes::repl::run(&mut runtime, wait)
        .await
        .context("interactive chat failed")
}

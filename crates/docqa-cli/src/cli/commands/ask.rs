//! One-shot question.

use anyhow::{Result, bail};
use docqa_core::config::Config;
use docqa_session::{Sender, SessionEvent};

pub async fn run(config: &Config, question: String, session: Option<String>) -> Result<()> {
    let mut runtime = super::session_runtime(config, session)?;
    runtime.dispatch(SessionEvent::QueryEdited(question));
    runtime.dispatch(SessionEvent::AskRequested);
    runtime.settle_all().await;

    let state = runtime.state();
    if let Some(notice) = state.answer.as_ref().filter(|notice| notice.is_error()) {
        bail!("{}", notice.text);
    }
    let Some(entry) = state
        .conversation
        .last()
        .filter(|entry| entry.sender == Sender::Bot)
    else {
        bail!("No answer received");
    };
    println!("{}", entry.text);
    if let Some(sources) = &entry.sources {
        println!();
        println!("Sources: {sources}");
    }
    Ok(())
}

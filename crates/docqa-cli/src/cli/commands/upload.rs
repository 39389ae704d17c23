//! One-shot upload.

use std::path::PathBuf;

use anyhow::{Result, bail};
use docqa_core::config::Config;
use docqa_session::{SessionEvent, select_pdfs};

pub async fn run(config: &Config, files: Vec<PathBuf>) -> Result<()> {
    let selection = select_pdfs(files);
    if let Some(path) = selection.rejected.first() {
        bail!("Not a PDF file: {}", path.display());
    }

    let mut runtime = super::session_runtime(config, None)?;
    runtime.dispatch(SessionEvent::FilesSelected(selection.accepted));
    runtime.dispatch(SessionEvent::UploadRequested);
    runtime.settle_all().await;

    let state = runtime.state();
    let Some(notice) = state.upload_message.as_ref() else {
        bail!("Upload did not complete");
    };
    if notice.is_error() {
        bail!("{}", notice.text);
    }
    println!("{}", notice.text);
    if let Some(id) = &state.session.id {
        println!("Session: {id}");
    }
    Ok(())
}

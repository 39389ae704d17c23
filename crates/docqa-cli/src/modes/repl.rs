//! Line-oriented chat loop.
//!
//! Each typed line becomes one intent. Settlements are rendered as they
//! arrive, so a slow upload does not block typing a question. In `wait` mode
//! every line is settled before the next one is read, which makes piped
//! scripts deterministic.

use std::io::Write;

use anyhow::{Context, Result};
use docqa_core::transport::Transport;
use docqa_session::files::joined_names;
use docqa_session::{SessionEvent, SessionRuntime, SessionState, select_pdfs};
use tokio::io::{AsyncBufReadExt, BufReader};

use super::input::{self, HELP, ReplCommand};
use super::view::ChatView;

enum Flow {
    Continue,
    Quit,
}

pub async fn run<T: Transport>(runtime: &mut SessionRuntime<T>, wait: bool) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut view = ChatView::new(std::io::stdout());
    view.line("docqa - ask questions about your PDFs. Type /help for commands.")?;

    let mut quit = false;
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("read input")? else {
                    break;
                };
                if let Flow::Quit = handle_line(runtime, &mut view, &line)? {
                    quit = true;
                    break;
                }
                if wait {
                    runtime.settle_all().await;
                } else {
                    // Fold in anything that arrived while the line was typed.
                    runtime.settle_ready();
                }
                view.render(runtime.state())?;
            }
            settled = runtime.settle_next(), if runtime.state().is_busy() => {
                if settled {
                    view.render(runtime.state())?;
                }
            }
        }
    }

    // End of input: let outstanding requests finish so their results show.
    if !quit && runtime.state().is_busy() {
        tracing::debug!("input closed, waiting for in-flight requests");
        runtime.settle_all().await;
        view.render(runtime.state())?;
    }
    view.line("Goodbye!")?;
    Ok(())
}

fn handle_line<T: Transport, W: Write>(
    runtime: &mut SessionRuntime<T>,
    view: &mut ChatView<W>,
    line: &str,
) -> Result<Flow> {
    let command = input::parse(line);
    if let Some(reason) = locked_reason(runtime.state(), &command) {
        view.line(reason)?;
        return Ok(Flow::Continue);
    }

    match command {
        ReplCommand::Select(paths) => {
            let selection = select_pdfs(paths);
            for path in &selection.rejected {
                view.line(format!("Skipped (not a PDF): {}", path.display()))?;
            }
            if !selection.accepted.is_empty() {
                view.line(format!(
                    "Selected: {}",
                    joined_names(selection.accepted.iter().map(|f| f.name.as_str()))
                ))?;
            }
            runtime.dispatch(SessionEvent::FilesSelected(selection.accepted));
        }
        ReplCommand::Files => {
            let files = &runtime.state().selected_files;
            if files.is_empty() {
                view.line("No files selected.")?;
            }
            for file in files {
                view.line(format!("  {}", file.path.display()))?;
            }
        }
        ReplCommand::Upload => runtime.dispatch(SessionEvent::UploadRequested),
        ReplCommand::Reset => runtime.dispatch(SessionEvent::ResetRequested),
        ReplCommand::Confirm => {
            if !runtime.state().confirmation.is_pending() {
                view.line("Nothing to confirm.")?;
            }
            runtime.dispatch(SessionEvent::ResetConfirmed);
        }
        ReplCommand::Cancel => {
            if runtime.state().confirmation.is_pending() {
                view.line("Reset cancelled.")?;
            }
            runtime.dispatch(SessionEvent::ResetCancelled);
        }
        ReplCommand::Retry => runtime.dispatch(SessionEvent::AskRequested),
        ReplCommand::Ask(question) => {
            runtime.dispatch(SessionEvent::QueryEdited(question));
            runtime.dispatch(SessionEvent::AskRequested);
        }
        ReplCommand::Status => view.line(status(runtime.state()))?,
        ReplCommand::Help => view.line(HELP)?,
        ReplCommand::Unknown(text) => view.line(format!(
            "Unknown command: {text} (try /help, or start with // to ask it)"
        ))?,
        ReplCommand::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}

/// Why `command` would be ignored right now, if it would be.
fn locked_reason(state: &SessionState, command: &ReplCommand) -> Option<&'static str> {
    let controls = state.controls();
    let flags = state.flags();
    let open = match command {
        ReplCommand::Select(_) => controls.can_select,
        ReplCommand::Upload => controls.can_upload,
        ReplCommand::Reset => controls.can_request_reset,
        ReplCommand::Ask(_) | ReplCommand::Retry => controls.can_ask,
        _ => true,
    };
    if open {
        None
    } else if flags.uploading {
        Some("Busy: an upload is in progress.")
    } else if state.confirmation.is_pending() {
        Some("Confirm or cancel the reset first (/yes or /no).")
    } else {
        Some("Busy: waiting for the previous answer.")
    }
}

fn status(state: &SessionState) -> String {
    let flags = state.flags();
    let mut busy = Vec::new();
    if flags.uploading {
        busy.push("uploading");
    }
    if flags.asking {
        busy.push("asking");
    }
    if flags.resetting {
        busy.push("resetting");
    }
    format!(
        "Session: {}\nSelected files: {}\nMessages: {}\nBusy: {}\nStale responses: {}",
        state
            .session
            .id
            .as_ref()
            .map_or_else(|| "none".to_string(), ToString::to_string),
        state.selected_files.len(),
        state.conversation.len(),
        if busy.is_empty() { "no".to_string() } else { busy.join(", ") },
        state.settings.stale_responses.display_name(),
    )
}

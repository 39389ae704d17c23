//! Session reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(state, event)`
//! and executes the returned effects. Intents are validated locally and turn
//! into at most one request; settlements are applied against whatever the
//! state looks like when they arrive.

use std::fmt;

use docqa_core::config::StalePolicy;
use docqa_core::transport::{QueryRequest, QueryResponse, TransportError, UploadResponse};

use crate::common::{TaskCompleted, TaskId};
use crate::conversation::ConversationEntry;
use crate::effects::SessionEffect;
use crate::events::{SessionEvent, TaskOutcome};
use crate::files::{SelectedFile, joined_names};
use crate::state::{SessionState, Tone};

pub const UPLOAD_FAILED_MESSAGE: &str = "Upload failed. Please try again.";
pub const ASK_FAILED_MESSAGE: &str = "Failed to get answer. Please try again.";
pub const RESET_NOTICE: &str = "Session reset. All uploaded documents and history have been cleared.";
pub const RESET_FAILED_MESSAGE: &str = "Failed to reset session. Please try again.";

/// Intent rejected before any request is issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    NoFilesSelected,
    EmptyQuestion,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::NoFilesSelected => write!(f, "Please select at least one PDF file"),
            ValidationError::EmptyQuestion => write!(f, "Please enter a question"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// The main reducer function.
///
/// Takes the current state and an event, mutates state, and returns effects
/// for the runtime to execute.
pub fn update(state: &mut SessionState, event: SessionEvent) -> Vec<SessionEffect> {
    match event {
        SessionEvent::FilesSelected(files) => {
            select_files(state, files);
            vec![]
        }
        SessionEvent::QueryEdited(text) => {
            state.query = text;
            vec![]
        }
        SessionEvent::UploadRequested => start_upload(state).into_iter().collect(),
        SessionEvent::AskRequested => start_ask(state).into_iter().collect(),
        SessionEvent::ResetRequested => {
            request_reset(state);
            vec![]
        }
        SessionEvent::ResetConfirmed => confirm_reset(state).into_iter().collect(),
        SessionEvent::ResetCancelled => {
            if !state.confirmation.cancel() {
                tracing::debug!("reset cancel ignored: no reset pending");
            }
            vec![]
        }
        SessionEvent::TaskCompleted(completed) => {
            settle(state, completed);
            vec![]
        }
    }
}

// ============================================================================
// Intents
// ============================================================================

fn select_files(state: &mut SessionState, files: Vec<SelectedFile>) {
    if !state.controls().can_select {
        tracing::debug!("file selection ignored: upload in progress");
        return;
    }
    state.selected_files = files;
    // Feedback about the previous selection no longer applies.
    state.upload_message = None;
    state.answer = None;
}

fn start_upload(state: &mut SessionState) -> Option<SessionEffect> {
    if !state.controls().can_upload {
        tracing::debug!("upload ignored: controls locked");
        return None;
    }
    if state.selected_files.is_empty() {
        let notice = state.notice(Tone::Error, ValidationError::NoFilesSelected.to_string());
        state.upload_message = Some(notice);
        return None;
    }

    let task = state.task_seq.next_id();
    state.tasks.upload.on_started(task);
    tracing::info!(
        task = task.0,
        files = state.selected_files.len(),
        "upload started"
    );
    Some(SessionEffect::Upload {
        task,
        epoch: state.epoch,
        files: state.selected_files.clone(),
    })
}

fn start_ask(state: &mut SessionState) -> Option<SessionEffect> {
    if !state.controls().can_ask {
        tracing::debug!("ask ignored: controls locked");
        return None;
    }
    if state.query.trim().is_empty() {
        let notice = state.notice(Tone::Error, ValidationError::EmptyQuestion.to_string());
        state.answer = Some(notice);
        return None;
    }

    let task = state.task_seq.next_id();
    state.tasks.ask.on_started(task);
    tracing::info!(task = task.0, session = ?state.session.id, "ask started");
    Some(SessionEffect::Query {
        task,
        epoch: state.epoch,
        request: QueryRequest {
            question: state.query.clone(),
            session_id: state.session.id.clone(),
        },
    })
}

fn request_reset(state: &mut SessionState) {
    if !state.controls().can_request_reset {
        tracing::debug!("reset ignored: upload in progress");
        return;
    }
    if !state.confirmation.request() {
        tracing::debug!("reset already awaiting confirmation");
    }
}

fn confirm_reset(state: &mut SessionState) -> Option<SessionEffect> {
    // The gate closes before the outcome is known.
    if !state.confirmation.confirm() {
        tracing::debug!("reset confirmation ignored: no reset pending");
        return None;
    }

    let Some(session_id) = state.session.id.clone() else {
        tracing::info!("no active session, resetting locally");
        apply_reset(state);
        return None;
    };

    let task = state.task_seq.next_id();
    state.tasks.reset.on_started(task);
    tracing::info!(task = task.0, session = %session_id, "reset started");
    Some(SessionEffect::Reset {
        task,
        epoch: state.epoch,
        session_id,
    })
}

// ============================================================================
// Settlements
// ============================================================================

fn settle(state: &mut SessionState, completed: TaskCompleted<TaskOutcome>) {
    let kind = completed.result.kind();
    // The busy flag settles first, whatever happens to the payload.
    if !state.tasks.state_mut(kind).finish(completed.id) {
        tracing::warn!(task = completed.id.0, ?kind, "settlement for unknown task ignored");
        return;
    }

    if state.settings.stale_responses == StalePolicy::Drop && is_stale(state, &completed) {
        tracing::info!(
            task = completed.id.0,
            ?kind,
            issued = completed.epoch,
            current = state.epoch,
            "dropping stale settlement"
        );
        return;
    }

    match completed.result {
        TaskOutcome::Uploaded { file_names, result } => match result {
            Ok(response) => upload_succeeded(state, completed.id, &file_names, response),
            Err(err) => upload_failed(state, &err),
        },
        TaskOutcome::Answered { question, result } => match result {
            Ok(response) => ask_succeeded(state, question, response),
            Err(err) => ask_failed(state, &err),
        },
        TaskOutcome::Reset { result } => match result {
            Ok(()) => {
                tracing::info!(task = completed.id.0, "reset succeeded");
                apply_reset(state);
            }
            Err(err) => {
                tracing::warn!(task = completed.id.0, error = %err, "reset failed");
                state
                    .conversation
                    .push(ConversationEntry::bot(RESET_FAILED_MESSAGE));
            }
        },
    }
}

/// Uploads are ordered by issue (task id): one issued before the newest
/// applied upload, or before a reset, is superseded. Everything else is
/// stale once the session epoch it was issued in has passed.
fn is_stale(state: &SessionState, completed: &TaskCompleted<TaskOutcome>) -> bool {
    match completed.result {
        TaskOutcome::Uploaded { .. } => completed.id < state.upload_watermark,
        TaskOutcome::Answered { .. } | TaskOutcome::Reset { .. } => {
            completed.epoch != state.epoch
        }
    }
}

fn upload_succeeded(
    state: &mut SessionState,
    task: TaskId,
    file_names: &[String],
    response: UploadResponse,
) {
    tracing::info!(session = %response.session_id, "upload succeeded");
    // A new upload supersedes any previous session.
    state.session.id = Some(response.session_id);
    state.conversation.replace(vec![ConversationEntry::bot(format!(
        "Uploaded: {}",
        joined_names(file_names.iter().map(String::as_str))
    ))]);
    let notice = state.notice(Tone::Success, response.message);
    state.upload_message = Some(notice);
    state.epoch += 1;
    state.upload_watermark = state.upload_watermark.max(task);
}

fn upload_failed(state: &mut SessionState, err: &TransportError) {
    tracing::warn!(error = %err, "upload failed");
    let notice = state.notice(Tone::Error, err.user_message(UPLOAD_FAILED_MESSAGE));
    state.upload_message = Some(notice);
}

fn ask_succeeded(state: &mut SessionState, question: String, response: QueryResponse) {
    state.conversation.push(ConversationEntry::user(question));
    state
        .conversation
        .push(ConversationEntry::bot(response.answer.clone()).with_sources(response.sources));
    state.query.clear();
    let notice = state.notice(Tone::Success, response.answer);
    state.answer = Some(notice);
}

fn ask_failed(state: &mut SessionState, err: &TransportError) {
    tracing::warn!(error = %err, "ask failed");
    // The draft stays so the question can be retried as is.
    let notice = state.notice(Tone::Error, err.user_message(ASK_FAILED_MESSAGE));
    state.answer = Some(notice);
}

/// Local effects of a successful (or skipped) reset.
fn apply_reset(state: &mut SessionState) {
    state.session.id = None;
    state.selected_files.clear();
    state.query.clear();
    state.answer = None;
    state.upload_message = None;
    state
        .conversation
        .replace(vec![ConversationEntry::bot(RESET_NOTICE)]);
    state.epoch += 1;
    state.upload_watermark = state.task_seq.peek();
}

//! Events fed into the reducer: user intents and request settlements.

use docqa_core::transport::{QueryResponse, TransportResult, UploadResponse};

use crate::common::{TaskCompleted, TaskKind};
use crate::files::SelectedFile;

#[derive(Debug)]
pub enum SessionEvent {
    /// New file selection (already filtered to PDFs).
    FilesSelected(Vec<SelectedFile>),
    /// The query draft changed.
    QueryEdited(String),
    UploadRequested,
    AskRequested,
    /// Reset intent; opens the confirmation gate.
    ResetRequested,
    ResetConfirmed,
    ResetCancelled,
    /// A spawned request settled.
    TaskCompleted(TaskCompleted<TaskOutcome>),
}

/// Settled result of a request, with what the reducer needs to apply it.
#[derive(Debug)]
pub enum TaskOutcome {
    Uploaded {
        /// Names of the files that were sent.
        file_names: Vec<String>,
        result: TransportResult<UploadResponse>,
    },
    Answered {
        /// The question as submitted.
        question: String,
        result: TransportResult<QueryResponse>,
    },
    Reset {
        result: TransportResult<()>,
    },
}

impl TaskOutcome {
    pub fn kind(&self) -> TaskKind {
        match self {
            TaskOutcome::Uploaded { .. } => TaskKind::Upload,
            TaskOutcome::Answered { .. } => TaskKind::Ask,
            TaskOutcome::Reset { .. } => TaskKind::Reset,
        }
    }

    pub fn is_success(&self) -> bool {
        match self {
            TaskOutcome::Uploaded { result, .. } => result.is_ok(),
            TaskOutcome::Answered { result, .. } => result.is_ok(),
            TaskOutcome::Reset { result } => result.is_ok(),
        }
    }
}

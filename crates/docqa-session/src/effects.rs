//! Effects returned by the reducer for the runtime to execute.
//!
//! Each effect is one transport request. The reducer has already marked the
//! task as in flight; the runtime must answer every effect with exactly one
//! `SessionEvent::TaskCompleted` carrying the same task id and epoch.

use docqa_core::transport::{QueryRequest, SessionId, TransportError};

use crate::common::TaskId;
use crate::events::TaskOutcome;
use crate::files::SelectedFile;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEffect {
    /// Read and upload the files as one request.
    Upload {
        task: TaskId,
        epoch: u64,
        files: Vec<SelectedFile>,
    },
    /// Ask a question.
    Query {
        task: TaskId,
        epoch: u64,
        request: QueryRequest,
    },
    /// Drop the server-side session.
    Reset {
        task: TaskId,
        epoch: u64,
        session_id: SessionId,
    },
}

impl SessionEffect {
    pub fn task(&self) -> TaskId {
        match self {
            SessionEffect::Upload { task, .. }
            | SessionEffect::Query { task, .. }
            | SessionEffect::Reset { task, .. } => *task,
        }
    }

    pub fn epoch(&self) -> u64 {
        match self {
            SessionEffect::Upload { epoch, .. }
            | SessionEffect::Query { epoch, .. }
            | SessionEffect::Reset { epoch, .. } => *epoch,
        }
    }

    /// Failed outcome for this effect, used when the request could not run
    /// to completion.
    pub fn failed(&self, error: TransportError) -> TaskOutcome {
        match self {
            SessionEffect::Upload { files, .. } => TaskOutcome::Uploaded {
                file_names: files.iter().map(|file| file.name.clone()).collect(),
                result: Err(error),
            },
            SessionEffect::Query { request, .. } => TaskOutcome::Answered {
                question: request.question.clone(),
                result: Err(error),
            },
            SessionEffect::Reset { .. } => TaskOutcome::Reset { result: Err(error) },
        }
    }
}

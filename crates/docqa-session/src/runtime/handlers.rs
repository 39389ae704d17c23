//! Effect handlers.
//!
//! Pure async functions that run one transport request and return the
//! settled outcome. They never touch `SessionState`; the runtime spawns them
//! and feeds the outcome back through the reducer.

use std::sync::Arc;

use docqa_core::transport::{QueryRequest, SessionId, Transport, TransportError, UploadFile};

use crate::events::TaskOutcome;
use crate::files::SelectedFile;

/// Reads the selected files and uploads them as one request.
pub async fn upload<T: Transport>(transport: Arc<T>, files: Vec<SelectedFile>) -> TaskOutcome {
    let file_names: Vec<String> = files.iter().map(|file| file.name.clone()).collect();
    let result = match read_files(files).await {
        Ok(payload) => transport.upload(payload).await,
        Err(err) => Err(err),
    };
    TaskOutcome::Uploaded { file_names, result }
}

pub async fn query<T: Transport>(transport: Arc<T>, request: QueryRequest) -> TaskOutcome {
    let question = request.question.clone();
    let result = transport.query(request).await;
    TaskOutcome::Answered { question, result }
}

pub async fn reset<T: Transport>(transport: Arc<T>, session_id: SessionId) -> TaskOutcome {
    TaskOutcome::Reset {
        result: transport.reset(session_id).await,
    }
}

async fn read_files(files: Vec<SelectedFile>) -> Result<Vec<UploadFile>, TransportError> {
    let mut payload = Vec::with_capacity(files.len());
    for file in files {
        let bytes = tokio::fs::read(&file.path).await.map_err(|err| {
            tracing::warn!(path = %file.path.display(), error = %err, "failed to read file");
            TransportError::io(format!("read {}: {err}", file.path.display()))
                .with_detail(format!("Could not read {}", file.name))
        })?;
        payload.push(UploadFile {
            name: file.name,
            bytes,
        });
    }
    Ok(payload)
}

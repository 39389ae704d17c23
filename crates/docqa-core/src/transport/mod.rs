//! Contract with the remote question-answering service.
//!
//! The session controller only ever talks to a [`Transport`]. The HTTP
//! binding lives in [`http`]; tests substitute scripted implementations.

mod error;
pub mod http;
mod types;

use std::future::Future;

pub use error::{TransportError, TransportErrorKind};
pub use http::HttpTransport;
pub use types::{
    HealthResponse, QueryRequest, QueryResponse, ResetRequest, SessionId, UploadFile,
    UploadResponse,
};

/// Result type for transport operations.
pub type TransportResult<T> = std::result::Result<T, TransportError>;

/// The three operations the session controller issues.
///
/// Every call settles exactly once, either with the success payload or with a
/// [`TransportError`]. Implementations own their timeouts.
pub trait Transport: Send + Sync + 'static {
    /// Sends all files as one request. A fresh upload always starts a new
    /// session, so no session id is sent.
    fn upload(
        &self,
        files: Vec<UploadFile>,
    ) -> impl Future<Output = TransportResult<UploadResponse>> + Send;

    /// Asks a question, scoped to `request.session_id` when present.
    fn query(
        &self,
        request: QueryRequest,
    ) -> impl Future<Output = TransportResult<QueryResponse>> + Send;

    /// Drops the server-side session.
    fn reset(&self, session_id: SessionId) -> impl Future<Output = TransportResult<()>> + Send;
}

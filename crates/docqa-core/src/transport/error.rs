use std::fmt;

use serde_json::Value;

/// Category of a transport failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    /// Could not reach the service (DNS, refused connection, TLS).
    Connect,
    /// Connection or request timeout.
    Timeout,
    /// The service answered with a non-success status.
    HttpStatus,
    /// The response body did not match the expected shape.
    Decode,
    /// Local I/O failure while preparing the request (e.g. reading a file).
    Io,
}

impl fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportErrorKind::Connect => write!(f, "connect"),
            TransportErrorKind::Timeout => write!(f, "timeout"),
            TransportErrorKind::HttpStatus => write!(f, "http_status"),
            TransportErrorKind::Decode => write!(f, "decode"),
            TransportErrorKind::Io => write!(f, "io"),
        }
    }
}

/// Failure of an upload, query or reset request.
///
/// `detail` carries the service's own explanation (the `detail` field of an
/// error body) and is what the user gets to see when present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportError {
    pub kind: TransportErrorKind,
    /// One-line summary for logs.
    pub message: String,
    /// User-facing explanation supplied by the service.
    pub detail: Option<String>,
}

impl TransportError {
    pub fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Builds an HTTP status error, extracting `{"detail": "..."}` from the
    /// body when it is a string.
    pub fn http_status(status: u16, body: &str) -> Self {
        let detail = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|json| {
                json.get("detail")
                    .and_then(Value::as_str)
                    .map(str::to_string)
            })
            .filter(|detail| !detail.trim().is_empty());
        Self {
            kind: TransportErrorKind::HttpStatus,
            message: format!("HTTP {status}"),
            detail,
        }
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Timeout, message)
    }

    pub fn connect(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Connect, message)
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Decode, message)
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Io, message)
    }

    /// Text to show the user: the service detail, else `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        self.detail
            .clone()
            .unwrap_or_else(|| fallback.to_string())
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::timeout(format!("request timed out: {err}"))
        } else if err.is_decode() {
            Self::decode(format!("failed to decode response: {err}"))
        } else if let Some(status) = err.status() {
            Self::new(TransportErrorKind::HttpStatus, format!("HTTP {status}"))
        } else {
            Self::connect(format!("request failed: {err}"))
        }
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.detail {
            Some(detail) => write!(f, "{}: {}", self.message, detail),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for TransportError {}

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque server-issued session identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One document in an upload request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UploadResponse {
    pub message: String,
    pub session_id: SessionId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryRequest {
    pub question: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<SessionId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QueryResponse {
    pub answer: String,
    /// Source citations, when the service reports them.
    #[serde(default)]
    pub sources: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResetRequest<'a> {
    pub session_id: &'a SessionId,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_request_omits_missing_session() {
        let request = QueryRequest {
            question: "What is X?".to_string(),
            session_id: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json, serde_json::json!({ "question": "What is X?" }));
    }

    #[test]
    fn test_query_response_sources_optional() {
        let plain: QueryResponse = serde_json::from_str(r#"{"answer":"X is Y"}"#).unwrap();
        assert_eq!(plain.sources, None);

        let cited: QueryResponse =
            serde_json::from_str(r#"{"answer":"X is Y","sources":"a.pdf p.2"}"#).unwrap();
        assert_eq!(cited.sources.as_deref(), Some("a.pdf p.2"));
    }
}

//! Raw responses and HTTP status classification

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::verb::Verb;

/// Status and body of one exchange, before any interpretation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status < 400
    }
}

/// Binary document returned by a download endpoint (PDF export, receipt, ...)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryFile {
    /// Name suggested by `Content-Disposition`, when the server sends one
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl BinaryFile {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Error envelope of the service: `{"code": 1002, "message": "..."}`
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    code: Option<i64>,
    #[serde(default)]
    message: Option<String>,
}

/// Turn an HTTP status >= 400 into `Error::Remote`
///
/// The body is kept whole. When it happens to be the service's JSON error
/// envelope, `code` and `message` are lifted for display; a body that isn't
/// JSON is not a parse failure here.
pub fn check_status(verb: Verb, path: &str, raw: RawResponse) -> Result<RawResponse> {
    if raw.is_success() {
        return Ok(raw);
    }

    let envelope = serde_json::from_str::<ErrorEnvelope>(&raw.body).ok();
    let (code, message) = envelope
        .map(|e| (e.code, e.message))
        .unwrap_or((None, None));

    Err(Error::Remote {
        verb,
        path: path.to_string(),
        status: raw.status,
        code,
        message,
        body: raw.body,
    })
}

/// Extract the file name from a `Content-Disposition` header value
///
/// Handles `attachment; filename="SO-00001.pdf"` and the unquoted form.
pub fn file_name_from_disposition(header: &str) -> Option<String> {
    header
        .split(';')
        .map(str::trim)
        .find_map(|part| part.strip_prefix("filename="))
        .map(|name| name.trim_matches('"').to_string())
        .filter(|name| !name.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_status_passes_success_through() {
        let raw = RawResponse::new(201, r#"{"code":0}"#);

        let checked = check_status(Verb::Post, "/expenses", raw.clone()).unwrap();

        assert_eq!(checked, raw);
    }

    #[test]
    fn test_check_status_404_with_json_body_is_remote() {
        // Arrange: a 404 whose body is valid JSON
        let body = r#"{"code":1002,"message":"Expense does not exist."}"#;
        let raw = RawResponse::new(404, body);

        // Act
        let err = check_status(Verb::Get, "/expenses/42", raw).unwrap_err();

        // Assert: classified as remote, not as a parse failure
        match err {
            Error::Remote {
                verb,
                path,
                status,
                code,
                message,
                body: raw_body,
            } => {
                assert_eq!(verb, Verb::Get);
                assert_eq!(path, "/expenses/42");
                assert_eq!(status, 404);
                assert_eq!(code, Some(1002));
                assert_eq!(message.as_deref(), Some("Expense does not exist."));
                assert_eq!(raw_body, body);
            }
            other => panic!("expected remote error, got {other:?}"),
        }
    }

    #[test]
    fn test_check_status_non_json_body() {
        let raw = RawResponse::new(503, "Service Unavailable");

        let err = check_status(Verb::Delete, "/expenses/1", raw).unwrap_err();

        assert!(err.is_remote());
        assert_eq!(err.status(), Some(503));
    }

    #[test]
    fn test_file_name_from_disposition() {
        assert_eq!(
            file_name_from_disposition(r#"attachment; filename="SO-00001.pdf""#),
            Some("SO-00001.pdf".to_string())
        );
        assert_eq!(
            file_name_from_disposition("inline;filename=receipt.png"),
            Some("receipt.png".to_string())
        );
        assert_eq!(file_name_from_disposition("attachment"), None);
    }
}

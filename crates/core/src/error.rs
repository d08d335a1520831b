//! Error taxonomy shared by every resource API
//!
//! Nothing in this workspace recovers from these locally: each variant is
//! handed to the immediate caller, classified but otherwise untouched.

use crate::verb::Verb;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A domain object could not be turned into JSON
    #[error("Failed to serialize request body: {0}")]
    Serialization(#[source] serde_json::Error),

    /// The transport could not complete the exchange
    #[error("Network error on {verb} {path}: {message}")]
    Network {
        verb: Verb,
        path: String,
        message: String,
    },

    /// The transport could not build the request (e.g. an invalid attachment MIME type)
    #[error("Invalid request {verb} {path}: {message}")]
    Request {
        verb: Verb,
        path: String,
        message: String,
    },

    /// The transport gave up waiting for the server
    #[error("Request timed out: {verb} {path}")]
    Timeout { verb: Verb, path: String },

    /// The server rejected the request (HTTP status >= 400)
    #[error("{verb} {path} failed [{status}]: {}", .message.as_deref().unwrap_or(.body.as_str()))]
    Remote {
        verb: Verb,
        path: String,
        status: u16,
        /// Service error code, when the body is a JSON error envelope
        code: Option<i64>,
        /// Service error message, when the body is a JSON error envelope
        message: Option<String>,
        body: String,
    },

    /// The server accepted the request but the response had an unexpected shape
    #[error("Failed to parse {context}: {source}")]
    Parse {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// A routed response carried a different shape than the operation asked for
    #[error("Expected a {expected} response, routed a {actual}")]
    UnexpectedOutcome {
        expected: &'static str,
        actual: &'static str,
    },

    /// An update was requested for an object that carries no identifier
    #[error("{kind} has no identifier; it must be fetched or created first")]
    MissingIdentifier { kind: &'static str },

    /// The HTTP client itself could not be configured
    #[error("Failed to build HTTP client: {0}")]
    ClientSetup(String),

    /// Local file access for attachments or downloads
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// HTTP status of a remote rejection
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, Error::Remote { .. })
    }

    pub fn is_parse(&self) -> bool {
        matches!(self, Error::Parse { .. })
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

//! Response routing
//!
//! Hands a successful raw response to the resource parser matching what the
//! operation expects. Binary downloads never reach a parser.

use crate::error::{Error, Result};
use crate::parser::{Listing, ResourceParser};
use crate::response::{BinaryFile, RawResponse};

/// What a successful response body is expected to carry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expectation {
    Single,
    List,
    Message,
}

/// Result of routing one response
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseOutcome<T> {
    Object(T),
    List(Listing<T>),
    Message(String),
    File(BinaryFile),
}

impl<T> ResponseOutcome<T> {
    pub fn into_object(self) -> Option<T> {
        match self {
            ResponseOutcome::Object(object) => Some(object),
            _ => None,
        }
    }

    pub fn into_list(self) -> Option<Listing<T>> {
        match self {
            ResponseOutcome::List(listing) => Some(listing),
            _ => None,
        }
    }

    pub fn into_message(self) -> Option<String> {
        match self {
            ResponseOutcome::Message(message) => Some(message),
            _ => None,
        }
    }

    pub fn into_file(self) -> Option<BinaryFile> {
        match self {
            ResponseOutcome::File(file) => Some(file),
            _ => None,
        }
    }

    /// Name of the variant, for error reports
    pub fn kind(&self) -> &'static str {
        match self {
            ResponseOutcome::Object(_) => "object",
            ResponseOutcome::List(_) => "list",
            ResponseOutcome::Message(_) => "message",
            ResponseOutcome::File(_) => "file",
        }
    }

    /// The routed object, or `UnexpectedOutcome` for any other variant
    pub fn object(self) -> Result<T> {
        match self {
            ResponseOutcome::Object(object) => Ok(object),
            other => Err(other.unexpected("object")),
        }
    }

    pub fn list(self) -> Result<Listing<T>> {
        match self {
            ResponseOutcome::List(listing) => Ok(listing),
            other => Err(other.unexpected("list")),
        }
    }

    pub fn message(self) -> Result<String> {
        match self {
            ResponseOutcome::Message(message) => Ok(message),
            other => Err(other.unexpected("message")),
        }
    }

    fn unexpected(&self, expected: &'static str) -> Error {
        Error::UnexpectedOutcome {
            expected,
            actual: self.kind(),
        }
    }
}

/// Route a text response through `parser`
pub fn route<P>(
    raw: &RawResponse,
    expectation: Expectation,
    parser: &P,
) -> Result<ResponseOutcome<P::Item>>
where
    P: ResourceParser + ?Sized,
{
    let outcome = match expectation {
        Expectation::Single => ResponseOutcome::Object(parser.parse_single(&raw.body)?),
        Expectation::List => ResponseOutcome::List(parser.parse_list(&raw.body)?),
        Expectation::Message => ResponseOutcome::Message(parser.parse_message(&raw.body)?),
    };

    Ok(outcome)
}

/// Binary downloads pass through untouched
pub fn route_file<T>(file: BinaryFile) -> ResponseOutcome<T> {
    ResponseOutcome::File(file)
}

//! Response parsers
//!
//! Every success body from the service is a JSON envelope:
//!
//! ```json
//! {"code": 0, "message": "success", "expense": {...}}
//! {"code": 0, "message": "success", "expenses": [...], "page_context": {...}}
//! {"code": 0, "message": "The expense has been deleted."}
//! ```
//!
//! A [`ResourceParser`] extracts the typed payload (or the `message`) from
//! that envelope and refuses anything else: a missing key or a field of the
//! wrong type is an `Error::Parse`, never a partially filled object.

use std::marker::PhantomData;

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Envelope keys under which the service nests a domain object
pub trait Enveloped {
    /// Key of a single object, e.g. `expense`
    const SINGLE_KEY: &'static str;
    /// Key of a collection, e.g. `expenses`
    const LIST_KEY: &'static str;
}

/// Parser capabilities a resource kind exposes to the router
pub trait ResourceParser {
    type Item;

    fn parse_single(&self, json: &str) -> Result<Self::Item>;

    fn parse_list(&self, json: &str) -> Result<Listing<Self::Item>>;

    /// Read the `message` field of the envelope, verbatim
    fn parse_message(&self, json: &str) -> Result<String>;
}

/// Paging information returned with collections
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageContext {
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub per_page: Option<u32>,
    #[serde(default)]
    pub has_more_page: Option<bool>,
    #[serde(default)]
    pub report_name: Option<String>,
    #[serde(default)]
    pub applied_filter: Option<String>,
    #[serde(default)]
    pub sort_column: Option<String>,
    #[serde(default)]
    pub sort_order: Option<String>,
}

/// Collection of objects in server order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Listing<T> {
    pub items: Vec<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_context: Option<PageContext>,
}

impl<T> Listing<T> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_more_page(&self) -> bool {
        self.page_context
            .as_ref()
            .and_then(|ctx| ctx.has_more_page)
            .unwrap_or(false)
    }
}

impl<T> IntoIterator for Listing<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

/// Serde-backed parser for any [`Enveloped`] type
pub struct EnvelopeParser<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> EnvelopeParser<T> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for EnvelopeParser<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ResourceParser for EnvelopeParser<T>
where
    T: Enveloped + DeserializeOwned,
{
    type Item = T;

    fn parse_single(&self, json: &str) -> Result<T> {
        let mut envelope = parse_envelope(json, T::SINGLE_KEY)?;
        let value = take_field(&mut envelope, T::SINGLE_KEY)?;

        serde_json::from_value(value).map_err(|source| Error::Parse {
            context: format!("`{}` object", T::SINGLE_KEY),
            source,
        })
    }

    fn parse_list(&self, json: &str) -> Result<Listing<T>> {
        let mut envelope = parse_envelope(json, T::LIST_KEY)?;
        let value = take_field(&mut envelope, T::LIST_KEY)?;

        let items = serde_json::from_value(value).map_err(|source| Error::Parse {
            context: format!("`{}` list", T::LIST_KEY),
            source,
        })?;

        let page_context = envelope
            .remove("page_context")
            .map(serde_json::from_value)
            .transpose()
            .map_err(|source| Error::Parse {
                context: "`page_context`".to_string(),
                source,
            })?;

        Ok(Listing {
            items,
            page_context,
        })
    }

    fn parse_message(&self, json: &str) -> Result<String> {
        parse_message(json)
    }
}

/// Extract the `message` field from a response envelope
pub fn parse_message(json: &str) -> Result<String> {
    let mut envelope = parse_envelope(json, "message")?;

    match take_field(&mut envelope, "message")? {
        Value::String(message) => Ok(message),
        other => Err(Error::Parse {
            context: "`message`".to_string(),
            source: serde_json::Error::custom(format!(
                "expected a string, found {}",
                json_type_name(&other)
            )),
        }),
    }
}

fn parse_envelope(json: &str, wanted: &str) -> Result<Map<String, Value>> {
    match serde_json::from_str::<Value>(json) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(Error::Parse {
            context: format!("response envelope for `{wanted}`"),
            source: serde_json::Error::custom(format!(
                "expected a JSON object, found {}",
                json_type_name(&other)
            )),
        }),
        Err(source) => Err(Error::Parse {
            context: format!("response envelope for `{wanted}`"),
            source,
        }),
    }
}

fn take_field(envelope: &mut Map<String, Value>, key: &str) -> Result<Value> {
    envelope.remove(key).ok_or_else(|| Error::Parse {
        context: format!("`{key}`"),
        source: serde_json::Error::custom(format!("missing field `{key}`")),
    })
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

//! Request body encoding
//!
//! The service takes domain objects as a JSON document embedded in a form
//! field named `JSONString`. When files travel with the request, the same
//! field becomes one text part of a `multipart/form-data` body.

use serde::Serialize;

use crate::error::{Error, Result};

/// Form field that carries the JSON-encoded domain object
pub const JSON_FIELD: &str = "JSONString";

/// How the transport must encode the body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyEncoding {
    /// `application/x-www-form-urlencoded`
    Form,
    /// `multipart/form-data`
    Multipart,
}

/// One named binary part of a multipart body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub field: String,
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl Attachment {
    /// Build an attachment, inferring the MIME type from the file name
    pub fn new(field: impl Into<String>, file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        Self {
            field: field.into(),
            mime_type: mime_from_extension(&file_name).to_string(),
            file_name,
            bytes,
        }
    }
}

/// Named binary parts to send alongside the JSON field
///
/// Several parts may share a field name (e.g. `attachments` when an email
/// carries more than one file); their order is preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attachments {
    parts: Vec<Attachment>,
}

impl Attachments {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn single(attachment: Attachment) -> Self {
        Self {
            parts: vec![attachment],
        }
    }

    pub fn with(mut self, attachment: Attachment) -> Self {
        self.parts.push(attachment);
        self
    }

    pub fn push(&mut self, attachment: Attachment) {
        self.parts.push(attachment);
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Attachment> {
        self.parts.iter()
    }
}

impl From<Attachment> for Attachments {
    fn from(attachment: Attachment) -> Self {
        Attachments::single(attachment)
    }
}

impl From<Option<Attachment>> for Attachments {
    fn from(attachment: Option<Attachment>) -> Self {
        attachment.map(Attachments::single).unwrap_or_default()
    }
}

impl FromIterator<Attachment> for Attachments {
    fn from_iter<I: IntoIterator<Item = Attachment>>(iter: I) -> Self {
        Self {
            parts: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Attachments {
    type Item = Attachment;
    type IntoIter = std::vec::IntoIter<Attachment>;

    fn into_iter(self) -> Self::IntoIter {
        self.parts.into_iter()
    }
}

/// Encoded request body, ready for the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestPayload {
    json: Option<String>,
    attachments: Attachments,
}

impl RequestPayload {
    /// Body without JSON field nor files (verb-only calls such as status transitions)
    pub fn empty() -> Self {
        Self {
            json: None,
            attachments: Attachments::none(),
        }
    }

    /// JSON text that travels under [`JSON_FIELD`], if any
    pub fn json(&self) -> Option<&str> {
        self.json.as_deref()
    }

    pub fn attachments(&self) -> &Attachments {
        &self.attachments
    }

    /// Multipart as soon as one file is attached, form-encoded otherwise
    pub fn encoding(&self) -> BodyEncoding {
        if self.attachments.is_empty() {
            BodyEncoding::Form
        } else {
            BodyEncoding::Multipart
        }
    }

    pub fn is_multipart(&self) -> bool {
        self.encoding() == BodyEncoding::Multipart
    }

    pub fn is_empty(&self) -> bool {
        self.json.is_none() && self.attachments.is_empty()
    }

    /// Plain form fields (only the JSON field today)
    pub fn form_fields(&self) -> Vec<(&'static str, &str)> {
        self.json
            .as_deref()
            .map(|json| vec![(JSON_FIELD, json)])
            .unwrap_or_default()
    }
}

/// Encode a domain object and its files into a request body
///
/// # Arguments
/// * `object` - Domain object to embed as `JSONString`, or `None` for verb-only calls
/// * `attachments` - Files to send; any file switches the body to multipart
///
/// # Returns
/// * `RequestPayload` - The encoded body, or `Error::Serialization` if the object can't become JSON
pub fn encode_payload<T>(object: Option<&T>, attachments: Attachments) -> Result<RequestPayload>
where
    T: Serialize + ?Sized,
{
    let json = object
        .map(|value| serde_json::to_string(value).map_err(Error::Serialization))
        .transpose()?;

    Ok(RequestPayload { json, attachments })
}

/// Infer MIME type from file extension.
pub fn mime_from_extension(filename: &str) -> &'static str {
    let ext = filename.rsplit('.').next().unwrap_or("").to_lowercase();

    match ext.as_str() {
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "tif" | "tiff" => "image/tiff",
        "txt" => "text/plain",
        "csv" => "text/csv",
        "json" => "application/json",
        "xml" => "application/xml",
        "html" | "htm" => "text/html",
        "zip" => "application/zip",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "xls" => "application/vnd.ms-excel",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::ser::Error as _;
    use serde::Serializer;

    #[derive(Serialize)]
    struct Sample {
        account_id: String,
        amount: f64,
    }

    struct Broken;

    impl Serialize for Broken {
        fn serialize<S: Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
            Err(S::Error::custom("malformed internal state"))
        }
    }

    fn sample() -> Sample {
        Sample {
            account_id: "460000000000361".to_string(),
            amount: 112.5,
        }
    }

    fn receipt() -> Attachment {
        Attachment::new("receipt", "fuel.pdf", b"%PDF-1.4".to_vec())
    }

    #[test]
    fn test_encode_without_files_is_form_encoded() {
        // Act
        let payload = encode_payload(Some(&sample()), Attachments::none());

        // Assert
        let payload = payload.unwrap();
        assert_eq!(payload.encoding(), BodyEncoding::Form);
        assert!(!payload.is_multipart());
        assert_eq!(
            payload.json(),
            Some(r#"{"account_id":"460000000000361","amount":112.5}"#)
        );
        assert_eq!(payload.form_fields().len(), 1);
        assert_eq!(payload.form_fields()[0].0, "JSONString");
    }

    #[test]
    fn test_encode_with_receipt_is_multipart_and_keeps_json() {
        // Act
        let payload = encode_payload(Some(&sample()), receipt().into()).unwrap();

        // Assert: JSON field travels next to the binary field
        assert!(payload.is_multipart());
        assert!(payload.json().is_some());
        let parts: Vec<_> = payload.attachments().iter().collect();
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].field, "receipt");
        assert_eq!(parts[0].mime_type, "application/pdf");
        assert_eq!(parts[0].bytes, b"%PDF-1.4");
    }

    #[test]
    fn test_encode_verb_only_has_no_json_field() {
        let payload = encode_payload::<Sample>(None, Attachments::none()).unwrap();

        assert!(payload.json().is_none());
        assert!(payload.form_fields().is_empty());
        assert!(payload.is_empty());
        assert_eq!(payload, RequestPayload::empty());
    }

    #[test]
    fn test_encode_file_only_is_multipart_without_json() {
        let payload = encode_payload::<Sample>(None, receipt().into()).unwrap();

        assert!(payload.is_multipart());
        assert!(payload.json().is_none());
    }

    #[test]
    fn test_encode_keeps_repeated_fields_in_order() {
        let files: Attachments = vec![
            Attachment::new("attachments", "a.png", vec![1]),
            Attachment::new("attachments", "b.txt", vec![2]),
        ]
        .into_iter()
        .collect();

        let email = serde_json::json!({"subject": "Hi"});

        let payload = encode_payload(Some(&email), files).unwrap();

        let names: Vec<_> = payload
            .attachments()
            .iter()
            .map(|a| a.file_name.as_str())
            .collect();
        assert_eq!(names, vec!["a.png", "b.txt"]);
    }

    #[test]
    fn test_encode_serialization_failure() {
        let result = encode_payload(Some(&Broken), Attachments::none());

        assert!(matches!(result, Err(Error::Serialization(_))));
    }

    #[test]
    fn test_mime_from_extension() {
        assert_eq!(mime_from_extension("scan.JPG"), "image/jpeg");
        assert_eq!(mime_from_extension("order.pdf"), "application/pdf");
        assert_eq!(mime_from_extension("noext"), "application/octet-stream");
    }
}

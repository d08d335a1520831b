use serde::{Deserialize, Serialize};

use crate::parser::Enveloped;
use crate::payload::Attachment;

/// Email sent on behalf of a transaction
///
/// `attachments` never appear in the JSON document: they travel as
/// `attachments` parts of a multipart body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Email {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub to_mail_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cc_mail_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub send_from_org_email_id: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub to_contacts: Vec<EmailContact>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub from_emails: Vec<EmailContact>,
    #[serde(skip)]
    pub attachments: Vec<Attachment>,
}

/// Recipient or sender suggested by the email content endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmailContact {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_org_email_id: Option<bool>,
}

impl Enveloped for Email {
    const SINGLE_KEY: &'static str = "data";
    const LIST_KEY: &'static str = "data";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attachments_stay_out_of_json() {
        let email = Email {
            to_mail_ids: vec!["buyer@example.com".to_string()],
            subject: Some("Your order".to_string()),
            attachments: vec![Attachment::new("attachments", "terms.pdf", vec![1, 2, 3])],
            ..Default::default()
        };

        let json = serde_json::to_string(&email).unwrap();

        assert_eq!(
            json,
            r#"{"to_mail_ids":["buyer@example.com"],"subject":"Your order"}"#
        );
    }
}

use serde::{Deserialize, Serialize};

use crate::parser::Enveloped;

/// Comment or history entry attached to a transaction
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expense_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salesorder_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commented_by_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commented_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_type: Option<String>,
}

impl Comment {
    /// Body for adding or editing a comment
    pub fn with_description(description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            ..Default::default()
        }
    }
}

impl Enveloped for Comment {
    const SINGLE_KEY: &'static str = "comment";
    const LIST_KEY: &'static str = "comments";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_description_serializes_only_description() {
        let comment = Comment::with_description("Call customer before shipping");

        let json = serde_json::to_string(&comment).unwrap();

        assert_eq!(json, r#"{"description":"Call customer before shipping"}"#);
    }
}

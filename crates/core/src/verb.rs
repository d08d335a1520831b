use std::fmt;

use serde::{Deserialize, Serialize};

/// HTTP verb of a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verb {
    Get,
    Post,
    Put,
    Delete,
}

impl Verb {
    pub const fn as_str(self) -> &'static str {
        match self {
            Verb::Get => "GET",
            Verb::Post => "POST",
            Verb::Put => "PUT",
            Verb::Delete => "DELETE",
        }
    }

    /// Whether requests with this verb may carry a body
    pub const fn has_body(self) -> bool {
        matches!(self, Verb::Post | Verb::Put)
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_post_and_put_carry_a_body() {
        assert!(Verb::Post.has_body());
        assert!(Verb::Put.has_body());
        assert!(!Verb::Get.has_body());
        assert!(!Verb::Delete.has_body());
    }

    #[test]
    fn test_verb_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&Verb::Delete).unwrap(), r#""DELETE""#);
        assert_eq!(Verb::Get.to_string(), "GET");
    }
}

//! Resource URL paths
//!
//! `{base}/{collection}[/{id}][/{sub}[/{subId}]]`, e.g. `/expenses/{id}/receipt`
//! or `/salesorders/{id}/comments/{commentId}`. Every segment is
//! percent-encoded so caller-supplied identifiers can't escape their slot.

use std::fmt;

/// Path of a resource relative to the service root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourcePath {
    segments: Vec<String>,
}

impl ResourcePath {
    /// Start at a collection, e.g. `expenses`
    pub fn collection(name: &str) -> Self {
        Self {
            segments: vec![name.to_string()],
        }
    }

    /// Append one segment (an identifier or a sub-resource name)
    pub fn segment(mut self, segment: impl AsRef<str>) -> Self {
        self.segments.push(segment.as_ref().to_string());
        self
    }

    /// Append several fixed segments, e.g. `["status", "open"]`
    pub fn segments<I, S>(mut self, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.segments
            .extend(segments.into_iter().map(|s| s.as_ref().to_string()));
        self
    }

    /// Encoded path starting with `/`
    pub fn to_path(&self) -> String {
        self.segments
            .iter()
            .map(|segment| format!("/{}", urlencoding::encode(segment)))
            .collect()
    }

    /// Absolute URL under `base`
    pub fn url(&self, base: &str) -> String {
        format!("{}{}", base.trim_end_matches('/'), self.to_path())
    }
}

impl fmt::Display for ResourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_path() {
        assert_eq!(ResourcePath::collection("expenses").to_path(), "/expenses");
    }

    #[test]
    fn test_nested_path() {
        let path = ResourcePath::collection("salesorders")
            .segment("4815000000044895")
            .segment("comments")
            .segment("4815000000044901");

        assert_eq!(
            path.to_path(),
            "/salesorders/4815000000044895/comments/4815000000044901"
        );
    }

    #[test]
    fn test_status_transition_path() {
        let path = ResourcePath::collection("salesorders")
            .segment("42")
            .segments(["status", "open"]);

        assert_eq!(path.to_string(), "/salesorders/42/status/open");
    }

    #[test]
    fn test_url_joins_base_without_double_slash() {
        let expense = ResourcePath::collection("expenses").segment("1");
        let path = expense.segment("receipt");

        assert_eq!(
            path.url("https://www.zohoapis.com/books/v3/"),
            "https://www.zohoapis.com/books/v3/expenses/1/receipt"
        );
    }

    #[test]
    fn test_segments_are_percent_encoded() {
        let path = ResourcePath::collection("expenses").segment("../admin?x=1");

        assert_eq!(path.to_path(), "/expenses/..%2Fadmin%3Fx%3D1");
    }
}

//! Query parameter assembly
//!
//! Pure functions that merge caller-supplied filters with the tenant scope.
//! Filter names (`status`, `description_contains`, `amount_less_than`, ...)
//! are opaque here: the service validates them, this layer only carries them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::tenant::TenantContext;

/// A single query parameter value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QueryValue {
    Text(String),
    Integer(i64),
    Decimal(f64),
    Boolean(bool),
}

impl fmt::Display for QueryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryValue::Text(value) => write!(f, "{value}"),
            QueryValue::Integer(value) => write!(f, "{value}"),
            QueryValue::Decimal(value) => write!(f, "{value}"),
            QueryValue::Boolean(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        QueryValue::Text(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        QueryValue::Text(value)
    }
}

impl From<&String> for QueryValue {
    fn from(value: &String) -> Self {
        QueryValue::Text(value.clone())
    }
}

impl From<i64> for QueryValue {
    fn from(value: i64) -> Self {
        QueryValue::Integer(value)
    }
}

impl From<i32> for QueryValue {
    fn from(value: i32) -> Self {
        QueryValue::Integer(i64::from(value))
    }
}

impl From<u32> for QueryValue {
    fn from(value: u32) -> Self {
        QueryValue::Integer(i64::from(value))
    }
}

impl From<f64> for QueryValue {
    fn from(value: f64) -> Self {
        QueryValue::Decimal(value)
    }
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        QueryValue::Boolean(value)
    }
}

/// Insertion-ordered mapping of query parameter names to values
///
/// Keys are unique: inserting an existing key replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParameters {
    entries: Vec<(String, QueryValue)>,
}

impl QueryParameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert or overwrite `key`, returning the previous value
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<QueryValue>,
    ) -> Option<QueryValue> {
        let key = key.into();
        let value = value.into();

        let existing = self.entries.iter_mut().find(|(name, _)| *name == key);

        match existing {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&QueryValue> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &QueryValue)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value))
    }

    /// Render as string pairs for the transport
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.clone(), value.to_string()))
            .collect()
    }
}

impl<K, V> FromIterator<(K, V)> for QueryParameters
where
    K: Into<String>,
    V: Into<QueryValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = QueryParameters::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

/// Merge caller filters with the tenant scope
///
/// The caller's mapping is copied, never mutated. An absent mapping and an
/// empty one are equivalent. The tenant entry is written last and always
/// wins over a caller-supplied value for the same key.
///
/// # Arguments
/// * `tenant` - The session's tenant context
/// * `caller` - Optional caller filters
///
/// # Returns
/// * `QueryParameters` - Caller entries (in their order) plus exactly one tenant entry
pub fn build_query(tenant: &TenantContext, caller: Option<&QueryParameters>) -> QueryParameters {
    let mut params = match caller {
        Some(filters) if !filters.is_empty() => filters.clone(),
        _ => QueryParameters::new(),
    };

    params.insert(tenant.scope_key(), tenant.scope_value());
    params
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tenant::Region;

    fn tenant(id: &str) -> TenantContext {
        TenantContext::new("token", id, Region::Default)
    }

    #[test]
    fn test_build_query_without_filters() {
        // Arrange
        let tenant = tenant("T1");

        // Act
        let params = build_query(&tenant, None);

        // Assert
        assert_eq!(params.len(), 1);
        assert_eq!(params.get("organization_id"), Some(&QueryValue::from("T1")));
    }

    #[test]
    fn test_build_query_empty_and_absent_are_equivalent() {
        let tenant = tenant("T1");
        let empty = QueryParameters::new();

        assert_eq!(
            build_query(&tenant, Some(&empty)),
            build_query(&tenant, None)
        );
    }

    #[test]
    fn test_build_query_with_caller_filters() {
        // Arrange: caller filters that don't mention the tenant key
        let tenant = tenant("T1");
        let filters = QueryParameters::new().with("status", "unbilled");

        // Act
        let params = build_query(&tenant, Some(&filters));

        // Assert: |M| + 1 entries, tenant entry appended last
        assert_eq!(params.len(), 2);
        assert_eq!(
            params.to_pairs(),
            vec![
                ("status".to_string(), "unbilled".to_string()),
                ("organization_id".to_string(), "T1".to_string()),
            ]
        );
    }

    #[test]
    fn test_build_query_tenant_overrides_caller_value() {
        // Arrange: caller tries to scope to another organization
        let tenant = tenant("T1");
        let filters = QueryParameters::new()
            .with("organization_id", "other-org")
            .with("page", 2);

        // Act
        let params = build_query(&tenant, Some(&filters));

        // Assert: count unchanged, caller value discarded
        assert_eq!(params.len(), 2);
        assert_eq!(params.get("organization_id"), Some(&QueryValue::from("T1")));
        assert_eq!(params.get("page"), Some(&QueryValue::Integer(2)));
    }

    #[test]
    fn test_build_query_does_not_mutate_caller() {
        let tenant = tenant("T1");
        let filters = QueryParameters::new().with("status", "invoiced");
        let before = filters.clone();

        let _ = build_query(&tenant, Some(&filters));

        assert_eq!(filters, before);
        assert!(!filters.contains_key("organization_id"));
    }

    #[test]
    fn test_build_query_is_idempotent() {
        let tenant = tenant("T1");
        let filters: QueryParameters = [
            ("description_contains", QueryValue::from("fuel")),
            ("amount_less_than", QueryValue::from(120.5)),
            ("organization_id", QueryValue::from("nope")),
        ]
        .into_iter()
        .collect();

        let once = build_query(&tenant, Some(&filters));
        let twice = build_query(&tenant, Some(&once));

        assert_eq!(once, twice);
    }

    #[test]
    fn test_insert_overwrites_in_place() {
        let mut params = QueryParameters::new().with("a", 1).with("b", 2);

        let previous = params.insert("a", 3);

        assert_eq!(previous, Some(QueryValue::Integer(1)));
        assert_eq!(
            params.iter().map(|(k, _)| k).collect::<Vec<_>>(),
            vec!["a", "b"]
        );
        assert_eq!(params.get("a"), Some(&QueryValue::Integer(3)));
    }

    #[test]
    fn test_query_value_display() {
        assert_eq!(QueryValue::from("x").to_string(), "x");
        assert_eq!(QueryValue::from(42i64).to_string(), "42");
        assert_eq!(QueryValue::from(1.5).to_string(), "1.5");
        assert_eq!(QueryValue::from(true).to_string(), "true");
    }
}

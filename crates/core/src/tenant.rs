//! Tenant scoping: credential, organization and regional endpoint
//!
//! A [`TenantContext`] is built once per client session and never mutated.
//! Every request the client sends is scoped to its organization through the
//! `organization_id` query parameter.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Query parameter carrying the organization a request applies to
pub const SCOPE_KEY: &str = "organization_id";

/// Service region, which decides the API root
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    #[default]
    Default,
    Eu,
}

impl Region {
    /// API root for this region
    pub const fn base_endpoint(self) -> &'static str {
        match self {
            Region::Default => "https://www.zohoapis.com/books/v3",
            Region::Eu => "https://www.zohoapis.eu/books/v3",
        }
    }
}

impl FromStr for Region {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "default" | "com" | "us" => Ok(Region::Default),
            "eu" => Ok(Region::Eu),
            other => Err(format!("Unknown region: {other} (expected 'default' or 'eu')")),
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Region::Default => write!(f, "default"),
            Region::Eu => write!(f, "eu"),
        }
    }
}

/// Credential and organization for one client session
#[derive(Clone, PartialEq, Eq)]
pub struct TenantContext {
    credential: String,
    tenant_id: String,
    region: Region,
    base_endpoint: Option<String>,
}

impl TenantContext {
    pub fn new(
        credential: impl Into<String>,
        tenant_id: impl Into<String>,
        region: Region,
    ) -> Self {
        Self {
            credential: credential.into(),
            tenant_id: tenant_id.into(),
            region,
            base_endpoint: None,
        }
    }

    /// Replace the regional API root, e.g. to point at a proxy or a test server.
    ///
    /// Trailing slashes are dropped so paths can be appended verbatim.
    pub fn with_base_endpoint(mut self, base_endpoint: impl Into<String>) -> Self {
        let base = base_endpoint.into();
        self.base_endpoint = Some(base.trim_end_matches('/').to_string());
        self
    }

    /// Service root for the selected region (or the override, if any)
    pub fn base_endpoint(&self) -> &str {
        self.base_endpoint
            .as_deref()
            .unwrap_or_else(|| self.region.base_endpoint())
    }

    pub fn scope_key(&self) -> &'static str {
        SCOPE_KEY
    }

    pub fn scope_value(&self) -> &str {
        &self.tenant_id
    }

    pub fn credential(&self) -> &str {
        &self.credential
    }

    pub fn region(&self) -> Region {
        self.region
    }
}

// The credential stays out of logs and panic messages.
impl fmt::Debug for TenantContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TenantContext")
            .field("credential", &"<redacted>")
            .field("tenant_id", &self.tenant_id)
            .field("region", &self.region)
            .field("base_endpoint", &self.base_endpoint())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_region_endpoint() {
        let tenant = TenantContext::new("token", "T1", Region::Default);

        assert_eq!(tenant.base_endpoint(), "https://www.zohoapis.com/books/v3");
    }

    #[test]
    fn test_eu_region_endpoint() {
        let tenant = TenantContext::new("token", "T1", Region::Eu);

        assert_eq!(tenant.base_endpoint(), "https://www.zohoapis.eu/books/v3");
    }

    #[test]
    fn test_base_endpoint_override_trims_trailing_slash() {
        let tenant = TenantContext::new("token", "T1", Region::Eu)
            .with_base_endpoint("http://127.0.0.1:8080/");

        assert_eq!(tenant.base_endpoint(), "http://127.0.0.1:8080");
        assert_eq!(tenant.region(), Region::Eu);
    }

    #[test]
    fn test_scope_key_and_value() {
        let tenant = TenantContext::new("token", "10234695", Region::Default);

        assert_eq!(tenant.scope_key(), "organization_id");
        assert_eq!(tenant.scope_value(), "10234695");
    }

    #[test]
    fn test_debug_redacts_credential() {
        let tenant = TenantContext::new("super-secret", "T1", Region::Default);

        let rendered = format!("{tenant:?}");

        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
        assert!(rendered.contains("T1"));
    }

    #[test]
    fn test_region_from_str() {
        assert_eq!("eu".parse::<Region>().unwrap(), Region::Eu);
        assert_eq!("EU".parse::<Region>().unwrap(), Region::Eu);
        assert_eq!("default".parse::<Region>().unwrap(), Region::Default);
        assert_eq!("".parse::<Region>().unwrap(), Region::Default);
        assert!("mars".parse::<Region>().is_err());
    }
}

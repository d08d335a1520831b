use books::BooksClient;
use books_core::tenant::{Region, TenantContext};

use crate::prelude::*;

pub const ACCESS_TOKEN_VAR: &str = "BOOKS_ACCESS_TOKEN";
pub const ORGANIZATION_ID_VAR: &str = "BOOKS_ORGANIZATION_ID";
pub const REGION_VAR: &str = "BOOKS_REGION";
pub const BASE_URL_VAR: &str = "BOOKS_BASE_URL";

/// Books configuration from environment variables
#[derive(Clone)]
pub struct BooksConfig {
    pub access_token: String,
    pub organization_id: String,
    pub region: Region,
    /// Overrides the regional endpoint (proxies, test servers)
    pub base_url: Option<String>,
}

impl std::fmt::Debug for BooksConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BooksConfig")
            .field("access_token", &"<redacted>")
            .field("organization_id", &self.organization_id)
            .field("region", &self.region)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl BooksConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |key: &str| {
            lookup(key)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| eyre!("{key} environment variable not set"))
        };

        let region = match lookup(REGION_VAR) {
            Some(value) => value
                .parse::<Region>()
                .map_err(|e| eyre!("Invalid {REGION_VAR}: {e}"))?,
            None => Region::default(),
        };

        Ok(Self {
            access_token: required(ACCESS_TOKEN_VAR)?,
            organization_id: required(ORGANIZATION_ID_VAR)?,
            region,
            base_url: lookup(BASE_URL_VAR).filter(|url| !url.is_empty()),
        })
    }

    /// Apply CLI overrides to the configuration
    pub fn with_overrides(mut self, region: Option<Region>, base_url: Option<String>) -> Self {
        if let Some(region) = region {
            self.region = region;
        }
        if let Some(url) = base_url {
            self.base_url = Some(url);
        }
        self
    }

    pub fn tenant(&self) -> TenantContext {
        let tenant = TenantContext::new(&self.access_token, &self.organization_id, self.region);

        match &self.base_url {
            Some(url) => tenant.with_base_endpoint(url),
            None => tenant,
        }
    }

    pub fn client(&self) -> Result<BooksClient> {
        Ok(BooksClient::new(self.tenant())?)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_from_lookup_defaults_region() {
        // Arrange
        let vars = lookup(&[(ACCESS_TOKEN_VAR, "token"), (ORGANIZATION_ID_VAR, "T1")]);

        // Act
        let config = BooksConfig::from_lookup(vars).unwrap();

        // Assert
        assert_eq!(config.region, Region::Default);
        assert!(config.base_url.is_none());
        assert_eq!(
            config.tenant().base_endpoint(),
            "https://www.zohoapis.com/books/v3"
        );
    }

    #[test]
    fn test_missing_variable_is_named() {
        let vars = lookup(&[(ACCESS_TOKEN_VAR, "token")]);

        let err = BooksConfig::from_lookup(vars).unwrap_err();

        assert!(err.to_string().contains(ORGANIZATION_ID_VAR));
    }

    #[test]
    fn test_invalid_region_is_rejected() {
        let vars = lookup(&[
            (ACCESS_TOKEN_VAR, "token"),
            (ORGANIZATION_ID_VAR, "T1"),
            (REGION_VAR, "mars"),
        ]);

        let err = BooksConfig::from_lookup(vars).unwrap_err();

        assert!(err.to_string().contains(REGION_VAR));
    }

    #[test]
    fn test_overrides_win() {
        let vars = lookup(&[
            (ACCESS_TOKEN_VAR, "s3cr3t"),
            (ORGANIZATION_ID_VAR, "T1"),
            (REGION_VAR, "default"),
        ]);

        let config = BooksConfig::from_lookup(vars)
            .unwrap()
            .with_overrides(Some(Region::Eu), Some("http://localhost:9000/".to_string()));

        assert_eq!(config.region, Region::Eu);
        assert_eq!(config.tenant().base_endpoint(), "http://localhost:9000");
        assert!(!format!("{config:?}").contains("s3cr3t"));
    }
}

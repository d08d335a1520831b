use serde::{Deserialize, Serialize};

use crate::parser::Enveloped;

/// Billing or shipping address of a transaction
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fax: Option<String>,
    /// Also store this address on the customer record
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_update_customer: Option<bool>,
}

impl Enveloped for Address {
    const SINGLE_KEY: &'static str = "address";
    const LIST_KEY: &'static str = "addresses";
}

use serde::{Deserialize, Serialize};

use crate::parser::Enveloped;

/// PDF template that renders a transaction
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Template {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_type: Option<String>,
}

impl Enveloped for Template {
    const SINGLE_KEY: &'static str = "template";
    const LIST_KEY: &'static str = "templates";
}

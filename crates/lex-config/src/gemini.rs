//! Gemini (generative language API) configuration.

use serde::{Deserialize, Serialize};

fn default_model() -> String {
    "gemini-2.5-flash".into()
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".into()
}

fn default_company_name() -> String {
    "LexCorp".into()
}

/// Characters of agreement text sent for risk analysis.
const fn default_risk_excerpt_chars() -> usize {
    1000
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeminiConfig {
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Our side of every drafted agreement.
    #[serde(default = "default_company_name")]
    pub company_name: String,

    #[serde(default = "default_risk_excerpt_chars")]
    pub risk_excerpt_chars: usize,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_model(),
            base_url: default_base_url(),
            company_name: default_company_name(),
            risk_excerpt_chars: default_risk_excerpt_chars(),
        }
    }
}

impl GeminiConfig {
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }

    /// `generateContent` endpoint for the configured model.
    pub fn generate_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

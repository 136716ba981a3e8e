use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Font families agreements can be rendered with.
pub const SUPPORTED_FONTS: [&str; 5] = [
    "DM Sans",
    "Inter",
    "Outfit",
    "Playfair Display",
    "Roboto Mono",
];

/// How agreements look and feel across the organization.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct BrandSettings {
    pub primary_color: String,
    pub font_family: String,
    pub company_name: String,
    #[serde(default)]
    pub logo_url: Option<String>,
}

impl Default for BrandSettings {
    fn default() -> Self {
        Self {
            primary_color: "#f97316".into(),
            font_family: "DM Sans".into(),
            company_name: "LexCorp".into(),
            logo_url: None,
        }
    }
}

impl BrandSettings {
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if the color is not `#rrggbb`, the font
    /// is not one of [`SUPPORTED_FONTS`], or the company name is blank.
    pub fn validate(&self) -> Result<(), CoreError> {
        if !is_hex_color(&self.primary_color) {
            return Err(CoreError::Validation(format!(
                "primary color '{}' must be #rrggbb",
                self.primary_color
            )));
        }
        if !SUPPORTED_FONTS.contains(&self.font_family.as_str()) {
            return Err(CoreError::Validation(format!(
                "unsupported font '{}'",
                self.font_family
            )));
        }
        if self.company_name.trim().is_empty() {
            return Err(CoreError::Validation("company name is required".into()));
        }
        Ok(())
    }
}

fn is_hex_color(value: &str) -> bool {
    value
        .strip_prefix('#')
        .is_some_and(|hex| hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()))
}

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Figment(#[from] figment::Error),

    /// Required keys for a backend (url/key) are absent.
    #[error(
        "'{section}' is not configured; set it in .lexcorp/config.toml or via LEX_{}__* variables",
        .section.to_uppercase()
    )]
    NotConfigured { section: String },

    #[error("invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnuvadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Provider '{provider}' error: {message}")]
    Provider { provider: String, message: String },

    #[error("Provider '{0}' is not configured")]
    ProviderNotConfigured(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Server error: {0}")]
    Server(String),
}

impl AnuvadError {
    /// Shorthand for a provider-level failure message
    pub fn provider(provider: &str, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.to_string(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AnuvadError>;

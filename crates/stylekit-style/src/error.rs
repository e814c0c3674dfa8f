use thiserror::Error;

pub type Result<T> = std::result::Result<T, ThemeError>;

#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("failed to parse theme JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("theme validation failed: {0}")]
    Validation(String),
}

impl ThemeError {
    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

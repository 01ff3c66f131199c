use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// Start month falls after the end month
    #[error("The from BidMonth cannot be after the to BidMonth (from {from}, to {to})")]
    InvalidRange { from: String, to: String },
    /// Network request failed or the portal answered with a non-success status
    #[error("Network error: {0}")]
    NetworkError(String),
    /// Portal sent us back to the login page and flagged the credentials
    #[error("Invalid username or password")]
    InvalidCredentials,
    /// Portal sent us back to the login page without saying why
    #[error("Login failed: {0}")]
    LoginFailed(String),
    /// Failed to parse HTML content
    #[error("Parse error: {0}")]
    ParseError(String),
    /// Invalid URL format
    #[error("Invalid URL: {0}")]
    UrlError(String),
    /// Invalid input format
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// IO operation failed
    #[error("IO error: {0}")]
    IoError(String),
}

// Conversion implementations for common errors
impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::NetworkError(err.to_string())
    }
}

impl From<url::ParseError> for AppError {
    fn from(err: url::ParseError) -> Self {
        AppError::UrlError(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::IoError(err.to_string())
    }
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        AppError::InvalidInput(format!("Failed to parse config: {err}"))
    }
}

// Custom type alias for Results in this application
pub type AppResult<T> = Result<T, AppError>;

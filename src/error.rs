use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// Tree or contest source data does not have the expected shape.
    #[error("malformed catalog data: {0}")]
    Configuration(String),

    #[error("request to {url} failed: {reason}")]
    Network { url: String, reason: String },

    #[error("HTTP error {status} from {url}")]
    Status { url: String, status: u16 },

    /// Remote checklist blob is not a JSON array of entries.
    #[error("invalid checklist format: {0}")]
    Format(String),

    #[error("no access token saved")]
    MissingCredentials,
}

impl CatalogError {
    pub fn network(url: &str, err: impl std::fmt::Display) -> Self {
        CatalogError::Network {
            url: url.to_string(),
            reason: err.to_string(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        CatalogError::Configuration(msg.into())
    }
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("store request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("{0}")]
    Rejected(String),
    #[error("store url error: {0}")]
    Url(#[from] url::ParseError),
    #[error("service key is not a valid header value")]
    InvalidServiceKey,
    #[error("in memory store lock poisoned")]
    Poisoned,
}

impl StoreError {
    /// Message handed back to the caller of the endpoint.
    pub fn message(&self) -> String {
        match self {
            StoreError::Rejected(message) => message.to_owned(),
            other => other.to_string(),
        }
    }
}

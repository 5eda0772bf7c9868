use crate::store::StoreError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;
use thiserror::Error;
use tracing::{debug, error};

pub const INTERNAL_ERROR_MESSAGE: &str = "Error interno";

#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to read configuration: {0}")]
    ConfigError(#[from] config::ConfigError),
    #[error("invalid configuration: {0}")]
    ConfigurationError(#[from] ConfigurationError),
    #[error("socket address parsing error: {0}")]
    SocketAddressParsingError(#[from] std::net::AddrParseError),
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("failed to set up store: {0}")]
    StoreError(#[from] StoreError),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("unknown store type")]
    UnknownStoreType,
    #[error("remote store requires both url and service key")]
    MissingStoreSettings,
    #[error("store url is not a valid url: {0}")]
    InvalidStoreUrl(#[from] url::ParseError),
    #[error("store collection name is empty")]
    MissingCollection,
}

#[derive(Error, Debug)]
pub enum AppErrors {
    #[error("failed to read request body: {0}")]
    MalformedBody(#[from] serde_json::Error),
    #[error("Faltan campos requeridos")]
    MissingFields,
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AppErrors {
    fn status(&self) -> StatusCode {
        match self {
            AppErrors::MissingFields => StatusCode::BAD_REQUEST,
            AppErrors::MalformedBody(_) | AppErrors::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<validator::ValidationErrors> for AppErrors {
    fn from(_: validator::ValidationErrors) -> Self {
        AppErrors::MissingFields
    }
}

impl IntoResponse for AppErrors {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            AppErrors::MissingFields => {
                debug!("contact submission rejected: missing fields");
                self.to_string()
            }
            AppErrors::MalformedBody(e) => {
                error!(error = %e, "POST /api/contact error");
                e.to_string()
            }
            AppErrors::Store(e) => {
                error!(error = %e, "store insert error");
                e.message()
            }
        };
        error_response(status, message)
    }
}

pub fn error_response(status: StatusCode, message: String) -> Response {
    let message = if message.trim().is_empty() {
        INTERNAL_ERROR_MESSAGE.to_string()
    } else {
        message
    };
    (status, Json(json!({ "error": message }))).into_response()
}

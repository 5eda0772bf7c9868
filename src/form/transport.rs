use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::future::Future;
use thiserror::Error;
use url::Url;

const USER_AGENT: &str = concat!("portfolio-contact-form/", env!("CARGO_PKG_VERSION"));

/// Body of `POST /api/contact`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactPayload {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("{0}")]
    Request(#[from] reqwest::Error),
    #[error("{0}")]
    Io(#[from] std::io::Error),
}

pub trait Transport: Send + Sync + 'static {
    fn send(
        &self,
        payload: ContactPayload,
    ) -> impl Future<Output = Result<RawResponse, TransportError>> + Send;
}

#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    endpoint: Url,
}

impl HttpTransport {
    pub fn new(endpoint: Url) -> Result<Self, TransportError> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { client, endpoint })
    }
}

impl Transport for HttpTransport {
    async fn send(&self, payload: ContactPayload) -> Result<RawResponse, TransportError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&payload)
            .send()
            .await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;
        Ok(RawResponse {
            status,
            body: body.to_vec(),
        })
    }
}

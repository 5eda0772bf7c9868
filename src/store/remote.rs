use crate::store::errors::StoreError;
use crate::store::record::SubmissionRecord;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;
use url::Url;

const REST_PATH: &str = "rest/v1/";
const USER_AGENT: &str = concat!("portfolio-contact/", env!("CARGO_PKG_VERSION"));

/// Client for a hosted PostgREST store (Supabase).
#[derive(Debug, Clone)]
pub struct RemoteStore {
    client: Client,
    endpoint: Url,
}

#[derive(Deserialize)]
struct RejectionBody {
    message: String,
}

impl RemoteStore {
    pub fn init(base_url: &Url, service_key: &str, collection: &str) -> Result<Self, StoreError> {
        let mut base_url = base_url.to_owned();
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        let endpoint = base_url.join(REST_PATH)?.join(collection)?;

        let mut headers = HeaderMap::new();
        let key = HeaderValue::from_str(service_key).map_err(|_| StoreError::InvalidServiceKey)?;
        let bearer = HeaderValue::from_str(&format!("Bearer {service_key}"))
            .map_err(|_| StoreError::InvalidServiceKey)?;
        headers.insert("apikey", key);
        headers.insert(AUTHORIZATION, bearer);
        headers.insert("prefer", HeaderValue::from_static("return=minimal"));

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub async fn insert(&self, record: SubmissionRecord) -> Result<(), StoreError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&[record])
            .send()
            .await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                debug!(error = %e, status = status.as_u16(), "failed to read store response body");
                String::new()
            }
        };
        Err(StoreError::Rejected(rejection_message(status.as_u16(), &body)))
    }
}

fn rejection_message(status: u16, body: &str) -> String {
    if let Ok(rejection) = serde_json::from_str::<RejectionBody>(body) {
        return rejection.message;
    }
    let body = body.trim();
    if !body.is_empty() {
        return body.to_string();
    }
    format!("store responded with status {status}")
}

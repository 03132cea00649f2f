//! HTTP capability wrapper
//!
//! The one place adapters touch the network: GET a URL with headers and
//! query parameters, decode the JSON body, fail loudly on anything else.

use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;

/// HTTP-level failures, before they are attributed to a source
#[derive(Debug, Error)]
pub enum HttpError {
    #[error("Request failed: {0}")]
    Network(String),

    #[error("Unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for HttpError {
    fn from(err: reqwest::Error) -> Self {
        HttpError::Network(err.to_string())
    }
}

/// Thin JSON-over-HTTP client shared by all adapters
#[derive(Clone)]
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .user_agent("folio/1.0")
                .build()
                .expect("Failed to create HTTP client"),
        }
    }

    /// GET a URL and decode the JSON body into `T`
    ///
    /// Non-2xx responses are errors; the body is carried in the error so
    /// callers can log what the provider actually said.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        query: &[(&str, &str)],
    ) -> Result<T, HttpError> {
        let mut request = self.client.get(url).query(query);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(HttpError::Status { status, body });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| HttpError::Decode(e.to_string()))
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

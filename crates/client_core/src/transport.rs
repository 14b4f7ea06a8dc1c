use async_trait::async_trait;
use reqwest::Client;
use shared::protocol::{health_route, predict_route, PredictRequest};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to read response body from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Status line and body of a response, before any interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub status_text: Option<String>,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait]
pub trait PredictionService: Send + Sync {
    async fn predict(
        &self,
        base_url: &str,
        request: &PredictRequest,
    ) -> Result<RawResponse, TransportError>;

    async fn health(&self, base_url: &str) -> Result<RawResponse, TransportError>;
}

/// reqwest-backed transport. Timeouts are whatever the supplied client uses.
#[derive(Clone, Default)]
pub struct HttpPredictionService {
    http: Client,
}

impl HttpPredictionService {
    pub fn new() -> Self {
        Self::with_client(Client::new())
    }

    pub fn with_client(http: Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl PredictionService for HttpPredictionService {
    async fn predict(
        &self,
        base_url: &str,
        request: &PredictRequest,
    ) -> Result<RawResponse, TransportError> {
        let url = format!("{base_url}{}", predict_route());
        debug!(%url, model = %request.model_label, "sending prediction request");
        let res = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|source| TransportError::Request {
                url: url.clone(),
                source,
            })?;
        read_raw_response(url, res).await
    }

    async fn health(&self, base_url: &str) -> Result<RawResponse, TransportError> {
        let url = format!("{base_url}{}", health_route());
        let res = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|source| TransportError::Request {
                url: url.clone(),
                source,
            })?;
        read_raw_response(url, res).await
    }
}

async fn read_raw_response(
    url: String,
    res: reqwest::Response,
) -> Result<RawResponse, TransportError> {
    let status = res.status();
    let status_text = status.canonical_reason().map(str::to_string);
    let body = match res.bytes().await {
        Ok(bytes) => bytes.to_vec(),
        // An error status is still meaningful without its body.
        Err(err) if !status.is_success() => {
            warn!(%url, status = status.as_u16(), "dropping unreadable error body: {err}");
            Vec::new()
        }
        Err(source) => return Err(TransportError::Body { url, source }),
    };

    Ok(RawResponse {
        status: status.as_u16(),
        status_text,
        body,
    })
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;

//! Typed `reqwest` client for the store API.

use std::time::Duration;

use reqwest::{Response, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use smartstore_types::{
    AutoSimulateRequest, AutoSimulateStatus, DecideResponse, ErrorBody, HealthResponse, LogView,
    MetricsView, SimulateEmptyResponse, StoreEnvelope, StoreSnapshot,
};
use tracing::debug;

use crate::error::ClientError;

/// Backend address used when none is given.
pub const DEFAULT_URL: &str = "http://localhost:8000";

/// Request timeout used when none is given.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Client for one store backend.
#[derive(Debug, Clone)]
pub struct StoreClient {
    client: reqwest::Client,
    base: Url,
}

impl StoreClient {
    /// Create a client for the backend at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] unless `base_url` is an
    /// absolute `http` or `https` URL.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let invalid = |message: String| ClientError::InvalidUrl {
            url: base_url.to_owned(),
            message,
        };

        let mut base = Url::parse(base_url).map_err(|e| invalid(format!("{e}")))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme {}", base.scheme())));
        }
        // Joining relative paths keeps any prefix only with a trailing slash.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| invalid(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, base })
    }

    /// The backend base URL.
    pub fn base_url(&self) -> &str {
        self.base.as_str()
    }

    /// `GET /health`.
    pub async fn health(&self) -> Result<HealthResponse, ClientError> {
        self.get("health").await
    }

    /// `GET /state`, unwrapped from its `{"store": ...}` envelope.
    pub async fn state(&self) -> Result<StoreSnapshot, ClientError> {
        let envelope: StoreEnvelope = self.get("state").await?;
        Ok(envelope.store)
    }

    /// `POST /simulate_empty`.
    pub async fn simulate_empty(&self) -> Result<SimulateEmptyResponse, ClientError> {
        self.post("simulate_empty", None::<&()>).await
    }

    /// `POST /decide`.
    ///
    /// The no-work outcome is [`DecideResponse::NoWork`], not an error.
    pub async fn decide(&self) -> Result<DecideResponse, ClientError> {
        self.post("decide", None::<&()>).await
    }

    /// `GET /api/metrics`.
    pub async fn metrics(&self) -> Result<MetricsView, ClientError> {
        self.get("api/metrics").await
    }

    /// `GET /api/log?limit=N`.
    pub async fn recent_log(&self, limit: usize) -> Result<LogView, ClientError> {
        self.get(&format!("api/log?limit={limit}")).await
    }

    /// `GET /api/auto-simulate`.
    pub async fn auto_simulate(&self) -> Result<AutoSimulateStatus, ClientError> {
        self.get("api/auto-simulate").await
    }

    /// `POST /api/auto-simulate`.
    pub async fn set_auto_simulate(
        &self,
        request: &AutoSimulateRequest,
    ) -> Result<AutoSimulateStatus, ClientError> {
        self.post("api/auto-simulate", Some(request)).await
    }

    // -----------------------------------------------------------------------
    // Plumbing
    // -----------------------------------------------------------------------

    fn url(&self, path: &str) -> Result<Url, ClientError> {
        self.base.join(path).map_err(|e| ClientError::InvalidUrl {
            url: format!("{}{path}", self.base),
            message: format!("{e}"),
        })
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let url = self.url(path)?;
        debug!(%url, "GET");
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| ClientError::from_reqwest(url.as_str(), &e))?;
        decode(url.as_str(), response).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, ClientError> {
        let url = self.url(path)?;
        debug!(%url, "POST");
        let mut request = self.client.post(url.clone());
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request
            .send()
            .await
            .map_err(|e| ClientError::from_reqwest(url.as_str(), &e))?;
        decode(url.as_str(), response).await
    }
}

/// Turn a response into `T`, or into a [`ClientError::Status`] carrying
/// the server's error text.
async fn decode<T: DeserializeOwned>(url: &str, response: Response) -> Result<T, ClientError> {
    let status = response.status();
    if !status.is_success() {
        let text = response
            .text()
            .await
            .unwrap_or_else(|_| "unable to read error body".to_owned());
        let message = serde_json::from_str::<ErrorBody>(&text).map_or(text, |body| body.error);
        return Err(ClientError::Status {
            url: url.to_owned(),
            status: status.as_u16(),
            message,
        });
    }

    response
        .json()
        .await
        .map_err(|e| ClientError::from_reqwest(url, &e))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gains_trailing_slash() {
        let client = StoreClient::new("http://localhost:8000", DEFAULT_TIMEOUT).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000/");
        assert_eq!(
            client.url("api/metrics").unwrap().as_str(),
            "http://localhost:8000/api/metrics"
        );
    }

    #[test]
    fn path_prefix_is_kept() {
        let client = StoreClient::new("http://example.test/store", DEFAULT_TIMEOUT).unwrap();
        assert_eq!(
            client.url("state").unwrap().as_str(),
            "http://example.test/store/state"
        );
    }

    #[test]
    fn rejects_unusable_urls() {
        for bad in ["not a url", "ftp://localhost:8000", "localhost:8000"] {
            let err = StoreClient::new(bad, DEFAULT_TIMEOUT).unwrap_err();
            assert!(matches!(err, ClientError::InvalidUrl { .. }), "{bad}: {err}");
        }
    }
}

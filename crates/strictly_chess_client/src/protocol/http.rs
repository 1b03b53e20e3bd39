//! HTTP transport for the rules authority.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use super::{
    LegalMovesRequest, LegalMovesResponse, ProtocolError, ProtocolErrorKind, RulesAuthority,
    SubmitMoveRequest, SubmitMoveResponse,
};
use crate::config::{ClientConfig, Endpoints};

/// Rules authority reached with JSON `POST`s.
#[derive(Debug, Clone)]
pub struct HttpAuthority {
    /// Base URL of the authority, without trailing slash.
    base_url: String,
    /// Endpoint paths.
    endpoints: Endpoints,
    /// HTTP client.
    client: reqwest::Client,
}

impl HttpAuthority {
    /// Creates an authority client with a per-request timeout.
    #[instrument(skip_all, fields(base_url = %base_url))]
    pub fn new(
        base_url: String,
        endpoints: Endpoints,
        timeout: Duration,
    ) -> Result<Self, ProtocolError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            endpoints,
            client,
        })
    }

    /// Creates an authority client from configuration.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ProtocolError> {
        Self::new(
            config.server_url().clone(),
            config.endpoints().clone(),
            config.request_timeout(),
        )
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post(&self, path: &str, body: &impl Serialize) -> Result<String, ProtocolError> {
        let url = self.url(path);
        debug!(url = %url, "POST");

        let response = self.client.post(&url).json(body).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(url = %url, status = %status, "Authority returned error status");
            return Err(ProtocolError::new(ProtocolErrorKind::Status(status.as_u16())));
        }

        let text = response.text().await?;
        debug!(url = %url, body = %text, "Response body");
        Ok(text)
    }

    async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<T, ProtocolError> {
        let text = self.post(path, body).await?;
        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait]
impl RulesAuthority for HttpAuthority {
    #[instrument(skip(self), fields(position = %request.position))]
    async fn legal_moves(
        &self,
        request: &LegalMovesRequest,
    ) -> Result<LegalMovesResponse, ProtocolError> {
        self.post_json(self.endpoints.legal_moves(), request).await
    }

    #[instrument(skip(self), fields(from = %request.from, to = %request.to))]
    async fn submit_move(
        &self,
        request: &SubmitMoveRequest,
    ) -> Result<SubmitMoveResponse, ProtocolError> {
        self.post_json(self.endpoints.submit_move(), request).await
    }

    #[instrument(skip(self))]
    async fn reset_game(&self) -> Result<(), ProtocolError> {
        self.post(self.endpoints.reset(), &serde_json::json!({})).await?;
        Ok(())
    }
}

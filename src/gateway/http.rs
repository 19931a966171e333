//! HTTP implementation of the transport gateway
//!
//! Connects to the chat-demo backend over HTTP using `reqwest`, mapping
//! each failure into the error taxonomy: network failure or timeout is a
//! `Transport` error; any non-2xx upstream response is a `Backend` error
//! carrying the upstream status and raw body.

use crate::chaos::state::{ChaosStatus, ScenarioAck, TrafficAck, TrafficLevel};
use crate::config::BackendConfig;
use crate::error::{ChaosChatError, Result};
use crate::gateway::{ChatExchange, Gateway, TitleResponse};
use crate::session::{Message, Session};

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::json;
use std::time::Duration;

/// Reqwest-backed gateway to the backend host
pub struct HttpGateway {
    client: Client,
    base_url: String,
}

impl HttpGateway {
    /// Create a new gateway for the given backend
    ///
    /// # Arguments
    ///
    /// * `config` - Backend base URL and request timeout
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails
    ///
    /// # Examples
    ///
    /// ```
    /// use chaoschat::config::BackendConfig;
    /// use chaoschat::gateway::HttpGateway;
    ///
    /// let config = BackendConfig {
    ///     base_url: "http://localhost:8000".to_string(),
    ///     timeout_seconds: 30,
    /// };
    /// let gateway = HttpGateway::new(&config);
    /// assert!(gateway.is_ok());
    /// ```
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent("chaoschat/0.2.0")
            .build()
            .map_err(|e| {
                ChaosChatError::Transport(format!("Failed to create HTTP client: {}", e))
            })?;

        tracing::info!("Initialized backend gateway: base_url={}", config.base_url);

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// The backend base URL this gateway talks to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Relay a response, mapping non-2xx into `Backend` and decoding JSON
    async fn relay<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!("Backend returned {}: {}", status, body);
            return Err(ChaosChatError::Backend {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        let parsed = response.json::<T>().await.map_err(|e| {
            ChaosChatError::Transport(format!("Failed to parse backend response: {}", e))
        })?;
        Ok(parsed)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        tracing::debug!("GET {}", url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ChaosChatError::Transport(format!("GET {} failed: {}", path, e)))?;
        Self::relay(response).await
    }

    async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<T> {
        let url = self.url(path);
        tracing::debug!("POST {}", url);
        let mut request = self.client.post(&url);
        if let Some(body) = body {
            request = request.json(&body);
        }
        let response = request
            .send()
            .await
            .map_err(|e| ChaosChatError::Transport(format!("POST {} failed: {}", path, e)))?;
        Self::relay(response).await
    }
}

#[async_trait]
impl Gateway for HttpGateway {
    async fn chat(&self, prompt: &str, session_id: Option<&str>) -> Result<ChatExchange> {
        let body = json!({
            "prompt": prompt,
            "session_id": session_id,
        });
        self.post_json("/chat", Some(body)).await
    }

    async fn list_sessions(&self) -> Result<Vec<Session>> {
        self.get_json("/sessions").await
    }

    async fn create_session(&self) -> Result<Session> {
        self.post_json("/sessions", None).await
    }

    async fn delete_session(&self, id: &str) -> Result<()> {
        // Response body is `{"deleted": id}`; only the status matters here.
        let _: serde_json::Value = {
            let url = self.url(&format!("/sessions/{}", id));
            tracing::debug!("DELETE {}", url);
            let response = self.client.delete(&url).send().await.map_err(|e| {
                ChaosChatError::Transport(format!("DELETE /sessions/{} failed: {}", id, e))
            })?;
            Self::relay(response).await?
        };
        Ok(())
    }

    async fn session_messages(&self, id: &str) -> Result<Vec<Message>> {
        self.get_json(&format!("/sessions/{}/messages", id)).await
    }

    async fn generate_title(&self, id: &str) -> Result<TitleResponse> {
        self.post_json(&format!("/sessions/{}/generate-title", id), None)
            .await
    }

    async fn chaos_status(&self) -> Result<ChaosStatus> {
        self.get_json("/chaos/status").await
    }

    async fn set_traffic(&self, enabled: bool, level: TrafficLevel) -> Result<TrafficAck> {
        let body = json!({
            "enabled": enabled,
            "level": level.to_string(),
        });
        self.post_json("/chaos/traffic", Some(body)).await
    }

    async fn trigger_scenario(&self, scenario: &str) -> Result<ScenarioAck> {
        let body = json!({ "scenario": scenario });
        self.post_json("/chaos/scenario", Some(body)).await
    }
}

//! Transport gateway for the chat-demo backend
//!
//! The gateway is a pass-through boundary: it relays each call to the
//! backend and hands back the parsed JSON body, mapping network failure
//! into `Transport` and a non-2xx upstream response into `Backend` with
//! the upstream status and raw body. It applies no semantics of its own.

pub mod http;

pub use http::HttpGateway;

use crate::chaos::state::{ChaosStatus, ScenarioAck, TrafficAck, TrafficLevel};
use crate::error::Result;
use crate::session::{Message, Session};

use async_trait::async_trait;
use serde::Deserialize;

/// Response payload from `POST /chat`
#[derive(Debug, Clone, Deserialize)]
pub struct ChatExchange {
    /// Session the exchange belongs to; server-assigned for new sessions
    pub session_id: String,
    /// Server-assigned id of the appended message
    pub message_id: String,
    /// The assistant's reply
    pub reply: String,
    /// True when the backend answered with a canned "no answer" response
    #[serde(default)]
    pub no_answer: bool,
}

/// Response payload from `POST /sessions/{id}/generate-title`
#[derive(Debug, Clone, Deserialize)]
pub struct TitleResponse {
    pub title: String,
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Uniform forwarding boundary to the backend
///
/// Every backend endpoint the client consumes goes through this trait, so
/// components can be exercised against a mock in tests. Implementations
/// must not reorder, retry, or otherwise reinterpret calls.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// `POST /chat` - submit a prompt, creating a session when none is given
    async fn chat(&self, prompt: &str, session_id: Option<&str>) -> Result<ChatExchange>;

    /// `GET /sessions` - list sessions in backend order
    async fn list_sessions(&self) -> Result<Vec<Session>>;

    /// `POST /sessions` - create a new empty session
    async fn create_session(&self) -> Result<Session>;

    /// `DELETE /sessions/{id}` - delete a session
    async fn delete_session(&self, id: &str) -> Result<()>;

    /// `GET /sessions/{id}/messages` - fetch a session's messages in order
    async fn session_messages(&self, id: &str) -> Result<Vec<Message>>;

    /// `POST /sessions/{id}/generate-title` - request a generated title
    async fn generate_title(&self, id: &str) -> Result<TitleResponse>;

    /// `GET /chaos/status` - fetch the aggregate system status
    async fn chaos_status(&self) -> Result<ChaosStatus>;

    /// `POST /chaos/traffic` - enable or disable synthetic traffic
    async fn set_traffic(&self, enabled: bool, level: TrafficLevel) -> Result<TrafficAck>;

    /// `POST /chaos/scenario` - trigger a break-fix scenario
    async fn trigger_scenario(&self, scenario: &str) -> Result<ScenarioAck>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_exchange_deserialize() {
        let json = r#"{
            "session_id": "s1",
            "message_id": "m1",
            "reply": "hello",
            "no_answer": false
        }"#;
        let exchange: ChatExchange = serde_json::from_str(json).unwrap();
        assert_eq!(exchange.session_id, "s1");
        assert_eq!(exchange.message_id, "m1");
        assert_eq!(exchange.reply, "hello");
        assert!(!exchange.no_answer);
    }

    #[test]
    fn test_chat_exchange_no_answer_defaults_false() {
        let json = r#"{"session_id": "s1", "message_id": "m1", "reply": "hello"}"#;
        let exchange: ChatExchange = serde_json::from_str(json).unwrap();
        assert!(!exchange.no_answer);
    }

    #[test]
    fn test_title_response_deserialize() {
        let json = r#"{"title": "Kubernetes questions", "session_id": "s1"}"#;
        let title: TitleResponse = serde_json::from_str(json).unwrap();
        assert_eq!(title.title, "Kubernetes questions");
        assert_eq!(title.session_id.as_deref(), Some("s1"));
    }
}

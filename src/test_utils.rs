//! Test utilities for ChaosChat
//!
//! This module provides a scriptable in-memory gateway used by unit tests
//! across the crate, plus small constructors for test fixtures. The mock
//! records every backend call so tests can assert on exactly which
//! requests were (or were not) issued.

use crate::chaos::state::{ChaosStatus, ScenarioAck, TrafficAck, TrafficLevel};
use crate::error::{ChaosChatError, Result};
use crate::gateway::{ChatExchange, Gateway, TitleResponse};
use crate::session::{Message, Session};

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Build a session fixture
pub fn make_session(id: &str) -> Session {
    Session {
        id: id.to_string(),
        title: None,
        created_at: None,
        updated_at: "2026-08-26T10:00:00Z".to_string(),
        message_count: 0,
    }
}

/// Build a message fixture
pub fn make_message(id: &str, session_id: &str) -> Message {
    Message {
        id: id.to_string(),
        session_id: session_id.to_string(),
        prompt: format!("prompt {}", id),
        reply: format!("reply {}", id),
        created_at: "2026-08-26T10:00:00Z".to_string(),
    }
}

/// Scriptable in-memory gateway
///
/// Chat exchanges, status payloads, and command acknowledgements are
/// queued up front; session and message listings are kept as simulated
/// backend state that chat exchanges update, so orchestrator flows see a
/// consistent backend across submit, re-list, and message fetch.
#[derive(Default)]
pub struct MockGateway {
    sessions: Mutex<Vec<Session>>,
    messages: Mutex<HashMap<String, Vec<Message>>>,
    chat_queue: Mutex<VecDeque<ChatExchange>>,
    chat_delay: Mutex<Option<Duration>>,
    chat_fail: Mutex<Option<String>>,
    status_queue: Mutex<VecDeque<String>>,
    last_status: Mutex<Option<String>>,
    status_delay: Mutex<Option<Duration>>,
    status_fail: Mutex<Option<String>>,
    traffic_acks: Mutex<VecDeque<String>>,
    scenario_acks: Mutex<VecDeque<String>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared handle to the recorded call log
    pub fn call_log(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.calls)
    }

    /// Seed the simulated backend with existing sessions
    pub fn seed_sessions(&self, sessions: Vec<Session>) {
        *self.sessions.lock().unwrap() = sessions;
    }

    /// Seed the simulated backend with messages for a session
    pub fn seed_messages(&self, session_id: &str, messages: Vec<Message>) {
        self.messages
            .lock()
            .unwrap()
            .insert(session_id.to_string(), messages);
    }

    /// Queue the next chat exchange response
    pub fn push_chat(&self, session_id: &str, message_id: &str, reply: &str) {
        self.chat_queue.lock().unwrap().push_back(ChatExchange {
            session_id: session_id.to_string(),
            message_id: message_id.to_string(),
            reply: reply.to_string(),
            no_answer: false,
        });
    }

    /// Delay every chat call by the given duration
    pub fn delay_chat(&self, delay: Duration) {
        *self.chat_delay.lock().unwrap() = Some(delay);
    }

    /// Fail the next chat call with a transport error
    pub fn fail_next_chat(&self, message: &str) {
        *self.chat_fail.lock().unwrap() = Some(message.to_string());
    }

    /// Queue a raw status payload for the next status fetch
    pub fn push_status(&self, json: &str) {
        self.status_queue
            .lock()
            .unwrap()
            .push_back(json.to_string());
    }

    /// Delay every status fetch by the given duration
    pub fn delay_status(&self, delay: Duration) {
        *self.status_delay.lock().unwrap() = Some(delay);
    }

    /// Fail the next status fetch with a transport error
    pub fn fail_next_status(&self, message: &str) {
        *self.status_fail.lock().unwrap() = Some(message.to_string());
    }

    /// Queue a raw traffic acknowledgement payload
    pub fn push_traffic_ack(&self, json: &str) {
        self.traffic_acks
            .lock()
            .unwrap()
            .push_back(json.to_string());
    }

    /// Queue a raw scenario acknowledgement payload
    pub fn push_scenario_ack(&self, json: &str) {
        self.scenario_acks
            .lock()
            .unwrap()
            .push_back(json.to_string());
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }

    fn transport_err(message: &str) -> anyhow::Error {
        ChaosChatError::Transport(message.to_string()).into()
    }

    fn backend_err(status: u16, body: &str) -> anyhow::Error {
        ChaosChatError::Backend {
            status,
            body: body.to_string(),
        }
        .into()
    }

    /// Apply a chat exchange to the simulated backend state
    fn persist_exchange(&self, prompt: &str, exchange: &ChatExchange) {
        let mut sessions = self.sessions.lock().unwrap();
        match sessions.iter_mut().find(|s| s.id == exchange.session_id) {
            Some(session) => {
                session.message_count += 1;
            }
            None => {
                let mut session = make_session(&exchange.session_id);
                session.message_count = 1;
                sessions.push(session);
            }
        }

        let mut messages = self.messages.lock().unwrap();
        let entry = messages.entry(exchange.session_id.clone()).or_default();
        entry.push(Message {
            id: exchange.message_id.clone(),
            session_id: exchange.session_id.clone(),
            prompt: prompt.to_string(),
            reply: exchange.reply.clone(),
            created_at: "2026-08-26T10:00:00Z".to_string(),
        });
    }
}

#[async_trait]
impl Gateway for MockGateway {
    async fn chat(&self, prompt: &str, session_id: Option<&str>) -> Result<ChatExchange> {
        self.record(format!("chat {}", session_id.unwrap_or("-")));

        let delay = *self.chat_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(message) = self.chat_fail.lock().unwrap().take() {
            return Err(Self::transport_err(&message));
        }

        let exchange = self
            .chat_queue
            .lock()
            .unwrap()
            .pop_front()
            .expect("MockGateway: no scripted chat exchange");
        self.persist_exchange(prompt, &exchange);
        Ok(exchange)
    }

    async fn list_sessions(&self) -> Result<Vec<Session>> {
        self.record("list_sessions");
        Ok(self.sessions.lock().unwrap().clone())
    }

    async fn create_session(&self) -> Result<Session> {
        self.record("create_session");
        let mut sessions = self.sessions.lock().unwrap();
        let session = make_session(&format!("created-{}", sessions.len() + 1));
        sessions.push(session.clone());
        Ok(session)
    }

    async fn delete_session(&self, id: &str) -> Result<()> {
        self.record(format!("delete_session {}", id));
        let mut sessions = self.sessions.lock().unwrap();
        let before = sessions.len();
        sessions.retain(|s| s.id != id);
        if sessions.len() == before {
            return Err(Self::backend_err(404, "Session not found"));
        }
        self.messages.lock().unwrap().remove(id);
        Ok(())
    }

    async fn session_messages(&self, id: &str) -> Result<Vec<Message>> {
        self.record(format!("session_messages {}", id));
        if !self.sessions.lock().unwrap().iter().any(|s| s.id == id) {
            return Err(Self::backend_err(404, "Session not found"));
        }
        Ok(self
            .messages
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .unwrap_or_default())
    }

    async fn generate_title(&self, id: &str) -> Result<TitleResponse> {
        self.record(format!("generate_title {}", id));
        Ok(TitleResponse {
            title: format!("Title for {}", id),
            session_id: Some(id.to_string()),
        })
    }

    async fn chaos_status(&self) -> Result<ChaosStatus> {
        self.record("chaos_status");

        let delay = *self.status_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(message) = self.status_fail.lock().unwrap().take() {
            return Err(Self::transport_err(&message));
        }

        let json = match self.status_queue.lock().unwrap().pop_front() {
            Some(json) => {
                *self.last_status.lock().unwrap() = Some(json.clone());
                json
            }
            None => self
                .last_status
                .lock()
                .unwrap()
                .clone()
                .unwrap_or_else(|| "{}".to_string()),
        };
        Ok(serde_json::from_str(&json)?)
    }

    async fn set_traffic(&self, enabled: bool, level: TrafficLevel) -> Result<TrafficAck> {
        self.record(format!("set_traffic {} {}", enabled, level));
        let json = self
            .traffic_acks
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| format!(r#"{{"enabled": {}, "level": "{}"}}"#, enabled, level));
        Ok(serde_json::from_str(&json)?)
    }

    async fn trigger_scenario(&self, scenario: &str) -> Result<ScenarioAck> {
        self.record(format!("trigger_scenario {}", scenario));
        let json = self
            .scenario_acks
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| format!(r#"{{"success": true, "scenario": "{}"}}"#, scenario));
        Ok(serde_json::from_str(&json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_gateway_chat_persists_exchange() {
        let gateway = MockGateway::new();
        gateway.push_chat("s1", "m1", "hello");

        let exchange = gateway.chat("hi", None).await.unwrap();
        assert_eq!(exchange.session_id, "s1");

        let sessions = gateway.list_sessions().await.unwrap();
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].message_count, 1);

        let messages = gateway.session_messages("s1").await.unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].prompt, "hi");
    }

    #[tokio::test]
    async fn test_mock_gateway_delete_unknown_is_404() {
        let gateway = MockGateway::new();
        let result = gateway.delete_session("missing").await;
        let error = result.unwrap_err().downcast::<ChaosChatError>().unwrap();
        assert!(error.is_backend_not_found());
    }

    #[tokio::test]
    async fn test_mock_gateway_records_calls() {
        let gateway = MockGateway::new();
        let calls = gateway.call_log();

        let _ = gateway.list_sessions().await;
        let _ = gateway.trigger_scenario("db-slow").await;

        let calls = calls.lock().unwrap();
        assert_eq!(calls.as_slice(), ["list_sessions", "trigger_scenario db-slow"]);
    }

    #[tokio::test]
    async fn test_mock_gateway_status_repeats_last_when_queue_empty() {
        let gateway = MockGateway::new();
        gateway.push_status(r#"{"trafficEnabled": true}"#);

        let first = gateway.chaos_status().await.unwrap();
        assert!(first.traffic_enabled);

        let second = gateway.chaos_status().await.unwrap();
        assert!(second.traffic_enabled);
    }
}

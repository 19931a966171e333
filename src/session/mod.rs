//! Session and message types for ChaosChat
//!
//! This module contains the conversation data model shared by the session
//! store, the timeline, and the chat orchestrator, along with small
//! presentation helpers for session metadata.

pub mod store;
pub mod timeline;

pub use store::SessionStore;
pub use timeline::{LoadTicket, Timeline};

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named, ordered conversation between user and assistant
///
/// Sessions are created implicitly by the first successful chat exchange
/// that carries no prior session id, titled asynchronously after their
/// first message, and deleted explicitly by the user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    /// Server-assigned opaque identifier
    pub id: String,
    /// Session title; None until the backend generates one
    #[serde(default)]
    pub title: Option<String>,
    /// Creation timestamp as reported by the backend
    #[serde(default)]
    pub created_at: Option<String>,
    /// Last-update timestamp as reported by the backend
    pub updated_at: String,
    /// Number of messages in the session
    #[serde(default)]
    pub message_count: u64,
}

impl Session {
    /// Title to display, falling back to a placeholder for untitled sessions
    pub fn display_title(&self) -> &str {
        match &self.title {
            Some(title) if !title.is_empty() => title,
            _ => "New conversation",
        }
    }
}

/// A single prompt/reply exchange within a session
///
/// Messages are immutable once appended and identified by their
/// server-assigned id; the client never reorders or deduplicates by content.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    /// Server-assigned message identifier
    pub id: String,
    /// Session this message belongs to
    pub session_id: String,
    /// The user's prompt
    pub prompt: String,
    /// The assistant's reply
    pub reply: String,
    /// Creation timestamp as reported by the backend
    pub created_at: String,
}

/// Format a backend timestamp as a relative age like "5m ago"
///
/// The backend reports ISO-8601 timestamps, with or without an explicit
/// timezone. Unparseable input is returned verbatim rather than dropped so
/// the listing never loses information.
///
/// # Examples
///
/// ```
/// use chaoschat::session::format_relative_age;
///
/// let formatted = format_relative_age("not-a-timestamp");
/// assert_eq!(formatted, "not-a-timestamp");
/// ```
pub fn format_relative_age(timestamp: &str) -> String {
    let parsed = DateTime::parse_from_rfc3339(timestamp)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| {
            NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M:%S%.f")
                .map(|naive| naive.and_utc())
        });

    let then = match parsed {
        Ok(dt) => dt,
        Err(_) => return timestamp.to_string(),
    };

    let elapsed = Utc::now().signed_duration_since(then);
    let minutes = elapsed.num_minutes();
    let hours = elapsed.num_hours();
    let days = elapsed.num_days();

    if minutes < 1 {
        "just now".to_string()
    } else if minutes < 60 {
        format!("{}m ago", minutes)
    } else if hours < 24 {
        format!("{}h ago", hours)
    } else if days < 7 {
        format!("{}d ago", days)
    } else {
        then.format("%Y-%m-%d").to_string()
    }
}

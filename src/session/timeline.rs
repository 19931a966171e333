//! Ordered message timeline for the active session
//!
//! The timeline exclusively owns the active session's message sequence.
//! Appends are append-only and keep server-assigned order; loading a
//! session fully replaces the content, never merges.
//!
//! Loads that cross a network await use a [`LoadTicket`] snapshot: the
//! ticket is taken before the suspension point and checked before any
//! mutation, so a late response for a superseded load is discarded instead
//! of leaking messages into a different session's timeline.

use crate::session::Message;

/// Snapshot handle for an in-flight timeline load
///
/// Captures the timeline generation at the moment the load began. Any
/// mutation of the timeline after that point invalidates the ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
}

/// The ordered message sequence of the currently selected session
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    session_id: Option<String>,
    messages: Vec<Message>,
    generation: u64,
}

impl Timeline {
    /// Create an empty timeline displaying no session
    pub fn new() -> Self {
        Self::default()
    }

    /// The session id this timeline currently displays, if any
    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    /// Returns true if the timeline currently displays the given session
    pub fn displays(&self, id: &str) -> bool {
        self.session_id.as_deref() == Some(id)
    }

    /// The messages in display order
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Number of messages currently displayed
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns true if no messages are displayed
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Clear the timeline back to the empty "new chat" state
    pub fn clear(&mut self) {
        self.session_id = None;
        self.messages.clear();
        self.generation += 1;
    }

    /// Append a message in server-assigned order
    ///
    /// If the timeline displays no session yet (a brand-new conversation),
    /// it adopts the message's session id.
    pub fn append(&mut self, message: Message) {
        if self.session_id.is_none() {
            self.session_id = Some(message.session_id.clone());
        }
        self.messages.push(message);
        self.generation += 1;
    }

    /// Reset the timeline to display an empty, known session
    ///
    /// Used after creating a session explicitly, before it has messages.
    pub fn reset_for(&mut self, id: String) {
        self.session_id = Some(id);
        self.messages.clear();
        self.generation += 1;
    }

    /// Begin loading a session, invalidating any earlier in-flight load
    ///
    /// The returned ticket must be passed to [`Timeline::complete_load`]
    /// after the fetch resolves. The existing content stays visible until
    /// the load completes.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        LoadTicket {
            generation: self.generation,
        }
    }

    /// Complete a load, replacing the timeline if the ticket is still fresh
    ///
    /// Returns true if the content was applied; false if the ticket was
    /// superseded by a later load, append, or clear, in which case the
    /// fetched messages are dropped.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        session_id: String,
        messages: Vec<Message>,
    ) -> bool {
        if ticket.generation != self.generation {
            tracing::debug!(
                "Discarding stale timeline load for session {} (superseded)",
                session_id
            );
            return false;
        }
        self.session_id = Some(session_id);
        self.messages = messages;
        self.generation += 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(id: &str, session_id: &str) -> Message {
        Message {
            id: id.to_string(),
            session_id: session_id.to_string(),
            prompt: format!("prompt {}", id),
            reply: format!("reply {}", id),
            created_at: "2026-08-26T10:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_new_timeline_is_empty() {
        let timeline = Timeline::new();
        assert!(timeline.is_empty());
        assert_eq!(timeline.session_id(), None);
    }

    #[test]
    fn test_append_preserves_order() {
        let mut timeline = Timeline::new();
        timeline.append(message("m1", "s1"));
        timeline.append(message("m2", "s1"));
        timeline.append(message("m3", "s1"));

        let ids: Vec<&str> = timeline.messages().iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["m1", "m2", "m3"]);
    }

    #[test]
    fn test_append_adopts_session_id() {
        let mut timeline = Timeline::new();
        timeline.append(message("m1", "s1"));
        assert!(timeline.displays("s1"));
    }

    #[test]
    fn test_clear_resets_to_new_chat_state() {
        let mut timeline = Timeline::new();
        timeline.append(message("m1", "s1"));

        timeline.clear();
        assert!(timeline.is_empty());
        assert_eq!(timeline.session_id(), None);
    }

    #[test]
    fn test_complete_load_replaces_content() {
        let mut timeline = Timeline::new();
        timeline.append(message("old", "s1"));

        let ticket = timeline.begin_load();
        let applied = timeline.complete_load(
            ticket,
            "s2".to_string(),
            vec![message("m1", "s2"), message("m2", "s2")],
        );

        assert!(applied);
        assert!(timeline.displays("s2"));
        assert_eq!(timeline.len(), 2);
        assert!(timeline.messages().iter().all(|m| m.session_id == "s2"));
    }

    #[test]
    fn test_superseded_load_is_discarded() {
        let mut timeline = Timeline::new();

        // First load starts, then a second load for a different session
        // starts before the first resolves.
        let first = timeline.begin_load();
        let second = timeline.begin_load();

        let applied_second =
            timeline.complete_load(second, "s2".to_string(), vec![message("m2", "s2")]);
        assert!(applied_second);

        // The first load's response arrives late and must not be applied.
        let applied_first =
            timeline.complete_load(first, "s1".to_string(), vec![message("m1", "s1")]);
        assert!(!applied_first);
        assert!(timeline.displays("s2"));
        assert_eq!(timeline.len(), 1);
        assert_eq!(timeline.messages()[0].id, "m2");
    }

    #[test]
    fn test_clear_invalidates_pending_load() {
        let mut timeline = Timeline::new();
        let ticket = timeline.begin_load();

        timeline.clear();

        let applied = timeline.complete_load(ticket, "s1".to_string(), vec![message("m1", "s1")]);
        assert!(!applied);
        assert!(timeline.is_empty());
        assert_eq!(timeline.session_id(), None);
    }

    #[test]
    fn test_append_invalidates_pending_load() {
        let mut timeline = Timeline::new();
        let ticket = timeline.begin_load();

        timeline.append(message("m1", "s1"));

        let applied = timeline.complete_load(ticket, "s2".to_string(), vec![]);
        assert!(!applied);
        assert!(timeline.displays("s1"));
    }

    #[test]
    fn test_reset_for_empty_session() {
        let mut timeline = Timeline::new();
        timeline.append(message("m1", "s1"));

        timeline.reset_for("s2".to_string());
        assert!(timeline.displays("s2"));
        assert!(timeline.is_empty());
    }
}

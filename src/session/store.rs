//! Session list and selection state
//!
//! The session store exclusively owns the list of known conversation
//! summaries and the currently-selected conversation id. It is a pure
//! local container: network I/O happens in the chat orchestrator, which
//! folds backend listings back in through [`SessionStore::apply_listing`].

use crate::error::{ChaosChatError, Result};
use crate::session::Session;

/// Holds the known sessions and the current selection
///
/// The list preserves backend order; it is never re-sorted client-side.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    sessions: Vec<Session>,
    current: Option<String>,
}

impl SessionStore {
    /// Create an empty store with no sessions and no selection
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the session list with a fresh backend listing
    ///
    /// Order is kept exactly as returned by the backend. If the current
    /// selection no longer appears in the listing it is cleared, so a
    /// session deleted elsewhere cannot remain selected.
    pub fn apply_listing(&mut self, sessions: Vec<Session>) {
        self.sessions = sessions;
        if let Some(current) = &self.current {
            if !self.contains(current) {
                tracing::debug!("Selected session {} disappeared from listing", current);
                self.current = None;
            }
        }
    }

    /// The known sessions, in backend order
    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    /// The currently selected session id, if any
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Look up a session by id
    pub fn get(&self, id: &str) -> Option<&Session> {
        self.sessions.iter().find(|s| s.id == id)
    }

    /// Returns true if a session with the given id is known
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Number of known sessions
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Returns true if no sessions are known
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Select a session by id, or clear the selection with None
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the id is not in the store.
    pub fn select(&mut self, id: Option<String>) -> Result<()> {
        match id {
            Some(id) => {
                if !self.contains(&id) {
                    return Err(ChaosChatError::NotFound(format!("session {}", id)).into());
                }
                self.current = Some(id);
            }
            None => self.current = None,
        }
        Ok(())
    }

    /// Select a session id without requiring it to be listed yet
    ///
    /// Used when adopting a server-assigned id from a chat exchange before
    /// the next listing refresh has landed.
    pub fn select_unlisted(&mut self, id: String) {
        self.current = Some(id);
    }

    /// Remove a session from the local list
    ///
    /// Returns true if the removed id was the current selection, in which
    /// case the selection is cleared and the caller must clear the timeline.
    pub fn remove_local(&mut self, id: &str) -> bool {
        self.sessions.retain(|s| s.id != id);
        if self.current.as_deref() == Some(id) {
            self.current = None;
            true
        } else {
            false
        }
    }

    /// Update only the title of a session, if it still exists
    ///
    /// This is the stale-write guard for asynchronous title generation:
    /// a title arriving after the session was deleted is a silent no-op.
    /// Returns true if the title was applied.
    pub fn set_title(&mut self, id: &str, title: String) -> bool {
        match self.sessions.iter_mut().find(|s| s.id == id) {
            Some(session) => {
                session.title = Some(title);
                true
            }
            None => {
                tracing::debug!("Dropping title for deleted session {}", id);
                false
            }
        }
    }
}

//! Chat submission lifecycle
//!
//! The orchestrator owns the race between "session not yet created" and
//! "first reply arrives": it snapshots the pre-request timeline length
//! before the network await, adopts the server-assigned session id for
//! brand-new conversations, and schedules asynchronous title generation
//! exactly once per new session.
//!
//! Submissions are serialized by a busy flag rather than cross-thread
//! locking: a submit or session switch attempted while one is in flight
//! fails fast with `Busy` instead of queueing.

use crate::error::{ChaosChatError, Result};
use crate::gateway::Gateway;
use crate::session::{Message, Session, SessionStore, Timeline};

use chrono::Utc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;

/// Result of a successful chat submission
#[derive(Debug)]
pub struct SubmitOutcome {
    /// Session the exchange landed in (server-assigned for new sessions)
    pub session_id: String,
    /// Server-assigned id of the appended message
    pub message_id: String,
    /// The assistant's reply
    pub reply: String,
    /// True when the backend answered with a canned "no answer" response
    pub no_answer: bool,
    /// Handle of the title-generation task, present only when this
    /// submission was the first message of a new session
    pub title_task: Option<JoinHandle<()>>,
}

/// Drives chat submissions over the session store and timeline
pub struct ChatOrchestrator {
    gateway: Arc<dyn Gateway>,
    store: Arc<Mutex<SessionStore>>,
    timeline: Arc<Mutex<Timeline>>,
    busy: AtomicBool,
    title_delay: Duration,
}

/// Clears the busy flag when a submission scope ends, on every exit path
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl ChatOrchestrator {
    /// Create an orchestrator over independently constructed components
    ///
    /// # Arguments
    ///
    /// * `gateway` - Transport boundary to the backend
    /// * `store` - Session list and selection state
    /// * `timeline` - Message sequence of the active session
    /// * `title_delay` - Delay before requesting a generated title
    pub fn new(
        gateway: Arc<dyn Gateway>,
        store: Arc<Mutex<SessionStore>>,
        timeline: Arc<Mutex<Timeline>>,
        title_delay: Duration,
    ) -> Self {
        Self {
            gateway,
            store,
            timeline,
            busy: AtomicBool::new(false),
            title_delay,
        }
    }

    /// Returns true while a submission is in flight
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    /// Snapshot of the known sessions, in backend order
    pub fn sessions(&self) -> Vec<Session> {
        self.store().sessions().to_vec()
    }

    /// The currently selected session id, if any
    pub fn current_session(&self) -> Option<String> {
        self.store().current().map(String::from)
    }

    /// Snapshot of the active session's messages, in display order
    pub fn messages(&self) -> Vec<Message> {
        self.timeline().messages().to_vec()
    }

    /// Submit a prompt against the current session
    ///
    /// Blank input is rejected locally without a network call. On success
    /// the reply is appended to the timeline keyed by the server-returned
    /// identifiers, the session listing is refreshed, and — when this was
    /// the first message of a brand-new session — a delayed
    /// title-generation task is scheduled, fire-and-forget.
    ///
    /// A failed submission leaves the timeline and the session selection
    /// exactly as they were.
    ///
    /// # Errors
    ///
    /// Returns `Validation` for blank prompts, `Busy` when another
    /// submission is in flight, or `Transport`/`Backend` from the chat
    /// call itself.
    pub async fn submit(&self, prompt: &str) -> Result<SubmitOutcome> {
        if prompt.trim().is_empty() {
            return Err(ChaosChatError::Validation("Prompt is required".to_string()).into());
        }

        if self
            .busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(
                ChaosChatError::Busy("A submission is already in flight".to_string()).into(),
            );
        }
        let _guard = BusyGuard(&self.busy);

        // Pre-request snapshot: both values are captured before the network
        // await and never re-read afterwards, so a later mutation cannot
        // change what "first message" meant for this call.
        let session_id = self.store().current().map(String::from);
        let is_first_message = self.timeline().is_empty();

        let exchange = self.gateway.chat(prompt, session_id.as_deref()).await?;

        {
            let mut store = self.store();
            let mut timeline = self.timeline();
            if session_id.is_none() {
                store.select_unlisted(exchange.session_id.clone());
            }
            timeline.append(Message {
                id: exchange.message_id.clone(),
                session_id: exchange.session_id.clone(),
                prompt: prompt.to_string(),
                reply: exchange.reply.clone(),
                created_at: Utc::now().to_rfc3339(),
            });
        }

        // Re-list so session metadata reflects the just-completed exchange.
        // The exchange itself already succeeded, so a listing failure only
        // delays metadata freshness.
        match self.gateway.list_sessions().await {
            Ok(listing) => {
                let mut store = self.store();
                store.apply_listing(listing);
                store.select_unlisted(exchange.session_id.clone());
            }
            Err(e) => {
                tracing::warn!("Session re-list after submit failed: {}", e);
            }
        }

        let title_task = if is_first_message {
            Some(self.schedule_title_generation(exchange.session_id.clone()))
        } else {
            None
        };

        Ok(SubmitOutcome {
            session_id: exchange.session_id,
            message_id: exchange.message_id,
            reply: exchange.reply,
            no_answer: exchange.no_answer,
            title_task,
        })
    }

    /// Schedule asynchronous title generation for a new session
    ///
    /// Runs after a short delay so the backend has persisted the first
    /// exchange. The result updates only the title of the matching store
    /// entry; if the session was deleted meanwhile the update is a silent
    /// no-op, and any failure is swallowed.
    fn schedule_title_generation(&self, session_id: String) -> JoinHandle<()> {
        let gateway = Arc::clone(&self.gateway);
        let store = Arc::clone(&self.store);
        let delay = self.title_delay;

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            match gateway.generate_title(&session_id).await {
                Ok(response) => {
                    let mut store = store.lock().expect("session store lock poisoned");
                    if store.set_title(&session_id, response.title) {
                        tracing::debug!("Applied generated title for session {}", session_id);
                    }
                }
                Err(e) => {
                    tracing::debug!("Title generation for {} failed: {}", session_id, e);
                }
            }
        })
    }

    /// Refresh the session listing from the backend
    pub async fn refresh_sessions(&self) -> Result<()> {
        let listing = self.gateway.list_sessions().await?;
        self.store().apply_listing(listing);
        Ok(())
    }

    /// Switch the active session, or clear the selection with None
    ///
    /// Selecting the session already displayed is idempotent and does not
    /// re-fetch. Loading goes through a timeline ticket taken before the
    /// network await, so a late response for a superseded switch is
    /// discarded instead of leaking into the new timeline.
    ///
    /// # Errors
    ///
    /// Returns `Busy` while a submission is in flight, or `NotFound` when
    /// the session is unknown locally or gone on the backend.
    pub async fn select_session(&self, id: Option<&str>) -> Result<()> {
        if self.is_busy() {
            return Err(ChaosChatError::Busy(
                "Cannot switch sessions while a submission is in flight".to_string(),
            )
            .into());
        }

        let id = match id {
            None => {
                let mut store = self.store();
                let mut timeline = self.timeline();
                store.select(None)?;
                timeline.clear();
                return Ok(());
            }
            Some(id) => id.to_string(),
        };

        let ticket = {
            let store = self.store();
            if !store.contains(&id) {
                return Err(ChaosChatError::NotFound(format!("session {}", id)).into());
            }
            let mut timeline = self.timeline();
            if timeline.displays(&id) {
                drop(timeline);
                drop(store);
                self.store().select(Some(id))?;
                return Ok(());
            }
            timeline.begin_load()
        };

        let messages = self
            .gateway
            .session_messages(&id)
            .await
            .map_err(|e| map_backend_not_found(e, &format!("session {}", id)))?;

        let mut store = self.store();
        let mut timeline = self.timeline();
        if timeline.complete_load(ticket, id.clone(), messages) {
            store.select(Some(id))?;
        }
        Ok(())
    }

    /// Reset to the empty "new chat" state without touching the backend
    pub fn start_new_chat(&self) {
        let mut store = self.store();
        let mut timeline = self.timeline();
        if store.select(None).is_ok() {
            timeline.clear();
        }
    }

    /// Create a new empty session explicitly and select it
    ///
    /// Used for an explicit "new chat" that should exist server-side
    /// before any message is sent.
    pub async fn create_session(&self) -> Result<Session> {
        let session = self.gateway.create_session().await?;

        match self.gateway.list_sessions().await {
            Ok(listing) => self.store().apply_listing(listing),
            Err(e) => tracing::warn!("Session re-list after create failed: {}", e),
        }

        let mut store = self.store();
        let mut timeline = self.timeline();
        store.select_unlisted(session.id.clone());
        timeline.reset_for(session.id.clone());
        Ok(session)
    }

    /// Delete a session
    ///
    /// If the deleted session was selected, the selection is cleared and
    /// the timeline emptied; deleting a non-selected session leaves the
    /// timeline untouched. Returns true when the selection was cleared.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the backend does not know the session.
    pub async fn remove_session(&self, id: &str) -> Result<bool> {
        self.gateway
            .delete_session(id)
            .await
            .map_err(|e| map_backend_not_found(e, &format!("session {}", id)))?;

        let cleared = {
            let mut store = self.store();
            let mut timeline = self.timeline();
            let cleared = store.remove_local(id);
            if cleared {
                timeline.clear();
            }
            cleared
        };

        match self.gateway.list_sessions().await {
            Ok(listing) => self.store().apply_listing(listing),
            Err(e) => tracing::warn!("Session re-list after delete failed: {}", e),
        }

        Ok(cleared)
    }

    fn store(&self) -> std::sync::MutexGuard<'_, SessionStore> {
        self.store.lock().expect("session store lock poisoned")
    }

    fn timeline(&self) -> std::sync::MutexGuard<'_, Timeline> {
        self.timeline.lock().expect("timeline lock poisoned")
    }
}

/// Translate a backend 404 into the client's `NotFound` category
fn map_backend_not_found(error: anyhow::Error, what: &str) -> anyhow::Error {
    match error.downcast_ref::<ChaosChatError>() {
        Some(e) if e.is_backend_not_found() => ChaosChatError::NotFound(what.to_string()).into(),
        _ => error,
    }
}

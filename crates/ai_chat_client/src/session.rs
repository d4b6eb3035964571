//! Event-driven chat session: starts requests on the tokio runtime and
//! applies their completions to [`SessionState`] one at a time.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::client::Backend;
use crate::messages::ExchangeId;
use crate::state::{Effect, Event, SessionState};

/// One chat session bound to a backend.
///
/// Requests run on spawned tasks and report back through an unbounded
/// channel; [`ChatSession::next_event`] and [`ChatSession::settle`] drain it.
pub struct ChatSession<B> {
    backend: Arc<B>,
    state: SessionState,
    events_tx: mpsc::UnboundedSender<Event>,
    events_rx: mpsc::UnboundedReceiver<Event>,
    in_flight: usize,
}

impl<B: Backend + 'static> ChatSession<B> {
    pub fn new(backend: B) -> Self {
        Self::with_backend(Arc::new(backend))
    }

    pub fn with_backend(backend: Arc<B>) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            backend,
            state: SessionState::new(),
            events_tx,
            events_rx,
            in_flight: 0,
        }
    }

    /// Create a session and immediately request history, as on page load.
    pub fn open(backend: B) -> Self {
        let mut session = Self::new(backend);
        session.fetch_history();
        session
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Number of requests whose completion has not been applied yet.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn is_idle(&self) -> bool {
        self.in_flight == 0
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.state.set_draft(text);
    }

    /// Submit the current draft. Returns `false` when nothing was sent.
    pub fn submit_question(&mut self) -> bool {
        let Some(text) = self.state.begin_submit() else {
            return false;
        };
        let backend = Arc::clone(&self.backend);
        let tx = self.events_tx.clone();
        self.in_flight += 1;
        tokio::spawn(async move {
            let result = backend.ask(&text).await;
            // The receiver lives as long as the session; a send error only
            // means the session was dropped.
            let _ = tx.send(Event::AskCompleted(result));
        });
        true
    }

    /// Request a history refresh without waiting for it.
    pub fn fetch_history(&mut self) {
        let backend = Arc::clone(&self.backend);
        let tx = self.events_tx.clone();
        self.in_flight += 1;
        tokio::spawn(async move {
            let result = backend.history().await;
            let _ = tx.send(Event::HistoryLoaded(result));
        });
    }

    pub fn toggle_expanded(&mut self, id: ExchangeId) {
        self.state.toggle_expanded(id);
    }

    /// Wait for the next completion and apply it. Returns `None` when idle.
    pub async fn next_event(&mut self) -> Option<Event> {
        if self.in_flight == 0 {
            return None;
        }
        let event = self.events_rx.recv().await?;
        self.in_flight -= 1;
        tracing::debug!(?event, "applying event");
        if self.state.apply(event.clone()) == Effect::RefreshHistory {
            self.fetch_history();
        }
        Some(event)
    }

    /// Apply completions until no request is in flight.
    pub async fn settle(&mut self) {
        while self.next_event().await.is_some() {}
    }
}

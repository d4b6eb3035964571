//! Session UI state and its transitions. Nothing here performs I/O; network
//! completions arrive as [`Event`]s and are applied one at a time.

use crate::error::ClientError;
use crate::messages::{Exchange, ExchangeId};

/// Completion of a request started by the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    AskCompleted(Result<String, ClientError>),
    HistoryLoaded(Result<Vec<Exchange>, ClientError>),
}

/// Follow-up work requested by [`SessionState::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    RefreshHistory,
}

/// In-memory view state for one chat session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    draft_input: String,
    pending_answer: Option<String>,
    is_loading: bool,
    error_message: Option<String>,
    history: Vec<Exchange>,
    history_notice: Option<String>,
    expanded_exchange_id: Option<ExchangeId>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft_input(&self) -> &str {
        &self.draft_input
    }

    pub fn pending_answer(&self) -> Option<&str> {
        self.pending_answer.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn history(&self) -> &[Exchange] {
        &self.history
    }

    /// Soft warning left by the last failed history load.
    pub fn history_notice(&self) -> Option<&str> {
        self.history_notice.as_deref()
    }

    pub fn expanded_exchange_id(&self) -> Option<&ExchangeId> {
        self.expanded_exchange_id.as_ref()
    }

    /// Response text of the expanded exchange, if it is present in history.
    pub fn expanded_response(&self) -> Option<&str> {
        let id = self.expanded_exchange_id.as_ref()?;
        self.history
            .iter()
            .find(|e| &e.id == id)
            .map(|e| e.response.as_str())
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft_input = text.into();
    }

    /// Start a submission of the current draft.
    ///
    /// Returns the text to send, or `None` when the draft is blank or a
    /// submission is already in flight. A rejected call changes nothing.
    pub fn begin_submit(&mut self) -> Option<String> {
        if self.is_loading {
            tracing::warn!("submission rejected: a question is already in flight");
            return None;
        }
        if self.draft_input.trim().is_empty() {
            return None;
        }
        self.is_loading = true;
        self.pending_answer = None;
        self.error_message = None;
        Some(self.draft_input.clone())
    }

    /// Apply a request completion.
    pub fn apply(&mut self, event: Event) -> Effect {
        match event {
            Event::AskCompleted(Ok(answer)) => {
                self.is_loading = false;
                self.pending_answer = Some(answer);
                self.draft_input.clear();
                Effect::RefreshHistory
            }
            Event::AskCompleted(Err(err)) => {
                self.is_loading = false;
                self.error_message = Some(err.user_message());
                Effect::None
            }
            Event::HistoryLoaded(Ok(history)) => {
                self.history = history;
                self.history_notice = None;
                Effect::None
            }
            Event::HistoryLoaded(Err(err)) => {
                self.history_notice = Some(format!("⚠️ Could not load history: {}", err));
                Effect::None
            }
        }
    }

    /// Expand `id`, or collapse it if it is already the expanded row.
    pub fn toggle_expanded(&mut self, id: ExchangeId) {
        if self.expanded_exchange_id.as_ref() == Some(&id) {
            self.expanded_exchange_id = None;
        } else {
            self.expanded_exchange_id = Some(id);
        }
    }
}

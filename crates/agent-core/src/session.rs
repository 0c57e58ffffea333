//! Assistant Session
//!
//! Chat widget state plus the transcript it owns.
//!
//! ```text
//!            open()               toggle_minimized()
//!   Closed ──────────▶ Expanded ◀──────────────────▶ Minimized
//!      ▲                  │                              │
//!      └──────────────────┴──────── close() ─────────────┘
//!
//!   is_loading: set by begin_submit(), cleared by complete_exchange()
//! ```
//!
//! A submission is split in two halves so the caller can release any lock
//! on the session while the provider call is in flight. At most one
//! exchange is outstanding per session; replies therefore land in the
//! order their requests were issued.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use crate::message::{Message, Transcript};

/// Prior turns sent with each request unless configured otherwise
pub const DEFAULT_HISTORY_WINDOW: usize = 10;

/// Unique session identifier
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Visibility of the chat widget
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetState {
    #[default]
    Closed,
    Expanded,
    Minimized,
}

impl WidgetState {
    pub fn is_open(self) -> bool {
        !matches!(self, WidgetState::Closed)
    }
}

/// Why a submission was suppressed
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitRejected {
    /// Input was empty after trimming
    #[error("message is empty")]
    Empty,

    /// An exchange is already in flight
    #[error("an exchange is already in flight")]
    Busy,
}

/// Request half of a submission, produced by [`AssistantSession::begin_submit`]
#[derive(Clone, Debug)]
pub struct PendingExchange {
    /// Most recent turns before the new message, oldest first
    pub prior_turns: Vec<Message>,

    /// The message just appended to the transcript
    pub user_message: Message,
}

impl PendingExchange {
    pub fn user_text(&self) -> &str {
        &self.user_message.content
    }
}

/// Result half of a submission
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExchangeOutcome {
    /// Model replied
    Replied(String),

    /// Provider failed; `notice` is shown to the user in place of a reply
    Failed { notice: String, error: String },
}

impl ExchangeOutcome {
    /// Text that becomes the assistant turn
    pub fn text(&self) -> &str {
        match self {
            ExchangeOutcome::Replied(text) => text,
            ExchangeOutcome::Failed { notice, .. } => notice,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, ExchangeOutcome::Failed { .. })
    }
}

/// One participant's chat session
#[derive(Clone, Debug, Serialize)]
pub struct AssistantSession {
    id: SessionId,
    transcript: Transcript,
    widget: WidgetState,
    is_loading: bool,
    history_window: usize,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl AssistantSession {
    /// Create a closed session with an empty transcript
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: SessionId::new(),
            transcript: Transcript::new(),
            widget: WidgetState::Closed,
            is_loading: false,
            history_window: DEFAULT_HISTORY_WINDOW,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create with a greeting as the first assistant turn
    pub fn with_greeting(greeting: impl Into<String>) -> Self {
        let mut session = Self::new();
        session.transcript.push(Message::assistant(greeting));
        session
    }

    /// Number of prior turns included in each request
    pub fn with_history_window(mut self, window: usize) -> Self {
        self.history_window = window;
        self
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn widget(&self) -> WidgetState {
        self.widget
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn history_window(&self) -> usize {
        self.history_window
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Closed → Expanded
    pub fn open(&mut self) {
        if self.widget == WidgetState::Closed {
            self.widget = WidgetState::Expanded;
            self.touch();
        }
    }

    /// Expanded ⇄ Minimized
    pub fn toggle_minimized(&mut self) {
        self.widget = match self.widget {
            WidgetState::Expanded => WidgetState::Minimized,
            WidgetState::Minimized => WidgetState::Expanded,
            WidgetState::Closed => return,
        };
        self.touch();
    }

    /// Any open state → Closed. The transcript and an in-flight exchange survive.
    pub fn close(&mut self) {
        if self.widget.is_open() {
            self.widget = WidgetState::Closed;
            self.touch();
        }
    }

    /// Validate input, append the user turn and mark the session loading.
    pub fn begin_submit(&mut self, input: &str) -> Result<PendingExchange, SubmitRejected> {
        if input.trim().is_empty() {
            return Err(SubmitRejected::Empty);
        }
        if self.is_loading {
            tracing::warn!(session = %self.id, "submission suppressed, exchange in flight");
            return Err(SubmitRejected::Busy);
        }

        let prior_turns = self.transcript.recent(self.history_window).to_vec();
        let user_message = Message::user(input);
        self.transcript.push(user_message.clone());
        self.is_loading = true;
        self.touch();

        Ok(PendingExchange {
            prior_turns,
            user_message,
        })
    }

    /// Append the assistant turn for the outstanding exchange and clear the loading flag.
    ///
    /// Returns the appended message, or `None` when nothing was in flight.
    pub fn complete_exchange(&mut self, outcome: ExchangeOutcome) -> Option<&Message> {
        if !self.is_loading {
            tracing::warn!(session = %self.id, "exchange completed with nothing in flight");
            return None;
        }

        self.transcript.push(Message::assistant(outcome.text()));
        self.is_loading = false;
        self.touch();
        self.transcript.last()
    }
}

impl Default for AssistantSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Session handle shared between request handlers
pub type SharedSession = Arc<Mutex<AssistantSession>>;

/// In-memory session registry. Nothing is persisted.
#[derive(Default)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<SessionId, SharedSession>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a session and return its handle
    pub async fn insert(&self, session: AssistantSession) -> SharedSession {
        let id = session.id().clone();
        let shared = Arc::new(Mutex::new(session));
        self.sessions.write().await.insert(id, shared.clone());
        shared
    }

    pub async fn get(&self, id: &SessionId) -> Option<SharedSession> {
        self.sessions.read().await.get(id).cloned()
    }

    /// Drop a session; returns whether it existed
    pub async fn remove(&self, id: &SessionId) -> bool {
        self.sessions.write().await.remove(id).is_some()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

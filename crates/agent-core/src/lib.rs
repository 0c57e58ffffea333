//! # agent-core
//!
//! Provider-agnostic chat assistant core.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         Assistant                            │
//! │  ┌──────────────────┐   ┌──────────────┐   ┌──────────────┐  │
//! │  │ AssistantSession │──▶│   Exchange   │──▶│ LlmProvider  │  │
//! │  │ (widget, loading,│◀──│  (fallback   │◀──│  (Strategy)  │  │
//! │  │   transcript)    │   │  on failure) │   │              │  │
//! │  └──────────────────┘   └──────────────┘   └──────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The `LlmProvider` trait allows swapping Gemini, Ollama or a test double
//! without changing session logic. Providers are injected, never global.

pub mod assistant;
pub mod error;
pub mod message;
pub mod provider;
pub mod session;

pub use assistant::{Assistant, AssistantBuilder, AssistantConfig, DEFAULT_FALLBACK_REPLY};
pub use error::{AgentError, Result};
pub use message::{Message, Role, Transcript};
pub use provider::{Completion, GenerationOptions, LlmProvider};
pub use session::{
    AssistantSession, ExchangeOutcome, MemorySessionStore, PendingExchange, SessionId,
    SharedSession, SubmitRejected, WidgetState,
};

//! # agent-runtime
//!
//! Model providers for the plan assistant.
//!
//! ## Providers
//!
//! - **Gemini** (default): hosted inference via the `generateContent` API
//! - **Ollama** (feature `ollama`): local inference
//!
//! ## Usage
//!
//! ```rust,ignore
//! use agent_runtime::GeminiProvider;
//!
//! let provider = GeminiProvider::from_env()?;
//! let assistant = AssistantBuilder::new()
//!     .provider(Arc::new(provider))
//!     .build()?;
//! ```

pub mod gemini;

#[cfg(feature = "ollama")]
pub mod ollama;

pub use gemini::{GeminiConfig, GeminiProvider};

#[cfg(feature = "ollama")]
pub use ollama::{OllamaConfig, OllamaProvider};

// Re-export core types for convenience
pub use agent_core::{AgentError, LlmProvider, Message, Result, Role};

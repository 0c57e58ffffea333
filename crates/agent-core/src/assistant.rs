//! Assistant Exchange
//!
//! Turns a pending submission into one provider request and converts the
//! answer, or any failure, into an [`ExchangeOutcome`].

use std::sync::Arc;

use crate::error::{AgentError, Result};
use crate::message::Message;
use crate::provider::{GenerationOptions, LlmProvider};
use crate::session::{
    AssistantSession, DEFAULT_HISTORY_WINDOW, ExchangeOutcome, PendingExchange, SubmitRejected,
};

/// Shown in place of a reply when the provider fails
pub const DEFAULT_FALLBACK_REPLY: &str =
    "I'm currently experiencing high traffic. Please try asking your question again in a moment.";

/// Assistant configuration
#[derive(Clone, Debug)]
pub struct AssistantConfig {
    /// System instruction (persona, constraints, account context)
    pub system_prompt: String,

    /// Prior turns sent with each request
    pub history_window: usize,

    /// Generation options
    pub generation: GenerationOptions,

    /// Assistant turn appended when the provider fails
    pub fallback_reply: String,

    /// First assistant turn of every new session
    pub greeting: Option<String>,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            system_prompt: "You are a helpful, professional assistant.".into(),
            history_window: DEFAULT_HISTORY_WINDOW,
            generation: GenerationOptions::default(),
            fallback_reply: DEFAULT_FALLBACK_REPLY.into(),
            greeting: None,
        }
    }
}

/// Stateless exchange service; sessions are owned by the caller
pub struct Assistant {
    provider: Arc<dyn LlmProvider>,
    config: AssistantConfig,
}

impl Assistant {
    pub fn new(provider: Arc<dyn LlmProvider>, config: AssistantConfig) -> Self {
        Self { provider, config }
    }

    /// Create with default configuration
    pub fn with_defaults(provider: Arc<dyn LlmProvider>) -> Self {
        Self::new(provider, AssistantConfig::default())
    }

    /// Start a session configured for this assistant
    pub fn new_session(&self) -> AssistantSession {
        let session = match &self.config.greeting {
            Some(greeting) => AssistantSession::with_greeting(greeting.clone()),
            None => AssistantSession::new(),
        };
        session.with_history_window(self.config.history_window)
    }

    /// Options for this request, carrying the system instruction
    fn request_options(&self) -> GenerationOptions {
        GenerationOptions {
            system_prompt: Some(self.config.system_prompt.clone()),
            ..self.config.generation.clone()
        }
    }

    /// Perform one provider round-trip. Never fails: provider errors become
    /// [`ExchangeOutcome::Failed`] carrying the fallback reply.
    pub async fn exchange(&self, pending: &PendingExchange) -> ExchangeOutcome {
        let mut messages: Vec<Message> = pending.prior_turns.clone();
        messages.push(pending.user_message.clone());

        tracing::debug!(
            provider = self.provider.name(),
            prior_turns = pending.prior_turns.len(),
            "sending exchange"
        );

        match self.complete(&messages).await {
            Ok(reply) => ExchangeOutcome::Replied(reply),
            Err(e) => {
                tracing::error!(
                    provider = self.provider.name(),
                    retryable = e.is_retryable(),
                    error = %e,
                    "exchange failed"
                );
                ExchangeOutcome::Failed {
                    notice: self.config.fallback_reply.clone(),
                    error: e.to_string(),
                }
            }
        }
    }

    async fn complete(&self, messages: &[Message]) -> Result<String> {
        let completion = self.provider.complete(messages, &self.request_options()).await?;
        if completion.content.trim().is_empty() {
            return Err(AgentError::Provider("empty reply".into()));
        }
        Ok(completion.content)
    }

    /// Submit input on a session the caller owns exclusively.
    ///
    /// Returns the assistant turn's text, or the reason the input was
    /// suppressed.
    pub async fn submit(
        &self,
        session: &mut AssistantSession,
        input: &str,
    ) -> std::result::Result<String, SubmitRejected> {
        let pending = session.begin_submit(input)?;
        let outcome = self.exchange(&pending).await;
        let text = outcome.text().to_string();
        session.complete_exchange(outcome);
        Ok(text)
    }

    pub fn provider(&self) -> &Arc<dyn LlmProvider> {
        &self.provider
    }

    pub fn config(&self) -> &AssistantConfig {
        &self.config
    }
}

/// Builder for [`Assistant`]
pub struct AssistantBuilder {
    provider: Option<Arc<dyn LlmProvider>>,
    config: AssistantConfig,
}

impl Default for AssistantBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AssistantBuilder {
    pub fn new() -> Self {
        Self {
            provider: None,
            config: AssistantConfig::default(),
        }
    }

    pub fn provider(mut self, provider: Arc<dyn LlmProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn config(mut self, config: AssistantConfig) -> Self {
        self.config = config;
        self
    }

    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.config.system_prompt = prompt.into();
        self
    }

    pub fn greeting(mut self, greeting: impl Into<String>) -> Self {
        self.config.greeting = Some(greeting.into());
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.generation.model = model.into();
        self
    }

    pub fn temperature(mut self, temp: f32) -> Self {
        self.config.generation.temperature = temp;
        self
    }

    pub fn history_window(mut self, window: usize) -> Self {
        self.config.history_window = window;
        self
    }

    pub fn build(self) -> Result<Assistant> {
        let provider = self.provider
            .ok_or_else(|| AgentError::Config("Provider is required".into()))?;

        Ok(Assistant::new(provider, self.config))
    }
}

//! Ollama LLM Provider
//!
//! Local-inference alternative to the hosted Gemini backend.

use agent_core::{
    error::{AgentError, Result},
    message::{Message, Role},
    provider::{Completion, FinishReason, GenerationOptions, LlmProvider, TokenUsage},
};
use async_trait::async_trait;
use ollama_rs::{
    generation::{
        chat::{ChatMessage, ChatMessageResponse, MessageRole, request::ChatMessageRequest},
    },
    models::ModelOptions as OllamaOptions,
    Ollama,
};

/// Ollama provider configuration
#[derive(Clone, Debug)]
pub struct OllamaConfig {
    /// Ollama host URL
    pub host: String,

    /// Ollama port
    pub port: u16,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            host: "http://localhost".into(),
            port: 11434,
        }
    }
}

impl OllamaConfig {
    pub fn from_env() -> Self {
        let host = std::env::var("OLLAMA_HOST")
            .unwrap_or_else(|_| "http://localhost".into());
        let port = std::env::var("OLLAMA_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(11434);

        Self { host, port }
    }
}

/// Ollama provider
pub struct OllamaProvider {
    client: Ollama,
}

impl OllamaProvider {
    /// Create from configuration
    pub fn from_config(config: &OllamaConfig) -> Self {
        Self {
            client: Ollama::new(&config.host, config.port),
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_config(&OllamaConfig::from_env())
    }

    /// Prepend the system instruction and map roles
    fn convert_messages(messages: &[Message], options: &GenerationOptions) -> Vec<ChatMessage> {
        let system = options
            .system_prompt
            .iter()
            .map(|prompt| ChatMessage::new(MessageRole::System, prompt.clone()));

        let turns = messages.iter().map(|m| {
            let role = match m.role {
                Role::System => MessageRole::System,
                Role::User => MessageRole::User,
                Role::Assistant => MessageRole::Assistant,
            };
            ChatMessage::new(role, m.content.clone())
        });

        system.chain(turns).collect()
    }

    fn convert_completion(response: ChatMessageResponse, model: &str) -> Completion {
        Completion {
            content: response.message.content,
            model: model.to_string(),
            usage: response.final_data.as_ref().map(|d| TokenUsage {
                prompt_tokens: d.prompt_eval_count as u32,
                completion_tokens: d.eval_count as u32,
                total_tokens: (d.prompt_eval_count + d.eval_count) as u32,
            }),
            finish_reason: Some(FinishReason::Stop),
        }
    }

    fn build_options(opts: &GenerationOptions) -> OllamaOptions {
        OllamaOptions::default()
            .temperature(opts.temperature)
            .top_p(opts.top_p)
            .num_predict(opts.max_tokens as i32)
    }
}

#[async_trait]
impl LlmProvider for OllamaProvider {
    fn name(&self) -> &str {
        "Ollama"
    }

    async fn health_check(&self) -> Result<bool> {
        match self.client.list_local_models().await {
            Ok(_) => Ok(true),
            Err(e) => {
                tracing::warn!("Ollama health check failed: {}", e);
                Ok(false)
            }
        }
    }

    async fn complete(
        &self,
        messages: &[Message],
        options: &GenerationOptions,
    ) -> Result<Completion> {
        let request = ChatMessageRequest::new(
            options.model.clone(),
            Self::convert_messages(messages, options),
        ).options(Self::build_options(options));

        let response = self.client
            .send_chat_messages(request)
            .await
            .map_err(|e| AgentError::ProviderUnavailable(e.to_string()))?;

        Ok(Self::convert_completion(response, &options.model))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = OllamaConfig::default();
        assert_eq!(config.host, "http://localhost");
        assert_eq!(config.port, 11434);
    }

    #[test]
    fn test_system_prompt_leads() {
        let messages = vec![Message::assistant("Hello!"), Message::user("Hi")];
        let options = GenerationOptions {
            system_prompt: Some("Be brief.".into()),
            ..Default::default()
        };

        let converted = OllamaProvider::convert_messages(&messages, &options);
        assert_eq!(converted.len(), 3);
        assert_eq!(converted[0].content, "Be brief.");
    }
}

//! Google Gemini Provider
//!
//! Implementation of `LlmProvider` against the hosted `generateContent` API.

use std::time::Duration;

use agent_core::{
    error::{AgentError, Result},
    message::{Message, Role},
    provider::{Completion, FinishReason, GenerationOptions, LlmProvider, TokenUsage},
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Gemini provider configuration
#[derive(Clone, Debug)]
pub struct GeminiConfig {
    /// API credential
    pub api_key: String,

    /// API root, without trailing slash
    pub base_url: String,

    /// Whole-request timeout in seconds
    pub timeout_secs: u64,
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.into(),
            timeout_secs: 60,
        }
    }

    /// Read `GEMINI_API_KEY` (or `API_KEY`), `GEMINI_BASE_URL` and `GEMINI_TIMEOUT_SECS`
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .or_else(|_| std::env::var("API_KEY"))
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| AgentError::Config("GEMINI_API_KEY is not set".into()))?;

        let mut config = Self::new(api_key);
        if let Ok(url) = std::env::var("GEMINI_BASE_URL") {
            config.base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(secs) = std::env::var("GEMINI_TIMEOUT_SECS").ok().and_then(|s| s.parse().ok()) {
            config.timeout_secs = secs;
        }
        Ok(config)
    }
}

// Wire types (camelCase JSON)

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_p: f32,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
    #[serde(default)]
    total_token_count: u32,
}

/// Gemini provider
pub struct GeminiProvider {
    client: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiProvider {
    /// Create from configuration
    pub fn from_config(config: GeminiConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AgentError::Config(format!("HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_config(GeminiConfig::from_env()?)
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.config.base_url, model)
    }

    /// Build the request body. Stray system turns are folded into the instruction.
    fn build_request(messages: &[Message], options: &GenerationOptions) -> GenerateContentRequest {
        let mut instruction: Vec<&str> = options.system_prompt.iter().map(String::as_str).collect();
        let mut contents = Vec::with_capacity(messages.len());

        for m in messages {
            let role = match m.role {
                Role::System => {
                    instruction.push(&m.content);
                    continue;
                }
                Role::User => "user",
                Role::Assistant => "model",
            };
            contents.push(Content {
                role: Some(role.into()),
                parts: vec![Part { text: Some(m.content.clone()) }],
            });
        }

        let system_instruction = (!instruction.is_empty()).then(|| Content {
            role: None,
            parts: vec![Part { text: Some(instruction.join("\n\n")) }],
        });

        GenerateContentRequest {
            system_instruction,
            contents,
            generation_config: GenerationConfig {
                temperature: options.temperature,
                top_p: options.top_p,
                max_output_tokens: options.max_tokens,
            },
        }
    }

    /// Convert the first candidate into a completion
    fn convert_response(response: GenerateContentResponse, model: &str) -> Result<Completion> {
        let candidate = response
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| AgentError::Provider("response contained no candidates".into()))?;

        let content = candidate
            .content
            .map(|c| {
                c.parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<String>()
            })
            .unwrap_or_default();

        let finish_reason = candidate.finish_reason.as_deref().map(|r| match r {
            "STOP" => FinishReason::Stop,
            "MAX_TOKENS" => FinishReason::Length,
            "SAFETY" | "RECITATION" | "BLOCKLIST" | "PROHIBITED_CONTENT" => FinishReason::ContentFilter,
            _ => FinishReason::Other,
        });

        Ok(Completion {
            content,
            model: model.to_string(),
            usage: response.usage_metadata.map(|u| TokenUsage {
                prompt_tokens: u.prompt_token_count,
                completion_tokens: u.candidates_token_count,
                total_tokens: u.total_token_count,
            }),
            finish_reason,
        })
    }
}

/// Map a non-success HTTP status to an error
fn status_error(status: u16, body: &str) -> AgentError {
    let detail: String = body.chars().take(200).collect();
    match status {
        401 | 403 => AgentError::Auth(format!("Gemini rejected the API key (HTTP {})", status)),
        429 => AgentError::RateLimited(detail),
        500..=599 => AgentError::ProviderUnavailable(format!("HTTP {}", status)),
        _ => AgentError::Provider(format!("HTTP {}: {}", status, detail)),
    }
}

fn transport_error(e: &reqwest::Error) -> AgentError {
    if e.is_timeout() {
        AgentError::ProviderUnavailable("request timed out".into())
    } else if e.is_connect() {
        AgentError::ProviderUnavailable(format!("connection failed: {}", e))
    } else {
        AgentError::Provider(e.to_string())
    }
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    fn name(&self) -> &str {
        "Gemini"
    }

    async fn health_check(&self) -> Result<bool> {
        let url = format!("{}/v1beta/models?pageSize=1", self.config.base_url);
        match self.client.get(url).header("x-goog-api-key", &self.config.api_key).send().await {
            Ok(resp) => Ok(resp.status().is_success()),
            Err(e) => {
                tracing::warn!("Gemini health check failed: {}", e);
                Ok(false)
            }
        }
    }

    async fn complete(
        &self,
        messages: &[Message],
        options: &GenerationOptions,
    ) -> Result<Completion> {
        let request = Self::build_request(messages, options);

        let response = self.client
            .post(self.endpoint(&options.model))
            .header("x-goog-api-key", &self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| transport_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status.as_u16(), &body));
        }

        let data: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| AgentError::Provider(format!("invalid response body: {}", e)))?;

        Self::convert_response(data, &options.model)
    }
}

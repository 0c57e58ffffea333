//! Error Types

use thiserror::Error;

/// Result type alias for assistant operations
pub type Result<T> = std::result::Result<T, AgentError>;

/// Assistant error types
#[derive(Error, Debug)]
pub enum AgentError {
    /// Model provider returned an error
    #[error("Provider error: {0}")]
    Provider(String),

    /// Provider unavailable, timed out or not responding
    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// Rate limited by the provider
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// Credential rejected
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AgentError {
    /// Check if error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AgentError::ProviderUnavailable(_) | AgentError::RateLimited(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable() {
        assert!(AgentError::RateLimited("slow down".into()).is_retryable());
        assert!(AgentError::ProviderUnavailable("timeout".into()).is_retryable());
        assert!(!AgentError::Auth("bad key".into()).is_retryable());
    }
}

//! Server Configuration
//!
//! Read from the environment after `.env` has been loaded.

use std::str::FromStr;

use agent_core::provider::DEFAULT_MODEL;
use agent_core::session::DEFAULT_HISTORY_WINDOW;
use plan_advisor::VestingPolicy;
use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid {var}={value}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },

    #[error("Unknown LLM_PROVIDER: {0}")]
    UnknownProvider(String),
}

/// Model backend selected by `LLM_PROVIDER`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProviderKind {
    Gemini,
    #[cfg(feature = "ollama")]
    Ollama,
}

impl FromStr for ProviderKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gemini" => Ok(ProviderKind::Gemini),
            #[cfg(feature = "ollama")]
            "ollama" => Ok(ProviderKind::Ollama),
            other => Err(ConfigError::UnknownProvider(other.to_string())),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub static_dir: String,
    pub provider: ProviderKind,
    pub model: String,
    pub history_window: usize,
    pub vesting: VestingPolicy,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset or blank keys take their defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let provider = match get("LLM_PROVIDER") {
            Some(name) => name.parse()?,
            None => ProviderKind::Gemini,
        };

        let model = match provider {
            ProviderKind::Gemini => get("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.into()),
            #[cfg(feature = "ollama")]
            ProviderKind::Ollama => get("OLLAMA_MODEL").unwrap_or_else(|| "llama3.2".into()),
        };

        let history_window = match get("ASSISTANT_HISTORY_WINDOW") {
            Some(raw) => raw.trim().parse().map_err(|e: std::num::ParseIntError| {
                ConfigError::Invalid {
                    var: "ASSISTANT_HISTORY_WINDOW",
                    value: raw.clone(),
                    reason: e.to_string(),
                }
            })?,
            None => DEFAULT_HISTORY_WINDOW,
        };

        let vesting = match get("VESTING_FACTOR") {
            Some(raw) => parse_vesting(&raw)?,
            None => VestingPolicy::default(),
        };

        Ok(Self {
            bind_addr: get("BIND_ADDR").unwrap_or_else(|| "0.0.0.0:3000".into()),
            static_dir: get("STATIC_DIR").unwrap_or_else(|| "static".into()),
            provider,
            model,
            history_window,
            vesting,
        })
    }
}

fn parse_vesting(raw: &str) -> Result<VestingPolicy, ConfigError> {
    let invalid = |reason: String| ConfigError::Invalid {
        var: "VESTING_FACTOR",
        value: raw.to_string(),
        reason,
    };

    let factor = Decimal::from_str(raw.trim()).map_err(|e| invalid(e.to_string()))?;
    VestingPolicy::new(factor).map_err(|e| invalid(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0:3000");
        assert_eq!(config.static_dir, "static");
        assert_eq!(config.provider, ProviderKind::Gemini);
        assert_eq!(config.model, "gemini-2.5-flash");
        assert_eq!(config.history_window, 10);
        assert_eq!(config.vesting, VestingPolicy::default());
    }

    #[test]
    fn test_overrides() {
        let config = config(&[
            ("GEMINI_MODEL", "gemini-2.5-pro"),
            ("ASSISTANT_HISTORY_WINDOW", "4"),
            ("VESTING_FACTOR", "0.8"),
            ("BIND_ADDR", "127.0.0.1:8080"),
        ])
        .unwrap();

        assert_eq!(config.model, "gemini-2.5-pro");
        assert_eq!(config.history_window, 4);
        assert_eq!(config.vesting.factor().to_string(), "0.8");
        assert_eq!(config.bind_addr, "127.0.0.1:8080");
    }

    #[test]
    fn test_blank_values_use_defaults() {
        let config = config(&[("GEMINI_MODEL", "  "), ("VESTING_FACTOR", "")]).unwrap();
        assert_eq!(config.model, "gemini-2.5-flash");
        assert_eq!(config.vesting, VestingPolicy::default());
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            config(&[("VESTING_FACTOR", "1.5")]),
            Err(ConfigError::Invalid { var: "VESTING_FACTOR", .. })
        ));
        assert!(matches!(
            config(&[("VESTING_FACTOR", "lots")]),
            Err(ConfigError::Invalid { var: "VESTING_FACTOR", .. })
        ));
        assert!(matches!(
            config(&[("ASSISTANT_HISTORY_WINDOW", "-1")]),
            Err(ConfigError::Invalid { var: "ASSISTANT_HISTORY_WINDOW", .. })
        ));
        assert!(matches!(
            config(&[("LLM_PROVIDER", "openai")]),
            Err(ConfigError::UnknownProvider(_))
        ));
    }
}

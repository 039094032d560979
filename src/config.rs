//! Environment configuration

use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

use crate::llm::{ClaudeModel, GenerationConfig};
use crate::workflow::WorkflowSettings;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Everything the server needs at startup
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub project_id: String,
    pub location: String,
    /// Static bearer token; Application Default Credentials are used when unset
    pub access_token: Option<String>,
    pub model: ClaudeModel,
    pub bind_addr: SocketAddr,
    pub llm_timeout: Duration,
    pub max_tokens: u32,
    pub temperature: f32,
    pub history_window: usize,
}

impl AppConfig {
    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let project_id = get("GCP_PROJECT_ID").ok_or(ConfigError::Missing("GCP_PROJECT_ID"))?;

        Ok(Self {
            project_id,
            location: get("GCP_LOCATION").unwrap_or_else(|| "us-central1".to_string()),
            access_token: get("VERTEX_ACCESS_TOKEN"),
            model: parse_or("PYASSIST_MODEL", get("PYASSIST_MODEL"), ClaudeModel::Haiku45)?,
            bind_addr: parse_or(
                "PYASSIST_BIND_ADDR",
                get("PYASSIST_BIND_ADDR"),
                SocketAddr::from(([127, 0, 0, 1], 8000)),
            )?,
            llm_timeout: Duration::from_secs(parse_or(
                "PYASSIST_LLM_TIMEOUT_SECS",
                get("PYASSIST_LLM_TIMEOUT_SECS"),
                60u64,
            )?),
            max_tokens: parse_or("PYASSIST_MAX_TOKENS", get("PYASSIST_MAX_TOKENS"), 500u32)?,
            temperature: parse_or("PYASSIST_TEMPERATURE", get("PYASSIST_TEMPERATURE"), 0.3f32)?,
            history_window: parse_or(
                "PYASSIST_HISTORY_WINDOW",
                get("PYASSIST_HISTORY_WINDOW"),
                6usize,
            )?,
        })
    }

    pub fn workflow_settings(&self) -> WorkflowSettings {
        WorkflowSettings {
            history_window: self.history_window,
            llm_timeout: self.llm_timeout,
            generation: GenerationConfig::new(self.max_tokens).with_temperature(self.temperature),
        }
    }
}

fn parse_or<T>(name: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            name,
            reason: e.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[("GCP_PROJECT_ID", "my-project")]).unwrap();
        assert_eq!(config.project_id, "my-project");
        assert_eq!(config.location, "us-central1");
        assert!(config.access_token.is_none());
        assert_eq!(config.model, ClaudeModel::Haiku45);
        assert_eq!(config.bind_addr, "127.0.0.1:8000".parse().unwrap());
        assert_eq!(config.llm_timeout, Duration::from_secs(60));
        assert_eq!(config.max_tokens, 500);
        assert_eq!(config.temperature, 0.3);
        assert_eq!(config.history_window, 6);
    }

    #[test]
    fn test_missing_project_fails() {
        let err = config_from(&[]).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("GCP_PROJECT_ID")));

        let err = config_from(&[("GCP_PROJECT_ID", "  ")]).unwrap_err();
        assert!(matches!(err, ConfigError::Missing(_)));
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("GCP_PROJECT_ID", "p"),
            ("GCP_LOCATION", "europe-west1"),
            ("VERTEX_ACCESS_TOKEN", "ya29.abc"),
            ("PYASSIST_MODEL", "sonnet-4.5"),
            ("PYASSIST_BIND_ADDR", "0.0.0.0:9000"),
            ("PYASSIST_LLM_TIMEOUT_SECS", "15"),
            ("PYASSIST_MAX_TOKENS", "800"),
            ("PYASSIST_TEMPERATURE", "0.7"),
            ("PYASSIST_HISTORY_WINDOW", "10"),
        ])
        .unwrap();

        assert_eq!(config.location, "europe-west1");
        assert_eq!(config.access_token.as_deref(), Some("ya29.abc"));
        assert_eq!(config.model, ClaudeModel::Sonnet45);
        assert_eq!(config.bind_addr.port(), 9000);
        assert_eq!(config.llm_timeout, Duration::from_secs(15));

        let settings = config.workflow_settings();
        assert_eq!(settings.history_window, 10);
        assert_eq!(settings.generation.max_tokens, 800);
        assert_eq!(settings.generation.temperature, Some(0.7));
    }

    #[test]
    fn test_invalid_values_are_reported_by_name() {
        let err = config_from(&[("GCP_PROJECT_ID", "p"), ("PYASSIST_MAX_TOKENS", "lots")])
            .unwrap_err();
        assert!(err.to_string().contains("PYASSIST_MAX_TOKENS"));

        let err = config_from(&[("GCP_PROJECT_ID", "p"), ("PYASSIST_MODEL", "gpt-4o-mini")])
            .unwrap_err();
        assert!(err.to_string().contains("unknown model"));
    }
}

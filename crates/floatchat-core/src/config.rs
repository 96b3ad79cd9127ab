use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{FloatChatError, Result};

/// Placeholder value shipped in default configs. A key equal to this string
/// counts as not configured and disables the completion relay.
pub const API_KEY_PLACEHOLDER: &str = "your_groq_api_key_here";

/// Top-level configuration for the FloatChat application.
///
/// Loaded from `~/.floatchat/config.toml` by default. Each section
/// corresponds to a bounded context or cross-cutting concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FloatChatConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

impl Default for FloatChatConfig {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            llm: LlmConfig::default(),
            chat: ChatConfig::default(),
            auth: AuthConfig::default(),
        }
    }
}

impl FloatChatConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: FloatChatConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| FloatChatError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }

    /// Apply environment overrides on top of the loaded file.
    ///
    /// `GROQ_API_KEY` replaces `[llm].api_key`; `FLOATCHAT_PORT` replaces
    /// `[general].port` when it parses as a valid port number.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var("GROQ_API_KEY") {
            if !key.trim().is_empty() {
                self.llm.api_key = key.trim().to_string();
            }
        }
        if let Ok(port) = std::env::var("FLOATCHAT_PORT") {
            match port.parse::<u16>() {
                Ok(p) => self.general.port = p,
                Err(_) => warn!(value = %port, "Ignoring invalid FLOATCHAT_PORT"),
            }
        }
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
    /// Port the API server listens on (localhost only).
    pub port: u16,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            port: 3030,
        }
    }
}

/// Hosted completion endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Bearer key for the hosted completion endpoint.
    pub api_key: String,
    /// Model identifier sent with every completion request.
    pub model: String,
    /// Completion endpoint URL.
    pub endpoint: String,
    /// Sampling temperature.
    pub temperature: f64,
    /// Maximum completion tokens.
    pub max_tokens: u32,
    /// Request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: API_KEY_PLACEHOLDER.to_string(),
            model: "llama-3.3-70b-versatile".to_string(),
            endpoint: "https://api.groq.com/openai/v1/chat/completions".to_string(),
            temperature: 0.7,
            max_tokens: 1024,
            request_timeout_secs: 30,
        }
    }
}

impl LlmConfig {
    /// Whether a usable API key is present (non-empty and not the placeholder).
    pub fn is_key_configured(&self) -> bool {
        !self.api_key.trim().is_empty() && self.api_key != API_KEY_PLACEHOLDER
    }
}

/// Conversation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Maximum user message length in characters.
    pub max_message_length: usize,
    /// Whether the fixed domain system prompt is prepended to every relay call.
    pub system_prompt_enabled: bool,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            max_message_length: 2000,
            system_prompt_enabled: true,
        }
    }
}

/// Hosted identity provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// When false, chat routes are served without authentication.
    pub enabled: bool,
    /// Base URL of the hosted identity project.
    pub project_url: String,
    /// Public (anon) API key for the hosted identity project.
    pub anon_key: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            project_url: String::new(),
            anon_key: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FloatChatConfig::default();
        assert_eq!(config.general.port, 3030);
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.llm.api_key, API_KEY_PLACEHOLDER);
        assert_eq!(config.llm.model, "llama-3.3-70b-versatile");
        assert_eq!(config.llm.temperature, 0.7);
        assert_eq!(config.llm.max_tokens, 1024);
        assert_eq!(config.chat.max_message_length, 2000);
        assert!(!config.auth.enabled);
    }

    #[test]
    fn test_default_key_is_not_configured() {
        let config = FloatChatConfig::default();
        assert!(!config.llm.is_key_configured());
    }

    #[test]
    fn test_placeholder_key_is_not_configured() {
        let llm = LlmConfig {
            api_key: API_KEY_PLACEHOLDER.to_string(),
            ..LlmConfig::default()
        };
        assert!(!llm.is_key_configured());
    }

    #[test]
    fn test_empty_key_is_not_configured() {
        let llm = LlmConfig {
            api_key: "   ".to_string(),
            ..LlmConfig::default()
        };
        assert!(!llm.is_key_configured());
    }

    #[test]
    fn test_real_key_is_configured() {
        let llm = LlmConfig {
            api_key: "gsk_test_key".to_string(),
            ..LlmConfig::default()
        };
        assert!(llm.is_key_configured());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = FloatChatConfig::default();
        config.general.port = 4040;
        config.llm.api_key = "gsk_roundtrip".to_string();
        config.auth.enabled = true;
        config.save(&path).unwrap();

        let loaded = FloatChatConfig::load(&path).unwrap();
        assert_eq!(loaded.general.port, 4040);
        assert_eq!(loaded.llm.api_key, "gsk_roundtrip");
        assert!(loaded.auth.enabled);
    }

    #[test]
    fn test_load_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        assert!(FloatChatConfig::load(&path).is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        let config = FloatChatConfig::load_or_default(&path);
        assert_eq!(config.general.port, 3030);
    }

    #[test]
    fn test_load_or_default_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "this is not [ valid toml").unwrap();
        let config = FloatChatConfig::load_or_default(&path);
        assert_eq!(config.llm.api_key, API_KEY_PLACEHOLDER);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.toml");
        std::fs::write(&path, "[general]\nport = 8080\n").unwrap();
        let config = FloatChatConfig::load(&path).unwrap();
        assert_eq!(config.general.port, 8080);
        // Unspecified sections fall back to defaults.
        assert_eq!(config.llm.max_tokens, 1024);
        assert_eq!(config.chat.max_message_length, 2000);
    }

    #[test]
    fn test_partial_section_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.toml");
        std::fs::write(&path, "[llm]\napi_key = \"gsk_abc\"\n").unwrap();
        let config = FloatChatConfig::load(&path).unwrap();
        assert_eq!(config.llm.api_key, "gsk_abc");
        assert_eq!(config.llm.model, "llama-3.3-70b-versatile");
        assert_eq!(config.llm.temperature, 0.7);
    }
}

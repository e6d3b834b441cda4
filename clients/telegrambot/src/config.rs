use std::fmt;

use serde::Deserialize;

use crate::TelegramError;

/// Public Bot API endpoint.
pub const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// Configuration for TelegramBot
#[derive(Clone, Deserialize)]
pub struct TelegramBotConfig {
    /// Bot token issued by @BotFather
    pub api_key: String,
    /// Base URL for API endpoints, without a trailing slash
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    TELEGRAM_API_BASE.to_string()
}

impl TelegramBotConfig {
    /// Creates a config that talks to the public endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: default_base_url(),
        }
    }

    /// Points the client at another Bot API server (local server, mock).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Reads `TELEGRAM_BOT_TOKEN` and the optional `TELEGRAM_API_URL`.
    pub fn from_env() -> Result<Self, TelegramError> {
        let api_key = std::env::var("TELEGRAM_BOT_TOKEN")
            .map_err(|_| TelegramError::MissingEnv("TELEGRAM_BOT_TOKEN"))?;
        let config = Self::new(api_key);
        Ok(match std::env::var("TELEGRAM_API_URL") {
            Ok(base_url) if !base_url.trim().is_empty() => config.with_base_url(base_url.trim()),
            _ => config,
        })
    }
}

// The token is a credential; keep it out of logs.
impl fmt::Debug for TelegramBotConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramBotConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_uses_public_endpoint() {
        let config = TelegramBotConfig::new("123:abc");
        assert_eq!(config.base_url, TELEGRAM_API_BASE);
        assert_eq!(config.api_key, "123:abc");
    }

    #[test]
    fn base_url_loses_trailing_slash() {
        let config = TelegramBotConfig::new("t").with_base_url("http://127.0.0.1:8081/");
        assert_eq!(config.base_url, "http://127.0.0.1:8081");
    }

    #[test]
    fn deserialize_defaults_base_url() {
        let config: TelegramBotConfig = serde_json::from_str(r#"{"api_key":"t"}"#).unwrap();
        assert_eq!(config.base_url, TELEGRAM_API_BASE);
    }

    #[test]
    fn debug_hides_token() {
        let rendered = format!("{:?}", TelegramBotConfig::new("secret-token"));
        assert!(!rendered.contains("secret-token"));
    }
}

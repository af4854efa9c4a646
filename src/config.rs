use crate::core::error::SwaboxError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

pub const DEFAULT_PLUGINS_DIR: &str = "plugins";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Anthropic,
    OpenAI,
}

impl Provider {
    pub const ALL: [Provider; 2] = [Provider::Anthropic, Provider::OpenAI];

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "anthropic" => Some(Provider::Anthropic),
            "openai" => Some(Provider::OpenAI),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Anthropic => "anthropic",
            Provider::OpenAI => "openai",
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            Provider::Anthropic => "https://api.anthropic.com/v1",
            Provider::OpenAI => "https://api.openai.com/v1",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            Provider::Anthropic => "claude-3-haiku-20240307",
            Provider::OpenAI => "gpt-3.5-turbo",
        }
    }

    pub fn api_key_env(&self) -> &'static str {
        match self {
            Provider::Anthropic => "ANTHROPIC_API_KEY",
            Provider::OpenAI => "OPENAI_API_KEY",
        }
    }

    /// Comma separated list for usage messages.
    pub fn supported_names() -> String {
        Self::ALL
            .iter()
            .map(|p| p.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Default for Provider {
    fn default() -> Self {
        Provider::Anthropic
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The `ai_config` block. `provider` stays a plain string so that a misspelt
/// name survives loading and is reported when the provider is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    pub provider: String,
    pub model: Option<String>,
    pub api_key: Option<String>,
    /// Per-provider API base URL overrides, e.g. `{"openai": "http://localhost:8080/v1"}`.
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub base_urls: HashMap<Provider, String>,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            provider: Provider::default().as_str().to_string(),
            model: Some(Provider::default().default_model().to_string()),
            api_key: None,
            base_urls: HashMap::new(),
        }
    }
}

impl AiConfig {
    pub fn for_provider(provider: Provider) -> Self {
        Self {
            provider: provider.as_str().to_string(),
            model: None,
            api_key: None,
            base_urls: HashMap::new(),
        }
    }

    /// Explicit key first, then the provider's environment variable.
    pub fn resolve_api_key(&self, provider: Provider) -> Option<String> {
        self.api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| std::env::var(provider.api_key_env()).ok())
            .filter(|key| !key.trim().is_empty())
    }

    /// Configured base URL for `provider`, if any.
    pub fn base_url_for(&self, provider: Provider) -> Option<&str> {
        self.base_urls
            .get(&provider)
            .map(String::as_str)
            .filter(|url| !url.trim().is_empty())
    }

    pub fn resolve_model(&self, provider: Provider) -> String {
        self.model
            .clone()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| provider.default_model().to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub ai_enabled: bool,
    pub ai_config: AiConfig,
    pub history_size: usize,
    pub prompt_style: String,
    pub plugins_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plugins_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ai_enabled: false,
            ai_config: AiConfig::default(),
            history_size: 100,
            prompt_style: "default".to_string(),
            plugins_enabled: true,
            plugins_dir: None,
        }
    }
}

impl Config {
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".swabox")
    }

    pub fn default_path() -> PathBuf {
        Self::config_dir().join("config.json")
    }

    /// `plugins/`, relative to the directory the shell was started from.
    pub fn default_plugins_dir() -> PathBuf {
        PathBuf::from(DEFAULT_PLUGINS_DIR)
    }

    pub fn input_history_path() -> PathBuf {
        Self::config_dir().join("input_history.txt")
    }

    pub fn plugins_dir(&self) -> PathBuf {
        self.plugins_dir
            .clone()
            .unwrap_or_else(Self::default_plugins_dir)
    }

    /// Loads the config at `path`.
    ///
    /// A missing file is created with the defaults. A malformed file is
    /// reported and replaced by the defaults in memory only.
    pub fn load(path: &Path) -> Config {
        if path.exists() {
            return match fs::read_to_string(path) {
                Ok(contents) => match serde_json::from_str::<Config>(&contents) {
                    Ok(config) => config,
                    Err(e) => {
                        warn!(
                            "Malformed config {}: {}; using defaults",
                            path.display(),
                            e
                        );
                        Config::default()
                    }
                },
                Err(e) => {
                    warn!("Cannot read config {}: {}; using defaults", path.display(), e);
                    Config::default()
                }
            };
        }

        let config = Config::default();
        if let Err(e) = config.save(path) {
            warn!("Could not create default config {}: {}", path.display(), e);
        }
        config
    }

    pub fn save(&self, path: &Path) -> Result<(), SwaboxError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

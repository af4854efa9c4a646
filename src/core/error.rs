use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Unified error type for the Swabox shell
#[derive(Error, Debug)]
pub enum SwaboxError {
    /// API-related errors (non-2xx responses, malformed bodies)
    #[error("API error: {0}")]
    Api(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// User input errors
    #[error("Input error: {0}")]
    Input(String),

    /// Command execution errors
    #[error("Execution error: {0}")]
    Execution(String),

    /// IO-related errors
    #[error("IO error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Network-related errors
    #[error("Network error: {0}")]
    Network(String),

    /// No API key in the config and none in the environment
    #[error("API key not configured. Please set the {env_var} environment variable.")]
    MissingApiKey { env_var: &'static str },

    /// Provider name that does not map to a known backend
    #[error("Unsupported AI provider: {0}")]
    UnsupportedProvider(String),

    /// A plugin file that could not be read or parsed
    #[error("Error loading plugin {}: {reason}", path.display())]
    PluginLoad { path: PathBuf, reason: String },

    /// A plugin that ran but failed
    #[error("{0}")]
    PluginExecution(String),
}

impl From<reqwest::Error> for SwaboxError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SwaboxError::Network(format!("Request timed out: {}", err))
        } else if err.is_connect() {
            SwaboxError::Network(format!("Connection failed: {}", err))
        } else if err.is_status() {
            SwaboxError::Api(format!("API returned error status: {}", err))
        } else if err.is_decode() {
            SwaboxError::Serialization(format!("Invalid response body: {}", err))
        } else {
            SwaboxError::Network(format!("Request failed: {}", err))
        }
    }
}

impl From<serde_json::Error> for SwaboxError {
    fn from(err: serde_json::Error) -> Self {
        SwaboxError::Serialization(format!("JSON error: {}", err))
    }
}

impl From<rustyline::error::ReadlineError> for SwaboxError {
    fn from(err: rustyline::error::ReadlineError) -> Self {
        SwaboxError::Input(format!("Line editor error: {}", err))
    }
}

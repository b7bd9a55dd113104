//! Configuration types for the brain-dump service.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{AirtimeError, Result};

/// Environment variable that overrides the config file location.
pub const CONFIG_PATH_ENV: &str = "AIRTIME_CONFIG";

/// Top-level service configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// HTTP listener settings.
    pub server: ServerConfig,
    /// Language model provider settings.
    pub llm: LlmConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// Port to bind (0 = auto-assign).
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_owned(),
            port: 8080,
        }
    }
}

/// Language model provider configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Base URL of the OpenAI-compatible API, up to and including `/v1`.
    pub base_url: String,
    /// Model name to request.
    pub model: String,
    /// Where the API key comes from.
    pub api_key: SecretRef,
    /// Sampling temperature.
    pub temperature: f64,
    /// Maximum tokens to generate per reply.
    pub max_tokens: usize,
    /// Upper bound on a single provider call, in seconds.
    pub request_timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://openrouter.ai/api/v1".to_owned(),
            model: "openrouter/aurora-alpha".to_owned(),
            api_key: SecretRef::Env {
                var: "OPENROUTER_API_KEY".to_owned(),
            },
            temperature: 0.7,
            max_tokens: 2000,
            request_timeout_secs: 30,
        }
    }
}

/// Reference to a secret value.
///
/// Secrets can be:
/// - Not required (None)
/// - Loaded from environment variable (Env)
/// - Hardcoded literal (Literal) - for development only
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SecretRef {
    /// No secret required
    #[default]
    None,
    /// Load from environment variable
    Env { var: String },
    /// Literal value (development only, insecure)
    Literal { value: String },
}

impl SecretRef {
    /// Resolve the secret to its actual value.
    ///
    /// # Returns
    /// - `Ok(None)` if no secret is configured (variant `None`)
    /// - `Ok(Some(value))` for successfully resolved secrets
    /// - `Err(AirtimeError::Config)` when the environment variable is unset
    pub fn resolve(&self) -> Result<Option<String>> {
        match self {
            Self::None => Ok(None),
            Self::Env { var } => std::env::var(var).map(Some).map_err(|_| {
                AirtimeError::Config(format!("environment variable '{var}' not set"))
            }),
            Self::Literal { value } => Ok(Some(value.clone())),
        }
    }
}

impl ServiceConfig {
    /// Load configuration from a TOML file, falling back to defaults for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| AirtimeError::Config(e.to_string()))
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| AirtimeError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns the default config file path: `<config dir>/airtime/config.toml`.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("airtime"))
            .unwrap_or_else(|| PathBuf::from("/tmp/airtime-config"))
            .join("config.toml")
    }

    /// Load from `$AIRTIME_CONFIG` or the default path.
    ///
    /// A missing file at the default location yields defaults. A path named
    /// explicitly through the environment must exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the selected file exists but cannot be parsed, or
    /// if `$AIRTIME_CONFIG` points at a missing file.
    pub fn load() -> Result<Self> {
        if let Some(path) = std::env::var_os(CONFIG_PATH_ENV) {
            return Self::from_file(Path::new(&path));
        }
        let path = Self::default_config_path();
        if path.exists() {
            Self::from_file(&path)
        } else {
            Ok(Self::default())
        }
    }
}

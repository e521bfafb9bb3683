//! Configuration loaded from TOML. Every field is optional.
//!
//! ```toml
//! listen_addr = "0.0.0.0:8080"
//! collection_key = "mwai_chatbots"
//! ajax_base = "/widget-api"
//! store_path = "/var/lib/chatbots/settings.json"
//! nonce_secret = "change-me"
//! nonce_lifetime_secs = 86400
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::nonce::DEFAULT_LIFETIME_SECS;
use crate::store::DEFAULT_COLLECTION_KEY;

/// Environment variable the server reads its config path from.
pub const CONFIG_ENV: &str = "CHATBOT_INSTRUCTIONS_CONFIG";

/// Widget and server settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WidgetConfig {
    /// Address the HTTP server binds.
    pub listen_addr: String,
    /// Settings key holding the record collection.
    pub collection_key: String,
    /// URL prefix the client controller posts saves under.
    pub ajax_base: String,
    /// JSON settings file. In-memory store when unset.
    pub store_path: Option<PathBuf>,
    /// HMAC secret for anti-forgery tokens. Random per process when empty.
    pub nonce_secret: String,
    /// Token lifetime in seconds.
    pub nonce_lifetime_secs: u64,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:3000".into(),
            collection_key: DEFAULT_COLLECTION_KEY.into(),
            ajax_base: String::new(),
            store_path: None,
            nonce_secret: String::new(),
            nonce_lifetime_secs: DEFAULT_LIFETIME_SECS,
        }
    }
}

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    Io { path: PathBuf, source: std::io::Error },
    /// The config text is not valid TOML for `WidgetConfig`.
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "failed to read config {}: {}", path.display(), source)
            }
            ConfigError::Parse(e) => write!(f, "invalid config: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Parse(e) => Some(e),
        }
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Parse(err)
    }
}

impl WidgetConfig {
    /// Parse TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a TOML file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Load from an explicit path, else from `$CHATBOT_INSTRUCTIONS_CONFIG`,
    /// else defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_path(path),
            None => match std::env::var_os(CONFIG_ENV) {
                Some(path) => Self::from_path(PathBuf::from(path)),
                None => Ok(Self::default()),
            },
        }
    }
}

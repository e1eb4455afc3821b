//! Configuration schema definitions.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use autofill_protocols::BackendKind;

use crate::loader::ConfigLoader;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Backend used when a request does not name one.
    #[serde(default)]
    pub provider: BackendKind,

    #[serde(default)]
    pub providers: ProvidersConfig,

    #[serde(default)]
    pub http: HttpConfig,

    #[serde(default)]
    pub extractor: ExtractorSettings,

    #[serde(default)]
    pub executor: ExecutorSettings,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub profiles: ProfilesConfig,
}

/// Per-backend settings, one table per supported backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub gemini: ProviderConfig,

    #[serde(default)]
    pub openai: ProviderConfig,

    #[serde(default)]
    pub anthropic: ProviderConfig,
}

impl ProvidersConfig {
    pub fn get(&self, kind: BackendKind) -> &ProviderConfig {
        match kind {
            BackendKind::Gemini => &self.gemini,
            BackendKind::OpenAi => &self.openai,
            BackendKind::Anthropic => &self.anthropic,
        }
    }
}

/// Settings of one backend. Unset fields fall back to the adapter's own
/// defaults.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub api_key: Option<String>,

    pub model: Option<String>,

    pub base_url: Option<String>,
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// HTTP client settings shared by all adapters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl HttpConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: default_connect_timeout(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_timeout() -> u64 {
    120
}

/// Text fragment bounds used during extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractorSettings {
    /// Fragments must be strictly longer than this many characters.
    #[serde(default = "default_min_text_len")]
    pub min_text_len: usize,

    /// Fragments are truncated to this many characters.
    #[serde(default = "default_max_text_len")]
    pub max_text_len: usize,
}

impl Default for ExtractorSettings {
    fn default() -> Self {
        Self {
            min_text_len: default_min_text_len(),
            max_text_len: default_max_text_len(),
        }
    }
}

fn default_min_text_len() -> usize {
    10
}

fn default_max_text_len() -> usize {
    2000
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutorSettings {
    /// How long an applied element keeps its highlight outline.
    #[serde(default = "default_highlight_ms")]
    pub highlight_ms: u64,
}

impl ExecutorSettings {
    pub fn highlight_duration(&self) -> Duration {
        Duration::from_millis(self.highlight_ms)
    }
}

impl Default for ExecutorSettings {
    fn default() -> Self {
        Self {
            highlight_ms: default_highlight_ms(),
        }
    }
}

fn default_highlight_ms() -> u64 {
    1500
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Directory for daily rolling log files. Console only when unset.
    #[serde(default)]
    pub dir: Option<String>,
}

impl LoggingConfig {
    pub fn dir_path(&self) -> Option<PathBuf> {
        self.dir
            .as_deref()
            .map(|dir| PathBuf::from(ConfigLoader::expand_path(dir)))
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            dir: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Named user profiles. A profile is the free-form text handed to the model.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfilesConfig {
    #[serde(default)]
    pub selected: Option<String>,

    #[serde(default)]
    pub entries: BTreeMap<String, String>,
}

impl ProfilesConfig {
    /// The selected profile, or the first entry by name when the selection
    /// is unset or unknown.
    pub fn selected_profile(&self) -> Option<(&str, &str)> {
        self.selected
            .as_deref()
            .and_then(|name| self.entries.get_key_value(name))
            .or_else(|| self.entries.iter().next())
            .map(|(name, text)| (name.as_str(), text.as_str()))
    }
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;

//! Common identifier and selection types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of the browser tab a session targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabId(pub u32);

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The tool-calling backend a session is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    #[default]
    Gemini,
    OpenAi,
    Anthropic,
}

impl BackendKind {
    pub const ALL: [BackendKind; 3] = [Self::Gemini, Self::OpenAi, Self::Anthropic];

    /// Lower-case identifier used in config files and status messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gemini => "gemini",
            Self::OpenAi => "openai",
            Self::Anthropic => "anthropic",
        }
    }

    /// Product name used in user-facing error messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Gemini => "Gemini",
            Self::OpenAi => "OpenAI",
            Self::Anthropic => "Anthropic",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gemini" | "google" => Ok(Self::Gemini),
            "openai" | "open-ai" => Ok(Self::OpenAi),
            "anthropic" | "claude" => Ok(Self::Anthropic),
            other => Err(format!("unknown backend: {}", other)),
        }
    }
}

/// Resolved credentials for one backend call.
///
/// `Debug` never prints the key.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub api_key: String,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }

    /// True when no usable key is configured.
    pub fn is_missing(&self) -> bool {
        self.api_key.trim().is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shown = if self.is_missing() { "<missing>" } else { "<redacted>" };
        f.debug_struct("Credentials").field("api_key", &shown).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_kind_serialization() {
        assert_eq!(serde_json::to_string(&BackendKind::OpenAi).unwrap(), "\"openai\"");
        let kind: BackendKind = serde_json::from_str("\"anthropic\"").unwrap();
        assert_eq!(kind, BackendKind::Anthropic);
    }

    #[test]
    fn test_backend_kind_from_str() {
        assert_eq!("Gemini".parse::<BackendKind>().unwrap(), BackendKind::Gemini);
        assert_eq!("claude".parse::<BackendKind>().unwrap(), BackendKind::Anthropic);
        assert!("mistral".parse::<BackendKind>().is_err());
    }

    #[test]
    fn test_backend_kind_default() {
        assert_eq!(BackendKind::default(), BackendKind::Gemini);
    }

    #[test]
    fn test_credentials_missing() {
        assert!(Credentials::default().is_missing());
        assert!(Credentials::new("   ").is_missing());
        assert!(!Credentials::new("sk-1").is_missing());
    }

    #[test]
    fn test_credentials_debug_redacts_key() {
        let debug = format!("{:?}", Credentials::new("sk-secret"));
        assert!(!debug.contains("sk-secret"));
        assert!(debug.contains("redacted"));
    }

    #[test]
    fn test_tab_id_transparent() {
        assert_eq!(serde_json::to_string(&TabId(7)).unwrap(), "7");
    }
}

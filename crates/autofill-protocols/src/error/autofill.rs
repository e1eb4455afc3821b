//! Session-fatal errors.
//!
//! Every variant terminates the session it occurs in, produces one status
//! update and removes the session entry.

use thiserror::Error;

use super::{ProviderError, TransportError};
use crate::types::BackendKind;

#[derive(Debug, Error)]
pub enum AutofillError {
    /// No tab id, or no session for the tab a message came from.
    #[error("{0}")]
    MissingTarget(String),

    #[error("{} API Key is missing. Please set it in the popup.", provider.display_name())]
    MissingCredential { provider: BackendKind },

    #[error("Could not communicate with the page: {0}")]
    CommunicationFailure(#[from] TransportError),

    /// Generic backend failure. `provider` is `None` when no backend could
    /// be selected at all.
    #[error("{}", render_provider_failure(*provider, message))]
    ProviderFailure {
        provider: Option<BackendKind>,
        message: String,
    },

    #[error("{message}")]
    RateLimited {
        message: String,
        retry_delay: Option<String>,
        quota_metric: Option<String>,
    },
}

impl AutofillError {
    pub fn no_tab() -> Self {
        Self::MissingTarget("No tabId provided.".to_string())
    }

    pub fn no_session() -> Self {
        Self::MissingTarget("No active autofill request.".to_string())
    }

    pub fn no_provider() -> Self {
        Self::ProviderFailure {
            provider: None,
            message: "No AI provider selected.".to_string(),
        }
    }

    /// Classify a provider error raised while serving `backend`.
    pub fn from_provider(backend: BackendKind, err: ProviderError) -> Self {
        match err {
            ProviderError::MissingCredential { provider } => Self::MissingCredential { provider },
            ProviderError::RateLimited {
                message,
                retry_delay,
                quota_metric,
                ..
            } => Self::RateLimited {
                message,
                retry_delay,
                quota_metric,
            },
            ProviderError::Api { message, .. } => Self::ProviderFailure {
                provider: Some(backend),
                message,
            },
            other => Self::ProviderFailure {
                provider: Some(backend),
                message: other.to_string(),
            },
        }
    }

    /// Text of the status update announcing this failure.
    ///
    /// Backend failures are already phrased for display; everything else is
    /// prefixed with `Error: `.
    pub fn status_text(&self) -> String {
        match self {
            Self::RateLimited { .. }
            | Self::ProviderFailure {
                provider: Some(_), ..
            } => self.to_string(),
            other => format!("Error: {}", other),
        }
    }
}

fn render_provider_failure(provider: Option<BackendKind>, message: &str) -> String {
    match provider {
        Some(provider) => format!("Error from {}: {}", provider, message),
        None => message.to_string(),
    }
}

//! Provider trait definition.

use async_trait::async_trait;

use super::GenerationRequest;
use crate::error::ProviderError;
use crate::types::{BackendKind, ToolCall};

/// Core trait implemented once per backend.
#[async_trait]
pub trait ToolCallProvider: Send + Sync {
    /// The backend this provider talks to.
    fn kind(&self) -> BackendKind;

    /// Model used when the request does not name one.
    fn default_model(&self) -> &str;

    /// Ask the backend which tools to call.
    ///
    /// Zero calls is a successful, empty result. Fails with
    /// [`ProviderError::MissingCredential`] before any network I/O when the
    /// request carries no API key.
    async fn generate(&self, request: GenerationRequest) -> Result<Vec<ToolCall>, ProviderError>;
}

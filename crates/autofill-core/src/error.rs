//! Core errors.

use thiserror::Error;

use autofill_protocols::BackendKind;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Provider already registered: {0}")]
    AlreadyRegistered(BackendKind),

    #[error("Provider not found: {0}")]
    NotFound(BackendKind),
}

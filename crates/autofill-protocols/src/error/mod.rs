//! Error types for the autofill protocol layer.

mod autofill;
mod provider;
mod transport;

pub use autofill::*;
pub use provider::*;
pub use transport::*;

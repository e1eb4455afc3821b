//! Tool schema definitions.
//!
//! The three canonical tools are described once here; each provider adapter
//! translates them into its backend's declaration shape.

mod definition;

pub use definition::*;

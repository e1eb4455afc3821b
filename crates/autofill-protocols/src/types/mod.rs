//! Canonical types used across the autofill pipeline.

mod action;
mod common;
mod locator;
mod outcome;
mod page;

pub use action::*;
pub use common::*;
pub use locator::*;
pub use outcome::*;
pub use page::*;

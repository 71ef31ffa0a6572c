//! MailSift Core
//!
//! Core types and error handling shared across MailSift components.
//!
//! This crate provides:
//! - The `Error` type and `Result` alias
//! - `FeatureVector`, the sparse encoding passed from transformer to classifier
//! - `Decision`, the outcome of a classification request and its rendering

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{Decision, FeatureVector};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::types::{Decision, FeatureVector};
}

//! Utilities
//!
//! Application-wide helpers shared across services and storage.

pub mod error;

pub use error::{AppError, AppResult};

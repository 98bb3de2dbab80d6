//! Storage
//!
//! SQLite-backed persistence for projects, interview answers, draft
//! sections, quality issues, and usage records.

pub mod database;

pub use database::{Database, DbPool};

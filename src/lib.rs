//! Draftsmith
//!
//! AI-assisted provisional patent drafting engine. Inventors describe an
//! invention, answer an interview (a fixed static questionnaire or an
//! AI-generated dynamic one), and the engine produces a structured draft —
//! six specification sections plus claims — through sequential LLM calls,
//! then runs heuristic and AI quality checks over the result.
//!
//! ## Crate Organization
//!
//! - `models` - persisted record shapes (projects, answers, sections, usage)
//! - `services` - interview, generation, quality-check, and usage logging
//! - `storage` - SQLite persistence behind a pooled `Database` service
//! - `utils` - application-wide error types
//!
//! Foundation crates: `draftsmith-core` (domain types and context building),
//! `draftsmith-llm` (provider abstraction), `draftsmith-quality` (pure
//! heuristics and issue merging).

pub mod models;
pub mod services;
pub mod storage;
pub mod utils;

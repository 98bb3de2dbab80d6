//! Integration Tests Module
//!
//! End-to-end tests for the drafting engine against an in-memory database
//! and a scripted provider: both generation pipelines, the quality-check
//! pipeline, and the failure paths that must leave nothing behind.

mod support;

// Draft generation pipeline tests (static and dynamic)
mod generation_test;

// Quality check pipeline tests
mod quality_test;

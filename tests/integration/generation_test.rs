//! Generation Pipeline Integration Tests
//!
//! Drive both interview pipelines end-to-end against an in-memory database
//! and a scripted provider, covering the output contract both pipelines
//! share: seven records, claims last, completion flag, ordered usage logs.

use std::collections::HashMap;
use std::sync::Arc;

use draftsmith::models::{InterviewMode, Project};
use draftsmith::services::{
    DraftGenerator, DynamicInterviewSource, InterviewService, StaticInterviewSource,
};
use draftsmith::storage::Database;
use draftsmith_core::SectionKey;

use crate::support::ScriptedProvider;

const SECTIONS_JSON: &str = r#"{
    "TITLE": "Self-Sealing Valve Assembly",
    "BACKGROUND": "Conventional valves develop leaks as seats wear.",
    "SUMMARY": "A valve assembly whose elastomer seat re-seats under line pressure.",
    "DRAWINGS": "FIG. 1 is a section view of the valve assembly.",
    "DETAILED_DESC": "In one embodiment, a valve body houses an elastomer seat...",
    "ABSTRACT": "A self-sealing valve assembly with an elastomer seat."
}"#;

const CLAIMS_TEXT: &str =
    "1. A valve assembly comprising a body and an elastomer seat.\n\
     2. The valve assembly of claim 1, further comprising a spring.\n";

fn full_static_answers() -> HashMap<String, String> {
    [
        ("title", "Self-sealing valve"),
        ("problem", "Valve seats wear out and leak"),
        ("solution", "An elastomer seat that re-seats under pressure"),
        ("components", "Body, seat, spring"),
        ("operation", "Line pressure pushes the seat back into place"),
        ("novelty", "No maintenance needed to restore the seal"),
    ]
    .iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

#[tokio::test]
async fn test_static_pipeline_end_to_end() {
    let db = Database::new_in_memory().unwrap();
    let project = Project::new("Valve", "A self-sealing valve", InterviewMode::Static);
    db.create_project(&project).unwrap();

    let provider = Arc::new(ScriptedProvider::new(vec![
        ScriptedProvider::ok(SECTIONS_JSON),
        ScriptedProvider::ok(CLAIMS_TEXT),
    ]));

    let interview = InterviewService::new(db.clone(), provider.clone());
    interview
        .submit_static_answers(&project.id, &full_static_answers())
        .unwrap();

    let generator = DraftGenerator::new(db.clone(), provider.clone());
    let source = StaticInterviewSource::new(db.clone());
    let draft = generator.generate(&project.id, &source).await.unwrap();

    // Seven sections, keyed correctly, claims last
    assert_eq!(draft.sections.len(), 7);
    assert_eq!(draft.sections.last().unwrap().0, SectionKey::Claims);
    assert_eq!(
        draft.content_for(SectionKey::Title),
        Some("Self-Sealing Valve Assembly")
    );
    assert!(draft.claims().unwrap().starts_with("1. A valve assembly"));

    // Persisted in canonical order, one row per key
    let persisted = db.get_sections(&project.id).unwrap();
    let keys: Vec<SectionKey> = persisted.iter().map(|s| s.key).collect();
    assert_eq!(keys, SectionKey::ALL.to_vec());

    // Completion flag flipped, two ordered usage records
    assert!(db.get_project(&project.id).unwrap().unwrap().interview_completed);
    let usage = db.list_usage_records(&project.id).unwrap();
    assert_eq!(usage.len(), 2);
    assert_eq!(usage[0].operation, "draft_sections");
    assert_eq!(usage[1].operation, "draft_claims");

    // Exactly two model calls, sections first
    assert_eq!(provider.call_count(), 2);
    assert!(provider.prompt(0).contains("invention disclosure"));
    assert!(provider.prompt(0).contains("Self-sealing valve"));
}

#[tokio::test]
async fn test_dynamic_pipeline_end_to_end() {
    let db = Database::new_in_memory().unwrap();
    let project = Project::new(
        "Valve",
        "A valve that seals itself using an elastomer seat.",
        InterviewMode::Dynamic,
    );
    db.create_project(&project).unwrap();

    // Question-set generation: profile extraction, then questions
    let provider = Arc::new(ScriptedProvider::new(vec![
        ScriptedProvider::ok(
            r#"{"title": "Self-sealing valve", "field": "Fluid control",
                "problem": "Leaks", "solution": "Re-seating seat",
                "components": ["body", "seat"], "novelty": "Self-restoring seal"}"#,
        ),
        ScriptedProvider::ok(
            r#"[{"category": "Structure", "question": "What material is the seat?"},
                {"category": "Operation", "question": "At what pressure does it re-seat?"}]"#,
        ),
        ScriptedProvider::ok(SECTIONS_JSON),
        ScriptedProvider::ok(CLAIMS_TEXT),
    ]));

    let interview = InterviewService::new(db.clone(), provider.clone());
    let questions = interview.generate_question_set(&project.id).await.unwrap();
    assert_eq!(questions.len(), 2);

    interview
        .submit_dynamic_answer(&questions[0].id, "Nitrile rubber")
        .unwrap();
    // Second question deliberately left unanswered

    let generator = DraftGenerator::new(db.clone(), provider.clone());
    let source = DynamicInterviewSource::new(db.clone());
    let draft = generator.generate(&project.id, &source).await.unwrap();

    assert_eq!(draft.sections.len(), 7);
    assert!(db.get_project(&project.id).unwrap().unwrap().interview_completed);

    // The drafting prompt carries the grouped Q&A context
    let sections_prompt = provider.prompt(2);
    assert!(sections_prompt.contains("Q: What material is the seat?"));
    assert!(sections_prompt.contains("A: Nitrile rubber"));
    assert!(sections_prompt.contains("A: (not answered)"));

    // Four calls, four ordered usage records
    let usage = db.list_usage_records(&project.id).unwrap();
    let operations: Vec<&str> = usage.iter().map(|u| u.operation.as_str()).collect();
    assert_eq!(
        operations,
        vec!["extract_profile", "generate_questions", "draft_sections", "draft_claims"]
    );
}

#[tokio::test]
async fn test_malformed_sections_leaves_project_untouched() {
    let db = Database::new_in_memory().unwrap();
    let project = Project::new("Valve", "desc", InterviewMode::Static);
    db.create_project(&project).unwrap();
    db.upsert_static_answer(&project.id, "title", "Valve").unwrap();

    let provider = Arc::new(ScriptedProvider::new(vec![
        ScriptedProvider::ok("Sorry, here is prose instead of JSON."),
        ScriptedProvider::ok(CLAIMS_TEXT),
    ]));

    let generator = DraftGenerator::new(db.clone(), provider);
    let source = StaticInterviewSource::new(db.clone());
    let err = generator.generate(&project.id, &source).await.unwrap_err();

    assert!(err.to_string().contains("Parse error"));
    assert!(db.get_sections(&project.id).unwrap().is_empty());
    assert!(!db.get_project(&project.id).unwrap().unwrap().interview_completed);
}

#[tokio::test]
async fn test_regeneration_replaces_draft_in_place() {
    let db = Database::new_in_memory().unwrap();
    let project = Project::new("Valve", "desc", InterviewMode::Static);
    db.create_project(&project).unwrap();
    db.upsert_static_answer(&project.id, "title", "Valve").unwrap();

    let provider = Arc::new(ScriptedProvider::new(vec![
        ScriptedProvider::ok(SECTIONS_JSON),
        ScriptedProvider::ok(CLAIMS_TEXT),
        ScriptedProvider::ok(r#"{"TITLE": "Improved Valve Assembly"}"#),
        ScriptedProvider::ok("1. An improved valve.\n"),
    ]));

    let generator = DraftGenerator::new(db.clone(), provider);
    let source = StaticInterviewSource::new(db.clone());
    generator.generate(&project.id, &source).await.unwrap();
    generator.generate(&project.id, &source).await.unwrap();

    // Still exactly seven rows; content replaced
    let sections = db.get_sections(&project.id).unwrap();
    assert_eq!(sections.len(), 7);
    let title = sections.iter().find(|s| s.key == SectionKey::Title).unwrap();
    assert_eq!(title.content, "Improved Valve Assembly");
}

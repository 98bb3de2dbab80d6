//! Quality Check Pipeline Integration Tests
//!
//! Run the quality service over generated drafts: merged heuristic + AI
//! issues, graceful AI degradation, and wholesale issue replacement.

use std::sync::Arc;

use draftsmith::models::{DraftSection, InterviewMode, Project};
use draftsmith::services::QualityService;
use draftsmith::storage::Database;
use draftsmith_core::{IssueSeverity, IssueType, SectionKey};
use draftsmith_llm::LlmError;

use crate::support::ScriptedProvider;

fn project_with_flawed_draft(db: &Database) -> Project {
    let project = Project::new("Valve", "desc", InterviewMode::Static);
    db.create_project(&project).unwrap();

    // Background present; detailed description thin; abstract missing;
    // claim 2 references an unintroduced element.
    db.upsert_section(&DraftSection::new(
        &project.id,
        SectionKey::Background,
        "Valve seats wear out.",
    ))
    .unwrap();
    db.upsert_section(&DraftSection::new(
        &project.id,
        SectionKey::DetailedDescription,
        "A short description.",
    ))
    .unwrap();
    db.upsert_section(&DraftSection::new(
        &project.id,
        SectionKey::Claims,
        "1. A valve comprising a body.\n2. The valve of claim 1, wherein the seat is elastomeric.",
    ))
    .unwrap();
    project
}

#[tokio::test]
async fn test_quality_check_merges_and_persists() {
    let db = Database::new_in_memory().unwrap();
    let project = project_with_flawed_draft(&db);

    let provider = Arc::new(ScriptedProvider::new(vec![ScriptedProvider::ok(
        r#"[{"type": "TERM_CONSISTENCY", "severity": "MED",
             "message": "\"seat\" is also called \"gasket\" in the summary",
             "location": "SUMMARY"}]"#,
    )]));

    let service = QualityService::new(db.clone(), provider);
    let issues = service.run_check(&project.id).await.unwrap();

    // AI issue first, then heuristics: missing abstract, thin detail,
    // antecedent basis on claim 2
    assert_eq!(issues[0].issue_type, IssueType::TermConsistency);
    assert!(issues
        .iter()
        .any(|i| i.message == "Missing required section: Abstract"));
    assert!(issues
        .iter()
        .any(|i| i.severity == IssueSeverity::Med && i.location.as_deref() == Some("DETAILED_DESC")));
    assert!(issues.iter().any(|i| {
        i.issue_type == IssueType::AntecedentBasis && i.location.as_deref() == Some("claim 2")
    }));

    // Persisted set matches the returned set, in order
    let stored = db.get_issues(&project.id).unwrap();
    assert_eq!(stored.len(), issues.len());
    assert_eq!(stored[0].message, issues[0].message);
}

#[tokio::test]
async fn test_quality_check_survives_ai_outage() {
    let db = Database::new_in_memory().unwrap();
    let project = project_with_flawed_draft(&db);

    let provider = Arc::new(ScriptedProvider::new(vec![Err(LlmError::ServerError {
        message: "upstream timeout".to_string(),
        status: Some(504),
    })]));

    let service = QualityService::new(db.clone(), provider);
    let issues = service.run_check(&project.id).await.unwrap();

    // Heuristic issues alone, still persisted
    assert!(!issues.is_empty());
    assert!(issues
        .iter()
        .any(|i| i.issue_type == IssueType::AntecedentBasis));
    assert_eq!(db.get_issues(&project.id).unwrap().len(), issues.len());
}

#[tokio::test]
async fn test_second_check_replaces_first() {
    let db = Database::new_in_memory().unwrap();
    let project = project_with_flawed_draft(&db);

    let provider = Arc::new(ScriptedProvider::new(vec![
        ScriptedProvider::ok(r#"[{"type": "VAGUE_TERM", "severity": "LOW", "message": "round one"}]"#),
        ScriptedProvider::ok("[]"),
    ]));

    let service = QualityService::new(db.clone(), provider);
    let first = service.run_check(&project.id).await.unwrap();
    assert!(first.iter().any(|i| i.message == "round one"));

    let second = service.run_check(&project.id).await.unwrap();
    assert!(second.iter().all(|i| i.message != "round one"));

    let stored = db.get_issues(&project.id).unwrap();
    assert_eq!(stored.len(), second.len());
}

#[tokio::test]
async fn test_clean_draft_yields_empty_issue_set() {
    let db = Database::new_in_memory().unwrap();
    let project = Project::new("Valve", "desc", InterviewMode::Static);
    db.create_project(&project).unwrap();

    db.upsert_section(&DraftSection::new(
        &project.id,
        SectionKey::Background,
        "Valve seats wear out over time, causing leaks.",
    ))
    .unwrap();
    db.upsert_section(&DraftSection::new(
        &project.id,
        SectionKey::DetailedDescription,
        "In one embodiment, ".repeat(40),
    ))
    .unwrap();
    db.upsert_section(&DraftSection::new(
        &project.id,
        SectionKey::Abstract,
        "A self-sealing valve assembly.",
    ))
    .unwrap();
    db.upsert_section(&DraftSection::new(
        &project.id,
        SectionKey::Claims,
        "1. A valve assembly comprising a body and a seat, the seat being elastomeric.",
    ))
    .unwrap();

    let provider = Arc::new(ScriptedProvider::new(vec![ScriptedProvider::ok("[]")]));
    let service = QualityService::new(db.clone(), provider);
    let issues = service.run_check(&project.id).await.unwrap();

    assert!(issues.is_empty());
    assert!(db.get_issues(&project.id).unwrap().is_empty());
}

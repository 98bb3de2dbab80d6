//! SQLite Database
//!
//! Embedded database for persistent storage using rusqlite with r2d2
//! connection pooling. All services share one `Database` instance; tests use
//! `new_in_memory()`.

use std::collections::HashMap;
use std::path::Path;

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::params;

use draftsmith_core::{IssueSeverity, IssueType, QualityIssue, SectionKey};

use crate::models::{
    AnsweredQuestion, DraftSection, DynamicQuestion, InterviewMode, Project, UsageRecord,
};
use crate::utils::error::{AppError, AppResult};

/// Type alias for the connection pool
pub type DbPool = Pool<SqliteConnectionManager>;

/// Database service for managing SQLite operations
#[derive(Clone)]
pub struct Database {
    pool: DbPool,
}

impl Database {
    /// Create a database from an existing connection pool.
    pub fn from_pool(pool: DbPool) -> AppResult<Self> {
        let db = Self { pool };
        db.init_schema()?;
        Ok(db)
    }

    /// Create an in-memory database for testing.
    pub fn new_in_memory() -> AppResult<Self> {
        let manager = SqliteConnectionManager::memory();
        let pool = Pool::builder()
            .max_size(1)
            .build(manager)
            .map_err(|e| AppError::database(format!("Failed to create connection pool: {}", e)))?;
        Self::from_pool(pool)
    }

    /// Create a new database instance at the given path with connection pooling
    pub fn new(db_path: impl AsRef<Path>) -> AppResult<Self> {
        let db_path = db_path.as_ref();

        // Ensure parent directory exists
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let manager = SqliteConnectionManager::file(db_path);
        let pool = Pool::builder()
            .max_size(10)
            .build(manager)
            .map_err(|e| AppError::database(format!("Failed to create connection pool: {}", e)))?;
        Self::from_pool(pool)
    }

    /// Get a pooled connection
    fn conn(&self) -> AppResult<r2d2::PooledConnection<SqliteConnectionManager>> {
        self.pool
            .get()
            .map_err(|e| AppError::database(format!("Failed to get connection: {}", e)))
    }

    /// Initialize the database schema
    fn init_schema(&self) -> AppResult<()> {
        let conn = self.conn()?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS projects (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                interview_mode TEXT NOT NULL DEFAULT 'static',
                interview_completed INTEGER NOT NULL DEFAULT 0,
                created_at TEXT DEFAULT CURRENT_TIMESTAMP,
                updated_at TEXT DEFAULT CURRENT_TIMESTAMP
            )",
            [],
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS static_answers (
                project_id TEXT NOT NULL,
                field TEXT NOT NULL,
                value TEXT NOT NULL DEFAULT '',
                PRIMARY KEY (project_id, field),
                FOREIGN KEY (project_id) REFERENCES projects(id) ON DELETE CASCADE
            )",
            [],
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS dynamic_questions (
                id TEXT PRIMARY KEY,
                project_id TEXT NOT NULL,
                category TEXT NOT NULL,
                question TEXT NOT NULL,
                position INTEGER NOT NULL,
                FOREIGN KEY (project_id) REFERENCES projects(id) ON DELETE CASCADE
            )",
            [],
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS dynamic_answers (
                question_id TEXT PRIMARY KEY,
                answer TEXT NOT NULL DEFAULT '',
                FOREIGN KEY (question_id) REFERENCES dynamic_questions(id) ON DELETE CASCADE
            )",
            [],
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS draft_sections (
                project_id TEXT NOT NULL,
                section_key TEXT NOT NULL,
                content TEXT NOT NULL DEFAULT '',
                updated_at TEXT DEFAULT CURRENT_TIMESTAMP,
                PRIMARY KEY (project_id, section_key),
                FOREIGN KEY (project_id) REFERENCES projects(id) ON DELETE CASCADE
            )",
            [],
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS quality_issues (
                id TEXT PRIMARY KEY,
                project_id TEXT NOT NULL,
                issue_type TEXT NOT NULL,
                severity TEXT NOT NULL,
                message TEXT NOT NULL,
                location TEXT,
                position INTEGER NOT NULL,
                FOREIGN KEY (project_id) REFERENCES projects(id) ON DELETE CASCADE
            )",
            [],
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS usage_records (
                id TEXT PRIMARY KEY,
                project_id TEXT NOT NULL,
                operation TEXT NOT NULL,
                model TEXT NOT NULL,
                prompt_tokens INTEGER NOT NULL DEFAULT 0,
                completion_tokens INTEGER NOT NULL DEFAULT 0,
                total_tokens INTEGER NOT NULL DEFAULT 0,
                created_at TEXT DEFAULT CURRENT_TIMESTAMP
            )",
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_dynamic_questions_project
             ON dynamic_questions(project_id, position)",
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_quality_issues_project
             ON quality_issues(project_id, position)",
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_usage_records_project
             ON usage_records(project_id)",
            [],
        )?;

        Ok(())
    }

    // ========================================================================
    // Projects
    // ========================================================================

    /// Create a new project record
    pub fn create_project(&self, project: &Project) -> AppResult<()> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO projects (id, title, description, interview_mode, interview_completed,
             created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                project.id,
                project.title,
                project.description,
                project.interview_mode.as_str(),
                project.interview_completed as i32,
                project.created_at,
                project.updated_at,
            ],
        )?;
        Ok(())
    }

    /// Get a project by ID
    pub fn get_project(&self, id: &str) -> AppResult<Option<Project>> {
        let conn = self.conn()?;
        let result = conn.query_row(
            "SELECT id, title, description, interview_mode, interview_completed,
             created_at, updated_at
             FROM projects WHERE id = ?1",
            params![id],
            |row| {
                Ok(Project {
                    id: row.get(0)?,
                    title: row.get(1)?,
                    description: row.get(2)?,
                    interview_mode: {
                        let mode: String = row.get(3)?;
                        InterviewMode::parse(&mode)
                    },
                    interview_completed: {
                        let v: i32 = row.get(4)?;
                        v != 0
                    },
                    created_at: row.get(5)?,
                    updated_at: row.get(6)?,
                })
            },
        );

        match result {
            Ok(project) => Ok(Some(project)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::database(e.to_string())),
        }
    }

    /// Set the interview-completed flag on a project
    pub fn set_interview_completed(&self, id: &str, completed: bool) -> AppResult<()> {
        let conn = self.conn()?;
        let changed = conn.execute(
            "UPDATE projects SET interview_completed = ?2, updated_at = ?3 WHERE id = ?1",
            params![
                id,
                completed as i32,
                chrono::Utc::now().to_rfc3339(),
            ],
        )?;
        if changed == 0 {
            return Err(AppError::not_found(format!("Project not found: {}", id)));
        }
        Ok(())
    }

    // ========================================================================
    // Static interview answers
    // ========================================================================

    /// Insert or replace one static-interview answer
    pub fn upsert_static_answer(&self, project_id: &str, field: &str, value: &str) -> AppResult<()> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO static_answers (project_id, field, value)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(project_id, field) DO UPDATE SET value = excluded.value",
            params![project_id, field, value],
        )?;
        Ok(())
    }

    /// Get all static answers for a project as a field map
    pub fn get_static_answers(&self, project_id: &str) -> AppResult<HashMap<String, String>> {
        let conn = self.conn()?;
        let mut stmt =
            conn.prepare("SELECT field, value FROM static_answers WHERE project_id = ?1")?;
        let answers = stmt
            .query_map(params![project_id], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })?
            .filter_map(|r| r.ok())
            .collect();
        Ok(answers)
    }

    // ========================================================================
    // Dynamic interview questions and answers
    // ========================================================================

    /// Replace a project's question set with a freshly generated one.
    ///
    /// Prior questions (and their answers, via cascade) are removed first.
    pub fn replace_dynamic_questions(
        &self,
        project_id: &str,
        questions: &[DynamicQuestion],
    ) -> AppResult<()> {
        let conn = self.conn()?;
        conn.execute(
            "DELETE FROM dynamic_answers WHERE question_id IN
             (SELECT id FROM dynamic_questions WHERE project_id = ?1)",
            params![project_id],
        )?;
        conn.execute(
            "DELETE FROM dynamic_questions WHERE project_id = ?1",
            params![project_id],
        )?;
        for question in questions {
            conn.execute(
                "INSERT INTO dynamic_questions (id, project_id, category, question, position)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    question.id,
                    question.project_id,
                    question.category,
                    question.question,
                    question.position,
                ],
            )?;
        }
        Ok(())
    }

    /// Get a project's question set, ordered by position
    pub fn get_dynamic_questions(&self, project_id: &str) -> AppResult<Vec<DynamicQuestion>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, project_id, category, question, position
             FROM dynamic_questions WHERE project_id = ?1 ORDER BY position ASC",
        )?;
        let questions = stmt
            .query_map(params![project_id], |row| {
                Ok(DynamicQuestion {
                    id: row.get(0)?,
                    project_id: row.get(1)?,
                    category: row.get(2)?,
                    question: row.get(3)?,
                    position: row.get(4)?,
                })
            })?
            .filter_map(|r| r.ok())
            .collect();
        Ok(questions)
    }

    /// Insert or replace the answer to one dynamic question
    pub fn upsert_dynamic_answer(&self, question_id: &str, answer: &str) -> AppResult<()> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO dynamic_answers (question_id, answer)
             VALUES (?1, ?2)
             ON CONFLICT(question_id) DO UPDATE SET answer = excluded.answer",
            params![question_id, answer],
        )?;
        Ok(())
    }

    /// Get a project's questions joined with their answers, in question order
    pub fn get_answered_questions(&self, project_id: &str) -> AppResult<Vec<AnsweredQuestion>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT q.category, q.question, a.answer
             FROM dynamic_questions q
             LEFT JOIN dynamic_answers a ON a.question_id = q.id
             WHERE q.project_id = ?1 ORDER BY q.position ASC",
        )?;
        let rows = stmt
            .query_map(params![project_id], |row| {
                Ok(AnsweredQuestion {
                    category: row.get(0)?,
                    question: row.get(1)?,
                    answer: row.get(2)?,
                })
            })?
            .filter_map(|r| r.ok())
            .collect();
        Ok(rows)
    }

    // ========================================================================
    // Draft sections
    // ========================================================================

    /// Create or replace one draft section by (project, key)
    pub fn upsert_section(&self, section: &DraftSection) -> AppResult<()> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO draft_sections (project_id, section_key, content, updated_at)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(project_id, section_key)
             DO UPDATE SET content = excluded.content, updated_at = excluded.updated_at",
            params![
                section.project_id,
                section.key.as_str(),
                section.content,
                section.updated_at,
            ],
        )?;
        Ok(())
    }

    /// Get a project's draft sections in canonical section order.
    ///
    /// Rows with a key outside the fixed enumeration are ignored.
    pub fn get_sections(&self, project_id: &str) -> AppResult<Vec<DraftSection>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT project_id, section_key, content, updated_at
             FROM draft_sections WHERE project_id = ?1",
        )?;
        let mut sections: Vec<DraftSection> = stmt
            .query_map(params![project_id], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                ))
            })?
            .filter_map(|r| r.ok())
            .filter_map(|(project_id, key, content, updated_at)| {
                SectionKey::parse(&key).map(|key| DraftSection {
                    project_id,
                    key,
                    content,
                    updated_at,
                })
            })
            .collect();

        let rank = |key: SectionKey| {
            SectionKey::ALL
                .iter()
                .position(|k| *k == key)
                .unwrap_or(SectionKey::ALL.len())
        };
        sections.sort_by_key(|s| rank(s.key));
        Ok(sections)
    }

    /// Get a project's sections as a key-to-content map
    pub fn get_section_map(&self, project_id: &str) -> AppResult<HashMap<SectionKey, String>> {
        Ok(self
            .get_sections(project_id)?
            .into_iter()
            .map(|s| (s.key, s.content))
            .collect())
    }

    // ========================================================================
    // Quality issues
    // ========================================================================

    /// Replace a project's issue set wholesale.
    ///
    /// Delete-all-then-insert-all without a transaction: two concurrent
    /// checks for the same project may interleave. Accepted for a
    /// single-user-editing-at-a-time tool.
    pub fn replace_issues(&self, project_id: &str, issues: &[QualityIssue]) -> AppResult<()> {
        let conn = self.conn()?;
        conn.execute(
            "DELETE FROM quality_issues WHERE project_id = ?1",
            params![project_id],
        )?;
        for (position, issue) in issues.iter().enumerate() {
            conn.execute(
                "INSERT INTO quality_issues (id, project_id, issue_type, severity, message,
                 location, position)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    uuid::Uuid::new_v4().to_string(),
                    project_id,
                    issue.issue_type.as_str(),
                    issue.severity.as_str(),
                    issue.message,
                    issue.location,
                    position as i64,
                ],
            )?;
        }
        Ok(())
    }

    /// Get a project's issues in stored order.
    ///
    /// Rows whose type or severity no longer parses are skipped.
    pub fn get_issues(&self, project_id: &str) -> AppResult<Vec<QualityIssue>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT issue_type, severity, message, location
             FROM quality_issues WHERE project_id = ?1 ORDER BY position ASC",
        )?;
        let issues = stmt
            .query_map(params![project_id], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, Option<String>>(3)?,
                ))
            })?
            .filter_map(|r| r.ok())
            .filter_map(|(issue_type, severity, message, location)| {
                let issue_type = IssueType::parse(&issue_type)?;
                let severity = IssueSeverity::parse(&severity)?;
                Some(QualityIssue {
                    issue_type,
                    severity,
                    message,
                    location,
                })
            })
            .collect();
        Ok(issues)
    }

    // ========================================================================
    // Usage records
    // ========================================================================

    /// Insert one usage record
    pub fn insert_usage_record(&self, record: &UsageRecord) -> AppResult<()> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO usage_records (id, project_id, operation, model, prompt_tokens,
             completion_tokens, total_tokens, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                record.id,
                record.project_id,
                record.operation,
                record.model,
                record.prompt_tokens,
                record.completion_tokens,
                record.total_tokens,
                record.created_at,
            ],
        )?;
        Ok(())
    }

    /// List a project's usage records in insertion order
    pub fn list_usage_records(&self, project_id: &str) -> AppResult<Vec<UsageRecord>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, project_id, operation, model, prompt_tokens, completion_tokens,
             total_tokens, created_at
             FROM usage_records WHERE project_id = ?1 ORDER BY rowid ASC",
        )?;
        let records = stmt
            .query_map(params![project_id], |row| {
                Ok(UsageRecord {
                    id: row.get(0)?,
                    project_id: row.get(1)?,
                    operation: row.get(2)?,
                    model: row.get(3)?,
                    prompt_tokens: row.get(4)?,
                    completion_tokens: row.get(5)?,
                    total_tokens: row.get(6)?,
                    created_at: row.get(7)?,
                })
            })?
            .filter_map(|r| r.ok())
            .collect();
        Ok(records)
    }
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database").finish()
    }
}

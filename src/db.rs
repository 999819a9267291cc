//! Database module
//!
//! Persistence for users, postings, skills, résumés and applications.

mod schema;

pub use schema::*;

use crate::validation;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Arc, Mutex};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("{0} not found: {1}")]
    NotFound(&'static str, String),
    #[error("Identifier conflict in {0} after retry")]
    IdConflict(&'static str),
}

pub type DbResult<T> = Result<T, DbError>;

/// Thread-safe database handle
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open or create database at the given path
    pub fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        let conn = Connection::open(path)?;
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.run_migrations()?;
        Ok(db)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> DbResult<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.run_migrations()?;
        Ok(db)
    }

    fn run_migrations(&self) -> DbResult<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    /// Allocate the next prefix-coded identifier for `table`.
    ///
    /// Reads the current maximum under the connection lock. Length-aware
    /// ordering keeps `JOB1000` above `JOB999`.
    fn allocate_id(conn: &Connection, table: &str, prefix: &str) -> DbResult<String> {
        let last: Option<String> = conn
            .query_row(
                &format!("SELECT id FROM {table} ORDER BY length(id) DESC, id DESC LIMIT 1"),
                [],
                |row| row.get(0),
            )
            .optional()?;
        Ok(validation::next_sequence_id(prefix, last.as_deref()))
    }

    /// Insert a row with a freshly allocated sequence id.
    ///
    /// A UNIQUE violation on the first attempt triggers one retry with a
    /// fresh max-read; a second violation escalates to `IdConflict` rather
    /// than silently reusing another row's id.
    fn insert_with_id<F>(&self, table: &'static str, prefix: &str, insert: F) -> DbResult<String>
    where
        F: Fn(&Connection, &str) -> rusqlite::Result<usize>,
    {
        let conn = self.conn.lock().unwrap();
        for attempt in 0..2 {
            let id = Self::allocate_id(&conn, table, prefix)?;
            match insert(&conn, &id) {
                Ok(_) => return Ok(id),
                Err(err) if is_constraint_violation(&err) && attempt == 0 => {
                    tracing::warn!(table, id = %id, "id conflict on insert, retrying with fresh read");
                }
                Err(err) => return Err(err.into()),
            }
        }
        Err(DbError::IdConflict(table))
    }

    // ==================== Users & profiles ====================

    pub fn find_user_by_channel(&self, channel: &str) -> DbResult<Option<User>> {
        let conn = self.conn.lock().unwrap();
        conn.query_row(
            "SELECT id, name, channel, role, created_at FROM users WHERE channel = ?1",
            params![channel],
            |row| {
                Ok(User {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    channel: row.get(2)?,
                    role: parse_role(&row.get::<_, String>(3)?),
                    created_at: parse_datetime(&row.get::<_, String>(4)?),
                })
            },
        )
        .optional()
        .map_err(DbError::from)
    }

    pub fn create_user(&self, name: &str, channel: &str, role: Role) -> DbResult<User> {
        let now = Utc::now();
        let id = self.insert_with_id("users", "USR", |conn, id| {
            conn.execute(
                "INSERT INTO users (id, name, channel, role, created_at) VALUES (?1, ?2, ?3, ?4, ?5)",
                params![id, name, channel, role.to_string(), now.to_rfc3339()],
            )
        })?;
        Ok(User {
            id,
            name: name.to_string(),
            channel: channel.to_string(),
            role,
            created_at: now,
        })
    }

    /// Create a user for `channel`, or refresh the existing row's name and
    /// role. A pre-existing row means an earlier registration stopped after
    /// the user insert; reusing it keeps the channel unique.
    pub fn upsert_user_by_channel(&self, name: &str, channel: &str, role: Role) -> DbResult<User> {
        if let Some(existing) = self.find_user_by_channel(channel)? {
            let conn = self.conn.lock().unwrap();
            conn.execute(
                "UPDATE users SET name = ?1, role = ?2 WHERE id = ?3",
                params![name, role.to_string(), existing.id],
            )?;
            return Ok(User {
                name: name.to_string(),
                role,
                ..existing
            });
        }
        self.create_user(name, channel, role)
    }

    pub fn create_job_seeker_profile(
        &self,
        user_id: &str,
        address: &str,
        phone: Option<&str>,
    ) -> DbResult<String> {
        self.insert_with_id("job_seekers", "JSK", |conn, id| {
            conn.execute(
                "INSERT INTO job_seekers (id, user_id, address, phone) VALUES (?1, ?2, ?3, ?4)",
                params![id, user_id, address, phone],
            )
        })
    }

    pub fn create_company_profile(
        &self,
        user_id: &str,
        company_name: &str,
        address: &str,
    ) -> DbResult<String> {
        self.insert_with_id("companies", "CMP", |conn, id| {
            conn.execute(
                "INSERT INTO companies (id, user_id, company_name, address) VALUES (?1, ?2, ?3, ?4)",
                params![id, user_id, company_name, address],
            )
        })
    }

    pub fn job_seeker_id(&self, user_id: &str) -> DbResult<Option<String>> {
        let conn = self.conn.lock().unwrap();
        conn.query_row(
            "SELECT id FROM job_seekers WHERE user_id = ?1",
            params![user_id],
            |row| row.get(0),
        )
        .optional()
        .map_err(DbError::from)
    }

    pub fn company_id(&self, user_id: &str) -> DbResult<Option<String>> {
        let conn = self.conn.lock().unwrap();
        conn.query_row(
            "SELECT id FROM companies WHERE user_id = ?1",
            params![user_id],
            |row| row.get(0),
        )
        .optional()
        .map_err(DbError::from)
    }

    // ==================== Postings ====================

    pub fn active_postings(&self) -> DbResult<Vec<PostingSummary>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT p.id, p.position, c.company_name, p.location, p.salary_min, p.salary_max
             FROM job_postings p
             JOIN companies c ON p.company_id = c.id
             WHERE p.status = 'active'
             ORDER BY p.created_at DESC",
        )?;
        let rows = stmt.query_map([], posting_summary_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(DbError::from)
    }

    pub fn postings_by_skill(&self, skill: &str) -> DbResult<Vec<PostingSummary>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT DISTINCT p.id, p.position, c.company_name, p.location, p.salary_min, p.salary_max
             FROM job_postings p
             JOIN companies c ON p.company_id = c.id
             JOIN posting_skills ps ON p.id = ps.posting_id
             JOIN skills s ON ps.skill_id = s.id
             WHERE p.status = 'active' AND s.name LIKE ?1
             ORDER BY p.created_at DESC",
        )?;
        let pattern = format!("%{skill}%");
        let rows = stmt.query_map(params![pattern], posting_summary_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(DbError::from)
    }

    pub fn posting_detail(&self, posting_id: &str) -> DbResult<Option<PostingDetail>> {
        let conn = self.conn.lock().unwrap();
        let detail = conn
            .query_row(
                "SELECT p.id, p.position, p.description, p.location, p.employment_type,
                        p.salary_min, p.salary_max, p.status, c.company_name, c.address
                 FROM job_postings p
                 JOIN companies c ON p.company_id = c.id
                 WHERE p.id = ?1",
                params![posting_id],
                |row| {
                    Ok(PostingDetail {
                        id: row.get(0)?,
                        position: row.get(1)?,
                        description: row.get(2)?,
                        location: row.get(3)?,
                        employment_type: row.get(4)?,
                        salary_min: row.get(5)?,
                        salary_max: row.get(6)?,
                        status: parse_posting_status(&row.get::<_, String>(7)?),
                        company_name: row.get(8)?,
                        company_address: row.get(9)?,
                        skills: vec![],
                    })
                },
            )
            .optional()?;

        let Some(mut detail) = detail else {
            return Ok(None);
        };

        let mut stmt = conn.prepare(
            "SELECT s.name FROM posting_skills ps
             JOIN skills s ON ps.skill_id = s.id
             WHERE ps.posting_id = ?1
             ORDER BY s.name",
        )?;
        let skills = stmt.query_map(params![posting_id], |row| row.get(0))?;
        detail.skills = skills.collect::<Result<Vec<_>, _>>()?;
        Ok(Some(detail))
    }

    pub fn create_posting(&self, company_id: &str, draft: &PostingDraft) -> DbResult<String> {
        let now = Utc::now().to_rfc3339();
        self.insert_with_id("job_postings", "JOB", |conn, id| {
            conn.execute(
                "INSERT INTO job_postings
                 (id, company_id, position, description, location, status, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, 'active', ?6, ?6)",
                params![id, company_id, draft.position, draft.description, draft.location, now],
            )
        })
    }

    /// Link resolved skills to a posting. Callers deduplicate the id list;
    /// each link gets its own sequence id.
    pub fn link_posting_skills(&self, posting_id: &str, skill_ids: &[String]) -> DbResult<()> {
        for skill_id in skill_ids {
            self.insert_with_id("posting_skills", "PSK", |conn, id| {
                conn.execute(
                    "INSERT INTO posting_skills (id, posting_id, skill_id) VALUES (?1, ?2, ?3)",
                    params![id, posting_id, skill_id],
                )
            })?;
        }
        Ok(())
    }

    pub fn company_postings(&self, company_id: &str) -> DbResult<Vec<CompanyPostingRow>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT p.id, p.position, p.status,
                    (SELECT COUNT(*) FROM applications a WHERE a.posting_id = p.id)
             FROM job_postings p
             WHERE p.company_id = ?1
             ORDER BY p.created_at DESC",
        )?;
        let rows = stmt.query_map(params![company_id], |row| {
            Ok(CompanyPostingRow {
                id: row.get(0)?,
                position: row.get(1)?,
                status: parse_posting_status(&row.get::<_, String>(2)?),
                applicant_count: row.get(3)?,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(DbError::from)
    }

    pub fn set_posting_status(&self, posting_id: &str, status: PostingStatus) -> DbResult<()> {
        let conn = self.conn.lock().unwrap();
        let updated = conn.execute(
            "UPDATE job_postings SET status = ?1, updated_at = ?2 WHERE id = ?3",
            params![status.to_string(), Utc::now().to_rfc3339(), posting_id],
        )?;
        if updated == 0 {
            return Err(DbError::NotFound("posting", posting_id.to_string()));
        }
        Ok(())
    }

    /// Owning company of a posting, for command authorization.
    pub fn posting_company(&self, posting_id: &str) -> DbResult<Option<String>> {
        let conn = self.conn.lock().unwrap();
        conn.query_row(
            "SELECT company_id FROM job_postings WHERE id = ?1",
            params![posting_id],
            |row| row.get(0),
        )
        .optional()
        .map_err(DbError::from)
    }

    /// Owning company of an application, via its posting.
    pub fn application_company(&self, application_id: &str) -> DbResult<Option<String>> {
        let conn = self.conn.lock().unwrap();
        conn.query_row(
            "SELECT p.company_id FROM applications a
             JOIN job_postings p ON a.posting_id = p.id
             WHERE a.id = ?1",
            params![application_id],
            |row| row.get(0),
        )
        .optional()
        .map_err(DbError::from)
    }

    // ==================== Skills ====================

    /// Find a skill by case-insensitive name, creating it if absent.
    /// Case-insensitive find-or-create on the skill name.
    ///
    /// The connection lock is released between the lookup and the insert,
    /// so two writers can both miss the lookup; the loser hits the UNIQUE
    /// name index and falls back to the winner's row.
    pub fn find_or_create_skill(&self, name: &str) -> DbResult<String> {
        if let Some(id) = self.skill_by_name(name)? {
            return Ok(id);
        }
        let inserted = self.insert_with_id("skills", "SKL", |conn, id| {
            conn.execute(
                "INSERT INTO skills (id, name) VALUES (?1, ?2)",
                params![id, name],
            )
        });
        match inserted {
            Ok(id) => Ok(id),
            Err(DbError::Sqlite(err)) if is_constraint_violation(&err) => self
                .skill_by_name(name)?
                .ok_or(DbError::Sqlite(err)),
            Err(err) => Err(err),
        }
    }

    fn skill_by_name(&self, name: &str) -> DbResult<Option<String>> {
        let conn = self.conn.lock().unwrap();
        conn.query_row(
            "SELECT id FROM skills WHERE name = ?1 COLLATE NOCASE",
            params![name],
            |row| row.get(0),
        )
        .optional()
        .map_err(DbError::from)
    }

    // ==================== Résumés & applications ====================

    pub fn application_exists(&self, job_seeker_id: &str, posting_id: &str) -> DbResult<bool> {
        let conn = self.conn.lock().unwrap();
        conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM applications WHERE job_seeker_id = ?1 AND posting_id = ?2)",
            params![job_seeker_id, posting_id],
            |row| row.get(0),
        )
        .map_err(DbError::from)
    }

    /// At most one résumé per job seeker: update the existing row if there
    /// is one, otherwise insert.
    pub fn upsert_resume(
        &self,
        job_seeker_id: &str,
        stored_name: &str,
        original_name: &str,
    ) -> DbResult<String> {
        let now = Utc::now().to_rfc3339();
        {
            let conn = self.conn.lock().unwrap();
            let existing: Option<String> = conn
                .query_row(
                    "SELECT id FROM resumes WHERE job_seeker_id = ?1",
                    params![job_seeker_id],
                    |row| row.get(0),
                )
                .optional()?;
            if let Some(id) = existing {
                conn.execute(
                    "UPDATE resumes SET stored_name = ?1, original_name = ?2, updated_at = ?3
                     WHERE id = ?4",
                    params![stored_name, original_name, now, id],
                )?;
                return Ok(id);
            }
        }
        self.insert_with_id("resumes", "CV", |conn, id| {
            conn.execute(
                "INSERT INTO resumes (id, job_seeker_id, stored_name, original_name, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
                params![id, job_seeker_id, stored_name, original_name, now],
            )
        })
    }

    pub fn create_application(
        &self,
        posting_id: &str,
        job_seeker_id: &str,
        resume_id: &str,
    ) -> DbResult<String> {
        let now = Utc::now().to_rfc3339();
        self.insert_with_id("applications", "APP", |conn, id| {
            conn.execute(
                "INSERT INTO applications
                 (id, posting_id, job_seeker_id, resume_id, status, applied_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, 'submitted', ?5, ?5)",
                params![id, posting_id, job_seeker_id, resume_id, now],
            )
        })
    }

    pub fn seeker_applications(&self, job_seeker_id: &str) -> DbResult<Vec<ApplicationStatusRow>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT a.id, p.position, c.company_name, a.status, a.applied_at
             FROM applications a
             JOIN job_postings p ON a.posting_id = p.id
             JOIN companies c ON p.company_id = c.id
             WHERE a.job_seeker_id = ?1
             ORDER BY a.applied_at DESC",
        )?;
        let rows = stmt.query_map(params![job_seeker_id], |row| {
            Ok(ApplicationStatusRow {
                id: row.get(0)?,
                position: row.get(1)?,
                company_name: row.get(2)?,
                status: parse_application_status(&row.get::<_, String>(3)?),
                applied_at: parse_datetime(&row.get::<_, String>(4)?),
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(DbError::from)
    }

    pub fn posting_applicants(&self, posting_id: &str) -> DbResult<Vec<ApplicantRow>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT a.id, u.name, js.address, js.phone, a.status, a.applied_at,
                    r.stored_name, r.original_name
             FROM applications a
             JOIN job_seekers js ON a.job_seeker_id = js.id
             JOIN users u ON js.user_id = u.id
             LEFT JOIN resumes r ON a.resume_id = r.id
             WHERE a.posting_id = ?1
             ORDER BY a.applied_at DESC",
        )?;
        let rows = stmt.query_map(params![posting_id], |row| {
            Ok(ApplicantRow {
                application_id: row.get(0)?,
                applicant_name: row.get(1)?,
                address: row.get(2)?,
                phone: row.get(3)?,
                status: parse_application_status(&row.get::<_, String>(4)?),
                applied_at: parse_datetime(&row.get::<_, String>(5)?),
                resume_stored_name: row.get(6)?,
                resume_original_name: row.get(7)?,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(DbError::from)
    }

    pub fn set_application_status(
        &self,
        application_id: &str,
        status: ApplicationStatus,
    ) -> DbResult<()> {
        let conn = self.conn.lock().unwrap();
        let updated = conn.execute(
            "UPDATE applications SET status = ?1, updated_at = ?2 WHERE id = ?3",
            params![status.to_string(), Utc::now().to_rfc3339(), application_id],
        )?;
        if updated == 0 {
            return Err(DbError::NotFound("application", application_id.to_string()));
        }
        Ok(())
    }

    /// Contact details for notifying an applicant about a status change.
    pub fn applicant_contact(&self, application_id: &str) -> DbResult<Option<ApplicantContact>> {
        let conn = self.conn.lock().unwrap();
        conn.query_row(
            "SELECT u.channel, u.name, p.position, c.company_name
             FROM applications a
             JOIN job_seekers js ON a.job_seeker_id = js.id
             JOIN users u ON js.user_id = u.id
             JOIN job_postings p ON a.posting_id = p.id
             JOIN companies c ON p.company_id = c.id
             WHERE a.id = ?1",
            params![application_id],
            |row| {
                Ok(ApplicantContact {
                    channel: row.get(0)?,
                    name: row.get(1)?,
                    position: row.get(2)?,
                    company_name: row.get(3)?,
                })
            },
        )
        .optional()
        .map_err(DbError::from)
    }
}

fn posting_summary_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<PostingSummary> {
    Ok(PostingSummary {
        id: row.get(0)?,
        position: row.get(1)?,
        company_name: row.get(2)?,
        location: row.get(3)?,
        salary_min: row.get(4)?,
        salary_max: row.get(5)?,
    })
}

fn is_constraint_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _) if e.code == rusqlite::ErrorCode::ConstraintViolation
    )
}

fn parse_datetime(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

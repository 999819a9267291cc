//! Database schema and row types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// SQL schema for initialization
pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    channel TEXT NOT NULL UNIQUE,
    role TEXT NOT NULL,
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS job_seekers (
    id TEXT PRIMARY KEY,
    user_id TEXT NOT NULL UNIQUE,
    address TEXT NOT NULL,
    phone TEXT,

    FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
);

CREATE TABLE IF NOT EXISTS companies (
    id TEXT PRIMARY KEY,
    user_id TEXT NOT NULL UNIQUE,
    company_name TEXT NOT NULL,
    address TEXT NOT NULL,

    FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
);

CREATE TABLE IF NOT EXISTS job_postings (
    id TEXT PRIMARY KEY,
    company_id TEXT NOT NULL,
    position TEXT NOT NULL,
    description TEXT NOT NULL,
    location TEXT,
    employment_type TEXT NOT NULL DEFAULT 'full_time',
    salary_min INTEGER,
    salary_max INTEGER,
    status TEXT NOT NULL DEFAULT 'active',
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,

    FOREIGN KEY (company_id) REFERENCES companies(id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_postings_status ON job_postings(status);
CREATE INDEX IF NOT EXISTS idx_postings_company ON job_postings(company_id);

CREATE TABLE IF NOT EXISTS skills (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL
);

CREATE UNIQUE INDEX IF NOT EXISTS idx_skills_name ON skills(name COLLATE NOCASE);

CREATE TABLE IF NOT EXISTS posting_skills (
    id TEXT PRIMARY KEY,
    posting_id TEXT NOT NULL,
    skill_id TEXT NOT NULL,

    UNIQUE (posting_id, skill_id),
    FOREIGN KEY (posting_id) REFERENCES job_postings(id) ON DELETE CASCADE,
    FOREIGN KEY (skill_id) REFERENCES skills(id) ON DELETE CASCADE
);

CREATE TABLE IF NOT EXISTS resumes (
    id TEXT PRIMARY KEY,
    job_seeker_id TEXT NOT NULL UNIQUE,
    stored_name TEXT NOT NULL,
    original_name TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,

    FOREIGN KEY (job_seeker_id) REFERENCES job_seekers(id) ON DELETE CASCADE
);

CREATE TABLE IF NOT EXISTS applications (
    id TEXT PRIMARY KEY,
    posting_id TEXT NOT NULL,
    job_seeker_id TEXT NOT NULL,
    resume_id TEXT NOT NULL,
    status TEXT NOT NULL DEFAULT 'submitted',
    applied_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,

    UNIQUE (posting_id, job_seeker_id),
    FOREIGN KEY (posting_id) REFERENCES job_postings(id) ON DELETE CASCADE,
    FOREIGN KEY (job_seeker_id) REFERENCES job_seekers(id) ON DELETE CASCADE,
    FOREIGN KEY (resume_id) REFERENCES resumes(id)
);

CREATE INDEX IF NOT EXISTS idx_applications_posting ON applications(posting_id);
CREATE INDEX IF NOT EXISTS idx_applications_seeker ON applications(job_seeker_id);
"#;

/// Role assigned at registration; immutable afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    JobSeeker,
    Employer,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::JobSeeker => write!(f, "job_seeker"),
            Role::Employer => write!(f, "employer"),
        }
    }
}

pub fn parse_role(s: &str) -> Role {
    match s {
        "employer" => Role::Employer,
        _ => Role::JobSeeker,
    }
}

/// Posting lifecycle: toggled only by explicit management commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostingStatus {
    Active,
    Closed,
}

impl fmt::Display for PostingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PostingStatus::Active => write!(f, "active"),
            PostingStatus::Closed => write!(f, "closed"),
        }
    }
}

pub fn parse_posting_status(s: &str) -> PostingStatus {
    match s {
        "closed" => PostingStatus::Closed,
        _ => PostingStatus::Active,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Submitted,
    InReview,
    Accepted,
    Rejected,
}

impl ApplicationStatus {
    /// Human-readable label for chat messages.
    pub fn label(self) -> &'static str {
        match self {
            ApplicationStatus::Submitted => "Submitted",
            ApplicationStatus::InReview => "In review",
            ApplicationStatus::Accepted => "Accepted",
            ApplicationStatus::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApplicationStatus::Submitted => write!(f, "submitted"),
            ApplicationStatus::InReview => write!(f, "in_review"),
            ApplicationStatus::Accepted => write!(f, "accepted"),
            ApplicationStatus::Rejected => write!(f, "rejected"),
        }
    }
}

pub fn parse_application_status(s: &str) -> ApplicationStatus {
    match s {
        "in_review" => ApplicationStatus::InReview,
        "accepted" => ApplicationStatus::Accepted,
        "rejected" => ApplicationStatus::Rejected,
        _ => ApplicationStatus::Submitted,
    }
}

/// User record: identity plus role. Profile details live in the
/// role-specific tables.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: String,
    pub name: String,
    pub channel: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// Fields collected step by step during the posting flow.
#[derive(Debug, Clone, PartialEq)]
pub struct PostingDraft {
    pub position: String,
    pub description: String,
    pub location: String,
}

/// One row of a seeker-facing posting listing.
#[derive(Debug, Clone, PartialEq)]
pub struct PostingSummary {
    pub id: String,
    pub position: String,
    pub company_name: String,
    pub location: Option<String>,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
}

/// Full posting detail with skills joined in.
#[derive(Debug, Clone, PartialEq)]
pub struct PostingDetail {
    pub id: String,
    pub position: String,
    pub description: String,
    pub location: Option<String>,
    pub employment_type: String,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    pub status: PostingStatus,
    pub company_name: String,
    pub company_address: String,
    pub skills: Vec<String>,
}

/// One row of an employer's own posting listing.
#[derive(Debug, Clone, PartialEq)]
pub struct CompanyPostingRow {
    pub id: String,
    pub position: String,
    pub status: PostingStatus,
    pub applicant_count: i64,
}

/// One applicant as seen by an employer, résumé metadata joined in.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplicantRow {
    pub application_id: String,
    pub applicant_name: String,
    pub address: String,
    pub phone: Option<String>,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
    pub resume_stored_name: Option<String>,
    pub resume_original_name: Option<String>,
}

/// One row of a seeker's own application status listing.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplicationStatusRow {
    pub id: String,
    pub position: String,
    pub company_name: String,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
}

/// Contact info used for best-effort applicant notifications.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplicantContact {
    pub channel: String,
    pub name: String,
    pub position: String,
    pub company_name: String,
}

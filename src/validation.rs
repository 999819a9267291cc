//! Stateless validation and formatting helpers
//!
//! Everything here is a pure predicate or formatter; no I/O, no session
//! access. The flow handlers call into this module so the rules stay in
//! one place.

/// Maximum accepted résumé size: 5 MiB.
pub const MAX_CV_BYTES: usize = 5 * 1024 * 1024;

/// MIME types accepted for résumé uploads.
const ALLOWED_CV_MIMES: &[&str] = &[
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

/// Check a document MIME type against the résumé whitelist.
pub fn is_allowed_cv_mime(mime: &str) -> bool {
    let mime = mime.trim().to_ascii_lowercase();
    // Some gateways append parameters ("application/pdf; name=cv.pdf").
    let essence = mime.split(';').next().unwrap_or("").trim().to_string();
    ALLOWED_CV_MIMES.contains(&essence.as_str())
}

/// Check a document byte length against the résumé size cap.
pub fn is_allowed_cv_size(len: usize) -> bool {
    len <= MAX_CV_BYTES
}

/// Split free-text skill input on commas, semicolons and newlines.
///
/// Tokens are trimmed and empties discarded; an empty result means the
/// input had no usable skill names and the caller should re-prompt.
pub fn parse_skills(input: &str) -> Vec<String> {
    input
        .split(|c| c == ',' || c == ';' || c == '\n')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Next identifier in a prefix-coded, zero-padded sequence.
///
/// `next_sequence_id("JOB", Some("JOB009"))` is `"JOB010"`. Padding is a
/// minimum of three digits and grows naturally past 999. A `last` value
/// that does not parse restarts the sequence at 1.
pub fn next_sequence_id(prefix: &str, last: Option<&str>) -> String {
    let next = last
        .and_then(|id| id.strip_prefix(prefix))
        .and_then(|n| n.parse::<u64>().ok())
        .map_or(1, |n| n + 1);
    format!("{prefix}{next:03}")
}

/// Generate a stored filename for an uploaded résumé.
///
/// Derived from the owning job seeker, the upload time and a short random
/// salt; the original extension is kept (lowercased) when present.
pub fn stored_cv_name(job_seeker_id: &str, original_name: &str) -> String {
    let stamp = chrono::Utc::now().format("%Y%m%d%H%M%S");
    let salt: String = uuid::Uuid::new_v4()
        .simple()
        .to_string()
        .chars()
        .take(8)
        .collect();
    match original_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| !ext.is_empty())
    {
        Some(ext) => format!("{job_seeker_id}_{stamp}_{salt}.{ext}"),
        None => format!("{job_seeker_id}_{stamp}_{salt}"),
    }
}

/// Format a salary range for display. Both bounds absent means the salary
/// is negotiable; a half-open range shows the known bound.
pub fn format_salary(min: Option<i64>, max: Option<i64>) -> String {
    match (min, max) {
        (Some(min), Some(max)) => {
            format!("Rp {} - Rp {}", group_thousands(min), group_thousands(max))
        }
        (Some(min), None) => format!("from Rp {}", group_thousands(min)),
        (None, Some(max)) => format!("up to Rp {}", group_thousands(max)),
        (None, None) => "Negotiable".to_string(),
    }
}

fn group_thousands(n: i64) -> String {
    let digits = n.abs().to_string();
    let mut out = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    if n < 0 {
        format!("-{out}")
    } else {
        out
    }
}

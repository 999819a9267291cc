//! Global employer commands
//!
//! Status-change commands work from any state (or none). Keywords accept
//! both the Indonesian forms users know and English equivalents.

use crate::db::{ApplicationStatus, PostingStatus};

#[derive(Debug, Clone, PartialEq)]
pub enum GlobalCommand {
    /// `terima APP001` etc.
    SetStatus {
        application_id: String,
        status: ApplicationStatus,
    },
    /// `tutup JOB001` / `aktifkan JOB001`.
    SetPosting {
        posting_id: String,
        status: PostingStatus,
    },
}

/// Parse a two-token status command, `None` if the text is anything else.
pub fn parse_global(text: &str) -> Option<GlobalCommand> {
    let mut tokens = text.split_whitespace();
    let keyword = tokens.next()?.to_ascii_lowercase();
    let id = tokens.next()?.to_ascii_uppercase();
    if tokens.next().is_some() {
        return None;
    }

    match keyword.as_str() {
        "terima" | "accept" => Some(GlobalCommand::SetStatus {
            application_id: id,
            status: ApplicationStatus::Accepted,
        }),
        "tolak" | "reject" => Some(GlobalCommand::SetStatus {
            application_id: id,
            status: ApplicationStatus::Rejected,
        }),
        "proses" | "review" => Some(GlobalCommand::SetStatus {
            application_id: id,
            status: ApplicationStatus::InReview,
        }),
        "tutup" | "close" => Some(GlobalCommand::SetPosting {
            posting_id: id,
            status: PostingStatus::Closed,
        }),
        "aktifkan" | "activate" => Some(GlobalCommand::SetPosting {
            posting_id: id,
            status: PostingStatus::Active,
        }),
        _ => None,
    }
}

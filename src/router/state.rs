//! Session states
//!
//! Each state carries the data gathered on the way in, so a session is a
//! single self-describing value: dropping it discards all partial input at
//! once, and a handler can only see fields its state actually has.

use crate::db::{ApplicantRow, CompanyPostingRow, PostingDraft, PostingSummary};

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    // Registration
    ChooseRole,
    SeekerName,
    SeekerAddress {
        name: String,
    },
    EmployerName,
    EmployerAddress {
        company_name: String,
    },

    // Job browsing and application
    /// Listing shown to the seeker, pinned so numeric picks stay stable
    /// even if new postings appear meanwhile.
    ChoosePosting {
        snapshot: Vec<PostingSummary>,
    },
    UploadCv {
        posting_id: String,
        job_seeker_id: String,
        position: String,
    },

    // Posting creation
    PostPosition,
    PostDescription {
        position: String,
    },
    PostLocation {
        position: String,
        description: String,
    },
    PostSkills {
        position: String,
        description: String,
        location: String,
    },
    PostConfirm {
        draft: PostingDraft,
        skill_ids: Vec<String>,
        skill_names: Vec<String>,
    },

    // Applicant management
    ChoosePostingForApplicants {
        snapshot: Vec<CompanyPostingRow>,
    },
    ChoosePostingForManage {
        snapshot: Vec<CompanyPostingRow>,
    },
    ChooseApplicant {
        snapshot: Vec<ApplicantRow>,
        position: String,
    },
}

impl SessionState {
    /// True for states an unregistered sender may hold.
    pub fn is_registration(&self) -> bool {
        matches!(
            self,
            SessionState::ChooseRole
                | SessionState::SeekerName
                | SessionState::SeekerAddress { .. }
                | SessionState::EmployerName
                | SessionState::EmployerAddress { .. }
        )
    }

    /// Stable name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            SessionState::ChooseRole => "reg_choose_role",
            SessionState::SeekerName => "reg_seeker_name",
            SessionState::SeekerAddress { .. } => "reg_seeker_address",
            SessionState::EmployerName => "reg_employer_name",
            SessionState::EmployerAddress { .. } => "reg_employer_address",
            SessionState::ChoosePosting { .. } => "choose_posting",
            SessionState::UploadCv { .. } => "upload_cv",
            SessionState::PostPosition => "post_position",
            SessionState::PostDescription { .. } => "post_description",
            SessionState::PostLocation { .. } => "post_location",
            SessionState::PostSkills { .. } => "post_skills",
            SessionState::PostConfirm { .. } => "post_confirm",
            SessionState::ChoosePostingForApplicants { .. } => "choose_posting_applicants",
            SessionState::ChoosePostingForManage { .. } => "choose_posting_manage",
            SessionState::ChooseApplicant { .. } => "choose_applicant",
        }
    }
}

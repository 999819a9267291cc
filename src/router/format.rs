//! Message rendering
//!
//! All user-facing copy lives here so the flow handlers stay about control
//! flow. Everything returns plain `String`s for `OutboundMessage::text`.

use crate::db::{
    ApplicantRow, ApplicationStatus, ApplicationStatusRow, CompanyPostingRow, PostingDetail,
    PostingDraft, PostingStatus, PostingSummary,
};
use crate::validation;

pub fn role_prompt() -> String {
    "Welcome to Lokerbot! 👋\n\nWho are you registering as?\n1. Job seeker\n2. Employer\n\nReply with 1 or 2.".to_string()
}

pub fn seeker_menu(name: &str) -> String {
    format!(
        "Hi {name}! What would you like to do?\n\n1. Browse jobs\n2. Check application status\n3. Update profile\n\nReply with a number, or type *filter <skill>* to search by skill.\nType *menu* anytime to come back here."
    )
}

pub fn employer_menu(name: &str) -> String {
    format!(
        "Hi {name}! What would you like to do?\n\n1. Post a new job\n2. View applicants\n3. Manage postings\n\nReply with a number. Type *menu* anytime to come back here."
    )
}

pub fn unknown_command() -> String {
    "Sorry, I didn't understand that. Type *menu* to see what I can do.".to_string()
}

pub fn recovery() -> String {
    "Something went off track, so I've reset our conversation. Type *menu* to start over.".to_string()
}

// ==================== Registration ====================

pub fn ask_seeker_name() -> String {
    "Great, let's set up your job seeker profile.\n\nWhat's your full name?".to_string()
}

pub fn ask_seeker_address(name: &str) -> String {
    format!("Nice to meet you, {name}! Where do you live? (city or full address)")
}

pub fn ask_company_name() -> String {
    "Great, let's set up your employer account.\n\nWhat's your company name?".to_string()
}

pub fn ask_company_address(company_name: &str) -> String {
    format!("Got it. Where is {company_name} located?")
}

pub fn registered_seeker(name: &str) -> String {
    format!(
        "You're all set, {name}! ✅\n\n{}",
        seeker_menu(name)
    )
}

pub fn registered_employer(name: &str) -> String {
    format!(
        "Your employer account is ready! ✅\n\n{}",
        employer_menu(name)
    )
}

pub fn invalid_role_choice() -> String {
    "Please reply with 1 (job seeker) or 2 (employer).".to_string()
}

pub fn empty_input_retry(what: &str) -> String {
    format!("That can't be empty. Please send your {what}.")
}

// ==================== Job browsing ====================

pub fn posting_list(postings: &[PostingSummary], filtered_by: Option<&str>) -> String {
    let mut out = match filtered_by {
        Some(skill) => format!("Openings matching *{skill}*:\n"),
        None => "Current openings:\n".to_string(),
    };
    for (i, p) in postings.iter().enumerate() {
        let location = p.location.as_deref().unwrap_or("Location not listed");
        out.push_str(&format!(
            "\n{}. *{}* at {}\n   📍 {} | 💰 {}\n   ID: {}\n",
            i + 1,
            p.position,
            p.company_name,
            location,
            validation::format_salary(p.salary_min, p.salary_max),
            p.id,
        ));
    }
    out.push_str("\nReply with a number or an ID to see details, or type *lamar <ID>* to apply right away.");
    out
}

pub fn no_postings(filtered_by: Option<&str>) -> String {
    match filtered_by {
        Some(skill) => format!("No openings match *{skill}* right now. Try another skill or type *1* for all openings."),
        None => "There are no open positions right now. Check back soon!".to_string(),
    }
}

pub fn posting_detail(detail: &PostingDetail, already_applied: bool) -> String {
    let location = detail.location.as_deref().unwrap_or("Not listed");
    let skills = if detail.skills.is_empty() {
        "Not listed".to_string()
    } else {
        detail.skills.join(", ")
    };
    let footer = if already_applied {
        "You've already applied for this position. Type *2* from the menu to check its status.".to_string()
    } else {
        format!("Type *lamar {}* to apply for this position.", detail.id)
    };
    format!(
        "*{}*\n{}\n\n📍 {}\n🧰 {}\n💼 {}\n💰 {}\n🛠 Skills: {}\n\n{}\n\n{}",
        detail.position,
        detail.company_name,
        location,
        detail.company_address,
        detail.employment_type.replace('_', " "),
        validation::format_salary(detail.salary_min, detail.salary_max),
        skills,
        detail.description,
        footer,
    )
}

pub fn posting_pick_invalid() -> String {
    "I couldn't find that posting. Reply with one of the listed numbers or IDs.".to_string()
}

pub fn ask_cv(position: &str) -> String {
    format!("Send your CV as a document (PDF or Word, max 5 MB) to apply for *{position}*.")
}

pub fn cv_needs_posting() -> String {
    "To send a CV, first pick a job to apply for: type *lamar <posting ID>*, then send the file. Type *1* from the menu to browse openings.".to_string()
}

pub fn cv_wrong_type() -> String {
    "That file type isn't accepted. Please send your CV as PDF, DOC or DOCX.".to_string()
}

pub fn cv_too_large() -> String {
    "That file is over the 5 MB limit. Please send a smaller CV.".to_string()
}

pub fn cv_expected_document() -> String {
    "Please send your CV as a *document* attachment (PDF or Word), not a photo or text.".to_string()
}

pub fn upload_failed() -> String {
    "Something went wrong saving your CV. Please send it again.".to_string()
}

pub fn applied(position: &str) -> String {
    format!("Your application for *{position}* has been submitted! 🎉\n\nWe'll message you here when the employer responds. Type *menu* for more options.")
}

pub fn already_applied(position: &str) -> String {
    format!("You've already applied for *{position}*. Type *2* from the menu to check your application status.")
}

pub fn application_status_list(rows: &[ApplicationStatusRow]) -> String {
    let mut out = "Your applications:\n".to_string();
    for row in rows {
        let icon = match row.status {
            ApplicationStatus::Submitted => "📨",
            ApplicationStatus::InReview => "⏳",
            ApplicationStatus::Accepted => "✅",
            ApplicationStatus::Rejected => "❌",
        };
        out.push_str(&format!(
            "\n{} *{}* at {}\n   Status: {} | Applied: {}\n",
            icon,
            row.position,
            row.company_name,
            row.status.label(),
            row.applied_at.format("%d %b %Y"),
        ));
    }
    out
}

pub fn no_applications() -> String {
    "You haven't applied for anything yet. Type *1* from the menu to browse openings.".to_string()
}

pub fn profile_update_unavailable() -> String {
    "Profile updates aren't available yet. They're coming soon!".to_string()
}

// ==================== Posting flow ====================

pub fn ask_position() -> String {
    "Let's post a new job. 📝\n\nWhat's the position title?".to_string()
}

pub fn ask_description(position: &str) -> String {
    format!("*{position}* — sounds good. Now describe the role (responsibilities, requirements).")
}

pub fn ask_location() -> String {
    "Where is this position based? (city, or \"Remote\")".to_string()
}

pub fn ask_skills() -> String {
    "Which skills are required? Separate them with commas, e.g. *Go, SQL, Docker*.".to_string()
}

pub fn skills_empty_retry() -> String {
    "I couldn't read any skills from that. Send them separated by commas, e.g. *Go, SQL*.".to_string()
}

pub fn confirm_summary(draft: &PostingDraft, skill_names: &[String]) -> String {
    let description: String = if draft.description.chars().count() > 100 {
        let truncated: String = draft.description.chars().take(100).collect();
        format!("{truncated}…")
    } else {
        draft.description.clone()
    };
    format!(
        "Here's your posting:\n\n*{}*\n📍 {}\n🛠 {}\n\n{}\n\nPublish it? Reply *yes* to publish or anything else to cancel.",
        draft.position,
        draft.location,
        skill_names.join(", "),
        description,
    )
}

pub fn posting_published(posting_id: &str, position: &str) -> String {
    format!("Your posting *{position}* is live! 🚀\nID: {posting_id}\n\nApplicants will show up under *2. View applicants*.")
}

pub fn posting_cancelled() -> String {
    "Posting discarded. Type *menu* when you want to start again.".to_string()
}

// ==================== Applicant management ====================

pub fn company_posting_list(rows: &[CompanyPostingRow], for_applicants: bool) -> String {
    let mut out = if for_applicants {
        "Which posting's applicants do you want to see?\n".to_string()
    } else {
        "Your postings:\n".to_string()
    };
    for (i, row) in rows.iter().enumerate() {
        let icon = match row.status {
            PostingStatus::Active => "🟢",
            PostingStatus::Closed => "🔴",
        };
        out.push_str(&format!(
            "\n{}. {} *{}* — {} applicant(s)\n   ID: {}\n",
            i + 1,
            icon,
            row.position,
            row.applicant_count,
            row.id,
        ));
    }
    if for_applicants {
        out.push_str("\nReply with a number or an ID.");
    } else {
        out.push_str("\nType *tutup <ID>* to close a posting or *aktifkan <ID>* to reopen it.");
    }
    out
}

pub fn no_company_postings() -> String {
    "You haven't posted any jobs yet. Type *1* from the menu to create one.".to_string()
}

pub fn applicant_list(rows: &[ApplicantRow], position: &str) -> String {
    let mut out = format!("Applicants for *{position}*:\n");
    for (i, row) in rows.iter().enumerate() {
        let phone = row.phone.as_deref().unwrap_or("-");
        out.push_str(&format!(
            "\n{}. *{}* ({})\n   📍 {} | 📞 {}\n   Applied: {} | ID: {}\n",
            i + 1,
            row.applicant_name,
            row.status.label(),
            row.address,
            phone,
            row.applied_at.format("%d %b %Y"),
            row.application_id,
        ));
    }
    out.push_str("\nReply with a number or ID to get the applicant's CV.\nUse *terima <ID>*, *tolak <ID>* or *proses <ID>* to update a status.");
    out
}

pub fn no_applicants(position: &str) -> String {
    format!("No applications for *{position}* yet.")
}

pub fn applicant_pick_invalid() -> String {
    "I couldn't find that applicant. Reply with one of the listed numbers or IDs.".to_string()
}

pub fn applicant_no_resume(name: &str) -> String {
    format!("{name} has no CV on file.")
}

pub fn manage_posting_detail(row: &CompanyPostingRow) -> String {
    let (icon, toggle) = match row.status {
        PostingStatus::Active => ("🟢", format!("*tutup {}* to close it", row.id)),
        PostingStatus::Closed => ("🔴", format!("*aktifkan {}* to reopen it", row.id)),
    };
    format!(
        "{} *{}* ({})\n{} applicant(s).\n\nType {}.",
        icon,
        row.position,
        row.id,
        row.applicant_count,
        toggle,
    )
}

pub fn unknown_application_id(id: &str) -> String {
    format!("I couldn't find application *{id}* among your postings.")
}

pub fn unknown_posting_id(id: &str) -> String {
    format!("I couldn't find posting *{id}* in your account.")
}

pub fn status_updated(application_id: &str, status: ApplicationStatus) -> String {
    format!("Application {application_id} is now *{}*.", status.label())
}

pub fn posting_status_updated(posting_id: &str, status: PostingStatus) -> String {
    match status {
        PostingStatus::Active => format!("Posting {posting_id} is open again. 🟢"),
        PostingStatus::Closed => format!("Posting {posting_id} is now closed. 🔴"),
    }
}

pub fn applicant_notification(name: &str, position: &str, company: &str, status: ApplicationStatus) -> String {
    let line = match status {
        ApplicationStatus::Accepted => "Congratulations, you've been *accepted*! 🎉 The employer may contact you directly.",
        ApplicationStatus::Rejected => "Unfortunately your application was *not successful* this time. Keep going! 💪",
        ApplicationStatus::InReview => "Your application is now *in review*. ⏳",
        ApplicationStatus::Submitted => "Your application has been received. 📨",
    };
    format!("Hi {name}, an update on your application for *{position}* at {company}:\n\n{line}")
}

//! Applicant management flow (employer side)
//!
//! Listing applicants and fetching CVs go through pinned snapshots like
//! the seeker's job list. Status commands are global: they work from any
//! state, but only against postings and applications the employer owns.

use super::commands::GlobalCommand;
use super::format;
use super::jobs::pick_id;
use super::state::SessionState;
use super::{FlowResult, FlowRouter};
use crate::identity::Identity;
use crate::transport::OutboundMessage;

/// "View applicants": list the employer's postings and await a pick.
pub fn applicants_menu(router: &FlowRouter, identity: &Identity, sender: &str) -> FlowResult {
    let rows = router.db.company_postings(&identity.profile_id)?;
    if rows.is_empty() {
        return Ok(vec![OutboundMessage::text(sender, format::no_company_postings())]);
    }
    let text = format::company_posting_list(&rows, true);
    router.sessions.set(
        sender,
        SessionState::ChoosePostingForApplicants { snapshot: rows },
    );
    Ok(vec![OutboundMessage::text(sender, text)])
}

/// "Manage postings": same listing, toggle instructions instead.
pub fn manage_menu(router: &FlowRouter, identity: &Identity, sender: &str) -> FlowResult {
    let rows = router.db.company_postings(&identity.profile_id)?;
    if rows.is_empty() {
        return Ok(vec![OutboundMessage::text(sender, format::no_company_postings())]);
    }
    let text = format::company_posting_list(&rows, false);
    router.sessions.set(
        sender,
        SessionState::ChoosePostingForManage { snapshot: rows },
    );
    Ok(vec![OutboundMessage::text(sender, text)])
}

pub fn choose_for_applicants(
    router: &FlowRouter,
    sender: &str,
    text: &str,
    snapshot: &[crate::db::CompanyPostingRow],
) -> FlowResult {
    let Some(index) = pick_id(snapshot, text, |row| &row.id) else {
        return Ok(vec![OutboundMessage::text(sender, format::posting_pick_invalid())]);
    };
    let picked = &snapshot[index];

    let applicants = router.db.posting_applicants(&picked.id)?;
    if applicants.is_empty() {
        router.sessions.clear(sender);
        return Ok(vec![OutboundMessage::text(
            sender,
            format::no_applicants(&picked.position),
        )]);
    }

    let listing = format::applicant_list(&applicants, &picked.position);
    router.sessions.set(
        sender,
        SessionState::ChooseApplicant {
            snapshot: applicants,
            position: picked.position.clone(),
        },
    );
    Ok(vec![OutboundMessage::text(sender, listing)])
}

pub fn choose_for_manage(
    router: &FlowRouter,
    sender: &str,
    text: &str,
    snapshot: &[crate::db::CompanyPostingRow],
) -> FlowResult {
    let Some(index) = pick_id(snapshot, text, |row| &row.id) else {
        return Ok(vec![OutboundMessage::text(sender, format::posting_pick_invalid())]);
    };
    router.sessions.clear(sender);
    Ok(vec![OutboundMessage::text(
        sender,
        format::manage_posting_detail(&snapshot[index]),
    )])
}

/// Deliver a picked applicant's CV. Single-shot: the session always ends
/// here, whatever the outcome.
pub async fn choose_applicant(
    router: &FlowRouter,
    sender: &str,
    text: &str,
    snapshot: &[crate::db::ApplicantRow],
    position: &str,
) -> FlowResult {
    let Some(index) = pick_id(snapshot, text, |row| &row.application_id) else {
        return Ok(vec![OutboundMessage::text(sender, format::applicant_pick_invalid())]);
    };
    let picked = &snapshot[index];
    router.sessions.clear(sender);

    let (Some(stored), Some(original)) = (
        picked.resume_stored_name.as_deref(),
        picked.resume_original_name.as_deref(),
    ) else {
        return Ok(vec![OutboundMessage::text(
            sender,
            format::applicant_no_resume(&picked.applicant_name),
        )]);
    };

    let data = match router.files.get(stored).await {
        Ok(data) => data,
        Err(err) => {
            tracing::warn!(stored, error = %err, "stored CV unreadable");
            return Ok(vec![OutboundMessage::text(
                sender,
                format::applicant_no_resume(&picked.applicant_name),
            )]);
        }
    };

    let mime = mime_guess::from_path(original).first_or_octet_stream();
    Ok(vec![
        OutboundMessage::text(
            sender,
            format!(
                "CV of *{}* for *{position}* (application {}):",
                picked.applicant_name, picked.application_id
            ),
        ),
        OutboundMessage::document(sender, original, mime.essence_str(), data),
    ])
}

/// Global status commands: `terima/tolak/proses <APP id>` and
/// `tutup/aktifkan <JOB id>`. Ownership is checked before anything changes,
/// and an accepted change notifies the applicant on their own channel.
pub async fn handle_global(
    router: &FlowRouter,
    identity: &Identity,
    sender: &str,
    command: GlobalCommand,
) -> FlowResult {
    match command {
        GlobalCommand::SetStatus { application_id, status } => {
            let owner = router.db.application_company(&application_id)?;
            if owner.as_deref() != Some(identity.profile_id.as_str()) {
                return Ok(vec![OutboundMessage::text(
                    sender,
                    format::unknown_application_id(&application_id),
                )]);
            }
            router.db.set_application_status(&application_id, status)?;

            let mut replies = vec![OutboundMessage::text(
                sender,
                format::status_updated(&application_id, status),
            )];
            if let Some(contact) = router.db.applicant_contact(&application_id)? {
                replies.push(OutboundMessage::text(
                    contact.channel.clone(),
                    format::applicant_notification(
                        &contact.name,
                        &contact.position,
                        &contact.company_name,
                        status,
                    ),
                ));
            }
            Ok(replies)
        }
        GlobalCommand::SetPosting { posting_id, status } => {
            let owner = router.db.posting_company(&posting_id)?;
            if owner.as_deref() != Some(identity.profile_id.as_str()) {
                return Ok(vec![OutboundMessage::text(
                    sender,
                    format::unknown_posting_id(&posting_id),
                )]);
            }
            router.db.set_posting_status(&posting_id, status)?;
            Ok(vec![OutboundMessage::text(
                sender,
                format::posting_status_updated(&posting_id, status),
            )])
        }
    }
}

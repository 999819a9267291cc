//! CV upload step
//!
//! Terminal step of the application flow. Validation failures keep the
//! session alive so the seeker can just resend; only a stored file plus a
//! recorded application counts as success.

use super::format;
use super::state::SessionState;
use super::{FlowResult, FlowRouter};
use crate::identity::Identity;
use crate::transport::OutboundMessage;
use crate::validation;

pub async fn handle_document(
    router: &FlowRouter,
    identity: &Identity,
    sender: &str,
    filename: &str,
    mime: &str,
    data: Vec<u8>,
) -> FlowResult {
    let Some(SessionState::UploadCv { posting_id, job_seeker_id, position }) =
        router.sessions.get(sender)
    else {
        // A document with no pending application gets pointed at the
        // apply command instead of the generic fallback.
        return Ok(vec![OutboundMessage::text(sender, format::cv_needs_posting())]);
    };

    if !validation::is_allowed_cv_mime(mime) {
        return Ok(vec![OutboundMessage::text(sender, format::cv_wrong_type())]);
    }
    if !validation::is_allowed_cv_size(data.len()) {
        return Ok(vec![OutboundMessage::text(sender, format::cv_too_large())]);
    }

    // Re-check: the duplicate guard at selection time can be outrun by a
    // second chat session for the same seeker.
    if router.db.application_exists(&job_seeker_id, &posting_id)? {
        router.sessions.clear(sender);
        return Ok(vec![OutboundMessage::text(
            sender,
            format::already_applied(&position),
        )]);
    }

    // Storage or persistence failure keeps the session so the seeker can
    // just resend; a stored file without an application row is harmless
    // (the next attempt overwrites the resume metadata).
    let stored_name = validation::stored_cv_name(&job_seeker_id, filename);
    if let Err(err) = record_application(router, &posting_id, &job_seeker_id, &stored_name, filename, &data).await {
        tracing::error!(sender, posting = %posting_id, error = %err, "CV submission failed");
        return Ok(vec![OutboundMessage::text(sender, format::upload_failed())]);
    }
    router.sessions.clear(sender);

    tracing::info!(
        sender,
        seeker = %identity.profile_id,
        posting = %posting_id,
        "application submitted"
    );
    Ok(vec![OutboundMessage::text(sender, format::applied(&position))])
}

async fn record_application(
    router: &FlowRouter,
    posting_id: &str,
    job_seeker_id: &str,
    stored_name: &str,
    original_name: &str,
    data: &[u8],
) -> Result<(), super::FlowError> {
    router.files.put(stored_name, data).await?;
    let resume_id = router.db.upsert_resume(job_seeker_id, stored_name, original_name)?;
    router.db.create_application(posting_id, job_seeker_id, &resume_id)?;
    Ok(())
}

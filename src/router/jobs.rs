//! Job browsing flow (seeker side)
//!
//! Listing pins a snapshot into the session so numeric picks refer to what
//! the seeker actually saw. Picking shows a fresh detail read and ends the
//! flow; only the explicit `lamar <id>` command arms the CV upload step.

use super::format;
use super::state::SessionState;
use super::{FlowResult, FlowRouter};
use crate::db::{PostingStatus, PostingSummary};
use crate::identity::Identity;
use crate::transport::OutboundMessage;

/// List all active postings and pin the snapshot.
pub fn menu(router: &FlowRouter, sender: &str) -> FlowResult {
    let postings = router.db.active_postings()?;
    Ok(vec![listing_reply(router, sender, postings, None)])
}

/// List active postings matching a skill substring.
pub fn filter(router: &FlowRouter, sender: &str, skill: &str) -> FlowResult {
    if skill.is_empty() {
        return menu(router, sender);
    }
    let postings = router.db.postings_by_skill(skill)?;
    Ok(vec![listing_reply(router, sender, postings, Some(skill))])
}

fn listing_reply(
    router: &FlowRouter,
    sender: &str,
    postings: Vec<PostingSummary>,
    filtered_by: Option<&str>,
) -> OutboundMessage {
    if postings.is_empty() {
        router.sessions.clear(sender);
        return OutboundMessage::text(sender, format::no_postings(filtered_by));
    }
    let text = format::posting_list(&postings, filtered_by);
    router
        .sessions
        .set(sender, SessionState::ChoosePosting { snapshot: postings });
    OutboundMessage::text(sender, text)
}

/// Resolve a pick against the pinned snapshot: a 1-based list number or a
/// posting/application id.
pub(super) fn pick_id<T>(snapshot: &[T], text: &str, id_of: impl Fn(&T) -> &str) -> Option<usize> {
    if let Ok(n) = text.parse::<usize>() {
        if n >= 1 && n <= snapshot.len() {
            return Some(n - 1);
        }
        return None;
    }
    let wanted = text.to_ascii_uppercase();
    snapshot.iter().position(|item| id_of(item) == wanted)
}

/// Handle a selection while in the posting-choice state. Picking is a
/// view, not an application: the detail is shown against a fresh read and
/// the session ends. Applying takes the `lamar <id>` command, which also
/// works right here.
pub fn choose(
    router: &FlowRouter,
    identity: &Identity,
    sender: &str,
    text: &str,
    snapshot: &[PostingSummary],
) -> FlowResult {
    let lowered = text.to_ascii_lowercase();
    if let Some(id) = lowered
        .strip_prefix("lamar ")
        .or_else(|| lowered.strip_prefix("apply "))
    {
        return apply_by_id(router, identity, sender, id.trim());
    }

    let Some(index) = pick_id(snapshot, text, |p| &p.id) else {
        return Ok(vec![OutboundMessage::text(sender, format::posting_pick_invalid())]);
    };

    // Fresh read: the pinned snapshot may be stale.
    let detail = match router.db.posting_detail(&snapshot[index].id)? {
        Some(detail) if detail.status == PostingStatus::Active => detail,
        _ => return Ok(vec![OutboundMessage::text(sender, format::posting_pick_invalid())]),
    };
    let applied = router.db.application_exists(&identity.profile_id, &detail.id)?;
    router.sessions.clear(sender);
    Ok(vec![OutboundMessage::text(
        sender,
        format::posting_detail(&detail, applied),
    )])
}

/// `lamar <id>` / `apply <id>`: the only way into the CV upload step.
pub fn apply_by_id(
    router: &FlowRouter,
    identity: &Identity,
    sender: &str,
    posting_id: &str,
) -> FlowResult {
    let posting_id = posting_id.to_ascii_uppercase();
    let detail = match router.db.posting_detail(&posting_id)? {
        Some(detail) if detail.status == PostingStatus::Active => detail,
        _ => return Ok(vec![OutboundMessage::text(sender, format::posting_pick_invalid())]),
    };

    if router.db.application_exists(&identity.profile_id, &posting_id)? {
        return Ok(vec![OutboundMessage::text(
            sender,
            format::already_applied(&detail.position),
        )]);
    }

    router.sessions.set(
        sender,
        SessionState::UploadCv {
            posting_id: detail.id.clone(),
            job_seeker_id: identity.profile_id.clone(),
            position: detail.position.clone(),
        },
    );
    Ok(vec![OutboundMessage::text(
        sender,
        format::ask_cv(&detail.position),
    )])
}

/// The seeker's own application statuses.
pub fn status_list(router: &FlowRouter, identity: &Identity, sender: &str) -> FlowResult {
    let rows = router.db.seeker_applications(&identity.profile_id)?;
    let reply = if rows.is_empty() {
        format::no_applications()
    } else {
        format::application_status_list(&rows)
    };
    Ok(vec![OutboundMessage::text(sender, reply)])
}

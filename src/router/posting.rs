//! Posting creation flow (employer side)
//!
//! Collects position, description, location and skills step by step, then
//! publishes only on explicit confirmation. Skills are resolved to rows at
//! the skills step so the confirmation shows exactly what will be linked.

use super::format;
use super::state::SessionState;
use super::{FlowResult, FlowRouter};
use crate::db::PostingDraft;
use crate::identity::Identity;
use crate::transport::OutboundMessage;
use crate::validation;

pub fn start(router: &FlowRouter, sender: &str) -> Vec<OutboundMessage> {
    router.sessions.set(sender, SessionState::PostPosition);
    vec![OutboundMessage::text(sender, format::ask_position())]
}

pub fn position(router: &FlowRouter, sender: &str, text: &str) -> FlowResult {
    if text.is_empty() {
        return Ok(vec![OutboundMessage::text(
            sender,
            format::empty_input_retry("position title"),
        )]);
    }
    router.sessions.set(
        sender,
        SessionState::PostDescription {
            position: text.to_string(),
        },
    );
    Ok(vec![OutboundMessage::text(sender, format::ask_description(text))])
}

pub fn description(router: &FlowRouter, sender: &str, text: &str, position: String) -> FlowResult {
    if text.is_empty() {
        return Ok(vec![OutboundMessage::text(
            sender,
            format::empty_input_retry("job description"),
        )]);
    }
    router.sessions.set(
        sender,
        SessionState::PostLocation {
            position,
            description: text.to_string(),
        },
    );
    Ok(vec![OutboundMessage::text(sender, format::ask_location())])
}

pub fn location(
    router: &FlowRouter,
    sender: &str,
    text: &str,
    position: String,
    description: String,
) -> FlowResult {
    if text.is_empty() {
        return Ok(vec![OutboundMessage::text(
            sender,
            format::empty_input_retry("location"),
        )]);
    }
    router.sessions.set(
        sender,
        SessionState::PostSkills {
            position,
            description,
            location: text.to_string(),
        },
    );
    Ok(vec![OutboundMessage::text(sender, format::ask_skills())])
}

pub fn skills(
    router: &FlowRouter,
    sender: &str,
    text: &str,
    position: String,
    description: String,
    location: String,
) -> FlowResult {
    let names = validation::parse_skills(text);
    if names.is_empty() {
        return Ok(vec![OutboundMessage::text(sender, format::skills_empty_retry())]);
    }

    // Resolve now so duplicates collapse before the unique link constraint
    // would see them ("Go, go" is one skill).
    let mut skill_ids = Vec::new();
    let mut skill_names = Vec::new();
    for name in names {
        let id = router.db.find_or_create_skill(&name)?;
        if !skill_ids.contains(&id) {
            skill_ids.push(id);
            skill_names.push(name);
        }
    }

    let draft = PostingDraft {
        position,
        description,
        location,
    };
    let summary = format::confirm_summary(&draft, &skill_names);
    router.sessions.set(
        sender,
        SessionState::PostConfirm {
            draft,
            skill_ids,
            skill_names,
        },
    );
    Ok(vec![OutboundMessage::text(sender, summary)])
}

pub fn confirm(
    router: &FlowRouter,
    identity: &Identity,
    sender: &str,
    text: &str,
    draft: PostingDraft,
    skill_ids: Vec<String>,
    _skill_names: Vec<String>,
) -> FlowResult {
    let confirmed = matches!(text.to_ascii_lowercase().as_str(), "ya" | "yes");
    if !confirmed {
        router.sessions.clear(sender);
        return Ok(vec![OutboundMessage::text(sender, format::posting_cancelled())]);
    }

    let posting_id = router.db.create_posting(&identity.profile_id, &draft)?;
    router.db.link_posting_skills(&posting_id, &skill_ids)?;
    router.sessions.clear(sender);

    tracing::info!(sender, posting = %posting_id, "posting published");
    Ok(vec![OutboundMessage::text(
        sender,
        format::posting_published(&posting_id, &draft.position),
    )])
}

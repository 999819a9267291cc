//! Registration flow
//!
//! Unregistered senders land here for every text. The flow collects role,
//! name and address, then writes the user and profile rows in its terminal
//! step. Nothing is persisted before that step, so an abandoned session
//! leaves no trace.

use super::format;
use super::state::SessionState;
use super::{FlowResult, FlowRouter};
use crate::db::Role;
use crate::transport::OutboundMessage;

/// Open (or reopen) registration at the role prompt.
pub fn start(router: &FlowRouter, sender: &str) -> Vec<OutboundMessage> {
    router.sessions.set(sender, SessionState::ChooseRole);
    vec![OutboundMessage::text(sender, format::role_prompt())]
}

pub fn handle(router: &FlowRouter, sender: &str, text: &str) -> FlowResult {
    let Some(session) = router.sessions.get(sender) else {
        return Ok(start(router, sender));
    };
    if !session.is_registration() {
        // A leftover session from before the user's rows were removed.
        router.sessions.clear(sender);
        return Ok(start(router, sender));
    }

    let reply = match session {
        SessionState::ChooseRole => match text.to_ascii_lowercase().as_str() {
            "1" | "pencari" | "seeker" => {
                router.sessions.set(sender, SessionState::SeekerName);
                format::ask_seeker_name()
            }
            "2" | "perusahaan" | "employer" => {
                router.sessions.set(sender, SessionState::EmployerName);
                format::ask_company_name()
            }
            _ => format::invalid_role_choice(),
        },

        SessionState::SeekerName => {
            if text.is_empty() {
                format::empty_input_retry("name")
            } else {
                router.sessions.set(
                    sender,
                    SessionState::SeekerAddress {
                        name: text.to_string(),
                    },
                );
                format::ask_seeker_address(text)
            }
        }
        SessionState::SeekerAddress { name } => {
            if text.is_empty() {
                format::empty_input_retry("address")
            } else {
                let user = router
                    .db
                    .upsert_user_by_channel(&name, sender, Role::JobSeeker)?;
                router
                    .db
                    .create_job_seeker_profile(&user.id, text, None)?;
                router.sessions.clear(sender);
                format::registered_seeker(&name)
            }
        }

        SessionState::EmployerName => {
            if text.is_empty() {
                format::empty_input_retry("company name")
            } else {
                router.sessions.set(
                    sender,
                    SessionState::EmployerAddress {
                        company_name: text.to_string(),
                    },
                );
                format::ask_company_address(text)
            }
        }
        SessionState::EmployerAddress { company_name } => {
            if text.is_empty() {
                format::empty_input_retry("company address")
            } else {
                let user = router
                    .db
                    .upsert_user_by_channel(&company_name, sender, Role::Employer)?;
                router
                    .db
                    .create_company_profile(&user.id, &company_name, text)?;
                router.sessions.clear(sender);
                format::registered_employer(&company_name)
            }
        }

        // Guarded above; anything else restarts cleanly.
        _ => {
            router.sessions.clear(sender);
            return Ok(start(router, sender));
        }
    };

    Ok(vec![OutboundMessage::text(sender, reply)])
}

//! Flow router
//!
//! Routes each inbound event by (role, session state) to a flow handler.
//! Handlers return the replies to send; user mistakes are ordinary replies
//! that keep the session, while infrastructure failures surface as
//! `FlowError` and reset the conversation.

pub mod state;

mod applicants;
mod commands;
mod cv_upload;
mod format;
mod jobs;
mod posting;
mod registration;

#[cfg(test)]
mod testing;

use crate::db::{Database, DbError, Role};
use crate::identity::{self, Identity};
use crate::session::SessionStore;
use crate::transport::{FileStore, InboundEvent, InboundPayload, OutboundMessage};
use state::SessionState;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FlowError {
    #[error("Session state mismatch: {0}")]
    State(String),
    #[error(transparent)]
    Db(#[from] DbError),
    #[error("File storage error: {0}")]
    Storage(#[from] std::io::Error),
}

type FlowResult = Result<Vec<OutboundMessage>, FlowError>;

pub struct FlowRouter {
    pub(crate) db: Database,
    pub(crate) sessions: Arc<SessionStore>,
    pub(crate) files: Arc<dyn FileStore>,
}

impl FlowRouter {
    pub fn new(db: Database, sessions: Arc<SessionStore>, files: Arc<dyn FileStore>) -> Self {
        Self { db, sessions, files }
    }

    /// Handle one inbound event. Never fails: errors reset the sender's
    /// session and turn into a recovery reply.
    pub async fn handle(&self, event: InboundEvent) -> Vec<OutboundMessage> {
        let sender = event.sender.clone();
        match self.dispatch(event).await {
            Ok(replies) => replies,
            Err(err) => self.recover(&sender, err),
        }
    }

    fn recover(&self, sender: &str, err: FlowError) -> Vec<OutboundMessage> {
        tracing::error!(sender, error = %err, "flow failed, resetting session");
        self.sessions.clear(sender);
        vec![OutboundMessage::text(sender, format::recovery())]
    }

    async fn dispatch(&self, event: InboundEvent) -> FlowResult {
        let identity = identity::resolve(&self.db, &event.sender)?;
        match event.payload {
            InboundPayload::Text { text } => {
                self.dispatch_text(identity, &event.sender, text.trim()).await
            }
            InboundPayload::Document { filename, mime, data } => match identity {
                Some(identity) => {
                    cv_upload::handle_document(self, &identity, &event.sender, &filename, &mime, data)
                        .await
                }
                None => Ok(registration::start(self, &event.sender)),
            },
            InboundPayload::Image => Ok(self.handle_image(&event.sender, identity.as_ref())),
        }
    }

    fn handle_image(&self, sender: &str, identity: Option<&Identity>) -> Vec<OutboundMessage> {
        if identity.is_none() {
            return registration::start(self, sender);
        }
        let reply = match self.sessions.get(sender) {
            Some(SessionState::UploadCv { .. }) => format::cv_wrong_type(),
            _ => format::unknown_command(),
        };
        vec![OutboundMessage::text(sender, reply)]
    }

    async fn dispatch_text(
        &self,
        identity: Option<Identity>,
        sender: &str,
        text: &str,
    ) -> FlowResult {
        let Some(identity) = identity else {
            return registration::handle(self, sender, text);
        };

        // Global escape: always lands on the role menu, dropping any
        // in-progress flow data with the session.
        if text.eq_ignore_ascii_case("menu")
            || text.eq_ignore_ascii_case("batal")
            || text.eq_ignore_ascii_case("cancel")
        {
            self.sessions.clear(sender);
            let menu = match identity.user.role {
                Role::JobSeeker => format::seeker_menu(&identity.user.name),
                Role::Employer => format::employer_menu(&identity.user.name),
            };
            return Ok(vec![OutboundMessage::text(sender, menu)]);
        }

        // Employer status commands work regardless of session state.
        if identity.user.role == Role::Employer {
            if let Some(command) = commands::parse_global(text) {
                return applicants::handle_global(self, &identity, sender, command).await;
            }
        }

        if let Some(session) = self.sessions.get(sender) {
            return self.dispatch_state(&identity, sender, text, session).await;
        }

        match identity.user.role {
            Role::JobSeeker => self.seeker_menu_command(&identity, sender, text),
            Role::Employer => self.employer_menu_command(&identity, sender, text),
        }
    }

    async fn dispatch_state(
        &self,
        identity: &Identity,
        sender: &str,
        text: &str,
        session: SessionState,
    ) -> FlowResult {
        match (identity.user.role, session) {
            (Role::JobSeeker, SessionState::ChoosePosting { snapshot }) => {
                jobs::choose(self, identity, sender, text, &snapshot)
            }
            (Role::JobSeeker, SessionState::UploadCv { .. }) => Ok(vec![OutboundMessage::text(
                sender,
                format::cv_expected_document(),
            )]),
            (Role::Employer, SessionState::PostPosition) => {
                posting::position(self, sender, text)
            }
            (Role::Employer, SessionState::PostDescription { position }) => {
                posting::description(self, sender, text, position)
            }
            (Role::Employer, SessionState::PostLocation { position, description }) => {
                posting::location(self, sender, text, position, description)
            }
            (Role::Employer, SessionState::PostSkills { position, description, location }) => {
                posting::skills(self, sender, text, position, description, location)
            }
            (Role::Employer, SessionState::PostConfirm { draft, skill_ids, skill_names }) => {
                posting::confirm(self, identity, sender, text, draft, skill_ids, skill_names)
            }
            (Role::Employer, SessionState::ChoosePostingForApplicants { snapshot }) => {
                applicants::choose_for_applicants(self, sender, text, &snapshot)
            }
            (Role::Employer, SessionState::ChoosePostingForManage { snapshot }) => {
                applicants::choose_for_manage(self, sender, text, &snapshot)
            }
            (Role::Employer, SessionState::ChooseApplicant { snapshot, position }) => {
                applicants::choose_applicant(self, sender, text, &snapshot, &position).await
            }
            (role, session) => Err(FlowError::State(format!(
                "no handler for role {role} in state {}",
                session.name()
            ))),
        }
    }

    fn seeker_menu_command(&self, identity: &Identity, sender: &str, text: &str) -> FlowResult {
        let lowered = text.to_ascii_lowercase();
        if let Some(skill) = lowered.strip_prefix("filter ") {
            return jobs::filter(self, sender, skill.trim());
        }
        if let Some(id) = lowered
            .strip_prefix("lamar ")
            .or_else(|| lowered.strip_prefix("apply "))
        {
            return jobs::apply_by_id(self, identity, sender, id.trim());
        }
        match lowered.as_str() {
            "1" | "cari" | "loker" => jobs::menu(self, sender),
            "2" | "lamaran" => jobs::status_list(self, identity, sender),
            "3" | "profil" => Ok(vec![OutboundMessage::text(
                sender,
                format::profile_update_unavailable(),
            )]),
            _ => Ok(vec![OutboundMessage::text(sender, format::unknown_command())]),
        }
    }

    fn employer_menu_command(&self, identity: &Identity, sender: &str, text: &str) -> FlowResult {
        match text.to_ascii_lowercase().as_str() {
            "1" | "posting" | "buat" => Ok(posting::start(self, sender)),
            "2" | "pelamar" => applicants::applicants_menu(self, identity, sender),
            "3" | "kelola" => applicants::manage_menu(self, identity, sender),
            _ => Ok(vec![OutboundMessage::text(sender, format::unknown_command())]),
        }
    }
}

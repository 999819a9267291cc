//! Identity resolution
//!
//! Maps a channel sender id to a registered user plus their role-specific
//! profile id. A user row without a matching profile row means registration
//! never finished its terminal step; such a sender is treated as
//! unregistered and routed back into registration, which reuses the row.

use crate::db::{Database, DbResult, Role, User};

#[derive(Debug, Clone)]
pub struct Identity {
    pub user: User,
    /// `JSK…` for job seekers, `CMP…` for employers.
    pub profile_id: String,
}

pub fn resolve(db: &Database, sender: &str) -> DbResult<Option<Identity>> {
    let Some(user) = db.find_user_by_channel(sender)? else {
        return Ok(None);
    };
    let profile_id = match user.role {
        Role::JobSeeker => db.job_seeker_id(&user.id)?,
        Role::Employer => db.company_id(&user.id)?,
    };
    Ok(profile_id.map(|profile_id| Identity { user, profile_id }))
}

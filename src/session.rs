//! In-memory session store
//!
//! One session per chat channel, holding the user's place in a flow. Entries
//! expire after a TTL of inactivity; every write slides the deadline. An
//! expired entry is indistinguishable from an absent one, so a stale reader
//! simply sees "no session" and the router falls back to the menus.

use crate::router::state::SessionState;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

struct Entry {
    state: SessionState,
    expires_at: Instant,
}

pub struct SessionStore {
    ttl: Duration,
    inner: Mutex<HashMap<String, Entry>>,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            inner: Mutex::new(HashMap::new()),
        }
    }

    /// Replace the session for `channel`, resetting its deadline.
    pub fn set(&self, channel: &str, state: SessionState) {
        let mut inner = self.inner.lock().unwrap();
        inner.insert(
            channel.to_string(),
            Entry {
                state,
                expires_at: Instant::now() + self.ttl,
            },
        );
    }

    /// Current session state, or `None` if absent or expired. Expired
    /// entries are dropped on read.
    pub fn get(&self, channel: &str) -> Option<SessionState> {
        let mut inner = self.inner.lock().unwrap();
        match inner.get(channel) {
            Some(entry) if entry.expires_at > Instant::now() => Some(entry.state.clone()),
            Some(_) => {
                inner.remove(channel);
                None
            }
            None => None,
        }
    }

    /// Mutate the live session in place, sliding its deadline. Returns
    /// false when there is no live session to update.
    pub fn update<F>(&self, channel: &str, mutate: F) -> bool
    where
        F: FnOnce(&mut SessionState),
    {
        let mut inner = self.inner.lock().unwrap();
        match inner.get_mut(channel) {
            Some(entry) if entry.expires_at > Instant::now() => {
                mutate(&mut entry.state);
                entry.expires_at = Instant::now() + self.ttl;
                true
            }
            Some(_) => {
                inner.remove(channel);
                false
            }
            None => false,
        }
    }

    pub fn clear(&self, channel: &str) {
        let mut inner = self.inner.lock().unwrap();
        inner.remove(channel);
    }

    /// Drop every expired entry; returns how many were removed. Called
    /// periodically by the engine's sweeper task.
    pub fn purge_expired(&self) -> usize {
        let mut inner = self.inner.lock().unwrap();
        let now = Instant::now();
        let before = inner.len();
        inner.retain(|_, entry| entry.expires_at > now);
        before - inner.len()
    }
}

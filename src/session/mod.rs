//! Per-session state tracked by the gate.
//!
//! # Data Flow
//! ```text
//! cookie → SessionId → SessionStore (DashMap, one Mutex per session)
//!     → SessionState mutated only while handling that session's request
//! ```
//!
//! # Design Decisions
//! - No global mutable rate-limit or auth state: every counter lives in
//!   the session it belongs to, behind an explicit session identity
//! - A per-session Mutex serializes access to one session's fields so
//!   concurrent workers cannot lose updates to the request log
//! - Idle sessions are evicted by a background sweep; to the client an
//!   evicted session is indistinguishable from a fresh one

pub mod store;

pub use store::SessionStore;

use std::collections::VecDeque;
use std::fmt;
use std::time::Instant;

use uuid::Uuid;

/// Opaque identity of one browser interaction context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Generate a fresh random session identity.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an identity from its cookie representation.
    pub fn parse(s: &str) -> Option<Self> {
        Uuid::parse_str(s).ok().map(Self)
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// State scoped to exactly one session.
#[derive(Debug)]
pub struct SessionState {
    /// Timestamps of admitted requests, oldest first. Pruned on every
    /// admission check so growth stays bounded by the window.
    pub(crate) request_log: VecDeque<Instant>,

    /// When set, requests are rejected until this instant passes. Only
    /// the passage of time clears it, never a user action.
    pub(crate) blocked_until: Option<Instant>,

    /// Whether this session has passed the auth gate. Meaningless while
    /// no password is configured.
    pub(crate) authenticated: bool,

    /// Failed login attempts since the last successful login.
    pub(crate) failed_auth_attempts: u32,

    /// Last time this session was touched, for idle eviction.
    pub(crate) last_seen: Instant,
}

impl SessionState {
    pub(crate) fn new(now: Instant) -> Self {
        Self {
            request_log: VecDeque::new(),
            blocked_until: None,
            authenticated: false,
            failed_auth_attempts: 0,
            last_seen: now,
        }
    }

    /// Whether this session has passed the auth gate.
    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Failed login attempts since the last successful login.
    pub fn failed_auth_attempts(&self) -> u32 {
        self.failed_auth_attempts
    }

    /// Number of admitted requests currently in the log.
    pub fn recorded_requests(&self) -> usize {
        self.request_log.len()
    }

    /// Whether a block is active at the given instant.
    pub fn is_blocked(&self, now: Instant) -> bool {
        self.blocked_until.map(|until| now < until).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_id_round_trips_through_cookie_form() {
        let id = SessionId::new();
        assert_eq!(SessionId::parse(&id.to_string()), Some(id));
    }

    #[test]
    fn garbage_cookie_value_is_rejected() {
        assert_eq!(SessionId::parse("not-a-uuid"), None);
        assert_eq!(SessionId::parse(""), None);
    }

    #[test]
    fn fresh_state_is_unauthenticated_and_unblocked() {
        let now = Instant::now();
        let state = SessionState::new(now);
        assert!(!state.is_authenticated());
        assert_eq!(state.failed_auth_attempts(), 0);
        assert_eq!(state.recorded_requests(), 0);
        assert!(!state.is_blocked(now));
    }
}

//! Optional shared-password gate with brute-force mitigation.
//!
//! States: Unconfigured (no password resolves → gate bypassed), Locked
//! (initial when configured), Unlocked. A failed attempt pays a fixed
//! asynchronous delay; a logout never touches rate-limit counters, so
//! logging out cannot be used to reset quota.

use std::sync::Mutex;
use std::time::Duration;

use crate::config::AuthConfig;
use crate::observability::metrics;
use crate::secrets::{SecretResolver, APP_PASSWORD_KEY};
use crate::session::SessionState;

/// Whether the gate is active at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateMode {
    /// No password configured; every session behaves as unlocked.
    Open,
    /// A password is configured; sessions must authenticate.
    Guarded,
}

/// Outcome of a login attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthOutcome {
    /// The session is now authenticated.
    Unlocked,
    /// The attempt failed; the delay below was already applied.
    Locked {
        /// Milliseconds of artificial delay served before returning.
        delay_applied_ms: u64,
    },
}

/// Password gate over the fixed `APP_PASSWORD` secret.
#[derive(Debug, Clone)]
pub struct AuthGate {
    resolver: SecretResolver,
    failure_delay: Duration,
}

impl AuthGate {
    /// Build the gate; the password itself is resolved per call, never
    /// held here.
    pub fn new(resolver: SecretResolver, config: &AuthConfig) -> Self {
        Self {
            resolver,
            failure_delay: Duration::from_millis(config.failure_delay_ms),
        }
    }

    /// Current gate mode. Resolved fresh so a redeployed password takes
    /// effect without code changes.
    pub fn mode(&self) -> GateMode {
        if self.resolver.is_configured(APP_PASSWORD_KEY) {
            GateMode::Guarded
        } else {
            GateMode::Open
        }
    }

    /// Whether a session may pass the gate right now.
    pub fn is_unlocked(&self, state: &SessionState) -> bool {
        self.mode() == GateMode::Open || state.authenticated
    }

    /// Attempt a login. On failure the fixed delay is served before
    /// returning, blunting automated guessing; the session lock is not
    /// held across that sleep.
    pub async fn authenticate(
        &self,
        session: &Mutex<SessionState>,
        submitted: &str,
    ) -> AuthOutcome {
        let password = self.resolver.resolve(APP_PASSWORD_KEY);
        if password.is_empty() {
            return AuthOutcome::Unlocked;
        }

        let ok = constant_time_eq(submitted.as_bytes(), password.as_bytes());
        {
            let mut state = session.lock().expect("session mutex poisoned");
            if ok {
                state.authenticated = true;
                state.failed_auth_attempts = 0;
            } else {
                state.failed_auth_attempts += 1;
                tracing::warn!(
                    failed_attempts = state.failed_auth_attempts,
                    "Login attempt rejected"
                );
            }
        }

        if ok {
            metrics::record_auth("success");
            AuthOutcome::Unlocked
        } else {
            metrics::record_auth("failure");
            tokio::time::sleep(self.failure_delay).await;
            AuthOutcome::Locked {
                delay_applied_ms: self.failure_delay.as_millis() as u64,
            }
        }
    }

    /// Explicit logout. Clears auth state only; the request log and any
    /// active block survive so logout cannot reset quota.
    pub fn logout(&self, state: &mut SessionState) {
        state.authenticated = false;
        state.failed_auth_attempts = 0;
    }
}

/// Compare secrets without an early exit, so the comparison time does
/// not leak how much of a guess was correct.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b.iter()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

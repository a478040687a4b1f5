//! Per-session sliding-window rate limiting with an escalating block.

use std::time::{Duration, Instant};

use crate::config::RateLimitConfig;
use crate::session::SessionState;

/// Default maximum admitted requests per window.
pub const DEFAULT_MAX_REQUESTS: u32 = 5;
/// Default sliding window length in seconds.
pub const DEFAULT_WINDOW_SECS: u64 = 60;
/// Default block duration in seconds.
pub const DEFAULT_BLOCK_SECS: u64 = 300;

/// Outcome of an admission check. Rejections always carry the wait time
/// so the UI can render a countdown; there is no bare-boolean form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// The request may proceed to the expensive calls.
    Admitted,
    /// The request is rejected; retry after this many seconds.
    Rejected {
        /// Seconds until the session unblocks, rounded up.
        retry_after_secs: u64,
    },
}

/// Sliding-window admission control over a session's request log.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    max_requests: usize,
    window: Duration,
    block: Duration,
}

impl RateLimiter {
    /// Build a limiter from configuration. Zero values are malformed
    /// and fall back to the defaults; a limiter can be misconfigured
    /// but never disabled.
    pub fn new(config: &RateLimitConfig) -> Self {
        let max_requests = if config.max_requests == 0 {
            tracing::warn!("rate limiter max_requests is 0, using default");
            DEFAULT_MAX_REQUESTS
        } else {
            config.max_requests
        };
        let window_secs = if config.window_secs == 0 {
            tracing::warn!("rate limiter window_secs is 0, using default");
            DEFAULT_WINDOW_SECS
        } else {
            config.window_secs
        };
        let block_secs = if config.block_secs == 0 {
            tracing::warn!("rate limiter block_secs is 0, using default");
            DEFAULT_BLOCK_SECS
        } else {
            config.block_secs
        };

        Self {
            max_requests: max_requests as usize,
            window: Duration::from_secs(window_secs),
            block: Duration::from_secs(block_secs),
        }
    }

    /// Admit or reject one request attempt for a session at `now`.
    ///
    /// Mutates only the given session's state; a rejected attempt is
    /// never recorded, so repeated attempts during a block change
    /// nothing.
    pub fn check_and_record(&self, state: &mut SessionState, now: Instant) -> Admission {
        if let Some(until) = state.blocked_until {
            if now < until {
                return Admission::Rejected {
                    retry_after_secs: secs_ceil(until.duration_since(now)),
                };
            }
            // Block has expired; only time clears it.
            state.blocked_until = None;
        }

        // Prune entries strictly older than the window. An entry exactly
        // at the window boundary still counts (inclusive lower bound).
        if let Some(cutoff) = now.checked_sub(self.window) {
            while let Some(&oldest) = state.request_log.front() {
                if oldest < cutoff {
                    state.request_log.pop_front();
                } else {
                    break;
                }
            }
        }

        if state.request_log.len() >= self.max_requests {
            state.blocked_until = Some(now + self.block);
            return Admission::Rejected {
                retry_after_secs: self.block.as_secs(),
            };
        }

        state.request_log.push_back(now);
        Admission::Admitted
    }

    /// Block duration applied on violation.
    pub fn block_secs(&self) -> u64 {
        self.block.as_secs()
    }
}

fn secs_ceil(d: Duration) -> u64 {
    let secs = d.as_secs();
    if d.subsec_nanos() > 0 {
        secs + 1
    } else {
        secs
    }
}

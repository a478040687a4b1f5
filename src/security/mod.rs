//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming submission:
//!     → auth.rs       (password gate, when configured)
//!     → rate_limit.rs (per-session sliding window)
//!     → validate.rs   (allow-list + suspicious-pattern block-list)
//!     → prompt.rs     (injection scrubbing before model prompts)
//!     → display.rs    (entity escaping before any rendered markup)
//! ```
//!
//! # Design Decisions
//! - Defense in depth: the allow-list already blocks the characters the
//!   block-list patterns need, but both layers stay so a future
//!   allow-list relaxation cannot silently reopen the hole
//! - Fail closed on validation, degrade on prompt sanitization: by the
//!   time text reaches a prompt the per-field gate has already run
//! - No trust in client input, including cookie values

pub mod auth;
pub mod display;
pub mod prompt;
pub mod rate_limit;
pub mod validate;

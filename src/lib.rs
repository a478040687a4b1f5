//! Request-admission and input-defense layer for the couples movie
//! recommender.
//!
//! The surrounding application lets two users submit short lists of
//! favorite titles and receive AI-generated joint recommendations. This
//! crate decides, for every inbound user action, whether it is allowed to
//! reach the expensive AI/metadata calls, and in what sanitized form:
//!
//! - per-session sliding-window rate limiting with an escalating block
//! - allow-list input validation layered with a markup block-list
//! - prompt-injection scrubbing before text reaches a model prompt
//! - secret resolution across env-only and file-backed deployments
//! - an optional shared-password gate with brute-force delay

pub mod config;
pub mod http;
pub mod observability;
pub mod pipeline;
pub mod secrets;
pub mod security;
pub mod session;

pub use config::GateConfig;
pub use http::GateServer;
pub use pipeline::{GateError, GatePipeline, PreparedSubmission};
pub use secrets::SecretResolver;
pub use security::display::{escape_for_display, render_watch_link};
pub use security::rate_limit::Admission;
pub use session::{SessionId, SessionStore};

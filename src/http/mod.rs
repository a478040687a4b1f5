//! HTTP surface of the admission gate.
//!
//! # Data Flow
//! ```text
//! request
//!     → tower-http layers (trace, timeout, body limit)
//!     → session.rs (cookie → SessionId, set-cookie on first contact)
//!     → handlers.rs (login / logout / status / submit)
//!     → pipeline (admission decisions)
//! ```

pub mod handlers;
pub mod server;
pub mod session;

pub use server::GateServer;

//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks + degrade-to-default)
//!     → GateConfig (validated, immutable)
//!     → shared via Arc to all subsystems
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults to allow minimal configs (the common
//!   deployment carries no config file at all)
//! - Malformed admission-control values never abort startup: they fall
//!   back to the documented defaults with a warning

pub mod loader;
pub mod schema;
pub mod validation;

pub use schema::GateConfig;
pub use schema::AuthConfig;
pub use schema::RateLimitConfig;
pub use schema::ValidationConfig;

//! Secret resolution subsystem.
//!
//! # Data Flow
//! ```text
//! resolve(name)
//!     → process environment (authoritative, re-checked every call)
//!     → file-backed TOML store (best effort, failures are silent)
//!     → caller-supplied default
//! ```
//!
//! # Design Decisions
//! - Resolution never fails: the caller always receives a string
//! - One deployment substrate supplies secrets exclusively through the
//!   environment and has no file store at all; the other writes a TOML
//!   store next to the app. Environment wins when both define a key.
//! - Secret values are never logged; only a configured/not-configured
//!   boolean may surface

pub mod resolver;

pub use resolver::{SecretResolver, SecretSource};

/// API key for the language-model provider.
pub const AI_PROVIDER_KEY: &str = "OPENAI_API_KEY";

/// API key for the optional alternate language-model provider.
pub const ALT_AI_PROVIDER_KEY: &str = "DEEPSEEK_API_KEY";

/// API key for the movie-metadata provider.
pub const METADATA_PROVIDER_KEY: &str = "TMDB_API_KEY";

/// Optional shared application password enabling the auth gate.
pub const APP_PASSWORD_KEY: &str = "APP_PASSWORD";

/// Secret names the status endpoint reports configuredness for.
pub const KNOWN_SECRET_NAMES: [&str; 4] = [
    AI_PROVIDER_KEY,
    ALT_AI_PROVIDER_KEY,
    METADATA_PROVIDER_KEY,
    APP_PASSWORD_KEY,
];

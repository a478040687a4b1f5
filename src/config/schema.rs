//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gate.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::security::rate_limit;

/// Root configuration for the admission gate.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GateConfig {
    /// Listener configuration (bind address, request limits).
    pub listener: ListenerConfig,

    /// Sliding-window rate limiting.
    pub rate_limit: RateLimitConfig,

    /// Input validation and prompt sanitization limits.
    pub validation: ValidationConfig,

    /// Authentication gate settings.
    pub auth: AuthConfig,

    /// Secret resolution settings.
    pub secrets: SecretsConfig,

    /// Session store settings.
    pub session: SessionConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Maximum request body size in bytes.
    pub max_body_bytes: usize,

    /// Request timeout (total time for request/response) in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            max_body_bytes: 16 * 1024,
            request_timeout_secs: 30,
        }
    }
}

/// Rate limiting configuration.
///
/// Zero values are treated as malformed and replaced with the defaults
/// during validation; a misconfigured limiter must never disable itself.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Maximum admitted requests per session within the window.
    pub max_requests: u32,

    /// Sliding window length in seconds.
    pub window_secs: u64,

    /// Block duration applied on violation, in seconds.
    pub block_secs: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: rate_limit::DEFAULT_MAX_REQUESTS,
            window_secs: rate_limit::DEFAULT_WINDOW_SECS,
            block_secs: rate_limit::DEFAULT_BLOCK_SECS,
        }
    }
}

/// Input validation configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Maximum characters per submitted title.
    pub max_title_chars: usize,

    /// Minimum valid titles required per participant.
    pub min_titles: usize,

    /// Maximum titles considered per participant; surplus is ignored.
    pub max_titles: usize,

    /// Upper bound on characters forwarded into a model prompt across
    /// all titles combined.
    pub max_prompt_chars: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_title_chars: 200,
            min_titles: 3,
            max_titles: 5,
            max_prompt_chars: 1000,
        }
    }
}

/// Authentication gate configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Fixed delay applied to every failed login attempt, in
    /// milliseconds.
    pub failure_delay_ms: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            failure_delay_ms: 2000,
        }
    }
}

/// Secret resolution configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecretsConfig {
    /// Path to the file-backed secret store. Only one deployment
    /// substrate provides this file; on the other, resolution relies on
    /// environment variables alone.
    pub store_path: String,
}

impl Default for SecretsConfig {
    fn default() -> Self {
        Self {
            store_path: ".streamlit/secrets.toml".to_string(),
        }
    }
}

/// Session store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Name of the session cookie.
    pub cookie_name: String,

    /// Sessions idle longer than this are evicted, in seconds.
    pub idle_ttl_secs: u64,

    /// Interval between eviction sweeps, in seconds.
    pub sweep_interval_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: "gate_session".to_string(),
            idle_ttl_secs: 3600,
            sweep_interval_secs: 300,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: true,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

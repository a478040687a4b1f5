//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Replace malformed admission-control values with defaults
//! - Validate value ranges (addresses parseable, limits consistent)
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Admission-control misconfiguration degrades instead of failing:
//!   a zeroed-out limiter must never reach the pipeline

use std::fmt;

use crate::config::schema::GateConfig;
use crate::security::rate_limit;

/// A fatal configuration error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The listener bind address is empty or unparseable.
    BindAddress(String),
    /// min_titles exceeds max_titles.
    TitleBounds { min: usize, max: usize },
    /// The per-title cap exceeds the combined prompt cap.
    PromptBudget { title: usize, prompt: usize },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::BindAddress(addr) => {
                write!(f, "invalid bind address: {:?}", addr)
            }
            ValidationError::TitleBounds { min, max } => {
                write!(f, "min_titles ({}) exceeds max_titles ({})", min, max)
            }
            ValidationError::PromptBudget { title, prompt } => {
                write!(
                    f,
                    "max_title_chars ({}) exceeds max_prompt_chars ({})",
                    title, prompt
                )
            }
        }
    }
}

/// Replace malformed admission-control values with the documented
/// defaults. Returns a description of every adjustment made, for the
/// caller to log.
pub fn normalize_config(config: &mut GateConfig) -> Vec<String> {
    let mut adjustments = Vec::new();

    if config.rate_limit.max_requests == 0 {
        config.rate_limit.max_requests = rate_limit::DEFAULT_MAX_REQUESTS;
        adjustments.push(format!(
            "rate_limit.max_requests was 0, using default {}",
            rate_limit::DEFAULT_MAX_REQUESTS
        ));
    }
    if config.rate_limit.window_secs == 0 {
        config.rate_limit.window_secs = rate_limit::DEFAULT_WINDOW_SECS;
        adjustments.push(format!(
            "rate_limit.window_secs was 0, using default {}",
            rate_limit::DEFAULT_WINDOW_SECS
        ));
    }
    if config.rate_limit.block_secs == 0 {
        config.rate_limit.block_secs = rate_limit::DEFAULT_BLOCK_SECS;
        adjustments.push(format!(
            "rate_limit.block_secs was 0, using default {}",
            rate_limit::DEFAULT_BLOCK_SECS
        ));
    }

    let defaults = crate::config::ValidationConfig::default();
    if config.validation.max_title_chars == 0 {
        config.validation.max_title_chars = defaults.max_title_chars;
        adjustments.push(format!(
            "validation.max_title_chars was 0, using default {}",
            defaults.max_title_chars
        ));
    }
    if config.validation.min_titles == 0 {
        config.validation.min_titles = defaults.min_titles;
        adjustments.push(format!(
            "validation.min_titles was 0, using default {}",
            defaults.min_titles
        ));
    }
    if config.validation.max_prompt_chars == 0 {
        config.validation.max_prompt_chars = defaults.max_prompt_chars;
        adjustments.push(format!(
            "validation.max_prompt_chars was 0, using default {}",
            defaults.max_prompt_chars
        ));
    }

    adjustments
}

/// Validate a configuration. Call after [`normalize_config`].
pub fn validate_config(config: &GateConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<std::net::SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.validation.min_titles > config.validation.max_titles {
        errors.push(ValidationError::TitleBounds {
            min: config.validation.min_titles,
            max: config.validation.max_titles,
        });
    }

    if config.validation.max_title_chars > config.validation.max_prompt_chars {
        errors.push(ValidationError::PromptBudget {
            title: config.validation.max_title_chars,
            prompt: config.validation.max_prompt_chars,
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

//! Pipeline composition root.
//!
//! Orchestrates AuthGate → RateLimiter → InputSanitizer for every
//! inbound user action and exposes the admission API the surrounding
//! application consumes. No exception escapes this boundary: every
//! public entry point returns a discriminated result.

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;
use thiserror::Error;

use crate::config::{GateConfig, ValidationConfig};
use crate::observability::metrics;
use crate::secrets::SecretResolver;
use crate::security::auth::{AuthGate, AuthOutcome, GateMode};
use crate::security::prompt;
use crate::security::rate_limit::{Admission, RateLimiter};
use crate::security::validate::{self, ValidationError};
use crate::session::{SessionId, SessionStore};

/// Everything that can go wrong between a user action and the expensive
/// calls. Secret unavailability is deliberately absent: it is never an
/// error, only a "not configured" boolean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GateError {
    /// The session is rate limited; retry after the given wait.
    #[error("too many requests, retry in {retry_after_secs} seconds")]
    RateLimited {
        /// Seconds until the session unblocks.
        retry_after_secs: u64,
    },

    /// A submitted title (or the submission shape) failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The gate is guarded and this session has not authenticated.
    #[error("authentication required")]
    AuthRequired,

    /// Login failed. Generic on purpose: the message must not reveal
    /// whether the application itself is misconfigured.
    #[error("invalid password")]
    AuthFailed,
}

/// A submission that passed every gate, in prompt-safe and display-safe
/// form. The raw input is not retained.
#[derive(Debug, Clone, Serialize)]
pub struct PreparedSubmission {
    /// Prompt-safe text for the language-model collaborator.
    pub prompt: String,
    /// Cleaned titles for the first participant.
    pub partner1: Vec<String>,
    /// Cleaned titles for the second participant.
    pub partner2: Vec<String>,
}

/// The request-admission pipeline.
pub struct GatePipeline {
    store: SessionStore,
    limiter: RateLimiter,
    gate: AuthGate,
    resolver: SecretResolver,
    validation: ValidationConfig,
}

impl GatePipeline {
    /// Wire the pipeline from configuration.
    pub fn new(config: &GateConfig) -> Self {
        let resolver = SecretResolver::new(&config.secrets.store_path);
        Self {
            store: SessionStore::new(Duration::from_secs(config.session.idle_ttl_secs)),
            limiter: RateLimiter::new(&config.rate_limit),
            gate: AuthGate::new(resolver.clone(), &config.auth),
            resolver,
            validation: config.validation.clone(),
        }
    }

    /// The session store, for the HTTP layer and the eviction sweeper.
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Whether the auth gate is active.
    pub fn auth_required(&self) -> bool {
        self.gate.mode() == GateMode::Guarded
    }

    /// Whether a session may pass the auth gate right now.
    pub fn is_unlocked(&self, id: SessionId) -> bool {
        let session = self.store.get_or_create(id);
        let state = session.lock().expect("session mutex poisoned");
        self.gate.is_unlocked(&state)
    }

    /// Admit or reject a request attempt for a session.
    pub fn admit(&self, id: SessionId) -> Admission {
        let session = self.store.get_or_create(id);
        let mut state = session.lock().expect("session mutex poisoned");
        let admission = self.limiter.check_and_record(&mut state, Instant::now());
        match admission {
            Admission::Admitted => metrics::record_admission("admitted"),
            Admission::Rejected { retry_after_secs } => {
                metrics::record_admission("rate_limited");
                tracing::warn!(
                    session = %id,
                    retry_after_secs,
                    "Rate limit exceeded"
                );
            }
        }
        admission
    }

    /// Validate one title against the per-title rules.
    pub fn sanitize_title(&self, raw: &str) -> Result<String, ValidationError> {
        validate::validate_title(raw, self.validation.max_title_chars).inspect_err(|e| {
            metrics::record_validation_failure(e.reason());
        })
    }

    /// Sanitize already-validated titles for prompt interpolation.
    pub fn sanitize_for_prompt(&self, titles: &[String]) -> String {
        prompt::sanitize_for_prompt(titles, self.validation.max_prompt_chars)
    }

    /// Attempt a login for a session.
    pub async fn authenticate(&self, id: SessionId, submitted: &str) -> AuthOutcome {
        let session = self.store.get_or_create(id);
        self.gate.authenticate(&session, submitted).await
    }

    /// Log a session out. Rate-limit state survives on purpose.
    pub fn logout(&self, id: SessionId) {
        let session = self.store.get_or_create(id);
        let mut state = session.lock().expect("session mutex poisoned");
        self.gate.logout(&mut state);
    }

    /// Whether a named secret resolves to a non-empty value.
    pub fn is_configured(&self, name: &str) -> bool {
        self.resolver.is_configured(name)
    }

    /// Run a full submission through the pipeline: auth gate, rate
    /// admission, per-title validation, participant count policy, and
    /// prompt assembly under the combined character budget.
    pub fn prepare_submission(
        &self,
        id: SessionId,
        partner1: &[String],
        partner2: &[String],
    ) -> Result<PreparedSubmission, GateError> {
        let session = self.store.get_or_create(id);

        {
            let state = session.lock().expect("session mutex poisoned");
            if !self.gate.is_unlocked(&state) {
                return Err(GateError::AuthRequired);
            }
        }

        let admission = {
            let mut state = session.lock().expect("session mutex poisoned");
            self.limiter.check_and_record(&mut state, Instant::now())
        };
        if let Admission::Rejected { retry_after_secs } = admission {
            metrics::record_admission("rate_limited");
            tracing::warn!(session = %id, retry_after_secs, "Submission rate limited");
            return Err(GateError::RateLimited { retry_after_secs });
        }
        metrics::record_admission("admitted");

        let clean1 = self.clean_list(partner1)?;
        let clean2 = self.clean_list(partner2)?;

        // Both lists share one prompt budget: the second list gets what
        // the first leaves over.
        let budget = self.validation.max_prompt_chars;
        let list1 = prompt::sanitize_for_prompt(&clean1, budget);
        let list2 =
            prompt::sanitize_for_prompt(&clean2, budget.saturating_sub(list1.chars().count()));
        let prompt = format!(
            "Partner 1's favorite movies: {list1}\nPartner 2's favorite movies: {list2}"
        );

        Ok(PreparedSubmission {
            prompt,
            partner1: clean1,
            partner2: clean2,
        })
    }

    /// Apply per-title validation and the count policy to one
    /// participant's list: blank entries are skipped, surplus beyond
    /// `max_titles` is ignored, and fewer than `min_titles` valid
    /// entries rejects the submission.
    fn clean_list(&self, raw: &[String]) -> Result<Vec<String>, GateError> {
        let mut clean = Vec::new();
        for entry in raw {
            if entry.trim().is_empty() {
                continue;
            }
            if clean.len() == self.validation.max_titles {
                break;
            }
            clean.push(self.sanitize_title(entry)?);
        }
        if clean.len() < self.validation.min_titles {
            let err = ValidationError::TooFew {
                min: self.validation.min_titles,
            };
            metrics::record_validation_failure(err.reason());
            return Err(err.into());
        }
        Ok(clean)
    }
}

/// Pipelines are shared across handlers and background tasks.
pub type SharedPipeline = Arc<GatePipeline>;

//! JSON handlers for the gate API.
//!
//! Error bodies are specific but non-technical: rate-limit rejections
//! carry a numeric countdown for the UI, validation rejections carry a
//! stable reason, and login failures are deliberately generic so they
//! reveal nothing about how the application is configured.

use std::collections::BTreeMap;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use crate::http::server::AppState;
use crate::http::session::CurrentSession;
use crate::pipeline::GateError;
use crate::secrets::KNOWN_SECRET_NAMES;
use crate::security::auth::AuthOutcome;
use crate::security::rate_limit::Admission;

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    retry_after_secs: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<&'static str>,
}

fn gate_error_response(err: GateError) -> Response {
    let (status, body) = match err {
        GateError::RateLimited { retry_after_secs } => (
            StatusCode::TOO_MANY_REQUESTS,
            ErrorBody {
                error: "rate_limited",
                message: format!(
                    "Too many requests. Please try again in {retry_after_secs} seconds."
                ),
                retry_after_secs: Some(retry_after_secs),
                reason: None,
            },
        ),
        GateError::Validation(e) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            ErrorBody {
                error: "validation_failed",
                message: e.to_string(),
                retry_after_secs: None,
                reason: Some(e.reason()),
            },
        ),
        GateError::AuthRequired => (
            StatusCode::UNAUTHORIZED,
            ErrorBody {
                error: "auth_required",
                message: "Please log in to continue.".to_string(),
                retry_after_secs: None,
                reason: None,
            },
        ),
        GateError::AuthFailed => (
            StatusCode::UNAUTHORIZED,
            ErrorBody {
                error: "auth_failed",
                message: "Invalid password.".to_string(),
                retry_after_secs: None,
                reason: None,
            },
        ),
    };
    (status, Json(body)).into_response()
}

/// Liveness probe.
pub async fn health() -> &'static str {
    "ok"
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    /// Whether the password gate is active.
    pub auth_required: bool,
    /// Whether this session has passed it.
    pub authenticated: bool,
    /// Configured/not-configured per known secret. Never the values.
    pub secrets: BTreeMap<&'static str, bool>,
}

/// Gate and configuration status for the UI.
pub async fn status(
    State(state): State<AppState>,
    Extension(CurrentSession(id)): Extension<CurrentSession>,
) -> Json<StatusResponse> {
    let secrets = KNOWN_SECRET_NAMES
        .iter()
        .map(|name| (*name, state.pipeline.is_configured(name)))
        .collect();
    Json(StatusResponse {
        auth_required: state.pipeline.auth_required(),
        authenticated: state.pipeline.is_unlocked(id),
        secrets,
    })
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub authenticated: bool,
}

/// Attempt a login. The brute-force delay has already been served by
/// the time a failure response leaves this handler.
pub async fn login(
    State(state): State<AppState>,
    Extension(CurrentSession(id)): Extension<CurrentSession>,
    Json(request): Json<LoginRequest>,
) -> Response {
    match state.pipeline.authenticate(id, &request.password).await {
        AuthOutcome::Unlocked => Json(LoginResponse {
            authenticated: true,
        })
        .into_response(),
        AuthOutcome::Locked { .. } => gate_error_response(GateError::AuthFailed),
    }
}

/// Log the session out. Rate-limit state survives.
pub async fn logout(
    State(state): State<AppState>,
    Extension(CurrentSession(id)): Extension<CurrentSession>,
) -> Json<LoginResponse> {
    state.pipeline.logout(id);
    Json(LoginResponse {
        authenticated: false,
    })
}

#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    pub partner1: Vec<String>,
    pub partner2: Vec<String>,
}

/// Run a full submission through the pipeline and hand back the
/// prompt-safe text for the recommendation collaborator.
pub async fn submit(
    State(state): State<AppState>,
    Extension(CurrentSession(id)): Extension<CurrentSession>,
    Json(request): Json<SubmitRequest>,
) -> Response {
    match state
        .pipeline
        .prepare_submission(id, &request.partner1, &request.partner2)
    {
        Ok(prepared) => Json(prepared).into_response(),
        Err(err) => gate_error_response(err),
    }
}

/// Standalone admission probe, for callers that meter other expensive
/// actions (PDF export, metadata refresh) against the same quota.
pub async fn admit(
    State(state): State<AppState>,
    Extension(CurrentSession(id)): Extension<CurrentSession>,
) -> Response {
    match state.pipeline.admit(id) {
        Admission::Admitted => StatusCode::NO_CONTENT.into_response(),
        Admission::Rejected { retry_after_secs } => {
            gate_error_response(GateError::RateLimited { retry_after_secs })
        }
    }
}

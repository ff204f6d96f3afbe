use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::ports::CredentialServicePort;
use crate::inbound::http::router::AppState;

/// Token introspection. Any well-formed request answers 200; `username` is
/// reported whenever the signature verifies, `valid` only while the token is
/// unexpired.
pub async fn validate(
    State(state): State<AppState>,
    payload: Result<Json<ValidateRequestBody>, JsonRejection>,
) -> Result<ApiSuccess<ValidateResponseData>, ApiError> {
    let Json(body) = payload?;
    let username = state.credential_service.validate(&body.token);
    let valid = state.credential_service.verify_token(&body.token);

    Ok(ApiSuccess::new(
        StatusCode::OK,
        ValidateResponseData { valid, username },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ValidateRequestBody {
    token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidateResponseData {
    pub valid: bool,
    pub username: Option<String>,
}

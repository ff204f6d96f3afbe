use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::ports::CredentialServicePort;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequestBody>, JsonRejection>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    let Json(body) = payload?;
    let issued = state
        .credential_service
        .login(&body.username, &body.password)
        .await?
        .ok_or_else(ApiError::invalid_credentials)?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        LoginResponseData {
            token: issued.token,
            token_type: "Bearer".to_string(),
            expires_at: issued.expires_at,
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    username: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub token: String,
    pub token_type: String,
    pub expires_at: DateTime<Utc>,
}

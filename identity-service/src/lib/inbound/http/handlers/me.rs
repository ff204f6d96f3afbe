use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::register::UserData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::ports::CredentialServicePort;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn me(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    state
        .credential_service
        .get_user(&caller.username)
        .await?
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))
}

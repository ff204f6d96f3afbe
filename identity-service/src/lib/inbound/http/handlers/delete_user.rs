use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;
use crate::user::ports::CredentialServicePort;

pub async fn delete_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<ApiSuccess<DeleteUserResponseData>, ApiError> {
    if !state.credential_service.delete_user(&username).await? {
        return Err(ApiError::NotFound("User not found".to_string()));
    }

    Ok(ApiSuccess::new(
        StatusCode::OK,
        DeleteUserResponseData { deleted: true },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteUserResponseData {
    pub deleted: bool,
}

use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;

pub async fn verify(
    Extension(user): Extension<AuthenticatedUser>,
) -> ApiSuccess<VerifyResponseData> {
    ApiSuccess::new(
        StatusCode::OK,
        VerifyResponseData {
            valid: true,
            username: user.username,
        },
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerifyResponseData {
    pub valid: bool,
    pub username: String,
}

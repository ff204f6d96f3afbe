use axum::extract::Request;
use axum::extract::State;
use axum::http;
use axum::middleware::Next;
use axum::response::Response;

use super::handlers::ApiError;
use crate::domain::user::ports::CredentialServicePort;
use crate::inbound::http::router::AppState;

/// Extension type to store the authenticated username in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub username: String,
}

/// Middleware that requires a signed, unexpired bearer token and adds the
/// caller's username to request extensions.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token_from_header(&req)?;

    let username = state
        .credential_service
        .validate(token)
        .filter(|_| state.credential_service.verify_token(token))
        .ok_or_else(|| {
            tracing::warn!("Bearer token rejected");
            ApiError::invalid_token()
        })?;

    req.extensions_mut().insert(AuthenticatedUser { username });

    Ok(next.run(req).await)
}

fn extract_token_from_header(req: &Request) -> Result<&str, ApiError> {
    req.headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(bearer_token)
        .ok_or_else(|| ApiError::Unauthorized("Missing or invalid token".to_string()))
}

/// Strip the `Bearer ` scheme from an Authorization header value.
fn bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

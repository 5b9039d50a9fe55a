use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::error::ApiError;
use crate::server::AppState;
use super::auth::AuthUser;

/// Middleware that resolves the token subject to a stored user.
///
/// Runs after [`super::jwt_auth_middleware`]; injects the acting
/// [`crate::auth::Principal`] that handlers pass on to the services.
pub async fn validate_user_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_user = request
        .extensions()
        .get::<AuthUser>()
        .cloned()
        .ok_or_else(|| ApiError::unauthorized("JWT authentication required before user validation"))?;

    let principal = state
        .users
        .principal_for(auth_user.user_id)
        .await?
        .ok_or_else(|| {
            tracing::warn!(
                "User validation failed: user '{}' (ID: {}) not found",
                auth_user.username,
                auth_user.user_id
            );
            ApiError::unauthorized(format!("User '{}' no longer exists", auth_user.username))
        })?;

    tracing::debug!("User validation successful: {} ({})", principal.username, principal.id);

    request.extensions_mut().insert(principal);

    Ok(next.run(request).await)
}

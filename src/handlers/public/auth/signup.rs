// handlers/public/auth/signup.rs - POST /auth/signup handler

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Serialize;
use uuid::Uuid;

use crate::error::ApiError;
use crate::handlers::utils::parse_json_body;
use crate::server::AppState;
use crate::services::SignupRequest;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupResponse {
    pub id: Uuid,
    pub username: String,
    pub display_name: String,
}

/// POST /auth/signup - Register a new user account
///
/// Expected Input:
/// ```json
/// { "username": "arman", "password": "pass", "displayName": "Arman Y" }
/// ```
///
/// Responds 200 with the created account (never the password hash),
/// 400 for blank fields and 409 when the username is taken.
pub async fn post(
    State(state): State<AppState>,
    body: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<Json<SignupResponse>, ApiError> {
    let request = parse_json_body(body)?;
    let user = state.users.signup(request).await?;

    Ok(Json(SignupResponse {
        id: user.id,
        username: user.username,
        display_name: user.display_name,
    }))
}

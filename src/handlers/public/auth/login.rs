// handlers/public/auth/login.rs - POST /auth/login handler

use axum::{extract::rejection::JsonRejection, extract::State, Json};

use crate::error::ApiError;
use crate::handlers::utils::parse_json_body;
use crate::server::AppState;
use crate::services::{LoginRequest, LoginResponse};

/// POST /auth/login - Authenticate user and receive JWT token
///
/// Expected Input:
/// ```json
/// { "username": "arman", "password": "pass" }
/// ```
///
/// Expected Output (Success):
/// ```json
/// { "token": "eyJhbGciOiJIUzI1NiI...", "expiresIn": 604800 }
/// ```
///
/// Unknown users and wrong passwords both answer 401 with the same message.
pub async fn post(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiError> {
    let request = parse_json_body(body)?;
    let response = state.users.login(request).await?;
    Ok(Json(response))
}

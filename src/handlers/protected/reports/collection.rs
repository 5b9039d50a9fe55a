use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use uuid::Uuid;

use crate::auth::Principal;
use crate::database::models::ReportDraft;
use crate::error::ApiError;
use crate::handlers::utils::parse_json_body;
use crate::server::AppState;

/// POST /reports - Create a report owned by the caller, returning its new id
pub async fn post(
    State(state): State<AppState>,
    principal: Option<Extension<Principal>>,
    body: Result<Json<ReportDraft>, JsonRejection>,
) -> Result<Json<Uuid>, ApiError> {
    let draft = parse_json_body(body)?;
    tracing::debug!("Entering create report with draft: {:?}", draft);

    let id = state
        .reports
        .create(principal.as_ref().map(|Extension(p)| p), draft)
        .await?;

    tracing::debug!("Exiting create report with id: {}", id);
    Ok(Json(id))
}

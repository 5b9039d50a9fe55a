use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Extension, Json,
};
use uuid::Uuid;

use crate::auth::Principal;
use crate::database::models::ReportDraft;
use crate::error::ApiError;
use crate::handlers::utils::{parse_json_body, parse_uuid_path};
use crate::server::AppState;

use super::ReportDto;

fn acting(principal: &Option<Extension<Principal>>) -> Option<&Principal> {
    principal.as_ref().map(|Extension(p)| p)
}

/// GET /reports/:id - Fetch one of the caller's reports
pub async fn get(
    State(state): State<AppState>,
    principal: Option<Extension<Principal>>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<ReportDto>, ApiError> {
    let id = parse_uuid_path(path)?;
    tracing::debug!("Entering get report with id: {}", id);

    let report = state.reports.get_by_uuid(acting(&principal), Some(id)).await?;

    Ok(Json(ReportDto::from(report)))
}

/// POST /reports/:id - Replace title and description of one of the caller's reports
pub async fn post(
    State(state): State<AppState>,
    principal: Option<Extension<Principal>>,
    path: Result<Path<String>, PathRejection>,
    body: Result<Json<ReportDraft>, JsonRejection>,
) -> Result<Json<Uuid>, ApiError> {
    let id = parse_uuid_path(path)?;
    let draft = parse_json_body(body)?;
    tracing::debug!("Entering update report with id: {} and draft: {:?}", id, draft);

    let updated = state.reports.update(acting(&principal), id, draft).await?;

    tracing::debug!("Exiting update report with id: {}", updated);
    Ok(Json(updated))
}

/// DELETE /reports/:id - Permanently remove one of the caller's reports
pub async fn delete(
    State(state): State<AppState>,
    principal: Option<Extension<Principal>>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<bool>, ApiError> {
    let id = parse_uuid_path(path)?;
    tracing::debug!("Entering delete report with id: {}", id);

    state.reports.delete_by_uuid(acting(&principal), id).await?;

    tracing::debug!("Exiting delete report with success");
    Ok(Json(true))
}

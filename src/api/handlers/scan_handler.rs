use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::debug;

use crate::{
    api::{
        app_state::AppState,
        dto::scan_dto::*,
        extract::ApiJson,
        handlers::{fetch, not_blank, paginate, related, scan_note_handler},
        pagination::ListRequest,
    },
    error::{AppError, Result},
    models::Scan,
    services::cascade,
    storage::Filter,
};

/// Project a scan with its notes, oldest first
async fn project(state: &AppState, scan: Scan) -> Result<ScanResponse> {
    let mut notes = state
        .repos
        .scan_notes
        .find(&Filter::new().eq("scan", scan.id.clone()))
        .await?;
    notes.sort_by(|a, b| a.created.cmp(&b.created));

    let notes = scan_note_handler::project_all(state, notes).await?;
    Ok(ScanResponse::new(scan, notes))
}

/// List scans, optionally filtered by `experiment` or `site`
///
/// GET /api/v1/scans
pub async fn list_scans(
    State(state): State<AppState>,
    list: ListRequest,
) -> Result<impl IntoResponse> {
    let (count, window, scans) =
        paginate(state.repos.scans.as_ref(), &list, &state.pagination).await?;
    debug!("Listing scans: count={}, offset={}", count, window.offset);

    let mut results = Vec::with_capacity(scans.len());
    for scan in scans {
        results.push(project(&state, scan).await?);
    }
    Ok(Json(list.page(count, window, results)))
}

async fn validate(state: &AppState, request: &ScanRequest) -> Result<()> {
    not_blank("scan_id", &request.scan_id)?;
    not_blank("scan_type", &request.scan_type)?;
    related(state.repos.experiments.as_ref(), "experiment", &request.experiment).await?;
    related(state.repos.sites.as_ref(), "site", &request.site).await?;
    Ok(())
}

/// POST /api/v1/scans
pub async fn create_scan(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<ScanRequest>,
) -> Result<impl IntoResponse> {
    debug!("Creating scan: {} ({})", request.scan_id, request.scan_type);
    validate(&state, &request).await?;

    let mut scan = Scan::new(
        &request.experiment,
        &request.site,
        &request.scan_id,
        &request.scan_type,
    );
    scan.decision = request.decision;

    let created = state.repos.scans.create(&scan).await?;
    Ok((StatusCode::CREATED, Json(ScanResponse::new(created, Vec::new()))))
}

/// GET /api/v1/scans/:id
pub async fn get_scan(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    debug!("Getting scan: {}", id);
    let scan = fetch(state.repos.scans.as_ref(), &id).await?;
    Ok(Json(project(&state, scan).await?))
}

/// PUT /api/v1/scans/:id
pub async fn update_scan(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(request): ApiJson<ScanRequest>,
) -> Result<impl IntoResponse> {
    debug!("Updating scan: {} decision={}", id, request.decision);

    let mut scan = fetch(state.repos.scans.as_ref(), &id).await?;
    validate(&state, &request).await?;

    scan.scan_id = request.scan_id;
    scan.scan_type = request.scan_type;
    scan.decision = request.decision;
    scan.experiment = request.experiment;
    scan.site = request.site;

    let updated = state
        .repos
        .scans
        .update(&id, &scan)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("scan not found: {}", id)))?;

    Ok(Json(project(&state, updated).await?))
}

/// Delete a scan with its images, notes and annotations
///
/// DELETE /api/v1/scans/:id
pub async fn delete_scan(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    debug!("Deleting scan: {}", id);

    if !cascade::delete_scan(&state.repos, &id).await? {
        return Err(AppError::NotFound(format!("scan not found: {}", id)));
    }
    Ok(StatusCode::NO_CONTENT)
}

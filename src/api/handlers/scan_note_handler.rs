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
        dto::scan_note_dto::*,
        extract::ApiJson,
        handlers::{fetch, not_blank, paginate, related},
        pagination::ListRequest,
    },
    error::{AppError, Result},
    models::ScanNote,
};

/// Project a note with its creator's name
pub(crate) async fn project(state: &AppState, note: ScanNote) -> Result<ScanNoteResponse> {
    let creator = state
        .repos
        .users
        .get_by_id(&note.creator)
        .await?
        .ok_or_else(|| {
            AppError::Internal(format!(
                "scan note {} references missing user {}",
                note.id, note.creator
            ))
        })?;
    Ok(ScanNoteResponse::new(note, creator))
}

pub(crate) async fn project_all(
    state: &AppState,
    notes: Vec<ScanNote>,
) -> Result<Vec<ScanNoteResponse>> {
    let mut responses = Vec::with_capacity(notes.len());
    for note in notes {
        responses.push(project(state, note).await?);
    }
    Ok(responses)
}

/// List scan notes, optionally filtered by `scan`
///
/// GET /api/v1/scan_notes
pub async fn list_scan_notes(
    State(state): State<AppState>,
    list: ListRequest,
) -> Result<impl IntoResponse> {
    let (count, window, notes) =
        paginate(state.repos.scan_notes.as_ref(), &list, &state.pagination).await?;
    debug!("Listing scan notes: count={}, offset={}", count, window.offset);

    let results = project_all(&state, notes).await?;
    Ok(Json(list.page(count, window, results)))
}

/// POST /api/v1/scan_notes
pub async fn create_scan_note(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateScanNoteRequest>,
) -> Result<impl IntoResponse> {
    debug!("Creating note on scan {}", request.scan);
    not_blank("note", &request.note)?;
    let scan = related(state.repos.scans.as_ref(), "scan", &request.scan).await?;
    let creator = related(state.repos.users.as_ref(), "creator", &request.creator).await?;

    let note = ScanNote::new(&scan.id, &creator.id, &request.note);
    let created = state.repos.scan_notes.create(&note).await?;

    Ok((
        StatusCode::CREATED,
        Json(ScanNoteResponse::new(created, creator)),
    ))
}

/// GET /api/v1/scan_notes/:id
pub async fn get_scan_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let note = fetch(state.repos.scan_notes.as_ref(), &id).await?;
    Ok(Json(project(&state, note).await?))
}

/// Edit the note text; bumps `modified`
///
/// PUT /api/v1/scan_notes/:id
pub async fn update_scan_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(request): ApiJson<UpdateScanNoteRequest>,
) -> Result<impl IntoResponse> {
    debug!("Updating scan note: {}", id);
    not_blank("note", &request.note)?;

    let mut note = fetch(state.repos.scan_notes.as_ref(), &id).await?;
    note.edit(&request.note);

    let updated = state
        .repos
        .scan_notes
        .update(&id, &note)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("scan_note not found: {}", id)))?;

    Ok(Json(project(&state, updated).await?))
}

/// DELETE /api/v1/scan_notes/:id
pub async fn delete_scan_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    debug!("Deleting scan note: {}", id);

    if !state.repos.scan_notes.delete(&id).await? {
        return Err(AppError::NotFound(format!("scan_note not found: {}", id)));
    }
    Ok(StatusCode::NO_CONTENT)
}

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
        dto::annotation_dto::*,
        extract::ApiJson,
        handlers::{fetch, paginate, related},
        pagination::ListRequest,
    },
    error::{AppError, Result},
    models::Annotation,
};

/// List annotations, optionally filtered by `scan` or `creator`
///
/// GET /api/v1/annotations
pub async fn list_annotations(
    State(state): State<AppState>,
    list: ListRequest,
) -> Result<impl IntoResponse> {
    let (count, window, annotations) =
        paginate(state.repos.annotations.as_ref(), &list, &state.pagination).await?;

    let results: Vec<AnnotationResponse> = annotations.into_iter().map(Into::into).collect();
    Ok(Json(list.page(count, window, results)))
}

/// POST /api/v1/annotations
pub async fn create_annotation(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<AnnotationRequest>,
) -> Result<impl IntoResponse> {
    debug!("Annotating scan {} as {}", request.scan, request.decision);
    let scan = related(state.repos.scans.as_ref(), "scan", &request.scan).await?;
    let creator = related(state.repos.users.as_ref(), "creator", &request.creator).await?;

    let annotation = Annotation::new(&scan.id, &creator.id, request.decision);
    let created = state.repos.annotations.create(&annotation).await?;

    Ok((StatusCode::CREATED, Json(AnnotationResponse::from(created))))
}

/// GET /api/v1/annotations/:id
pub async fn get_annotation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let annotation = fetch(state.repos.annotations.as_ref(), &id).await?;
    Ok(Json(AnnotationResponse::from(annotation)))
}

/// PUT /api/v1/annotations/:id
pub async fn update_annotation(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(request): ApiJson<AnnotationRequest>,
) -> Result<impl IntoResponse> {
    debug!("Updating annotation: {}", id);

    let mut annotation = fetch(state.repos.annotations.as_ref(), &id).await?;
    related(state.repos.scans.as_ref(), "scan", &request.scan).await?;
    related(state.repos.users.as_ref(), "creator", &request.creator).await?;

    annotation.scan = request.scan;
    annotation.creator = request.creator;
    annotation.decision = request.decision;

    let updated = state
        .repos
        .annotations
        .update(&id, &annotation)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("annotation not found: {}", id)))?;

    Ok(Json(AnnotationResponse::from(updated)))
}

/// DELETE /api/v1/annotations/:id
pub async fn delete_annotation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    if !state.repos.annotations.delete(&id).await? {
        return Err(AppError::NotFound(format!("annotation not found: {}", id)));
    }
    Ok(StatusCode::NO_CONTENT)
}

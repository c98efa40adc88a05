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
        dto::session_dto::*,
        extract::ApiJson,
        handlers::{fetch, not_blank, paginate},
        pagination::ListRequest,
    },
    error::AppError,
    models::Session,
    services::cascade,
};

/// List sessions
///
/// GET /api/v1/sessions
pub async fn list_sessions(
    State(state): State<AppState>,
    list: ListRequest,
) -> Result<impl IntoResponse, AppError> {
    let (count, window, sessions) =
        paginate(state.repos.sessions.as_ref(), &list, &state.pagination).await?;
    debug!("Listing sessions: count={}, offset={}", count, window.offset);

    let results: Vec<SessionResponse> = sessions.into_iter().map(Into::into).collect();
    Ok(Json(list.page(count, window, results)))
}

/// POST /api/v1/sessions
pub async fn create_session(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateSessionRequest>,
) -> Result<impl IntoResponse, AppError> {
    debug!("Creating session: {}", request.name);
    not_blank("name", &request.name)?;

    let session =
        Session::new(&request.name).with_paths(&request.importpath, &request.exportpath);
    let created = state.repos.sessions.create(&session).await?;

    Ok((StatusCode::CREATED, Json(SessionResponse::from(created))))
}

/// GET /api/v1/sessions/:id
pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    debug!("Getting session: {}", id);
    let session = fetch(state.repos.sessions.as_ref(), &id).await?;
    Ok(Json(SessionResponse::from(session)))
}

/// PUT /api/v1/sessions/:id
pub async fn update_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(request): ApiJson<UpdateSessionRequest>,
) -> Result<impl IntoResponse, AppError> {
    debug!("Updating session: {}", id);
    not_blank("name", &request.name)?;

    let mut session = fetch(state.repos.sessions.as_ref(), &id).await?;
    session.name = request.name;

    let updated = state
        .repos
        .sessions
        .update(&id, &session)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("session not found: {}", id)))?;

    Ok(Json(SessionResponse::from(updated)))
}

/// Delete a session together with its experiments and their scans
///
/// DELETE /api/v1/sessions/:id
pub async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    debug!("Deleting session: {}", id);

    if !cascade::delete_session(&state.repos, &id).await? {
        return Err(AppError::NotFound(format!("session not found: {}", id)));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/sessions/:id/settings
pub async fn get_session_settings(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let session = fetch(state.repos.sessions.as_ref(), &id).await?;
    Ok(Json(SessionSettings::from(&session)))
}

/// Replace both import and export paths
///
/// PUT /api/v1/sessions/:id/settings
pub async fn update_session_settings(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(settings): ApiJson<SessionSettings>,
) -> Result<impl IntoResponse, AppError> {
    debug!(
        "Updating session settings: {} import={} export={}",
        id, settings.importpath, settings.exportpath
    );

    let session = fetch(state.repos.sessions.as_ref(), &id)
        .await?
        .with_paths(&settings.importpath, &settings.exportpath);

    let updated = state
        .repos
        .sessions
        .update(&id, &session)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("session not found: {}", id)))?;

    Ok(Json(SessionSettings::from(&updated)))
}

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use std::collections::HashMap;
use tracing::debug;

use crate::{
    api::{
        app_state::AppState,
        dto::experiment_dto::*,
        extract::ApiJson,
        handlers::{fetch, not_blank, paginate, related},
        pagination::ListRequest,
    },
    error::{AppError, Result},
    models::{Experiment, Session},
    services::cascade,
};

/// Attach the owning session's `{id, name}`; sessions are looked up once per
/// distinct id.
async fn project_all(
    state: &AppState,
    experiments: Vec<Experiment>,
) -> Result<Vec<ExperimentResponse>> {
    let mut sessions: HashMap<String, Session> = HashMap::new();
    let mut responses = Vec::with_capacity(experiments.len());

    for experiment in experiments {
        if !sessions.contains_key(&experiment.session) {
            let session = state
                .repos
                .sessions
                .get_by_id(&experiment.session)
                .await?
                .ok_or_else(|| {
                    AppError::Internal(format!(
                        "experiment {} references missing session {}",
                        experiment.id, experiment.session
                    ))
                })?;
            sessions.insert(experiment.session.clone(), session);
        }
        let session = sessions[&experiment.session].clone();
        responses.push(ExperimentResponse::new(experiment, session));
    }

    Ok(responses)
}

async fn project(state: &AppState, experiment: Experiment) -> Result<ExperimentResponse> {
    let mut projected = project_all(state, vec![experiment]).await?;
    projected
        .pop()
        .ok_or_else(|| AppError::Internal("empty projection".to_string()))
}

/// List experiments, optionally filtered by `session`
///
/// GET /api/v1/experiments
pub async fn list_experiments(
    State(state): State<AppState>,
    list: ListRequest,
) -> Result<impl IntoResponse> {
    let (count, window, experiments) =
        paginate(state.repos.experiments.as_ref(), &list, &state.pagination).await?;
    debug!("Listing experiments: count={}, offset={}", count, window.offset);

    let results = project_all(&state, experiments).await?;
    Ok(Json(list.page(count, window, results)))
}

/// POST /api/v1/experiments
pub async fn create_experiment(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<ExperimentRequest>,
) -> Result<impl IntoResponse> {
    debug!("Creating experiment: {} in session {}", request.name, request.session);
    not_blank("name", &request.name)?;
    let session = related(state.repos.sessions.as_ref(), "session", &request.session).await?;

    let experiment = Experiment::new(&session.id, &request.name).with_note(&request.note);
    let created = state.repos.experiments.create(&experiment).await?;

    Ok((
        StatusCode::CREATED,
        Json(ExperimentResponse::new(created, session)),
    ))
}

/// GET /api/v1/experiments/:id
pub async fn get_experiment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    debug!("Getting experiment: {}", id);
    let experiment = fetch(state.repos.experiments.as_ref(), &id).await?;
    Ok(Json(project(&state, experiment).await?))
}

/// PUT /api/v1/experiments/:id
pub async fn update_experiment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(request): ApiJson<ExperimentRequest>,
) -> Result<impl IntoResponse> {
    debug!("Updating experiment: {}", id);
    not_blank("name", &request.name)?;

    let mut experiment = fetch(state.repos.experiments.as_ref(), &id).await?;
    let session = related(state.repos.sessions.as_ref(), "session", &request.session).await?;

    experiment.name = request.name;
    experiment.note = request.note;
    experiment.session = session.id.clone();

    let updated = state
        .repos
        .experiments
        .update(&id, &experiment)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("experiment not found: {}", id)))?;

    Ok(Json(ExperimentResponse::new(updated, session)))
}

/// Delete an experiment together with its scans
///
/// DELETE /api/v1/experiments/:id
pub async fn delete_experiment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    debug!("Deleting experiment: {}", id);

    if !cascade::delete_experiment(&state.repos, &id).await? {
        return Err(AppError::NotFound(format!("experiment not found: {}", id)));
    }
    Ok(StatusCode::NO_CONTENT)
}

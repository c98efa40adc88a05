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
        dto::site_dto::*,
        extract::ApiJson,
        handlers::{fetch, not_blank, paginate},
        pagination::ListRequest,
    },
    error::{AppError, Result},
    models::Site,
    services::cascade,
};

/// GET /api/v1/sites
pub async fn list_sites(
    State(state): State<AppState>,
    list: ListRequest,
) -> Result<impl IntoResponse> {
    let (count, window, sites) =
        paginate(state.repos.sites.as_ref(), &list, &state.pagination).await?;

    let results: Vec<SiteResponse> = sites.into_iter().map(Into::into).collect();
    Ok(Json(list.page(count, window, results)))
}

/// POST /api/v1/sites
pub async fn create_site(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<SiteRequest>,
) -> Result<impl IntoResponse> {
    debug!("Creating site: {}", request.name);
    not_blank("name", &request.name)?;

    let created = state.repos.sites.create(&Site::new(&request.name)).await?;
    Ok((StatusCode::CREATED, Json(SiteResponse::from(created))))
}

/// GET /api/v1/sites/:id
pub async fn get_site(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let site = fetch(state.repos.sites.as_ref(), &id).await?;
    Ok(Json(SiteResponse::from(site)))
}

/// PUT /api/v1/sites/:id
pub async fn update_site(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(request): ApiJson<SiteRequest>,
) -> Result<impl IntoResponse> {
    debug!("Updating site: {}", id);
    not_blank("name", &request.name)?;

    let mut site = fetch(state.repos.sites.as_ref(), &id).await?;
    site.name = request.name;

    let updated = state
        .repos
        .sites
        .update(&id, &site)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("site not found: {}", id)))?;

    Ok(Json(SiteResponse::from(updated)))
}

/// Delete a site and the scans acquired there
///
/// DELETE /api/v1/sites/:id
pub async fn delete_site(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    debug!("Deleting site: {}", id);

    if !cascade::delete_site(&state.repos, &id).await? {
        return Err(AppError::NotFound(format!("site not found: {}", id)));
    }
    Ok(StatusCode::NO_CONTENT)
}

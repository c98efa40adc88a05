use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::debug;
use validator::ValidateEmail;

use crate::{
    api::{
        app_state::AppState,
        dto::user_dto::*,
        extract::ApiJson,
        handlers::{fetch, not_blank, paginate},
        pagination::ListRequest,
    },
    error::{AppError, Result},
    models::User,
    services::cascade,
};

fn validate(request: &UserRequest) -> Result<()> {
    not_blank("username", &request.username)?;
    if !request.email.is_empty() && !request.email.validate_email() {
        return Err(AppError::Validation(format!(
            "email: enter a valid email address ({})",
            request.email
        )));
    }
    Ok(())
}

fn apply(user: &mut User, request: UserRequest) {
    user.username = request.username;
    user.email = request.email;
    user.first_name = request.first_name;
    user.last_name = request.last_name;
    user.is_superuser = request.is_superuser;
}

/// GET /api/v1/users
pub async fn list_users(
    State(state): State<AppState>,
    list: ListRequest,
) -> Result<impl IntoResponse> {
    let (count, window, users) =
        paginate(state.repos.users.as_ref(), &list, &state.pagination).await?;

    let results: Vec<UserResponse> = users.into_iter().map(Into::into).collect();
    Ok(Json(list.page(count, window, results)))
}

/// POST /api/v1/users
pub async fn create_user(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<UserRequest>,
) -> Result<impl IntoResponse> {
    debug!("Creating user: {}", request.username);
    validate(&request)?;

    let mut user = User::new(&request.username);
    apply(&mut user, request);

    let created = state.repos.users.create(&user).await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(created))))
}

/// GET /api/v1/users/:id
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let user = fetch(state.repos.users.as_ref(), &id).await?;
    Ok(Json(UserResponse::from(user)))
}

/// PUT /api/v1/users/:id
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(request): ApiJson<UserRequest>,
) -> Result<impl IntoResponse> {
    debug!("Updating user: {}", id);
    validate(&request)?;

    let mut user = fetch(state.repos.users.as_ref(), &id).await?;
    apply(&mut user, request);

    let updated = state
        .repos
        .users
        .update(&id, &user)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("user not found: {}", id)))?;

    Ok(Json(UserResponse::from(updated)))
}

/// Delete a user with the notes and annotations they created
///
/// DELETE /api/v1/users/:id
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    debug!("Deleting user: {}", id);

    if !cascade::delete_user(&state.repos, &id).await? {
        return Err(AppError::NotFound(format!("user not found: {}", id)));
    }
    Ok(StatusCode::NO_CONTENT)
}

//! Handlers 模块
//!
//! HTTP 请求处理程序，每个资源一组 list/retrieve/create/update/delete。

pub mod annotation_handler;
pub mod email_handler;
pub mod experiment_handler;
pub mod image_handler;
pub mod scan_handler;
pub mod scan_note_handler;
pub mod session_handler;
pub mod site_handler;
pub mod user_handler;

use crate::api::pagination::{ListRequest, Window};
use crate::config::config::PaginationConfig;
use crate::error::{AppError, Result};
use crate::storage::{Filter, Record, Repository};

/// Load a row addressed by the request path, or 404
pub(crate) async fn fetch<T: Record>(repo: &dyn Repository<T>, id: &str) -> Result<T> {
    repo.get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("{} not found: {}", T::TABLE, id)))
}

/// Load a row referenced by a write payload, or 400
pub(crate) async fn related<T: Record>(
    repo: &dyn Repository<T>,
    field: &str,
    id: &str,
) -> Result<T> {
    repo.get_by_id(id).await?.ok_or_else(|| {
        AppError::Validation(format!(
            "{}: invalid pk \"{}\" - object does not exist",
            field, id
        ))
    })
}

pub(crate) fn not_blank(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!(
            "{}: this field may not be blank",
            field
        )));
    }
    Ok(())
}

/// Count and fetch one page of rows matching the request's filters
pub(crate) async fn paginate<T: Record>(
    repo: &dyn Repository<T>,
    list: &ListRequest,
    config: &PaginationConfig,
) -> Result<(u64, Window, Vec<T>)> {
    let filter = Filter::from_params(T::FILTER_FIELDS, &list.params);
    let window = list.window(config);

    let count = repo.count(&filter).await?;
    let rows = if window.is_past_end(count) {
        Vec::new()
    } else {
        repo.list(&filter, window.limit, window.offset).await?
    };

    Ok((count, window, rows))
}

//! Limit/offset pagination
//!
//! List endpoints answer with `{count, next, previous, results}`. Page links
//! keep every other query parameter and are sorted by key.

use axum::{
    async_trait,
    extract::{FromRequestParts, OriginalUri, Query},
    http::{header, request::Parts},
};
use serde::Serialize;
use std::collections::HashMap;

use crate::config::config::PaginationConfig;
use crate::error::AppError;

/// Offsets beyond this cannot be bound as a database integer
const MAX_OFFSET: usize = i64::MAX as usize;

/// Paginated list envelope
#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

/// Resolved limit/offset window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub limit: usize,
    pub offset: usize,
}

impl Window {
    /// Whether the window starts past the last of `count` rows
    pub fn is_past_end(&self, count: u64) -> bool {
        self.offset as u64 >= count
    }
}

/// Request context for list endpoints: decoded query parameters plus the
/// request URL used to build page links.
#[derive(Debug, Clone)]
pub struct ListRequest {
    pub params: HashMap<String, String>,
    pairs: Vec<(String, String)>,
    base_url: String,
}

impl ListRequest {
    pub fn new(host: Option<&str>, path: &str, pairs: Vec<(String, String)>) -> Self {
        let params = pairs.iter().cloned().collect();
        let base_url = match host {
            Some(host) => format!("http://{}{}", host, path),
            None => path.to_string(),
        };
        Self {
            params,
            pairs,
            base_url,
        }
    }

    /// Resolve the requested window. Missing, zero or unparsable limits fall
    /// back to the default; limits above the maximum are capped.
    pub fn window(&self, config: &PaginationConfig) -> Window {
        let limit = self
            .params
            .get("limit")
            .and_then(|v| v.parse::<usize>().ok())
            .filter(|&l| l > 0)
            .map(|l| l.min(config.max_limit))
            .unwrap_or(config.default_limit);
        let offset = self
            .params
            .get("offset")
            .and_then(|v| v.parse::<usize>().ok())
            .map(|o| o.min(MAX_OFFSET))
            .unwrap_or(0);
        Window { limit, offset }
    }

    pub fn page<T>(&self, count: u64, window: Window, results: Vec<T>) -> Page<T> {
        let Window { limit, offset } = window;
        let next_offset = offset.saturating_add(limit);

        let next = if (next_offset as u64) < count {
            Some(self.link(limit, Some(next_offset)))
        } else {
            None
        };

        let previous = (offset > 0).then(|| {
            if offset <= limit {
                self.link(limit, None)
            } else {
                self.link(limit, Some(offset - limit))
            }
        });

        Page {
            count,
            next,
            previous,
            results,
        }
    }

    fn link(&self, limit: usize, offset: Option<usize>) -> String {
        let mut pairs: Vec<(String, String)> = self
            .pairs
            .iter()
            .filter(|(k, _)| k != "limit" && k != "offset")
            .cloned()
            .collect();
        pairs.push(("limit".to_string(), limit.to_string()));
        if let Some(offset) = offset {
            pairs.push(("offset".to_string(), offset.to_string()));
        }
        pairs.sort_by(|a, b| a.0.cmp(&b.0));

        let query: Vec<String> = pairs
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect();
        format!("{}?{}", self.base_url, query.join("&"))
    }
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for ListRequest {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::Validation(rejection.body_text()))?;

        // 嵌套路由会去掉前缀，链接使用原始路径
        let path = parts
            .extensions
            .get::<OriginalUri>()
            .map(|original| original.0.path().to_string())
            .unwrap_or_else(|| parts.uri.path().to_string());
        let host = parts
            .headers
            .get(header::HOST)
            .and_then(|value| value.to_str().ok());

        Ok(ListRequest::new(host, &path, pairs))
    }
}

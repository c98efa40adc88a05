//! 可观测性模块
//!
//! 提供 Prometheus 文本格式指标、结构化日志和健康检查。

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::config::LoggingConfig;
use crate::storage::SurrealPool;

// ===== Simple Metrics =====

/// 简单应用指标
#[derive(Default)]
pub struct AppMetrics {
    pub http_requests_total: AtomicU64,
    pub http_request_duration_ms_sum: AtomicU64,
    pub active_connections: AtomicI64,
    pub downloads_total: AtomicU64,
    pub download_bytes_total: AtomicU64,
    pub emails_sent_total: AtomicU64,
    pub errors_total: AtomicU64,
}

impl AppMetrics {
    /// 记录 HTTP 请求
    pub fn record_http_request(&self, duration_ms: u64, server_error: bool) {
        self.http_requests_total.fetch_add(1, Ordering::Relaxed);
        self.http_request_duration_ms_sum
            .fetch_add(duration_ms, Ordering::Relaxed);
        if server_error {
            self.errors_total.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// 记录活跃连接
    pub fn record_connection(&self, delta: i64) {
        self.active_connections.fetch_add(delta, Ordering::Relaxed);
    }

    /// 记录一次图像下载
    pub fn record_download(&self, bytes: u64) {
        self.downloads_total.fetch_add(1, Ordering::Relaxed);
        self.download_bytes_total.fetch_add(bytes, Ordering::Relaxed);
    }

    pub fn record_email(&self) {
        self.emails_sent_total.fetch_add(1, Ordering::Relaxed);
    }

    /// 生成 Prometheus 格式指标
    pub fn gather(&self) -> String {
        let requests = self.http_requests_total.load(Ordering::Relaxed);
        format!(
            r#"# HELP http_requests_total Total HTTP requests
# TYPE http_requests_total counter
http_requests_total {}
# HELP http_request_duration_seconds HTTP request duration in seconds
# TYPE http_request_duration_seconds summary
http_request_duration_seconds_sum {}
http_request_duration_seconds_count {}
# HELP active_connections Active HTTP connections
# TYPE active_connections gauge
active_connections {}
# HELP image_downloads_total Image downloads served
# TYPE image_downloads_total counter
image_downloads_total {}
# HELP image_download_bytes_total Image bytes announced to clients
# TYPE image_download_bytes_total counter
image_download_bytes_total {}
# HELP emails_sent_total Emails handed to the mailer
# TYPE emails_sent_total counter
emails_sent_total {}
# HELP errors_total Responses with a 5xx status
# TYPE errors_total counter
errors_total {}
"#,
            requests,
            self.http_request_duration_ms_sum.load(Ordering::Relaxed) as f64 / 1000.0,
            requests,
            self.active_connections.load(Ordering::Relaxed),
            self.downloads_total.load(Ordering::Relaxed),
            self.download_bytes_total.load(Ordering::Relaxed),
            self.emails_sent_total.load(Ordering::Relaxed),
            self.errors_total.load(Ordering::Relaxed),
        )
    }
}

// ===== Health Check =====

/// 健康检查状态
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: String,
    pub timestamp: String,
    pub version: String,
    pub uptime_seconds: f64,
    pub checks: Vec<HealthCheck>,
}

/// 单个健康检查项
#[derive(Debug, Serialize)]
pub struct HealthCheck {
    pub name: String,
    pub status: String,
    pub message: Option<String>,
    pub latency_ms: Option<u64>,
}

/// 可观测性路由状态
#[derive(Clone)]
pub struct ObservabilityState {
    pub metrics: Arc<AppMetrics>,
    pub db_pool: SurrealPool,
    pub start_time: DateTime<Utc>,
    pub version: String,
}

impl ObservabilityState {
    pub fn new(version: String, metrics: Arc<AppMetrics>, db_pool: SurrealPool) -> Self {
        Self {
            metrics,
            db_pool,
            start_time: Utc::now(),
            version,
        }
    }

    /// 获取应用正常运行时间
    pub fn uptime_seconds(&self) -> f64 {
        (Utc::now() - self.start_time).num_seconds() as f64
    }

    async fn check_database(&self) -> HealthCheck {
        let start = std::time::Instant::now();
        let result = self.db_pool.health_check().await;
        let latency_ms = Some(start.elapsed().as_millis() as u64);

        match result {
            Ok(()) => HealthCheck {
                name: "database".to_string(),
                status: "healthy".to_string(),
                message: None,
                latency_ms,
            },
            Err(e) => HealthCheck {
                name: "database".to_string(),
                status: "unhealthy".to_string(),
                message: Some(e.to_string()),
                latency_ms,
            },
        }
    }
}

// ===== Health Check Handlers =====

/// 获取完整健康状态
pub async fn health_check(State(state): State<Arc<ObservabilityState>>) -> impl IntoResponse {
    let checks = vec![state.check_database().await];
    let all_healthy = checks.iter().all(|c| c.status == "healthy");

    let health_status = HealthStatus {
        status: if all_healthy { "healthy" } else { "unhealthy" }.to_string(),
        timestamp: Utc::now().to_rfc3339(),
        version: state.version.clone(),
        uptime_seconds: state.uptime_seconds(),
        checks,
    };

    let status_code = if all_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(health_status))
}

/// 简单存活检查
pub async fn liveness() -> impl IntoResponse {
    "OK"
}

/// 就绪检查（检查数据库）
pub async fn readiness(State(state): State<Arc<ObservabilityState>>) -> impl IntoResponse {
    match state.db_pool.health_check().await {
        Ok(()) => (StatusCode::OK, "Ready"),
        Err(_) => (StatusCode::SERVICE_UNAVAILABLE, "Not Ready"),
    }
}

/// Prometheus 指标端点
pub async fn metrics(State(state): State<Arc<ObservabilityState>>) -> impl IntoResponse {
    (StatusCode::OK, state.metrics.gather())
}

/// 版本信息端点
pub async fn version(State(state): State<Arc<ObservabilityState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "version": state.version,
        "uptime_seconds": state.uptime_seconds(),
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

/// 创建可观测性路由
pub fn create_observability_router(state: Arc<ObservabilityState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/live", get(liveness))
        .route("/health/ready", get(readiness))
        .route("/metrics", get(metrics))
        .route("/version", get(version))
        .with_state(state)
}

// ===== Structured Logging =====

/// 初始化日志
///
/// `RUST_LOG` 优先于配置中的级别。配置了 `log_dir` 时额外按天滚动写入文件，
/// 返回的 guard 需在进程生命周期内保持。
pub fn init_tracing(config: &LoggingConfig) -> Option<WorkerGuard> {
    let level = if config.level.is_empty() {
        "info"
    } else {
        config.level.as_str()
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let stdout_layer = if config.structured {
        tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_line_number(true)
            .boxed()
    };

    let (file_layer, guard) = match &config.log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "miqa.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .json()
                .with_ansi(false)
                .with_writer(writer)
                .boxed();
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    guard
}

// ===== Request Metrics Middleware =====

/// 记录请求指标的中间件
pub async fn metrics_middleware(
    State(metrics): State<Arc<AppMetrics>>,
    req: axum::extract::Request,
    next: axum::middleware::Next,
) -> axum::response::Response {
    let start = std::time::Instant::now();
    metrics.record_connection(1);

    let response = next.run(req).await;

    let duration_ms = start.elapsed().as_millis() as u64;
    metrics.record_http_request(duration_ms, response.status().is_server_error());
    metrics.record_connection(-1);

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::config::AppConfig;
    use axum::{
        body::{Body, to_bytes},
        http::Request,
    };
    use tower::ServiceExt;

    #[test]
    fn test_metrics_gather() {
        let metrics = AppMetrics::default();
        metrics.record_http_request(100, false);
        metrics.record_http_request(20, true);
        metrics.record_connection(1);
        metrics.record_download(2048);
        metrics.record_email();

        let output = metrics.gather();
        assert!(output.contains("http_requests_total 2"));
        assert!(output.contains("active_connections 1"));
        assert!(output.contains("image_downloads_total 1"));
        assert!(output.contains("image_download_bytes_total 2048"));
        assert!(output.contains("emails_sent_total 1"));
        assert!(output.contains("errors_total 1"));
    }

    async fn observability_app() -> (Router, SurrealPool) {
        let pool = SurrealPool::new(AppConfig::in_memory().database)
            .await
            .unwrap();
        let state = Arc::new(ObservabilityState::new(
            "1.2.3".to_string(),
            Arc::new(AppMetrics::default()),
            pool.clone(),
        ));
        (create_observability_router(state), pool)
    }

    async fn get(app: &Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_readiness_follows_database() {
        let (app, pool) = observability_app().await;

        assert_eq!(get(&app, "/health/ready").await, (StatusCode::OK, "Ready".to_string()));
        assert_eq!(get(&app, "/health/live").await, (StatusCode::OK, "OK".to_string()));

        pool.close().await;
        assert_eq!(
            get(&app, "/health/ready").await,
            (StatusCode::SERVICE_UNAVAILABLE, "Not Ready".to_string())
        );
    }

    #[tokio::test]
    async fn test_health_reports_database_check() {
        let (app, pool) = observability_app().await;

        let (status, body) = get(&app, "/health").await;
        let health: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(status, StatusCode::OK);
        assert_eq!(health["status"], "healthy");
        assert_eq!(health["version"], "1.2.3");
        assert_eq!(health["checks"][0]["name"], "database");

        pool.close().await;
        let (status, body) = get(&app, "/health").await;
        let health: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(health["checks"][0]["status"], "unhealthy");
    }

    #[tokio::test]
    async fn test_version_endpoint() {
        let (app, _pool) = observability_app().await;

        let (status, body) = get(&app, "/version").await;
        let version: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(status, StatusCode::OK);
        assert_eq!(version["version"], "1.2.3");
    }
}

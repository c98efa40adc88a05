use crate::config::config::DatabaseConfig;
use crate::error::{AppError, Result};
use std::sync::Arc;
use surrealdb::{
    Surreal,
    engine::any::{Any, connect},
    opt::auth::Root,
};
use tokio::sync::Mutex;

/// SurrealDB 连接池
#[derive(Clone)]
pub struct SurrealPool {
    /// 数据库连接，关闭后为 None
    db: Arc<Mutex<Option<Surreal<Any>>>>,
}

impl SurrealPool {
    /// 创建新的连接池
    pub async fn new(config: DatabaseConfig) -> Result<Self> {
        let db: Surreal<Any> = connect(config.url.as_str())
            .await
            .map_err(|e| AppError::Connection(format!("{}: {}", config.url, e)))?;

        // 嵌入式引擎（mem://、rocksdb://）无需认证
        if !config.username.is_empty() {
            db.signin(Root {
                username: &config.username,
                password: &config.password,
            })
            .await?;
        }

        // 选择命名空间和数据库
        db.use_ns(config.namespace.as_str())
            .use_db(config.database.as_str())
            .await?;

        tracing::info!(url = %config.url, ns = %config.namespace, db = %config.database, "Connected to SurrealDB");

        Ok(Self {
            db: Arc::new(Mutex::new(Some(db))),
        })
    }

    /// 获取内部数据库实例
    pub async fn inner(&self) -> Result<Surreal<Any>> {
        let guard = self.db.lock().await;
        guard
            .as_ref()
            .cloned()
            .ok_or_else(|| AppError::Connection("Database connection closed".to_string()))
    }

    /// 检查数据库是否可用
    pub async fn health_check(&self) -> Result<()> {
        self.inner().await?.health().await?;
        Ok(())
    }

    /// 关闭连接
    pub async fn close(&self) {
        let mut guard = self.db.lock().await;
        *guard = None;
    }
}

use async_trait::async_trait;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::collections::HashMap;
use std::marker::PhantomData;
use surrealdb::{Surreal, engine::any::Any};

use crate::error::{AppError, Result};

/// 可持久化记录
///
/// `id` 作为记录 ID 存储（`table:⟨id⟩`），不写入文档内容；
/// 查询时通过 `record::id(id)` 投影回字符串。
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// 表名
    const TABLE: &'static str;

    /// 允许精确匹配过滤的字段
    const FILTER_FIELDS: &'static [&'static str] = &[];

    fn id(&self) -> &str;
}

/// 精确匹配过滤条件
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    conditions: Vec<(&'static str, String)>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加 `field = value` 条件
    pub fn eq(mut self, field: &'static str, value: impl Into<String>) -> Self {
        self.conditions.push((field, value.into()));
        self
    }

    /// 从查询参数中提取允许的过滤字段，忽略其他参数
    pub fn from_params(allowed: &[&'static str], params: &HashMap<String, String>) -> Self {
        allowed
            .iter()
            .filter_map(|field| params.get(*field).map(|value| (*field, value.clone())))
            .fold(Self::new(), |filter, (field, value)| filter.eq(field, value))
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    fn where_clause(&self) -> String {
        if self.conditions.is_empty() {
            return String::new();
        }
        let clauses: Vec<String> = self
            .conditions
            .iter()
            .enumerate()
            .map(|(i, (field, _))| format!("{} = $f{}", field, i))
            .collect();
        format!(" WHERE {}", clauses.join(" AND "))
    }

    fn bindings(&self) -> impl Iterator<Item = (String, String)> + '_ {
        self.conditions
            .iter()
            .enumerate()
            .map(|(i, (_, value))| (format!("f{}", i), value.clone()))
    }
}

/// 仓储 trait
#[async_trait]
pub trait Repository<T: Record>: Send + Sync {
    /// 创建实体
    async fn create(&self, entity: &T) -> Result<T>;

    /// 根据 ID 获取实体
    async fn get_by_id(&self, id: &str) -> Result<Option<T>>;

    /// 更新实体，不存在时返回 None
    async fn update(&self, id: &str, entity: &T) -> Result<Option<T>>;

    /// 删除实体
    async fn delete(&self, id: &str) -> Result<bool>;

    /// 按过滤条件分页列出
    async fn list(&self, filter: &Filter, limit: usize, start: usize) -> Result<Vec<T>>;

    /// 按过滤条件统计数量
    async fn count(&self, filter: &Filter) -> Result<u64>;

    /// 按过滤条件列出全部
    async fn find(&self, filter: &Filter) -> Result<Vec<T>>;

    /// 检查实体是否存在
    async fn exists(&self, id: &str) -> Result<bool> {
        Ok(self.get_by_id(id).await?.is_some())
    }
}

#[derive(Deserialize)]
struct CountRow {
    count: u64,
}

const PROJECTION: &str = "SELECT *, record::id(id) AS id";

/// SurrealDB 通用仓储实现
pub struct SurrealRepository<T> {
    db: Surreal<Any>,
    _marker: PhantomData<T>,
}

impl<T> Clone for SurrealRepository<T> {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T: Record> SurrealRepository<T> {
    pub fn new(db: Surreal<Any>) -> Self {
        Self {
            db,
            _marker: PhantomData,
        }
    }

    async fn select(&self, filter: &Filter, page: Option<(usize, usize)>) -> Result<Vec<T>> {
        let mut sql = format!(
            "{} FROM type::table($table){} ORDER BY id ASC",
            PROJECTION,
            filter.where_clause()
        );
        if page.is_some() {
            sql.push_str(" LIMIT $limit START $start");
        }

        let mut query = self.db.query(sql).bind(("table", T::TABLE));
        for binding in filter.bindings() {
            query = query.bind(binding);
        }
        if let Some((limit, start)) = page {
            query = query.bind(("limit", limit)).bind(("start", start));
        }

        let rows: Vec<T> = query.await?.take(0)?;
        Ok(rows)
    }
}

#[async_trait]
impl<T: Record> Repository<T> for SurrealRepository<T> {
    async fn create(&self, entity: &T) -> Result<T> {
        let id = entity.id().to_string();
        tracing::debug!(table = T::TABLE, %id, "Creating record");

        self.db
            .query("CREATE type::thing($table, $id) CONTENT $content RETURN NONE")
            .bind(("table", T::TABLE))
            .bind(("id", id.clone()))
            .bind(("content", entity.clone()))
            .await?
            .check()?;

        self.get_by_id(&id).await?.ok_or_else(|| {
            AppError::Database(format!("Failed to create {}: {}", T::TABLE, id))
        })
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<T>> {
        let rows: Vec<T> = self
            .db
            .query(format!("{} FROM type::thing($table, $id)", PROJECTION))
            .bind(("table", T::TABLE))
            .bind(("id", id.to_string()))
            .await?
            .take(0)?;
        Ok(rows.into_iter().next())
    }

    async fn update(&self, id: &str, entity: &T) -> Result<Option<T>> {
        if !self.exists(id).await? {
            return Ok(None);
        }

        self.db
            .query("UPDATE type::thing($table, $id) CONTENT $content RETURN NONE")
            .bind(("table", T::TABLE))
            .bind(("id", id.to_string()))
            .bind(("content", entity.clone()))
            .await?
            .check()?;

        self.get_by_id(id).await
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        if !self.exists(id).await? {
            return Ok(false);
        }

        self.db
            .query("DELETE type::thing($table, $id)")
            .bind(("table", T::TABLE))
            .bind(("id", id.to_string()))
            .await?
            .check()?;
        Ok(true)
    }

    async fn list(&self, filter: &Filter, limit: usize, start: usize) -> Result<Vec<T>> {
        self.select(filter, Some((limit, start))).await
    }

    async fn count(&self, filter: &Filter) -> Result<u64> {
        let sql = format!(
            "SELECT count() FROM type::table($table){} GROUP ALL",
            filter.where_clause()
        );
        let mut query = self.db.query(sql).bind(("table", T::TABLE));
        for binding in filter.bindings() {
            query = query.bind(binding);
        }

        let row: Option<CountRow> = query.await?.take(0)?;
        Ok(row.map(|r| r.count).unwrap_or(0))
    }

    async fn find(&self, filter: &Filter) -> Result<Vec<T>> {
        self.select(filter, None).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::config::AppConfig;
    use crate::models::{Experiment, Session};
    use crate::storage::surrealdb::SurrealPool;

    async fn repos() -> (SurrealRepository<Session>, SurrealRepository<Experiment>) {
        let pool = SurrealPool::new(AppConfig::in_memory().database)
            .await
            .unwrap();
        let db = pool.inner().await.unwrap();
        (SurrealRepository::new(db.clone()), SurrealRepository::new(db))
    }

    #[test]
    fn test_filter_from_params_ignores_unknown() {
        let params: HashMap<String, String> = [
            ("scan".to_string(), "abc".to_string()),
            ("limit".to_string(), "10".to_string()),
        ]
        .into_iter()
        .collect();

        let filter = Filter::from_params(&["scan"], &params);
        assert_eq!(filter, Filter::new().eq("scan", "abc"));
        assert_eq!(filter.where_clause(), " WHERE scan = $f0");
        assert!(Filter::from_params(&["site"], &params).is_empty());
    }

    #[tokio::test]
    async fn test_crud_round_trip() {
        let (sessions, _) = repos().await;

        let created = sessions.create(&Session::new("baseline")).await.unwrap();
        let fetched = sessions.get_by_id(&created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);

        let mut renamed = fetched.clone();
        renamed.name = "followup".into();
        let updated = sessions.update(&created.id, &renamed).await.unwrap().unwrap();
        assert_eq!(updated.name, "followup");
        assert_eq!(updated.id, created.id);

        assert!(sessions.delete(&created.id).await.unwrap());
        assert!(!sessions.delete(&created.id).await.unwrap());
        assert!(sessions.get_by_id(&created.id).await.unwrap().is_none());
        assert!(sessions.update(&created.id, &renamed).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_filtered_list_and_count() {
        let (sessions, experiments) = repos().await;
        let a = sessions.create(&Session::new("a")).await.unwrap();
        let b = sessions.create(&Session::new("b")).await.unwrap();

        for i in 0..3 {
            experiments
                .create(&Experiment::new(&a.id, &format!("a{}", i)))
                .await
                .unwrap();
        }
        experiments.create(&Experiment::new(&b.id, "b0")).await.unwrap();

        let only_a = Filter::new().eq("session", a.id.clone());
        assert_eq!(experiments.count(&only_a).await.unwrap(), 3);
        assert_eq!(experiments.count(&Filter::new()).await.unwrap(), 4);
        assert_eq!(experiments.find(&only_a).await.unwrap().len(), 3);

        let first_page = experiments.list(&Filter::new(), 3, 0).await.unwrap();
        let second_page = experiments.list(&Filter::new(), 3, 3).await.unwrap();
        assert_eq!(first_page.len(), 3);
        assert_eq!(second_page.len(), 1);
        assert!(first_page.iter().all(|e| e.id != second_page[0].id));
    }

    #[tokio::test]
    async fn test_count_empty_table() {
        let (sessions, _) = repos().await;
        assert_eq!(sessions.count(&Filter::new()).await.unwrap(), 0);
    }
}

//! 仓储集合
//!
//! 每个审阅实体一个仓储，共享同一个数据库句柄。

use std::sync::Arc;
use surrealdb::{Surreal, engine::any::Any};

use crate::models::{Annotation, Experiment, Image, Scan, ScanNote, Session, Site, User};
use crate::storage::repository::{Repository, SurrealRepository};

#[derive(Clone)]
pub struct Repositories {
    pub sessions: Arc<dyn Repository<Session>>,
    pub experiments: Arc<dyn Repository<Experiment>>,
    pub scans: Arc<dyn Repository<Scan>>,
    pub images: Arc<dyn Repository<Image>>,
    pub scan_notes: Arc<dyn Repository<ScanNote>>,
    pub annotations: Arc<dyn Repository<Annotation>>,
    pub sites: Arc<dyn Repository<Site>>,
    pub users: Arc<dyn Repository<User>>,
    /// 跨表事务（级联删除）使用的共享句柄
    pub db: Surreal<Any>,
}

impl Repositories {
    /// 基于 SurrealDB 创建全部仓储
    pub fn surreal(db: Surreal<Any>) -> Self {
        Self {
            sessions: Arc::new(SurrealRepository::<Session>::new(db.clone())),
            experiments: Arc::new(SurrealRepository::<Experiment>::new(db.clone())),
            scans: Arc::new(SurrealRepository::<Scan>::new(db.clone())),
            images: Arc::new(SurrealRepository::<Image>::new(db.clone())),
            scan_notes: Arc::new(SurrealRepository::<ScanNote>::new(db.clone())),
            annotations: Arc::new(SurrealRepository::<Annotation>::new(db.clone())),
            sites: Arc::new(SurrealRepository::<Site>::new(db.clone())),
            users: Arc::new(SurrealRepository::<User>::new(db.clone())),
            db,
        }
    }
}

impl std::fmt::Debug for Repositories {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repositories").finish_non_exhaustive()
    }
}

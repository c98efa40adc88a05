//! 存储层模块
//!
//! 基于 SurrealDB 的数据持久化服务。

pub mod repositories;
pub mod repository;
pub mod surrealdb;

pub use repositories::Repositories;
pub use repository::{Filter, Record, Repository, SurrealRepository};
pub use self::surrealdb::SurrealPool;

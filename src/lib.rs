//! MIQA - 医学影像质量审阅服务
//!
//! 以 REST API 暴露审阅数据模型（会话、实验、扫描、图像、备注、
//! 审阅结论、用户、站点），并提供图像下载、会话设置与邮件通知。

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod observability;
pub mod services;
pub mod storage;

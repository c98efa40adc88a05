//! 核心数据模型模块
//!
//! 定义审阅数据模型：Session, Experiment, Scan, Image, ScanNote,
//! Annotation, Site, User。外键以记录 ID 字符串保存。

pub mod annotation;
pub mod experiment;
pub mod image;
pub mod scan;
pub mod scan_note;
pub mod session;
pub mod site;
pub mod user;

pub use annotation::Annotation;
pub use experiment::Experiment;
pub use image::Image;
pub use scan::{Decision, Scan};
pub use scan_note::ScanNote;
pub use session::Session;
pub use site::Site;
pub use user::User;

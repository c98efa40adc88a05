use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 数据库配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SurrealDB 连接地址（ws://、http://、rocksdb://、mem://）
    pub url: String,
    /// 命名空间
    pub namespace: String,
    /// 数据库名称
    pub database: String,
    /// 用户名（为空时跳过登录）
    pub username: String,
    /// 密码
    pub password: String,
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// 服务地址
    pub host: String,
    /// 服务端口
    pub port: u16,
    /// 请求超时（秒）
    pub request_timeout: u64,
    /// 允许的跨域来源，"*" 表示任意来源
    pub cors_origins: Vec<String>,
}

/// 分页配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    /// 未指定 limit 时的默认每页数量
    pub default_limit: usize,
    /// limit 上限
    pub max_limit: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_limit: 100,
            max_limit: 1000,
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志级别
    pub level: String,
    /// 结构化日志格式
    pub structured: bool,
    /// 日志文件目录
    pub log_dir: Option<PathBuf>,
}

/// 邮件配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EmailConfig {
    /// 发件人地址
    pub from_address: String,
    /// SMTP 服务器，未配置时仅记录日志
    pub smtp_server: Option<String>,
    /// SMTP 端口
    pub smtp_port: u16,
    /// SMTP 用户名
    pub username: String,
    /// SMTP 密码
    pub password: String,
    /// 是否使用 STARTTLS
    pub use_tls: bool,
}

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// 数据库配置
    pub database: DatabaseConfig,
    /// 服务器配置
    pub server: ServerConfig,
    /// 分页配置
    pub pagination: PaginationConfig,
    /// 日志配置
    pub logging: LoggingConfig,
    /// 邮件配置
    pub email: EmailConfig,
    /// 应用名称
    pub app_name: String,
    /// 环境
    pub environment: String,
}

impl AppConfig {
    /// 创建开发环境配置
    pub fn development() -> Self {
        Self {
            database: DatabaseConfig {
                url: "rocksdb://./data/miqa".into(),
                namespace: "miqa".into(),
                database: "review".into(),
                username: String::new(),
                password: String::new(),
            },
            server: ServerConfig {
                host: "0.0.0.0".into(),
                port: 8000,
                request_timeout: 30,
                cors_origins: vec!["*".into()],
            },
            pagination: PaginationConfig::default(),
            logging: LoggingConfig {
                level: "debug".into(),
                structured: false,
                log_dir: None,
            },
            email: EmailConfig {
                from_address: "miqa@localhost.localdomain".into(),
                smtp_server: None,
                smtp_port: 587,
                username: String::new(),
                password: String::new(),
                use_tls: true,
            },
            app_name: "miqa".into(),
            environment: "development".into(),
        }
    }

    /// 创建生产环境配置
    pub fn production() -> Self {
        let mut config = Self::development();
        config.environment = "production".into();
        config.logging.level = "info".into();
        config.logging.structured = true;
        config.server.cors_origins = Vec::new();
        config
    }

    /// 测试用内存数据库配置
    pub fn in_memory() -> Self {
        let mut config = Self::development();
        config.database.url = "mem://".into();
        config.environment = "test".into();
        config
    }
}

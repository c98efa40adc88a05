use crate::config::config::AppConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};
use validator::ValidateEmail;

/// 配置加载器
pub struct ConfigLoader;

impl ConfigLoader {
    /// 从默认路径加载配置
    ///
    /// 优先级（从低到高）：
    /// 1. 环境默认值（`MIQA_ENVIRONMENT=production` 时为生产配置）
    /// 2. ./config.toml
    /// 3. MIQA_ 前缀的环境变量（`__` 分隔嵌套字段）
    pub fn load() -> Result<AppConfig, figment::Error> {
        Self::load_from(default_config_path())
    }

    /// 从指定路径加载配置
    pub fn load_from(path: impl AsRef<Path>) -> Result<AppConfig, figment::Error> {
        Self::figment(path.as_ref()).extract()
    }

    fn figment(path: &Path) -> Figment {
        Figment::from(Serialized::defaults(Self::defaults()))
            .merge(Toml::file(path))
            .merge(Env::prefixed("MIQA_").split("__"))
    }

    fn defaults() -> AppConfig {
        match std::env::var("MIQA_ENVIRONMENT").as_deref() {
            Ok("production") => AppConfig::production(),
            _ => AppConfig::development(),
        }
    }

    /// 验证配置
    pub fn validate(config: &AppConfig) -> Result<(), ConfigValidationError> {
        if config.server.port == 0 {
            return Err(ConfigValidationError::InvalidPort);
        }

        if config.database.url.is_empty() {
            return Err(ConfigValidationError::MissingDatabaseUrl);
        }

        let pagination = &config.pagination;
        if pagination.default_limit == 0 || pagination.default_limit > pagination.max_limit {
            return Err(ConfigValidationError::InvalidPagination(
                pagination.default_limit,
                pagination.max_limit,
            ));
        }

        if !config.email.from_address.validate_email() {
            return Err(ConfigValidationError::InvalidFromAddress(
                config.email.from_address.clone(),
            ));
        }

        Ok(())
    }
}

/// 配置验证错误
#[derive(thiserror::Error, Debug)]
pub enum ConfigValidationError {
    #[error("server port must be greater than 0")]
    InvalidPort,

    #[error("database url is not configured")]
    MissingDatabaseUrl,

    #[error("invalid pagination: default_limit {0} must be in 1..={1}")]
    InvalidPagination(usize, usize),

    #[error("invalid sender address: {0}")]
    InvalidFromAddress(String),
}

/// 获取默认配置文件路径
pub fn default_config_path() -> PathBuf {
    PathBuf::from("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_file() {
        figment::Jail::expect_with(|_jail| {
            let config = ConfigLoader::load()?;
            assert_eq!(config.server.port, 8000);
            assert_eq!(config.pagination.default_limit, 100);
            assert!(ConfigLoader::validate(&config).is_ok());
            Ok(())
        });
    }

    #[test]
    fn test_file_and_env_override() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
                app_name = "miqa-test"

                [server]
                port = 9000

                [database]
                url = "mem://"
                "#,
            )?;
            jail.set_env("MIQA_SERVER__PORT", "9100");
            jail.set_env("MIQA_PAGINATION__DEFAULT_LIMIT", "25");

            let config = ConfigLoader::load()?;
            assert_eq!(config.app_name, "miqa-test");
            assert_eq!(config.server.port, 9100);
            assert_eq!(config.database.url, "mem://");
            assert_eq!(config.database.namespace, "miqa");
            assert_eq!(config.pagination.default_limit, 25);
            Ok(())
        });
    }

    #[test]
    fn test_production_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("MIQA_ENVIRONMENT", "production");

            let config = ConfigLoader::load()?;
            assert_eq!(config.environment, "production");
            assert!(config.logging.structured);
            assert!(config.server.cors_origins.is_empty());
            Ok(())
        });
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = AppConfig::development();
        config.server.port = 0;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigValidationError::InvalidPort)
        ));

        let mut config = AppConfig::development();
        config.pagination.default_limit = 5000;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigValidationError::InvalidPagination(5000, 1000))
        ));

        let mut config = AppConfig::development();
        config.email.from_address = "not-an-address".into();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigValidationError::InvalidFromAddress(_))
        ));
    }
}

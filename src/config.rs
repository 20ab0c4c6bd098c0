use serde::{Deserialize, Serialize};
use std::env;

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// actix 工作线程数，为空时使用 CPU 核数
    #[serde(default)]
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn get_env(name: &str) -> Option<String> {
    env::var(name).ok()
}

fn get_env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse::<T>().ok())
}

impl Config {
    pub fn from_toml() -> AppResult<Self> {
        let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        use std::io::ErrorKind;

        // 尝试读取配置文件，如果不存在则完全依赖环境变量
        let mut config = match std::fs::read_to_string(&config_path) {
            Ok(config_str) => Self::parse(&config_str)?,
            Err(e) if e.kind() == ErrorKind::NotFound => Self::from_env_only()?,
            Err(e) => {
                return Err(AppError::ConfigError(format!(
                    "Cannot read config file {config_path}: {e}"
                )));
            }
        };

        // 环境变量覆盖（即便文件存在时也覆盖）
        config.apply_env_overrides();
        Ok(config)
    }

    pub fn parse(config_str: &str) -> AppResult<Self> {
        toml::from_str(config_str)
            .map_err(|e| AppError::ConfigError(format!("Failed to parse config file: {e}")))
    }

    fn from_env_only() -> AppResult<Self> {
        // 数据库 URL 在无配置文件时必须提供
        let database_url = get_env("DATABASE_URL").ok_or_else(|| {
            AppError::ConfigError(
                "DATABASE_URL is not set and config.toml was not found".to_string(),
            )
        })?;

        Ok(Config {
            server: ServerConfig {
                host: get_env("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                port: get_env_parse("SERVER_PORT").unwrap_or(8080),
                workers: get_env_parse("SERVER_WORKERS"),
            },
            database: DatabaseConfig {
                url: database_url,
                max_connections: get_env_parse("DB_MAX_CONNECTIONS")
                    .unwrap_or_else(default_max_connections),
            },
        })
    }

    fn apply_env_overrides(&mut self) {
        if let Some(v) = get_env("SERVER_HOST") {
            self.server.host = v;
        }
        if let Some(p) = get_env_parse("SERVER_PORT") {
            self.server.port = p;
        }
        if let Some(w) = get_env_parse("SERVER_WORKERS") {
            self.server.workers = Some(w);
        }
        if let Some(v) = get_env("DATABASE_URL") {
            self.database.url = v;
        }
        if let Some(mc) = get_env_parse("DB_MAX_CONNECTIONS") {
            self.database.max_connections = mc;
        }
    }
}

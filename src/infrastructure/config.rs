//! 服务端配置
//!
//! 配置来源按优先级从低到高：
//! 1. 默认值
//! 2. TOML 配置文件（`PRODUCT_API_CONFIG` 指定，或 `config.toml` / `./config/config.toml`）
//! 3. 环境变量（`DB_USER`、`DB_PASS`、`MONGO_DB_SERVER`、`DB_PORT`、`DB_NAME`、`PORT`）

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// 配置文件路径的环境变量
pub const CONFIG_PATH_VAR: &str = "PRODUCT_API_CONFIG";

const DEFAULT_CONFIG_PATHS: [&str; 2] = ["config.toml", "./config/config.toml"];

/// 服务端配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP 服务配置
    pub http: HttpConfig,
    /// 日志配置
    pub logging: LoggingConfig,
    /// 数据库配置
    pub database: DatabaseConfig,
}

/// HTTP 服务配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// 绑定地址
    pub bind_address: String,
    /// HTTP 服务端口
    pub port: u16,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志级别 (trace, debug, info, warn, error)
    pub level: String,
    /// 日志目录，未设置时只输出到控制台
    pub log_dir: Option<String>,
    /// 日志文件名前缀
    pub file_prefix: String,
}

/// 数据库配置
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub scheme: String,
    pub user: String,
    pub password: String,
    pub server: String,
    /// 必须由配置文件或 `DB_PORT` 给出
    pub port: Option<u16>,
    pub name: String,
    /// 产品集合名称
    pub collection: String,
    /// 启动时连接的服务器选择超时（秒）
    pub connect_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            log_dir: None,
            file_prefix: "product-api".to_string(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            scheme: "mongodb".to_string(),
            user: String::new(),
            password: String::new(),
            server: String::new(),
            port: None,
            name: String::new(),
            collection: "products".to_string(),
            connect_timeout_secs: 10,
        }
    }
}

// 密码不进入 Debug 输出
impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("uri", &self.redacted_uri())
            .field("collection", &self.collection)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .finish()
    }
}

impl DatabaseConfig {
    /// 连接字符串：`<scheme>://<user>:<pass>@<server>:<port>/<db>?authSource=admin`
    pub fn connection_uri(&self) -> String {
        self.uri_with_password(&urlencoding::encode(&self.password))
    }

    /// 用于日志输出的连接字符串，密码替换为 `***`
    pub fn redacted_uri(&self) -> String {
        self.uri_with_password("***")
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    fn uri_with_password(&self, password: &str) -> String {
        let port = self.port.map(|p| p.to_string()).unwrap_or_default();
        format!(
            "{}://{}:{}@{}:{}/{}?authSource=admin",
            self.scheme,
            urlencoding::encode(&self.user),
            password,
            self.server,
            port,
            self.name
        )
    }
}

/// 配置错误类型
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {reason}")]
    FileRead { path: String, reason: String },
    #[error("failed to parse config: {0}")]
    Parse(String),
    #[error("invalid value for {var}: {value:?}")]
    InvalidVar { var: &'static str, value: String },
    #[error("{0} is not set")]
    Missing(&'static str),
    #[error("invalid config: {0}")]
    Validation(String),
}

impl Config {
    /// 从配置文件和进程环境变量加载并校验
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var(CONFIG_PATH_VAR).ok().or_else(|| {
            DEFAULT_CONFIG_PATHS
                .iter()
                .find(|p| Path::new(p).exists())
                .map(|p| p.to_string())
        });

        let content = match path {
            Some(path) => Some(fs::read_to_string(&path).map_err(|e| ConfigError::FileRead {
                path: path.clone(),
                reason: e.to_string(),
            })?),
            None => None,
        };

        Self::from_sources(content.as_deref(), |var| std::env::var(var).ok())
    }

    /// 由配置文件内容和环境变量查询函数构造配置
    pub fn from_sources<F>(file: Option<&str>, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config: Config = match file {
            Some(content) => toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?,
            None => Config::default(),
        };
        config.apply_env(lookup)?;
        config.validate()?;
        Ok(config)
    }

    fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(user) = lookup("DB_USER") {
            self.database.user = user;
        }
        if let Some(password) = lookup("DB_PASS") {
            self.database.password = password;
        }
        if let Some(server) = lookup("MONGO_DB_SERVER") {
            self.database.server = server;
        }
        if let Some(port) = lookup("DB_PORT") {
            self.database.port = Some(parse_port("DB_PORT", port)?);
        }
        if let Some(name) = lookup("DB_NAME") {
            self.database.name = name;
        }
        if let Some(port) = lookup("PORT") {
            self.http.port = parse_port("PORT", port)?;
        }
        Ok(())
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            (&self.database.user, "DB_USER"),
            (&self.database.password, "DB_PASS"),
            (&self.database.server, "MONGO_DB_SERVER"),
            (&self.database.name, "DB_NAME"),
        ];
        if let Some((_, var)) = required.iter().find(|(value, _)| value.is_empty()) {
            return Err(ConfigError::Missing(*var));
        }
        match self.database.port {
            None => return Err(ConfigError::Missing("DB_PORT")),
            Some(0) => {
                return Err(ConfigError::Validation(
                    "database port must be greater than 0".to_string(),
                ))
            }
            Some(_) => {}
        }

        if self.http.port == 0 {
            return Err(ConfigError::Validation(
                "HTTP port must be greater than 0".to_string(),
            ));
        }

        if self.http.bind_address.is_empty() {
            return Err(ConfigError::Validation("bind address is empty".to_string()));
        }
        if self.database.collection.is_empty() {
            return Err(ConfigError::Validation("collection name is empty".to_string()));
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::Validation(format!(
                "unknown log level {:?}, expected one of {:?}",
                self.logging.level, valid_levels
            )));
        }

        Ok(())
    }
}

fn parse_port(var: &'static str, value: String) -> Result<u16, ConfigError> {
    match value.trim().parse::<u16>() {
        Ok(port) if port > 0 => Ok(port),
        _ => Err(ConfigError::InvalidVar { var, value }),
    }
}

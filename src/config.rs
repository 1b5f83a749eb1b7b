//! 配置模块
//!
//! 支持从 JSON 文件加载系统配置，所有字段都有默认值

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// 指定配置文件路径的环境变量
pub const CONFIG_PATH_ENV: &str = "QUOTE_SERVER_CONFIG";

/// 未指定配置文件时依次尝试的路径
pub const DEFAULT_CONFIG_PATHS: [&str; 2] = ["config.json", "config/config.json"];

/// 配置来源
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Defaults,
}

/// 加载结果
#[derive(Debug)]
pub struct LoadedConfig {
    pub config: AppConfig,
    pub source: ConfigSource,
    /// 存在但解析失败的默认路径及原因
    pub skipped: Vec<(PathBuf, String)>,
}

impl LoadedConfig {
    /// 输出加载过程，需在日志初始化之后调用
    pub fn report(&self) {
        for (path, reason) in &self.skipped {
            log::warn!("加载配置文件 {} 失败: {}", path.display(), reason);
        }
        match &self.source {
            ConfigSource::File(path) => log::info!("从 {} 加载配置成功", path.display()),
            ConfigSource::Defaults => log::info!("使用默认配置"),
        }
    }
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,
    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,
    /// 工作线程数（0 表示使用 CPU 核心数）
    #[serde(default)]
    pub workers: usize,
}

/// 上游报价接口配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// 报价接口地址
    #[serde(default = "default_upstream_url")]
    pub url: String,
    /// 响应中货币对对象的键名
    #[serde(default = "default_pair")]
    pub pair: String,
    /// 请求超时时间（毫秒），从发起请求开始计算
    #[serde(default = "default_upstream_timeout")]
    pub timeout_ms: u64,
}

/// 存储配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// 是否保存报价
    #[serde(default = "default_storage_enabled")]
    pub enabled: bool,
    /// SQLite 数据库地址
    #[serde(default = "default_database_url")]
    pub database_url: String,
    /// 写入超时时间（毫秒）
    #[serde(default = "default_storage_timeout")]
    pub timeout_ms: u64,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// 日志级别: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// 应用配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,
    /// 上游接口配置
    #[serde(default)]
    pub upstream: UpstreamConfig,
    /// 存储配置
    #[serde(default)]
    pub storage: StorageConfig,
    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

// 默认值函数
fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }
fn default_upstream_url() -> String { "https://economia.awesomeapi.com.br/json/last/USD-BRL".to_string() }
fn default_pair() -> String { "USDBRL".to_string() }
fn default_upstream_timeout() -> u64 { 200 }
fn default_storage_enabled() -> bool { true }
fn default_database_url() -> String { ":memory:".to_string() }
// 原先的 10 微秒对任何真实写入都不够，改为 100 毫秒
fn default_storage_timeout() -> u64 { 100 }
fn default_log_level() -> String { "info".to_string() }

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: 0,
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            url: default_upstream_url(),
            pair: default_pair(),
            timeout_ms: default_upstream_timeout(),
        }
    }
}

impl UpstreamConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            enabled: default_storage_enabled(),
            database_url: default_database_url(),
            timeout_ms: default_storage_timeout(),
        }
    }
}

impl StorageConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl AppConfig {
    /// 从 JSON 文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: AppConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// 加载配置，优先从环境变量指定的文件，其次默认路径，都没有则使用默认值
    ///
    /// 调用时日志可能尚未初始化，所以只返回结果，由调用方输出
    pub fn load() -> anyhow::Result<LoadedConfig> {
        Self::load_from(env::var(CONFIG_PATH_ENV).ok().map(PathBuf::from), &DEFAULT_CONFIG_PATHS)
    }

    /// 按顺序尝试配置文件
    ///
    /// 显式指定的文件必须存在且能解析，否则返回错误；
    /// 默认路径解析失败只记录下来，继续尝试下一个
    pub fn load_from(explicit: Option<PathBuf>, defaults: &[&str]) -> anyhow::Result<LoadedConfig> {
        if let Some(path) = explicit {
            let config = Self::from_file(&path)
                .with_context(|| format!("加载配置文件 {} 失败", path.display()))?;
            return Ok(LoadedConfig {
                config,
                source: ConfigSource::File(path),
                skipped: Vec::new(),
            });
        }

        let mut skipped = Vec::new();
        for path in defaults.iter().map(PathBuf::from) {
            if !path.exists() {
                continue;
            }
            match Self::from_file(&path) {
                Ok(config) => {
                    return Ok(LoadedConfig {
                        config,
                        source: ConfigSource::File(path),
                        skipped,
                    });
                }
                Err(e) => skipped.push((path, e.to_string())),
            }
        }

        Ok(LoadedConfig {
            config: Self::default(),
            source: ConfigSource::Defaults,
            skipped,
        })
    }

    /// 获取服务器绑定地址
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

//! Application configuration module / 应用配置模块
//!
//! Loaded from config.json in the working directory.
//! Creates default config file on first run / 首次运行时创建默认配置文件

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration / 应用配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration / 服务器配置
    #[serde(default)]
    pub server: ServerConfig,
    /// Upload storage configuration / 上传存储配置
    #[serde(default)]
    pub storage: StorageConfig,
    /// Indexing configuration / 索引配置
    #[serde(default)]
    pub indexing: IndexingConfig,
}

/// Server configuration / 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host address / 服务器监听地址
    pub host: String,
    /// Server port / 服务器端口
    pub port: u16,
}

/// Upload storage configuration / 上传存储配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory uploaded documents are written to / 上传目录
    pub upload_dir: String,
    /// Accepted file extensions, lowercase without dot / 允许的扩展名
    pub allowed_extensions: Vec<String>,
    /// Maximum request body size in bytes / 最大请求体大小
    pub max_content_length: usize,
}

/// Indexing configuration / 索引配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexingConfig {
    /// Concurrent indexing workers / 并发索引数
    pub max_workers: usize,
    /// Documents handed to the coordinator per batch / 每批文档数
    pub batch_size: usize,
    /// Excerpt length in characters / 摘要长度
    pub excerpt_chars: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            upload_dir: "uploads".to_string(),
            allowed_extensions: vec!["txt".to_string()],
            max_content_length: 32 * 1024 * 1024,
        }
    }
}

impl Default for IndexingConfig {
    fn default() -> Self {
        Self {
            max_workers: crate::search::batch::DEFAULT_MAX_WORKERS,
            batch_size: 100,
            excerpt_chars: crate::search::indexer::DEFAULT_EXCERPT_CHARS,
        }
    }
}

impl AppConfig {
    /// Get the upload directory path / 获取上传目录
    pub fn get_upload_dir(&self) -> PathBuf {
        PathBuf::from(&self.storage.upload_dir)
    }

    /// Get the server bind address / 获取服务器绑定地址
    pub fn get_bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Batch options for the indexing coordinator / 批量索引选项
    pub fn batch_options(&self) -> crate::search::BatchOptions {
        crate::search::BatchOptions {
            max_workers: self.indexing.max_workers,
            excerpt_chars: self.indexing.excerpt_chars,
        }
    }
}

/// Get the config file path / 获取配置文件路径
fn get_config_path() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join("config.json")
}

/// Load configuration from ./config.json, or create default if not exists / 加载配置文件
pub fn load_config() -> Result<AppConfig, String> {
    load_config_from(&get_config_path())
}

/// Load configuration from the given path, creating it with defaults if missing / 从指定路径加载
pub fn load_config_from(config_path: &Path) -> Result<AppConfig, String> {
    if config_path.exists() {
        let content = std::fs::read_to_string(config_path)
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        let config: AppConfig = serde_json::from_str(&content)
            .map_err(|e| format!("Failed to parse config file: {}", e))?;

        tracing::info!("Loaded configuration from {:?}", config_path);
        Ok(config)
    } else {
        let config = AppConfig::default();
        save_config_to(&config, config_path)?;
        tracing::info!("Created default configuration at {:?}", config_path);
        Ok(config)
    }
}

/// Save configuration to file / 保存配置到文件
pub fn save_config_to(config: &AppConfig, config_path: &Path) -> Result<(), String> {
    let content = serde_json::to_string_pretty(config)
        .map_err(|e| format!("Failed to serialize config: {}", e))?;

    std::fs::write(config_path, content)
        .map_err(|e| format!("Failed to write config file: {}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.indexing.max_workers, 4);
        assert_eq!(config.indexing.excerpt_chars, 200);
        assert_eq!(config.storage.allowed_extensions, vec!["txt"]);
        assert_eq!(config.get_bind_address(), "0.0.0.0:5000");
    }

    #[test]
    fn test_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let config = load_config_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.storage.upload_dir, "uploads");

        let reloaded = load_config_from(&path).unwrap();
        assert_eq!(reloaded.server.port, config.server.port);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"indexing": {"max_workers": 8}, "server": {"port": 9000}}"#).unwrap();

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.indexing.max_workers, 8);
        assert_eq!(config.indexing.batch_size, 100);
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.storage.max_content_length, 32 * 1024 * 1024);
    }

    #[test]
    fn test_invalid_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(load_config_from(&path).unwrap_err().contains("Failed to parse"));
    }
}

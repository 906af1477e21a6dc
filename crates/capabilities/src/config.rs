use std::path::{Path, PathBuf};

use anyhow::Context;
use devicefs_core::{DEFAULT_ENCODING, FileEncoding};
use serde::Deserialize;
type Result<T> = anyhow::Result<T>;

#[derive(Debug, Clone, Deserialize)]
pub struct FileSystemConfig {
    #[serde(default = "default_app_name")]
    pub app_name: String,
    /// 覆盖默认的文档目录。
    #[serde(default)]
    pub document_directory: Option<PathBuf>,
    /// 覆盖默认的缓存目录。
    #[serde(default)]
    pub cache_directory: Option<PathBuf>,
    #[serde(default)]
    pub default_encoding: FileEncoding,
    #[serde(default)]
    pub download: DownloadConfig,
}

impl FileSystemConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        Self::from_str(&content)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("failed to deserialize filesystem config")
    }

    /// 解析文档目录：优先使用配置值，否则为系统文档目录下的应用子目录。
    pub fn resolve_document_directory(&self) -> Option<PathBuf> {
        self.document_directory.clone().or_else(|| {
            dirs::document_dir()
                .or_else(dirs::data_dir)
                .map(|dir| dir.join(&self.app_name))
        })
    }

    /// 解析缓存目录：优先使用配置值，否则为系统缓存目录下的应用子目录。
    pub fn resolve_cache_directory(&self) -> Option<PathBuf> {
        self.cache_directory
            .clone()
            .or_else(|| dirs::cache_dir().map(|dir| dir.join(&self.app_name)))
    }
}

impl Default for FileSystemConfig {
    fn default() -> Self {
        Self {
            app_name: default_app_name(),
            document_directory: None,
            cache_directory: None,
            default_encoding: DEFAULT_ENCODING,
            download: DownloadConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DownloadConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_app_name() -> String {
    "devicefs".to_string()
}

fn default_timeout_secs() -> u64 {
    300
}

fn default_user_agent() -> String {
    concat!("devicefs/", env!("CARGO_PKG_VERSION")).to_string()
}

//! 基于本地磁盘的宿主实现。

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use devicefs_core::{DownloadProgress, TEMP_FILE_PREFIX};
use futures_util::StreamExt;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use super::{DownloadResult, FileSystemHost, HostFileInfo, ProgressCallback};
use crate::config::FileSystemConfig;
use crate::error::{FileSystemError, Result};
use crate::uri;

/// 本地文件系统宿主。
#[derive(Clone)]
pub struct LocalFileSystem {
    document_root: Option<PathBuf>,
    cache_root: Option<PathBuf>,
    client: reqwest::Client,
}

impl LocalFileSystem {
    /// 使用指定的文档目录与缓存目录创建实例。
    pub fn with_roots(document_root: Option<PathBuf>, cache_root: Option<PathBuf>) -> Self {
        Self {
            document_root: document_root.map(absolute_root),
            cache_root: cache_root.map(absolute_root),
            client: reqwest::Client::new(),
        }
    }

    /// 根据配置创建实例。
    pub fn from_config(config: &FileSystemConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.download.timeout_secs))
            .user_agent(config.download.user_agent.clone())
            .build()?;

        Ok(Self {
            document_root: config.resolve_document_directory().map(absolute_root),
            cache_root: config.resolve_cache_directory().map(absolute_root),
            client,
        })
    }

    /// 确保文档目录与缓存目录存在。
    pub async fn ensure_roots(&self) -> Result<()> {
        for root in [&self.document_root, &self.cache_root].into_iter().flatten() {
            tokio::fs::create_dir_all(root)
                .await
                .with_context(|| format!("failed to create root directory: {}", root.display()))?;
        }
        Ok(())
    }

    /// 跨设备等无法重命名时的移动方式。
    async fn copy_then_delete(&self, from: &str, to: &str) -> Result<()> {
        self.copy(from, to).await?;
        self.delete(from, false).await
    }

    async fn stream_to_file(
        response: reqwest::Response,
        path: &Path,
        progress: Option<&ProgressCallback>,
    ) -> Result<u64> {
        let expected = response.content_length().unwrap_or(0);
        let mut file = tokio::fs::File::create(path).await?;
        let mut stream = response.bytes_stream();
        let mut written = 0u64;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;

            if let Some(callback) = progress {
                callback(DownloadProgress::new(written, expected));
            }
        }

        file.flush().await?;
        Ok(written)
    }
}

/// 根目录需为绝对路径才能表示为 `file://` URI。
fn absolute_root(root: PathBuf) -> PathBuf {
    std::path::absolute(&root).unwrap_or(root)
}

/// 将 IO 错误映射为带路径的错误。
fn io_error(uri: &str, err: std::io::Error) -> FileSystemError {
    match err.kind() {
        ErrorKind::NotFound => FileSystemError::PathNotFound(uri.to_string()),
        _ => FileSystemError::Io(err),
    }
}

fn modified_secs(metadata: &std::fs::Metadata) -> u64 {
    metadata
        .modified()
        .ok()
        .and_then(|t| t.duration_since(std::time::UNIX_EPOCH).ok())
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

async fn directory_size(path: PathBuf) -> Result<u64> {
    tokio::task::spawn_blocking(move || {
        WalkDir::new(&path)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| entry.metadata().ok())
            .map(|metadata| metadata.len())
            .sum::<u64>()
    })
    .await
    .map_err(|err| FileSystemError::Other(err.into()))
}

/// 解析路径用于比较：规范化最近的已存在祖先，再拼接其余部分。
fn resolve_existing_prefix(path: &Path) -> PathBuf {
    let mut rest = Vec::new();
    let mut current = path;
    loop {
        if let Ok(canonical) = current.canonicalize() {
            return rest.iter().rev().fold(canonical, |acc, part| acc.join(part));
        }
        match (current.parent(), current.file_name()) {
            (Some(parent), Some(name)) => {
                rest.push(name.to_os_string());
                current = parent;
            }
            _ => return path.to_path_buf(),
        }
    }
}

async fn copy_directory(from: PathBuf, to: PathBuf) -> Result<()> {
    tokio::task::spawn_blocking(move || -> Result<()> {
        let source = from.canonicalize()?;
        if resolve_existing_prefix(&to).starts_with(&source) {
            return Err(FileSystemError::CopyIntoSelf(to.display().to_string()));
        }

        for entry in WalkDir::new(&from) {
            let entry = entry.map_err(std::io::Error::from)?;
            let relative = entry
                .path()
                .strip_prefix(&from)
                .context("walked entry escaped source directory")?;
            let target = to.join(relative);

            if entry.file_type().is_dir() {
                std::fs::create_dir_all(&target)?;
            } else {
                std::fs::copy(entry.path(), &target)?;
            }
        }
        Ok(())
    })
    .await
    .map_err(|err| FileSystemError::Other(err.into()))?
}

fn root_uri(root: Option<&Path>) -> Option<String> {
    root.map(|path| uri::from_path(path, true))
}

#[async_trait]
impl FileSystemHost for LocalFileSystem {
    fn name(&self) -> &str {
        "local"
    }

    async fn get_info(&self, uri: &str) -> Result<HostFileInfo> {
        let path = uri::to_path(uri)?;
        let metadata = match tokio::fs::metadata(&path).await {
            Ok(metadata) => metadata,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(HostFileInfo::missing()),
            Err(err) => return Err(err.into()),
        };

        let size = if metadata.is_dir() {
            directory_size(path).await?
        } else {
            metadata.len()
        };

        Ok(HostFileInfo {
            exists: true,
            size,
            is_directory: metadata.is_dir(),
            modification_time: modified_secs(&metadata),
        })
    }

    async fn read_bytes(&self, uri: &str) -> Result<Vec<u8>> {
        let path = uri::to_path(uri)?;
        tokio::fs::read(&path).await.map_err(|err| io_error(uri, err))
    }

    #[tracing::instrument(skip(self, contents), fields(len = contents.len()))]
    async fn write_bytes(&self, uri: &str, contents: &[u8]) -> Result<()> {
        let path = uri::to_path(uri)?;
        tokio::fs::write(&path, contents)
            .await
            .map_err(|err| io_error(uri, err))
    }

    #[tracing::instrument(skip(self))]
    async fn copy(&self, from: &str, to: &str) -> Result<()> {
        let source = uri::to_path(from)?;
        let target = uri::to_path(to)?;
        let metadata = tokio::fs::metadata(&source)
            .await
            .map_err(|err| io_error(from, err))?;

        if metadata.is_dir() {
            copy_directory(source, target).await
        } else {
            tokio::fs::copy(&source, &target)
                .await
                .map_err(|err| io_error(to, err))?;
            Ok(())
        }
    }

    #[tracing::instrument(skip(self))]
    async fn move_entry(&self, from: &str, to: &str) -> Result<()> {
        let source = uri::to_path(from)?;
        let target = uri::to_path(to)?;

        if let Err(err) = tokio::fs::rename(&source, &target).await {
            if !tokio::fs::try_exists(&source).await.unwrap_or(false) {
                return Err(io_error(from, err));
            }
            // 目标已存在时不合并目录
            if tokio::fs::try_exists(&target).await.unwrap_or(false) {
                return Err(FileSystemError::AlreadyExists(to.to_string()));
            }
            debug!(error = %err, "rename failed, falling back to copy and delete");
            self.copy_then_delete(from, to).await?;
        }
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, uri: &str, idempotent: bool) -> Result<()> {
        let path = uri::to_path(uri)?;
        let metadata = match tokio::fs::symlink_metadata(&path).await {
            Ok(metadata) => metadata,
            Err(err) if err.kind() == ErrorKind::NotFound && idempotent => return Ok(()),
            Err(err) => return Err(io_error(uri, err)),
        };

        if metadata.is_dir() {
            tokio::fs::remove_dir_all(&path).await?;
        } else {
            tokio::fs::remove_file(&path).await?;
        }
        Ok(())
    }

    async fn make_directory(&self, uri: &str, intermediates: bool) -> Result<()> {
        let path = uri::to_path(uri)?;
        let result = if intermediates {
            tokio::fs::create_dir_all(&path).await
        } else {
            tokio::fs::create_dir(&path).await
        };
        result.map_err(|err| io_error(uri, err))
    }

    async fn read_directory(&self, uri: &str) -> Result<Vec<String>> {
        let path = uri::to_path(uri)?;
        let metadata = tokio::fs::metadata(&path)
            .await
            .map_err(|err| io_error(uri, err))?;
        if !metadata.is_dir() {
            return Err(FileSystemError::NotADirectory(uri.to_string()));
        }

        let mut entries = tokio::fs::read_dir(&path).await?;
        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            names.push(entry.file_name().to_string_lossy().to_string());
        }
        names.sort();
        Ok(names)
    }

    #[tracing::instrument(skip(self, progress))]
    async fn download(
        &self,
        url: &str,
        destination: &str,
        progress: Option<ProgressCallback>,
    ) -> Result<DownloadResult> {
        let target = uri::to_path(destination)?;
        let file_name = target
            .file_name()
            .ok_or_else(|| FileSystemError::InvalidUri(destination.to_string()))?
            .to_string_lossy()
            .to_string();
        let partial = target.with_file_name(format!("{TEMP_FILE_PREFIX}{file_name}"));

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FileSystemError::Download(format!("{url} 返回 {status}")));
        }

        let mime_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        let bytes_written = match Self::stream_to_file(response, &partial, progress.as_ref()).await
        {
            Ok(written) => written,
            Err(err) => {
                if let Err(cleanup) = tokio::fs::remove_file(&partial).await {
                    warn!(error = %cleanup, path = %partial.display(), "failed to remove partial download");
                }
                return Err(err);
            }
        };

        tokio::fs::rename(&partial, &target)
            .await
            .map_err(|err| io_error(destination, err))?;

        info!(url = %url, destination = %destination, bytes = bytes_written, "download complete");

        Ok(DownloadResult {
            uri: destination.to_string(),
            status: status.as_u16(),
            bytes_written,
            mime_type,
        })
    }

    fn document_directory(&self) -> Option<String> {
        root_uri(self.document_root.as_deref())
    }

    fn cache_directory(&self) -> Option<String> {
        root_uri(self.cache_root.as_deref())
    }
}

//! URL 下载。

use devicefs_capabilities::{FileSystemError, FileSystemHost, ProgressCallback, Result};
use devicefs_core::{FileOperationResult, file_utils};
use tracing::{debug, info, warn};

const DEFAULT_DOWNLOAD_NAME: &str = "download";

/// 下载文件；未指定目标时保存到文档目录下的唯一文件名。
pub async fn download_file(
    host: &dyn FileSystemHost,
    url: &str,
    destination: Option<&str>,
) -> FileOperationResult {
    download(host, url, destination, None).await
}

/// 下载文件并回调进度。
pub async fn download_file_with_progress(
    host: &dyn FileSystemHost,
    url: &str,
    destination: Option<&str>,
    progress: ProgressCallback,
) -> FileOperationResult {
    download(host, url, destination, Some(progress)).await
}

async fn download(
    host: &dyn FileSystemHost,
    url: &str,
    destination: Option<&str>,
    progress: Option<ProgressCallback>,
) -> FileOperationResult {
    match try_download(host, url, destination, progress).await {
        Ok(uri) => {
            info!(url = %url, uri = %uri, "file downloaded");
            FileOperationResult::ok(uri)
        }
        Err(err) => {
            warn!(url = %url, error = %err, "download failed");
            FileOperationResult::failed(err.to_string())
        }
    }
}

async fn try_download(
    host: &dyn FileSystemHost,
    url: &str,
    destination: Option<&str>,
    progress: Option<ProgressCallback>,
) -> Result<String> {
    let destination = match destination {
        Some(destination) if !destination.is_empty() => destination.to_string(),
        _ => default_destination(host)?,
    };
    let result = host.download(url, &destination, progress).await?;
    debug!(
        status = result.status,
        bytes = result.bytes_written,
        mime_type = result.mime_type.as_deref().unwrap_or("unknown"),
        "download finished"
    );
    Ok(result.uri)
}

fn default_destination(host: &dyn FileSystemHost) -> Result<String> {
    let root = host
        .document_directory()
        .filter(|root| !root.is_empty())
        .ok_or(FileSystemError::DirectoryUnavailable("documentDirectory"))?;
    Ok(file_utils::join_paths(&[
        root,
        file_utils::generate_unique_filename(DEFAULT_DOWNLOAD_NAME),
    ]))
}

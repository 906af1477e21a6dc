//! 删除、复制与移动。

use devicefs_capabilities::FileSystemHost;
use devicefs_core::FileOperationResult;
use tracing::warn;

/// 删除文件或目录；路径不存在也视为成功。
pub async fn delete_file(host: &dyn FileSystemHost, uri: &str) -> bool {
    match host.delete(uri, true).await {
        Ok(()) => true,
        Err(err) => {
            warn!(uri = %uri, error = %err, "failed to delete");
            false
        }
    }
}

pub async fn copy_file(host: &dyn FileSystemHost, source: &str, destination: &str) -> FileOperationResult {
    match host.copy(source, destination).await {
        Ok(()) => FileOperationResult::ok(destination),
        Err(err) => {
            warn!(source = %source, destination = %destination, error = %err, "failed to copy");
            FileOperationResult::failed(err.to_string())
        }
    }
}

pub async fn move_file(host: &dyn FileSystemHost, source: &str, destination: &str) -> FileOperationResult {
    match host.move_entry(source, destination).await {
        Ok(()) => FileOperationResult::ok(destination),
        Err(err) => {
            warn!(source = %source, destination = %destination, error = %err, "failed to move");
            FileOperationResult::failed(err.to_string())
        }
    }
}

use devicefs_capabilities::FileSystemHost;
use devicefs_core::FileInfo;
use tracing::warn;

/// 获取文件信息；路径不存在或查询失败时返回 `None`。
pub async fn get_file_info(host: &dyn FileSystemHost, uri: &str) -> Option<FileInfo> {
    let info = match host.get_info(uri).await {
        Ok(info) => info,
        Err(err) => {
            warn!(uri = %uri, error = %err, "failed to get file info");
            return None;
        }
    };

    info.exists
        .then(|| FileInfo::new(uri, info.size, info.is_directory, info.modification_time))
}

pub async fn file_exists(host: &dyn FileSystemHost, uri: &str) -> bool {
    host.get_info(uri).await.is_ok_and(|info| info.exists)
}

pub async fn get_file_size(host: &dyn FileSystemHost, uri: &str) -> u64 {
    get_file_info(host, uri).await.map_or(0, |info| info.size)
}

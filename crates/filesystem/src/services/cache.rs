//! 缓存目录管理。

use devicefs_capabilities::FileSystemHost;
use devicefs_core::file_utils;
use futures_util::future::join_all;
use tracing::{info, warn};

use super::directory::list_directory;
use super::info::get_file_info;
use super::manager::delete_file;

/// 清空缓存目录下的所有条目。
///
/// 缓存目录不可用、无法列出或任一条目删除失败时返回 `false`。
pub async fn clear_cache(host: &dyn FileSystemHost) -> bool {
    let Some(cache_dir) = host.cache_directory().filter(|dir| !dir.is_empty()) else {
        warn!("cache directory is unavailable");
        return false;
    };

    let entries = match host.read_directory(&cache_dir).await {
        Ok(entries) => entries,
        Err(err) => {
            warn!(uri = %cache_dir, error = %err, "failed to list cache directory");
            return false;
        }
    };

    let results = join_all(entries.iter().map(|entry| {
        let uri = file_utils::join_paths(&[cache_dir.as_str(), entry.as_str()]);
        async move { delete_file(host, &uri).await }
    }))
    .await;

    let failed = results.iter().filter(|deleted| !**deleted).count();
    info!(uri = %cache_dir, removed = entries.len() - failed, failed, "cache cleared");
    failed == 0
}

/// 统计目录下各条目的大小之和，失败时返回 0。
pub async fn get_directory_size(host: &dyn FileSystemHost, uri: &str) -> u64 {
    let entries = list_directory(host, uri).await;
    let sizes = join_all(entries.iter().map(|entry| {
        let path = file_utils::join_paths(&[uri, entry.as_str()]);
        async move { get_file_info(host, &path).await.map_or(0, |info| info.size) }
    }))
    .await;
    sizes.into_iter().sum()
}

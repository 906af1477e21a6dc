use devicefs_capabilities::FileSystemHost;
use devicefs_core::DirectoryType;
use tracing::warn;

/// 创建目录（含缺失的父目录）。
pub async fn create_directory(host: &dyn FileSystemHost, uri: &str) -> bool {
    match host.make_directory(uri, true).await {
        Ok(()) => true,
        Err(err) => {
            warn!(uri = %uri, error = %err, "failed to create directory");
            false
        }
    }
}

/// 列出目录内容，失败时返回空列表。
pub async fn list_directory(host: &dyn FileSystemHost, uri: &str) -> Vec<String> {
    host.read_directory(uri).await.unwrap_or_else(|err| {
        warn!(uri = %uri, error = %err, "failed to list directory");
        Vec::new()
    })
}

/// 按类型获取根目录 URI，不可用时返回空字符串。
pub fn get_directory_path(host: &dyn FileSystemHost, directory: DirectoryType) -> String {
    let path = match directory {
        DirectoryType::DocumentDirectory => host.document_directory(),
        DirectoryType::CacheDirectory => host.cache_directory(),
    };
    path.unwrap_or_default()
}

pub fn get_document_directory(host: &dyn FileSystemHost) -> String {
    get_directory_path(host, DirectoryType::DocumentDirectory)
}

pub fn get_cache_directory(host: &dyn FileSystemHost) -> String {
    get_directory_path(host, DirectoryType::CacheDirectory)
}

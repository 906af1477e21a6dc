use devicefs_capabilities::{FileSystemHost, Result};
use devicefs_core::FileEncoding;
use tracing::warn;

use super::encoding::encode_content;

/// 读取文件内容，失败时返回 `None`。
pub async fn read_file(host: &dyn FileSystemHost, uri: &str, encoding: FileEncoding) -> Option<String> {
    match try_read_file(host, uri, encoding).await {
        Ok(content) => Some(content),
        Err(err) => {
            warn!(uri = %uri, encoding = %encoding, error = %err, "failed to read file");
            None
        }
    }
}

pub async fn read_file_as_base64(host: &dyn FileSystemHost, uri: &str) -> Option<String> {
    read_file(host, uri, FileEncoding::Base64).await
}

async fn try_read_file(host: &dyn FileSystemHost, uri: &str, encoding: FileEncoding) -> Result<String> {
    let bytes = host.read_bytes(uri).await?;
    encode_content(bytes, encoding)
}

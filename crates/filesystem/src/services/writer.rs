use devicefs_capabilities::{FileSystemHost, Result};
use devicefs_core::{FileEncoding, FileOperationResult};
use tracing::{debug, warn};

use super::encoding::decode_content;

/// 将字符串按编码写入文件。
pub async fn write_file(
    host: &dyn FileSystemHost,
    uri: &str,
    content: &str,
    encoding: FileEncoding,
) -> FileOperationResult {
    match try_write_file(host, uri, content, encoding).await {
        Ok(()) => {
            debug!(uri = %uri, encoding = %encoding, "file written");
            FileOperationResult::ok(uri)
        }
        Err(err) => {
            warn!(uri = %uri, error = %err, "failed to write file");
            FileOperationResult::failed(err.to_string())
        }
    }
}

async fn try_write_file(
    host: &dyn FileSystemHost,
    uri: &str,
    content: &str,
    encoding: FileEncoding,
) -> Result<()> {
    let bytes = decode_content(content, encoding)?;
    host.write_bytes(uri, &bytes).await
}

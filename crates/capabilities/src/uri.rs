//! `file://` URI 与本地路径之间的转换。

use std::path::{Path, PathBuf};

use reqwest::Url;

use crate::error::{FileSystemError, Result};

const FILE_SCHEME: &str = "file:";

/// 将 URI 转换为本地路径。
///
/// 接受绝对路径与 `file:` URI（含 `file:///abs`、`file://localhost/abs`
/// 以及被折叠为 `file:/abs` 的形式），百分号转义会被解码。
/// 其他 scheme、非本机主机与相对路径一律拒绝。
pub fn to_path(uri: &str) -> Result<PathBuf> {
    let invalid = || FileSystemError::InvalidUri(uri.to_string());

    if let Some(rest) = uri.strip_prefix(FILE_SCHEME) {
        if rest.trim_start_matches('/').is_empty() {
            return Err(invalid());
        }
        let url = Url::parse(uri).map_err(|_| invalid())?;
        return url.to_file_path().map_err(|()| invalid());
    }

    if uri.contains("://") {
        return Err(invalid());
    }

    let path = PathBuf::from(uri);
    if !path.is_absolute() {
        return Err(invalid());
    }
    Ok(path)
}

/// 将本地路径转换为 `file://` URI，目录以 `/` 结尾。
///
/// 绝对路径会做百分号编码；相对路径无法表示为 URI，原样拼接。
pub fn from_path(path: &Path, is_dir: bool) -> String {
    let url = if is_dir {
        Url::from_directory_path(path)
    } else {
        Url::from_file_path(path)
    };

    match url {
        Ok(url) => url.to_string(),
        Err(()) => {
            let mut uri = format!("{FILE_SCHEME}//{}", path.display());
            if is_dir && !uri.ends_with('/') {
                uri.push('/');
            }
            uri
        }
    }
}

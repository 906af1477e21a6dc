use thiserror::Error;

/// 文件系统错误类型。
#[derive(Debug, Error)]
pub enum FileSystemError {
    #[error("无效的 URI: {0}")]
    InvalidUri(String),

    #[error("路径不存在: {0}")]
    PathNotFound(String),

    #[error("路径不是目录: {0}")]
    NotADirectory(String),

    #[error("不能将目录复制到其自身内部: {0}")]
    CopyIntoSelf(String),

    #[error("目标已存在: {0}")]
    AlreadyExists(String),

    #[error("目录不可用: {0}")]
    DirectoryUnavailable(&'static str),

    #[error("HTTP 错误: {0}")]
    Http(#[from] reqwest::Error),

    #[error("下载失败: {0}")]
    Download(String),

    #[error("编码错误: {0}")]
    Encoding(String),

    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("其他错误: {0}")]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, FileSystemError>;

//! 宿主文件系统抽象层。
//!
//! 上层服务只依赖 [`FileSystemHost`]，不直接接触具体平台 API，
//! 便于替换为本地实现、内存实现或其他平台 SDK。

use std::sync::Arc;

use async_trait::async_trait;
use devicefs_core::DownloadProgress;

use crate::error::Result;

mod local;

pub use local::LocalFileSystem;

/// 下载进度回调。
pub type ProgressCallback = Arc<dyn Fn(DownloadProgress) + Send + Sync>;

/// 宿主返回的原始文件信息。
///
/// 不存在的路径以 `exists == false` 表示，而不是错误。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HostFileInfo {
    pub exists: bool,
    /// 文件大小；目录为其内容的递归总大小。
    pub size: u64,
    pub is_directory: bool,
    /// 修改时间（Unix 时间戳，秒）。
    pub modification_time: u64,
}

impl HostFileInfo {
    pub fn missing() -> Self {
        Self::default()
    }
}

/// 下载完成后的结果。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadResult {
    /// 目标文件 URI。
    pub uri: String,
    /// HTTP 状态码。
    pub status: u16,
    /// 实际写入的字节数。
    pub bytes_written: u64,
    /// 响应的 `Content-Type`。
    pub mime_type: Option<String>,
}

/// 宿主文件系统接口。
///
/// 所有 URI 均为平台文件定位字符串，由实现自行解析。
#[async_trait]
pub trait FileSystemHost: Send + Sync {
    /// 返回宿主名称，用于日志与诊断。
    fn name(&self) -> &str;

    /// 查询路径信息。
    async fn get_info(&self, uri: &str) -> Result<HostFileInfo>;

    /// 读取文件的全部字节。
    async fn read_bytes(&self, uri: &str) -> Result<Vec<u8>>;

    /// 以给定字节覆盖写入文件。
    async fn write_bytes(&self, uri: &str, contents: &[u8]) -> Result<()>;

    /// 复制文件或目录（目录递归复制）。
    async fn copy(&self, from: &str, to: &str) -> Result<()>;

    /// 移动文件或目录。
    async fn move_entry(&self, from: &str, to: &str) -> Result<()>;

    /// 删除文件或目录。
    ///
    /// `idempotent` 为真时，删除不存在的路径视为成功。
    async fn delete(&self, uri: &str, idempotent: bool) -> Result<()>;

    /// 创建目录，`intermediates` 为真时同时创建缺失的父目录。
    async fn make_directory(&self, uri: &str, intermediates: bool) -> Result<()>;

    /// 列出目录下的条目名称。
    async fn read_directory(&self, uri: &str) -> Result<Vec<String>>;

    /// 下载 `url` 到 `destination`。
    async fn download(
        &self,
        url: &str,
        destination: &str,
        progress: Option<ProgressCallback>,
    ) -> Result<DownloadResult>;

    /// 持久化文档目录 URI（以 `/` 结尾）。
    fn document_directory(&self) -> Option<String>;

    /// 缓存目录 URI（以 `/` 结尾）。
    fn cache_directory(&self) -> Option<String>;
}

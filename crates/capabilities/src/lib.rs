//! Host Capabilities - 宿主文件系统能力封装模块。
//!
//! 该 crate 定义宿主文件系统接口 [`FileSystemHost`]，并提供基于
//! tokio 与 reqwest 的本地实现 [`LocalFileSystem`]，供上层服务委托调用。

pub mod config;
pub mod error;
pub mod host;
pub mod uri;

pub use config::{DownloadConfig, FileSystemConfig};
pub use error::{FileSystemError, Result};
pub use host::{DownloadResult, FileSystemHost, HostFileInfo, LocalFileSystem, ProgressCallback};

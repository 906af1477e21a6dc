//! devicefs - 应用文件操作门面。
//!
//! 所有操作都委托给 [`FileSystemHost`]，按关注点拆分为若干服务，
//! 再由 [`FileSystemService`] 统一对外暴露。失败会被记录日志并转换为
//! `bool` / `Option` / [`FileOperationResult`]。

pub mod module_loader;
pub mod operations;
pub mod service;
pub mod services;

pub use devicefs_capabilities::{
    DownloadConfig, FileSystemConfig, FileSystemError, FileSystemHost, HostFileInfo,
    LocalFileSystem, ProgressCallback,
};
pub use devicefs_core::{
    DirectoryType, DownloadProgress, FileEncoding, FileInfo, FileOperationResult, file_utils, mime,
};
pub use module_loader::{
    DirectoryContext, ModuleCollection, ModuleContext, ModuleLoaderError, get_module_names,
    load_json_modules, load_modules_with_transform,
};
pub use operations::{
    CacheOperations, DirectoryOperations, DownloadOperations, FileInformation, FileManagement,
    FileOperations, FilePathOperations,
};
pub use service::FileSystemService;

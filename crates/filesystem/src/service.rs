//! 文件系统门面。

use std::sync::Arc;

use devicefs_capabilities::{FileSystemConfig, FileSystemHost, LocalFileSystem, ProgressCallback};
use devicefs_core::{
    DEFAULT_ENCODING, DirectoryType, FileEncoding, FileInfo, FileOperationResult, file_utils,
};

use crate::operations::{
    CacheOperations, DirectoryOperations, DownloadOperations, FileInformation, FileManagement,
    FileOperations, FilePathOperations,
};
use crate::services::{cache, directory, download, info, manager, path, reader, writer};

const FALLBACK_FILE_NAME: &str = "file";

/// 文件系统门面，将所有操作委托给各个服务。
#[derive(Clone)]
pub struct FileSystemService {
    host: Arc<dyn FileSystemHost>,
    default_encoding: FileEncoding,
}

impl FileSystemService {
    pub fn new(host: Arc<dyn FileSystemHost>) -> Self {
        Self {
            host,
            default_encoding: DEFAULT_ENCODING,
        }
    }

    /// 基于本地磁盘宿主创建门面。
    pub fn from_config(config: &FileSystemConfig) -> devicefs_capabilities::Result<Self> {
        let host = LocalFileSystem::from_config(config)?;
        Ok(Self::new(Arc::new(host)).with_default_encoding(config.default_encoding))
    }

    pub fn with_default_encoding(mut self, encoding: FileEncoding) -> Self {
        self.default_encoding = encoding;
        self
    }

    pub fn default_encoding(&self) -> FileEncoding {
        self.default_encoding
    }

    pub fn host(&self) -> &dyn FileSystemHost {
        self.host.as_ref()
    }

    // 读取

    pub async fn read_file(&self, uri: &str, encoding: Option<FileEncoding>) -> Option<String> {
        let encoding = encoding.unwrap_or(self.default_encoding);
        reader::read_file(self.host(), uri, encoding).await
    }

    pub async fn read_file_as_base64(&self, uri: &str) -> Option<String> {
        reader::read_file_as_base64(self.host(), uri).await
    }

    // 写入

    pub async fn write_file(
        &self,
        uri: &str,
        content: &str,
        encoding: Option<FileEncoding>,
    ) -> FileOperationResult {
        let encoding = encoding.unwrap_or(self.default_encoding);
        writer::write_file(self.host(), uri, content, encoding).await
    }

    // 文件管理

    pub async fn delete_file(&self, uri: &str) -> bool {
        manager::delete_file(self.host(), uri).await
    }

    pub async fn copy_file(&self, source: &str, destination: &str) -> FileOperationResult {
        manager::copy_file(self.host(), source, destination).await
    }

    pub async fn move_file(&self, source: &str, destination: &str) -> FileOperationResult {
        manager::move_file(self.host(), source, destination).await
    }

    // 目录

    pub async fn create_directory(&self, uri: &str) -> bool {
        directory::create_directory(self.host(), uri).await
    }

    pub async fn list_directory(&self, uri: &str) -> Vec<String> {
        directory::list_directory(self.host(), uri).await
    }

    pub fn get_directory_path(&self, directory: DirectoryType) -> String {
        directory::get_directory_path(self.host(), directory)
    }

    pub fn get_document_directory(&self) -> String {
        directory::get_document_directory(self.host())
    }

    pub fn get_cache_directory(&self) -> String {
        directory::get_cache_directory(self.host())
    }

    // 文件信息

    pub async fn get_file_info(&self, uri: &str) -> Option<FileInfo> {
        info::get_file_info(self.host(), uri).await
    }

    pub async fn exists(&self, uri: &str) -> bool {
        info::file_exists(self.host(), uri).await
    }

    pub async fn get_file_size(&self, uri: &str) -> u64 {
        info::get_file_size(self.host(), uri).await
    }

    // 下载

    pub async fn download_file(&self, url: &str, destination: Option<&str>) -> FileOperationResult {
        download::download_file(self.host(), url, destination).await
    }

    pub async fn download_file_with_progress(
        &self,
        url: &str,
        destination: Option<&str>,
        progress: ProgressCallback,
    ) -> FileOperationResult {
        download::download_file_with_progress(self.host(), url, destination, progress).await
    }

    // 缓存

    pub async fn clear_cache(&self) -> bool {
        cache::clear_cache(self.host()).await
    }

    pub async fn get_directory_size(&self, uri: &str) -> u64 {
        cache::get_directory_size(self.host(), uri).await
    }

    // 路径生成

    pub fn generate_file_path(&self, filename: &str, directory: DirectoryType) -> String {
        path::generate_file_path(self.host(), filename, directory)
    }

    pub fn generate_unique_file_path(&self, filename: &str, directory: DirectoryType) -> String {
        path::generate_file_path(self.host(), filename, directory)
    }

    // 便捷方法

    /// 复制到缓存目录，目标文件名为 `filename`（或源文件名）加唯一后缀。
    pub async fn copy_to_cache(&self, source: &str, filename: Option<&str>) -> FileOperationResult {
        self.copy_into(source, filename, DirectoryType::CacheDirectory).await
    }

    /// 复制到文档目录，命名规则同 [`Self::copy_to_cache`]。
    pub async fn copy_to_documents(
        &self,
        source: &str,
        filename: Option<&str>,
    ) -> FileOperationResult {
        self.copy_into(source, filename, DirectoryType::DocumentDirectory)
            .await
    }

    async fn copy_into(
        &self,
        source: &str,
        filename: Option<&str>,
        directory: DirectoryType,
    ) -> FileOperationResult {
        let name = filename
            .filter(|name| !name.is_empty())
            .or_else(|| Some(file_utils::get_file_name(source)).filter(|name| !name.is_empty()))
            .unwrap_or(FALLBACK_FILE_NAME);
        let destination = self.generate_unique_file_path(name, directory);
        manager::copy_file(self.host(), source, &destination).await
    }

    // 分组视图

    pub fn files(&self) -> FileOperations<'_> {
        FileOperations::new(self.host(), self.default_encoding)
    }

    pub fn management(&self) -> FileManagement<'_> {
        FileManagement::new(self.host())
    }

    pub fn directories(&self) -> DirectoryOperations<'_> {
        DirectoryOperations::new(self.host())
    }

    pub fn information(&self) -> FileInformation<'_> {
        FileInformation::new(self.host())
    }

    pub fn downloads(&self) -> DownloadOperations<'_> {
        DownloadOperations::new(self.host())
    }

    pub fn cache(&self) -> CacheOperations<'_> {
        CacheOperations::new(self.host())
    }

    pub fn paths(&self) -> FilePathOperations<'_> {
        FilePathOperations::new(self.host())
    }
}

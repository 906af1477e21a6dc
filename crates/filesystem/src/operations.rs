//! 按关注点分组的操作视图，与 [`crate::FileSystemService`] 暴露相同的能力。

use devicefs_capabilities::{FileSystemHost, ProgressCallback};
use devicefs_core::{DirectoryType, FileEncoding, FileInfo, FileOperationResult};

use crate::services::{cache, directory, download, info, manager, path, reader, writer};

macro_rules! define_view {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy)]
        pub struct $name<'a> {
            host: &'a dyn FileSystemHost,
        }

        impl<'a> $name<'a> {
            pub fn new(host: &'a dyn FileSystemHost) -> Self {
                Self { host }
            }
        }
    };
}

/// 读写；未指定编码时使用门面的默认编码。
#[derive(Clone, Copy)]
pub struct FileOperations<'a> {
    host: &'a dyn FileSystemHost,
    default_encoding: FileEncoding,
}

define_view!(
    /// 删除、复制与移动。
    FileManagement
);
define_view!(DirectoryOperations);
define_view!(FileInformation);
define_view!(DownloadOperations);
define_view!(CacheOperations);
define_view!(FilePathOperations);

impl<'a> FileOperations<'a> {
    pub fn new(host: &'a dyn FileSystemHost, default_encoding: FileEncoding) -> Self {
        Self {
            host,
            default_encoding,
        }
    }

    pub async fn read_file(&self, uri: &str, encoding: Option<FileEncoding>) -> Option<String> {
        let encoding = encoding.unwrap_or(self.default_encoding);
        reader::read_file(self.host, uri, encoding).await
    }

    pub async fn read_file_as_base64(&self, uri: &str) -> Option<String> {
        reader::read_file_as_base64(self.host, uri).await
    }

    pub async fn write_file(
        &self,
        uri: &str,
        content: &str,
        encoding: Option<FileEncoding>,
    ) -> FileOperationResult {
        let encoding = encoding.unwrap_or(self.default_encoding);
        writer::write_file(self.host, uri, content, encoding).await
    }
}

impl FileManagement<'_> {
    pub async fn delete_file(&self, uri: &str) -> bool {
        manager::delete_file(self.host, uri).await
    }

    pub async fn copy_file(&self, source: &str, destination: &str) -> FileOperationResult {
        manager::copy_file(self.host, source, destination).await
    }

    pub async fn move_file(&self, source: &str, destination: &str) -> FileOperationResult {
        manager::move_file(self.host, source, destination).await
    }
}

impl DirectoryOperations<'_> {
    pub async fn create_directory(&self, uri: &str) -> bool {
        directory::create_directory(self.host, uri).await
    }

    pub async fn list_directory(&self, uri: &str) -> Vec<String> {
        directory::list_directory(self.host, uri).await
    }

    pub fn get_directory_path(&self, directory: DirectoryType) -> String {
        directory::get_directory_path(self.host, directory)
    }

    pub fn get_document_directory(&self) -> String {
        directory::get_document_directory(self.host)
    }

    pub fn get_cache_directory(&self) -> String {
        directory::get_cache_directory(self.host)
    }
}

impl FileInformation<'_> {
    pub async fn get_file_info(&self, uri: &str) -> Option<FileInfo> {
        info::get_file_info(self.host, uri).await
    }

    pub async fn exists(&self, uri: &str) -> bool {
        info::file_exists(self.host, uri).await
    }

    pub async fn get_file_size(&self, uri: &str) -> u64 {
        info::get_file_size(self.host, uri).await
    }
}

impl DownloadOperations<'_> {
    pub async fn download_file(&self, url: &str, destination: Option<&str>) -> FileOperationResult {
        download::download_file(self.host, url, destination).await
    }

    pub async fn download_file_with_progress(
        &self,
        url: &str,
        destination: Option<&str>,
        progress: ProgressCallback,
    ) -> FileOperationResult {
        download::download_file_with_progress(self.host, url, destination, progress).await
    }
}

impl CacheOperations<'_> {
    pub async fn clear_cache(&self) -> bool {
        cache::clear_cache(self.host).await
    }

    pub async fn get_directory_size(&self, uri: &str) -> u64 {
        cache::get_directory_size(self.host, uri).await
    }
}

impl FilePathOperations<'_> {
    pub fn generate_file_path(&self, filename: &str, directory: DirectoryType) -> String {
        path::generate_file_path(self.host, filename, directory)
    }

    pub fn generate_unique_file_path(&self, filename: &str, directory: DirectoryType) -> String {
        path::generate_file_path(self.host, filename, directory)
    }
}

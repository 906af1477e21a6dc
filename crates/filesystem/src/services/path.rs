use devicefs_capabilities::FileSystemHost;
use devicefs_core::{DirectoryType, file_utils};

use super::directory::get_directory_path;

/// 在指定根目录下生成唯一文件路径。
pub fn generate_file_path(host: &dyn FileSystemHost, filename: &str, directory: DirectoryType) -> String {
    let root = get_directory_path(host, directory);
    file_utils::join_paths(&[root, file_utils::generate_unique_filename(filename)])
}

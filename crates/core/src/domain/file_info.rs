use serde::{Deserialize, Serialize};

use super::file_utils;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileInfo {
    pub uri: String,
    pub name: String,
    pub size: u64,
    pub exists: bool,
    pub is_directory: bool,
    /// Unix seconds.
    pub modification_time: u64,
}

impl FileInfo {
    pub fn new(uri: impl Into<String>, size: u64, is_directory: bool, modification_time: u64) -> Self {
        let uri = uri.into();
        let name = file_utils::get_file_name(&uri).to_string();
        Self {
            uri,
            name,
            size,
            exists: true,
            is_directory,
            modification_time,
        }
    }
}

pub mod domain;

pub use domain::{
    DEFAULT_ENCODING, DirectoryType, DomainError, DownloadProgress, FileEncoding, FileInfo,
    FileOperationResult, MAX_FILE_NAME_LENGTH, TEMP_FILE_PREFIX, file_utils, mime,
};

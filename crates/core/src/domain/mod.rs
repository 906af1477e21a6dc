mod constants;
mod directory_type;
mod encoding;
mod error;
mod file_info;
pub mod file_utils;
pub mod mime;
mod operation_result;
mod progress;

pub use constants::{DEFAULT_ENCODING, MAX_FILE_NAME_LENGTH, TEMP_FILE_PREFIX};
pub use directory_type::DirectoryType;
pub use encoding::FileEncoding;
pub use error::DomainError;
pub use file_info::FileInfo;
pub use operation_result::FileOperationResult;
pub use progress::DownloadProgress;

use super::FileEncoding;

pub const MAX_FILE_NAME_LENGTH: usize = 255;
pub const DEFAULT_ENCODING: FileEncoding = FileEncoding::Utf8;
pub const TEMP_FILE_PREFIX: &str = "tmp_";

//! 文件内容编解码。

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use devicefs_capabilities::{FileSystemError, Result};
use devicefs_core::FileEncoding;

pub fn is_valid_encoding(value: &str) -> bool {
    FileEncoding::is_valid(value)
}

/// 将读取到的字节编码为字符串。
pub fn encode_content(bytes: Vec<u8>, encoding: FileEncoding) -> Result<String> {
    match encoding {
        FileEncoding::Utf8 => {
            String::from_utf8(bytes).map_err(|err| FileSystemError::Encoding(err.to_string()))
        }
        FileEncoding::Base64 => Ok(STANDARD.encode(bytes)),
    }
}

/// 将待写入的字符串解码为字节。
pub fn decode_content(content: &str, encoding: FileEncoding) -> Result<Vec<u8>> {
    match encoding {
        FileEncoding::Utf8 => Ok(content.as_bytes().to_vec()),
        FileEncoding::Base64 => STANDARD
            .decode(content.trim())
            .map_err(|err| FileSystemError::Encoding(err.to_string())),
    }
}

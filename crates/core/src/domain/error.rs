use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid encoding: {0}. expected utf8 or base64")]
    InvalidEncoding(String),

    #[error("invalid directory type: {0}. expected documentDirectory or cacheDirectory")]
    InvalidDirectoryType(String),
}

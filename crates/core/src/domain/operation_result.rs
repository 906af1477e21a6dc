use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileOperationResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FileOperationResult {
    pub fn ok(uri: impl Into<String>) -> Self {
        Self {
            success: true,
            uri: Some(uri.into()),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            uri: None,
            error: Some(error.into()),
        }
    }
}

impl<E: std::fmt::Display> From<Result<String, E>> for FileOperationResult {
    fn from(value: Result<String, E>) -> Self {
        match value {
            Ok(uri) => Self::ok(uri),
            Err(err) => Self::failed(err.to_string()),
        }
    }
}

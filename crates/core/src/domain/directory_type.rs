use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DirectoryType {
    #[default]
    DocumentDirectory,
    CacheDirectory,
}

impl DirectoryType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DocumentDirectory => "documentDirectory",
            Self::CacheDirectory => "cacheDirectory",
        }
    }
}

impl fmt::Display for DirectoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DirectoryType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "documentDirectory" | "document" => Ok(Self::DocumentDirectory),
            "cacheDirectory" | "cache" => Ok(Self::CacheDirectory),
            other => Err(DomainError::InvalidDirectoryType(other.to_string())),
        }
    }
}

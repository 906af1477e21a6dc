use serde::{Deserialize, Serialize};

use super::file_utils;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DownloadProgress {
    pub total_bytes_written: u64,
    /// 0 when the server did not announce a length.
    pub total_bytes_expected_to_write: u64,
    /// Always within `[0, 1]`.
    pub progress: f64,
}

impl DownloadProgress {
    pub fn new(written: u64, expected: u64) -> Self {
        Self {
            total_bytes_written: written,
            total_bytes_expected_to_write: expected,
            progress: file_utils::calculate_progress(written, expected),
        }
    }
}

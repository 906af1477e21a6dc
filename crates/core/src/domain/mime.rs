//! Extension based MIME lookup.

use super::file_utils::get_file_extension;

pub const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

const IMAGE_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "png", "gif", "webp", "svg"];
const VIDEO_EXTENSIONS: [&str; 5] = ["mp4", "mov", "avi", "mkv", "webm"];
const AUDIO_EXTENSIONS: [&str; 5] = ["mp3", "wav", "m4a", "ogg", "flac"];

fn extension_key(filename: &str) -> String {
    get_file_extension(filename)
        .trim_start_matches('.')
        .to_ascii_lowercase()
}

pub fn get_mime_type(filename: &str) -> &'static str {
    match extension_key(filename).as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",

        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "xls" => "application/vnd.ms-excel",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",

        "txt" => "text/plain",
        "csv" => "text/csv",
        "json" => "application/json",

        "mp4" => "video/mp4",
        "mov" => "video/quicktime",
        "avi" => "video/x-msvideo",
        "mkv" => "video/x-matroska",
        "webm" => "video/webm",

        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "m4a" => "audio/mp4",
        "ogg" => "audio/ogg",
        "flac" => "audio/flac",

        _ => DEFAULT_MIME_TYPE,
    }
}

pub fn is_image_file(filename: &str) -> bool {
    IMAGE_EXTENSIONS.contains(&extension_key(filename).as_str())
}

pub fn is_video_file(filename: &str) -> bool {
    VIDEO_EXTENSIONS.contains(&extension_key(filename).as_str())
}

pub fn is_audio_file(filename: &str) -> bool {
    AUDIO_EXTENSIONS.contains(&extension_key(filename).as_str())
}

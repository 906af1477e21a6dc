//! Filename and path helpers shared by every service.

use chrono::Utc;
use uuid::Uuid;

use super::MAX_FILE_NAME_LENGTH;

/// Characters of the original base name kept by [`generate_unique_filename`].
const UNIQUE_BASE_MAX_CHARS: usize = 50;

const SIZE_UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// `photo.jpg` -> `photo_1718000000000_a1b2c3.jpg`
pub fn generate_unique_filename(original_name: &str) -> String {
    let extension = get_file_extension(original_name);
    let base: String = get_filename_without_extension(original_name)
        .chars()
        .take(UNIQUE_BASE_MAX_CHARS)
        .collect();
    format!(
        "{base}_{}_{}{extension}",
        Utc::now().timestamp_millis(),
        random_suffix(6)
    )
}

/// `photo.jpg` + `avatar` -> `avatar_1718000000000_a1b2c3d.jpg`
pub fn generate_file_name(original_name: &str, prefix: Option<&str>) -> String {
    let extension = get_file_extension(original_name);
    let prefix = match prefix {
        Some(prefix) if !prefix.is_empty() => format!("{prefix}_"),
        _ => String::new(),
    };
    format!(
        "{prefix}{}_{}{extension}",
        Utc::now().timestamp_millis(),
        random_suffix(7)
    )
}

fn random_suffix(len: usize) -> String {
    Uuid::new_v4().simple().to_string().chars().take(len).collect()
}

/// Returns the trailing `.ext` including the dot, or `""`.
pub fn get_file_extension(filename: &str) -> &str {
    match filename.rfind('.') {
        Some(index) if index + 1 < filename.len() => &filename[index..],
        _ => "",
    }
}

pub fn get_filename_without_extension(filename: &str) -> &str {
    let extension = get_file_extension(filename);
    &filename[..filename.len() - extension.len()]
}

/// Replaces everything outside `[A-Za-z0-9._-]` with `_`.
pub fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .take(MAX_FILE_NAME_LENGTH)
        .collect()
}

pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.2} {}", SIZE_UNITS[unit])
}

pub fn calculate_progress(written: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (written as f64 / total as f64).clamp(0.0, 1.0)
}

pub fn is_absolute_path(path: &str) -> bool {
    path.starts_with('/') || path.starts_with("file://")
}

/// Joins with `/` and collapses repeated slashes. A leading `scheme://` is kept intact.
pub fn join_paths<S: AsRef<str>>(segments: &[S]) -> String {
    let joined = segments
        .iter()
        .map(AsRef::as_ref)
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/");

    let (scheme, rest) = match split_scheme(&joined) {
        Some((scheme, rest)) => (scheme, rest),
        None => ("", joined.as_str()),
    };

    let mut out = String::with_capacity(joined.len());
    out.push_str(scheme);
    for c in rest.chars() {
        if c == '/' && out.ends_with('/') && out.len() > scheme.len() {
            continue;
        }
        out.push(c);
    }
    out
}

/// Splits `file:///a` into (`file://`, `/a`).
fn split_scheme(uri: &str) -> Option<(&str, &str)> {
    let index = uri.find("://")?;
    let scheme = &uri[..index];
    let valid = scheme.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
        && scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    valid.then(|| uri.split_at(index + 3))
}

pub fn get_file_name(filepath: &str) -> &str {
    filepath.rsplit('/').next().unwrap_or_default()
}

//! Path utilities for uploaded image files.
//!
//! Upload names come straight from the client, so they are checked for an
//! image extension and reduced to a safe single path component before being
//! used as part of a file name on disk.

use std::path::Path;

/// List of supported image file extensions.
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "bmp"];

/// Check if a path has an image file extension.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use schooldir_common::paths::is_image_file;
///
/// assert!(is_image_file(Path::new("campus.jpg")));
/// assert!(is_image_file(Path::new("LOGO.PNG")));
/// assert!(!is_image_file(Path::new("brochure.pdf")));
/// ```
pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Get the list of image file extensions.
pub fn image_extensions() -> &'static [&'static str] {
    IMAGE_EXTENSIONS
}

/// Reduce a client-supplied file name to a safe single path component.
///
/// Only the final component is kept (both `/` and `\` count as separators),
/// and every character other than ASCII alphanumerics, `.`, `-` and `_` is
/// replaced with `_`. Leading dots are stripped so the result is never hidden
/// or a relative path reference. Returns `"image"` when nothing usable remains.
///
/// # Examples
///
/// ```
/// use schooldir_common::paths::sanitize_file_name;
///
/// assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
/// assert_eq!(sanitize_file_name("my school.png"), "my_school.png");
/// ```
pub fn sanitize_file_name(name: &str) -> String {
    let last = name.rsplit(['/', '\\']).next().unwrap_or("");

    let cleaned: String = last
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let trimmed = cleaned.trim_start_matches('.');
    if trimmed.is_empty() {
        "image".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Shorten a file name to at most `max_bytes` bytes, keeping its extension.
///
/// The stem is cut on a character boundary. When the extension alone would
/// not leave room for a stem, the whole name is cut instead.
///
/// # Examples
///
/// ```
/// use schooldir_common::paths::truncate_file_name;
///
/// assert_eq!(truncate_file_name("campus.png", 255), "campus.png");
/// assert_eq!(truncate_file_name("campus.png", 7), "cam.png");
/// ```
pub fn truncate_file_name(name: &str, max_bytes: usize) -> String {
    if name.len() <= max_bytes {
        return name.to_string();
    }

    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && ext.len() + 1 < max_bytes => {
            let keep = max_bytes - ext.len() - 1;
            format!("{}.{}", prefix_within(stem, keep), ext)
        }
        _ => prefix_within(name, max_bytes).to_string(),
    }
}

/// Longest prefix of `s` that fits in `max_bytes` without splitting a char.
fn prefix_within(s: &str, max_bytes: usize) -> &str {
    let mut end = max_bytes.min(s.len());
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

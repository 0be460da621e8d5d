//! Filesystem-safe destination paths for untrusted archive names.

use std::path::PathBuf;
use std::sync::OnceLock;

use regex::Regex;

/// Characters that are not allowed in a file name on at least one platform.
///
/// Path separators are included: an escaped name is always one component.
fn illegal_chars() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r#"[\x00-\x1f/\\:*?"<>|]"#).unwrap())
}

/// Strip characters that are illegal in a file name.
///
/// Trailing dots and spaces are removed as well; Windows drops them silently.
///
/// # Examples
///
/// ```
/// use packsmith::asset::escape_filename;
///
/// assert_eq!(escape_filename("stone.png"), "stone.png");
/// assert_eq!(escape_filename("what?.txt"), "what.txt");
/// assert_eq!(escape_filename("a<b>|c:d"), "abcd");
/// ```
pub fn escape_filename(name: &str) -> String {
    let escaped = illegal_chars().replace_all(name, "");
    escaped.trim_end_matches(['.', ' ']).to_string()
}

/// Turn an archive entry name into a relative destination path.
///
/// Each component is escaped with [`escape_filename`]; empty, `.` and `..`
/// components are dropped so the result can never leave the directory it is
/// joined onto. Returns `None` when nothing usable remains.
///
/// # Examples
///
/// ```
/// use std::path::PathBuf;
/// use packsmith::asset::sanitize_relative_path;
///
/// assert_eq!(
///     sanitize_relative_path("assets/minecraft/textures/block/stone.png"),
///     Some(PathBuf::from("assets/minecraft/textures/block/stone.png"))
/// );
/// assert_eq!(
///     sanitize_relative_path("../../etc/passwd"),
///     Some(PathBuf::from("etc/passwd"))
/// );
/// assert_eq!(sanitize_relative_path("/../"), None);
/// ```
pub fn sanitize_relative_path(name: &str) -> Option<PathBuf> {
    let path: PathBuf = name
        .split(['/', '\\'])
        .filter(|part| !matches!(*part, "" | "." | ".."))
        .map(escape_filename)
        .filter(|part| !part.is_empty())
        .collect();

    if path.as_os_str().is_empty() {
        None
    } else {
        Some(path)
    }
}

//! Path normalization.
//!
//! Pure string functions that turn arbitrary path input into canonical
//! absolute paths. No backend is consulted, so Location and File navigation
//! can be reasoned about structurally.
//!
//! Canonical form:
//!
//! - absolute, `/`-separated (a `\` in the input is read as a separator)
//! - no empty, `.` or `..` segments
//! - directories end with `/`, files never do; the root is `/`
//!
//! A `..` at the root is clamped: `/../a/` resolves to `/a/`.

use crate::error::{VfsError, VfsResult};

/// The canonical path separator.
pub const SEPARATOR: char = '/';

/// Normalize `path` against the directory `base`.
///
/// Absolute input ignores `base`. The result names a directory when the input
/// is empty, ends with a separator, or ends in a `.` / `..` segment.
pub fn normalize(base: &str, path: &str) -> String {
    let path = path.replace('\\', "/");
    let base = base.replace('\\', "/");

    let mut segments: Vec<&str> = Vec::new();
    if !path.starts_with(SEPARATOR) {
        push_segments(&mut segments, &base);
    }
    push_segments(&mut segments, &path);

    let is_dir = path.is_empty()
        || path.ends_with(SEPARATOR)
        || matches!(path.rsplit(SEPARATOR).next(), Some(".") | Some(".."));

    join(&segments, is_dir)
}

fn push_segments<'a>(stack: &mut Vec<&'a str>, path: &'a str) {
    for segment in path.split(SEPARATOR) {
        match segment {
            "" | "." => {}
            ".." => {
                // Clamped at root
                stack.pop();
            }
            s => stack.push(s),
        }
    }
}

fn join(segments: &[&str], is_dir: bool) -> String {
    if segments.is_empty() {
        return SEPARATOR.to_string();
    }
    let mut out = String::with_capacity(segments.iter().map(|s| s.len() + 1).sum::<usize>() + 1);
    for segment in segments {
        out.push(SEPARATOR);
        out.push_str(segment);
    }
    if is_dir {
        out.push(SEPARATOR);
    }
    out
}

/// Resolve a location path relative to `base`.
///
/// The result is always slash-terminated; `other` and `other/` both name the
/// directory `other/`.
pub fn resolve_location(base: &str, relative: &str) -> VfsResult<String> {
    if relative.is_empty() {
        return Err(VfsError::invalid_path("location path is empty"));
    }
    let mut resolved = normalize(base, relative);
    if !resolved.ends_with(SEPARATOR) {
        resolved.push(SEPARATOR);
    }
    Ok(resolved)
}

/// Resolve a file path relative to `base`.
///
/// Rejects empty input and anything that names a directory: a trailing
/// separator, a final `.` / `..` segment, or the root itself.
pub fn resolve_file(base: &str, relative: &str) -> VfsResult<String> {
    if relative.is_empty() {
        return Err(VfsError::invalid_path("file path is empty"));
    }
    if relative.ends_with(SEPARATOR) || relative.ends_with('\\') {
        return Err(VfsError::invalid_path(format!(
            "file path must not end with a separator: {relative}"
        )));
    }
    let resolved = normalize(base, relative);
    if resolved.ends_with(SEPARATOR) {
        return Err(VfsError::invalid_path(format!(
            "file path resolves to a directory: {relative}"
        )));
    }
    Ok(resolved)
}

/// Reject listing prefixes that carry a path fragment.
pub fn validate_prefix(prefix: &str) -> VfsResult<()> {
    if prefix.contains(SEPARATOR) || prefix.contains('\\') {
        return Err(VfsError::bad_file_prefix(prefix));
    }
    Ok(())
}

/// Directory part of a canonical file path, slash-terminated.
pub fn parent_dir(file_path: &str) -> &str {
    match file_path.rfind(SEPARATOR) {
        Some(idx) => &file_path[..=idx],
        None => "/",
    }
}

/// Final segment of a canonical file path.
pub fn file_name(file_path: &str) -> &str {
    match file_path.rfind(SEPARATOR) {
        Some(idx) => &file_path[idx + 1..],
        None => file_path,
    }
}

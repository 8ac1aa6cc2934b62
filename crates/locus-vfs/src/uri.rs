//! URI projection.
//!
//! URIs are never stored; they are computed from a backend's scheme and
//! volume plus a canonical path: `<scheme>://<volume><path>`.

use crate::error::{VfsError, VfsResult};

/// Build a URI from its parts. `path` must already be canonical.
pub fn format(scheme: &str, volume: &str, path: &str) -> String {
    format!("{scheme}://{volume}{path}")
}

/// A URI split into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedUri {
    pub scheme: String,
    pub authority: String,
    /// Path as written, starting with `/`. Not normalized.
    pub path: String,
}

/// Split `scheme://authority/path`.
///
/// The path part defaults to `/` when the URI has none.
pub fn parse(uri: &str) -> VfsResult<ParsedUri> {
    let (scheme, rest) = uri
        .split_once("://")
        .ok_or_else(|| VfsError::invalid_path(format!("not a URI: {uri}")))?;

    let valid_scheme = !scheme.is_empty()
        && scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '.' | '-'));
    if !valid_scheme {
        return Err(VfsError::invalid_path(format!("bad URI scheme: {uri}")));
    }

    let (authority, path) = match rest.find('/') {
        Some(idx) => (&rest[..idx], &rest[idx..]),
        None => (rest, "/"),
    };

    Ok(ParsedUri {
        scheme: scheme.to_string(),
        authority: authority.to_string(),
        path: path.to_string(),
    })
}

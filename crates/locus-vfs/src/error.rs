//! VFS error types.

use std::io;
use thiserror::Error;

/// VFS error type.
///
/// Structural errors (`InvalidPath`, `BadFilePrefix`) are raised by
/// [`Location`](crate::Location) and [`File`](crate::File) before any backend
/// is touched. `NotFound` is surfaced by backends and by operations that need
/// the target to exist; `exists` and the listing operations turn it into
/// `false` / an empty listing instead.
#[derive(Debug, Error)]
pub enum VfsError {
    /// Malformed or empty path input.
    #[error("invalid path: {0}")]
    InvalidPath(String),

    /// Listing prefix contains a path separator.
    #[error("file prefix must not contain a path separator: {0}")]
    BadFilePrefix(String),

    /// File or directory not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// No backend registered for the scheme.
    #[error("no filesystem registered for scheme: {0}")]
    UnknownScheme(String),

    /// Failure from the underlying storage medium.
    #[error("{op} {path}: {source}")]
    Backend {
        op: &'static str,
        path: String,
        #[source]
        source: io::Error,
    },

    /// Registry configuration could not be read or parsed.
    #[error("config error: {0}")]
    Config(String),
}

impl VfsError {
    /// Create an InvalidPath error.
    pub fn invalid_path(path: impl Into<String>) -> Self {
        Self::InvalidPath(path.into())
    }

    /// Create a BadFilePrefix error.
    pub fn bad_file_prefix(prefix: impl Into<String>) -> Self {
        Self::BadFilePrefix(prefix.into())
    }

    /// Create a NotFound error.
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::NotFound(path.into())
    }

    /// Create an UnknownScheme error.
    pub fn unknown_scheme(scheme: impl Into<String>) -> Self {
        Self::UnknownScheme(scheme.into())
    }

    /// Create a Config error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a Backend error, keeping the I/O error kind as-is.
    pub fn backend(op: &'static str, path: impl Into<String>, source: io::Error) -> Self {
        Self::Backend {
            op,
            path: path.into(),
            source,
        }
    }

    /// Returns a mapper that wraps an I/O error with the failing operation
    /// and path. `NotFound` and `NotADirectory` (a file sits where a parent
    /// directory was expected) both become [`VfsError::NotFound`].
    pub fn io(op: &'static str, path: impl Into<String>) -> impl FnOnce(io::Error) -> Self {
        let path = path.into();
        move |source| {
            if matches!(
                source.kind(),
                io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
            ) {
                Self::NotFound(path)
            } else {
                Self::Backend { op, path, source }
            }
        }
    }

    /// Returns true for [`VfsError::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Convert VfsError to std::io::Error for compatibility.
impl From<VfsError> for io::Error {
    fn from(e: VfsError) -> Self {
        match e {
            VfsError::InvalidPath(msg) => io::Error::new(io::ErrorKind::InvalidInput, msg),
            VfsError::BadFilePrefix(msg) => io::Error::new(io::ErrorKind::InvalidInput, msg),
            VfsError::NotFound(msg) => io::Error::new(io::ErrorKind::NotFound, msg),
            VfsError::UnknownScheme(msg) => io::Error::new(io::ErrorKind::Unsupported, msg),
            VfsError::Backend { source, .. } => source,
            VfsError::Config(msg) => io::Error::other(msg),
        }
    }
}

/// VFS result type.
pub type VfsResult<T> = Result<T, VfsError>;

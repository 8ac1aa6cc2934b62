//! Backend contract.
//!
//! A [`FileSystem`] is the polymorphic seam through which [`Location`] and
//! [`File`] reach storage. Location and File never branch on which backend
//! they hold.
//!
//! [`Location`]: crate::Location
//! [`File`]: crate::File

use std::fmt::Debug;
use std::io::{Read, Write};
use std::path::PathBuf;
use std::time::SystemTime;

use serde::{Deserialize, Serialize};

use crate::error::VfsResult;

/// Readable byte stream. Released when dropped.
pub type ReadStream = Box<dyn Read + Send>;

/// Writable byte stream. Released when dropped.
pub type WriteStream = Box<dyn Write + Send>;

/// Kind of a stored entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryKind {
    /// Regular file.
    File,
    /// Directory.
    Directory,
}

impl EntryKind {
    /// Returns true if this is a regular file.
    pub fn is_file(&self) -> bool {
        matches!(self, EntryKind::File)
    }

    /// Returns true if this is a directory.
    pub fn is_dir(&self) -> bool {
        matches!(self, EntryKind::Directory)
    }
}

/// Entry metadata reported by a backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Entry kind.
    pub kind: EntryKind,
    /// Size in bytes (0 for directories).
    pub size: u64,
    /// Last modification time, when the backend tracks one.
    pub modified: Option<SystemTime>,
}

impl Metadata {
    /// Metadata for a file.
    pub fn file(size: u64, modified: Option<SystemTime>) -> Self {
        Self {
            kind: EntryKind::File,
            size,
            modified,
        }
    }

    /// Metadata for a directory.
    pub fn directory() -> Self {
        Self {
            kind: EntryKind::Directory,
            size: 0,
            modified: None,
        }
    }
}

/// Storage backend operations.
///
/// All paths handed to a backend are canonical (see [`crate::path`]).
/// Directory paths end with `/`, file paths do not.
pub trait FileSystem: Send + Sync + Debug {
    /// Fixed URI scheme for this backend, e.g. `file` or `mem`.
    fn scheme(&self) -> &str;

    /// Human-readable backend name.
    fn name(&self) -> &str;

    /// Root identifier used as the URI authority. Empty when not applicable.
    fn volume(&self) -> &str {
        ""
    }

    /// Key naming the storage object behind `path`, for backends whose
    /// storage lives outside this handle.
    ///
    /// Two handles of the same scheme that report equal keys address the
    /// same bytes. `None` means storage is private to this instance, so only
    /// the same `Arc` can alias it.
    fn storage_key(&self, _path: &str) -> Option<PathBuf> {
        None
    }

    /// Names of the regular files directly inside `dir`, in any order.
    ///
    /// Returns [`VfsError::NotFound`](crate::VfsError::NotFound) when the
    /// directory does not exist.
    fn list_directory(&self, dir: &str) -> VfsResult<Vec<String>>;

    /// Metadata for `path`.
    fn metadata(&self, path: &str) -> VfsResult<Metadata>;

    /// Check whether `path` exists as the kind its form implies.
    ///
    /// A trailing `/` asks for a directory, anything else for a file.
    /// Absence is `Ok(false)`, not an error.
    fn exists(&self, path: &str) -> VfsResult<bool> {
        match self.metadata(path) {
            Ok(meta) => Ok(meta.kind.is_dir() == path.ends_with('/')),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Open a file for reading.
    fn open_read(&self, path: &str) -> VfsResult<ReadStream>;

    /// Open a file for writing, creating it and any parent directories.
    /// Existing content is truncated.
    fn open_write(&self, path: &str) -> VfsResult<WriteStream>;

    /// Remove a file.
    fn delete(&self, path: &str) -> VfsResult<()>;
}

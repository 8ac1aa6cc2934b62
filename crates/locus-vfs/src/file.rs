//! File addresses and byte I/O.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::io::{self, Read, Write};
use std::sync::Arc;
use std::time::SystemTime;

use crate::backend::{FileSystem, Metadata, ReadStream, WriteStream};
use crate::error::{VfsError, VfsResult};
use crate::location::{self, Location};
use crate::{path, uri};

/// A single file within one backend.
///
/// The path is absolute and canonical and never ends with `/`. Byte I/O is
/// delegated to the backend through short-lived streams that close when
/// dropped.
#[derive(Clone)]
pub struct File {
    fs: Arc<dyn FileSystem>,
    path: String,
}

impl File {
    /// File at `path`, resolved from the backend root.
    pub fn new(fs: Arc<dyn FileSystem>, path: &str) -> VfsResult<Self> {
        let path = path::resolve_file("/", path)?;
        Ok(Self { fs, path })
    }

    /// Caller guarantees `path` is a canonical file path.
    pub(crate) fn from_canonical(fs: Arc<dyn FileSystem>, path: String) -> Self {
        debug_assert!(path.starts_with('/') && !path.ends_with('/'));
        Self { fs, path }
    }

    /// The backend this file lives on.
    pub fn file_system(&self) -> &Arc<dyn FileSystem> {
        &self.fs
    }

    /// The enclosing location.
    pub fn location(&self) -> Location {
        Location::from_canonical(Arc::clone(&self.fs), path::parent_dir(&self.path).to_string())
    }

    /// Final path segment.
    pub fn name(&self) -> &str {
        path::file_name(&self.path)
    }

    /// Canonical path, e.g. `/foo/bar.txt`.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// `scheme://volume/path`.
    pub fn uri(&self) -> String {
        uri::format(self.fs.scheme(), self.fs.volume(), &self.path)
    }

    /// Whether the file exists. Absence is `Ok(false)`.
    #[tracing::instrument(level = "debug", skip(self), fields(uri = %self), name = "file.exists")]
    pub fn exists(&self) -> VfsResult<bool> {
        self.fs.exists(&self.path)
    }

    /// Open a read stream. Fails with `NotFound` if the file is absent.
    pub fn open_read(&self) -> VfsResult<ReadStream> {
        self.fs.open_read(&self.path)
    }

    /// Open a write stream, creating the file (and parents) or truncating it.
    pub fn open_write(&self) -> VfsResult<WriteStream> {
        self.fs.open_write(&self.path)
    }

    /// Replace the file's content with `data`. Returns the bytes written.
    #[tracing::instrument(level = "debug", skip(self, data), fields(uri = %self, len = data.len()), name = "file.write")]
    pub fn write(&self, data: &[u8]) -> VfsResult<usize> {
        let mut stream = self.open_write()?;
        stream.write_all(data).map_err(VfsError::io("write", &self.path))?;
        stream.flush().map_err(VfsError::io("write", &self.path))?;
        Ok(data.len())
    }

    /// Read the whole file.
    #[tracing::instrument(level = "debug", skip(self), fields(uri = %self), name = "file.read")]
    pub fn read_to_end(&self) -> VfsResult<Vec<u8>> {
        let mut stream = self.open_read()?;
        let mut buf = Vec::new();
        stream.read_to_end(&mut buf).map_err(VfsError::io("read", &self.path))?;
        Ok(buf)
    }

    /// Remove the file. Deleting an absent file fails with `NotFound`.
    #[tracing::instrument(level = "debug", skip(self), fields(uri = %self), name = "file.delete")]
    pub fn delete(&self) -> VfsResult<()> {
        self.fs.delete(&self.path)
    }

    /// Size in bytes.
    pub fn size(&self) -> VfsResult<u64> {
        Ok(self.metadata()?.size)
    }

    /// Last modification time, if the backend tracks one.
    pub fn last_modified(&self) -> VfsResult<Option<SystemTime>> {
        Ok(self.metadata()?.modified)
    }

    fn metadata(&self) -> VfsResult<Metadata> {
        let meta = self.fs.metadata(&self.path)?;
        if meta.kind.is_dir() {
            return Err(VfsError::not_found(&self.path));
        }
        Ok(meta)
    }

    /// Whether `other` addresses the same stored bytes, either through the
    /// same backend handle or through another handle over the same storage.
    fn same_storage(&self, other: &File) -> bool {
        if self == other {
            return true;
        }
        if self.fs.scheme() != other.fs.scheme() {
            return false;
        }
        match self.fs.storage_key(&self.path) {
            Some(key) => other.fs.storage_key(&other.path).as_ref() == Some(&key),
            None => false,
        }
    }

    /// Copy this file's content over `target`, which may live on another
    /// backend. Copying a file onto itself, even through a second handle on
    /// the same storage, is a no-op.
    #[tracing::instrument(level = "debug", skip(self, target), fields(from = %self, to = %target), name = "file.copy")]
    pub fn copy_to_file(&self, target: &File) -> VfsResult<()> {
        if self.same_storage(target) {
            return Ok(());
        }
        let mut reader = self.open_read()?;
        let mut writer = target.open_write()?;
        io::copy(&mut reader, &mut writer).map_err(VfsError::io("copy", &target.path))?;
        writer.flush().map_err(VfsError::io("copy", &target.path))?;
        Ok(())
    }

    /// Copy into `location` under the same name. Returns the new file.
    pub fn copy_to_location(&self, location: &Location) -> VfsResult<File> {
        let target = location.new_file(self.name())?;
        self.copy_to_file(&target)?;
        Ok(target)
    }

    /// Copy to `target`, then delete this file. Not atomic: a failed delete
    /// leaves both copies in place.
    pub fn move_to_file(&self, target: &File) -> VfsResult<()> {
        if self.same_storage(target) {
            return Ok(());
        }
        self.copy_to_file(target)?;
        self.delete()
    }

    /// Move into `location` under the same name. Returns the new file.
    pub fn move_to_location(&self, location: &Location) -> VfsResult<File> {
        let target = location.new_file(self.name())?;
        self.move_to_file(&target)?;
        Ok(target)
    }
}

impl PartialEq for File {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path && location::same_backend(&self.fs, &other.fs)
    }
}

impl Eq for File {}

impl Hash for File {
    fn hash<H: Hasher>(&self, state: &mut H) {
        location::hash_backend(&self.fs, state);
        self.path.hash(state);
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.uri())
    }
}

impl fmt::Debug for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("File")
            .field("scheme", &self.fs.scheme())
            .field("path", &self.path)
            .finish()
    }
}

//! In-memory filesystem backend.
//!
//! Ephemeral storage for tests and scratch data. Only files are stored;
//! directories are implied by the files beneath them.

use std::collections::BTreeMap;
use std::io::{self, Cursor, Write};
use std::ops::Bound;
use std::sync::Arc;
use std::time::SystemTime;

use parking_lot::RwLock;

use crate::backend::{FileSystem, Metadata, ReadStream, WriteStream};
use crate::error::{VfsError, VfsResult};
use crate::path;

/// URI scheme of the in-memory backend.
pub const SCHEME: &str = "mem";

#[derive(Debug, Clone)]
struct MemFile {
    data: Vec<u8>,
    modified: SystemTime,
}

impl MemFile {
    fn empty() -> Self {
        Self {
            data: Vec::new(),
            modified: SystemTime::now(),
        }
    }
}

type FileMap = Arc<RwLock<BTreeMap<String, MemFile>>>;

/// In-memory filesystem backend.
///
/// Thread-safe via an internal `RwLock`; clones of a write stream's handle
/// share the same map. All data is lost when the last handle is dropped.
#[derive(Debug, Default)]
pub struct MemoryFileSystem {
    files: FileMap,
    volume: String,
}

impl MemoryFileSystem {
    /// Create a new empty in-memory filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an in-memory filesystem addressed as `mem://<volume>/...`.
    pub fn with_volume(volume: impl Into<String>) -> Self {
        Self {
            files: FileMap::default(),
            volume: volume.into(),
        }
    }

    /// Number of stored files.
    pub fn len(&self) -> usize {
        self.files.read().len()
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.files.read().is_empty()
    }

    fn dir_exists(files: &BTreeMap<String, MemFile>, dir: &str) -> bool {
        dir == "/" || Self::under(files, dir).next().is_some()
    }

    /// First stored file among the ancestors of `path`, nearest the root.
    fn file_ancestor<'a>(files: &BTreeMap<String, MemFile>, path: &'a str) -> Option<&'a str> {
        path.match_indices('/')
            .map(|(i, _)| &path[..i])
            .find(|prefix| !prefix.is_empty() && files.contains_key(*prefix))
    }

    /// All files whose path starts with `dir`, in path order.
    fn under<'a>(
        files: &'a BTreeMap<String, MemFile>,
        dir: &'a str,
    ) -> impl Iterator<Item = (&'a String, &'a MemFile)> + 'a {
        files
            .range::<str, _>((Bound::Included(dir), Bound::Unbounded))
            .take_while(move |(key, _)| key.starts_with(dir))
    }
}

impl FileSystem for MemoryFileSystem {
    fn scheme(&self) -> &str {
        SCHEME
    }

    fn name(&self) -> &str {
        "In-Memory Filesystem"
    }

    fn volume(&self) -> &str {
        &self.volume
    }

    fn list_directory(&self, dir: &str) -> VfsResult<Vec<String>> {
        let files = self.files.read();
        if !Self::dir_exists(&files, dir) {
            return Err(VfsError::not_found(dir));
        }
        let names = Self::under(&files, dir)
            .filter(|(key, _)| path::parent_dir(key) == dir)
            .map(|(key, _)| path::file_name(key).to_string())
            .collect();
        Ok(names)
    }

    fn metadata(&self, path: &str) -> VfsResult<Metadata> {
        let files = self.files.read();
        if path.ends_with('/') {
            return if Self::dir_exists(&files, path) {
                Ok(Metadata::directory())
            } else {
                Err(VfsError::not_found(path))
            };
        }
        if let Some(file) = files.get(path) {
            return Ok(Metadata::file(file.data.len() as u64, Some(file.modified)));
        }
        if Self::dir_exists(&files, &format!("{path}/")) {
            return Ok(Metadata::directory());
        }
        Err(VfsError::not_found(path))
    }

    fn open_read(&self, path: &str) -> VfsResult<ReadStream> {
        let files = self.files.read();
        let file = files.get(path).ok_or_else(|| VfsError::not_found(path))?;
        // Readers see a snapshot taken at open time
        Ok(Box::new(Cursor::new(file.data.clone())))
    }

    fn open_write(&self, path: &str) -> VfsResult<WriteStream> {
        if path.ends_with('/') {
            return Err(VfsError::invalid_path(format!("cannot write a directory: {path}")));
        }
        let mut files = self.files.write();
        // Same conflicts a real directory tree would refuse
        if let Some(ancestor) = Self::file_ancestor(&files, path) {
            return Err(VfsError::backend(
                "create",
                path,
                io::Error::new(io::ErrorKind::NotADirectory, format!("{ancestor} is a file")),
            ));
        }
        if Self::dir_exists(&files, &format!("{path}/")) {
            return Err(VfsError::backend(
                "create",
                path,
                io::Error::new(io::ErrorKind::IsADirectory, "is a directory"),
            ));
        }
        files.insert(path.to_string(), MemFile::empty());
        drop(files);
        tracing::debug!(path, "mem: opened for write");
        Ok(Box::new(MemWriter {
            files: Arc::clone(&self.files),
            path: path.to_string(),
        }))
    }

    fn delete(&self, path: &str) -> VfsResult<()> {
        match self.files.write().remove(path) {
            Some(_) => {
                tracing::debug!(path, "mem: deleted");
                Ok(())
            }
            None => Err(VfsError::not_found(path)),
        }
    }
}

/// Write stream that appends straight into the shared map.
struct MemWriter {
    files: FileMap,
    path: String,
}

impl Write for MemWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut files = self.files.write();
        // A concurrent delete drops the entry; the writer recreates it
        let file = files.entry(self.path.clone()).or_insert_with(MemFile::empty);
        file.data.extend_from_slice(buf);
        file.modified = SystemTime::now();
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

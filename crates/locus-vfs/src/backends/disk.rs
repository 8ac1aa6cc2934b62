//! Local disk backend.
//!
//! Maps canonical VFS paths onto a host directory. With [`DiskFileSystem::new`]
//! that directory is the host root, so `/tmp/a.txt` is the real `/tmp/a.txt`.
//! [`DiskFileSystem::rooted`] confines every path under a chosen directory;
//! canonical paths carry no `..` segments, so nothing can escape it.

use std::fs;
use std::io::{self, BufWriter};
use std::path::{Component, Path, PathBuf};

use crate::backend::{FileSystem, Metadata, ReadStream, WriteStream};
use crate::error::{VfsError, VfsResult};

/// URI scheme of the disk backend.
pub const SCHEME: &str = "file";

/// Local disk backend.
#[derive(Debug, Clone)]
pub struct DiskFileSystem {
    root: PathBuf,
    volume: String,
}

impl Default for DiskFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl DiskFileSystem {
    /// Disk filesystem addressing the host root.
    pub fn new() -> Self {
        Self::with_root(PathBuf::from("/"))
    }

    /// Disk filesystem confined to `root`.
    ///
    /// The root is canonicalized at construction time to handle symlinks
    /// (e.g. macOS `/tmp` → `/private/tmp`).
    pub fn rooted(root: impl Into<PathBuf>) -> Self {
        let root: PathBuf = root.into();
        let root = dunce::canonicalize(&root).unwrap_or(root);
        Self::with_root(root)
    }

    fn with_root(root: PathBuf) -> Self {
        let volume = match root.components().next() {
            Some(Component::Prefix(prefix)) => prefix.as_os_str().to_string_lossy().into_owned(),
            _ => String::new(),
        };
        Self { root, volume }
    }

    /// Get the host root path.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Host path for a canonical VFS path.
    pub fn host_path(&self, path: &str) -> PathBuf {
        let relative = path.trim_matches('/');
        if relative.is_empty() {
            self.root.clone()
        } else {
            self.root.join(relative)
        }
    }
}

impl FileSystem for DiskFileSystem {
    fn scheme(&self) -> &str {
        SCHEME
    }

    fn name(&self) -> &str {
        "os"
    }

    fn volume(&self) -> &str {
        &self.volume
    }

    fn storage_key(&self, path: &str) -> Option<PathBuf> {
        Some(self.host_path(path))
    }

    fn list_directory(&self, dir: &str) -> VfsResult<Vec<String>> {
        let host = self.host_path(dir);
        let mut names = Vec::new();
        for entry in fs::read_dir(&host).map_err(VfsError::io("list", dir))? {
            let entry = entry.map_err(VfsError::io("list", dir))?;
            let file_type = entry.file_type().map_err(VfsError::io("list", dir))?;
            if !file_type.is_file() {
                continue;
            }
            // A lossy name would not resolve back to the same host file
            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(raw) => tracing::warn!(dir, name = ?raw, "disk: skipping non-UTF-8 file name"),
            }
        }
        Ok(names)
    }

    fn metadata(&self, path: &str) -> VfsResult<Metadata> {
        let meta = fs::metadata(self.host_path(path)).map_err(VfsError::io("stat", path))?;
        if meta.is_dir() {
            Ok(Metadata::directory())
        } else {
            Ok(Metadata::file(meta.len(), meta.modified().ok()))
        }
    }

    fn open_read(&self, path: &str) -> VfsResult<ReadStream> {
        let file = fs::File::open(self.host_path(path)).map_err(VfsError::io("open", path))?;
        let meta = file.metadata().map_err(VfsError::io("open", path))?;
        if meta.is_dir() {
            return Err(VfsError::Backend {
                op: "open",
                path: path.to_string(),
                source: io::Error::new(io::ErrorKind::IsADirectory, "is a directory"),
            });
        }
        Ok(Box::new(file))
    }

    fn open_write(&self, path: &str) -> VfsResult<WriteStream> {
        let host = self.host_path(path);
        if let Some(parent) = host.parent() {
            // A file in the way of a parent is a conflict, not absence
            fs::create_dir_all(parent).map_err(|e| VfsError::backend("mkdir", path, e))?;
        }
        let file = fs::File::create(&host).map_err(VfsError::io("create", path))?;
        tracing::debug!(path, host = %host.display(), "disk: opened for write");
        Ok(Box::new(BufWriter::new(file)))
    }

    fn delete(&self, path: &str) -> VfsResult<()> {
        fs::remove_file(self.host_path(path)).map_err(VfsError::io("delete", path))?;
        tracing::debug!(path, "disk: deleted");
        Ok(())
    }
}

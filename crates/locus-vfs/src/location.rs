//! Directory addresses.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use regex::Regex;

use crate::backend::FileSystem;
use crate::error::VfsResult;
use crate::file::File;
use crate::{path, uri};

/// A directory within one backend.
///
/// The path is always absolute, canonical and slash-terminated. Locations are
/// immutable; navigation returns a new value. Two locations are equal when
/// they share the same backend instance and path.
#[derive(Clone)]
pub struct Location {
    fs: Arc<dyn FileSystem>,
    path: String,
}

impl Location {
    /// Location at `path`, resolved from the backend root.
    pub fn new(fs: Arc<dyn FileSystem>, path: &str) -> VfsResult<Self> {
        let path = path::resolve_location("/", path)?;
        Ok(Self { fs, path })
    }

    /// The root location of a backend.
    pub fn root(fs: Arc<dyn FileSystem>) -> Self {
        Self {
            fs,
            path: "/".to_string(),
        }
    }

    /// Caller guarantees `path` is a canonical directory path.
    pub(crate) fn from_canonical(fs: Arc<dyn FileSystem>, path: String) -> Self {
        debug_assert!(path.starts_with('/') && path.ends_with('/'));
        Self { fs, path }
    }

    /// The backend this location lives on.
    pub fn file_system(&self) -> &Arc<dyn FileSystem> {
        &self.fs
    }

    /// Canonical path, e.g. `/foo/bar/`.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Backend root identifier; empty where the backend has none.
    pub fn volume(&self) -> &str {
        self.fs.volume()
    }

    /// `scheme://volume/path/`.
    pub fn uri(&self) -> String {
        uri::format(self.fs.scheme(), self.fs.volume(), &self.path)
    }

    /// Location relative to this one. `..` segments pop, clamped at root.
    pub fn new_location(&self, relative: &str) -> VfsResult<Location> {
        let path = path::resolve_location(&self.path, relative)?;
        Ok(Self::from_canonical(Arc::clone(&self.fs), path))
    }

    /// Directory traversal. Returns the new location; `self` is untouched.
    pub fn change_dir(&self, relative: &str) -> VfsResult<Location> {
        self.new_location(relative)
    }

    /// Enclosing location. The root is its own parent.
    pub fn parent(&self) -> Location {
        Self::from_canonical(Arc::clone(&self.fs), path::normalize(&self.path, ".."))
    }

    /// File relative to this location. Directory-shaped input is rejected.
    pub fn new_file(&self, relative: &str) -> VfsResult<File> {
        let path = path::resolve_file(&self.path, relative)?;
        Ok(File::from_canonical(Arc::clone(&self.fs), path))
    }

    /// Whether the directory exists. Absence is `Ok(false)`.
    #[tracing::instrument(level = "debug", skip(self), fields(uri = %self), name = "location.exists")]
    pub fn exists(&self) -> VfsResult<bool> {
        self.fs.exists(&self.path)
    }

    /// Names of the files directly inside this location, sorted ascending.
    ///
    /// A missing directory lists as empty.
    #[tracing::instrument(level = "debug", skip(self), fields(uri = %self), name = "location.list")]
    pub fn list(&self) -> VfsResult<Vec<String>> {
        self.list_filtered(|_| true)
    }

    /// [`list`](Self::list) restricted to names starting with `prefix`.
    ///
    /// The prefix is a file name fragment; one containing a separator fails
    /// with [`BadFilePrefix`](crate::VfsError::BadFilePrefix) before the
    /// backend is consulted.
    #[tracing::instrument(level = "debug", skip(self), fields(uri = %self), name = "location.list_by_prefix")]
    pub fn list_by_prefix(&self, prefix: &str) -> VfsResult<Vec<String>> {
        path::validate_prefix(prefix)?;
        self.list_filtered(|name| name.starts_with(prefix))
    }

    /// [`list`](Self::list) restricted to names the regex matches anywhere.
    #[tracing::instrument(level = "debug", skip(self, pattern), fields(uri = %self, pattern = %pattern), name = "location.list_by_regex")]
    pub fn list_by_regex(&self, pattern: &Regex) -> VfsResult<Vec<String>> {
        self.list_filtered(|name| pattern.is_match(name))
    }

    fn list_filtered(&self, keep: impl Fn(&str) -> bool) -> VfsResult<Vec<String>> {
        let names = match self.fs.list_directory(&self.path) {
            Ok(names) => names,
            Err(e) if e.is_not_found() => return Ok(Vec::new()),
            Err(e) => return Err(e),
        };
        let mut names: Vec<String> = names.into_iter().filter(|n| keep(n.as_str())).collect();
        names.sort();
        Ok(names)
    }

    /// Delete the named file under this location.
    pub fn delete_file(&self, name: &str) -> VfsResult<()> {
        self.new_file(name)?.delete()
    }
}

/// Pointer identity of two backend handles.
pub(crate) fn same_backend(a: &Arc<dyn FileSystem>, b: &Arc<dyn FileSystem>) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

pub(crate) fn hash_backend<H: Hasher>(fs: &Arc<dyn FileSystem>, state: &mut H) {
    (Arc::as_ptr(fs) as *const ()).hash(state);
}

impl PartialEq for Location {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path && same_backend(&self.fs, &other.fs)
    }
}

impl Eq for Location {}

impl Hash for Location {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_backend(&self.fs, state);
        self.path.hash(state);
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.uri())
    }
}

impl fmt::Debug for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Location")
            .field("scheme", &self.fs.scheme())
            .field("path", &self.path)
            .finish()
    }
}

//! Scheme-keyed backend registry.
//!
//! Built by the application and passed to whatever needs to resolve URIs.
//! There is no process-wide registry.

use std::collections::HashMap;
use std::sync::Arc;

use crate::backend::FileSystem;
use crate::error::{VfsError, VfsResult};
use crate::file::File;
use crate::location::Location;
use crate::uri;

/// A resolved URI: either a directory or a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Address {
    Location(Location),
    File(File),
}

/// Maps URI schemes to backend instances.
#[derive(Debug, Default, Clone)]
pub struct Registry {
    backends: HashMap<String, Arc<dyn FileSystem>>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a backend under its own scheme.
    ///
    /// Returns the backend previously registered for that scheme, if any.
    pub fn register(&mut self, fs: Arc<dyn FileSystem>) -> Option<Arc<dyn FileSystem>> {
        let scheme = fs.scheme().to_string();
        tracing::debug!(scheme = %scheme, name = fs.name(), "registering filesystem");
        self.backends.insert(scheme, fs)
    }

    /// Builder-style [`register`](Self::register).
    pub fn with(mut self, fs: Arc<dyn FileSystem>) -> Self {
        self.register(fs);
        self
    }

    /// Backend registered for `scheme`.
    pub fn get(&self, scheme: &str) -> VfsResult<Arc<dyn FileSystem>> {
        self.backends
            .get(scheme)
            .cloned()
            .ok_or_else(|| VfsError::unknown_scheme(scheme))
    }

    /// Registered schemes, sorted.
    pub fn schemes(&self) -> Vec<String> {
        let mut schemes: Vec<String> = self.backends.keys().cloned().collect();
        schemes.sort();
        schemes
    }

    /// Resolve a URI to a location or a file. A trailing `/` means location.
    pub fn resolve(&self, uri: &str) -> VfsResult<Address> {
        let (fs, path) = self.split(uri)?;
        if path.ends_with('/') {
            Location::new(fs, &path).map(Address::Location)
        } else {
            File::new(fs, &path).map(Address::File)
        }
    }

    /// Resolve a location URI such as `mem:///dir/`.
    pub fn location(&self, uri: &str) -> VfsResult<Location> {
        let (fs, path) = self.split(uri)?;
        Location::new(fs, &path)
    }

    /// Resolve a file URI such as `file:///tmp/a.txt`.
    pub fn file(&self, uri: &str) -> VfsResult<File> {
        let (fs, path) = self.split(uri)?;
        File::new(fs, &path)
    }

    fn split(&self, raw: &str) -> VfsResult<(Arc<dyn FileSystem>, String)> {
        let parsed = uri::parse(raw)?;
        let fs = self.get(&parsed.scheme)?;
        if parsed.authority != fs.volume() {
            return Err(VfsError::invalid_path(format!(
                "volume {:?} does not match {} filesystem volume {:?}",
                parsed.authority,
                parsed.scheme,
                fs.volume()
            )));
        }
        Ok((fs, parsed.path))
    }
}

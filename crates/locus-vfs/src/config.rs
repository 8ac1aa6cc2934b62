//! RON-driven registry configuration.
//!
//! ```ron
//! (
//!     backends: [
//!         Memory(volume: Some("scratch")),
//!         Disk(root: Some("/srv/data")),
//!     ],
//! )
//! ```
//!
//! Omitted fields default to `None`: an unnamed memory volume and a disk
//! backend on the host root.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::backends::{DiskFileSystem, MemoryFileSystem};
use crate::error::{VfsError, VfsResult};
use crate::registry::Registry;

/// One backend to register.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BackendConfig {
    Memory {
        #[serde(default)]
        volume: Option<String>,
    },
    Disk {
        #[serde(default)]
        root: Option<PathBuf>,
    },
}

/// Backends making up a [`Registry`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    #[serde(default)]
    pub backends: Vec<BackendConfig>,
}

impl RegistryConfig {
    /// Parse a RON document.
    pub fn from_ron(text: &str) -> VfsResult<Self> {
        ron::from_str(text).map_err(|e| VfsError::config(format!("RON parse error: {e}")))
    }

    /// Read and parse a RON file.
    pub fn load(path: impl AsRef<Path>) -> VfsResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| VfsError::config(format!("{}: {e}", path.display())))?;
        Self::from_ron(&text)
    }

    /// Construct the registry. Later entries with the same scheme win.
    pub fn build(&self) -> VfsResult<Registry> {
        let mut registry = Registry::new();
        for backend in &self.backends {
            let previous = match backend {
                BackendConfig::Memory { volume } => registry.register(Arc::new(
                    MemoryFileSystem::with_volume(volume.clone().unwrap_or_default()),
                )),
                BackendConfig::Disk { root: Some(root) } => {
                    if !root.is_dir() {
                        return Err(VfsError::config(format!(
                            "disk root is not a directory: {}",
                            root.display()
                        )));
                    }
                    registry.register(Arc::new(DiskFileSystem::rooted(root.clone())))
                }
                BackendConfig::Disk { root: None } => {
                    registry.register(Arc::new(DiskFileSystem::new()))
                }
            };
            if let Some(previous) = previous {
                tracing::warn!(scheme = previous.scheme(), "backend replaced by later config entry");
            }
        }
        Ok(registry)
    }
}

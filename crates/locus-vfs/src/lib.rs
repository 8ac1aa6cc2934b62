//! Backend-agnostic addressing for files and directories.
//!
//! A [`FileSystem`] is one storage backend (local disk, in-memory map, ...).
//! [`Location`] and [`File`] are value types naming a directory or a file on
//! a backend. They normalize every path they are given, so navigation,
//! listing and URI projection behave the same whichever backend does the I/O.
//!
//! ```
//! use std::sync::Arc;
//! use locus_vfs::{FileSystem, Location, MemoryFileSystem};
//!
//! let fs: Arc<dyn FileSystem> = Arc::new(MemoryFileSystem::new());
//! let base = Location::new(fs, "/foo/bar/baz/")?;
//! let file = base.new_file("../../bam/this.txt")?;
//! assert_eq!(file.path(), "/foo/bam/this.txt");
//!
//! file.write(b"hello")?;
//! assert_eq!(file.location().list()?, vec!["this.txt"]);
//! assert_eq!(file.uri(), "mem:///foo/bam/this.txt");
//! # Ok::<(), locus_vfs::VfsError>(())
//! ```
//!
//! ## Design Decisions
//!
//! - **Canonical paths everywhere**: directories end with `/`, files never
//!   do, and `..` above the root is clamped rather than rejected.
//! - **Absence is not an error**: `exists` answers `false` and listings of a
//!   missing directory are empty.
//! - **Explicit registry**: [`Registry`] maps schemes to backends; there is no
//!   global state.

pub mod backend;
pub mod backends;
pub mod config;
mod error;
mod file;
mod location;
pub mod path;
pub mod registry;
pub mod uri;

pub use backend::{EntryKind, FileSystem, Metadata, ReadStream, WriteStream};
pub use backends::{DiskFileSystem, MemoryFileSystem};
pub use config::{BackendConfig, RegistryConfig};
pub use error::{VfsError, VfsResult};
pub use file::File;
pub use location::Location;
pub use registry::{Address, Registry};

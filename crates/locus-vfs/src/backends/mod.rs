//! Storage backends.
//!
//! Backends implement [`FileSystem`](crate::FileSystem) for different storage
//! types.

pub mod disk;
pub mod memory;

pub use disk::DiskFileSystem;
pub use memory::MemoryFileSystem;

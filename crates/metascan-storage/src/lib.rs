//! MetaScan Storage Library
//!
//! This crate provides the storage abstraction for the two filesystem areas the
//! service uses: the staging area for uploads in flight and the report area for
//! generated PDFs.
//!
//! # Storage key format
//!
//! Keys are flat file names inside an area. They must not contain path separators,
//! `..` or NUL bytes; every backend validates this before touching the disk.

pub mod factory;
pub(crate) mod keys;
pub mod local;
pub mod traits;

// Re-export commonly used types
pub use factory::{create_storage_areas, StorageAreas};
pub use local::LocalStorage;
pub use traits::{ByteStream, Storage, StorageError, StorageResult};

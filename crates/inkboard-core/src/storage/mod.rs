//! Snapshot persistence.

mod memory;

#[cfg(not(target_arch = "wasm32"))]
mod file;

pub use memory::MemoryStorage;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;

use crate::canvas::CanvasDocument;
use thiserror::Error;

/// Name snapshots are saved under when the host does not pick one.
pub const DEFAULT_EXPORT_NAME: &str = "canvas-shapes";

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Snapshot not found: {0}")]
    NotFound(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Named snapshot store.
///
/// Snapshots are whole documents in their export form; saving under an
/// existing name overwrites it.
pub trait Storage {
    /// Save a snapshot.
    fn save(&self, name: &str, document: &CanvasDocument) -> StorageResult<()>;

    /// Load a snapshot.
    fn load(&self, name: &str) -> StorageResult<CanvasDocument>;

    /// Delete a snapshot. Missing names are not an error.
    fn delete(&self, name: &str) -> StorageResult<()>;

    /// List all snapshot names.
    fn list(&self) -> StorageResult<Vec<String>>;

    /// Check if a snapshot exists.
    fn exists(&self, name: &str) -> StorageResult<bool>;
}

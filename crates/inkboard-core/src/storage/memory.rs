//! In-memory storage implementation.

use super::{Storage, StorageError, StorageResult};
use crate::canvas::CanvasDocument;
use log::info;
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory storage for testing and ephemeral use.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    snapshots: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Create a new empty memory storage.
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(e: impl std::fmt::Display) -> StorageError {
    StorageError::Other(format!("Lock error: {}", e))
}

impl Storage for MemoryStorage {
    fn save(&self, name: &str, document: &CanvasDocument) -> StorageResult<()> {
        let json = document
            .to_json()
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        let mut snapshots = self.snapshots.write().map_err(lock_error)?;
        snapshots.insert(name.to_string(), json);
        info!("Saved {} shapes to memory snapshot {}", document.len(), name);
        Ok(())
    }

    fn load(&self, name: &str) -> StorageResult<CanvasDocument> {
        let snapshots = self.snapshots.read().map_err(lock_error)?;
        let json = snapshots
            .get(name)
            .ok_or_else(|| StorageError::NotFound(name.to_string()))?;
        CanvasDocument::from_json(json).map_err(|e| StorageError::Serialization(e.to_string()))
    }

    fn delete(&self, name: &str) -> StorageResult<()> {
        let mut snapshots = self.snapshots.write().map_err(lock_error)?;
        snapshots.remove(name);
        Ok(())
    }

    fn list(&self) -> StorageResult<Vec<String>> {
        let snapshots = self.snapshots.read().map_err(lock_error)?;
        Ok(snapshots.keys().cloned().collect())
    }

    fn exists(&self, name: &str) -> StorageResult<bool> {
        let snapshots = self.snapshots.read().map_err(lock_error)?;
        Ok(snapshots.contains_key(name))
    }
}

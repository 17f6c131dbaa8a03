//! Repository contracts for persisting save documents.

use wayfarer_core::SaveDocument;

use super::error::Result;

/// Repository for save-document persistence, indexed by slot name.
///
/// The document stored under a slot is always a complete snapshot; callers
/// that want merge semantics load, merge and save back.
pub trait SaveRepository: Send + Sync {
    /// Persist `doc` under `slot`, replacing any previous document.
    fn save(&self, slot: &str, doc: &SaveDocument) -> Result<()>;

    /// Load the document stored under `slot`, `None` when the slot is empty.
    fn load(&self, slot: &str) -> Result<Option<SaveDocument>>;

    /// Whether `slot` holds a document.
    fn exists(&self, slot: &str) -> bool;

    /// Remove the document under `slot`. Removing an empty slot is fine.
    fn delete(&self, slot: &str) -> Result<()>;

    /// All occupied slot names.
    fn list_slots(&self) -> Result<Vec<String>> {
        Ok(vec![])
    }
}

//! In-memory SaveRepository implementation.

use std::collections::HashMap;
use std::sync::RwLock;

use wayfarer_core::SaveDocument;

use super::error::{RepositoryError, Result};
use super::traits::SaveRepository;

/// In-memory implementation of [`SaveRepository`], for tests and headless
/// simulation.
#[derive(Default)]
pub struct InMemorySaveRepository {
    slots: RwLock<HashMap<String, SaveDocument>>,
}

impl InMemorySaveRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SaveRepository for InMemorySaveRepository {
    fn save(&self, slot: &str, doc: &SaveDocument) -> Result<()> {
        let mut slots = self.slots.write().map_err(|_| RepositoryError::LockPoisoned)?;
        slots.insert(slot.to_string(), doc.clone());
        Ok(())
    }

    fn load(&self, slot: &str) -> Result<Option<SaveDocument>> {
        let slots = self.slots.read().map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(slots.get(slot).cloned())
    }

    fn exists(&self, slot: &str) -> bool {
        self.slots
            .read()
            .is_ok_and(|slots| slots.contains_key(slot))
    }

    fn delete(&self, slot: &str) -> Result<()> {
        let mut slots = self.slots.write().map_err(|_| RepositoryError::LockPoisoned)?;
        slots.remove(slot);
        Ok(())
    }

    fn list_slots(&self) -> Result<Vec<String>> {
        let slots = self.slots.read().map_err(|_| RepositoryError::LockPoisoned)?;
        let mut names: Vec<String> = slots.keys().cloned().collect();
        names.sort_unstable();
        Ok(names)
    }
}

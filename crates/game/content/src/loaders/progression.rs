//! Progression table loader.

use std::path::Path;

use wayfarer_core::{Progression, ProgressionClass};

use crate::loaders::{LoadResult, read_file};

/// Loader for the progression table from RON files.
///
/// RON format: `Vec<ProgressionClass>`, one entry per character class, each
/// carrying its stat columns indexed by level.
pub struct ProgressionLoader;

impl ProgressionLoader {
    pub fn load(path: &Path) -> LoadResult<Progression> {
        Self::parse(&read_file(path)?)
    }

    pub fn parse(content: &str) -> LoadResult<Progression> {
        let classes: Vec<ProgressionClass> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse progression RON: {}", e))?;
        Ok(Progression::new(classes))
    }
}

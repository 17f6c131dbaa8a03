//! Content factory for building oracles from a data directory.

use std::path::{Path, PathBuf};

use wayfarer_core::Progression;

use crate::loaders::{LoadResult, ProgressionLoader, WeaponCatalog, WeaponLoader};

/// Loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── progression.ron
/// └── weapons.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Load the progression table from `progression.ron`.
    pub fn load_progression(&self) -> LoadResult<Progression> {
        ProgressionLoader::load(&self.data_dir.join("progression.ron"))
    }

    /// Load the weapon catalog from `weapons.ron`.
    pub fn load_weapons(&self) -> LoadResult<WeaponCatalog> {
        WeaponLoader::load(&self.data_dir.join("weapons.ron"))
    }
}

/// Progression table bundled with the crate, for tests and quick starts.
pub fn default_progression() -> Progression {
    ProgressionLoader::parse(include_str!("../../data/progression.ron"))
        .unwrap_or_else(|e| panic!("bundled progression table is invalid: {e}"))
}

/// Weapon catalog bundled with the crate.
pub fn default_weapons() -> WeaponCatalog {
    WeaponLoader::parse(include_str!("../../data/weapons.ron"))
        .unwrap_or_else(|e| panic!("bundled weapon catalog is invalid: {e}"))
}

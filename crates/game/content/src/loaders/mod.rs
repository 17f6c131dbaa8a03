//! Content loaders for reading game data from files.
//!
//! Loaders convert RON files into the core types the runtime's oracles are
//! built from.

pub mod factory;
pub mod progression;
pub mod weapons;

pub use factory::{ContentFactory, default_progression, default_weapons};
pub use progression::ProgressionLoader;
pub use weapons::{WeaponCatalog, WeaponLoader};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

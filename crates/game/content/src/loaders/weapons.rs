//! Weapon catalog loader and the oracle built from it.

use std::collections::HashMap;
use std::path::Path;

use wayfarer_core::{WeaponConfig, WeaponOracle};

use crate::loaders::{LoadResult, read_file};

/// Name-indexed weapon catalog.
///
/// Save documents record equipped weapons by name; the catalog is what
/// those names resolve against at restore time. The unarmed fallback is
/// always present.
#[derive(Clone, Debug)]
pub struct WeaponCatalog {
    weapons: HashMap<String, WeaponConfig>,
}

impl WeaponCatalog {
    pub fn new(configs: Vec<WeaponConfig>) -> Self {
        let mut weapons = HashMap::new();
        let unarmed = WeaponConfig::unarmed();
        weapons.insert(unarmed.name.clone(), unarmed);
        for config in configs {
            weapons.insert(config.name.clone(), config);
        }
        Self { weapons }
    }

    pub fn get(&self, name: &str) -> Option<&WeaponConfig> {
        self.weapons.get(name)
    }

    pub fn len(&self) -> usize {
        self.weapons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weapons.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.weapons.keys().map(String::as_str)
    }
}

impl Default for WeaponCatalog {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl WeaponOracle for WeaponCatalog {
    fn weapon(&self, name: &str) -> Option<WeaponConfig> {
        self.weapons.get(name).cloned()
    }
}

/// Loader for the weapon catalog from RON files.
///
/// RON format: `Vec<WeaponConfig>`.
pub struct WeaponLoader;

impl WeaponLoader {
    pub fn load(path: &Path) -> LoadResult<WeaponCatalog> {
        Self::parse(&read_file(path)?)
    }

    pub fn parse(content: &str) -> LoadResult<WeaponCatalog> {
        let configs: Vec<WeaponConfig> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse weapon catalog RON: {}", e))?;
        Ok(WeaponCatalog::new(configs))
    }
}

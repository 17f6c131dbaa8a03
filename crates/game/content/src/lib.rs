//! Data-driven content definitions and loaders.
//!
//! This crate houses static game content and provides loaders for RON data
//! files:
//! - Progression tables (per-class, per-level stat columns)
//! - Weapon catalogs (named weapon configurations)
//!
//! Content is consumed by runtime oracles and never appears in game state.
//! All loaders deserialize directly into wayfarer-core types with serde.

pub mod loaders;

pub use loaders::{
    ContentFactory, ProgressionLoader, WeaponCatalog, WeaponLoader, default_progression,
    default_weapons,
};

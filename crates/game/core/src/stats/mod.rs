//! Progression tables and stat aggregation.
//!
//! Base values come from the per-class, per-level progression table;
//! effective values fold in additive and percentage contributions from any
//! [`ModifierProvider`] capability the entity carries:
//!
//! `effective = (base + Σ additive) × (1 + Σ percentage / 100)`

mod base_stats;
mod experience;
mod modifier;
mod progression;

pub use base_stats::BaseStats;
pub use experience::Experience;
pub use modifier::ModifierProvider;
pub use progression::{Progression, ProgressionClass, ProgressionStat};

use serde::{Deserialize, Serialize};

/// Named stat resolved through the progression table.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
)]
pub enum Stat {
    Health,
    /// XP threshold that must be exceeded to leave a given level.
    ExperienceToLevelUp,
    /// XP granted to the instigator when this entity dies.
    ExperienceReward,
    Damage,
}

/// Character archetype indexing the progression table.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
pub enum CharacterClass {
    Player,
    Grunt,
    Mage,
    Archer,
}

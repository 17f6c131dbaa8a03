//! Deterministic gameplay core: entities, combat, progression, persistence.
//!
//! `wayfarer-core` owns the rules of the simulation and nothing else: no
//! rendering, no input, no file I/O. The embedding runtime drives a
//! [`state::World`] through spawn → restore → [`state::World::begin_play`]
//! → [`state::World::tick`], observes results through drained
//! [`events::GameEvent`]s, and supplies external data (progression table,
//! weapon catalog, navigation) through [`env::GameEnv`].
pub mod action;
pub mod combat;
pub mod env;
pub mod events;
pub mod identity;
pub mod saving;
pub mod state;
pub mod stats;
pub mod util;

pub use action::{ActionScheduler, ActiveAction, Mover};
pub use combat::{
    Fighter, Handedness, Health, Projectile, ProjectileId, ProjectileSpec, Weapon, WeaponConfig,
};
pub use env::{GameEnv, NavOracle, OpenField, WeaponOracle};
pub use events::{EventQueue, GameEvent};
pub use identity::{IdentityCell, IdentityRegistry, IdentityToken};
pub use saving::{
    CapabilityKind, CapabilityMap, CapabilityState, RestoreError, RestoreReport, SaveDocument,
};
pub use state::{
    DestinationId, Entity, EntityId, EntitySpec, Portal, SceneIndex, Transform, Vec3, World,
};
pub use stats::{
    BaseStats, CharacterClass, Experience, ModifierProvider, Progression, ProgressionClass,
    ProgressionStat, Stat,
};

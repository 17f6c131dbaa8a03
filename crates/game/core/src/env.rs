//! Read-only collaborators the core consults but never implements.
//!
//! Navigation (navmesh paths) and the weapon catalog (named configurations
//! living outside any scene) belong to the embedding engine. [`GameEnv`]
//! bundles them with the progression table so gameplay operations take a
//! single environment argument without coupling to concrete
//! implementations.

use crate::combat::WeaponConfig;
use crate::state::Vec3;
use crate::stats::Progression;

/// Name → weapon configuration catalog, resolved at restore time.
pub trait WeaponOracle {
    fn weapon(&self, name: &str) -> Option<WeaponConfig>;
}

/// Abstract pathfinding: the core only ever asks "how far is the walkable
/// path between these points", never how the path is computed.
pub trait NavOracle {
    /// Length of a complete walkable path, or `None` when no such path
    /// exists.
    fn path_length(&self, from: Vec3, to: Vec3) -> Option<f32>;
}

/// Trivially traversable space: every point is reachable in a straight
/// line. Default for tests and headless simulation.
#[derive(Clone, Copy, Debug, Default)]
pub struct OpenField;

impl NavOracle for OpenField {
    fn path_length(&self, from: Vec3, to: Vec3) -> Option<f32> {
        Some(from.distance(to))
    }
}

/// Aggregates the read-only environment for gameplay operations.
#[derive(Clone, Copy)]
pub struct GameEnv<'a> {
    progression: &'a Progression,
    weapons: Option<&'a dyn WeaponOracle>,
    nav: Option<&'a dyn NavOracle>,
}

impl<'a> GameEnv<'a> {
    pub fn new(progression: &'a Progression) -> Self {
        Self {
            progression,
            weapons: None,
            nav: None,
        }
    }

    pub fn with_weapons(mut self, weapons: &'a dyn WeaponOracle) -> Self {
        self.weapons = Some(weapons);
        self
    }

    pub fn with_nav(mut self, nav: &'a dyn NavOracle) -> Self {
        self.nav = Some(nav);
        self
    }

    pub fn progression(&self) -> &'a Progression {
        self.progression
    }

    /// Resolves a weapon name against the catalog, if one is attached.
    pub fn weapon(&self, name: &str) -> Option<WeaponConfig> {
        self.weapons.and_then(|oracle| oracle.weapon(name))
    }

    /// Walkable path length between two points. Without a navigation
    /// oracle the world is treated as an open field.
    pub fn path_length(&self, from: Vec3, to: Vec3) -> Option<f32> {
        match self.nav {
            Some(nav) => nav.path_length(from, to),
            None => Some(from.distance(to)),
        }
    }
}

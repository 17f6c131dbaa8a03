use std::collections::BTreeMap;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::combat::Projectile;
use crate::env::GameEnv;
use crate::events::{EventQueue, GameEvent};
use crate::identity::{IdentityCell, IdentityRegistry, IdentityToken};
use crate::stats::{Experience, Stat};

use super::{Entity, EntityId, EntitySpec, SceneIndex, Transform};

/// Marker pairing the two ends of a point-to-point scene connection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DestinationId {
    A,
    B,
    C,
    D,
    E,
}

/// A connection point to another scene.
///
/// The portal an actor enters names the scene to load and a destination
/// marker; the matching portal in the new scene provides the spawn
/// transform.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Portal {
    pub scene: SceneIndex,
    pub destination: DestinationId,
    pub spawn_point: Transform,
}

/// The complete mutable state of one loaded scene.
///
/// Construction (spawning) must finish before any restore touches the
/// world, and [`World::begin_play`] must run before the first
/// [`World::tick`]; the session coordinator enforces that ordering.
pub struct World {
    pub(crate) scene: SceneIndex,
    pub(crate) next_id: u32,
    pub(crate) entities: BTreeMap<EntityId, Entity>,
    pub(crate) player: Option<EntityId>,
    pub(crate) portals: Vec<Portal>,
    pub(crate) projectiles: Vec<Projectile>,
    pub(crate) next_projectile: u32,
    pub(crate) events: EventQueue,
}

impl World {
    pub fn new(scene: SceneIndex) -> Self {
        Self {
            scene,
            next_id: 0,
            entities: BTreeMap::new(),
            player: None,
            portals: Vec::new(),
            projectiles: Vec::new(),
            next_projectile: 0,
            events: EventQueue::default(),
        }
    }

    pub fn scene(&self) -> SceneIndex {
        self.scene
    }

    /// The controllable player, when this scene has one.
    pub fn player(&self) -> Option<EntityId> {
        self.player
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Looks an entity up by its durable identity token.
    pub fn find_by_token(&self, token: &IdentityToken) -> Option<EntityId> {
        self.entities
            .values()
            .find(|e| e.token() == *token)
            .map(Entity::id)
    }

    /// Constructs an entity from `spec`, claiming a unique identity token
    /// from the shared registry (duplicates are repaired by minting).
    pub fn spawn(&mut self, registry: &mut IdentityRegistry, spec: EntitySpec) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;

        let identity = IdentityCell::new(spec.token.unwrap_or_else(IdentityToken::empty));
        registry.claim(&identity);

        let entity = Entity {
            id,
            identity: Rc::clone(&identity),
            transform: spec.transform,
            scheduler: Default::default(),
            health: spec.health.map(crate::combat::Health::new),
            stats: spec
                .stats
                .map(|(class, level, modifiers)| crate::stats::BaseStats::new(class, level, modifiers)),
            experience: spec.experience.map(Experience::new),
            mover: spec.mover.map(|(speed, path)| crate::action::Mover::new(speed, path)),
            fighter: spec
                .fighter
                .map(|(weapon, cadence)| crate::combat::Fighter::new(weapon, cadence)),
        };
        if spec.player {
            self.player = Some(id);
        }
        self.entities.insert(id, entity);
        id
    }

    /// Removes an entity. Its registry record becomes stale and is
    /// reclaimed lazily on the next conflict check.
    pub fn despawn(&mut self, id: EntityId) {
        self.entities.remove(&id);
        if self.player == Some(id) {
            self.player = None;
        }
    }

    pub fn add_portal(&mut self, portal: Portal) {
        self.portals.push(portal);
    }

    /// The portal in this scene carrying the given destination marker.
    pub fn portal_to(&self, destination: DestinationId) -> Option<&Portal> {
        self.portals.iter().find(|p| p.destination == destination)
    }

    /// Teleports the player, cancelling any in-progress movement so the
    /// next frame does not walk it back.
    pub fn warp_player(&mut self, spawn_point: Transform) {
        let Some(player) = self.player else {
            return;
        };
        if let Some(e) = self.entities.get_mut(&player) {
            e.transform = spawn_point;
            if let Some(mover) = &mut e.mover {
                mover.cancel();
            }
        }
    }

    /// Realizes every lazily-initialized derived value (cached level,
    /// current health points).
    ///
    /// Must run after construction and after any restore, and before the
    /// first [`World::tick`]: values a restore provided are kept as-is,
    /// everything still pending is computed from stats now.
    pub fn begin_play(&mut self, env: &GameEnv<'_>) {
        for e in self.entities.values() {
            if let Some(stats) = &e.stats {
                stats.level.force_init(|| e.calculate_level(env));
            }
            if e.health.is_some() {
                let _ = e.health_points(env);
            }
        }
        // Restored zero health means the entity died in a previous
        // session; realizing it re-runs the death transition.
        let fallen: Vec<EntityId> = self
            .entities
            .values()
            .filter(|e| e.health.is_some() && e.health_points(env) == 0.0 && !e.is_dead())
            .map(Entity::id)
            .collect();
        for id in fallen {
            self.die(id);
        }
    }

    /// Advances steady-state per-frame logic by `dt` seconds.
    pub fn tick(&mut self, env: &GameEnv<'_>, dt: f32) {
        self.update_fighters(dt);
        self.update_movers(dt);
        self.update_projectiles(env, dt);
    }

    /// Removes and returns all pending gameplay events.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain()
    }

    /// Convenience for tests and displays: current health points.
    pub fn health_points_of(&self, env: &GameEnv<'_>, entity: EntityId) -> f32 {
        self.entities
            .get(&entity)
            .map_or(0.0, |e| e.health_points(env))
    }

    /// Convenience: stat-derived health ceiling.
    pub fn max_health_of(&self, env: &GameEnv<'_>, entity: EntityId) -> f32 {
        self.stat_of(env, entity, Stat::Health)
    }
}

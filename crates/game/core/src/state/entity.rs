use std::rc::Rc;

use crate::action::{ActionScheduler, Mover};
use crate::combat::{Fighter, Health, WeaponConfig};
use crate::identity::{IdentityCell, IdentityToken};
use crate::stats::{BaseStats, CharacterClass, Experience};

use super::{EntityId, Transform};

/// One live entity and the capabilities it carries.
///
/// Capabilities are optional: scenery carries none, a destructible barrel
/// carries health, the player carries everything. Each capability object
/// owns its own persisted payload (see [`crate::saving`]).
pub struct Entity {
    pub(crate) id: EntityId,
    pub(crate) identity: Rc<IdentityCell>,
    pub(crate) transform: Transform,
    pub(crate) scheduler: ActionScheduler,
    pub(crate) health: Option<Health>,
    pub(crate) stats: Option<BaseStats>,
    pub(crate) experience: Option<Experience>,
    pub(crate) mover: Option<Mover>,
    pub(crate) fighter: Option<Fighter>,
}

impl Entity {
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Durable identity used as the save-document key.
    pub fn token(&self) -> IdentityToken {
        self.identity.token()
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    pub fn scheduler(&self) -> &ActionScheduler {
        &self.scheduler
    }

    pub fn health(&self) -> Option<&Health> {
        self.health.as_ref()
    }

    pub fn stats(&self) -> Option<&BaseStats> {
        self.stats.as_ref()
    }

    pub fn experience(&self) -> Option<&Experience> {
        self.experience.as_ref()
    }

    pub fn mover(&self) -> Option<&Mover> {
        self.mover.as_ref()
    }

    pub fn fighter(&self) -> Option<&Fighter> {
        self.fighter.as_ref()
    }
}

/// Declarative description of an entity to spawn.
#[derive(Clone, Debug, Default)]
pub struct EntitySpec {
    pub(crate) token: Option<IdentityToken>,
    pub(crate) transform: Transform,
    pub(crate) player: bool,
    pub(crate) health: Option<f32>,
    pub(crate) stats: Option<(CharacterClass, u32, bool)>,
    pub(crate) experience: Option<f32>,
    pub(crate) mover: Option<(f32, f32)>,
    pub(crate) fighter: Option<(WeaponConfig, f32)>,
}

impl EntitySpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Preferred identity token; a fresh one is minted on collision.
    pub fn token(mut self, token: impl Into<IdentityToken>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Marks this entity as the controllable player.
    pub fn player(mut self) -> Self {
        self.player = true;
        self
    }

    /// Adds a health capability regenerating to `regen_percentage` percent
    /// of the new maximum on level up.
    pub fn health(mut self, regen_percentage: f32) -> Self {
        self.health = Some(regen_percentage);
        self
    }

    /// Adds a stats capability. `uses_modifiers` enables gear/buff
    /// aggregation and is normally true only for the player.
    pub fn stats(mut self, class: CharacterClass, starting_level: u32, uses_modifiers: bool) -> Self {
        self.stats = Some((class, starting_level, uses_modifiers));
        self
    }

    /// Adds an experience capability with a starting point total.
    pub fn experience(mut self, points: f32) -> Self {
        self.experience = Some(points);
        self
    }

    pub fn mover(mut self, max_speed: f32, max_path_length: f32) -> Self {
        self.mover = Some((max_speed, max_path_length));
        self
    }

    pub fn fighter(mut self, default_weapon: WeaponConfig, time_between_attacks: f32) -> Self {
        self.fighter = Some((default_weapon, time_between_attacks));
        self
    }
}

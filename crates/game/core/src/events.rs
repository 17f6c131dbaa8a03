//! Gameplay notifications for external collaborators.
//!
//! The core never calls into rendering, animation or UI. Anything those
//! layers need to react to (a level up, a damage number, an attack trigger)
//! is pushed onto the world's event queue and drained by the embedding
//! runtime once per frame. Internal reactions (health regeneration on level
//! up, experience award on death) run synchronously inside the operations
//! themselves; the queue is purely outbound.

use crate::state::EntityId;

/// One observable gameplay occurrence.
#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    ExperienceGained {
        entity: EntityId,
        amount: f32,
    },
    LevelUp {
        entity: EntityId,
        level: u32,
    },
    /// Non-lethal damage, carrying the applied amount for UI display.
    DamageTaken {
        entity: EntityId,
        amount: f32,
    },
    Died {
        entity: EntityId,
    },
    /// The attacker starts an attack cycle; the animation layer answers by
    /// calling [`crate::state::World::hit`] when the swing lands.
    AttackTriggered {
        attacker: EntityId,
        target: EntityId,
    },
    /// The attack action was cancelled; resets the attack animation.
    AttackStopped {
        entity: EntityId,
    },
    WeaponEquipped {
        entity: EntityId,
        weapon: String,
        /// Weapon-specific animation set, or `None` to fall back to the
        /// base movement/attack animations.
        animation_override: Option<String>,
    },
    ProjectileSpawned {
        projectile: crate::combat::ProjectileId,
        attacker: EntityId,
        target: EntityId,
    },
}

/// FIFO queue of pending events, drained wholesale.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: Vec<GameEvent>,
}

impl EventQueue {
    pub fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Removes and returns all pending events in emission order.
    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

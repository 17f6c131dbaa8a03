//! Per-actor action exclusivity.
//!
//! An actor runs at most one action at a time. Starting a new action always
//! cancels the previous one synchronously before the new one becomes
//! current; re-starting the action that is already current is a no-op.
//! There is no queue and no priority: last writer wins.

mod mover;

pub use mover::Mover;

use crate::events::GameEvent;
use crate::state::{EntityId, World};

/// The action currently occupying an actor.
///
/// Each variant is owned by exactly one capability on the entity (the
/// mover, the fighter), which is where its cancellation lands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActiveAction {
    Move,
    Fight,
}

/// Holds the single current action of one actor.
#[derive(Clone, Copy, Debug, Default)]
pub struct ActionScheduler {
    current: Option<ActiveAction>,
}

impl ActionScheduler {
    pub fn current(&self) -> Option<ActiveAction> {
        self.current
    }

    /// Installs `action` and returns the action it displaced.
    ///
    /// Returns `None` both when there was nothing to cancel and when
    /// `action` is already current (the no-op case). The caller is
    /// responsible for delivering the cancellation to the displaced
    /// action's owner before acting on the new one.
    pub fn start(&mut self, action: Option<ActiveAction>) -> Option<ActiveAction> {
        if self.current == action {
            return None;
        }
        std::mem::replace(&mut self.current, action)
    }
}

impl World {
    /// Makes `action` the actor's current action, cancelling the previous
    /// one first.
    pub fn start_action(&mut self, entity: EntityId, action: ActiveAction) {
        self.apply_action(entity, Some(action));
    }

    /// Cancels whatever the actor is doing.
    pub fn cancel_current_action(&mut self, entity: EntityId) {
        self.apply_action(entity, None);
    }

    fn apply_action(&mut self, entity: EntityId, action: Option<ActiveAction>) {
        let displaced = {
            let Some(e) = self.entities.get_mut(&entity) else {
                return;
            };
            e.scheduler.start(action)
        };

        // Cancellation is synchronous: the displaced owner is told before
        // the caller proceeds with the new action.
        match displaced {
            None => {}
            Some(ActiveAction::Move) => {
                if let Some(e) = self.entities.get_mut(&entity) {
                    if let Some(mover) = &mut e.mover {
                        mover.cancel();
                    }
                }
            }
            Some(ActiveAction::Fight) => {
                if let Some(e) = self.entities.get_mut(&entity) {
                    if let Some(fighter) = &mut e.fighter {
                        fighter.clear_target();
                    }
                    if let Some(mover) = &mut e.mover {
                        mover.cancel();
                    }
                }
                self.events.push(GameEvent::AttackStopped { entity });
            }
        }
    }
}

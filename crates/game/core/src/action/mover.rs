//! Movement capability.
//!
//! The core owns destinations and simple kinematics; whether a point is
//! reachable at all is the navigation oracle's business (the engine's
//! navmesh, in practice).

use crate::env::GameEnv;
use crate::state::{EntityId, Vec3, World};

/// Movement capability of one entity.
#[derive(Clone, Debug)]
pub struct Mover {
    max_speed: f32,
    /// Destinations whose walkable path is longer than this are rejected
    /// by [`World::can_move_to`].
    max_path_length: f32,
    destination: Option<Vec3>,
    speed_fraction: f32,
}

impl Mover {
    pub fn new(max_speed: f32, max_path_length: f32) -> Self {
        Self {
            max_speed,
            max_path_length,
            destination: None,
            speed_fraction: 1.0,
        }
    }

    /// Current destination, `None` while idle.
    pub fn destination(&self) -> Option<Vec3> {
        self.destination
    }

    pub fn is_moving(&self) -> bool {
        self.destination.is_some()
    }

    pub(crate) fn move_to(&mut self, destination: Vec3, speed_fraction: f32) {
        self.destination = Some(destination);
        self.speed_fraction = speed_fraction.clamp(0.0, 1.0);
    }

    pub(crate) fn cancel(&mut self) {
        self.destination = None;
    }
}

impl World {
    /// Starts a move action toward `point`.
    ///
    /// Cancels any other current action first. `speed_fraction` scales the
    /// mover's maximum speed and is clamped to [0, 1].
    pub fn move_to(&mut self, entity: EntityId, point: Vec3, speed_fraction: f32) {
        if !self
            .entities
            .get(&entity)
            .is_some_and(|e| e.mover.is_some())
        {
            return;
        }
        self.start_action(entity, super::ActiveAction::Move);
        if let Some(mover) = self
            .entities
            .get_mut(&entity)
            .and_then(|e| e.mover.as_mut())
        {
            mover.move_to(point, speed_fraction);
        }
    }

    /// True when a complete walkable path to `point` exists and is not
    /// longer than the mover allows.
    pub fn can_move_to(&self, env: &GameEnv<'_>, entity: EntityId, point: Vec3) -> bool {
        let Some(e) = self.entities.get(&entity) else {
            return false;
        };
        let Some(mover) = &e.mover else {
            return false;
        };
        env.path_length(e.transform.position, point)
            .is_some_and(|length| length <= mover.max_path_length)
    }

    /// Advances every live mover toward its destination.
    pub(crate) fn update_movers(&mut self, dt: f32) {
        for e in self.entities.values_mut() {
            let dead = e.health.as_ref().is_some_and(|h| h.is_dead());
            let Some(mover) = &mut e.mover else {
                continue;
            };
            if dead {
                mover.cancel();
                continue;
            }
            let Some(destination) = mover.destination else {
                continue;
            };

            let position = e.transform.position;
            let offset = destination - position;
            let distance = offset.length();
            let step = mover.max_speed * mover.speed_fraction * dt;
            if step >= distance {
                e.transform.position = destination;
                mover.destination = None;
            } else {
                e.transform.position = position + offset * (step / distance);
            }
        }
    }
}

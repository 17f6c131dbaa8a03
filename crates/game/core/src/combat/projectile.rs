//! In-flight projectiles.
//!
//! A projectile carries its target, instigator and precomputed damage. The
//! first collision with the intended target applies the damage exactly
//! once; collisions with anything else, or after the damage has been
//! applied, are ignored. Collisions are normally reported by the external
//! physics layer through [`World::projectile_collision`]; the core's own
//! tick also detects arrival for headless simulation.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::env::GameEnv;
use crate::state::{EntityId, Vec3, World};

use super::ProjectileSpec;

/// Handle of an in-flight projectile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProjectileId(pub u32);

impl fmt::Display for ProjectileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "projectile {}", self.0)
    }
}

/// Distance at which the core's own tick counts as a collision.
const HIT_RADIUS: f32 = 0.3;

#[derive(Clone, Debug)]
pub struct Projectile {
    id: ProjectileId,
    position: Vec3,
    direction: Vec3,
    speed: f32,
    is_homing: bool,
    remaining_life: f32,
    target: EntityId,
    instigator: EntityId,
    damage: f32,
    spent: bool,
}

impl Projectile {
    pub fn id(&self) -> ProjectileId {
        self.id
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn target(&self) -> EntityId {
        self.target
    }

    pub fn is_spent(&self) -> bool {
        self.spent
    }
}

impl World {
    /// Launches a projectile from the attacker's position. Returns `None`
    /// when either end of the shot no longer exists.
    pub(crate) fn spawn_projectile(
        &mut self,
        spec: &ProjectileSpec,
        instigator: EntityId,
        target: EntityId,
        damage: f32,
    ) -> Option<ProjectileId> {
        let origin = self.entities.get(&instigator)?.transform.position;
        let target_position = self.entities.get(&target)?.transform.position;

        let id = ProjectileId(self.next_projectile);
        self.next_projectile += 1;
        let offset = target_position - origin;
        let distance = offset.length();
        let direction = if distance > 0.0 {
            offset * (1.0 / distance)
        } else {
            Vec3::ZERO
        };
        self.projectiles.push(Projectile {
            id,
            position: origin,
            direction,
            speed: spec.speed,
            is_homing: spec.is_homing,
            remaining_life: spec.max_life,
            target,
            instigator,
            damage,
            spent: false,
        });
        Some(id)
    }

    /// External physics reports that `projectile` touched `struck`.
    ///
    /// Only the first contact with the intended, still-living target
    /// applies damage; everything else is ignored.
    pub fn projectile_collision(
        &mut self,
        env: &GameEnv<'_>,
        projectile: ProjectileId,
        struck: EntityId,
    ) {
        let strike = {
            let Self {
                entities,
                projectiles,
                ..
            } = self;
            let Some(p) = projectiles.iter_mut().find(|p| p.id == projectile) else {
                return;
            };
            if p.spent || struck != p.target {
                return;
            }
            let target_alive = entities
                .get(&p.target)
                .and_then(|t| t.health.as_ref())
                .is_some_and(|h| !h.is_dead());
            if !target_alive {
                return;
            }
            p.spent = true;
            (p.target, p.instigator, p.damage)
        };

        let (target, instigator, damage) = strike;
        self.take_damage(env, target, Some(instigator), damage);
    }

    /// Advances flight, expires stale shots and resolves arrivals.
    pub(crate) fn update_projectiles(&mut self, env: &GameEnv<'_>, dt: f32) {
        let mut arrivals = Vec::new();
        {
            let Self {
                entities,
                projectiles,
                ..
            } = self;
            for p in projectiles.iter_mut() {
                if p.spent {
                    continue;
                }
                p.remaining_life -= dt;
                if p.remaining_life <= 0.0 {
                    continue;
                }
                let Some(target) = entities.get(&p.target) else {
                    continue;
                };
                let target_position = target.transform.position;
                let target_alive = target.health.as_ref().is_some_and(|h| !h.is_dead());
                if p.is_homing && target_alive {
                    let offset = target_position - p.position;
                    let distance = offset.length();
                    if distance > 0.0 {
                        p.direction = offset * (1.0 / distance);
                    }
                }
                p.position = p.position + p.direction * (p.speed * dt);
                if p.position.distance(target_position) <= HIT_RADIUS {
                    arrivals.push((p.id, p.target));
                }
            }
        }

        for (id, target) in arrivals {
            self.projectile_collision(env, id, target);
        }
        self.projectiles
            .retain(|p| !p.spent && p.remaining_life > 0.0);
    }
}

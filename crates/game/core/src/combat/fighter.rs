//! Attack capability: targeting, cadence, weapon equip and hit resolution.

use crate::action::ActiveAction;
use crate::env::GameEnv;
use crate::events::GameEvent;
use crate::state::{EntityId, World};
use crate::stats::{ModifierProvider, Stat};

use super::{Weapon, WeaponConfig};

/// Combat capability of one entity.
#[derive(Clone, Debug)]
pub struct Fighter {
    weapon: Weapon,
    target: Option<EntityId>,
    time_between_attacks: f32,
    time_since_last_attack: f32,
}

impl Fighter {
    pub fn new(default_weapon: WeaponConfig, time_between_attacks: f32) -> Self {
        Self {
            weapon: Weapon::attach(default_weapon),
            target: None,
            time_between_attacks,
            // Ready immediately; the gate only throttles repeat attacks.
            time_since_last_attack: f32::INFINITY,
        }
    }

    pub fn weapon(&self) -> &Weapon {
        &self.weapon
    }

    pub fn target(&self) -> Option<EntityId> {
        self.target
    }

    /// Detaches the old weapon instance and attaches the new one.
    pub(crate) fn equip(&mut self, config: WeaponConfig) {
        self.weapon = Weapon::attach(config);
    }

    pub(crate) fn set_target(&mut self, target: EntityId) {
        self.target = Some(target);
    }

    pub(crate) fn clear_target(&mut self) {
        self.target = None;
    }
}

/// The equipped weapon contributes to the Damage stat.
impl ModifierProvider for Fighter {
    fn additive_modifiers(&self, stat: Stat) -> Vec<f32> {
        match stat {
            Stat::Damage => vec![self.weapon.config().damage],
            _ => Vec::new(),
        }
    }

    fn percentage_modifiers(&self, stat: Stat) -> Vec<f32> {
        match stat {
            Stat::Damage => vec![self.weapon.config().percentage_bonus],
            _ => Vec::new(),
        }
    }
}

impl World {
    /// Whether `attacker` may engage `target` at all: the target must be a
    /// live health-bearing entity that is either reachable or already
    /// inside weapon range.
    pub fn can_attack(&self, env: &GameEnv<'_>, attacker: EntityId, target: EntityId) -> bool {
        let Some(a) = self.entities.get(&attacker) else {
            return false;
        };
        let Some(fighter) = &a.fighter else {
            return false;
        };
        let Some(t) = self.entities.get(&target) else {
            return false;
        };
        let Some(health) = &t.health else {
            return false;
        };
        if health.is_dead() {
            return false;
        }

        let in_range = a.transform.position.distance(t.transform.position)
            < fighter.weapon.config().range;
        in_range || self.can_move_to(env, attacker, t.transform.position)
    }

    /// Starts a fight action against `target`.
    ///
    /// Rejected (returning false, with no state change) when
    /// [`World::can_attack`] fails.
    pub fn attack(&mut self, env: &GameEnv<'_>, attacker: EntityId, target: EntityId) -> bool {
        if !self.can_attack(env, attacker, target) {
            return false;
        }
        self.start_action(attacker, ActiveAction::Fight);
        if let Some(fighter) = self
            .entities
            .get_mut(&attacker)
            .and_then(|e| e.fighter.as_mut())
        {
            fighter.set_target(target);
        }
        true
    }

    /// Replaces the fighter's weapon and announces the animation override
    /// (or the fallback to the base set) to the outside.
    pub fn equip_weapon(&mut self, entity: EntityId, config: WeaponConfig) {
        let event = {
            let Some(fighter) = self
                .entities
                .get_mut(&entity)
                .and_then(|e| e.fighter.as_mut())
            else {
                return;
            };
            let event = GameEvent::WeaponEquipped {
                entity,
                weapon: config.name.clone(),
                animation_override: config.animation_override.clone(),
            };
            fighter.equip(config);
            event
        };
        self.events.push(event);
    }

    /// Resolves a landed attack.
    ///
    /// Damage comes from the Damage stat. Projectile weapons spawn a
    /// projectile that carries target, instigator and damage; everything
    /// else applies damage synchronously.
    pub fn hit(&mut self, env: &GameEnv<'_>, attacker: EntityId) {
        enum Plan {
            Direct(EntityId, f32),
            Launch(super::ProjectileSpec, EntityId, f32),
        }

        let plan = {
            let Some(e) = self.entities.get(&attacker) else {
                return;
            };
            let Some(fighter) = &e.fighter else {
                return;
            };
            let Some(target) = fighter.target else {
                return;
            };
            let damage = e.stat(Stat::Damage, env);
            match &fighter.weapon.config().projectile {
                Some(spec) => Plan::Launch(spec.clone(), target, damage),
                None => Plan::Direct(target, damage),
            }
        };

        match plan {
            Plan::Direct(target, damage) => self.take_damage(env, target, Some(attacker), damage),
            Plan::Launch(spec, target, damage) => {
                let Some(projectile) = self.spawn_projectile(&spec, attacker, target, damage)
                else {
                    return;
                };
                self.events.push(GameEvent::ProjectileSpawned {
                    projectile,
                    attacker,
                    target,
                });
            }
        }
    }

    /// Per-frame fighter behaviour: close distance on out-of-range
    /// targets, otherwise stop and trigger an attack cycle once the
    /// cooldown has elapsed.
    pub(crate) fn update_fighters(&mut self, dt: f32) {
        let ids: Vec<EntityId> = self.entities.keys().copied().collect();
        for attacker in ids {
            let state = {
                let Some(e) = self.entities.get_mut(&attacker) else {
                    continue;
                };
                let dead = e.health.as_ref().is_some_and(|h| h.is_dead());
                let Some(fighter) = &mut e.fighter else {
                    continue;
                };
                fighter.time_since_last_attack += dt;
                if dead {
                    continue;
                }
                let Some(target) = fighter.target else {
                    continue;
                };
                (
                    e.transform.position,
                    fighter.weapon.config().range,
                    fighter.time_since_last_attack > fighter.time_between_attacks,
                    target,
                )
            };
            let (position, range, ready, target) = state;

            let Some((target_position, target_alive)) = self.entities.get(&target).map(|t| {
                (
                    t.transform.position,
                    t.health.as_ref().is_some_and(|h| !h.is_dead()),
                )
            }) else {
                continue;
            };
            if !target_alive {
                continue;
            }

            if position.distance(target_position) >= range {
                if let Some(mover) = self
                    .entities
                    .get_mut(&attacker)
                    .and_then(|e| e.mover.as_mut())
                {
                    mover.move_to(target_position, 1.0);
                }
            } else {
                if let Some(mover) = self
                    .entities
                    .get_mut(&attacker)
                    .and_then(|e| e.mover.as_mut())
                {
                    mover.cancel();
                }
                if ready {
                    if let Some(fighter) = self
                        .entities
                        .get_mut(&attacker)
                        .and_then(|e| e.fighter.as_mut())
                    {
                        fighter.time_since_last_attack = 0.0;
                    }
                    self.events.push(GameEvent::AttackTriggered { attacker, target });
                }
            }
        }
    }
}

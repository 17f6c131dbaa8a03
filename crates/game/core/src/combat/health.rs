//! Health lifecycle: damage, healing, death and the experience award.

use crate::env::GameEnv;
use crate::events::GameEvent;
use crate::state::{Entity, EntityId, World};
use crate::stats::Stat;
use crate::util::LazyValue;

/// Health capability of one entity.
///
/// Current points live in a lazy cell whose default is the stat-derived
/// maximum; the maximum itself is never stored, always recomputed. The
/// dead flag is monotonic within a session: once set it is never cleared.
#[derive(Clone, Debug)]
pub struct Health {
    points: LazyValue<f32>,
    dead: bool,
    regen_percentage: f32,
}

impl Health {
    pub fn new(regen_percentage: f32) -> Self {
        Self {
            points: LazyValue::pending(),
            dead: false,
            regen_percentage,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    pub(crate) fn points(&self) -> &LazyValue<f32> {
        &self.points
    }

    pub(crate) fn regen_percentage(&self) -> f32 {
        self.regen_percentage
    }

    pub(crate) fn mark_dead(&mut self) {
        self.dead = true;
    }
}

enum DamageOutcome {
    Ignored,
    Wounded(f32),
    Lethal,
}

impl Entity {
    /// Current health points, realized from the Health stat on first read.
    pub fn health_points(&self, env: &GameEnv<'_>) -> f32 {
        match &self.health {
            Some(health) => health.points.get_or_init(|| self.stat(Stat::Health, env)),
            None => 0.0,
        }
    }

    /// Stat-derived health ceiling.
    pub fn max_health_points(&self, env: &GameEnv<'_>) -> f32 {
        match self.health {
            Some(_) => self.stat(Stat::Health, env),
            None => 0.0,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.health.as_ref().is_some_and(Health::is_dead)
    }
}

impl World {
    /// Applies damage, clamping at zero.
    ///
    /// Reaching exactly zero runs the death transition once: a death
    /// notification, cancellation of the current action, and an experience
    /// award to an instigator that can receive one. Non-lethal damage
    /// emits [`GameEvent::DamageTaken`] with the amount.
    pub fn take_damage(
        &mut self,
        env: &GameEnv<'_>,
        target: EntityId,
        instigator: Option<EntityId>,
        amount: f32,
    ) {
        // Damage is non-negative; a negative amount must not heal.
        let amount = amount.max(0.0);
        let outcome = {
            let Some(e) = self.entities.get(&target) else {
                return;
            };
            let Some(health) = &e.health else {
                return;
            };
            let remaining = (e.health_points(env) - amount).max(0.0);
            health.points.set(remaining);
            if remaining > 0.0 {
                DamageOutcome::Wounded(amount)
            } else if health.dead {
                DamageOutcome::Ignored
            } else {
                DamageOutcome::Lethal
            }
        };

        match outcome {
            DamageOutcome::Ignored => {}
            DamageOutcome::Wounded(amount) => {
                self.events.push(GameEvent::DamageTaken {
                    entity: target,
                    amount,
                });
            }
            DamageOutcome::Lethal => {
                self.die(target);
                self.award_experience(env, target, instigator);
            }
        }
    }

    /// Restores points up to the stat-derived maximum. A negative amount
    /// is treated as zero; healing never wounds.
    pub fn heal(&mut self, env: &GameEnv<'_>, target: EntityId, amount: f32) {
        let amount = amount.max(0.0);
        let Some(e) = self.entities.get(&target) else {
            return;
        };
        let Some(health) = &e.health else {
            return;
        };
        let ceiling = e.max_health_points(env);
        let restored = (e.health_points(env) + amount).min(ceiling);
        health.points.set(restored);
    }

    /// The Alive → Dead transition. Runs at most once per entity.
    pub(crate) fn die(&mut self, entity: EntityId) {
        {
            let Some(e) = self.entities.get_mut(&entity) else {
                return;
            };
            let Some(health) = &mut e.health else {
                return;
            };
            if health.dead {
                return;
            }
            health.mark_dead();
        }
        self.events.push(GameEvent::Died { entity });
        self.cancel_current_action(entity);
    }

    /// Grants the victim's experience reward to the instigator, silently
    /// skipped when the instigator has no experience capability.
    fn award_experience(
        &mut self,
        env: &GameEnv<'_>,
        victim: EntityId,
        instigator: Option<EntityId>,
    ) {
        let Some(instigator) = instigator else {
            return;
        };
        let receives = self
            .entities
            .get(&instigator)
            .is_some_and(|e| e.experience.is_some());
        if !receives {
            return;
        }
        let reward = self.stat_of(env, victim, Stat::ExperienceReward);
        self.gain_experience(env, instigator, reward);
    }
}

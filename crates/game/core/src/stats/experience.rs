use crate::env::GameEnv;
use crate::events::GameEvent;
use crate::state::{EntityId, World};
use crate::stats::Stat;

/// Accumulated experience points for one entity.
#[derive(Clone, Debug, Default)]
pub struct Experience {
    points: f32,
}

impl Experience {
    pub fn new(points: f32) -> Self {
        Self { points }
    }

    pub fn points(&self) -> f32 {
        self.points
    }

    pub(crate) fn add(&mut self, amount: f32) {
        self.points += amount;
    }

    pub(crate) fn set(&mut self, points: f32) {
        self.points = points;
    }
}

impl World {
    /// Grants experience and recomputes the cached level.
    ///
    /// The cached level only ever moves up: if the recomputed level exceeds
    /// it, the new level is adopted, a [`GameEvent::LevelUp`] fires, and
    /// health is topped up toward the regeneration percentage of the new
    /// maximum. Entities without an experience capability ignore the call.
    pub fn gain_experience(&mut self, env: &GameEnv<'_>, entity: EntityId, amount: f32) {
        {
            let Some(e) = self.entities.get_mut(&entity) else {
                return;
            };
            let Some(experience) = &mut e.experience else {
                return;
            };
            experience.add(amount);
        }
        self.events.push(GameEvent::ExperienceGained { entity, amount });
        self.refresh_level(env, entity);
    }

    /// Recomputes the level from current experience, adopting increases.
    pub(crate) fn refresh_level(&mut self, env: &GameEnv<'_>, entity: EntityId) {
        let leveled = {
            let Some(e) = self.entities.get(&entity) else {
                return;
            };
            let Some(stats) = &e.stats else {
                return;
            };
            let computed = e.calculate_level(env);
            let cached = stats.level.get_or_init(|| computed);
            if computed > cached {
                stats.level.set(computed);
                Some(computed)
            } else {
                None
            }
        };

        let Some(level) = leveled else {
            return;
        };
        self.events.push(GameEvent::LevelUp { entity, level });
        self.regenerate_on_level_up(env, entity);
    }

    /// Tops health up toward `regen% × new max`; never reduces it.
    fn regenerate_on_level_up(&mut self, env: &GameEnv<'_>, entity: EntityId) {
        let Some(e) = self.entities.get(&entity) else {
            return;
        };
        let Some(health) = &e.health else {
            return;
        };
        let maximum = e.stat(Stat::Health, env);
        let floor = maximum * health.regen_percentage() / 100.0;
        let current = health.points().get_or_init(|| maximum);
        if floor > current {
            health.points().set(floor);
        }
    }
}

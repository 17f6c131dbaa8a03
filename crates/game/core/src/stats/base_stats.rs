use crate::env::GameEnv;
use crate::state::{Entity, EntityId, World};
use crate::stats::{CharacterClass, ModifierProvider, Stat};
use crate::util::LazyValue;

/// Class, starting level and the cached current level of one entity.
///
/// The level is computed lazily from experience and cached; it is realized
/// at [`World::begin_play`] and only recomputed when experience increases.
#[derive(Clone, Debug)]
pub struct BaseStats {
    pub(crate) class: CharacterClass,
    pub(crate) starting_level: u32,
    /// Non-player entities skip modifier aggregation entirely so their
    /// numbers stay purely data-driven.
    pub(crate) uses_modifiers: bool,
    pub(crate) level: LazyValue<u32>,
}

impl BaseStats {
    pub fn new(class: CharacterClass, starting_level: u32, uses_modifiers: bool) -> Self {
        Self {
            class,
            starting_level: starting_level.max(1),
            uses_modifiers,
            level: LazyValue::pending(),
        }
    }

    pub fn class(&self) -> CharacterClass {
        self.class
    }
}

impl Entity {
    /// Cached level, computed from experience on first access.
    pub fn level(&self, env: &GameEnv<'_>) -> u32 {
        match &self.stats {
            Some(stats) => stats.level.get_or_init(|| self.calculate_level(env)),
            None => 1,
        }
    }

    /// Scans the experience-to-level-up column and returns the first level
    /// whose threshold exceeds current experience; one past the end of the
    /// column when every threshold has been crossed.
    pub fn calculate_level(&self, env: &GameEnv<'_>) -> u32 {
        let Some(stats) = &self.stats else {
            return 1;
        };
        let Some(experience) = &self.experience else {
            return stats.starting_level;
        };

        let table = env.progression();
        let points = experience.points();
        let penultimate = table.levels(Stat::ExperienceToLevelUp, stats.class) as u32;
        for level in 1..=penultimate {
            if table.stat(Stat::ExperienceToLevelUp, stats.class, level) > points {
                return level;
            }
        }
        penultimate + 1
    }

    /// Effective stat: `(base + Σ additive) × (1 + Σ percentage / 100)`.
    ///
    /// Entities without a stats capability report 0.
    pub fn stat(&self, stat: Stat, env: &GameEnv<'_>) -> f32 {
        let Some(stats) = &self.stats else {
            return 0.0;
        };
        let base = env.progression().stat(stat, stats.class, self.level(env));
        let (additive, percentage) = if stats.uses_modifiers {
            self.modifier_sums(stat)
        } else {
            (0.0, 0.0)
        };
        (base + additive) * (1.0 + percentage / 100.0)
    }

    fn modifier_sums(&self, stat: Stat) -> (f32, f32) {
        let mut additive = 0.0;
        let mut percentage = 0.0;
        for provider in self.modifier_providers() {
            additive += provider.additive_modifiers(stat).iter().sum::<f32>();
            percentage += provider.percentage_modifiers(stat).iter().sum::<f32>();
        }
        (additive, percentage)
    }

    fn modifier_providers(&self) -> impl Iterator<Item = &dyn ModifierProvider> {
        self.fighter.iter().map(|f| f as &dyn ModifierProvider)
    }
}

impl World {
    /// Effective stat of an entity; 0 for unknown entities.
    pub fn stat_of(&self, env: &GameEnv<'_>, entity: EntityId, stat: Stat) -> f32 {
        self.entities
            .get(&entity)
            .map_or(0.0, |e| e.stat(stat, env))
    }

    /// Cached level of an entity; 1 for unknown entities.
    pub fn level_of(&self, env: &GameEnv<'_>, entity: EntityId) -> u32 {
        self.entities.get(&entity).map_or(1, |e| e.level(env))
    }
}

#[cfg(test)]
mod tests {
    use crate::combat::WeaponConfig;
    use crate::identity::IdentityRegistry;
    use crate::state::{EntitySpec, SceneIndex, World};
    use crate::stats::{Progression, ProgressionClass, ProgressionStat};

    use super::*;

    fn table() -> Progression {
        Progression::new(vec![ProgressionClass {
            class: CharacterClass::Grunt,
            stats: vec![
                ProgressionStat {
                    stat: Stat::Damage,
                    levels: vec![10.0, 14.0],
                },
                ProgressionStat {
                    stat: Stat::ExperienceToLevelUp,
                    levels: vec![100.0, 300.0],
                },
            ],
        }])
    }

    fn weapon() -> WeaponConfig {
        WeaponConfig {
            name: "test-blade".into(),
            damage: 5.0,
            percentage_bonus: 50.0,
            ..WeaponConfig::unarmed()
        }
    }

    #[test]
    fn effective_stat_folds_in_modifiers() {
        let table = table();
        let env = GameEnv::new(&table);
        let mut registry = IdentityRegistry::new();
        let mut world = World::new(SceneIndex(0));
        let id = world.spawn(
            &mut registry,
            EntitySpec::new()
                .stats(CharacterClass::Grunt, 1, true)
                .fighter(weapon(), 1.0),
        );

        // (10 + 5) * (1 + 50/100)
        assert_eq!(world.stat_of(&env, id, Stat::Damage), 22.5);
    }

    #[test]
    fn modifiers_are_skipped_when_disabled() {
        let table = table();
        let env = GameEnv::new(&table);
        let mut registry = IdentityRegistry::new();
        let mut world = World::new(SceneIndex(0));
        let id = world.spawn(
            &mut registry,
            EntitySpec::new()
                .stats(CharacterClass::Grunt, 1, false)
                .fighter(weapon(), 1.0),
        );

        assert_eq!(world.stat_of(&env, id, Stat::Damage), 10.0);
    }

    #[test]
    fn level_follows_experience_thresholds() {
        let table = table();
        let env = GameEnv::new(&table);
        let mut registry = IdentityRegistry::new();
        let mut world = World::new(SceneIndex(0));

        for (points, expected) in [(0.0, 1), (99.0, 1), (150.0, 2), (350.0, 3)] {
            let id = world.spawn(
                &mut registry,
                EntitySpec::new()
                    .stats(CharacterClass::Grunt, 1, false)
                    .experience(points),
            );
            assert_eq!(
                world.entity(id).unwrap().calculate_level(&env),
                expected,
                "at {points} xp"
            );
        }
    }

    #[test]
    fn entities_without_experience_keep_their_starting_level() {
        let table = table();
        let env = GameEnv::new(&table);
        let mut registry = IdentityRegistry::new();
        let mut world = World::new(SceneIndex(0));
        let id = world.spawn(
            &mut registry,
            EntitySpec::new().stats(CharacterClass::Grunt, 3, false),
        );
        assert_eq!(world.level_of(&env, id), 3);
    }
}

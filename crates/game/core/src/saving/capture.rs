//! Walking the world to produce and consume [`SaveDocument`]s.

use crate::env::GameEnv;
use crate::identity::IdentityToken;
use crate::state::{EntityId, Transform, World};

use super::{CapabilityKind, CapabilityMap, CapabilityState, RestoreError, SaveDocument};

/// Summary of a completed restore.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RestoreReport {
    /// Entities whose payloads were applied.
    pub restored: usize,
    /// `(token, weapon name)` pairs whose weapon could not be resolved
    /// against the catalog. The fighter keeps its default weapon.
    pub skipped_weapons: Vec<(IdentityToken, String)>,
}

impl World {
    /// Captures every identified entity into a fresh document, stamped
    /// with the current scene.
    pub fn capture_all(&self, env: &GameEnv<'_>) -> SaveDocument {
        let mut doc = SaveDocument::default();
        self.capture_into(env, &mut doc);
        doc
    }

    /// Merges this scene's state into `doc`.
    ///
    /// Each present entity replaces its own record wholesale; records of
    /// entities that only exist in other scenes are left untouched, which
    /// is what makes cross-scene saves accumulate instead of clobbering
    /// each other. Entities without an identity token are skipped.
    pub fn capture_into(&self, env: &GameEnv<'_>, doc: &mut SaveDocument) {
        for e in self.entities.values() {
            let token = e.token();
            if token.is_empty() {
                continue;
            }

            let mut payloads = CapabilityMap::new();
            if e.mover.is_some() {
                payloads.insert(
                    CapabilityKind::Mover,
                    CapabilityState::Placement {
                        position: e.transform.position,
                        rotation: e.transform.rotation,
                    },
                );
            }
            if e.health.is_some() {
                payloads.insert(
                    CapabilityKind::Health,
                    CapabilityState::Points(e.health_points(env)),
                );
            }
            if let Some(experience) = &e.experience {
                payloads.insert(
                    CapabilityKind::Experience,
                    CapabilityState::Experience(experience.points()),
                );
            }
            if e.stats.is_some() {
                payloads.insert(CapabilityKind::Leveling, CapabilityState::Level(e.level(env)));
            }
            if let Some(fighter) = &e.fighter {
                payloads.insert(
                    CapabilityKind::Fighter,
                    CapabilityState::Weapon(fighter.weapon().name().to_string()),
                );
            }
            doc.entities.insert(token, payloads);
        }
        doc.last_scene = Some(self.scene);
    }

    /// Applies `doc` to this world.
    ///
    /// Entities the document knows but the scene does not are skipped, as
    /// are payloads for capabilities an entity no longer carries. A payload
    /// whose shape does not match its capability kind aborts the whole
    /// restore: the document is corrupt and partial application would leave
    /// the world in an arbitrary mix of old and new state.
    ///
    /// Must run before [`World::begin_play`] so restored values win over
    /// lazily computed defaults.
    pub fn restore_all(
        &mut self,
        env: &GameEnv<'_>,
        doc: &SaveDocument,
    ) -> Result<RestoreReport, RestoreError> {
        let mut report = RestoreReport::default();
        let mut fallen = Vec::new();

        for (token, payloads) in &doc.entities {
            let Some(id) = self.find_by_token(token) else {
                continue;
            };
            for (kind, payload) in payloads {
                self.restore_capability(env, id, token, *kind, payload, &mut report, &mut fallen)?;
            }
            report.restored += 1;
        }

        // Zero restored health means the entity was dead when the save was
        // written; replay the death transition now.
        for id in fallen {
            self.die(id);
        }
        Ok(report)
    }

    fn restore_capability(
        &mut self,
        env: &GameEnv<'_>,
        id: EntityId,
        token: &IdentityToken,
        kind: CapabilityKind,
        payload: &CapabilityState,
        report: &mut RestoreReport,
        fallen: &mut Vec<EntityId>,
    ) -> Result<(), RestoreError> {
        let Some(e) = self.entities.get_mut(&id) else {
            return Ok(());
        };
        match (kind, payload) {
            (CapabilityKind::Mover, CapabilityState::Placement { position, rotation }) => {
                if let Some(mover) = &mut e.mover {
                    e.transform = Transform {
                        position: *position,
                        rotation: *rotation,
                    };
                    mover.cancel();
                }
            }
            (CapabilityKind::Health, CapabilityState::Points(points)) => {
                if let Some(health) = &e.health {
                    health.points().set(*points);
                    if *points <= 0.0 {
                        fallen.push(id);
                    }
                }
            }
            (CapabilityKind::Experience, CapabilityState::Experience(points)) => {
                if let Some(experience) = &mut e.experience {
                    experience.set(*points);
                }
            }
            (CapabilityKind::Leveling, CapabilityState::Level(level)) => {
                if let Some(stats) = &e.stats {
                    stats.level.set(*level);
                }
            }
            (CapabilityKind::Fighter, CapabilityState::Weapon(name)) => {
                if let Some(fighter) = &mut e.fighter {
                    match env.weapon(name) {
                        Some(config) => fighter.equip(config),
                        None => report.skipped_weapons.push((token.clone(), name.clone())),
                    }
                }
            }
            (kind, _) => {
                return Err(RestoreError::TypeMismatch {
                    token: token.clone(),
                    kind,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::combat::WeaponConfig;
    use crate::env::{GameEnv, WeaponOracle};
    use crate::identity::IdentityRegistry;
    use crate::state::{EntitySpec, SceneIndex, Transform, Vec3, World};
    use crate::stats::{
        CharacterClass, Progression, ProgressionClass, ProgressionStat, Stat,
    };

    use super::super::{CapabilityKind, CapabilityState, RestoreError};

    fn progression() -> Progression {
        Progression::new(vec![ProgressionClass {
            class: CharacterClass::Grunt,
            stats: vec![
                ProgressionStat {
                    stat: Stat::Health,
                    levels: vec![50.0, 80.0, 120.0],
                },
                ProgressionStat {
                    stat: Stat::ExperienceToLevelUp,
                    levels: vec![100.0, 300.0],
                },
            ],
        }])
    }

    struct Catalog;

    impl WeaponOracle for Catalog {
        fn weapon(&self, name: &str) -> Option<WeaponConfig> {
            (name == "sword").then(|| WeaponConfig {
                name: "sword".into(),
                damage: 12.0,
                ..WeaponConfig::unarmed()
            })
        }
    }

    fn hero_spec() -> EntitySpec {
        EntitySpec::new()
            .token("hero")
            .transform(Transform::at(Vec3::new(1.0, 0.0, 2.0)))
            .health(70.0)
            .stats(CharacterClass::Grunt, 1, false)
            .experience(0.0)
            .mover(5.0, 40.0)
            .fighter(WeaponConfig::unarmed(), 1.0)
    }

    #[test]
    fn round_trip_restores_health_and_position() {
        let table = progression();
        let env = GameEnv::new(&table);
        let mut registry = IdentityRegistry::default();

        let mut world = World::new(SceneIndex(0));
        let hero = world.spawn(&mut registry, hero_spec());
        world.begin_play(&env);
        world.take_damage(&env, hero, None, 20.0);
        let doc = world.capture_all(&env);
        assert_eq!(doc.last_scene, Some(SceneIndex(0)));

        let mut fresh = World::new(SceneIndex(0));
        let hero = fresh.spawn(&mut registry, hero_spec());
        let report = fresh.restore_all(&env, &doc).unwrap();
        fresh.begin_play(&env);

        assert_eq!(report.restored, 1);
        assert_eq!(fresh.health_points_of(&env, hero), 30.0);
        let e = fresh.entity(hero).unwrap();
        assert_eq!(e.transform().position, Vec3::new(1.0, 0.0, 2.0));
    }

    #[test]
    fn empty_world_still_stamps_the_scene() {
        let table = progression();
        let env = GameEnv::new(&table);
        let world = World::new(SceneIndex(3));
        let doc = world.capture_all(&env);
        assert!(doc.entities.is_empty());
        assert_eq!(doc.last_scene, Some(SceneIndex(3)));
    }

    #[test]
    fn merge_preserves_other_scenes_records() {
        let table = progression();
        let env = GameEnv::new(&table);
        let mut registry = IdentityRegistry::default();

        let mut first = World::new(SceneIndex(0));
        first.spawn(&mut registry, hero_spec());
        first.begin_play(&env);
        let mut doc = first.capture_all(&env);

        let mut second = World::new(SceneIndex(1));
        second.spawn(
            &mut registry,
            EntitySpec::new()
                .token("barrel")
                .health(0.0)
                .stats(CharacterClass::Grunt, 1, false),
        );
        second.begin_play(&env);
        second.capture_into(&env, &mut doc);

        assert!(doc.entities.contains_key(&"hero".into()));
        assert!(doc.entities.contains_key(&"barrel".into()));
        assert_eq!(doc.last_scene, Some(SceneIndex(1)));
    }

    #[test]
    fn restored_zero_health_replays_death() {
        let table = progression();
        let env = GameEnv::new(&table);
        let mut registry = IdentityRegistry::default();

        let mut world = World::new(SceneIndex(0));
        let hero = world.spawn(&mut registry, hero_spec());
        let mut doc = world.capture_all(&env);
        doc.entities
            .get_mut(&"hero".into())
            .unwrap()
            .insert(CapabilityKind::Health, CapabilityState::Points(0.0));

        world.restore_all(&env, &doc).unwrap();
        world.begin_play(&env);
        assert!(world.entity(hero).unwrap().is_dead());
    }

    #[test]
    fn unresolved_weapon_is_reported_not_fatal() {
        let table = progression();
        let catalog = Catalog;
        let env = GameEnv::new(&table).with_weapons(&catalog);
        let mut registry = IdentityRegistry::default();

        let mut world = World::new(SceneIndex(0));
        let hero = world.spawn(&mut registry, hero_spec());
        let mut doc = world.capture_all(&env);
        doc.entities
            .get_mut(&"hero".into())
            .unwrap()
            .insert(
                CapabilityKind::Fighter,
                CapabilityState::Weapon("halberd".into()),
            );

        let report = world.restore_all(&env, &doc).unwrap();
        assert_eq!(report.skipped_weapons, vec![("hero".into(), "halberd".into())]);
        let fighter = world.entity(hero).unwrap().fighter().unwrap();
        assert_eq!(fighter.weapon().name(), "unarmed");
    }

    #[test]
    fn resolved_weapon_is_equipped() {
        let table = progression();
        let catalog = Catalog;
        let env = GameEnv::new(&table).with_weapons(&catalog);
        let mut registry = IdentityRegistry::default();

        let mut world = World::new(SceneIndex(0));
        let hero = world.spawn(&mut registry, hero_spec());
        let mut doc = world.capture_all(&env);
        doc.entities
            .get_mut(&"hero".into())
            .unwrap()
            .insert(
                CapabilityKind::Fighter,
                CapabilityState::Weapon("sword".into()),
            );

        let report = world.restore_all(&env, &doc).unwrap();
        assert!(report.skipped_weapons.is_empty());
        let fighter = world.entity(hero).unwrap().fighter().unwrap();
        assert_eq!(fighter.weapon().name(), "sword");
    }

    #[test]
    fn mismatched_payload_aborts_the_restore() {
        let table = progression();
        let env = GameEnv::new(&table);
        let mut registry = IdentityRegistry::default();

        let mut world = World::new(SceneIndex(0));
        world.spawn(&mut registry, hero_spec());
        let mut doc = world.capture_all(&env);
        doc.entities
            .get_mut(&"hero".into())
            .unwrap()
            .insert(CapabilityKind::Health, CapabilityState::Weapon("sword".into()));

        let err = world.restore_all(&env, &doc).unwrap_err();
        assert_eq!(
            err,
            RestoreError::TypeMismatch {
                token: "hero".into(),
                kind: CapabilityKind::Health,
            }
        );
    }

    #[test]
    fn unknown_tokens_are_skipped() {
        let table = progression();
        let env = GameEnv::new(&table);
        let mut registry = IdentityRegistry::default();

        let mut world = World::new(SceneIndex(0));
        world.spawn(&mut registry, hero_spec());
        let doc = world.capture_all(&env);

        let mut other = World::new(SceneIndex(1));
        other.spawn(
            &mut registry,
            EntitySpec::new().token("stranger").health(0.0).stats(
                CharacterClass::Grunt,
                1,
                false,
            ),
        );
        let report = other.restore_all(&env, &doc).unwrap();
        assert_eq!(report.restored, 0);
    }
}

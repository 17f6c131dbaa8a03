//! End-to-end session scenarios: play, persist, resume and travel.

use async_trait::async_trait;
use tempfile::TempDir;

use wayfarer_content::{default_progression, default_weapons};
use wayfarer_core::{
    CharacterClass, DestinationId, EntityId, EntitySpec, GameEvent, IdentityRegistry, Portal,
    SceneIndex, Stat, Transform, Vec3, WeaponConfig, World,
};
use wayfarer_runtime::session::{self, Content, NoFade, SceneDriver, Session};
use wayfarer_runtime::{FileSaveRepository, InMemorySaveRepository, SaveRepository};

fn hero_spec() -> EntitySpec {
    EntitySpec::new()
        .token("hero")
        .player()
        .transform(Transform::at(Vec3::new(0.0, 0.0, 0.0)))
        .health(100.0)
        .stats(CharacterClass::Grunt, 1, false)
        .experience(0.0)
        .mover(6.0, 40.0)
        .fighter(WeaponConfig::unarmed(), 1.0)
}

fn grunt_spec(token: &str, position: Vec3) -> EntitySpec {
    EntitySpec::new()
        .token(token)
        .transform(Transform::at(position))
        .health(0.0)
        .stats(CharacterClass::Grunt, 1, false)
        .fighter(WeaponConfig::unarmed(), 1.0)
}

/// Two hand-built scenes joined by a portal pair on destination A.
struct TestDriver;

#[async_trait(?Send)]
impl SceneDriver for TestDriver {
    async fn load_scene(
        &mut self,
        registry: &mut IdentityRegistry,
        scene: SceneIndex,
    ) -> session::Result<World> {
        let mut world = World::new(scene);
        match scene.0 {
            0 => {
                world.spawn(registry, hero_spec());
                world.spawn(registry, grunt_spec("grunt-1", Vec3::new(3.0, 0.0, 0.0)));
                world.add_portal(Portal {
                    scene: SceneIndex(1),
                    destination: DestinationId::A,
                    spawn_point: Transform::at(Vec3::new(1.0, 0.0, 1.0)),
                });
            }
            1 => {
                world.spawn(registry, hero_spec());
                world.add_portal(Portal {
                    scene: SceneIndex(0),
                    destination: DestinationId::A,
                    spawn_point: Transform::at(Vec3::new(10.0, 0.0, 5.0)),
                });
            }
            // Scene 2 is deliberately empty.
            _ => {}
        }
        Ok(world)
    }
}

fn content() -> Content {
    Content::new(default_progression(), default_weapons())
}

fn session_with(repository: Box<dyn SaveRepository>) -> Session<TestDriver, NoFade> {
    Session::new(content(), repository, TestDriver, NoFade, "save")
}

fn hero_of(world: &World) -> EntityId {
    world.player().expect("scene should have a player")
}

#[tokio::test]
async fn save_then_continue_restores_health_and_scene() {
    let dir = TempDir::new().unwrap();
    let repo = FileSaveRepository::new(dir.path()).unwrap();
    let mut session = session_with(Box::new(repo));

    session.start(SceneIndex(0)).await.unwrap();
    let hero = hero_of(session.world().unwrap());
    session
        .with_world(|env, world| {
            assert_eq!(world.health_points_of(env, hero), 50.0);
            world.take_damage(env, hero, None, 20.0);
        })
        .unwrap();
    session.save().unwrap();

    // A brand-new session against the same directory, as after a restart.
    let repo = FileSaveRepository::new(dir.path()).unwrap();
    let mut resumed = session_with(Box::new(repo));
    resumed.continue_from_save().await.unwrap();

    let world = resumed.world().unwrap();
    assert_eq!(world.scene(), SceneIndex(0));
    let hero = hero_of(world);
    resumed
        .with_world(|env, world| {
            assert_eq!(world.health_points_of(env, hero), 30.0);
        })
        .unwrap();
}

#[tokio::test]
async fn experience_gain_levels_up_and_regenerates_health() {
    let mut session = session_with(Box::new(InMemorySaveRepository::new()));
    session.start(SceneIndex(0)).await.unwrap();
    let hero = hero_of(session.world().unwrap());

    let events = session
        .with_world(|env, world| {
            world.gain_experience(env, hero, 150.0);
            let events = world.drain_events();
            assert_eq!(world.level_of(env, hero), 2);
            assert_eq!(world.health_points_of(env, hero), 80.0);
            events
        })
        .unwrap();

    assert!(events.iter().any(|e| matches!(
        e,
        GameEvent::ExperienceGained { entity, amount } if *entity == hero && *amount == 150.0
    )));
    assert!(events
        .iter()
        .any(|e| matches!(e, GameEvent::LevelUp { entity, level: 2 } if *entity == hero)));
}

#[tokio::test]
async fn lethal_damage_kills_once_and_awards_once() {
    let mut session = session_with(Box::new(InMemorySaveRepository::new()));
    session.start(SceneIndex(0)).await.unwrap();
    let world = session.world().unwrap();
    let hero = hero_of(world);
    let grunt = world.find_by_token(&"grunt-1".into()).unwrap();

    let events = session
        .with_world(|env, world| {
            world.take_damage(env, grunt, Some(hero), 60.0);
            let events = world.drain_events();
            assert!(world.entity(grunt).unwrap().is_dead());
            // A second blow on the corpse changes nothing.
            world.take_damage(env, grunt, Some(hero), 10.0);
            assert!(world.drain_events().is_empty());
            events
        })
        .unwrap();

    let deaths = events
        .iter()
        .filter(|e| matches!(e, GameEvent::Died { entity } if *entity == grunt))
        .count();
    assert_eq!(deaths, 1);

    let reward = default_progression().stat(Stat::ExperienceReward, CharacterClass::Grunt, 1);
    let awards = events
        .iter()
        .filter(|e| matches!(
            e,
            GameEvent::ExperienceGained { entity, amount } if *entity == hero && *amount == reward
        ))
        .count();
    assert_eq!(awards, 1);
}

#[tokio::test]
async fn empty_scene_save_still_records_the_scene() {
    let dir = TempDir::new().unwrap();
    let repo = FileSaveRepository::new(dir.path()).unwrap();
    let mut session = session_with(Box::new(repo));

    session.start(SceneIndex(2)).await.unwrap();
    session.save().unwrap();

    let inspect = FileSaveRepository::new(dir.path()).unwrap();
    let doc = inspect.load("save").unwrap().unwrap();
    assert!(doc.entities.is_empty());
    assert_eq!(doc.last_scene, Some(SceneIndex(2)));
}

#[tokio::test]
async fn portal_transition_places_player_at_destination_marker() {
    let dir = TempDir::new().unwrap();
    let repo = FileSaveRepository::new(dir.path()).unwrap();
    let mut session = session_with(Box::new(repo));

    session.start(SceneIndex(0)).await.unwrap();
    session
        .with_world(|env, world| {
            let hero = world.player().unwrap();
            world.take_damage(env, hero, None, 5.0);
        })
        .unwrap();

    let portal = session
        .world()
        .unwrap()
        .portal_to(DestinationId::A)
        .unwrap()
        .clone();
    session.transition(portal).await.unwrap();

    let world = session.world().unwrap();
    assert_eq!(world.scene(), SceneIndex(1));
    let hero = hero_of(world);
    let e = world.entity(hero).unwrap();
    assert_eq!(e.transform().position, Vec3::new(10.0, 0.0, 5.0));

    // Damage taken before the journey survived it.
    session
        .with_world(|env, world| {
            assert_eq!(world.health_points_of(env, hero), 45.0);
        })
        .unwrap();

    // The far side was checkpointed, so a resume lands in scene 1.
    let inspect = FileSaveRepository::new(dir.path()).unwrap();
    let doc = inspect.load("save").unwrap().unwrap();
    assert_eq!(doc.last_scene, Some(SceneIndex(1)));
    assert!(doc.entities.contains_key(&"hero".into()));
    assert!(doc.entities.contains_key(&"grunt-1".into()));
}

#[test]
fn file_repository_slot_lifecycle() {
    let dir = TempDir::new().unwrap();
    let repo = FileSaveRepository::new(dir.path()).unwrap();

    assert!(repo.load("a").unwrap().is_none());
    assert!(!repo.exists("a"));

    let mut doc = wayfarer_core::SaveDocument::default();
    doc.last_scene = Some(SceneIndex(7));
    repo.save("a", &doc).unwrap();
    repo.save("b", &doc).unwrap();

    assert!(repo.exists("a"));
    assert_eq!(repo.load("a").unwrap().unwrap(), doc);
    assert_eq!(repo.list_slots().unwrap(), vec!["a", "b"]);

    repo.delete("a").unwrap();
    assert!(!repo.exists("a"));
    assert_eq!(repo.list_slots().unwrap(), vec!["b"]);
}

#[tokio::test]
async fn saved_weapon_resolves_through_the_catalog() {
    let mut session = session_with(Box::new(InMemorySaveRepository::new()));
    session.start(SceneIndex(0)).await.unwrap();
    let hero = hero_of(session.world().unwrap());

    let catalog = default_weapons();
    let config = catalog.get("sword").unwrap().clone();
    session
        .with_world(|_env, world| {
            world.equip_weapon(hero, config);
        })
        .unwrap();
    session.save().unwrap();

    // Rebuild the scene from the save: the hero spawns unarmed and the
    // restore re-equips from the catalog by name.
    session.continue_from_save().await.unwrap();
    let world = session.world().unwrap();
    let hero = hero_of(world);
    let fighter = world.entity(hero).unwrap().fighter().unwrap();
    assert_eq!(fighter.weapon().name(), "sword");
}

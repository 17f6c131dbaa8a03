//! Session orchestration: scene lifecycle, persistence and transitions.
//!
//! A [`Session`] owns the live [`World`], the shared identity registry and
//! the save repository, and drives the lifecycle contract the core
//! requires: spawn, then restore, then [`World::begin_play`], then ticks.
//! Scene construction and presentation effects are behind traits so the
//! embedding client decides what a "scene" or a "fade" actually is.

use async_trait::async_trait;
use thiserror::Error;

use wayfarer_core::{
    GameEnv, GameEvent, IdentityRegistry, NavOracle, OpenField, Portal, Progression, SaveDocument,
    SceneIndex, WeaponOracle, World,
};
use wayfarer_core::saving::RestoreError;

use crate::repository::{RepositoryError, SaveRepository};

/// Errors surfaced by session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no scene is loaded")]
    NoWorld,

    #[error("scene {0:?} could not be built: {1}")]
    SceneLoad(SceneIndex, String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Restore(#[from] RestoreError),
}

pub type Result<T> = std::result::Result<T, SessionError>;

/// Static content backing a session: the progression table plus the
/// oracles gameplay consults.
pub struct Content {
    progression: Progression,
    weapons: Box<dyn WeaponOracle>,
    nav: Box<dyn NavOracle>,
}

impl Content {
    pub fn new(progression: Progression, weapons: impl WeaponOracle + 'static) -> Self {
        Self {
            progression,
            weapons: Box::new(weapons),
            nav: Box::new(OpenField),
        }
    }

    pub fn with_nav(mut self, nav: impl NavOracle + 'static) -> Self {
        self.nav = Box::new(nav);
        self
    }

    /// The environment view gameplay operations take.
    pub fn env(&self) -> GameEnv<'_> {
        GameEnv::new(&self.progression)
            .with_weapons(self.weapons.as_ref())
            .with_nav(self.nav.as_ref())
    }
}

/// Builds worlds for scene indices.
///
/// The driver owns scene definitions (which entities exist where); the
/// session only asks it to construct them, passing the shared registry so
/// identity tokens stay unique across scene loads.
#[async_trait(?Send)]
pub trait SceneDriver {
    async fn load_scene(
        &mut self,
        registry: &mut IdentityRegistry,
        scene: SceneIndex,
    ) -> Result<World>;
}

/// Presentation hook bracketing a scene transition.
#[async_trait(?Send)]
pub trait TransitionEffect {
    async fn fade_out(&mut self);
    async fn fade_in(&mut self);
}

/// No-op effect for headless runs and tests.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoFade;

#[async_trait(?Send)]
impl TransitionEffect for NoFade {
    async fn fade_out(&mut self) {}
    async fn fade_in(&mut self) {}
}

/// One play session: a live world plus everything needed to persist it and
/// move it between scenes.
pub struct Session<D: SceneDriver, F: TransitionEffect> {
    content: Content,
    repository: Box<dyn SaveRepository>,
    driver: D,
    effect: F,
    registry: IdentityRegistry,
    slot: String,
    world: Option<World>,
}

impl<D: SceneDriver, F: TransitionEffect> Session<D, F> {
    pub fn new(
        content: Content,
        repository: Box<dyn SaveRepository>,
        driver: D,
        effect: F,
        slot: impl Into<String>,
    ) -> Self {
        Self {
            content,
            repository,
            driver,
            effect,
            registry: IdentityRegistry::new(),
            slot: slot.into(),
            world: None,
        }
    }

    pub fn world(&self) -> Option<&World> {
        self.world.as_ref()
    }

    pub fn world_mut(&mut self) -> Option<&mut World> {
        self.world.as_mut()
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    /// Starts a fresh session in `scene`, ignoring any existing save.
    pub async fn start(&mut self, scene: SceneIndex) -> Result<()> {
        // The previous scene must be torn down first so its identity
        // holders release their tokens in the registry.
        self.world = None;
        let mut world = self.driver.load_scene(&mut self.registry, scene).await?;
        world.begin_play(&self.content.env());
        tracing::info!(scene = scene.0, entities = world.entity_count(), "session started");
        self.world = Some(world);
        Ok(())
    }

    /// Resumes from the save slot: loads the scene the save was written
    /// in, then applies the saved state to it.
    ///
    /// An empty slot is not an error; the session starts fresh in the
    /// first scene, restoring nothing.
    pub async fn continue_from_save(&mut self) -> Result<()> {
        let doc = self.repository.load(&self.slot)?.unwrap_or_default();
        let scene = doc.last_scene.unwrap_or(SceneIndex(0));
        let world = self.build_restored(scene, &doc).await?;
        self.world = Some(world);
        Ok(())
    }

    /// Captures the live world into the save slot.
    ///
    /// The existing document is loaded first and merged into, so entities
    /// saved from other scenes keep their records.
    pub fn save(&mut self) -> Result<()> {
        let Some(world) = &self.world else {
            return Err(SessionError::NoWorld);
        };
        let mut doc = self.repository.load(&self.slot)?.unwrap_or_default();
        world.capture_into(&self.content.env(), &mut doc);
        self.repository.save(&self.slot, &doc)?;
        tracing::info!(slot = %self.slot, entities = doc.entities.len(), "saved");
        Ok(())
    }

    /// Re-applies the save slot to the currently loaded scene. An empty
    /// slot restores nothing.
    pub fn load(&mut self) -> Result<()> {
        let doc = self.repository.load(&self.slot)?.unwrap_or_default();
        let Some(world) = &mut self.world else {
            return Err(SessionError::NoWorld);
        };
        let report = world.restore_all(&self.content.env(), &doc)?;
        for (token, weapon) in &report.skipped_weapons {
            tracing::warn!(%token, weapon, "saved weapon missing from catalog, keeping default");
        }
        world.begin_play(&self.content.env());
        Ok(())
    }

    pub fn delete_save(&mut self) -> Result<()> {
        self.repository.delete(&self.slot)?;
        Ok(())
    }

    /// Moves the player through `portal`: the current scene is saved, the
    /// target scene built and restored, and the player placed at the
    /// matching destination marker's spawn point. The slot is saved again
    /// afterwards so quitting mid-journey resumes on the far side.
    pub async fn transition(&mut self, portal: Portal) -> Result<()> {
        self.effect.fade_out().await;
        self.save()?;

        let doc = self.repository.load(&self.slot)?.unwrap_or_default();
        let mut world = self.build_restored(portal.scene, &doc).await?;
        if let Some(arrival) = world.portal_to(portal.destination) {
            let spawn_point = arrival.spawn_point;
            world.warp_player(spawn_point);
        } else {
            tracing::warn!(
                scene = portal.scene.0,
                "target scene has no portal for destination {:?}, player keeps its spawn transform",
                portal.destination
            );
        }
        self.world = Some(world);

        self.save()?;
        self.effect.fade_in().await;
        Ok(())
    }

    /// Runs `f` with the live world and the environment it plays in.
    ///
    /// This is how callers reach gameplay operations that need both, such
    /// as [`World::take_damage`] or [`World::gain_experience`].
    pub fn with_world<R>(&mut self, f: impl FnOnce(&GameEnv<'_>, &mut World) -> R) -> Result<R> {
        let env = self.content.env();
        let Some(world) = &mut self.world else {
            return Err(SessionError::NoWorld);
        };
        Ok(f(&env, world))
    }

    /// Advances the live world and returns the events the frame produced.
    pub fn update(&mut self, dt: f32) -> Result<Vec<GameEvent>> {
        let Some(world) = &mut self.world else {
            return Err(SessionError::NoWorld);
        };
        world.tick(&self.content.env(), dt);
        Ok(world.drain_events())
    }

    async fn build_restored(&mut self, scene: SceneIndex, doc: &SaveDocument) -> Result<World> {
        // Tear the old scene down before claiming tokens for the new one:
        // a live holder would force the registry to mint fresh tokens and
        // the restore would no longer find its entities.
        self.world = None;
        let mut world = self.driver.load_scene(&mut self.registry, scene).await?;
        let report = world.restore_all(&self.content.env(), doc)?;
        for (token, weapon) in &report.skipped_weapons {
            tracing::warn!(%token, weapon, "saved weapon missing from catalog, keeping default");
        }
        world.begin_play(&self.content.env());
        tracing::debug!(scene = scene.0, restored = report.restored, "scene restored");
        Ok(world)
    }
}

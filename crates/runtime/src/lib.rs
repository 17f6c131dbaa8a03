//! Runtime orchestration for the gameplay simulation.
//!
//! This crate wires the core simulation, loaded content and persistence
//! into a playable session. Consumers embed [`Session`] to start or resume
//! play, drive frames, and move the player between scenes.
//!
//! Modules are organized by responsibility:
//! - [`session`] hosts the orchestrator and the traits clients implement
//! - [`repository`] provides save-document persistence adapters
//! - [`config`] covers save locations and logging setup
pub mod config;
pub mod repository;
pub mod session;

pub use config::{SessionConfig, default_save_dir, init_tracing};
pub use repository::{
    FileSaveRepository, InMemorySaveRepository, RepositoryError, SaveRepository,
};
pub use session::{
    Content, NoFade, SceneDriver, Session, SessionError, TransitionEffect,
};

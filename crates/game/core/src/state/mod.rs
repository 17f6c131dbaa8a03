//! Mutable world state: entities, their capabilities, and the frame tick.

mod common;
mod entity;
mod world;

pub use common::{EntityId, SceneIndex, Transform, Vec3};
pub use entity::{Entity, EntitySpec};
pub use world::{DestinationId, Portal, World};

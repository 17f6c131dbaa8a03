//! Capture and restore of per-entity capability state.
//!
//! A save document maps each entity's identity token to a small map of
//! capability payloads, keyed by the concrete capability kind. Dispatch is
//! a static match over [`CapabilityKind`] and the tagged
//! [`CapabilityState`] payload, so a payload shaped for a different
//! capability is caught at the boundary instead of blowing up in a cast.
//!
//! The engine is a router: each capability owns the meaning of its own
//! payload, and the document is produced and consumed wholesale.

mod capture;

pub use capture::RestoreReport;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::identity::IdentityToken;
use crate::state::{SceneIndex, Vec3};

/// Concrete capability kinds that persist state.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
)]
pub enum CapabilityKind {
    /// Position and rotation, owned by the movement capability.
    Mover,
    Health,
    Experience,
    /// Cached level owned by the stats capability.
    Leveling,
    /// Equipped weapon, stored by catalog name.
    Fighter,
}

/// Tagged payload for one capability.
///
/// Payloads are opaque to the serialization engine; only the owning
/// capability interprets them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum CapabilityState {
    /// Current health points.
    Points(f32),
    /// Accumulated experience points.
    Experience(f32),
    /// Cached character level.
    Level(u32),
    /// Position and euler rotation.
    Placement { position: Vec3, rotation: Vec3 },
    /// Weapon name, resolved against the external catalog at restore.
    Weapon(String),
}

/// Per-entity capability payloads.
pub type CapabilityMap = BTreeMap<CapabilityKind, CapabilityState>;

/// The complete persisted snapshot: every entity's capability state plus
/// the last active scene.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SaveDocument {
    pub entities: BTreeMap<IdentityToken, CapabilityMap>,
    pub last_scene: Option<SceneIndex>,
}

impl SaveDocument {
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty() && self.last_scene.is_none()
    }
}

/// Restore failures that indicate a corrupt document.
///
/// Anything recoverable (missing entities, unresolvable weapon names) is
/// handled per entity and reported, not raised.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RestoreError {
    #[error("capability {kind} of entity {token} carries a mismatched payload")]
    TypeMismatch {
        token: IdentityToken,
        kind: CapabilityKind,
    },
}

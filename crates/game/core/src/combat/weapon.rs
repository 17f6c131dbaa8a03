use serde::{Deserialize, Serialize};

/// Which hand an equipped weapon attaches to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Handedness {
    #[default]
    Right,
    Left,
}

/// Flight parameters for weapons that resolve hits through a projectile.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectileSpec {
    pub speed: f32,
    /// Seconds of flight before the projectile expires unresolved.
    pub max_life: f32,
    /// Homing projectiles re-aim at the live target every frame.
    pub is_homing: bool,
}

impl Default for ProjectileSpec {
    fn default() -> Self {
        Self {
            speed: 10.0,
            max_life: 10.0,
            is_homing: true,
        }
    }
}

/// Immutable weapon configuration from the external catalog.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeaponConfig {
    pub name: String,
    pub damage: f32,
    pub percentage_bonus: f32,
    pub range: f32,
    pub handedness: Handedness,
    pub projectile: Option<ProjectileSpec>,
    /// Weapon-specific animation set; `None` keeps the base animations.
    pub animation_override: Option<String>,
}

impl WeaponConfig {
    /// The bare-fists fallback every fighter starts with.
    pub fn unarmed() -> Self {
        Self {
            name: "unarmed".to_string(),
            damage: 5.0,
            percentage_bonus: 0.0,
            range: 2.0,
            handedness: Handedness::Right,
            projectile: None,
            animation_override: None,
        }
    }

    pub fn has_projectile(&self) -> bool {
        self.projectile.is_some()
    }
}

impl Default for WeaponConfig {
    fn default() -> Self {
        Self::unarmed()
    }
}

/// Runtime weapon instance attached to a fighter.
///
/// Equipping is a full replace: the old instance is dropped, the new one
/// attached, and the animation override reapplied (or reverted to the base
/// set when the new weapon declares none).
#[derive(Clone, Debug)]
pub struct Weapon {
    config: WeaponConfig,
}

impl Weapon {
    pub fn attach(config: WeaponConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &WeaponConfig {
        &self.config
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }
}

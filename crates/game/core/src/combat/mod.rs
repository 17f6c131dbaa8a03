//! Health lifecycle, weapons and attack resolution.

mod fighter;
mod health;
mod projectile;
mod weapon;

pub use fighter::Fighter;
pub use health::Health;
pub use projectile::{Projectile, ProjectileId};
pub use weapon::{Handedness, ProjectileSpec, Weapon, WeaponConfig};

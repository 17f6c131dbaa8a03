use super::Stat;

/// A capability contributing adjustments to a named stat.
///
/// Providers may yield zero or more contributions per call; the aggregation
/// in [`crate::state::Entity::stat`] sums additive contributions before
/// applying the summed percentage contributions.
pub trait ModifierProvider {
    fn additive_modifiers(&self, stat: Stat) -> Vec<f32>;
    fn percentage_modifiers(&self, stat: Stat) -> Vec<f32>;
}

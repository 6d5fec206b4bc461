/// Tunable parameters of the contact solver.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolverConfig {
    /// Contacts closing slower than this speed get no restitution bias, so
    /// resting objects do not jitter.
    pub restitution_velocity_threshold: f32,
    /// When active, penetration is corrected through the separate split
    /// velocity fields instead of a Baumgarte bias on the momentum field.
    pub is_split_impulse_active: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl SolverConfig {
    pub const DEFAULT: Self = Self {
        restitution_velocity_threshold: 0.5,
        is_split_impulse_active: true,
    };
}

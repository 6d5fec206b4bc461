/// Surface properties of a collider, consumed by the contact solver.
///
/// Coefficients of two touching colliders are mixed by the solver:
/// restitution takes the maximum, friction the geometric mean and rolling
/// resistance the arithmetic mean.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Material {
    /// Restitution factor in `[0, 1]`, 0 meaning no bounce at all.
    pub bounciness: f32,
    pub friction_coefficient: f32,
    /// Resistance against rolling, 0 disables the rolling constraint.
    pub rolling_resistance: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl Material {
    pub const DEFAULT: Self = Self {
        bounciness: 0.,
        friction_coefficient: 0.3,
        rolling_resistance: 0.,
    };

    #[must_use]
    pub const fn new(bounciness: f32, friction_coefficient: f32, rolling_resistance: f32) -> Self {
        Self {
            bounciness,
            friction_coefficient,
            rolling_resistance,
        }
    }
}

use glam::Vec3A;

/// One contact point produced by the narrow phase, persistent across steps.
///
/// Points are stored in a single flat list; a [`super::ContactManifold`]
/// references its slice by start index and count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactPoint {
    /// Contact location in the local space of the first collider.
    pub local_point_on_shape_1: Vec3A,
    /// Contact location in the local space of the second collider.
    pub local_point_on_shape_2: Vec3A,
    /// World space contact normal, pointing from the first body toward the
    /// second.
    pub normal: Vec3A,
    pub penetration_depth: f32,
    /// True if the point persisted from the previous step, in which case the
    /// accumulated impulse below warm-starts the solver.
    pub is_resting_contact: bool,
    pub penetration_impulse: f32,
}

impl ContactPoint {
    #[must_use]
    pub fn new(
        local_point_on_shape_1: Vec3A,
        local_point_on_shape_2: Vec3A,
        normal: Vec3A,
        penetration_depth: f32,
    ) -> Self {
        debug_assert!(penetration_depth >= 0.);
        debug_assert!((normal.length_squared() - 1.).abs() < 1e-5);

        Self {
            local_point_on_shape_1,
            local_point_on_shape_2,
            normal,
            penetration_depth,
            is_resting_contact: false,
            penetration_impulse: 0.,
        }
    }
}

use glam::{Mat3A, Vec3A};

/// Per-step scratch state of one manifold's friction, twist and rolling
/// constraints, all anchored at the manifold centroid.
pub struct ContactManifoldSolver {
    /// Index of the matching manifold in the external manifold array.
    pub external_manifold_index: usize,
    pub body_index_1: usize,
    pub body_index_2: usize,
    pub mass_inverse_body_1: f32,
    pub mass_inverse_body_2: f32,
    /// World-space inverse inertia tensors captured at init.
    pub inverse_inertia_tensor_body_1: Mat3A,
    pub inverse_inertia_tensor_body_2: Mat3A,
    pub nb_contacts: usize,
    pub friction_coefficient: f32,
    pub rolling_resistance_factor: f32,
    /// Unit mean of the per-point normals.
    pub normal: Vec3A,
    /// Sum, then mean, of the world contact points on each body.
    pub friction_point_body_1: Vec3A,
    pub friction_point_body_2: Vec3A,
    /// Lever arm from each body's center of mass to the manifold centroid.
    pub r1_friction: Vec3A,
    pub r2_friction: Vec3A,
    pub r1_cross_t1: Vec3A,
    pub r1_cross_t2: Vec3A,
    pub r2_cross_t1: Vec3A,
    pub r2_cross_t2: Vec3A,
    pub inverse_friction_1_mass: f32,
    pub inverse_friction_2_mass: f32,
    pub inverse_twist_friction_mass: f32,
    /// Tangent basis, right-handed with the normal:
    /// `friction_vector_1 x friction_vector_2 = normal`.
    pub friction_vector_1: Vec3A,
    pub friction_vector_2: Vec3A,
    pub old_friction_vector_1: Vec3A,
    pub old_friction_vector_2: Vec3A,
    pub friction_1_impulse: f32,
    pub friction_2_impulse: f32,
    pub friction_twist_impulse: f32,
    pub rolling_resistance_impulse: Vec3A,
    pub inverse_rolling_resistance: Mat3A,
}

impl ContactManifoldSolver {
    pub const DEFAULT: Self = Self {
        external_manifold_index: 0,
        body_index_1: 0,
        body_index_2: 0,
        mass_inverse_body_1: 0.,
        mass_inverse_body_2: 0.,
        inverse_inertia_tensor_body_1: Mat3A::ZERO,
        inverse_inertia_tensor_body_2: Mat3A::ZERO,
        nb_contacts: 0,
        friction_coefficient: 0.,
        rolling_resistance_factor: 0.,
        normal: Vec3A::ZERO,
        friction_point_body_1: Vec3A::ZERO,
        friction_point_body_2: Vec3A::ZERO,
        r1_friction: Vec3A::ZERO,
        r2_friction: Vec3A::ZERO,
        r1_cross_t1: Vec3A::ZERO,
        r1_cross_t2: Vec3A::ZERO,
        r2_cross_t1: Vec3A::ZERO,
        r2_cross_t2: Vec3A::ZERO,
        inverse_friction_1_mass: 0.,
        inverse_friction_2_mass: 0.,
        inverse_twist_friction_mass: 0.,
        friction_vector_1: Vec3A::ZERO,
        friction_vector_2: Vec3A::ZERO,
        old_friction_vector_1: Vec3A::ZERO,
        old_friction_vector_2: Vec3A::ZERO,
        friction_1_impulse: 0.,
        friction_2_impulse: 0.,
        friction_twist_impulse: 0.,
        rolling_resistance_impulse: Vec3A::ZERO,
        inverse_rolling_resistance: Mat3A::ZERO,
    };
}

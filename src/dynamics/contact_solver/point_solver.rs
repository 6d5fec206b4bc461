use glam::Vec3A;

/// Per-step scratch state of one contact point's penetration constraint.
pub struct ContactPointSolver {
    /// Index of the matching point in the external contact point list.
    pub external_contact_index: usize,
    pub normal: Vec3A,
    /// Lever arm from the first body's center of mass to the contact.
    pub r1: Vec3A,
    pub r2: Vec3A,
    pub penetration_depth: f32,
    pub restitution_bias: f32,
    pub penetration_impulse: f32,
    pub penetration_split_impulse: f32,
    pub inverse_penetration_mass: f32,
    /// `I1^-1 * (r1 x n)`, precomputed at init.
    pub i1_times_r1_cross_n: Vec3A,
    pub i2_times_r2_cross_n: Vec3A,
    pub is_resting_contact: bool,
}

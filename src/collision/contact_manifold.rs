use arrayvec::ArrayVec;
use glam::Vec3A;

use super::ContactPoint;
use crate::Entity;

/// Maximum number of coplanar contact points a manifold may carry.
pub const MAX_CONTACT_POINTS: usize = 4;

/// A set of up to [`MAX_CONTACT_POINTS`] contact points between one pair of
/// colliders, sharing a common normal direction.
///
/// Manifolds outlive the solver: the accumulated impulses and the friction
/// basis written back by `ContactSolver::store_impulses` seed the next step's
/// warm start as long as the narrow phase keeps the manifold alive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactManifold {
    pub body_entity_1: Entity,
    pub body_entity_2: Entity,
    pub collider_entity_1: Entity,
    pub collider_entity_2: Entity,
    /// Index of the first contact point in the global contact point list.
    pub contact_points_index: usize,
    pub nb_contact_points: usize,
    pub friction_impulse_1: f32,
    pub friction_impulse_2: f32,
    pub friction_twist_impulse: f32,
    pub rolling_resistance_impulse: Vec3A,
    pub friction_vector_1: Vec3A,
    pub friction_vector_2: Vec3A,
}

impl ContactManifold {
    #[must_use]
    pub fn new(
        body_entity_1: Entity,
        body_entity_2: Entity,
        collider_entity_1: Entity,
        collider_entity_2: Entity,
        contact_points_index: usize,
        nb_contact_points: usize,
    ) -> Self {
        debug_assert!(nb_contact_points >= 1 && nb_contact_points <= MAX_CONTACT_POINTS);

        Self {
            body_entity_1,
            body_entity_2,
            collider_entity_1,
            collider_entity_2,
            contact_points_index,
            nb_contact_points,
            friction_impulse_1: 0.,
            friction_impulse_2: 0.,
            friction_twist_impulse: 0.,
            rolling_resistance_impulse: Vec3A::ZERO,
            friction_vector_1: Vec3A::ZERO,
            friction_vector_2: Vec3A::ZERO,
        }
    }

    /// Appends `points` to the global contact point list and returns a fresh
    /// manifold referencing them.
    #[must_use]
    pub fn push_points(
        body_entity_1: Entity,
        body_entity_2: Entity,
        collider_entity_1: Entity,
        collider_entity_2: Entity,
        all_points: &mut Vec<ContactPoint>,
        points: ArrayVec<ContactPoint, MAX_CONTACT_POINTS>,
    ) -> Self {
        let contact_points_index = all_points.len();
        let nb_contact_points = points.len();
        all_points.extend(points);

        Self::new(
            body_entity_1,
            body_entity_2,
            collider_entity_1,
            collider_entity_2,
            contact_points_index,
            nb_contact_points,
        )
    }
}

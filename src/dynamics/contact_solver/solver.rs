use std::mem;

use glam::Vec3A;
use log::trace;

use super::{ContactManifoldSolver, ContactPointSolver, SolverConfig};
use crate::{
    collision::{ColliderComponents, ContactManifold, ContactPoint, Material},
    dynamics::{BodyType, Islands, RigidBodyComponents},
    linear_math::any_unit_orthogonal,
    memory::FramePool,
};

/// Projected Gauss-Seidel sequential impulse solver for contact constraints.
///
/// One step drives the four phases in order: [`init`](Self::init) builds the
/// per-step scratch records from the external manifolds and warm-starts the
/// constrained velocities, [`solve`](Self::solve) runs one impulse sweep and
/// is called once per velocity iteration, [`store_impulses`](Self::store_impulses)
/// writes the accumulated impulses back into the external manifolds for the
/// next step's warm start, and [`reset`](Self::reset) returns the scratch
/// buffers to the frame pool.
///
/// Penetration is resolved per contact point; friction, twist friction and
/// rolling resistance are resolved once per manifold at the contact centroid.
/// When split impulses are active, positional correction runs on the separate
/// split velocity fields and never feeds momentum back into the constrained
/// velocities.
pub struct ContactSolver {
    config: SolverConfig,
    time_step: f32,
    manifold_solvers: Vec<ContactManifoldSolver>,
    point_solvers: Vec<ContactPointSolver>,
    manifold_pool: FramePool<ContactManifoldSolver>,
    point_pool: FramePool<ContactPointSolver>,
}

impl Default for ContactSolver {
    fn default() -> Self {
        Self::new(SolverConfig::DEFAULT)
    }
}

impl ContactSolver {
    /// Baumgarte position correction factor.
    pub const BETA: f32 = 0.2;
    /// Position correction factor of the split impulse field.
    pub const BETA_SPLIT_IMPULSE: f32 = 0.2;
    /// Allowed penetration before position correction kicks in.
    pub const SLOP: f32 = 0.01;

    #[must_use]
    pub fn new(config: SolverConfig) -> Self {
        Self {
            config,
            time_step: 0.,
            manifold_solvers: Vec::new(),
            point_solvers: Vec::new(),
            manifold_pool: FramePool::new(),
            point_pool: FramePool::new(),
        }
    }

    #[must_use]
    pub const fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn set_is_split_impulse_active(&mut self, is_active: bool) {
        self.config.is_split_impulse_active = is_active;
    }

    /// Builds the per-step solver state for every island that has contacts,
    /// then warm-starts the constrained velocities from the impulses stored
    /// in the external manifolds.
    ///
    /// Must be called once per step before any [`solve`](Self::solve) sweep.
    pub fn init(
        &mut self,
        bodies: &mut RigidBodyComponents,
        colliders: &ColliderComponents,
        islands: &Islands,
        manifolds: &[ContactManifold],
        points: &mut [ContactPoint],
        time_step: f32,
    ) {
        debug_assert!(time_step > 0.);

        self.time_step = time_step;
        self.manifold_solvers = self.manifold_pool.allocate(manifolds.len());
        self.point_solvers = self.point_pool.allocate(points.len());

        if manifolds.is_empty() || points.is_empty() {
            return;
        }

        trace!(
            "contact solver init: {} manifolds, {} points, {} islands",
            manifolds.len(),
            points.len(),
            islands.nb_islands()
        );

        for island in 0..islands.nb_islands() {
            if islands.nb_contact_manifolds[island] > 0 {
                self.initialize_for_island(island, bodies, colliders, islands, manifolds, points);
            }
        }

        self.warm_start(bodies);
    }

    fn initialize_for_island(
        &mut self,
        island: usize,
        bodies: &RigidBodyComponents,
        colliders: &ColliderComponents,
        islands: &Islands,
        manifolds: &[ContactManifold],
        points: &mut [ContactPoint],
    ) {
        debug_assert!(!islands.island_bodies(island).is_empty());
        debug_assert!(islands.nb_contact_manifolds[island] > 0);

        let manifolds_index = islands.contact_manifolds_indices[island];
        let nb_manifolds = islands.nb_contact_manifolds[island];

        for manifold_index in manifolds_index..manifolds_index + nb_manifolds {
            let external_manifold = &manifolds[manifold_index];

            debug_assert!(external_manifold.nb_contact_points > 0);
            debug_assert_ne!(external_manifold.body_entity_1, external_manifold.body_entity_2);

            let i1 = bodies.entity_index(external_manifold.body_entity_1);
            let i2 = bodies.entity_index(external_manifold.body_entity_2);
            debug_assert!(!bodies.is_disabled[i1] && !bodies.is_disabled[i2]);

            let c1 = colliders.entity_index(external_manifold.collider_entity_1);
            let c2 = colliders.entity_index(external_manifold.collider_entity_2);

            let x1 = bodies.centers_of_mass_world[i1];
            let x2 = bodies.centers_of_mass_world[i2];
            let v1 = bodies.linear_velocities[i1];
            let w1 = bodies.angular_velocities[i1];
            let v2 = bodies.linear_velocities[i2];
            let w2 = bodies.angular_velocities[i2];

            let material_1 = &colliders.materials[c1];
            let material_2 = &colliders.materials[c2];
            let restitution_factor = mixed_restitution_factor(material_1, material_2);

            let mut manifold = ContactManifoldSolver {
                external_manifold_index: manifold_index,
                body_index_1: i1,
                body_index_2: i2,
                mass_inverse_body_1: bodies.inverse_masses[i1],
                mass_inverse_body_2: bodies.inverse_masses[i2],
                inverse_inertia_tensor_body_1: bodies.inverse_inertia_tensors_world[i1],
                inverse_inertia_tensor_body_2: bodies.inverse_inertia_tensors_world[i2],
                nb_contacts: external_manifold.nb_contact_points,
                friction_coefficient: mixed_friction_coefficient(material_1, material_2),
                rolling_resistance_factor: mixed_rolling_resistance(material_1, material_2),
                ..ContactManifoldSolver::DEFAULT
            };

            let transform_1 = colliders.local_to_world_transforms[c1];
            let transform_2 = colliders.local_to_world_transforms[c2];

            let points_index = external_manifold.contact_points_index;
            for point_index in points_index..points_index + external_manifold.nb_contact_points {
                let external_contact = &mut points[point_index];

                // World contact location on each shape
                let p1 = transform_1.transform_point3a(external_contact.local_point_on_shape_1);
                let p2 = transform_2.transform_point3a(external_contact.local_point_on_shape_2);

                let normal = external_contact.normal;
                let r1 = p1 - x1;
                let r2 = p2 - x2;

                let is_resting_contact = external_contact.is_resting_contact;
                // The point warm-starts the next step if the narrow phase
                // keeps it alive
                external_contact.is_resting_contact = true;

                manifold.friction_point_body_1 += p1;
                manifold.friction_point_body_2 += p2;

                let delta_v = v2 + w2.cross(r2) - v1 - w1.cross(r1);

                let r1_cross_n = r1.cross(normal);
                let r2_cross_n = r2.cross(normal);
                let i1_times_r1_cross_n = manifold.inverse_inertia_tensor_body_1 * r1_cross_n;
                let i2_times_r2_cross_n = manifold.inverse_inertia_tensor_body_2 * r2_cross_n;

                let penetration_mass = manifold.mass_inverse_body_1
                    + manifold.mass_inverse_body_2
                    + i1_times_r1_cross_n.cross(r1).dot(normal)
                    + i2_times_r2_cross_n.cross(r2).dot(normal);

                // Restitution uses the relative velocity at the beginning of
                // the contact, so the bias is computed here rather than in
                // solve(). Resting contacts (normal speed below the
                // threshold) get no bounce.
                let delta_v_dot_n = delta_v.dot(normal);
                let restitution_bias = if delta_v_dot_n < -self.config.restitution_velocity_threshold
                {
                    restitution_factor * delta_v_dot_n
                } else {
                    0.
                };

                manifold.normal += normal;

                self.point_solvers.push(ContactPointSolver {
                    external_contact_index: point_index,
                    normal,
                    r1,
                    r2,
                    penetration_depth: external_contact.penetration_depth,
                    restitution_bias,
                    penetration_impulse: external_contact.penetration_impulse,
                    penetration_split_impulse: 0.,
                    inverse_penetration_mass: if penetration_mass > 0. {
                        1. / penetration_mass
                    } else {
                        0.
                    },
                    i1_times_r1_cross_n,
                    i2_times_r2_cross_n,
                    is_resting_contact,
                });
            }

            let nb_contacts = manifold.nb_contacts as f32;
            manifold.friction_point_body_1 /= nb_contacts;
            manifold.friction_point_body_2 /= nb_contacts;
            manifold.r1_friction = manifold.friction_point_body_1 - x1;
            manifold.r2_friction = manifold.friction_point_body_2 - x2;

            manifold.old_friction_vector_1 = external_manifold.friction_vector_1;
            manifold.old_friction_vector_2 = external_manifold.friction_vector_2;

            // Seed the accumulators with the previous step's impulses
            manifold.friction_1_impulse = external_manifold.friction_impulse_1;
            manifold.friction_2_impulse = external_manifold.friction_impulse_2;
            manifold.friction_twist_impulse = external_manifold.friction_twist_impulse;
            manifold.rolling_resistance_impulse = external_manifold.rolling_resistance_impulse;

            let is_body_1_dynamic = bodies.body_types[i1] == BodyType::Dynamic;
            let is_body_2_dynamic = bodies.body_types[i2] == BodyType::Dynamic;
            if manifold.rolling_resistance_factor > 0. && (is_body_1_dynamic || is_body_2_dynamic) {
                let rolling_resistance = manifold.inverse_inertia_tensor_body_1
                    + manifold.inverse_inertia_tensor_body_2;
                let det = rolling_resistance.determinant();

                // Keep the matrix zeroed if it is not invertible
                if det.abs() > f32::EPSILON {
                    manifold.inverse_rolling_resistance = rolling_resistance.inverse();
                }
            }

            debug_assert!(manifold.normal.length_squared() > 0.);
            manifold.normal = manifold.normal.normalize();

            let delta_v_friction_point = v2 + w2.cross(manifold.r2_friction)
                - v1
                - w1.cross(manifold.r1_friction);
            compute_friction_vectors(delta_v_friction_point, &mut manifold);

            manifold.r1_cross_t1 = manifold.r1_friction.cross(manifold.friction_vector_1);
            manifold.r1_cross_t2 = manifold.r1_friction.cross(manifold.friction_vector_2);
            manifold.r2_cross_t1 = manifold.r2_friction.cross(manifold.friction_vector_1);
            manifold.r2_cross_t2 = manifold.r2_friction.cross(manifold.friction_vector_2);

            let friction_1_mass = manifold.mass_inverse_body_1
                + manifold.mass_inverse_body_2
                + (manifold.inverse_inertia_tensor_body_1 * manifold.r1_cross_t1)
                    .cross(manifold.r1_friction)
                    .dot(manifold.friction_vector_1)
                + (manifold.inverse_inertia_tensor_body_2 * manifold.r2_cross_t1)
                    .cross(manifold.r2_friction)
                    .dot(manifold.friction_vector_1);
            let friction_2_mass = manifold.mass_inverse_body_1
                + manifold.mass_inverse_body_2
                + (manifold.inverse_inertia_tensor_body_1 * manifold.r1_cross_t2)
                    .cross(manifold.r1_friction)
                    .dot(manifold.friction_vector_2)
                + (manifold.inverse_inertia_tensor_body_2 * manifold.r2_cross_t2)
                    .cross(manifold.r2_friction)
                    .dot(manifold.friction_vector_2);
            let twist_friction_mass = manifold
                .normal
                .dot(manifold.inverse_inertia_tensor_body_1 * manifold.normal)
                + manifold
                    .normal
                    .dot(manifold.inverse_inertia_tensor_body_2 * manifold.normal);

            manifold.inverse_friction_1_mass = if friction_1_mass > 0. {
                1. / friction_1_mass
            } else {
                0.
            };
            manifold.inverse_friction_2_mass = if friction_2_mass > 0. {
                1. / friction_2_mass
            } else {
                0.
            };
            manifold.inverse_twist_friction_mass = if twist_friction_mass > 0. {
                1. / twist_friction_mass
            } else {
                0.
            };

            self.manifold_solvers.push(manifold);
        }
    }

    /// Applies the previous step's impulses to the constrained velocities so
    /// the iterative solve starts close to the solution.
    fn warm_start(&mut self, bodies: &mut RigidBodyComponents) {
        let mut point_index = 0;

        for manifold in &mut self.manifold_solvers {
            let i1 = manifold.body_index_1;
            let i2 = manifold.body_index_2;

            let mut at_least_one_resting_contact = false;

            for _ in 0..manifold.nb_contacts {
                let point = &mut self.point_solvers[point_index];
                point_index += 1;

                if point.is_resting_contact {
                    at_least_one_resting_contact = true;

                    let impulse = point.normal * point.penetration_impulse;
                    bodies.constrained_linear_velocities[i1] -=
                        manifold.mass_inverse_body_1 * impulse;
                    bodies.constrained_angular_velocities[i1] -=
                        point.i1_times_r1_cross_n * point.penetration_impulse;
                    bodies.constrained_linear_velocities[i2] +=
                        manifold.mass_inverse_body_2 * impulse;
                    bodies.constrained_angular_velocities[i2] +=
                        point.i2_times_r2_cross_n * point.penetration_impulse;
                } else {
                    // New contact point, nothing to warm-start from
                    point.penetration_impulse = 0.;
                }
            }

            if at_least_one_resting_contact {
                // The tangent basis changes between steps, so project the old
                // friction impulse onto the new basis before applying it
                let old_friction_impulse = manifold.friction_1_impulse
                    * manifold.old_friction_vector_1
                    + manifold.friction_2_impulse * manifold.old_friction_vector_2;
                manifold.friction_1_impulse = old_friction_impulse.dot(manifold.friction_vector_1);
                manifold.friction_2_impulse = old_friction_impulse.dot(manifold.friction_vector_2);

                // First friction constraint at the manifold centroid
                let linear_impulse = manifold.friction_vector_1 * manifold.friction_1_impulse;
                let angular_impulse_body_1 = -manifold.r1_cross_t1 * manifold.friction_1_impulse;
                let angular_impulse_body_2 = manifold.r2_cross_t1 * manifold.friction_1_impulse;

                bodies.constrained_linear_velocities[i1] -=
                    manifold.mass_inverse_body_1 * linear_impulse;
                bodies.constrained_angular_velocities[i1] +=
                    manifold.inverse_inertia_tensor_body_1 * angular_impulse_body_1;
                bodies.constrained_linear_velocities[i2] +=
                    manifold.mass_inverse_body_2 * linear_impulse;
                bodies.constrained_angular_velocities[i2] +=
                    manifold.inverse_inertia_tensor_body_2 * angular_impulse_body_2;

                // Second friction constraint at the manifold centroid
                let linear_impulse = manifold.friction_vector_2 * manifold.friction_2_impulse;
                let angular_impulse_body_1 = -manifold.r1_cross_t2 * manifold.friction_2_impulse;
                let angular_impulse_body_2 = manifold.r2_cross_t2 * manifold.friction_2_impulse;

                bodies.constrained_linear_velocities[i1] -=
                    manifold.mass_inverse_body_1 * linear_impulse;
                bodies.constrained_angular_velocities[i1] +=
                    manifold.inverse_inertia_tensor_body_1 * angular_impulse_body_1;
                bodies.constrained_linear_velocities[i2] +=
                    manifold.mass_inverse_body_2 * linear_impulse;
                bodies.constrained_angular_velocities[i2] +=
                    manifold.inverse_inertia_tensor_body_2 * angular_impulse_body_2;

                // Twist friction constraint
                let angular_impulse = manifold.normal * manifold.friction_twist_impulse;
                bodies.constrained_angular_velocities[i1] -=
                    manifold.inverse_inertia_tensor_body_1 * angular_impulse;
                bodies.constrained_angular_velocities[i2] +=
                    manifold.inverse_inertia_tensor_body_2 * angular_impulse;

                // Rolling resistance constraint
                let rolling_impulse = manifold.rolling_resistance_impulse;
                bodies.constrained_angular_velocities[i1] -=
                    manifold.inverse_inertia_tensor_body_1 * rolling_impulse;
                bodies.constrained_angular_velocities[i2] +=
                    manifold.inverse_inertia_tensor_body_2 * rolling_impulse;
            } else {
                // New manifold, start the accumulators from zero
                manifold.friction_1_impulse = 0.;
                manifold.friction_2_impulse = 0.;
                manifold.friction_twist_impulse = 0.;
                manifold.rolling_resistance_impulse = Vec3A::ZERO;
            }
        }
    }

    /// Runs one projected Gauss-Seidel sweep over every manifold.
    ///
    /// Call once per velocity iteration. Within a sweep each manifold applies
    /// its per-point penetration corrections first, then the centroid
    /// friction, twist and rolling constraints; the friction limits use the
    /// penetration impulse sum of the same sweep.
    pub fn solve(&mut self, bodies: &mut RigidBodyComponents) {
        let is_split_impulse_active = self.config.is_split_impulse_active;
        let beta = if is_split_impulse_active {
            Self::BETA_SPLIT_IMPULSE
        } else {
            Self::BETA
        };

        let mut point_index = 0;

        for manifold in &mut self.manifold_solvers {
            let i1 = manifold.body_index_1;
            let i2 = manifold.body_index_2;

            let mut v1 = bodies.constrained_linear_velocities[i1];
            let mut w1 = bodies.constrained_angular_velocities[i1];
            let mut v2 = bodies.constrained_linear_velocities[i2];
            let mut w2 = bodies.constrained_angular_velocities[i2];

            let mut v1_split = bodies.split_linear_velocities[i1];
            let mut w1_split = bodies.split_angular_velocities[i1];
            let mut v2_split = bodies.split_linear_velocities[i2];
            let mut w2_split = bodies.split_angular_velocities[i2];

            let mut sum_penetration_impulse = 0.;

            for _ in 0..manifold.nb_contacts {
                let point = &mut self.point_solvers[point_index];
                point_index += 1;

                // Penetration constraint
                let delta_v = v2 + w2.cross(point.r2) - v1 - w1.cross(point.r1);
                let jv = delta_v.dot(point.normal);

                let bias_penetration_depth = if point.penetration_depth > Self::SLOP {
                    -(beta / self.time_step) * (point.penetration_depth - Self::SLOP).max(0.)
                } else {
                    0.
                };

                let mut delta_lambda = if is_split_impulse_active {
                    -(jv + point.restitution_bias) * point.inverse_penetration_mass
                } else {
                    -(jv + bias_penetration_depth + point.restitution_bias)
                        * point.inverse_penetration_mass
                };
                let lambda = (point.penetration_impulse + delta_lambda).max(0.);
                delta_lambda = lambda - point.penetration_impulse;
                point.penetration_impulse = lambda;

                let linear_impulse = point.normal * delta_lambda;
                v1 -= manifold.mass_inverse_body_1 * linear_impulse;
                w1 -= point.i1_times_r1_cross_n * delta_lambda;
                v2 += manifold.mass_inverse_body_2 * linear_impulse;
                w2 += point.i2_times_r2_cross_n * delta_lambda;

                sum_penetration_impulse += point.penetration_impulse;

                if is_split_impulse_active {
                    // Position correction in the split velocity fields
                    let delta_v_split =
                        v2_split + w2_split.cross(point.r2) - v1_split - w1_split.cross(point.r1);
                    let jv_split = delta_v_split.dot(point.normal);

                    let mut delta_lambda_split = -(jv_split + bias_penetration_depth)
                        * point.inverse_penetration_mass;
                    let lambda_split = (point.penetration_split_impulse + delta_lambda_split).max(0.);
                    delta_lambda_split = lambda_split - point.penetration_split_impulse;
                    point.penetration_split_impulse = lambda_split;

                    let linear_impulse = point.normal * delta_lambda_split;
                    v1_split -= manifold.mass_inverse_body_1 * linear_impulse;
                    w1_split -= point.i1_times_r1_cross_n * delta_lambda_split;
                    v2_split += manifold.mass_inverse_body_2 * linear_impulse;
                    w2_split += point.i2_times_r2_cross_n * delta_lambda_split;
                }
            }

            let friction_limit = manifold.friction_coefficient * sum_penetration_impulse;

            // First friction constraint at the manifold centroid
            let delta_v =
                v2 + w2.cross(manifold.r2_friction) - v1 - w1.cross(manifold.r1_friction);
            let jv = delta_v.dot(manifold.friction_vector_1);

            let mut delta_lambda = -jv * manifold.inverse_friction_1_mass;
            let lambda = (manifold.friction_1_impulse + delta_lambda)
                .clamp(-friction_limit, friction_limit);
            delta_lambda = lambda - manifold.friction_1_impulse;
            manifold.friction_1_impulse = lambda;

            let linear_impulse = manifold.friction_vector_1 * delta_lambda;
            v1 -= manifold.mass_inverse_body_1 * linear_impulse;
            w1 += manifold.inverse_inertia_tensor_body_1 * (-manifold.r1_cross_t1 * delta_lambda);
            v2 += manifold.mass_inverse_body_2 * linear_impulse;
            w2 += manifold.inverse_inertia_tensor_body_2 * (manifold.r2_cross_t1 * delta_lambda);

            // Second friction constraint at the manifold centroid
            let delta_v =
                v2 + w2.cross(manifold.r2_friction) - v1 - w1.cross(manifold.r1_friction);
            let jv = delta_v.dot(manifold.friction_vector_2);

            let mut delta_lambda = -jv * manifold.inverse_friction_2_mass;
            let lambda = (manifold.friction_2_impulse + delta_lambda)
                .clamp(-friction_limit, friction_limit);
            delta_lambda = lambda - manifold.friction_2_impulse;
            manifold.friction_2_impulse = lambda;

            let linear_impulse = manifold.friction_vector_2 * delta_lambda;
            v1 -= manifold.mass_inverse_body_1 * linear_impulse;
            w1 += manifold.inverse_inertia_tensor_body_1 * (-manifold.r1_cross_t2 * delta_lambda);
            v2 += manifold.mass_inverse_body_2 * linear_impulse;
            w2 += manifold.inverse_inertia_tensor_body_2 * (manifold.r2_cross_t2 * delta_lambda);

            // Twist friction constraint around the manifold normal
            let jv = (w2 - w1).dot(manifold.normal);

            let mut delta_lambda = -jv * manifold.inverse_twist_friction_mass;
            let lambda = (manifold.friction_twist_impulse + delta_lambda)
                .clamp(-friction_limit, friction_limit);
            delta_lambda = lambda - manifold.friction_twist_impulse;
            manifold.friction_twist_impulse = lambda;

            let angular_impulse = manifold.normal * delta_lambda;
            w1 -= manifold.inverse_inertia_tensor_body_1 * angular_impulse;
            w2 += manifold.inverse_inertia_tensor_body_2 * angular_impulse;

            // Rolling resistance constraint
            if manifold.rolling_resistance_factor > 0. {
                let jv_rolling = w2 - w1;

                let mut delta_lambda_rolling =
                    manifold.inverse_rolling_resistance * -jv_rolling;
                let rolling_limit = manifold.rolling_resistance_factor * sum_penetration_impulse;
                let lambda_rolling = (manifold.rolling_resistance_impulse + delta_lambda_rolling)
                    .clamp(Vec3A::splat(-rolling_limit), Vec3A::splat(rolling_limit));
                delta_lambda_rolling = lambda_rolling - manifold.rolling_resistance_impulse;
                manifold.rolling_resistance_impulse = lambda_rolling;

                w1 -= manifold.inverse_inertia_tensor_body_1 * delta_lambda_rolling;
                w2 += manifold.inverse_inertia_tensor_body_2 * delta_lambda_rolling;
            }

            // Gate locked axes once per manifold pass
            v1 *= bodies.linear_velocity_factors[i1];
            w1 *= bodies.angular_velocity_factors[i1];
            v2 *= bodies.linear_velocity_factors[i2];
            w2 *= bodies.angular_velocity_factors[i2];

            bodies.constrained_linear_velocities[i1] = v1;
            bodies.constrained_angular_velocities[i1] = w1;
            bodies.constrained_linear_velocities[i2] = v2;
            bodies.constrained_angular_velocities[i2] = w2;

            if is_split_impulse_active {
                bodies.split_linear_velocities[i1] = v1_split;
                bodies.split_angular_velocities[i1] = w1_split;
                bodies.split_linear_velocities[i2] = v2_split;
                bodies.split_angular_velocities[i2] = w2_split;
            }
        }
    }

    /// Writes the accumulated impulses and the tangent basis back into the
    /// external manifolds and contact points, to warm-start the next step.
    pub fn store_impulses(&self, manifolds: &mut [ContactManifold], points: &mut [ContactPoint]) {
        let mut point_index = 0;

        for manifold in &self.manifold_solvers {
            for _ in 0..manifold.nb_contacts {
                let point = &self.point_solvers[point_index];
                point_index += 1;

                points[point.external_contact_index].penetration_impulse =
                    point.penetration_impulse;
            }

            let external_manifold = &mut manifolds[manifold.external_manifold_index];
            external_manifold.friction_impulse_1 = manifold.friction_1_impulse;
            external_manifold.friction_impulse_2 = manifold.friction_2_impulse;
            external_manifold.friction_twist_impulse = manifold.friction_twist_impulse;
            external_manifold.rolling_resistance_impulse = manifold.rolling_resistance_impulse;
            external_manifold.friction_vector_1 = manifold.friction_vector_1;
            external_manifold.friction_vector_2 = manifold.friction_vector_2;
        }
    }

    /// Releases the per-step scratch state back to the frame pool.
    pub fn reset(&mut self) {
        self.point_pool.release(mem::take(&mut self.point_solvers));
        self.manifold_pool
            .release(mem::take(&mut self.manifold_solvers));
    }
}

/// Computes the two unit vectors spanning the friction plane of a manifold,
/// such that `friction_vector_1 x friction_vector_2 = normal`.
///
/// The first vector follows the tangential relative velocity when there is
/// one, so the friction impulse aligns with the sliding direction.
fn compute_friction_vectors(delta_velocity: Vec3A, manifold: &mut ContactManifoldSolver) {
    debug_assert!(manifold.normal.length_squared() > 0.);

    let normal_velocity = delta_velocity.dot(manifold.normal) * manifold.normal;
    let tangent_velocity = delta_velocity - normal_velocity;

    let tangent_speed = tangent_velocity.length();
    manifold.friction_vector_1 = if tangent_speed > f32::EPSILON {
        tangent_velocity / tangent_speed
    } else {
        any_unit_orthogonal(manifold.normal)
    };

    manifold.friction_vector_2 = manifold.normal.cross(manifold.friction_vector_1).normalize();
}

/// The largest restitution factor of the two surfaces wins.
fn mixed_restitution_factor(material_1: &Material, material_2: &Material) -> f32 {
    material_1.bounciness.max(material_2.bounciness)
}

/// Geometric mean of the two friction coefficients.
fn mixed_friction_coefficient(material_1: &Material, material_2: &Material) -> f32 {
    (material_1.friction_coefficient * material_2.friction_coefficient).sqrt()
}

fn mixed_rolling_resistance(material_1: &Material, material_2: &Material) -> f32 {
    0.5 * (material_1.rolling_resistance + material_2.rolling_resistance)
}

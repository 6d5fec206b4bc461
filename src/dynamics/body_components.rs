use ahash::AHashMap;
use glam::{Mat3A, Vec3A};

use crate::Entity;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BodyType {
    /// Infinite mass, never moves.
    Static,
    /// Infinite mass, moved by the caller.
    Kinematic,
    Dynamic,
}

/// Construction parameters for one rigid body row.
#[derive(Debug, Clone, Copy)]
pub struct RigidBodyInfo {
    pub body_type: BodyType,
    pub center_of_mass_world: Vec3A,
    pub linear_velocity: Vec3A,
    pub angular_velocity: Vec3A,
    pub mass: f32,
    /// Diagonal of the local-space inertia tensor.
    pub local_inertia: Vec3A,
    pub orientation: Mat3A,
    pub linear_velocity_factor: Vec3A,
    pub angular_velocity_factor: Vec3A,
}

impl Default for RigidBodyInfo {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl RigidBodyInfo {
    pub const DEFAULT: Self = Self {
        body_type: BodyType::Dynamic,
        center_of_mass_world: Vec3A::ZERO,
        linear_velocity: Vec3A::ZERO,
        angular_velocity: Vec3A::ZERO,
        mass: 1.,
        local_inertia: Vec3A::ONE,
        orientation: Mat3A::IDENTITY,
        linear_velocity_factor: Vec3A::ONE,
        angular_velocity_factor: Vec3A::ONE,
    };

    #[must_use]
    pub fn new_dynamic(mass: f32, local_inertia: Vec3A, center_of_mass_world: Vec3A) -> Self {
        Self {
            mass,
            local_inertia,
            center_of_mass_world,
            ..Self::DEFAULT
        }
    }

    #[must_use]
    pub fn new_static(center_of_mass_world: Vec3A) -> Self {
        Self {
            body_type: BodyType::Static,
            mass: 0.,
            local_inertia: Vec3A::ZERO,
            center_of_mass_world,
            ..Self::DEFAULT
        }
    }
}

/// Structure-of-arrays store for rigid body state.
///
/// The contact solver reads the step-start snapshot (positions, velocities,
/// masses, inertia, per-axis velocity factors) and mutates only the four
/// working velocity fields: `constrained_*` for momentum and `split_*` for
/// positional correction. Callers running islands in parallel must hand each
/// worker a disjoint set of rows.
#[derive(Debug, Clone, Default)]
pub struct RigidBodyComponents {
    entity_to_index: AHashMap<Entity, usize>,
    pub body_types: Vec<BodyType>,
    pub is_disabled: Vec<bool>,
    pub centers_of_mass_world: Vec<Vec3A>,
    pub linear_velocities: Vec<Vec3A>,
    pub angular_velocities: Vec<Vec3A>,
    pub constrained_linear_velocities: Vec<Vec3A>,
    pub constrained_angular_velocities: Vec<Vec3A>,
    pub split_linear_velocities: Vec<Vec3A>,
    pub split_angular_velocities: Vec<Vec3A>,
    pub inverse_masses: Vec<f32>,
    pub inverse_inertia_locals: Vec<Vec3A>,
    pub inverse_inertia_tensors_world: Vec<Mat3A>,
    /// Per-axis gates in `[0, 1]` applied to the constrained linear
    /// velocities, 0 locking the axis.
    pub linear_velocity_factors: Vec<Vec3A>,
    pub angular_velocity_factors: Vec<Vec3A>,
}

impl RigidBodyComponents {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a body and returns its row index.
    pub fn add_body(&mut self, entity: Entity, info: RigidBodyInfo) -> usize {
        debug_assert!(!self.entity_to_index.contains_key(&entity));

        let is_dynamic = info.body_type == BodyType::Dynamic;
        let inverse_mass = if is_dynamic && info.mass > 0. {
            1. / info.mass
        } else {
            0.
        };

        let inverse_inertia_local = if is_dynamic {
            inverse_diagonal(info.local_inertia)
        } else {
            Vec3A::ZERO
        };

        let index = self.body_types.len();
        self.entity_to_index.insert(entity, index);
        self.body_types.push(info.body_type);
        self.is_disabled.push(false);
        self.centers_of_mass_world.push(info.center_of_mass_world);
        self.linear_velocities.push(info.linear_velocity);
        self.angular_velocities.push(info.angular_velocity);
        self.constrained_linear_velocities.push(Vec3A::ZERO);
        self.constrained_angular_velocities.push(Vec3A::ZERO);
        self.split_linear_velocities.push(Vec3A::ZERO);
        self.split_angular_velocities.push(Vec3A::ZERO);
        self.inverse_masses.push(inverse_mass);
        self.inverse_inertia_locals.push(inverse_inertia_local);
        self.inverse_inertia_tensors_world
            .push(world_inertia_inverse(info.orientation, inverse_inertia_local));
        self.linear_velocity_factors.push(info.linear_velocity_factor);
        self.angular_velocity_factors.push(info.angular_velocity_factor);
        index
    }

    #[must_use]
    pub fn entity_index(&self, entity: Entity) -> usize {
        self.entity_to_index[&entity]
    }

    #[must_use]
    pub fn nb_bodies(&self) -> usize {
        self.body_types.len()
    }

    /// Recomputes the world-space inverse inertia tensor after the caller
    /// rotated the body.
    pub fn update_world_inertia(&mut self, entity: Entity, orientation: Mat3A) {
        let index = self.entity_index(entity);
        self.inverse_inertia_tensors_world[index] =
            world_inertia_inverse(orientation, self.inverse_inertia_locals[index]);
    }

    /// Seeds the constrained velocity fields with the step-start velocities.
    /// Must run before the solver each step.
    pub fn sync_constrained_velocities(&mut self) {
        self.constrained_linear_velocities
            .copy_from_slice(&self.linear_velocities);
        self.constrained_angular_velocities
            .copy_from_slice(&self.angular_velocities);
    }

    /// Zeroes the split velocity fields. Positional correction accumulates
    /// into them over one step only.
    pub fn reset_split_velocities(&mut self) {
        self.split_linear_velocities.fill(Vec3A::ZERO);
        self.split_angular_velocities.fill(Vec3A::ZERO);
    }
}

fn inverse_diagonal(inertia: Vec3A) -> Vec3A {
    Vec3A::new(
        if inertia.x == 0. { 0. } else { 1. / inertia.x },
        if inertia.y == 0. { 0. } else { 1. / inertia.y },
        if inertia.z == 0. { 0. } else { 1. / inertia.z },
    )
}

/// `R * diag(inverse local inertia) * R^T`.
fn world_inertia_inverse(orientation: Mat3A, inverse_inertia_local: Vec3A) -> Mat3A {
    Mat3A::from_cols(
        orientation.x_axis * inverse_inertia_local.x,
        orientation.y_axis * inverse_inertia_local.y,
        orientation.z_axis * inverse_inertia_local.z,
    ) * orientation.transpose()
}

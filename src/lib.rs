//! Contact constraint resolution for 3D rigid body simulation.
//!
//! The crate is built around [`ContactSolver`], a projected Gauss-Seidel
//! sequential impulse solver that resolves penetration, restitution, Coulomb
//! friction, twist friction and rolling resistance for the contact manifolds
//! of one physics step. Bodies live in a structure-of-arrays component store
//! so that disjoint islands can be solved in parallel by the caller.

pub mod collision;
pub mod dynamics;
pub mod memory;

mod entity;
pub(crate) mod linear_math;

pub use entity::Entity;

pub use collision::{
    ColliderComponents, ContactManifold, ContactPoint, MAX_CONTACT_POINTS, Material,
};
pub use dynamics::{
    BodyType, ContactSolver, Islands, RigidBodyComponents, RigidBodyInfo, SolverConfig,
};

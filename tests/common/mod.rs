#![allow(dead_code)]

use arrayvec::ArrayVec;
use glam::{Affine3A, Vec3A};
use impulse3d::{
    ColliderComponents, ContactManifold, ContactPoint, ContactSolver, Entity, Islands, Material,
    RigidBodyComponents, RigidBodyInfo, SolverConfig,
};

pub const DT: f32 = 1.0 / 60.0;

/// All the stores the solver consumes, plus a minimal stepping driver
/// standing in for the engine around it.
pub struct TestWorld {
    pub bodies: RigidBodyComponents,
    pub colliders: ColliderComponents,
    pub islands: Islands,
    pub manifolds: Vec<ContactManifold>,
    pub points: Vec<ContactPoint>,
    pub solver: ContactSolver,
    body_entities: Vec<Entity>,
    next_id: u64,
}

impl TestWorld {
    pub fn new(config: SolverConfig) -> Self {
        let _ = env_logger::builder().is_test(true).try_init();

        Self {
            bodies: RigidBodyComponents::new(),
            colliders: ColliderComponents::new(),
            islands: Islands::new(),
            manifolds: Vec::new(),
            points: Vec::new(),
            solver: ContactSolver::new(config),
            body_entities: Vec::new(),
            next_id: 0,
        }
    }

    /// Adds a body with one collider placed at its center of mass. Returns
    /// the body and collider entities.
    pub fn add_body(&mut self, info: RigidBodyInfo, material: Material) -> (Entity, Entity) {
        let body = Entity::new(self.next_id);
        let collider = Entity::new(self.next_id + 1);
        self.next_id += 2;

        self.bodies.add_body(body, info);
        self.colliders.add_collider(
            collider,
            body,
            Affine3A::from_translation(info.center_of_mass_world.into()),
            material,
        );
        self.body_entities.push(body);
        (body, collider)
    }

    pub fn add_manifold(
        &mut self,
        (body_1, collider_1): (Entity, Entity),
        (body_2, collider_2): (Entity, Entity),
        points: &[ContactPoint],
    ) -> usize {
        let mut buf = ArrayVec::new();
        buf.try_extend_from_slice(points).unwrap();

        let manifold = ContactManifold::push_points(
            body_1,
            body_2,
            collider_1,
            collider_2,
            &mut self.points,
            buf,
        );
        self.manifolds.push(manifold);
        self.manifolds.len() - 1
    }

    /// Registers every body and every manifold as one island.
    pub fn build_single_island(&mut self) {
        self.islands.clear();
        self.islands.add_island(0, self.manifolds.len());
        for &body in &self.body_entities {
            self.islands.add_body_to_island(body);
        }
    }

    /// Runs the four solver phases for one step with `nb_iterations` velocity
    /// sweeps.
    pub fn run_solver(&mut self, nb_iterations: usize) {
        self.bodies.sync_constrained_velocities();
        self.bodies.reset_split_velocities();

        self.solver.init(
            &mut self.bodies,
            &self.colliders,
            &self.islands,
            &self.manifolds,
            &mut self.points,
            DT,
        );
        for _ in 0..nb_iterations {
            self.solver.solve(&mut self.bodies);
        }
        self.solver.store_impulses(&mut self.manifolds, &mut self.points);
        self.solver.reset();
    }

    /// Init (including the internal warm start) and write-back only, no
    /// velocity sweep.
    pub fn init_and_store(&mut self) {
        self.bodies.sync_constrained_velocities();
        self.bodies.reset_split_velocities();

        self.solver.init(
            &mut self.bodies,
            &self.colliders,
            &self.islands,
            &self.manifolds,
            &mut self.points,
            DT,
        );
        self.solver.store_impulses(&mut self.manifolds, &mut self.points);
        self.solver.reset();
    }

    /// Commits the solved velocities as the bodies' step-start velocities,
    /// the way the integrator would after a step.
    pub fn finalize_velocities(&mut self) {
        let constrained = self.bodies.constrained_linear_velocities.clone();
        self.bodies.linear_velocities.copy_from_slice(&constrained);
        let constrained = self.bodies.constrained_angular_velocities.clone();
        self.bodies.angular_velocities.copy_from_slice(&constrained);
    }

    /// Moves a body's center of mass and keeps its collider transform in
    /// sync.
    pub fn set_body_position(&mut self, body: Entity, collider: Entity, center_of_mass: Vec3A) {
        let index = self.bodies.entity_index(body);
        self.bodies.centers_of_mass_world[index] = center_of_mass;
        self.colliders
            .set_local_to_world_transform(collider, Affine3A::from_translation(center_of_mass.into()));
    }

    pub fn linear_velocity(&self, body: Entity) -> Vec3A {
        self.bodies.constrained_linear_velocities[self.bodies.entity_index(body)]
    }

    pub fn angular_velocity(&self, body: Entity) -> Vec3A {
        self.bodies.constrained_angular_velocities[self.bodies.entity_index(body)]
    }

    pub fn split_linear_velocity(&self, body: Entity) -> Vec3A {
        self.bodies.split_linear_velocities[self.bodies.entity_index(body)]
    }

    pub fn manifold_points(&self, manifold_index: usize) -> &[ContactPoint] {
        let manifold = &self.manifolds[manifold_index];
        &self.points
            [manifold.contact_points_index..manifold.contact_points_index + manifold.nb_contact_points]
    }

    /// Accumulated penetration impulse of one manifold, as stored by the last
    /// `store_impulses`.
    pub fn sum_penetration_impulses(&self, manifold_index: usize) -> f32 {
        self.manifold_points(manifold_index)
            .iter()
            .map(|point| point.penetration_impulse)
            .sum()
    }
}

/// Four coplanar contact points under an axis-aligned box of the given half
/// extents, resting on a surface whose collider frame is the world frame.
pub fn box_support_points(
    half_extents: Vec3A,
    foot_print: f32,
    normal: Vec3A,
    depth: f32,
) -> Vec<ContactPoint> {
    [(1., 1.), (-1., 1.), (-1., -1.), (1., -1.)]
        .iter()
        .map(|&(sx, sz)| {
            ContactPoint::new(
                Vec3A::new(sx * foot_print, 0., sz * foot_print),
                Vec3A::new(sx * foot_print, -half_extents.y, sz * foot_print),
                normal,
                depth,
            )
        })
        .collect()
}

use crate::Entity;

/// Table of simulation islands: disjoint groups of bodies connected by
/// contacts, each referencing a contiguous run of the step's manifold array.
///
/// Built by the caller once per step; the solver only reads it. Disjointness
/// is what allows different islands to be solved in parallel.
#[derive(Debug, Clone, Default)]
pub struct Islands {
    /// Index of each island's first manifold in the global manifold array.
    pub contact_manifolds_indices: Vec<usize>,
    pub nb_contact_manifolds: Vec<usize>,
    body_entities: Vec<Entity>,
    body_start_indices: Vec<usize>,
    nb_bodies: Vec<usize>,
}

impl Islands {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn nb_islands(&self) -> usize {
        self.contact_manifolds_indices.len()
    }

    /// Starts a new island whose manifolds are
    /// `[contact_manifolds_index, contact_manifolds_index + nb_manifolds)` in
    /// the global array. Returns the island index.
    pub fn add_island(&mut self, contact_manifolds_index: usize, nb_manifolds: usize) -> usize {
        let island = self.contact_manifolds_indices.len();
        self.contact_manifolds_indices.push(contact_manifolds_index);
        self.nb_contact_manifolds.push(nb_manifolds);
        self.body_start_indices.push(self.body_entities.len());
        self.nb_bodies.push(0);
        island
    }

    /// Adds a body to the most recently created island.
    pub fn add_body_to_island(&mut self, entity: Entity) {
        debug_assert!(!self.nb_bodies.is_empty());

        self.body_entities.push(entity);
        *self.nb_bodies.last_mut().unwrap() += 1;
    }

    #[must_use]
    pub fn island_bodies(&self, island: usize) -> &[Entity] {
        let start = self.body_start_indices[island];
        &self.body_entities[start..start + self.nb_bodies[island]]
    }

    pub fn clear(&mut self) {
        self.contact_manifolds_indices.clear();
        self.nb_contact_manifolds.clear();
        self.body_entities.clear();
        self.body_start_indices.clear();
        self.nb_bodies.clear();
    }
}

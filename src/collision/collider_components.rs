use ahash::AHashMap;
use glam::Affine3A;

use super::Material;
use crate::Entity;

/// Structure-of-arrays store for collider data consumed by the contact
/// solver: the local-to-world transform used to place contact points and the
/// surface material.
///
/// The contact solver only reads this store.
#[derive(Debug, Clone, Default)]
pub struct ColliderComponents {
    entity_to_index: AHashMap<Entity, usize>,
    pub body_entities: Vec<Entity>,
    pub local_to_world_transforms: Vec<Affine3A>,
    pub materials: Vec<Material>,
}

impl ColliderComponents {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a collider and returns its row index.
    pub fn add_collider(
        &mut self,
        entity: Entity,
        body_entity: Entity,
        local_to_world_transform: Affine3A,
        material: Material,
    ) -> usize {
        debug_assert!(!self.entity_to_index.contains_key(&entity));

        let index = self.body_entities.len();
        self.entity_to_index.insert(entity, index);
        self.body_entities.push(body_entity);
        self.local_to_world_transforms.push(local_to_world_transform);
        self.materials.push(material);
        index
    }

    #[must_use]
    pub fn entity_index(&self, entity: Entity) -> usize {
        self.entity_to_index[&entity]
    }

    pub fn set_local_to_world_transform(&mut self, entity: Entity, transform: Affine3A) {
        let index = self.entity_index(entity);
        self.local_to_world_transforms[index] = transform;
    }

    #[must_use]
    pub fn nb_colliders(&self) -> usize {
        self.body_entities.len()
    }
}

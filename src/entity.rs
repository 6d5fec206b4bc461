/// Stable identity of a body or collider, assigned by the caller.
///
/// Component stores map entities to structure-of-arrays row indices, so rows
/// may move while an `Entity` stays valid for the lifetime of the object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Entity(pub u64);

impl Entity {
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn id(self) -> u64 {
        self.0
    }
}

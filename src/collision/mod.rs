mod collider_components;
mod contact_manifold;
mod contact_point;
mod material;

pub use collider_components::*;
pub use contact_manifold::*;
pub use contact_point::*;
pub use material::*;

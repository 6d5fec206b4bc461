mod body_components;
mod islands;

pub mod contact_solver;

pub use body_components::*;
pub use contact_solver::{ContactSolver, SolverConfig};
pub use islands::*;

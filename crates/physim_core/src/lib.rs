//! Sandbox shell over the physics engine
//!
//! This crate owns the user-facing surface of the simulation:
//! - The [`Sandbox`](world::Sandbox) container (object creation, selection,
//!   stir impulses)
//! - Flat-file persistence of the object collection ([`store`])

pub mod store;
pub mod world;

// Re-export commonly used types
pub use store::{load, save, StoreError};
pub use world::{Sandbox, SpawnParams};

// Convenience re-exports from the lower crates
pub use physim_math::Vec2;
pub use physim_physics::{
    PhysicalObject, Shape, ShapeKind, SimConfig, SimState, SpawnError, WORLD_LENGTH, WORLD_WIDTH,
};

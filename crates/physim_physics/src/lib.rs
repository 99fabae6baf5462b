//! 2D rigid-shape physics for the physim sandbox
//!
//! This crate provides the discrete-time physics engine:
//! - Shape geometry (circles, squares, rectangles, equilateral triangles)
//! - Boundary reflection against the fixed world bounds
//! - The heterogeneous narrow-phase collision test matrix
//! - Impulse-based collision resolution
//! - The paused/running simulation step driver

pub mod collision;
pub mod object;
pub mod shapes;
pub mod world;

// Re-export commonly used types
pub use collision::{collides, resolve_collision};
pub use object::{PhysicalObject, SpawnError};
pub use shapes::{Shape, ShapeKind, WORLD_LENGTH, WORLD_WIDTH};
pub use world::{SimConfig, SimState, SimWorld};

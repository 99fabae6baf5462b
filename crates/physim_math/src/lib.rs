//! Math primitives for the physim sandbox
//!
//! Provides the 2D vector type used by the physics engine and its callers.

mod vec2;

pub use vec2::Vec2;

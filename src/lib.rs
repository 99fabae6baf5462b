//! physim - discrete-time 2D physics sandbox
//!
//! The workspace crates do the real work; this package adds application
//! configuration and the headless runner binary.

pub mod config;

pub use config::{AppConfig, ConfigError};

// Re-export the sandbox surface for binary and test consumers
pub use physim_core::{
    load, save, PhysicalObject, Sandbox, Shape, ShapeKind, SimConfig, SimState, SpawnError,
    SpawnParams, StoreError, Vec2, WORLD_LENGTH, WORLD_WIDTH,
};

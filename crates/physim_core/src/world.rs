//! Sandbox container: the simulation world plus its UI-facing surface
//!
//! The Sandbox owns the object collection (through the SimWorld driver), the
//! creation API consumed by control panels, and the selection index used for
//! display highlighting.

use physim_math::Vec2;
use physim_physics::{PhysicalObject, Shape, ShapeKind, SimConfig, SimWorld, SpawnError};

/// Parameters for creating an object, mirroring a control panel's edit fields
///
/// `radius` doubles as the side length for squares and triangles, and `size`
/// is only read for rectangles. `rotation` is accepted but not applied to
/// geometry (reserved).
#[derive(Clone, Copy, Debug)]
pub struct SpawnParams {
    pub kind: ShapeKind,
    pub rotation: f32,
    pub radius: f32,
    pub size: Vec2,
    pub velocity: Vec2,
    /// RGBA channels, 0.0-1.0
    pub color: [f32; 4],
    pub mass: f32,
}

impl Default for SpawnParams {
    fn default() -> Self {
        Self {
            kind: ShapeKind::Circle,
            rotation: 0.0,
            radius: 100.0,
            size: Vec2::new(100.0, 100.0),
            velocity: Vec2::ZERO,
            color: [1.0, 1.0, 1.0, 1.0],
            mass: 10.0,
        }
    }
}

impl SpawnParams {
    /// Build the shape payload for the requested kind
    fn shape(&self) -> Result<Shape, SpawnError> {
        match self.kind {
            ShapeKind::Circle => Ok(Shape::Circle { radius: self.radius }),
            ShapeKind::Square => Ok(Shape::Square { side: self.radius }),
            ShapeKind::Rectangle => Ok(Shape::Rectangle {
                width: self.size.x,
                height: self.size.y,
            }),
            ShapeKind::Triangle => Ok(Shape::Triangle { side: self.radius }),
            ShapeKind::Convex => Err(SpawnError::UnsupportedKind(self.kind)),
        }
    }
}

/// The sandbox: simulation world, creation API, and selection state
pub struct Sandbox {
    sim: SimWorld,
    selected: Option<usize>,
}

impl Sandbox {
    /// Create an empty, paused sandbox with default tunables
    pub fn new() -> Self {
        Self::with_config(SimConfig::default())
    }

    /// Create an empty, paused sandbox with custom tunables
    pub fn with_config(config: SimConfig) -> Self {
        Self {
            sim: SimWorld::with_config(config),
            selected: None,
        }
    }

    /// The simulation world
    pub fn sim(&self) -> &SimWorld {
        &self.sim
    }

    /// The simulation world, mutable (tunables, play/pause, stepping)
    pub fn sim_mut(&mut self) -> &mut SimWorld {
        &mut self.sim
    }

    /// Spawn a new object at `position` from panel parameters
    ///
    /// Returns the new object's index. Invalid mass or degenerate dimensions
    /// are rejected before the object enters the collection.
    pub fn spawn(&mut self, position: Vec2, params: SpawnParams) -> Result<usize, SpawnError> {
        let shape = params.shape()?;
        let object = PhysicalObject::new(
            position,
            params.velocity,
            params.color,
            params.mass,
            shape,
        )?;
        let index = self.sim.add_object(object);
        log::debug!(
            "spawned {:?} #{} at ({:.1}, {:.1})",
            params.kind,
            index,
            position.x,
            position.y
        );
        Ok(index)
    }

    /// Apply a random stir force to every object
    pub fn impulse(&mut self) {
        self.sim.impulse();
    }

    /// Objects in collection order
    pub fn objects(&self) -> &[PhysicalObject] {
        self.sim.objects()
    }

    /// Objects in collection order, mutable
    pub fn objects_mut(&mut self) -> &mut [PhysicalObject] {
        self.sim.objects_mut()
    }

    /// Remove the object at `index`; clears or shifts the selection to match
    pub fn remove(&mut self, index: usize) -> Option<PhysicalObject> {
        let removed = self.sim.remove_object(index)?;
        self.selected = match self.selected {
            Some(sel) if sel == index => None,
            Some(sel) if sel > index => Some(sel - 1),
            other => other,
        };
        Some(removed)
    }

    /// Drop every object and the selection
    pub fn clear(&mut self) {
        self.sim.clear();
        self.selected = None;
    }

    /// The display-highlight selection, if any
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Set the display-highlight selection; out-of-range indices clear it
    pub fn select(&mut self, index: Option<usize>) {
        self.selected = index.filter(|&i| i < self.sim.object_count());
    }
}

impl Default for Sandbox {
    fn default() -> Self {
        Self::new()
    }
}

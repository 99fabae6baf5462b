//! Simulation world and step driver

use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::collision::{collides, resolve_collision};
use crate::object::PhysicalObject;
use physim_math::Vec2;

/// Live-tunable simulation parameters
///
/// Shared by every object and hot-swappable between frames by whoever owns
/// the world (typically a control panel). Never reset by the driver.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Collision elasticity, 0.0 (inelastic) to 1.0 (perfectly elastic)
    pub restitution: f32,
    /// Downward acceleration scale (world units are pixels, y grows down)
    pub gravity: f32,
    /// Velocity damping coefficient
    pub air_resistance: f32,
    /// Multiplier applied to every frame delta before integration
    pub time_acceleration: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            restitution: 0.8,
            gravity: 98.1,
            air_resistance: 0.02,
            time_acceleration: 1.0,
        }
    }
}

/// Driver state: whether `step` integrates and resolves anything
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimState {
    #[default]
    Paused,
    Running,
}

/// The simulation world: the object collection plus the step driver
///
/// Objects are owned in insertion order; indices are stable until a removal.
/// All pairwise collision checks are discovered fresh each frame, O(n²) with
/// no broad phase, which is fine at the tens-to-hundreds of objects this
/// sandbox targets.
pub struct SimWorld {
    objects: Vec<PhysicalObject>,
    /// Simulation tunables, mutable between frames
    pub config: SimConfig,
    state: SimState,
}

impl SimWorld {
    /// Create a paused world with default configuration
    pub fn new() -> Self {
        Self::with_config(SimConfig::default())
    }

    /// Create a paused world with custom configuration
    pub fn with_config(config: SimConfig) -> Self {
        Self {
            objects: Vec::new(),
            config,
            state: SimState::Paused,
        }
    }

    /// Append an object, returning its index
    pub fn add_object(&mut self, object: PhysicalObject) -> usize {
        self.objects.push(object);
        self.objects.len() - 1
    }

    /// Remove and return the object at `index`, shifting later objects down
    pub fn remove_object(&mut self, index: usize) -> Option<PhysicalObject> {
        if index < self.objects.len() {
            Some(self.objects.remove(index))
        } else {
            None
        }
    }

    /// Drop every object
    pub fn clear(&mut self) {
        self.objects.clear();
    }

    pub fn get_object(&self, index: usize) -> Option<&PhysicalObject> {
        self.objects.get(index)
    }

    pub fn get_object_mut(&mut self, index: usize) -> Option<&mut PhysicalObject> {
        self.objects.get_mut(index)
    }

    /// All objects in collection order
    pub fn objects(&self) -> &[PhysicalObject] {
        &self.objects
    }

    /// All objects in collection order, mutable
    pub fn objects_mut(&mut self) -> &mut [PhysicalObject] {
        &mut self.objects
    }

    #[inline]
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn state(&self) -> SimState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SimState::Running
    }

    pub fn play(&mut self) {
        self.state = SimState::Running;
    }

    pub fn pause(&mut self) {
        self.state = SimState::Paused;
    }

    /// Flip between Paused and Running
    pub fn toggle(&mut self) {
        self.state = match self.state {
            SimState::Paused => SimState::Running,
            SimState::Running => SimState::Paused,
        };
    }

    /// Step the simulation forward by `dt` seconds
    ///
    /// A paused world does nothing. Running, this:
    /// 1. Integrates every object in collection order (gravity, drag,
    ///    movement with boundary bounce)
    /// 2. Tests every unordered pair `(i, j)` with `i < j` and resolves each
    ///    positive test with a single impulse
    pub fn step(&mut self, dt: f32) {
        if self.state != SimState::Running {
            return;
        }

        for object in &mut self.objects {
            object.update(dt, &self.config);
        }

        for i in 0..self.objects.len() {
            for j in (i + 1)..self.objects.len() {
                let (head, tail) = self.objects.split_at_mut(j);
                let a = &mut head[i];
                let b = &mut tail[0];
                if collides(a, b) {
                    resolve_collision(a, b, self.config.restitution);
                }
            }
        }
    }

    /// Stir the sandbox: apply a random force to every object
    ///
    /// Each axis draws from `[100, 450)` and is scaled by the object's mass
    /// over two, so heavier objects get proportionally larger kicks.
    pub fn impulse(&mut self) {
        let mut rng = rand::rng();
        for object in &mut self.objects {
            let force = Vec2::new(
                rng.random_range(100.0..450.0) * object.mass() / 2.0,
                rng.random_range(100.0..450.0) * object.mass() / 2.0,
            );
            object.apply_force(force);
        }
    }
}

impl Default for SimWorld {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::Shape;

    const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

    fn circle(x: f32, y: f32, vx: f32, vy: f32) -> PhysicalObject {
        PhysicalObject::new(
            Vec2::new(x, y),
            Vec2::new(vx, vy),
            WHITE,
            1.0,
            Shape::Circle { radius: 50.0 },
        )
        .unwrap()
    }

    /// Config isolating movement: no gravity, no drag
    fn drift_config() -> SimConfig {
        SimConfig {
            restitution: 0.8,
            gravity: 0.0,
            air_resistance: 0.0,
            time_acceleration: 1.0,
        }
    }

    #[test]
    fn test_sim_config_default() {
        let config = SimConfig::default();
        assert_eq!(config.restitution, 0.8);
        assert_eq!(config.time_acceleration, 1.0);
    }

    #[test]
    fn test_world_starts_paused_and_empty() {
        let world = SimWorld::new();
        assert!(world.is_empty());
        assert_eq!(world.state(), SimState::Paused);
        assert!(!world.is_running());
    }

    #[test]
    fn test_add_get_remove() {
        let mut world = SimWorld::new();
        let idx = world.add_object(circle(500.0, 500.0, 0.0, 0.0));
        assert_eq!(idx, 0);
        assert_eq!(world.object_count(), 1);
        assert!(world.get_object(0).is_some());

        let removed = world.remove_object(0);
        assert!(removed.is_some());
        assert!(world.is_empty());
        assert!(world.remove_object(0).is_none());
    }

    #[test]
    fn test_paused_world_does_not_integrate() {
        let mut world = SimWorld::with_config(drift_config());
        world.add_object(circle(500.0, 500.0, 100.0, 0.0));

        world.step(1.0);

        let obj = world.get_object(0).unwrap();
        assert_eq!(obj.position, Vec2::new(500.0, 500.0));
    }

    #[test]
    fn test_paused_world_does_not_resolve_collisions() {
        let mut world = SimWorld::with_config(drift_config());
        // Overlapping circles, but the world is paused
        world.add_object(circle(500.0, 500.0, 50.0, 0.0));
        world.add_object(circle(540.0, 500.0, -50.0, 0.0));

        world.step(1.0 / 60.0);

        assert_eq!(world.get_object(0).unwrap().collisions(), 0);
    }

    #[test]
    fn test_running_world_moves_objects() {
        let mut world = SimWorld::with_config(drift_config());
        world.add_object(circle(500.0, 500.0, 60.0, 0.0));
        world.play();

        world.step(1.0);

        let obj = world.get_object(0).unwrap();
        assert!((obj.position.x - 560.0).abs() < 1e-3);
    }

    #[test]
    fn test_toggle() {
        let mut world = SimWorld::new();
        world.toggle();
        assert!(world.is_running());
        world.toggle();
        assert!(!world.is_running());
    }

    #[test]
    fn test_step_resolves_colliding_pair() {
        let mut world = SimWorld::with_config(drift_config());
        // Radii 50, mass 1, 80 apart, approaching at +/-50,
        // restitution 0.8. One step detects (80 < 100) and resolves.
        world.add_object(circle(400.0, 400.0, 50.0, 0.0));
        world.add_object(circle(480.0, 400.0, -50.0, 0.0));
        world.play();

        let dt = 1.0 / 60.0;
        world.step(dt);

        // After integration the gap shrinks further, still overlapping.
        // Post-resolution velocities from the impulse formula: -40 and +40.
        let a = world.get_object(0).unwrap();
        let b = world.get_object(1).unwrap();
        assert!((a.velocity.x - (-40.0)).abs() < 1e-3);
        assert!((b.velocity.x - 40.0).abs() < 1e-3);
        assert_eq!(a.collisions(), 1);
    }

    #[test]
    fn test_step_skips_separated_pair() {
        let mut world = SimWorld::with_config(drift_config());
        world.add_object(circle(200.0, 400.0, 0.0, 0.0));
        world.add_object(circle(800.0, 400.0, 0.0, 0.0));
        world.play();

        world.step(1.0 / 60.0);

        assert_eq!(world.get_object(0).unwrap().collisions(), 0);
        assert_eq!(world.get_object(1).unwrap().collisions(), 0);
    }

    #[test]
    fn test_gravity_pulls_down_over_steps() {
        let mut world = SimWorld::with_config(SimConfig {
            gravity: 98.1,
            air_resistance: 0.0,
            ..SimConfig::default()
        });
        world.add_object(circle(500.0, 100.0, 0.0, 0.0));
        world.play();

        for _ in 0..10 {
            world.step(1.0 / 60.0);
        }

        let obj = world.get_object(0).unwrap();
        assert!(obj.velocity.y > 0.0, "gravity should build downward velocity");
        assert!(obj.position.y > 100.0, "object should have fallen");
    }

    #[test]
    fn test_impulse_kicks_every_object() {
        let mut world = SimWorld::with_config(drift_config());
        world.add_object(circle(400.0, 400.0, 0.0, 0.0));
        world.add_object(circle(800.0, 400.0, 0.0, 0.0));

        world.impulse();

        for obj in world.objects() {
            // Mass 1: force in [100, 450) / 2 lands in [50, 225)
            assert!(obj.velocity.x >= 50.0 && obj.velocity.x < 225.0);
            assert!(obj.velocity.y >= 50.0 && obj.velocity.y < 225.0);
        }
    }

    #[test]
    fn test_impulse_scales_with_mass() {
        let mut world = SimWorld::with_config(drift_config());
        let heavy = PhysicalObject::new(
            Vec2::new(400.0, 400.0),
            Vec2::ZERO,
            WHITE,
            10.0,
            Shape::Circle { radius: 50.0 },
        )
        .unwrap();
        world.add_object(heavy);

        world.impulse();

        // Force scales by mass/2 but apply_force divides by mass again,
        // so the velocity kick is mass-independent: [50, 225) per axis.
        let obj = world.get_object(0).unwrap();
        assert!(obj.velocity.x >= 50.0 && obj.velocity.x < 225.0);
    }

    #[test]
    fn test_clear() {
        let mut world = SimWorld::new();
        world.add_object(circle(400.0, 400.0, 0.0, 0.0));
        world.add_object(circle(800.0, 400.0, 0.0, 0.0));
        world.clear();
        assert!(world.is_empty());
    }

    #[test]
    fn test_objects_stay_inside_bounds_over_time() {
        use crate::shapes::{WORLD_LENGTH, WORLD_WIDTH};

        let mut world = SimWorld::with_config(SimConfig::default());
        world.add_object(circle(500.0, 500.0, 300.0, -200.0));
        world.add_object(circle(900.0, 300.0, -250.0, 150.0));
        world.play();

        for _ in 0..600 {
            world.step(1.0 / 60.0);
        }

        for obj in world.objects() {
            assert!(obj.position.x >= 0.0 && obj.position.x <= WORLD_WIDTH);
            assert!(obj.position.y >= 0.0 && obj.position.y <= WORLD_LENGTH);
        }
    }
}

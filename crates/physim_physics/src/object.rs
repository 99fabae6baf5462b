//! Physical objects: kinematic and material state shared by every shape kind

use std::fmt;

use crate::shapes::{Shape, ShapeKind};
use crate::world::SimConfig;
use physim_math::Vec2;

/// Error raised when object construction would violate an engine invariant
///
/// These are caller contract violations: letting a zero mass or a zero-area
/// triangle into the world would propagate NaNs through integration, so they
/// are rejected up front instead.
#[derive(Debug)]
pub enum SpawnError {
    /// Mass must be strictly positive (inverse mass is `1 / mass`)
    NonPositiveMass(f32),
    /// A shape dimension is zero or negative
    DegenerateShape(Shape),
    /// The kind is reserved and has no geometry yet
    UnsupportedKind(ShapeKind),
}

impl fmt::Display for SpawnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpawnError::NonPositiveMass(mass) => {
                write!(f, "object mass must be positive, got {}", mass)
            }
            SpawnError::DegenerateShape(shape) => {
                write!(f, "degenerate shape dimensions: {:?}", shape)
            }
            SpawnError::UnsupportedKind(kind) => {
                write!(f, "shape kind {:?} is not implemented", kind)
            }
        }
    }
}

impl std::error::Error for SpawnError {}

/// A rigid shape with position, velocity, color, and mass
///
/// Mass and shape are fixed at construction; `new` enforces that mass is
/// positive and the shape is non-degenerate, so `inv_mass` is always finite.
#[derive(Clone, Debug, PartialEq)]
pub struct PhysicalObject {
    /// World-space center position
    pub position: Vec2,
    /// Velocity in world units per second
    pub velocity: Vec2,
    /// RGBA color, each channel 0.0-1.0 (cosmetic, ignored by physics)
    pub color: [f32; 4],
    mass: f32,
    shape: Shape,
    collisions: u32,
}

impl PhysicalObject {
    /// Create a new object, validating the physics invariants
    pub fn new(
        position: Vec2,
        velocity: Vec2,
        color: [f32; 4],
        mass: f32,
        shape: Shape,
    ) -> Result<Self, SpawnError> {
        if mass <= 0.0 {
            return Err(SpawnError::NonPositiveMass(mass));
        }
        if shape.is_degenerate() {
            return Err(SpawnError::DegenerateShape(shape));
        }
        Ok(Self {
            position,
            velocity,
            color,
            mass,
            shape,
            collisions: 0,
        })
    }

    /// The shape payload
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// The shape kind tag
    pub fn kind(&self) -> ShapeKind {
        self.shape.kind()
    }

    /// Mass (always positive)
    pub fn mass(&self) -> f32 {
        self.mass
    }

    /// Inverse mass, `1 / mass`
    pub fn inv_mass(&self) -> f32 {
        1.0 / self.mass
    }

    /// Number of resolved collisions in which this object was the first of
    /// the pair (diagnostic only)
    pub fn collisions(&self) -> u32 {
        self.collisions
    }

    pub(crate) fn record_collision(&mut self) {
        self.collisions += 1;
    }

    /// True if `point` lies within (or on) this object's shape
    pub fn contains_point(&self, point: Vec2) -> bool {
        self.shape.contains_point(self.position, point)
    }

    /// Apply an instantaneous force: `velocity += force / mass`
    pub fn apply_force(&mut self, force: Vec2) {
        self.velocity += force * self.inv_mass();
    }

    /// Apply gravity for `dt` seconds
    ///
    /// Gravity scales with mass in this sandbox (heavier objects accelerate
    /// faster); the per-object acceleration is `gravity * mass`.
    pub fn apply_gravity(&mut self, dt: f32, config: &SimConfig) {
        self.velocity.y += config.gravity * self.mass * dt;
    }

    /// Apply air resistance for `dt` seconds: scales velocity by
    /// `1 - air_resistance * dt / mass`
    pub fn apply_air_resistance(&mut self, dt: f32, config: &SimConfig) {
        self.velocity *= 1.0 - config.air_resistance * dt / self.mass;
    }

    /// Advance the position by `velocity * dt`, then apply the shape's
    /// boundary-reflection rule (may clamp position and flip velocity signs)
    pub fn move_by(&mut self, velocity: Vec2, dt: f32) {
        self.position += velocity * dt;
        let shape = self.shape;
        shape.reflect_bounds(&mut self.position, &mut self.velocity);
    }

    /// Per-frame integration: time acceleration, gravity, drag, then movement
    /// with boundary bounce
    pub fn update(&mut self, dt: f32, config: &SimConfig) {
        let dt = dt * config.time_acceleration;
        self.apply_gravity(dt, config);
        self.apply_air_resistance(dt, config);
        self.move_by(self.velocity, dt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

    fn circle(mass: f32, radius: f32) -> PhysicalObject {
        PhysicalObject::new(
            Vec2::new(500.0, 500.0),
            Vec2::ZERO,
            WHITE,
            mass,
            Shape::Circle { radius },
        )
        .unwrap()
    }

    #[test]
    fn test_new_object_defaults() {
        let obj = circle(10.0, 50.0);
        assert_eq!(obj.mass(), 10.0);
        assert_eq!(obj.kind(), ShapeKind::Circle);
        assert_eq!(obj.collisions(), 0);
        assert_eq!(obj.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_zero_mass_rejected() {
        let result = PhysicalObject::new(
            Vec2::ZERO,
            Vec2::ZERO,
            WHITE,
            0.0,
            Shape::Circle { radius: 10.0 },
        );
        assert!(matches!(result, Err(SpawnError::NonPositiveMass(_))));
    }

    #[test]
    fn test_negative_mass_rejected() {
        let result = PhysicalObject::new(
            Vec2::ZERO,
            Vec2::ZERO,
            WHITE,
            -5.0,
            Shape::Square { side: 10.0 },
        );
        assert!(matches!(result, Err(SpawnError::NonPositiveMass(_))));
    }

    #[test]
    fn test_degenerate_shape_rejected() {
        let result = PhysicalObject::new(
            Vec2::ZERO,
            Vec2::ZERO,
            WHITE,
            1.0,
            Shape::Triangle { side: 0.0 },
        );
        assert!(matches!(result, Err(SpawnError::DegenerateShape(_))));
    }

    #[test]
    fn test_inv_mass() {
        for mass in [0.5, 1.0, 4.0, 10.0] {
            let obj = circle(mass, 10.0);
            assert_eq!(obj.inv_mass(), 1.0 / mass);
        }
    }

    #[test]
    fn test_apply_force() {
        let mut obj = circle(2.0, 10.0);
        obj.apply_force(Vec2::new(10.0, -4.0));
        assert_eq!(obj.velocity, Vec2::new(5.0, -2.0));
    }

    #[test]
    fn test_gravity_scales_with_mass() {
        let config = SimConfig {
            gravity: 100.0,
            ..SimConfig::default()
        };
        let mut light = circle(1.0, 10.0);
        let mut heavy = circle(4.0, 10.0);

        light.apply_gravity(0.1, &config);
        heavy.apply_gravity(0.1, &config);

        assert!((light.velocity.y - 10.0).abs() < 1e-4);
        assert!((heavy.velocity.y - 40.0).abs() < 1e-4);
    }

    #[test]
    fn test_air_resistance_damps_velocity() {
        let config = SimConfig {
            air_resistance: 0.5,
            ..SimConfig::default()
        };
        let mut obj = circle(1.0, 10.0);
        obj.velocity = Vec2::new(100.0, 0.0);
        obj.apply_air_resistance(0.1, &config);

        // factor = 1 - 0.5 * 0.1 / 1.0 = 0.95
        assert!((obj.velocity.x - 95.0).abs() < 1e-3);
    }

    #[test]
    fn test_move_by_advances_position() {
        let mut obj = circle(1.0, 10.0);
        obj.move_by(Vec2::new(50.0, -20.0), 0.5);
        assert_eq!(obj.position, Vec2::new(525.0, 490.0));
    }

    #[test]
    fn test_move_by_bounces_off_left_wall() {
        let mut obj = circle(1.0, 10.0);
        obj.position = Vec2::new(12.0, 500.0);
        obj.velocity = Vec2::new(-100.0, 0.0);
        obj.move_by(obj.velocity, 0.1);

        // Would land at x=2, left edge at -8: clamped to the radius, vx flipped
        assert_eq!(obj.position.x, 10.0);
        assert_eq!(obj.velocity.x, 100.0);
    }

    #[test]
    fn test_update_time_acceleration() {
        let config = SimConfig {
            gravity: 0.0,
            air_resistance: 0.0,
            time_acceleration: 2.0,
            ..SimConfig::default()
        };
        let mut obj = circle(1.0, 10.0);
        obj.velocity = Vec2::new(10.0, 0.0);
        obj.update(1.0, &config);

        // Effective dt is 2.0
        assert!((obj.position.x - 520.0).abs() < 1e-3);
    }

    #[test]
    fn test_update_applies_gravity_before_move() {
        let config = SimConfig {
            gravity: 10.0,
            air_resistance: 0.0,
            time_acceleration: 1.0,
            ..SimConfig::default()
        };
        let mut obj = circle(1.0, 10.0);
        obj.update(1.0, &config);

        // Gravity first: vy = 10, then position moves by vy * dt
        assert!((obj.velocity.y - 10.0).abs() < 1e-4);
        assert!((obj.position.y - 510.0).abs() < 1e-3);
    }

    #[test]
    fn test_contains_point_delegates_to_shape() {
        let obj = circle(1.0, 50.0);
        assert!(obj.contains_point(Vec2::new(540.0, 500.0)));
        assert!(!obj.contains_point(Vec2::new(560.0, 500.0)));
    }
}

//! Shape geometry for the 2D sandbox
//!
//! Each shape kind carries only its dimensions; world position lives on the
//! owning object. Geometry operations (containment, vertex sets, boundary
//! reflection) are dispatched by matching on the shape payload.

use physim_math::Vec2;
use serde::{Serialize, Deserialize};

/// World bounds: fixed axis-aligned rectangle every shape reflects against.
pub const WORLD_WIDTH: f32 = 1920.0;
/// World bounds: vertical extent (screen-space y grows downward).
pub const WORLD_LENGTH: f32 = 1080.0;

/// Denominator guard for the barycentric point-in-triangle test.
const DEGENERATE_EPSILON: f32 = 1e-6;

/// Tag identifying a shape kind, stable across serialization.
///
/// `Convex` is reserved for arbitrary convex polygons and is not implemented;
/// it participates in dispatch as "never collides".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    Circle,
    Square,
    Rectangle,
    Triangle,
    Convex,
}

impl ShapeKind {
    /// Integer code used in the flat-record format.
    pub fn code(self) -> u32 {
        match self {
            ShapeKind::Circle => 0,
            ShapeKind::Square => 1,
            ShapeKind::Rectangle => 2,
            ShapeKind::Triangle => 3,
            ShapeKind::Convex => 4,
        }
    }

    /// Decode an integer code back into a kind.
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(ShapeKind::Circle),
            1 => Some(ShapeKind::Square),
            2 => Some(ShapeKind::Rectangle),
            3 => Some(ShapeKind::Triangle),
            4 => Some(ShapeKind::Convex),
            _ => None,
        }
    }
}

/// A shape payload: the kind tag plus its geometric parameter(s)
///
/// Squares and rectangles are axis-aligned; triangles are equilateral with a
/// horizontal base and the apex above it (smaller y).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Circle { radius: f32 },
    Square { side: f32 },
    Rectangle { width: f32, height: f32 },
    Triangle { side: f32 },
}

impl Shape {
    /// The kind tag for this shape
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Circle { .. } => ShapeKind::Circle,
            Shape::Square { .. } => ShapeKind::Square,
            Shape::Rectangle { .. } => ShapeKind::Rectangle,
            Shape::Triangle { .. } => ShapeKind::Triangle,
        }
    }

    /// True if any dimension is zero or negative
    ///
    /// Degenerate shapes would divide by zero in the barycentric containment
    /// test and produce nonsense bounces, so construction rejects them.
    pub fn is_degenerate(&self) -> bool {
        match *self {
            Shape::Circle { radius } => radius <= 0.0,
            Shape::Square { side } => side <= 0.0,
            Shape::Rectangle { width, height } => width <= 0.0 || height <= 0.0,
            Shape::Triangle { side } => side <= 0.0,
        }
    }

    /// Half extents of the shape's bounding box around its center
    ///
    /// Triangle height is `side * sqrt(3) / 2` (equilateral).
    pub fn half_extents(&self) -> Vec2 {
        match *self {
            Shape::Circle { radius } => Vec2::new(radius, radius),
            Shape::Square { side } => Vec2::new(side / 2.0, side / 2.0),
            Shape::Rectangle { width, height } => Vec2::new(width / 2.0, height / 2.0),
            Shape::Triangle { side } => {
                let height = side * 3.0_f32.sqrt() / 2.0;
                Vec2::new(side / 2.0, height / 2.0)
            }
        }
    }

    /// Corner vertices of the shape centered at `center`
    ///
    /// Squares and rectangles yield their 4 axis-aligned corners; triangles
    /// yield the two base corners and the apex. Circles have no vertices.
    /// These vertex sets drive the cross-kind collision tests.
    pub fn vertices(&self, center: Vec2) -> Vec<Vec2> {
        match *self {
            Shape::Circle { .. } => Vec::new(),
            Shape::Square { .. } | Shape::Rectangle { .. } => {
                let he = self.half_extents();
                vec![
                    Vec2::new(center.x - he.x, center.y - he.y),
                    Vec2::new(center.x + he.x, center.y - he.y),
                    Vec2::new(center.x + he.x, center.y + he.y),
                    Vec2::new(center.x - he.x, center.y + he.y),
                ]
            }
            Shape::Triangle { .. } => {
                let he = self.half_extents();
                vec![
                    Vec2::new(center.x - he.x, center.y + he.y),
                    Vec2::new(center.x + he.x, center.y + he.y),
                    Vec2::new(center.x, center.y - he.y),
                ]
            }
        }
    }

    /// Check if `point` lies within (or on) the shape centered at `center`
    pub fn contains_point(&self, center: Vec2, point: Vec2) -> bool {
        match *self {
            Shape::Circle { radius } => {
                (point - center).length_squared() <= radius * radius
            }
            Shape::Square { .. } | Shape::Rectangle { .. } => {
                let he = self.half_extents();
                point.x >= center.x - he.x
                    && point.x <= center.x + he.x
                    && point.y >= center.y - he.y
                    && point.y <= center.y + he.y
            }
            Shape::Triangle { .. } => {
                let v = self.vertices(center);
                point_in_triangle(point, v[0], v[1], v[2])
            }
        }
    }

    /// Apply this shape's boundary-reflection rule against the world bounds
    ///
    /// Circle and Square correct each axis independently, so a corner hit can
    /// flip both velocity components in one step. Rectangle and Triangle use a
    /// single mutually-exclusive chain in (left, top, right, bottom) priority
    /// order and correct at most one axis per step, even in a corner. The two
    /// forms differ observably on corner bounces and both are load-bearing.
    pub fn reflect_bounds(&self, position: &mut Vec2, velocity: &mut Vec2) {
        let he = self.half_extents();
        match self {
            Shape::Circle { .. } | Shape::Square { .. } => {
                if position.x - he.x < 0.0 {
                    position.x = he.x;
                    velocity.x = -velocity.x;
                } else if position.x + he.x > WORLD_WIDTH {
                    position.x = WORLD_WIDTH - he.x;
                    velocity.x = -velocity.x;
                }
                if position.y - he.y < 0.0 {
                    position.y = he.y;
                    velocity.y = -velocity.y;
                } else if position.y + he.y > WORLD_LENGTH {
                    position.y = WORLD_LENGTH - he.y;
                    velocity.y = -velocity.y;
                }
            }
            Shape::Rectangle { .. } | Shape::Triangle { .. } => {
                if position.x - he.x < 0.0 {
                    position.x = he.x;
                    velocity.x = -velocity.x;
                } else if position.y - he.y < 0.0 {
                    position.y = he.y;
                    velocity.y = -velocity.y;
                } else if position.x + he.x > WORLD_WIDTH {
                    position.x = WORLD_WIDTH - he.x;
                    velocity.x = -velocity.x;
                } else if position.y + he.y > WORLD_LENGTH {
                    position.y = WORLD_LENGTH - he.y;
                    velocity.y = -velocity.y;
                }
            }
        }
    }
}

/// Barycentric sign test for point-in-triangle containment
///
/// A degenerate (zero-area) triangle yields a near-zero denominator; such
/// triangles contain nothing rather than dividing by zero.
fn point_in_triangle(p: Vec2, v0: Vec2, v1: Vec2, v2: Vec2) -> bool {
    let denom = (v1.y - v2.y) * (v0.x - v2.x) + (v2.x - v1.x) * (v0.y - v2.y);
    if denom.abs() < DEGENERATE_EPSILON {
        return false;
    }
    let a = ((v1.y - v2.y) * (p.x - v2.x) + (v2.x - v1.x) * (p.y - v2.y)) / denom;
    let b = ((v2.y - v0.y) * (p.x - v2.x) + (v0.x - v2.x) * (p.y - v2.y)) / denom;
    let c = 1.0 - a - b;
    a >= 0.0 && b >= 0.0 && c >= 0.0
}

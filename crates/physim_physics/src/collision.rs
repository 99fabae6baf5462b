//! Narrow-phase collision tests and impulse resolution
//!
//! Every ordered pair of shape kinds maps to one of four tests. Several of
//! the cross-kind tests are one-directional by construction: they sample one
//! shape's vertices against the other's containment predicate and never check
//! the converse, so a deep overlap where no sampled vertex crosses the other
//! boundary is reported as no collision. Known limitation, kept because both
//! argument orders delegate to the single implemented direction and callers
//! depend on the resulting behavior.

use crate::object::PhysicalObject;
use crate::shapes::{Shape, ShapeKind};

/// Test two objects for overlap, dispatching on both runtime kinds
///
/// Reserved kinds (`Convex`) never collide.
pub fn collides(a: &PhysicalObject, b: &PhysicalObject) -> bool {
    match (a.kind(), b.kind()) {
        (ShapeKind::Convex, _) | (_, ShapeKind::Convex) => false,
        (ShapeKind::Circle, ShapeKind::Circle) => circle_vs_circle(a, b),
        // Both orders route to the one implemented direction
        (ShapeKind::Circle, _) => circle_vs_polygon(a, b),
        (_, ShapeKind::Circle) => circle_vs_polygon(b, a),
        (ShapeKind::Square, ShapeKind::Square) => square_vs_square(a, b),
        // Mixed polygon pairs: canonicalize by kind code so both argument
        // orders run the same single direction (the lower-coded shape's
        // containment against the higher-coded shape's vertices)
        (ka, kb) => {
            if ka.code() <= kb.code() {
                polygon_vs_polygon(a, b)
            } else {
                polygon_vs_polygon(b, a)
            }
        }
    }
}

/// Circle-circle: centers closer than the sum of radii (strict)
fn circle_vs_circle(a: &PhysicalObject, b: &PhysicalObject) -> bool {
    let (ra, rb) = match (a.shape(), b.shape()) {
        (Shape::Circle { radius: ra }, Shape::Circle { radius: rb }) => (ra, rb),
        _ => return false,
    };
    let min_dist = ra + rb;
    (a.position - b.position).length_squared() < min_dist * min_dist
}

/// Circle-polygon: true if any polygon vertex lies inside the circle
///
/// Vertex sampling only; a polygon overlapping the circle edge-on with all
/// vertices outside is a false negative.
fn circle_vs_polygon(circle: &PhysicalObject, polygon: &PhysicalObject) -> bool {
    polygon
        .shape()
        .vertices(polygon.position)
        .into_iter()
        .any(|vertex| circle.contains_point(vertex))
}

/// Square-square: open-interval overlap on both axes
///
/// Strict comparisons, so squares sharing exactly one touching edge do not
/// count as colliding.
fn square_vs_square(a: &PhysicalObject, b: &PhysicalObject) -> bool {
    let ha = a.shape().half_extents();
    let hb = b.shape().half_extents();
    a.position.x - ha.x < b.position.x + hb.x
        && a.position.x + ha.x > b.position.x - hb.x
        && a.position.y - ha.y < b.position.y + hb.y
        && a.position.y + ha.y > b.position.y - hb.y
}

/// Polygon-polygon: true if any vertex of `b` lies inside `a`
///
/// One-directional; `a`'s vertices are never tested against `b`.
fn polygon_vs_polygon(a: &PhysicalObject, b: &PhysicalObject) -> bool {
    b.shape()
        .vertices(b.position)
        .into_iter()
        .any(|vertex| a.contains_point(vertex))
}

/// Resolve a collision with a single impulse along the center-to-center normal
///
/// The normal is always `normalize(a.position - b.position)` regardless of the
/// actual shapes in contact. `a`'s collision counter is incremented on every
/// call; if the objects are already separating along the normal, velocities
/// are left untouched.
pub fn resolve_collision(a: &mut PhysicalObject, b: &mut PhysicalObject, restitution: f32) {
    a.record_collision();

    let normal = (a.position - b.position).normalized();
    let relative_velocity = a.velocity - b.velocity;
    let velocity_along_normal = relative_velocity.dot(normal);

    if velocity_along_normal > 0.0 {
        return;
    }

    let impulse_magnitude =
        -(1.0 + restitution) * velocity_along_normal / (a.inv_mass() + b.inv_mass());
    let impulse = normal * impulse_magnitude;

    a.velocity += impulse * a.inv_mass();
    b.velocity -= impulse * b.inv_mass();
}

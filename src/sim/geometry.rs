//! Boundary generation and containment tests
//!
//! Containment is one-directional vertex sampling: shape A is inside B when
//! every boundary vertex of A passes B's point test. This is exact for the
//! polygon families and approximate for a circle being tested as the inner
//! shape (its boundary is sampled at `CIRCLE_SAMPLES` points).

use glam::Vec2;
use std::f32::consts::PI;

use super::shape::{Shape, ShapeKind};
use crate::consts::*;
use crate::{regular_polygon_point, rotate_point};

/// Unrotated outline of a shape family at the given size
fn local_outline(kind: ShapeKind, size: f32) -> Vec<Vec2> {
    let half = size / 2.0;

    match kind {
        ShapeKind::Circle => (0..CIRCLE_SAMPLES)
            .map(|i| regular_polygon_point(half, i, CIRCLE_SAMPLES, 0.0))
            .collect(),
        ShapeKind::Square => vec![
            Vec2::new(-half, -half),
            Vec2::new(half, -half),
            Vec2::new(half, half),
            Vec2::new(-half, half),
        ],
        ShapeKind::Rectangle => {
            let half_h = size * RECTANGLE_ASPECT / 2.0;
            vec![
                Vec2::new(-half, -half_h),
                Vec2::new(half, -half_h),
                Vec2::new(half, half_h),
                Vec2::new(-half, half_h),
            ]
        }
        ShapeKind::Diamond => {
            let half_h = size * DIAMOND_HALF_HEIGHT;
            vec![
                Vec2::new(0.0, -half_h),
                Vec2::new(half, 0.0),
                Vec2::new(0.0, half_h),
                Vec2::new(-half, 0.0),
            ]
        }
        ShapeKind::Star => {
            let inner = half * STAR_INNER_RATIO;
            let count = STAR_POINTS * 2;
            (0..count)
                .map(|i| {
                    let r = if i % 2 == 0 { half } else { inner };
                    regular_polygon_point(r, i, count, 0.0)
                })
                .collect()
        }
        ShapeKind::Triangle | ShapeKind::Pentagon | ShapeKind::Hexagon | ShapeKind::Octagon => {
            let n = kind.regular_sides().unwrap_or(3);
            (0..n).map(|i| regular_polygon_point(half, i, n, 0.0)).collect()
        }
    }
}

/// World-space boundary vertices of a shape (sampled perimeter for circles)
pub fn vertices(shape: &Shape) -> Vec<Vec2> {
    local_outline(shape.kind, shape.size)
        .into_iter()
        .map(|v| rotate_point(v, shape.rotation))
        .collect()
}

/// Even-odd ray casting against a closed polygon
pub fn point_in_polygon(point: Vec2, polygon: &[Vec2]) -> bool {
    if polygon.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let a = polygon[i];
        let b = polygon[j];
        if (a.y > point.y) != (b.y > point.y) {
            let cross_x = (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x;
            if point.x < cross_x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Check whether a world-space point lies inside `container` (with ε buffer)
pub fn contains_point(container: &Shape, point: Vec2) -> bool {
    // Undo the container's rotation so every test runs axis-aligned
    let local = rotate_point(point, -container.rotation);
    let half = container.radius();

    match container.kind {
        ShapeKind::Circle => local.length() <= half + CONTAINMENT_EPSILON,
        ShapeKind::Square => {
            local.x.abs() <= half + CONTAINMENT_EPSILON
                && local.y.abs() <= half + CONTAINMENT_EPSILON
        }
        ShapeKind::Rectangle => {
            let half_h = container.size * RECTANGLE_ASPECT / 2.0;
            local.x.abs() <= half + CONTAINMENT_EPSILON
                && local.y.abs() <= half_h + CONTAINMENT_EPSILON
        }
        ShapeKind::Diamond => {
            let half_w = half.max(f32::EPSILON);
            let half_h = (container.size * DIAMOND_HALF_HEIGHT).max(f32::EPSILON);
            local.x.abs() / half_w + local.y.abs() / half_h <= 1.0 + CONTAINMENT_EPSILON
        }
        ShapeKind::Star => {
            let outline = local_outline(ShapeKind::Star, container.size + RAYCAST_INFLATION);
            point_in_polygon(local, &outline)
        }
        ShapeKind::Triangle | ShapeKind::Pentagon | ShapeKind::Hexagon | ShapeKind::Octagon => {
            let n = container.kind.regular_sides().unwrap_or(3);
            let r = local.length();

            // Inside the inscribed circle: always in
            if r <= half * (PI / n as f32).cos() {
                return true;
            }
            // Outside the buffered circumscribed circle: always out
            if r > half + CONTAINMENT_EPSILON {
                return false;
            }

            let outline = local_outline(container.kind, container.size + RAYCAST_INFLATION);
            point_in_polygon(local, &outline)
        }
    }
}

/// Check whether `inner`'s whole boundary lies within `outer`
pub fn is_contained(inner: &Shape, outer: &Shape) -> bool {
    vertices(inner).into_iter().all(|v| contains_point(outer, v))
}

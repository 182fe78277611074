//! Shape Stack - an arcade timing game about nesting growing shapes
//!
//! Core modules:
//! - `sim`: Deterministic simulation (geometry, shape factory, world mechanics, game state)
//! - `tuning`: Data-driven game balance
//! - `highscores`: Top-N progression score leaderboard

pub mod highscores;
pub mod sim;
pub mod tuning;

pub use highscores::HighScores;
pub use tuning::Tuning;

use glam::Vec2;

/// Geometry constants shared by the containment engine
pub mod consts {
    /// Tolerance buffer (simulation units) applied to every point-in-shape test
    pub const CONTAINMENT_EPSILON: f32 = 0.5;
    /// Perimeter samples used to approximate a circle's boundary
    pub const CIRCLE_SAMPLES: usize = 12;
    /// Star inner radius as a fraction of the outer radius
    pub const STAR_INNER_RATIO: f32 = 0.4;
    /// Number of star points (vertex count is twice this)
    pub const STAR_POINTS: usize = 5;
    /// Rectangle height relative to its width
    pub const RECTANGLE_ASPECT: f32 = 0.6;
    /// Diamond half-height relative to size
    pub const DIAMOND_HALF_HEIGHT: f32 = 0.35;
    /// Size inflation for ray-cast polygons (matches the ε buffer on the radius)
    pub const RAYCAST_INFLATION: f32 = 2.0 * CONTAINMENT_EPSILON;

    /// Zoom gap below which interpolation snaps to the target
    pub const ZOOM_SNAP_EPSILON: f32 = 0.001;
    /// Largest frame delta accepted from the host (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;
}

/// Rotate a point around the origin by `angle` radians
#[inline]
pub fn rotate_point(p: Vec2, angle: f32) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    Vec2::new(p.x * cos - p.y * sin, p.x * sin + p.y * cos)
}

/// Vertex `index` of a regular `n`-gon on a circle of `radius`, first vertex pointing up
#[inline]
pub fn regular_polygon_point(radius: f32, index: usize, n: usize, rotation: f32) -> Vec2 {
    let theta = -std::f32::consts::FRAC_PI_2 + index as f32 * std::f32::consts::TAU / n as f32;
    let (sin, cos) = (theta + rotation).sin_cos();
    Vec2::new(radius * cos, radius * sin)
}

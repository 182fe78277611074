//! Shape production rules
//!
//! The base shape is always a circle sized from the viewport. Active shapes
//! are drawn from the kinds unlocked at the current level, start at a small
//! fraction of the shape they must fit into, and may be overridden by a boss.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::shape::{Color, Shape, ShapeKind};
use crate::tuning::Tuning;

/// A scripted spawn at a fixed score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BossConfig {
    /// Spawned when the next successful stack would reach this score
    pub score: u32,
    pub kind: ShapeKind,
    /// Continuously cycle hue instead of a palette color
    #[serde(default)]
    pub hue_cycle: bool,
    /// Sinusoidal size pulsing on top of growth
    #[serde(default)]
    pub pulse: bool,
    /// Sinusoidally modulated rotation speed
    #[serde(default)]
    pub erratic: bool,
    pub growth_multiplier: f32,
    pub rotation_multiplier: f32,
}

/// The shipped boss table
pub fn default_boss_table() -> Vec<BossConfig> {
    let boss = |score, kind, pulse, erratic, growth_multiplier, rotation_multiplier| BossConfig {
        score,
        kind,
        hue_cycle: true,
        pulse,
        erratic,
        growth_multiplier,
        rotation_multiplier,
    };

    vec![
        boss(5, ShapeKind::Hexagon, false, false, 1.2, 1.5),
        boss(10, ShapeKind::Star, true, false, 1.3, 1.0),
        boss(15, ShapeKind::Octagon, false, true, 1.4, 2.0),
        boss(20, ShapeKind::Diamond, true, true, 1.5, 2.0),
        boss(30, ShapeKind::Star, true, true, 1.7, 2.5),
    ]
}

/// Kinds added at each level (row 0 = level 1)
pub fn default_unlock_table() -> Vec<Vec<ShapeKind>> {
    vec![
        vec![ShapeKind::Circle, ShapeKind::Square],
        vec![ShapeKind::Triangle, ShapeKind::Diamond],
        vec![ShapeKind::Rectangle, ShapeKind::Pentagon],
        vec![ShapeKind::Hexagon, ShapeKind::Octagon],
        vec![ShapeKind::Star],
    ]
}

/// All kinds unlocked up to and including `level`
pub fn unlocked_kinds(table: &[Vec<ShapeKind>], level: u32) -> Vec<ShapeKind> {
    let rows = (level.max(1) as usize).min(table.len());
    let mut kinds: Vec<ShapeKind> = Vec::new();
    for kind in table[..rows].iter().flatten() {
        if !kinds.contains(kind) {
            kinds.push(*kind);
        }
    }
    if kinds.is_empty() {
        kinds.push(ShapeKind::Circle);
    }
    kinds
}

/// The permanent base shape for a viewport whose smaller side is `viewport_min`
pub fn base_shape(viewport_min: f32, tuning: &Tuning) -> Shape {
    Shape::new(ShapeKind::Circle, viewport_min.max(0.0) * tuning.base_size_fraction)
        .with_color(Color::Palette(tuning.base_color))
}

/// Spawn-time size of an active shape placed over `top`
pub fn spawn_size(top: Option<&Shape>, tuning: &Tuning) -> f32 {
    top.map_or(tuning.fallback_spawn_size, |s| s.size * tuning.spawn_size_fraction)
}

/// Random palette color that differs from `previous` whenever the palette allows it
pub fn pick_color<R: Rng>(rng: &mut R, palette_len: usize, previous: Option<Color>) -> Color {
    if palette_len == 0 {
        return Color::Palette(0);
    }

    let mut index = rng.random_range(0..palette_len);
    if previous == Some(Color::Palette(index)) {
        index = (index + 1) % palette_len;
    }
    Color::Palette(index)
}

/// Growth rate for one shape's whole lifetime
pub fn draw_growth_speed<R: Rng>(rng: &mut R, tuning: &Tuning) -> f32 {
    let low = tuning.min_growth_speed.min(tuning.max_growth_speed);
    let high = tuning.min_growth_speed.max(tuning.max_growth_speed);
    rng.random_range(low..=high)
}

/// Build the next active shape
pub fn active_shape<R: Rng>(
    rng: &mut R,
    tuning: &Tuning,
    level: u32,
    top: Option<&Shape>,
    boss: Option<&BossConfig>,
) -> Shape {
    let kinds = unlocked_kinds(&tuning.unlocks, level);
    let mut kind = kinds[rng.random_range(0..kinds.len())];
    let mut color = pick_color(rng, tuning.palette.len(), top.map(|s| s.color));

    if let Some(boss) = boss {
        kind = boss.kind;
        if boss.hue_cycle {
            color = Color::Hue(0.0);
        }
    }

    let mut shape = Shape::new(kind, spawn_size(top, tuning)).with_color(color);
    shape.opacity = tuning.active_opacity;
    shape
}

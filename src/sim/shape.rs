//! Shape value objects
//!
//! Every shape is centered on the origin; only kind, size and rotation
//! matter for containment. Color and opacity are cosmetic.

use serde::{Deserialize, Serialize};

/// The fixed set of shape families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    Circle,
    Square,
    Triangle,
    Rectangle,
    Pentagon,
    Hexagon,
    Octagon,
    Diamond,
    Star,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 9] = [
        ShapeKind::Circle,
        ShapeKind::Square,
        ShapeKind::Triangle,
        ShapeKind::Rectangle,
        ShapeKind::Pentagon,
        ShapeKind::Hexagon,
        ShapeKind::Octagon,
        ShapeKind::Diamond,
        ShapeKind::Star,
    ];

    /// Side count for the regular polygon families
    pub fn regular_sides(&self) -> Option<usize> {
        match self {
            ShapeKind::Triangle => Some(3),
            ShapeKind::Pentagon => Some(5),
            ShapeKind::Hexagon => Some(6),
            ShapeKind::Octagon => Some(8),
            ShapeKind::Circle
            | ShapeKind::Square
            | ShapeKind::Rectangle
            | ShapeKind::Diamond
            | ShapeKind::Star => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::Circle => "circle",
            ShapeKind::Square => "square",
            ShapeKind::Triangle => "triangle",
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Pentagon => "pentagon",
            ShapeKind::Hexagon => "hexagon",
            ShapeKind::Octagon => "octagon",
            ShapeKind::Diamond => "diamond",
            ShapeKind::Star => "star",
        }
    }
}

/// Display color token. The simulation only picks and compares these.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Color {
    /// Index into the tuning palette
    Palette(usize),
    /// Hue in degrees [0, 360), full saturation (boss hue cycling)
    Hue(f32),
}

impl Color {
    /// Resolve to linear RGB against a palette
    pub fn rgb(&self, palette: &[[f32; 3]]) -> [f32; 3] {
        match *self {
            Color::Palette(index) => {
                if palette.is_empty() {
                    [1.0, 1.0, 1.0]
                } else {
                    palette[index % palette.len()]
                }
            }
            Color::Hue(hue) => hue_to_rgb(hue),
        }
    }
}

/// HSV → RGB with saturation and value pinned at 1
fn hue_to_rgb(hue: f32) -> [f32; 3] {
    let h = hue.rem_euclid(360.0) / 60.0;
    let x = 1.0 - (h % 2.0 - 1.0).abs();
    match h as u32 {
        0 => [1.0, x, 0.0],
        1 => [x, 1.0, 0.0],
        2 => [0.0, 1.0, x],
        3 => [0.0, x, 1.0],
        4 => [x, 0.0, 1.0],
        _ => [1.0, 0.0, x],
    }
}

/// A stacked or growing shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub kind: ShapeKind,
    /// Characteristic diameter/width in simulation units
    pub size: f32,
    /// Radians, accumulates without wraparound
    pub rotation: f32,
    pub color: Color,
    /// 0-1, cosmetic only
    pub opacity: f32,
}

impl Shape {
    pub fn new(kind: ShapeKind, size: f32) -> Self {
        Self {
            kind,
            size,
            rotation: 0.0,
            color: Color::Palette(0),
            opacity: 1.0,
        }
    }

    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Circumscribed radius
    #[inline]
    pub fn radius(&self) -> f32 {
        self.size / 2.0
    }
}

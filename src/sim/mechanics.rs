//! Per-world mechanics table
//!
//! Each world layers one more effect on top of the previous world's set.
//! Only the growth pattern feeds back into the simulation; everything else
//! is read by the renderer.

use serde::{Deserialize, Serialize};
use std::f32::consts::{PI, TAU};

/// How the active shape's growth rate evolves inside a level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowthPattern {
    #[default]
    Linear,
    /// Faster with every stack completed in the level
    Accelerating,
    /// Swells and eases back across the level
    Wave,
}

impl GrowthPattern {
    /// Growth rate multiplier for the given progress inside the current level
    pub fn multiplier(&self, stacks_in_level: u32, stacks_per_level: u32) -> f32 {
        match self {
            GrowthPattern::Linear => 1.0,
            GrowthPattern::Accelerating => 1.0 + 0.25 * stacks_in_level as f32,
            GrowthPattern::Wave => {
                let phase = PI * stacks_in_level as f32 / stacks_per_level.max(1) as f32;
                1.0 + 0.5 * phase.sin()
            }
        }
    }
}

/// A sinusoidal effect
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Oscillation {
    pub amplitude: f32,
    /// Angular speed (radians per second)
    pub speed: f32,
}

impl Oscillation {
    pub fn new(amplitude: f32, speed: f32) -> Self {
        Self { amplitude, speed }
    }

    #[inline]
    pub fn sample(&self, clock: f32) -> f32 {
        self.amplitude * (clock * self.speed).sin()
    }
}

/// Opacity of stacked shapes while an eclipse is active
pub const ECLIPSE_STACK_OPACITY: f32 = 0.08;

/// Mechanics record for one world
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldMechanics {
    /// Size oscillation (amplitude is a fraction of size)
    pub breathing: Option<Oscillation>,
    pub growth_pattern: GrowthPattern,
    /// Horizontal displacement of the whole stack (amplitude in units)
    pub wave: Option<Oscillation>,
    /// Hue rotation speed (degrees per second)
    pub hue_shift: Option<f32>,
    /// Stacked shapes nearly vanish and their outlines pulse
    pub eclipse: bool,
}

impl WorldMechanics {
    /// Render scale factor for breathing
    pub fn breathing_scale(&self, clock: f32) -> f32 {
        self.breathing.map_or(1.0, |b| 1.0 + b.sample(clock))
    }

    /// Horizontal render offset
    pub fn wave_offset(&self, clock: f32) -> f32 {
        self.wave.map_or(0.0, |w| w.sample(clock))
    }

    /// Hue offset in degrees [0, 360)
    pub fn hue_shift(&self, clock: f32) -> f32 {
        self.hue_shift.map_or(0.0, |speed| (clock * speed).rem_euclid(360.0))
    }

    /// Effective render opacity of a stacked shape
    pub fn stack_opacity(&self, opacity: f32) -> f32 {
        if self.eclipse {
            opacity.min(ECLIPSE_STACK_OPACITY)
        } else {
            opacity
        }
    }

    /// Outline pulse intensity (0-1) during an eclipse
    pub fn eclipse_pulse(&self, clock: f32) -> f32 {
        if self.eclipse {
            0.5 + 0.5 * (clock * TAU).sin()
        } else {
            0.0
        }
    }
}

/// Look up a world's mechanics; worlds past the table reuse the last entry
pub fn mechanics_for_world(table: &[WorldMechanics], world: u32) -> WorldMechanics {
    let index = world.saturating_sub(1) as usize;
    table
        .get(index)
        .or_else(|| table.last())
        .cloned()
        .unwrap_or_default()
}

/// The shipped world table: every world keeps the last one's effects and adds one
pub fn default_world_table() -> Vec<WorldMechanics> {
    let mut worlds = Vec::new();

    let mut current = WorldMechanics::default();
    worlds.push(current.clone());

    current.breathing = Some(Oscillation::new(0.03, 2.0));
    worlds.push(current.clone());

    current.growth_pattern = GrowthPattern::Accelerating;
    worlds.push(current.clone());

    current.wave = Some(Oscillation::new(20.0, 1.5));
    worlds.push(current.clone());

    current.hue_shift = Some(30.0);
    worlds.push(current.clone());

    current.growth_pattern = GrowthPattern::Wave;
    worlds.push(current.clone());

    current.eclipse = true;
    worlds.push(current);

    worlds
}

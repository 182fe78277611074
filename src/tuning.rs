//! Data-driven game balance
//!
//! Every tunable number the simulation reads lives here. Loaded once at
//! startup (defaults or JSON) and shared read-only with the simulation.

use serde::{Deserialize, Serialize};

use crate::sim::factory::{BossConfig, default_boss_table, default_unlock_table};
use crate::sim::mechanics::{WorldMechanics, default_world_table, mechanics_for_world};
use crate::sim::shape::ShapeKind;
use crate::sim::state::GameMode;

/// Game balance configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Progression ===
    pub stacks_per_level: u32,
    pub levels_per_world: u32,
    /// Target zoom per level (index 0 = level 1)
    pub zoom_levels: Vec<f32>,
    /// Exponential zoom interpolation rate (per second)
    pub zoom_lerp_rate: f32,
    /// Kinds added at each level (index 0 = level 1)
    pub unlocks: Vec<Vec<ShapeKind>>,
    pub worlds: Vec<WorldMechanics>,

    // === Growth ===
    pub min_growth_speed: f32,
    pub max_growth_speed: f32,
    /// Growth speed-up per point of score
    pub score_speedup: f32,
    /// Rotation speed at score 0 (radians per second)
    pub base_rotation_speed: f32,
    /// Rotation gained per point of score
    pub rotation_per_score: f32,
    /// Cap on the score-driven rotation bonus
    pub max_rotation_bonus: f32,

    // === Shapes ===
    /// Base circle size relative to the viewport's smaller side
    pub base_size_fraction: f32,
    /// Active shape spawn size relative to the top of the stack
    pub spawn_size_fraction: f32,
    /// Spawn size when nothing is stacked
    pub fallback_spawn_size: f32,
    pub active_opacity: f32,
    /// Size ratio above which a stack counts as perfect
    pub perfect_ratio: f32,
    /// Linear RGB colors
    pub palette: Vec<[f32; 3]>,
    /// Palette index of the base shape
    pub base_color: usize,

    // === Bosses ===
    pub bosses: Vec<BossConfig>,
    /// Modes in which bosses may spawn
    pub boss_modes: Vec<GameMode>,
    pub pulse_base_frequency: f32,
    pub pulse_frequency_per_score: f32,
    pub pulse_base_amplitude: f32,
    pub pulse_amplitude_per_score: f32,
    pub erratic_amplitude: f32,
    pub erratic_frequency: f32,
    /// Boss hue rotation (degrees per second)
    pub hue_cycle_speed: f32,

    // === Time attack ===
    pub time_attack_seconds: f32,
    pub perfect_time_bonus: f32,

    // === Stack cosmetics ===
    /// Shapes further than this from the top start fading
    pub fade_age: usize,
    /// Opacity lost per tick once faded
    pub fade_step: f32,
    /// Rotation drift per tick (radians), alternating sign by index
    pub drift_step: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            stacks_per_level: 3,
            levels_per_world: 5,
            zoom_levels: vec![1.0, 1.25, 2.0, 4.5, 12.0],
            zoom_lerp_rate: 3.0,
            unlocks: default_unlock_table(),
            worlds: default_world_table(),

            min_growth_speed: 60.0,
            max_growth_speed: 110.0,
            score_speedup: 0.05,
            base_rotation_speed: 0.5,
            rotation_per_score: 0.05,
            max_rotation_bonus: 1.5,

            base_size_fraction: 0.45,
            spawn_size_fraction: 0.05,
            fallback_spawn_size: 5.0,
            active_opacity: 0.8,
            perfect_ratio: 0.95,
            palette: vec![
                [1.0, 1.0, 1.0],
                [0.96, 0.26, 0.21],
                [1.0, 0.6, 0.0],
                [1.0, 0.92, 0.23],
                [0.3, 0.69, 0.31],
                [0.13, 0.59, 0.95],
                [0.4, 0.23, 0.72],
                [0.91, 0.12, 0.39],
            ],
            base_color: 0,

            bosses: default_boss_table(),
            boss_modes: vec![GameMode::Classic, GameMode::Zen, GameMode::TimeAttack],
            pulse_base_frequency: 4.0,
            pulse_frequency_per_score: 0.1,
            pulse_base_amplitude: 30.0,
            pulse_amplitude_per_score: 0.05,
            erratic_amplitude: 2.0,
            erratic_frequency: 5.0,
            hue_cycle_speed: 100.0,

            time_attack_seconds: 60.0,
            perfect_time_bonus: 2.0,

            fade_age: 10,
            fade_step: 0.002,
            drift_step: 0.001,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str::<Tuning>(json).map(Tuning::sanitized)
    }

    /// Parse tuning if present, otherwise (or on error) use the defaults
    pub fn from_json_or_default(json: Option<&str>) -> Self {
        match json.map(Self::from_json) {
            Some(Ok(tuning)) => {
                log::info!("Loaded tuning overrides");
                tuning
            }
            Some(Err(e)) => {
                log::warn!("Invalid tuning ({}), using defaults", e);
                Self::default()
            }
            None => Self::default(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Clamp values that would break the progression formulas or random draws
    pub fn sanitized(mut self) -> Self {
        self.stacks_per_level = self.stacks_per_level.max(1);
        self.levels_per_world = self.levels_per_world.max(1);
        if self.min_growth_speed > self.max_growth_speed {
            std::mem::swap(&mut self.min_growth_speed, &mut self.max_growth_speed);
        }
        self.min_growth_speed = self.min_growth_speed.max(0.0);
        self.max_growth_speed = self.max_growth_speed.max(self.min_growth_speed);
        if self.zoom_levels.is_empty() {
            self.zoom_levels.push(1.0);
        }
        for zoom in &mut self.zoom_levels {
            *zoom = zoom.max(f32::EPSILON);
        }
        if self.palette.is_empty() {
            self.palette.push([1.0, 1.0, 1.0]);
        }
        self.base_color %= self.palette.len();
        self.active_opacity = self.active_opacity.clamp(0.0, 1.0);
        self
    }

    /// Level (1-based, within the world) reached at `score`
    pub fn level_for_score(&self, score: u32) -> u32 {
        (score / self.stacks_per_level.max(1)) % self.levels_per_world.max(1) + 1
    }

    /// World (1-based) reached at `score`
    pub fn world_for_score(&self, score: u32) -> u32 {
        score / self.stacks_per_level.max(1) / self.levels_per_world.max(1) + 1
    }

    /// Stacks already completed inside the current level
    pub fn stacks_in_level(&self, score: u32) -> u32 {
        score % self.stacks_per_level.max(1)
    }

    /// Target zoom for a level; levels past the table reuse the last entry
    pub fn zoom_for_level(&self, level: u32) -> f32 {
        let index = level.saturating_sub(1) as usize;
        self.zoom_levels
            .get(index)
            .or_else(|| self.zoom_levels.last())
            .copied()
            .unwrap_or(1.0)
    }

    pub fn mechanics_for_world(&self, world: u32) -> WorldMechanics {
        mechanics_for_world(&self.worlds, world)
    }

    /// Boss scheduled for exactly this score, if bosses run in `mode`
    pub fn boss_for_score(&self, score: u32, mode: GameMode) -> Option<&BossConfig> {
        if !self.boss_modes.contains(&mode) {
            return None;
        }
        self.bosses.iter().find(|b| b.score == score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_zoom_lookup() {
        let tuning = Tuning::default();
        assert_eq!(tuning.zoom_for_level(1), 1.0);
        assert_eq!(tuning.zoom_for_level(2), 1.25);
        assert_eq!(tuning.zoom_for_level(5), 12.0);
        assert_eq!(tuning.zoom_for_level(8), 12.0);
    }

    #[test]
    fn test_boss_lookup_respects_mode_gating() {
        let mut tuning = Tuning::default();
        assert_eq!(
            tuning.boss_for_score(5, GameMode::Zen).map(|b| b.kind),
            Some(ShapeKind::Hexagon)
        );
        assert!(tuning.boss_for_score(6, GameMode::Classic).is_none());

        tuning.boss_modes = vec![GameMode::Classic];
        assert!(tuning.boss_for_score(5, GameMode::Zen).is_none());
        assert!(tuning.boss_for_score(5, GameMode::Classic).is_some());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "stacks_per_level": 4 }"#).unwrap();
        assert_eq!(tuning.stacks_per_level, 4);
        assert_eq!(tuning.levels_per_world, 5);
        assert_eq!(tuning.bosses.len(), default_boss_table().len());
    }

    #[test]
    fn test_json_round_trip() {
        let tuning = Tuning::default();
        let json = tuning.to_json().unwrap();
        assert_eq!(Tuning::from_json(&json).unwrap(), tuning);
    }

    #[test]
    fn test_invalid_json_falls_back() {
        let tuning = Tuning::from_json_or_default(Some("{ not json"));
        assert_eq!(tuning, Tuning::default());
        assert_eq!(Tuning::from_json_or_default(None), Tuning::default());
    }

    #[test]
    fn test_sanitize_repairs_degenerate_values() {
        let tuning = Tuning::from_json(
            r#"{ "stacks_per_level": 0, "levels_per_world": 0,
                 "min_growth_speed": 90.0, "max_growth_speed": 10.0,
                 "zoom_levels": [], "palette": [], "base_color": 5 }"#,
        )
        .unwrap();
        assert_eq!(tuning.stacks_per_level, 1);
        assert_eq!(tuning.levels_per_world, 1);
        assert_eq!(tuning.min_growth_speed, 10.0);
        assert_eq!(tuning.max_growth_speed, 90.0);
        assert_eq!(tuning.zoom_levels, vec![1.0]);
        assert_eq!(tuning.palette.len(), 1);
        assert_eq!(tuning.base_color, 0);
    }

    #[test]
    fn test_world_boundary() {
        let tuning = Tuning::default();
        assert_eq!(tuning.level_for_score(14), 5);
        assert_eq!(tuning.world_for_score(14), 1);
        assert_eq!(tuning.level_for_score(15), 1);
        assert_eq!(tuning.world_for_score(15), 2);
    }

    #[test]
    fn test_formulas_survive_zero_divisors() {
        let tuning = Tuning {
            stacks_per_level: 0,
            levels_per_world: 0,
            ..Tuning::default()
        };
        assert_eq!(tuning.level_for_score(7), 1);
        assert_eq!(tuning.world_for_score(7), 8);
        assert_eq!(tuning.stacks_in_level(7), 0);
    }

    proptest! {
        #[test]
        fn prop_level_and_world_rebuild_score(
            score in 0u32..100_000,
            stacks_per_level in 1u32..10,
            levels_per_world in 1u32..10,
        ) {
            let tuning = Tuning { stacks_per_level, levels_per_world, ..Tuning::default() };
            let level = tuning.level_for_score(score);
            let world = tuning.world_for_score(score);
            prop_assert!(level >= 1 && level <= levels_per_world);
            prop_assert!(world >= 1);
            let rebuilt = (world - 1) * levels_per_world * stacks_per_level
                + (level - 1) * stacks_per_level
                + tuning.stacks_in_level(score);
            prop_assert_eq!(rebuilt, score);
        }
    }
}

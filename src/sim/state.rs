//! Game state and core simulation types
//!
//! `GameState` is the single authoritative aggregate. Level and world are
//! always derived from score; the stack only shrinks on a world transition
//! or an explicit undo.

use serde::{Deserialize, Serialize};

use super::factory::{self, BossConfig};
use super::shape::{Shape, ShapeKind};
use crate::tuning::Tuning;

/// Rule set chosen for the whole game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    /// A single miss ends the run
    #[default]
    Classic,
    /// Misses reset the active shape; undo and restart are allowed
    Zen,
    /// Classic rules against a countdown
    TimeAttack,
}

impl GameMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Classic => "classic",
            GameMode::Zen => "zen",
            GameMode::TimeAttack => "time_attack",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" => Some(GameMode::Classic),
            "zen" => Some(GameMode::Zen),
            "time_attack" | "time-attack" | "timeattack" => Some(GameMode::TimeAttack),
            _ => None,
        }
    }
}

/// Mode plus the data only that mode carries
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ModeState {
    Classic,
    Zen,
    TimeAttack { time_remaining: f32 },
}

impl ModeState {
    pub fn new(mode: GameMode, tuning: &Tuning) -> Self {
        match mode {
            GameMode::Classic => ModeState::Classic,
            GameMode::Zen => ModeState::Zen,
            GameMode::TimeAttack => ModeState::TimeAttack {
                time_remaining: tuning.time_attack_seconds,
            },
        }
    }

    pub fn mode(&self) -> GameMode {
        match self {
            ModeState::Classic => GameMode::Classic,
            ModeState::Zen => GameMode::Zen,
            ModeState::TimeAttack { .. } => GameMode::TimeAttack,
        }
    }

    pub fn time_remaining(&self) -> Option<f32> {
        match self {
            ModeState::TimeAttack { time_remaining } => Some(*time_remaining),
            ModeState::Classic | ModeState::Zen => None,
        }
    }
}

/// Notifications for the host (audio cues, HUD, persistence)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ScoreChanged(u32),
    /// New level inside the same world
    LevelUp(u32),
    /// New world (level is back to 1)
    WorldUp(u32),
    Perfect,
    Missed,
    BossSpawned(ShapeKind),
    TimeUpdate(f32),
    GameOver { final_score: u32, world: u32, level: u32 },
}

/// Flags produced by a successful stack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CommitOutcome {
    pub leveled_up: bool,
    pub world_up: bool,
    pub perfect: bool,
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Stacking order; index 0 is the permanent base
    pub shapes: Vec<Shape>,
    /// Shape currently growing
    pub active: Option<Shape>,
    pub world: u32,
    pub score: u32,
    pub level: u32,
    pub zoom: f32,
    pub target_zoom: f32,
    /// Base shape size at creation
    pub initial_size: f32,
    /// Growth rate of the active shape
    pub current_speed: f32,
    pub is_game_over: bool,
    pub mode: ModeState,
    /// Boss behaviour of the active shape
    pub boss: Option<BossConfig>,
}

impl GameState {
    /// Fresh game for a viewport whose smaller side is `viewport_min`
    pub fn new(viewport_min: f32, mode: GameMode, tuning: &Tuning) -> Self {
        let base = factory::base_shape(viewport_min, tuning);
        let zoom = tuning.zoom_for_level(1);

        Self {
            initial_size: base.size,
            shapes: vec![base],
            active: None,
            world: 1,
            score: 0,
            level: 1,
            zoom,
            target_zoom: zoom,
            current_speed: 0.0,
            is_game_over: false,
            mode: ModeState::new(mode, tuning),
            boss: None,
        }
    }

    /// Shape the active shape must fit into
    pub fn top(&self) -> Option<&Shape> {
        self.shapes.last()
    }

    pub fn game_mode(&self) -> GameMode {
        self.mode.mode()
    }

    pub fn time_remaining(&self) -> Option<f32> {
        self.mode.time_remaining()
    }

    pub fn is_boss_level(&self) -> bool {
        self.boss.is_some()
    }

    /// Single number handed to the leaderboard on game over
    pub fn progression_score(&self, tuning: &Tuning) -> u32 {
        self.world * tuning.levels_per_world + self.level
    }

    /// Set score and re-derive level, world and target zoom.
    /// Returns (level changed, world increased).
    pub fn apply_score(&mut self, score: u32, tuning: &Tuning) -> (bool, bool) {
        let old_level = self.level;
        let old_world = self.world;

        self.score = score;
        self.level = tuning.level_for_score(score);
        self.world = tuning.world_for_score(score);
        self.target_zoom = tuning.zoom_for_level(self.level);

        (
            self.level != old_level || self.world != old_world,
            self.world > old_world,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::shape::Color;

    #[test]
    fn test_initialize_classic() {
        let tuning = Tuning::default();
        let state = GameState::new(1000.0, GameMode::Classic, &tuning);

        assert_eq!(state.shapes.len(), 1);
        assert_eq!(state.shapes[0].kind, ShapeKind::Circle);
        assert!((state.shapes[0].size - 450.0).abs() < 1e-3);
        assert_eq!(state.shapes[0].color, Color::Palette(tuning.base_color));
        assert_eq!(state.initial_size, state.shapes[0].size);
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.world, 1);
        assert_eq!(state.zoom, 1.0);
        assert!(!state.is_game_over);
        assert!(state.active.is_none());
        assert_eq!(state.time_remaining(), None);
    }

    #[test]
    fn test_initialize_time_attack_seeds_timer() {
        let tuning = Tuning::default();
        let state = GameState::new(800.0, GameMode::TimeAttack, &tuning);
        assert_eq!(state.game_mode(), GameMode::TimeAttack);
        assert_eq!(state.time_remaining(), Some(tuning.time_attack_seconds));
    }

    #[test]
    fn test_apply_score_derives_progression() {
        let tuning = Tuning::default();
        let mut state = GameState::new(1000.0, GameMode::Classic, &tuning);

        assert_eq!(state.apply_score(2, &tuning), (false, false));
        assert_eq!(state.apply_score(3, &tuning), (true, false));
        assert_eq!(state.level, 2);
        assert_eq!(state.target_zoom, 1.25);

        assert_eq!(state.apply_score(15, &tuning), (true, true));
        assert_eq!((state.world, state.level), (2, 1));
        assert_eq!(state.target_zoom, 1.0);
        assert_eq!(state.progression_score(&tuning), 2 * 5 + 1);
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!(GameMode::parse("ZEN"), Some(GameMode::Zen));
        assert_eq!(GameMode::parse("time-attack"), Some(GameMode::TimeAttack));
        assert_eq!(GameMode::parse("arcade"), None);
        for mode in [GameMode::Classic, GameMode::Zen, GameMode::TimeAttack] {
            assert_eq!(GameMode::parse(mode.as_str()), Some(mode));
        }
    }
}

//! Simulation transitions and the per-frame tick
//!
//! Every transition is total: when its precondition does not hold (game over,
//! no active shape, wrong mode) it leaves the state untouched and reports a
//! neutral result. Wall-clock driven effects read `TickInput::clock`, never
//! ambient time.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::factory;
use super::geometry::is_contained;
use super::shape::Color;
use super::state::{CommitOutcome, GameEvent, GameMode, GameState, ModeState};
use crate::consts::{MAX_FRAME_DT, ZOOM_SNAP_EPSILON};
use crate::tuning::Tuning;

/// Input for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Seconds since the previous frame
    pub dt: f32,
    /// Host clock in seconds, drives boss hue/pulse/erratic effects
    pub clock: f32,
    /// Player tapped this frame
    pub tap: bool,
    /// Discard the active shape and draw a new one (zen)
    pub restart_active: bool,
    /// Pop the last stacked shape (zen)
    pub undo: bool,
}

/// Result of a tap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapResult {
    /// Nothing was growing, or the game is over
    Ignored,
    Stacked(CommitOutcome),
    Missed,
}

/// Turns host timestamps into frame deltas.
///
/// The first frame after a (re)start only records a baseline.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last: Option<f64>,
    elapsed: f64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.last = None;
        self.elapsed = 0.0;
    }

    /// Feed a timestamp in seconds; returns the clamped delta, or `None` on the baseline frame
    pub fn advance(&mut self, now: f64) -> Option<f32> {
        let last = self.last.replace(now)?;
        let dt = ((now - last).max(0.0) as f32).min(MAX_FRAME_DT);
        self.elapsed += dt as f64;
        Some(dt)
    }

    /// Accumulated seconds since the baseline frame
    pub fn elapsed(&self) -> f32 {
        self.elapsed as f32
    }
}

/// Draw the next active shape (boss if `score + 1` is scheduled)
pub fn spawn<R: Rng>(state: &mut GameState, tuning: &Tuning, rng: &mut R) {
    if state.is_game_over {
        return;
    }

    let boss = tuning
        .boss_for_score(state.score + 1, state.game_mode())
        .cloned();
    let shape = factory::active_shape(rng, tuning, state.level, state.top(), boss.as_ref());
    state.current_speed = factory::draw_growth_speed(rng, tuning);

    match &boss {
        Some(b) => log::info!("Boss {} at score {}", b.kind.as_str(), b.score),
        None => log::debug!(
            "Spawned {} size={:.2} speed={:.1}",
            shape.kind.as_str(),
            shape.size,
            state.current_speed
        ),
    }

    state.active = Some(shape);
    state.boss = boss;
}

/// Grow and rotate the active shape
pub fn tick_grow(state: &mut GameState, tuning: &Tuning, dt: f32, clock: f32) {
    if state.is_game_over || state.active.is_none() {
        return;
    }

    let score = state.score as f32;
    let pattern = tuning
        .mechanics_for_world(state.world)
        .growth_pattern
        .multiplier(tuning.stacks_in_level(state.score), tuning.stacks_per_level);
    let (growth_mult, rotation_mult) = state
        .boss
        .as_ref()
        .map_or((1.0, 1.0), |b| (b.growth_multiplier, b.rotation_multiplier));

    // Dividing by zoom keeps on-screen growth speed stable
    let growth = state.current_speed * (1.0 + tuning.score_speedup * score) * pattern * growth_mult
        / state.zoom.max(f32::EPSILON);

    let mut rotation_speed = (tuning.base_rotation_speed
        + (tuning.rotation_per_score * score).min(tuning.max_rotation_bonus))
        * rotation_mult;

    let mut pulse = 0.0;
    let mut hue = None;
    if let Some(boss) = &state.boss {
        if boss.erratic {
            rotation_speed *=
                1.0 + tuning.erratic_amplitude * (clock * tuning.erratic_frequency).sin();
        }
        if boss.pulse {
            let frequency = tuning.pulse_base_frequency + tuning.pulse_frequency_per_score * score;
            let amplitude =
                tuning.pulse_base_amplitude * (1.0 + tuning.pulse_amplitude_per_score * score);
            pulse = (clock * frequency).sin() * amplitude;
        }
        if boss.hue_cycle {
            hue = Some((clock * tuning.hue_cycle_speed).rem_euclid(360.0));
        }
    }

    if let Some(active) = state.active.as_mut() {
        active.size = (active.size + (growth + pulse) * dt).max(0.0);
        active.rotation += rotation_speed * dt;
        if let Some(hue) = hue {
            active.color = Color::Hue(hue);
        }
    }
}

/// Whether the active shape still fits inside the top of the stack
pub fn check_containment(state: &GameState) -> bool {
    match (&state.active, state.top()) {
        (Some(active), Some(top)) => is_contained(active, top),
        _ => true,
    }
}

/// Stack the active shape. `None` when nothing was growing.
pub fn commit(state: &mut GameState, tuning: &Tuning) -> Option<CommitOutcome> {
    if state.is_game_over {
        return None;
    }
    let mut active = state.active.take()?;

    let top_size = state.top().map_or(0.0, |t| t.size);
    let perfect = top_size > 0.0 && active.size / top_size > tuning.perfect_ratio;

    active.opacity = 1.0;
    state.shapes.push(active);
    state.boss = None;

    let (leveled_up, world_up) = state.apply_score(state.score + 1, tuning);
    if world_up {
        // The stack restarts from the original base each world
        state.shapes.truncate(1);
        if let Some(base) = state.shapes.first_mut() {
            base.opacity = 1.0;
        }
        log::info!("World {} reached at score {}", state.world, state.score);
    } else if leveled_up {
        log::info!("Level {} reached at score {}", state.level, state.score);
    }

    if perfect && let ModeState::TimeAttack { time_remaining } = &mut state.mode {
        *time_remaining += tuning.perfect_time_bonus;
    }

    Some(CommitOutcome {
        leveled_up,
        world_up,
        perfect,
    })
}

/// Apply a failed placement. Returns `false` when nothing was growing.
pub fn miss(state: &mut GameState, tuning: &Tuning) -> bool {
    if state.is_game_over {
        return false;
    }
    let reset_size = factory::spawn_size(state.top(), tuning);
    let Some(active) = state.active.as_mut() else {
        return false;
    };

    match state.mode {
        ModeState::Zen => active.size = reset_size,
        ModeState::Classic | ModeState::TimeAttack { .. } => state.is_game_over = true,
    }
    true
}

/// Player tap: stack when contained, otherwise miss
pub fn tap(state: &mut GameState, tuning: &Tuning) -> TapResult {
    if state.is_game_over || state.active.is_none() {
        return TapResult::Ignored;
    }

    if check_containment(state) {
        commit(state, tuning).map_or(TapResult::Ignored, TapResult::Stacked)
    } else if miss(state, tuning) {
        TapResult::Missed
    } else {
        TapResult::Ignored
    }
}

/// Count down the time attack clock. Returns the remaining time in time attack.
pub fn tick_timer(state: &mut GameState, dt: f32) -> Option<f32> {
    if state.is_game_over {
        return None;
    }
    let ModeState::TimeAttack { time_remaining } = &mut state.mode else {
        return None;
    };

    *time_remaining = (*time_remaining - dt).max(0.0);
    let remaining = *time_remaining;
    if remaining <= 0.0 {
        state.is_game_over = true;
    }
    Some(remaining)
}

/// Ease zoom toward its target, snapping once close enough
pub fn tick_zoom(state: &mut GameState, dt: f32, lerp_rate: f32) {
    let factor = (lerp_rate * dt).clamp(0.0, 1.0);
    state.zoom += (state.target_zoom - state.zoom) * factor;
    if (state.target_zoom - state.zoom).abs() < ZOOM_SNAP_EPSILON {
        state.zoom = state.target_zoom;
    }
}

/// Fade old stacked shapes and drift the tower's rotation
pub fn tick_stack_cosmetics(state: &mut GameState, tuning: &Tuning) {
    if state.is_game_over {
        return;
    }

    let top = state.shapes.len().saturating_sub(1);
    for (i, shape) in state.shapes.iter_mut().enumerate() {
        if top - i > tuning.fade_age {
            shape.opacity = (shape.opacity - tuning.fade_step).max(0.0);
        }
        shape.rotation += if i % 2 == 0 {
            tuning.drift_step
        } else {
            -tuning.drift_step
        };
    }
}

/// Zen: pop the last stacked shape and roll score back by one
pub fn undo(state: &mut GameState, tuning: &Tuning) -> bool {
    if state.is_game_over || state.game_mode() != GameMode::Zen || state.shapes.len() <= 1 {
        return false;
    }

    state.shapes.pop();
    state.apply_score(state.score.saturating_sub(1), tuning);
    state.active = None;
    state.boss = None;
    true
}

/// Zen: throw away the active shape and draw a fresh one
pub fn restart_active<R: Rng>(state: &mut GameState, tuning: &Tuning, rng: &mut R) -> bool {
    if state.is_game_over || state.game_mode() != GameMode::Zen {
        return false;
    }

    state.active = None;
    state.boss = None;
    spawn(state, tuning, rng);
    true
}

/// Owns tuning, RNG and state; runs one frame per `tick` call
#[derive(Debug, Clone)]
pub struct Simulation {
    tuning: Tuning,
    rng: Pcg32,
    state: GameState,
    viewport_min: f32,
}

impl Simulation {
    pub fn new(tuning: Tuning, viewport_min: f32, mode: GameMode, seed: u64) -> Self {
        let tuning = tuning.sanitized();
        let state = GameState::new(viewport_min, mode, &tuning);
        log::info!(
            "New {} game (viewport {}, seed {})",
            mode.as_str(),
            viewport_min,
            seed
        );
        Self {
            tuning,
            rng: Pcg32::seed_from_u64(seed),
            state,
            viewport_min,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Start over with the same tuning; the RNG stream continues
    pub fn new_game(&mut self, mode: GameMode) {
        self.state = GameState::new(self.viewport_min, mode, &self.tuning);
        log::info!("New {} game", mode.as_str());
    }

    fn spawn_next(&mut self, events: &mut Vec<GameEvent>) {
        spawn(&mut self.state, &self.tuning, &mut self.rng);
        if let Some(boss) = &self.state.boss {
            events.push(GameEvent::BossSpawned(boss.kind));
        }
    }

    /// Advance one frame.
    ///
    /// Explicit requests (restart, undo) run first, then the tap, then the
    /// automatic timer/growth/containment/zoom/cosmetic updates.
    pub fn tick(&mut self, input: &TickInput) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if self.state.is_game_over {
            return events;
        }
        let tuning = &self.tuning;
        let dt = input.dt.max(0.0);

        if input.restart_active && restart_active(&mut self.state, tuning, &mut self.rng) {
            if let Some(boss) = &self.state.boss {
                events.push(GameEvent::BossSpawned(boss.kind));
            }
        }

        if input.undo && undo(&mut self.state, tuning) {
            events.push(GameEvent::ScoreChanged(self.state.score));
        }

        if self.state.active.is_none() {
            self.spawn_next(&mut events);
        }

        let tuning = &self.tuning;
        if input.tap {
            match tap(&mut self.state, tuning) {
                TapResult::Stacked(outcome) => {
                    events.push(GameEvent::ScoreChanged(self.state.score));
                    if outcome.perfect {
                        events.push(GameEvent::Perfect);
                    }
                    if outcome.world_up {
                        events.push(GameEvent::WorldUp(self.state.world));
                    } else if outcome.leveled_up {
                        events.push(GameEvent::LevelUp(self.state.level));
                    }
                }
                TapResult::Missed => events.push(GameEvent::Missed),
                TapResult::Ignored => {}
            }
        }

        if !self.state.is_game_over {
            if let Some(remaining) = tick_timer(&mut self.state, dt) {
                events.push(GameEvent::TimeUpdate(remaining));
            }
            tick_grow(&mut self.state, tuning, dt, input.clock);
            if !check_containment(&self.state) && miss(&mut self.state, tuning) {
                events.push(GameEvent::Missed);
            }
            tick_zoom(&mut self.state, dt, tuning.zoom_lerp_rate);
            tick_stack_cosmetics(&mut self.state, tuning);
        }

        if self.state.is_game_over {
            log::info!(
                "Game over: score {} (world {}, level {})",
                self.state.score,
                self.state.world,
                self.state.level
            );
            events.push(GameEvent::GameOver {
                final_score: self.state.score,
                world: self.state.world,
                level: self.state.level,
            });
        }

        events
    }
}

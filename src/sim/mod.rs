//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Time only enters through `TickInput` (dt and host clock)
//! - Seeded RNG only
//! - No rendering, audio or platform dependencies

pub mod factory;
pub mod geometry;
pub mod mechanics;
pub mod shape;
pub mod state;
pub mod tick;

pub use factory::BossConfig;
pub use geometry::{contains_point, is_contained, point_in_polygon, vertices};
pub use mechanics::{GrowthPattern, Oscillation, WorldMechanics};
pub use shape::{Color, Shape, ShapeKind};
pub use state::{CommitOutcome, GameEvent, GameMode, GameState, ModeState};
pub use tick::{
    FrameClock, Simulation, TapResult, TickInput, check_containment, commit, miss,
    restart_active, spawn, tap, tick_grow, tick_stack_cosmetics, tick_timer, tick_zoom, undo,
};

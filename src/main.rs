//! Shape Stack headless host
//!
//! Drives a `Simulation` with a simple autoplayer, logging events the way a
//! real host would route them to audio and HUD, then records the run on the
//! leaderboard.
//!
//! Usage: `shape-stack [classic|zen|time_attack] [seed] [frames]`
//! Set `SHAPE_STACK_TUNING` to a JSON file to override game balance.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    use shape_stack::sim::{FrameClock, GameEvent, GameMode, Simulation, TickInput};
    use shape_stack::{HighScores, Tuning};

    const FRAME_RATE: f64 = 60.0;
    const DEFAULT_FRAMES: u64 = 60 * 60 * 3;
    const VIEWPORT_MIN: f32 = 800.0;

    /// Taps once the active shape reaches a drawn fraction of the top shape
    struct AutoPlayer {
        rng: Pcg32,
        target_ratio: Option<f32>,
    }

    impl AutoPlayer {
        fn new(seed: u64) -> Self {
            Self {
                rng: Pcg32::seed_from_u64(seed.wrapping_add(0x5eed)),
                target_ratio: None,
            }
        }

        fn wants_tap(&mut self, sim: &Simulation) -> bool {
            let state = sim.state();
            let (Some(active), Some(top)) = (&state.active, state.top()) else {
                self.target_ratio = None;
                return false;
            };

            let target = *self
                .target_ratio
                .get_or_insert_with(|| self.rng.random_range(0.35..0.85));
            if active.size >= top.size * target {
                self.target_ratio = None;
                true
            } else {
                false
            }
        }
    }

    struct Args {
        mode: GameMode,
        seed: u64,
        frames: u64,
    }

    fn parse_args() -> Args {
        let mut args = std::env::args().skip(1);

        let mode = match args.next() {
            Some(s) => GameMode::parse(&s).unwrap_or_else(|| {
                log::warn!("Unknown mode '{}', using classic", s);
                GameMode::Classic
            }),
            None => GameMode::Classic,
        };
        let seed = args
            .next()
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(|| {
                std::time::SystemTime::now()
                    .duration_since(std::time::UNIX_EPOCH)
                    .map(|d| d.as_secs())
                    .unwrap_or(0)
            });
        let frames = args
            .next()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_FRAMES);

        Args { mode, seed, frames }
    }

    fn load_tuning() -> Tuning {
        let json = std::env::var("SHAPE_STACK_TUNING")
            .ok()
            .and_then(|path| match std::fs::read_to_string(&path) {
                Ok(json) => Some(json),
                Err(e) => {
                    log::warn!("Cannot read tuning file {}: {}", path, e);
                    None
                }
            });
        Tuning::from_json_or_default(json.as_deref())
    }

    fn now_ms() -> f64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs_f64() * 1000.0)
            .unwrap_or(0.0)
    }

    fn report(event: &GameEvent) {
        match event {
            GameEvent::ScoreChanged(score) => log::debug!("Score {}", score),
            GameEvent::LevelUp(level) => println!("  level {}", level),
            GameEvent::WorldUp(world) => println!("  world {}!", world),
            GameEvent::Perfect => println!("  perfect!"),
            GameEvent::Missed => println!("  missed"),
            GameEvent::BossSpawned(kind) => println!("  boss: {}", kind.as_str()),
            GameEvent::TimeUpdate(_) => {}
            GameEvent::GameOver {
                final_score,
                world,
                level,
            } => println!(
                "  game over: score {} (world {}, level {})",
                final_score, world, level
            ),
        }
    }

    pub fn run() {
        env_logger::init();
        let args = parse_args();
        let tuning = load_tuning();
        log::info!(
            "Shape Stack starting ({} mode, seed {}, {} frames)",
            args.mode.as_str(),
            args.seed,
            args.frames
        );

        let mut sim = Simulation::new(tuning, VIEWPORT_MIN, args.mode, args.seed);
        let mut player = AutoPlayer::new(args.seed);
        let mut clock = FrameClock::new();
        let mut high_scores = HighScores::new();

        for frame in 0..args.frames {
            let Some(dt) = clock.advance(frame as f64 / FRAME_RATE) else {
                continue;
            };
            let input = TickInput {
                dt,
                clock: clock.elapsed(),
                tap: player.wants_tap(&sim),
                ..Default::default()
            };

            let events = sim.tick(&input);
            events.iter().for_each(report);
            if sim.state().is_game_over {
                break;
            }
        }

        let state = sim.state();
        let progression = state.progression_score(sim.tuning());
        println!(
            "{} run: score {}, world {}, level {}, {} shapes stacked{}",
            state.game_mode().as_str(),
            state.score,
            state.world,
            state.level,
            state.shapes.len().saturating_sub(1),
            if state.is_game_over { "" } else { " (still alive)" }
        );

        let rank = high_scores.add_score(
            progression,
            state.world,
            state.level,
            state.game_mode(),
            now_ms(),
        );
        if let Some(rank) = rank {
            println!("Leaderboard rank #{}", rank);
        }
        match high_scores.to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => log::warn!("Failed to serialize high scores: {}", e),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    native::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Web hosts embed the library directly
}

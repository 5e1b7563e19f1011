//! Lane Flyer entry point
//!
//! The browser build is driven from JavaScript through `lane_flyer::web`.
//! Natively this runs a headless demo session with the autopilot:
//!
//! `lane-flyer [seed] [ticks] [config.json | easy | normal | hard]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use lane_flyer::sim::{GameEvent, GamePhase, GameState, TickInput, tick};
    use lane_flyer::{Difficulty, GameConfig};

    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let seed = args
        .first()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0)
        });
    let ticks = args
        .get(1)
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(60 * 60);

    let config = match args.get(2) {
        None => Ok(GameConfig::default()),
        Some(arg) => match Difficulty::from_str(arg) {
            Some(difficulty) => Ok(GameConfig::from_difficulty(difficulty)),
            None => std::fs::read_to_string(arg)
                .map_err(|e| format!("cannot read {arg}: {e}"))
                .and_then(|json| GameConfig::from_json(&json).map_err(|e| e.to_string())),
        },
    };
    let config = match config {
        Ok(config) => config,
        Err(err) => {
            log::error!("{}", err);
            std::process::exit(1);
        }
    };

    let mut state = match GameState::new(seed, config) {
        Ok(state) => state,
        Err(err) => {
            log::error!("Invalid configuration: {}", err);
            std::process::exit(1);
        }
    };

    log::info!("Lane Flyer (native) demo: seed {}, {} ticks", seed, ticks);

    let demo = TickInput {
        idle_mode: true,
        ..Default::default()
    };
    let restart = TickInput {
        restart: true,
        ..Default::default()
    };

    let mut crashes = 0u32;
    let mut ground_hits = 0u32;
    for _ in 0..ticks {
        let input = if state.phase == GamePhase::GameOver {
            &restart
        } else {
            &demo
        };
        for event in tick(&mut state, input) {
            match event {
                GameEvent::Passed { score } => log::debug!("Passed generation, score {}", score),
                GameEvent::Collision { lane, .. } => {
                    crashes += 1;
                    log::info!("Crashed into lane {}", lane);
                }
                GameEvent::GroundCollision => {
                    ground_hits += 1;
                    log::info!("Hit the ground");
                }
                _ => {}
            }
        }
    }

    println!(
        "seed {}: {} runs finished, best score {}, {} obstacle crashes, {} ground hits",
        seed, state.score.runs, state.score.best, crashes, ground_hits
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is lane_flyer::web::wasm_start, this is just to satisfy the compiler
}

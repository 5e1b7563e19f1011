//! Fixed-step simulation tick
//!
//! One tick, in order: flap intent, fighter update, ground check, track
//! update (spawn + advance), crossing check (score or crash), retire.

use std::cmp::Ordering;

use super::fighter::FlapIntent;
use super::state::{GameEvent, GamePhase, GameState};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Flap this tick; the caller clears it after the tick
    pub flap: FlapIntent,
    /// Pause toggle
    pub pause: bool,
    /// Abandon the current run and return to Ready
    pub restart: bool,
    /// Idle/demo mode - autopilot plays the game
    pub idle_mode: bool,
}

/// Advance the game state by one tick, returning what happened
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    if input.restart {
        return state.reset();
    }

    let mut events = Vec::new();

    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                events.push(GameEvent::Paused);
                return events;
            }
            GamePhase::Paused => {
                state.phase = GamePhase::Playing;
                events.push(GameEvent::Resumed);
            }
            _ => {}
        }
    }

    let flap = if input.idle_mode {
        autopilot(state)
    } else {
        input.flap
    };

    match state.phase {
        GamePhase::Ready => {
            // First flap launches the run; the demo launches itself
            if flap.shift().is_some() || input.idle_mode {
                state.phase = GamePhase::Playing;
                events.push(GameEvent::RunStarted);
                log::info!("Run started");
                step(state, flap, &mut events);
            }
        }
        GamePhase::Playing => step(state, flap, &mut events),
        GamePhase::Paused | GamePhase::GameOver => {}
    }

    events
}

fn step(state: &mut GameState, flap: FlapIntent, events: &mut Vec<GameEvent>) {
    state.time_ticks += 1;

    if let Some(shift) = flap.shift() {
        state.fighter.flap(shift);
    }
    state.fighter.update();

    let ground = state.config.ground_level;
    if state.fighter.position().y < ground {
        if state.config.ground_is_fatal {
            events.push(GameEvent::GroundCollision);
            state.end_run(events);
            return;
        }
        state.fighter.clamp_to_ground(ground);
    }

    for id in state.track.update(&mut state.rng) {
        events.push(GameEvent::GroupSpawned { id });
    }

    let position = state.fighter_position();
    if state.track.has_just_passed(position) {
        if let Some(group) = state.track.colliding_group(position) {
            events.push(GameEvent::Collision {
                group: group.id,
                lane: group.lane,
            });
            state.end_run(events);
            return;
        }
        let score = state.score.increment();
        events.push(GameEvent::Passed { score });
    }

    for id in state.track.retire_completed() {
        events.push(GameEvent::GroupRetired { id });
    }
}

/// Demo pilot: head for the nearest gap of the next generation and flap
/// whenever falling below its center.
fn autopilot(state: &GameState) -> FlapIntent {
    let fighter = &state.fighter;
    let lane = fighter.lane();
    let max_lane = fighter.layout().max_lane();

    let (target_lane, target_y) = state
        .track
        .approaching(state.config.fighter_depth)
        .filter_map(|g| g.gap_box().map(|gap| (g.lane, gap.center.y)))
        .min_by_key(|&(gap_lane, _)| gap_lane.abs_diff(lane))
        .unwrap_or((max_lane / 2, state.config.fighter.start_height));

    if fighter.velocity() > 0.0 || fighter.position().y >= target_y {
        return FlapIntent::None;
    }

    match target_lane.cmp(&lane) {
        Ordering::Less => FlapIntent::Left,
        Ordering::Greater => FlapIntent::Right,
        // Flap into the outer wall when possible, it keeps the lane
        Ordering::Equal if lane == 0 => FlapIntent::Left,
        Ordering::Equal if lane == max_lane => FlapIntent::Right,
        Ordering::Equal if state.time_ticks % 2 == 0 => FlapIntent::Left,
        Ordering::Equal => FlapIntent::Right,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use glam::Vec3;

    fn flap(intent: FlapIntent) -> TickInput {
        TickInput {
            flap: intent,
            ..Default::default()
        }
    }

    fn new_state(seed: u64) -> GameState {
        GameState::new(seed, GameConfig::default()).unwrap()
    }

    #[test]
    fn test_ready_until_first_flap() {
        let mut state = new_state(12345);

        let events = tick(&mut state, &TickInput::default());
        assert!(events.is_empty());
        assert_eq!(state.phase, GamePhase::Ready);
        assert_eq!(state.time_ticks, 0);

        let events = tick(&mut state, &flap(FlapIntent::Right));
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(events[0], GameEvent::RunStarted);
        assert_eq!(state.fighter.lane(), 1);
        // The opening tick already spawned the first generation
        let spawned = events
            .iter()
            .filter(|e| matches!(e, GameEvent::GroupSpawned { .. }))
            .count();
        assert_eq!(spawned, 5);
    }

    #[test]
    fn test_pause_toggle() {
        let mut state = new_state(1);
        tick(&mut state, &flap(FlapIntent::Right));

        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        assert_eq!(tick(&mut state, &pause), vec![GameEvent::Paused]);
        assert_eq!(state.phase, GamePhase::Paused);

        // No simulation while paused
        let ticks = state.time_ticks;
        tick(&mut state, &flap(FlapIntent::Left));
        assert_eq!(state.time_ticks, ticks);

        let events = tick(&mut state, &pause);
        assert_eq!(events[0], GameEvent::Resumed);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.time_ticks, ticks + 1);
    }

    #[test]
    fn test_falling_to_ground_ends_run() {
        let mut state = new_state(2);
        tick(&mut state, &flap(FlapIntent::Right));

        let mut events = Vec::new();
        for _ in 0..200 {
            events = tick(&mut state, &TickInput::default());
            if state.phase == GamePhase::GameOver {
                break;
            }
        }
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(events.contains(&GameEvent::GroundCollision));
        assert!(state.fighter.position().y < state.config.ground_level);

        // Frozen after game over
        let ticks = state.time_ticks;
        assert!(tick(&mut state, &flap(FlapIntent::Left)).is_empty());
        assert_eq!(state.time_ticks, ticks);
    }

    #[test]
    fn test_non_fatal_ground_pins_fighter() {
        let config = GameConfig {
            ground_is_fatal: false,
            ..Default::default()
        };
        let mut state = GameState::new(2, config).unwrap();
        tick(&mut state, &flap(FlapIntent::Right));
        for _ in 0..120 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.fighter.position().y, state.config.ground_level);
    }

    #[test]
    fn test_wall_lane_crash() {
        // Start in lane 0, which is always a wall, and float at mid height
        let config = GameConfig {
            ground_is_fatal: false,
            ground_level: -0.5,
            ..Default::default()
        };
        let mut state = GameState::new(4, config).unwrap();
        tick(&mut state, &flap(FlapIntent::Left));

        let mut last = Vec::new();
        for _ in 0..400 {
            last = tick(&mut state, &TickInput::default());
            if state.phase == GamePhase::GameOver {
                break;
            }
        }
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(last.iter().any(|e| matches!(e, GameEvent::Collision { lane: 0, .. })));
        assert_eq!(state.score.current, 0);
        assert_eq!(state.score.runs, 1);
    }

    /// Three open lanes of three slices: every gap is the middle slice,
    /// spanning y in [-4/3, 4/3]. The fighter rests on a raised ground.
    fn resting_state(rest_height: f32) -> GameState {
        let mut config = GameConfig {
            ground_is_fatal: false,
            ground_level: rest_height,
            ..Default::default()
        };
        config.lanes.count = 3;
        config.lanes.span = 6.0;
        config.track.segments_per_group = 3;
        config.track.solid_boundary_lanes = false;
        GameState::new(21, config).unwrap()
    }

    fn run_until_crossing(state: &mut GameState) -> Vec<GameEvent> {
        tick(state, &flap(FlapIntent::Left));
        for _ in 0..400 {
            let events = tick(state, &TickInput::default());
            if events
                .iter()
                .any(|e| matches!(e, GameEvent::Passed { .. } | GameEvent::Collision { .. }))
            {
                return events;
            }
        }
        panic!("no crossing within 400 ticks");
    }

    #[test]
    fn test_pass_through_gap_scores() {
        let mut state = resting_state(-0.5);
        let events = run_until_crossing(&mut state);
        assert!(events.contains(&GameEvent::Passed { score: 1 }));
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score.current, 1);
    }

    #[test]
    fn test_solid_slice_crash() {
        let mut state = resting_state(-3.0);
        let events = run_until_crossing(&mut state);
        assert!(events.iter().any(|e| matches!(e, GameEvent::Collision { lane: 0, .. })));
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.score.current, 0);
    }

    #[test]
    fn test_crossing_outcome_matches_track_query() {
        let mut state = new_state(6);
        tick(&mut state, &TickInput { idle_mode: true, ..Default::default() });
        for _ in 0..2000 {
            let events = tick(&mut state, &TickInput { idle_mode: true, ..Default::default() });
            let pos: Vec3 = state.fighter_position();
            let crossed = state.track.has_just_passed(pos);
            let passed = events.iter().any(|e| matches!(e, GameEvent::Passed { .. }));
            let crashed = events.iter().any(|e| matches!(e, GameEvent::Collision { .. }));
            if passed {
                assert!(!crashed);
            }
            if crashed {
                assert!(crossed && state.track.collides(pos));
                break;
            }
            if state.phase == GamePhase::GameOver {
                break;
            }
        }
    }

    #[test]
    fn test_restart_resets_run() {
        let mut state = new_state(7);
        tick(&mut state, &flap(FlapIntent::Right));
        for _ in 0..30 {
            tick(&mut state, &TickInput::default());
        }
        let live = state.track.len();
        assert!(live > 0);

        let events = tick(
            &mut state,
            &TickInput {
                restart: true,
                ..Default::default()
            },
        );
        assert_eq!(state.phase, GamePhase::Ready);
        assert_eq!(state.time_ticks, 0);
        assert!(state.track.is_empty());
        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(e, GameEvent::GroupRetired { .. }))
                .count(),
            live
        );
    }

    #[test]
    fn test_spawn_and_retire_events_balance() {
        let config = GameConfig {
            ground_is_fatal: false,
            ..Default::default()
        };
        let mut state = GameState::new(8, config).unwrap();
        let mut live = std::collections::HashSet::new();
        for _ in 0..600 {
            let events = tick(&mut state, &TickInput { idle_mode: true, ..Default::default() });
            for event in events {
                match event {
                    GameEvent::GroupSpawned { id } => assert!(live.insert(id)),
                    GameEvent::GroupRetired { id } => assert!(live.remove(&id)),
                    _ => {}
                }
            }
            if state.phase == GamePhase::GameOver {
                break;
            }
        }
        let tracked: std::collections::HashSet<_> = state.track.groups().iter().map(|g| g.id).collect();
        assert_eq!(live, tracked);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = new_state(99999);
        let mut state2 = new_state(99999);

        let inputs = [
            flap(FlapIntent::Right),
            TickInput::default(),
            flap(FlapIntent::Right),
            TickInput {
                idle_mode: true,
                ..Default::default()
            },
        ];

        for _ in 0..100 {
            for input in &inputs {
                let a = tick(&mut state1, input);
                let b = tick(&mut state2, input);
                assert_eq!(a, b);
            }
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.fighter.position(), state2.fighter.position());
        let gaps1: Vec<_> = state1.track.groups().iter().map(|g| g.gap).collect();
        let gaps2: Vec<_> = state2.track.groups().iter().map(|g| g.gap).collect();
        assert_eq!(gaps1, gaps2);
    }
}

//! Browser facade for the JavaScript renderer
//!
//! The page owns the scene graph, input and audio. It queues intents here,
//! calls `tick` once per frame and reacts to the returned events; meshes are
//! keyed by the group ids carried in `GroupSpawned` / `GroupRetired`.

use wasm_bindgen::prelude::*;

use crate::config::{Difficulty, GameConfig};
use crate::sim::{GamePhase, GameState, LaneShift, TickInput, tick};

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
}

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Game instance holding all simulation state
#[wasm_bindgen]
pub struct WebGame {
    state: GameState,
    input: TickInput,
}

#[wasm_bindgen]
impl WebGame {
    /// `seed` defaults to the current time; `config_json` may be a full or
    /// partial `GameConfig`, or a difficulty name.
    #[wasm_bindgen(constructor)]
    pub fn new(seed: Option<f64>, config_json: Option<String>) -> Result<WebGame, JsValue> {
        let seed = seed.unwrap_or_else(js_sys::Date::now) as u64;
        let config = match config_json.as_deref() {
            None => GameConfig::default(),
            Some(text) => match Difficulty::from_str(text) {
                Some(difficulty) => GameConfig::from_difficulty(difficulty),
                None => GameConfig::from_json(text).map_err(to_js)?,
            },
        };
        let state = GameState::new(seed, config).map_err(to_js)?;
        Ok(WebGame {
            state,
            input: TickInput::default(),
        })
    }

    /// Queue a flap for the next tick: -1 = left, +1 = right
    pub fn flap(&mut self, direction: i32) -> Result<(), JsValue> {
        let shift = LaneShift::try_from(direction).map_err(to_js)?;
        self.input.flap = shift.into();
        Ok(())
    }

    pub fn toggle_pause(&mut self) {
        self.input.pause = true;
    }

    pub fn restart(&mut self) {
        self.input.restart = true;
    }

    pub fn set_idle_mode(&mut self, idle: bool) {
        self.input.idle_mode = idle;
    }

    /// Run one tick and return its events as a JSON array
    pub fn tick(&mut self) -> Result<String, JsValue> {
        let events = tick(&mut self.state, &self.input);

        // Clear one-shot inputs after processing
        self.input.flap = Default::default();
        self.input.pause = false;
        self.input.restart = false;

        serde_json::to_string(&events).map_err(to_js)
    }

    /// Every live slice as a JSON array of segment views
    pub fn segments(&self) -> Result<String, JsValue> {
        let segments: Vec<_> = self.state.track.live_segments().collect();
        serde_json::to_string(&segments).map_err(to_js)
    }

    pub fn fighter_x(&self) -> f32 {
        self.state.fighter.position().x
    }

    pub fn fighter_y(&self) -> f32 {
        self.state.fighter.position().y
    }

    pub fn fighter_z(&self) -> f32 {
        self.state.config.fighter_depth
    }

    pub fn lane(&self) -> u32 {
        self.state.fighter.lane()
    }

    pub fn score(&self) -> f64 {
        self.state.score.current as f64
    }

    pub fn best(&self) -> f64 {
        self.state.score.best as f64
    }

    /// Seed a best score restored by the page
    pub fn set_best(&mut self, best: f64) {
        self.state.score.best = best.max(0.0) as u64;
    }

    pub fn phase(&self) -> String {
        match self.state.phase {
            GamePhase::Ready => "ready",
            GamePhase::Playing => "playing",
            GamePhase::Paused => "paused",
            GamePhase::GameOver => "game_over",
        }
        .to_string()
    }
}

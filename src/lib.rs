use serde::Serialize;
use serde_wasm_bindgen::Serializer;
use wasm_bindgen::prelude::*;

pub mod board;
pub mod game;
pub mod types;

use crate::game::Game;
use crate::types::{Coord, Direction};

/// Board edge length in pixels assumed by hosts that do not pass their own.
pub const DEFAULT_BOARD_EXTENT: f64 = 480.0;

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}

#[wasm_bindgen]
pub fn default_board_extent() -> f64 {
    DEFAULT_BOARD_EXTENT
}

/// JavaScript handle around one `Game`.
///
/// Contract: after game over, clicks and moves are accepted but change nothing.
#[wasm_bindgen]
pub struct WasmGame {
    inner: Game,
}

#[wasm_bindgen]
impl WasmGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self { inner: Game::new() }
    }

    pub fn restart(&mut self) {
        self.inner.initialize();
    }

    /// Selects the cell under a pointer position for the player on turn.
    /// Returns the selected piece label, if any.
    pub fn click(&mut self, px: f64, py: f64, board_extent: f64) -> Option<String> {
        let player = self.inner.current_player();
        let pos = Coord::from_pixel(px, py, board_extent)?;
        self.inner.select_at(pos, player).map(|piece| piece.to_string())
    }

    /// Applies a move given a direction code (`L`, `R`, `F`, `B`, `FL`, `FR`, `BL`, `BR`).
    /// Returns the outcome as `{ kind, ... }`.
    pub fn move_piece(&mut self, code: &str) -> Result<JsValue, JsError> {
        let direction: Direction = code.parse()?;
        let outcome = self.inner.apply_move(direction);
        to_js(&outcome)
    }

    pub fn snapshot(&self) -> Result<JsValue, JsError> {
        to_js(&self.inner.snapshot())
    }

    pub fn status(&self) -> String {
        self.inner.status_line()
    }

    pub fn selection(&self) -> String {
        self.inner.selection_line()
    }

    pub fn winner_message(&self) -> String {
        self.inner.winner_message()
    }

    pub fn is_game_over(&self) -> bool {
        self.inner.is_game_over()
    }
}

impl Default for WasmGame {
    fn default() -> Self {
        Self::new()
    }
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsError> {
    value
        .serialize(&Serializer::json_compatible())
        .map_err(|err| JsError::new(&err.to_string()))
}

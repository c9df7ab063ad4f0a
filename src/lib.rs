//! Canon Sort core crate.
//!
//! A drag-and-drop ordering game: a shuffled deck of the 66 books is dealt
//! into a source lane and the player drags cards into the sorting lane in
//! canonical order against a 60 second clock. Game rules and the lane model
//! are DOM-free (`game`, `lanes`, `catalog`, `format`, `leaderboard` parsing)
//! and run under native `cargo test`; `ui` projects them into the page.

use wasm_bindgen::prelude::*;

pub mod catalog;
pub mod format;
pub mod game;
pub mod lanes;
pub mod leaderboard;
mod ui;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Wire the page and start the first round. Called from the page bootstrap
/// after the wasm module loads.
#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    ui::mount()
}

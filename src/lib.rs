//! Glizzy Cat core crate.
//!
//! A browser feeding game: a cartoon cat tracks the pointer while the player
//! drags hotdog ("glizzy") sprites from a pile into its mouth, bumping a
//! shared counter persisted remotely. Pure interaction logic (drag sessions,
//! hit testing, counter formatting) lives in plain modules so native tests can
//! exercise it; the `game` module owns the DOM shell behind `start_game()`.

use wasm_bindgen::prelude::*;

mod config;
mod counter;
mod drag;
mod game;
mod geom;
mod store;

pub use config::{GameConfig, RemoteConfig};
pub use counter::{FeedCounter, format_count};
pub use drag::{DragController, DragOutcome, DragSession, GlizzyId};
pub use geom::{Direction, Point, Rect};
pub use store::{COUNTER_ROW_ID, COUNTER_TABLE, RemoteCounter, parse_stored_count};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

// -----------------------------------------------------------------------------
// Shared sprite & flavor datasets
// -----------------------------------------------------------------------------

/// Glizzy sprite filenames under `images/`; each pile slot picks one at random.
pub const GLIZZY_SPRITES: &[&str] = &["glizzy_1.png", "glizzy_2.png", "glizzy_3.png"];

/// Lines the cat may quip after a successful feed.
pub const FEED_RESPONSES: &[&str] = &[
    "This… is not chicken. 😾",
    "Why is my meat in tube form, human? 🤨",
    "Strange… but acceptable. 😼",
    "MORE! You dare tease me with just one? 😹",
    "THE TUBE MEAT! THE TUBE MEAT!! 🐱🌭",
    "You think this compares to salmon? Amateur. 🙀",
    "Call me when you've got tuna. 🐟",
    "Hot… dog? I am a cat. Do you hear yourself? 🙄🐾",
    "BEST. DAY. EVER. 😻",
    "I'll allow you to pet me now. You've earned it. 😼❤️",
    "...My stomach feels funny, but it was worth it. 🤢",
    "Note to self: maybe only half a hotdog next time. 😿",
];

// -----------------------------------------------------------------------------
// Unified entrypoint
// -----------------------------------------------------------------------------

#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    game::start_feeding_mode()
}

// Console helpers shared by the game shell and the store.
pub(crate) fn console_warn(s: &str) {
    web_sys::console::warn_1(&JsValue::from_str(s));
}

pub(crate) fn console_error(s: &str) {
    web_sys::console::error_1(&JsValue::from_str(s));
}

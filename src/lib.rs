//! Chord Editor WASM Module
//!
//! Overlays chord annotations on song lyrics. A song is a list of lines, each
//! with chords attached to character offsets. This crate renders that model
//! into an editable cell tree, scrapes it back, and runs chord edits through
//! a remote normalization service.

pub mod api;
pub mod editor;
pub mod error;
pub mod html_layout;
pub mod models;

// Re-export commonly used types
pub use editor::{EditOutcome, EditorConfig, EditorController, EditorSession};
pub use error::{EditorError, RemoteError};
pub use models::content::*;

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(feature = "console_log")]
    if let Err(e) = console_log::init_with_level(log::Level::Debug) {
        web_sys::console::warn_1(&format!("logger already initialized: {}", e).into());
    }

    log::info!("Chord editor WASM module initialized");
}

//! HTML Layout Engine
//!
//! This module renders song content into the visual tree handed to
//! JavaScript, detects chord collisions, scrapes content back out of the
//! tree, and resolves pointer interaction over it.

pub mod cell;
pub mod collision;
pub mod display_list;
pub mod document;
pub mod interaction;
pub mod line;
pub mod scrape;

pub use collision::detect_collisions;
pub use display_list::{ChordSlot, LetterSlot, RenderCell, RenderLine, SongView};
pub use document::{LayoutConfig, LayoutEngine};
pub use interaction::{ChordChange, ChordInput, ChordMove, DragPayload};
pub use scrape::scrape_content;

//! Models module for the chord editor
//!
//! Song content (lines, chords, sections), its wire normalization, and the
//! request/response shapes of the external services.

pub mod content;
pub mod requests;
pub mod serde_helpers;

// Re-export commonly used types
pub use content::*;
pub use requests::*;

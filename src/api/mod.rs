//! Chord Editor WASM API
//!
//! # Module Structure
//!
//! - `helpers`: Serialization across the JS boundary and error conversion
//! - `remote`: Remote collaborators implemented by host JS callbacks
//! - `dom`: Mounting the visual tree into the page and reading it back
//! - `core`: The exported editor functions

pub mod core;
pub mod dom;
pub mod helpers;
pub mod remote;

pub use self::core::*;

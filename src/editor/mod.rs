//! Editor session and edit protocol
//!
//! - `session`: the explicit state of one editing session
//! - `remote`: traits for the normalizer, lyric preparer and song store
//! - `controller`: chord change/move round-trips and the chord-mode flow

pub mod controller;
pub mod remote;
pub mod session;

pub use controller::{EditOutcome, EditorController};
pub use remote::{LyricPreparer, RemoteNormalizer, SongStore};
pub use session::{EditorConfig, EditorSession};

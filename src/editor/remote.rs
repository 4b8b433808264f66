//! External collaborators of the editor
//!
//! The editor never persists, normalizes or prepares content itself; it
//! calls out through these traits. Each call is one request and one complete
//! response or error; there is no streaming and no partial result.

use crate::error::RemoteError;
use crate::models::{NormalizeRequest, PrepareRequest, PreparedLyrics, SaveSongRequest, SongContent, SongId};

/// Chord normalization service.
///
/// Given the full content and a single set/clear edit, returns the complete
/// replacement content, including any chords it added or removed elsewhere.
#[allow(async_fn_in_trait)]
pub trait RemoteNormalizer {
    async fn normalize(&self, request: NormalizeRequest) -> Result<SongContent, RemoteError>;
}

/// Lyric preparation service, used when entering chord mode
#[allow(async_fn_in_trait)]
pub trait LyricPreparer {
    async fn prepare(&self, request: PrepareRequest) -> Result<PreparedLyrics, RemoteError>;
}

/// Song persistence service
#[allow(async_fn_in_trait)]
pub trait SongStore {
    async fn save(&self, request: SaveSongRequest) -> Result<SongId, RemoteError>;
}

impl<T: RemoteNormalizer> RemoteNormalizer for &T {
    async fn normalize(&self, request: NormalizeRequest) -> Result<SongContent, RemoteError> {
        (**self).normalize(request).await
    }
}

impl<T: LyricPreparer> LyricPreparer for &T {
    async fn prepare(&self, request: PrepareRequest) -> Result<PreparedLyrics, RemoteError> {
        (**self).prepare(request).await
    }
}

impl<T: SongStore> SongStore for &T {
    async fn save(&self, request: SaveSongRequest) -> Result<SongId, RemoteError> {
        (**self).save(request).await
    }
}

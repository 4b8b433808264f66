//! Request and response shapes exchanged with external collaborators

use serde::{Deserialize, Serialize};
use std::fmt;

use super::content::SongContent;

/// Identifier assigned by the song store
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct SongId(pub i64);

impl fmt::Display for SongId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single set/clear edit at one offset. `chord: None` clears.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ChordEdit {
    pub line_index: usize,
    pub char_index: usize,
    pub chord: Option<String>,
    pub language: String,
}

/// Chord normalization request: the whole content plus the edit that produced it
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct NormalizeRequest {
    pub content: SongContent,
    pub line_index: usize,
    pub char_index: usize,
    pub chord: Option<String>,
    pub language: String,
}

impl NormalizeRequest {
    pub fn new(content: SongContent, edit: ChordEdit) -> Self {
        Self {
            content,
            line_index: edit.line_index,
            char_index: edit.char_index,
            chord: edit.chord,
            language: edit.language,
        }
    }

    pub fn edit(&self) -> ChordEdit {
        ChordEdit {
            line_index: self.line_index,
            char_index: self.char_index,
            chord: self.chord.clone(),
            language: self.language.clone(),
        }
    }
}

/// Authoritative replacement content
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct NormalizeResponse {
    pub content: SongContent,
}

/// Lyric preparation request, sent when entering chord mode
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct PrepareRequest {
    pub title: String,
    pub lyrics: String,
    pub existing_content: Option<SongContent>,
    /// Only sent when the user locked the language
    pub language: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct PreparedLyrics {
    pub content: SongContent,
    #[serde(default)]
    pub language: Option<String>,
}

/// Create (no id) or update (with id) a stored song
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct SaveSongRequest {
    pub id: Option<SongId>,
    pub title: String,
    pub content: SongContent,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct SavedSong {
    pub id: SongId,
}

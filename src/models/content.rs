//! Song content model
//!
//! A song body is an ordered list of lines. Each line holds its text and a
//! sparse map from character offset to chord. Offsets count characters
//! (Unicode scalar values), and `char_len()` itself is a valid offset: it
//! denotes a chord attached after the last character.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::serde_helpers::{self, WireLine};
use crate::error::EditorError;

/// Who placed a chord
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ChordOrigin {
    /// Placed by the user
    #[default]
    Manual,
    /// Suggested by the normalization service
    Auto,
}

/// Visual section tag of a line
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    #[default]
    Verse,
    Chorus,
}

/// A chord label attached to one offset
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Chord {
    /// Display text, never empty once stored in a line
    pub text: String,

    /// Wire name is `type`
    #[serde(rename = "type", alias = "origin", default)]
    pub origin: ChordOrigin,
}

impl Chord {
    pub fn manual(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            origin: ChordOrigin::Manual,
        }
    }

    pub fn auto(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            origin: ChordOrigin::Auto,
        }
    }

    pub fn is_auto(&self) -> bool {
        self.origin == ChordOrigin::Auto
    }

    /// Rendered width in character columns
    pub fn width(&self) -> usize {
        self.text.chars().count()
    }
}

/// One line of a song
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(from = "WireLine")]
pub struct Line {
    pub text: String,

    #[serde(serialize_with = "serde_helpers::serialize_chord_map")]
    pub chords: BTreeMap<usize, Chord>,

    pub section: Section,
}

impl Line {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            chords: BTreeMap::new(),
            section: Section::Verse,
        }
    }

    pub fn with_section(mut self, section: Section) -> Self {
        self.section = section;
        self
    }

    /// Builder used mostly by tests; offsets past the end are ignored
    pub fn with_chord(mut self, offset: usize, chord: Chord) -> Self {
        if offset <= self.char_len() && !chord.text.trim().is_empty() {
            self.chords.insert(offset, chord);
        }
        self
    }

    /// Number of characters in the text, which is also the end-of-line offset
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn chord_at(&self, offset: usize) -> Option<&Chord> {
        self.chords.get(&offset)
    }

    pub fn has_eol_chord(&self) -> bool {
        self.chords.contains_key(&self.char_len())
    }

    /// Empty or whitespace-only text
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Set (or replace) the chord at `offset`.
    ///
    /// Blank chord text is the same as no chord, so it clears the offset.
    pub fn set_chord(
        &mut self,
        line_index: usize,
        offset: usize,
        text: &str,
        origin: ChordOrigin,
    ) -> Result<(), EditorError> {
        let len = self.char_len();
        if offset > len {
            return Err(EditorError::InvalidChordOffset {
                line_index,
                offset,
                len,
            });
        }

        let text = text.trim();
        if text.is_empty() {
            self.chords.remove(&offset);
        } else {
            self.chords.insert(
                offset,
                Chord {
                    text: text.to_string(),
                    origin,
                },
            );
        }
        Ok(())
    }

    /// Remove the chord at `offset`, if any
    pub fn clear_chord(&mut self, offset: usize) -> Option<Chord> {
        self.chords.remove(&offset)
    }
}

/// The full song body: ordered lines, top to bottom
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct SongContent {
    pub lines: Vec<Line>,
}

impl SongContent {
    pub fn new(lines: Vec<Line>) -> Self {
        Self { lines }
    }

    /// Raw lyric lines with no chords, all verse
    pub fn from_lyrics(lyrics: &str) -> Self {
        Self {
            lines: lyrics.lines().map(Line::new).collect(),
        }
    }

    /// Lyric text with one line per row
    pub fn lyrics(&self) -> String {
        self.lines
            .iter()
            .map(|line| line.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line(&self, index: usize) -> Option<&Line> {
        self.lines.get(index)
    }

    pub fn line_mut(&mut self, index: usize) -> Option<&mut Line> {
        self.lines.get_mut(index)
    }

    /// Write a manual chord; blank text clears the offset
    pub fn set_chord(
        &mut self,
        line_index: usize,
        offset: usize,
        text: &str,
    ) -> Result<(), EditorError> {
        let line = self
            .lines
            .get_mut(line_index)
            .ok_or(EditorError::LineOutOfRange(line_index))?;
        line.set_chord(line_index, offset, text, ChordOrigin::Manual)
    }

    /// Remove the chord at one offset; a missing chord is a no-op
    pub fn clear_chord(&mut self, line_index: usize, offset: usize) -> Option<Chord> {
        self.lines
            .get_mut(line_index)
            .and_then(|line| line.clear_chord(offset))
    }
}

impl From<Vec<Line>> for SongContent {
    fn from(lines: Vec<Line>) -> Self {
        Self { lines }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_len_counts_characters_not_bytes() {
        let line = Line::new("Świecie");
        assert_eq!(line.char_len(), 7);
        assert!(line.text.len() > 7);
    }

    #[test]
    fn test_set_chord_replaces_existing_offset() {
        let mut line = Line::new("Hello");
        line.set_chord(0, 1, "C", ChordOrigin::Manual).unwrap();
        line.set_chord(0, 1, "Am", ChordOrigin::Manual).unwrap();

        assert_eq!(line.chords.len(), 1);
        assert_eq!(line.chord_at(1).unwrap().text, "Am");
    }

    #[test]
    fn test_set_chord_at_end_of_line_is_allowed() {
        let mut line = Line::new("Hi");
        line.set_chord(0, 2, "G", ChordOrigin::Manual).unwrap();
        assert!(line.has_eol_chord());
    }

    #[test]
    fn test_set_chord_beyond_end_is_rejected() {
        let mut line = Line::new("Hi");
        let err = line.set_chord(4, 3, "G", ChordOrigin::Manual).unwrap_err();
        assert_eq!(
            err,
            EditorError::InvalidChordOffset {
                line_index: 4,
                offset: 3,
                len: 2
            }
        );
        assert!(line.chords.is_empty());
    }

    #[test]
    fn test_blank_chord_text_clears() {
        let mut line = Line::new("Hello").with_chord(0, Chord::manual("C"));
        line.set_chord(0, 0, "  ", ChordOrigin::Manual).unwrap();
        assert!(line.chords.is_empty());
    }

    #[test]
    fn test_clear_missing_chord_is_noop() {
        let mut content = SongContent::new(vec![Line::new("Hello").with_chord(0, Chord::manual("C"))]);
        let before = content.clone();

        assert!(content.clear_chord(0, 3).is_none());
        assert!(content.clear_chord(9, 0).is_none());
        assert_eq!(content, before);
    }

    #[test]
    fn test_from_lyrics_and_back() {
        let content = SongContent::from_lyrics("First line\n\nThird");
        assert_eq!(content.len(), 3);
        assert!(content.lines.iter().all(|l| l.chords.is_empty()));
        assert!(content.lines.iter().all(|l| l.section == Section::Verse));
        assert_eq!(content.lyrics(), "First line\n\nThird");
    }

    #[test]
    fn test_set_chord_on_missing_line() {
        let mut content = SongContent::from_lyrics("One");
        assert_eq!(
            content.set_chord(3, 0, "C"),
            Err(EditorError::LineOutOfRange(3))
        );
    }
}

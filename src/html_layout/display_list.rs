//! Visual tree for the chord editor
//!
//! This is the structure handed to JavaScript for mounting: one row per song
//! line, one cell per character plus an optional end-of-line cell. Each cell
//! has a chord slot above a letter slot. All state that survives between
//! edits (offsets, section, chord origin) lives in classes and `data-*`
//! attributes, so the content model can be scraped back out of it.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const CLASS_LINE: &str = "lyric-line";
pub const CLASS_CHORUS_LINE: &str = "chorus-line";
pub const CLASS_CELL: &str = "char-wrapper";
pub const CLASS_SPACE: &str = "is-space";
pub const CLASS_EOL: &str = "is-eol";
pub const CLASS_COLLISION: &str = "collision-detected";
pub const CLASS_DRAG_OVER: &str = "drag-over";
pub const CLASS_CHORD: &str = "chord";
pub const CLASS_AUTO: &str = "auto";
pub const CLASS_DRAGGING: &str = "dragging";
pub const CLASS_LETTER: &str = "letter";

pub const DATA_LINE_INDEX: &str = "lineIndex";
pub const DATA_CHAR_INDEX: &str = "charIndex";
pub const DATA_EOL: &str = "eol";

/// Rendered in place of a space so the cell keeps its width
pub const NBSP: char = '\u{00A0}';

/// Container holding the rendered song
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct SongView {
    /// Whether cells accept clicks and drops
    pub editable: bool,

    pub lines: Vec<RenderLine>,
}

/// A single lyric row
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RenderLine {
    /// Line index for identification
    pub line_index: usize,

    /// CSS class names to apply (`lyric-line`, `chorus-line`)
    pub classes: Vec<String>,

    /// Data attributes (data-* attributes)
    pub dataset: HashMap<String, String>,

    /// Character cells, left to right; empty for spacer rows
    pub cells: Vec<RenderCell>,

    /// Fixed row height in rem, set for spacer and whitespace-only rows
    #[serde(default)]
    pub height: Option<f32>,
}

/// One character position: a chord slot stacked over a letter slot
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RenderCell {
    /// CSS class names to apply
    pub classes: Vec<String>,

    /// Data attributes: `lineIndex`, `charIndex`, and `eol` on the trailing cell
    pub dataset: HashMap<String, String>,

    /// Chord label slot. Present (possibly empty) on every rendered cell;
    /// `None` only when the host tree lost the node.
    #[serde(default)]
    pub chord: Option<ChordSlot>,

    /// Letter slot, same presence rule as `chord`
    #[serde(default)]
    pub letter: Option<LetterSlot>,

    /// Click target (opens chord input) and drop target (chord move)
    #[serde(default)]
    pub interactive: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct ChordSlot {
    pub text: String,
    pub classes: Vec<String>,
    #[serde(default)]
    pub draggable: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct LetterSlot {
    pub text: String,
}

/// Add a class if it is not already present
pub fn add_class(classes: &mut Vec<String>, class: &str) {
    if !has_class(classes, class) {
        classes.push(class.to_string());
    }
}

pub fn remove_class(classes: &mut Vec<String>, class: &str) {
    classes.retain(|c| c != class);
}

pub fn has_class(classes: &[String], class: &str) -> bool {
    classes.iter().any(|c| c == class)
}

impl SongView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every row
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Find the cell whose recorded offsets match, regardless of its position
    pub fn cell(&self, line_index: usize, char_index: usize) -> Option<&RenderCell> {
        self.lines
            .iter()
            .flat_map(|line| line.cells.iter())
            .find(|cell| cell.line_index() == Some(line_index) && cell.char_index() == Some(char_index))
    }

    pub fn cell_mut(&mut self, line_index: usize, char_index: usize) -> Option<&mut RenderCell> {
        self.lines
            .iter_mut()
            .flat_map(|line| line.cells.iter_mut())
            .find(|cell| cell.line_index() == Some(line_index) && cell.char_index() == Some(char_index))
    }

    pub fn cells_mut(&mut self) -> impl Iterator<Item = &mut RenderCell> {
        self.lines.iter_mut().flat_map(|line| line.cells.iter_mut())
    }
}

impl RenderLine {
    pub fn is_chorus(&self) -> bool {
        has_class(&self.classes, CLASS_CHORUS_LINE)
    }

    /// A row with no cells only preserves vertical spacing
    pub fn is_spacer(&self) -> bool {
        self.cells.is_empty()
    }
}

impl RenderCell {
    pub fn line_index(&self) -> Option<usize> {
        self.dataset.get(DATA_LINE_INDEX)?.parse().ok()
    }

    pub fn char_index(&self) -> Option<usize> {
        self.dataset.get(DATA_CHAR_INDEX)?.parse().ok()
    }

    pub fn is_eol(&self) -> bool {
        self.dataset.get(DATA_EOL).map(String::as_str) == Some("true")
    }

    pub fn has_class(&self, class: &str) -> bool {
        has_class(&self.classes, class)
    }

    /// Visible chord text, empty when there is none
    pub fn chord_text(&self) -> &str {
        self.chord.as_ref().map(|slot| slot.text.as_str()).unwrap_or("")
    }
}

//! Cell-level layout and styling
//!
//! This module handles CSS class generation and data attribute building for
//! individual character cells.

use std::collections::HashMap;

use super::display_list::*;
use crate::models::Chord;

/// Everything the builder needs to know about one cell
#[derive(Clone, Copy, Debug)]
pub struct CellSpec<'a> {
    pub line_idx: usize,
    pub char_idx: usize,
    /// `None` for the end-of-line cell
    pub letter: Option<char>,
    pub chord: Option<&'a Chord>,
    pub colliding: bool,
    pub editable: bool,
}

/// Builder for cell styling
pub struct CellStyleBuilder;

impl CellStyleBuilder {
    /// Create a new cell style builder
    pub fn new() -> Self {
        Self
    }

    /// Build a complete RenderCell with all styling and data attributes
    pub fn build_render_cell(&self, spec: CellSpec<'_>) -> RenderCell {
        let is_eol = spec.letter.is_none();

        // Build CSS classes
        let mut classes = vec![CLASS_CELL.to_string()];
        if spec.letter == Some(' ') {
            classes.push(CLASS_SPACE.to_string());
        }
        if is_eol {
            classes.push(CLASS_EOL.to_string());
        }
        if spec.colliding {
            classes.push(CLASS_COLLISION.to_string());
        }

        // Build data attributes
        let mut dataset = HashMap::new();
        dataset.insert(DATA_LINE_INDEX.to_string(), spec.line_idx.to_string());
        dataset.insert(DATA_CHAR_INDEX.to_string(), spec.char_idx.to_string());
        if is_eol {
            dataset.insert(DATA_EOL.to_string(), "true".to_string());
        }

        let letter = match spec.letter {
            None | Some(' ') => NBSP.to_string(),
            Some(c) => c.to_string(),
        };

        RenderCell {
            classes,
            dataset,
            chord: Some(self.build_chord_slot(spec.chord, spec.editable)),
            letter: Some(LetterSlot { text: letter }),
            interactive: spec.editable,
        }
    }

    /// Chord slot; empty when the offset carries no chord
    pub fn build_chord_slot(&self, chord: Option<&Chord>, editable: bool) -> ChordSlot {
        let mut classes = vec![CLASS_CHORD.to_string()];

        match chord {
            Some(chord) => {
                if chord.is_auto() {
                    classes.push(CLASS_AUTO.to_string());
                }
                ChordSlot {
                    text: chord.text.clone(),
                    classes,
                    draggable: editable,
                }
            }
            None => ChordSlot {
                text: String::new(),
                classes,
                draggable: false,
            },
        }
    }
}

impl Default for CellStyleBuilder {
    fn default() -> Self {
        Self::new()
    }
}

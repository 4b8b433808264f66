//! Line-level layout computation
//!
//! Turns one content line into a row of cells: one per character, then an
//! end-of-line cell when the view is editable or the line already has an
//! end-of-line chord.

use std::collections::HashMap;

use super::cell::{CellSpec, CellStyleBuilder};
use super::collision::detect_collisions;
use super::display_list::*;
use super::document::LayoutConfig;
use crate::models::{Line, Section};

/// Computes layout for a single line
pub struct LayoutLineComputer<'a> {
    config: &'a LayoutConfig,
}

impl<'a> LayoutLineComputer<'a> {
    /// Create a new line computer
    pub fn new(config: &'a LayoutConfig) -> Self {
        Self { config }
    }

    /// Compute layout for a single line
    pub fn compute_line_layout(&self, line: &Line, line_idx: usize, editable: bool) -> RenderLine {
        let mut classes = vec![CLASS_LINE.to_string()];
        if line.section == Section::Chorus {
            classes.push(CLASS_CHORUS_LINE.to_string());
        }

        let mut dataset = HashMap::new();
        dataset.insert(DATA_LINE_INDEX.to_string(), line_idx.to_string());

        let eol_index = line.char_len();
        let has_eol_chord = line.has_eol_chord();

        if eol_index == 0 && !editable && !has_eol_chord {
            return RenderLine {
                line_index: line_idx,
                classes,
                dataset,
                cells: Vec::new(),
                height: Some(self.config.spacer_height_rem),
            };
        }

        let collisions = detect_collisions(line);
        let builder = CellStyleBuilder::new();
        let mut cells = Vec::with_capacity(eol_index + 1);

        for (char_idx, letter) in line.text.chars().enumerate() {
            cells.push(builder.build_render_cell(CellSpec {
                line_idx,
                char_idx,
                letter: Some(letter),
                chord: line.chord_at(char_idx),
                colliding: collisions.contains(&char_idx),
                editable,
            }));
        }

        if editable || has_eol_chord {
            // The last chord is never flagged, so the trailing cell never collides
            cells.push(builder.build_render_cell(CellSpec {
                line_idx,
                char_idx: eol_index,
                letter: None,
                chord: line.chord_at(eol_index),
                colliding: collisions.contains(&eol_index),
                editable,
            }));
        }

        // Whitespace-only rows would otherwise collapse to the chord slot height
        let height = line.is_blank().then_some(self.config.spacer_height_rem);

        RenderLine {
            line_index: line_idx,
            classes,
            dataset,
            cells,
            height,
        }
    }
}

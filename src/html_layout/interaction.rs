//! Pointer interaction over the visual tree
//!
//! Click-to-edit and drag-to-move are resolved here into plain edit
//! descriptors ([`ChordChange`], [`ChordMove`]). The only tree mutations are
//! the transient `dragging` / `drag-over` classes; chords themselves only
//! change through a full re-render.

use serde::{Deserialize, Serialize};

use super::display_list::*;

/// Set or clear one chord. Empty `chord_text` clears.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ChordChange {
    pub line_index: usize,
    pub char_index: usize,
    pub chord_text: String,
}

/// Move one chord between two offsets
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ChordMove {
    pub origin_line: usize,
    pub origin_char: usize,
    pub target_line: usize,
    pub target_char: usize,
    pub chord_text: String,
}

/// What a drag carries from its source cell
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct DragPayload {
    pub chord_text: String,
    pub origin_line: usize,
    pub origin_char: usize,
}

/// Chord text input bound to one cell
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ChordInput {
    pub line_index: usize,
    pub char_index: usize,
    pub value: String,
}

impl ChordInput {
    /// Confirm the input; surrounding whitespace is dropped
    pub fn submit(self) -> ChordChange {
        ChordChange {
            line_index: self.line_index,
            char_index: self.char_index,
            chord_text: self.value.trim().to_string(),
        }
    }
}

fn interactive_cell(view: &SongView, line_index: usize, char_index: usize) -> Option<&RenderCell> {
    if !view.editable {
        return None;
    }
    view.cell(line_index, char_index).filter(|cell| cell.interactive)
}

/// Open the chord input for a clicked cell, pre-filled with its chord
pub fn open_chord_input(view: &SongView, line_index: usize, char_index: usize) -> Option<ChordInput> {
    let cell = interactive_cell(view, line_index, char_index)?;
    Some(ChordInput {
        line_index: cell.line_index()?,
        char_index: cell.char_index()?,
        value: cell.chord_text().to_string(),
    })
}

/// Start dragging the chord in a cell. Cells without a draggable chord
/// cannot start a drag.
pub fn begin_drag(view: &mut SongView, line_index: usize, char_index: usize) -> Option<DragPayload> {
    if !view.editable {
        return None;
    }
    let cell = view.cell_mut(line_index, char_index)?;
    let slot = cell.chord.as_mut()?;
    let chord_text = slot.text.trim().to_string();
    if !slot.draggable || chord_text.is_empty() {
        return None;
    }
    add_class(&mut slot.classes, CLASS_DRAGGING);

    Some(DragPayload {
        chord_text,
        origin_line: line_index,
        origin_char: char_index,
    })
}

/// Highlight a hovered drop target
pub fn drag_over(view: &mut SongView, line_index: usize, char_index: usize) {
    if !view.editable {
        return;
    }
    if let Some(cell) = view.cell_mut(line_index, char_index) {
        if cell.interactive {
            add_class(&mut cell.classes, CLASS_DRAG_OVER);
        }
    }
}

pub fn drag_leave(view: &mut SongView, line_index: usize, char_index: usize) {
    if let Some(cell) = view.cell_mut(line_index, char_index) {
        remove_class(&mut cell.classes, CLASS_DRAG_OVER);
    }
}

/// Drag finished, dropped or not: clear every transient drag class
pub fn end_drag(view: &mut SongView) {
    for cell in view.cells_mut() {
        remove_class(&mut cell.classes, CLASS_DRAG_OVER);
        if let Some(slot) = cell.chord.as_mut() {
            remove_class(&mut slot.classes, CLASS_DRAGGING);
        }
    }
}

/// Resolve a drop. Returns `None` (ignored) when the pointer was not over
/// an interactive offset cell.
pub fn drop_chord(view: &mut SongView, payload: &DragPayload, target: Option<(usize, usize)>) -> Option<ChordMove> {
    let (target_line, target_char) = target?;
    let cell = interactive_cell(view, target_line, target_char)?;
    let target_line = cell.line_index()?;
    let target_char = cell.char_index()?;

    drag_leave(view, target_line, target_char);

    Some(ChordMove {
        origin_line: payload.origin_line,
        origin_char: payload.origin_char,
        target_line,
        target_char,
        chord_text: payload.chord_text.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::html_layout::LayoutEngine;
    use crate::models::{Chord, Line, SongContent};

    fn editable_view() -> SongView {
        let content = SongContent::new(vec![
            Line::new("Hello").with_chord(1, Chord::manual("Am")),
            Line::new("World").with_chord(0, Chord::auto("F")),
        ]);
        LayoutEngine::default().compute_layout(&content, true)
    }

    #[test]
    fn test_open_chord_input_prefills_current_chord() {
        let view = editable_view();
        let input = open_chord_input(&view, 0, 1).unwrap();
        assert_eq!(input.value, "Am");

        let empty = open_chord_input(&view, 0, 5).unwrap();
        assert_eq!(empty.value, "");
    }

    #[test]
    fn test_submit_trims_value() {
        let input = ChordInput {
            line_index: 1,
            char_index: 2,
            value: "  G7 ".to_string(),
        };
        assert_eq!(input.submit().chord_text, "G7");
    }

    #[test]
    fn test_read_only_view_ignores_clicks_and_drags() {
        let content = SongContent::new(vec![Line::new("Hello").with_chord(1, Chord::manual("Am"))]);
        let mut view = LayoutEngine::default().compute_layout(&content, false);
        assert!(open_chord_input(&view, 0, 1).is_none());
        assert!(begin_drag(&mut view, 0, 1).is_none());
    }

    #[test]
    fn test_cannot_drag_empty_slot() {
        let mut view = editable_view();
        assert!(begin_drag(&mut view, 0, 0).is_none());
    }

    #[test]
    fn test_auto_chord_can_be_dragged() {
        let mut view = editable_view();
        let payload = begin_drag(&mut view, 1, 0).unwrap();
        assert_eq!(payload.chord_text, "F");
    }

    #[test]
    fn test_drag_and_drop_yields_move() {
        let mut view = editable_view();
        let payload = begin_drag(&mut view, 0, 1).unwrap();
        assert!(has_class(&view.cell(0, 1).unwrap().chord.as_ref().unwrap().classes, CLASS_DRAGGING));

        drag_over(&mut view, 1, 3);
        assert!(view.cell(1, 3).unwrap().has_class(CLASS_DRAG_OVER));

        let mv = drop_chord(&mut view, &payload, Some((1, 3))).unwrap();
        end_drag(&mut view);

        assert_eq!(
            mv,
            ChordMove {
                origin_line: 0,
                origin_char: 1,
                target_line: 1,
                target_char: 3,
                chord_text: "Am".to_string(),
            }
        );
        assert!(!view.cell(1, 3).unwrap().has_class(CLASS_DRAG_OVER));
        assert!(!has_class(&view.cell(0, 1).unwrap().chord.as_ref().unwrap().classes, CLASS_DRAGGING));
    }

    #[test]
    fn test_drop_outside_any_cell_is_ignored() {
        let mut view = editable_view();
        let payload = begin_drag(&mut view, 0, 1).unwrap();
        let before = view.clone();

        assert!(drop_chord(&mut view, &payload, None).is_none());
        assert!(drop_chord(&mut view, &payload, Some((7, 0))).is_none());
        assert_eq!(view, before);
    }
}

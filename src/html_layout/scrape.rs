//! Rebuild song content from the visual tree
//!
//! Between edits the visual tree is the source of truth: drag classes,
//! popups and host-side tweaks are not logged anywhere else. Every edit
//! therefore starts by scraping a fresh content model out of it.
//!
//! Scraping never fails. A cell that lost its letter or chord slot reads as
//! empty, and a cell with an unreadable `charIndex` falls back to its position
//! in the row.

use std::collections::BTreeMap;

use super::display_list::*;
use crate::models::{Chord, ChordOrigin, Line, Section, SongContent};

/// Reconstruct the content model from every row of `view`
pub fn scrape_content(view: &SongView) -> SongContent {
    SongContent::new(view.lines.iter().map(scrape_line).collect())
}

fn scrape_line(row: &RenderLine) -> Line {
    let mut text = String::new();
    let mut chords = BTreeMap::new();

    for (position, cell) in row.cells.iter().enumerate() {
        if !cell.is_eol() {
            if let Some(letter) = &cell.letter {
                text.extend(letter.text.chars().map(|c| if c == NBSP { ' ' } else { c }));
            }
        }

        let Some(slot) = &cell.chord else {
            continue;
        };
        let chord_text = slot.text.trim();
        if chord_text.is_empty() {
            continue;
        }

        let offset = cell.char_index().unwrap_or_else(|| {
            log::warn!(
                "cell {} on line {} has no charIndex; using its position",
                position,
                row.line_index
            );
            position
        });
        let origin = if has_class(&slot.classes, CLASS_AUTO) {
            ChordOrigin::Auto
        } else {
            ChordOrigin::Manual
        };
        chords.insert(
            offset,
            Chord {
                text: chord_text.to_string(),
                origin,
            },
        );
    }

    let len = text.chars().count();
    chords.retain(|offset, chord: &mut Chord| {
        if *offset > len {
            log::warn!(
                "dropping scraped chord '{}' at offset {} beyond line length {} on line {}",
                chord.text,
                offset,
                len,
                row.line_index
            );
            return false;
        }
        true
    });

    let section = if row.is_chorus() {
        Section::Chorus
    } else {
        Section::Verse
    };

    Line {
        text,
        chords,
        section,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::html_layout::LayoutEngine;

    #[test]
    fn test_missing_slots_read_as_empty() {
        let content = SongContent::new(vec![Line::new("abc").with_chord(1, Chord::manual("F"))]);
        let mut view = LayoutEngine::default().compute_layout(&content, true);
        view.lines[0].cells[0].letter = None;
        view.lines[0].cells[1].chord = None;

        let scraped = scrape_content(&view);
        assert_eq!(scraped.lines[0].text, "bc");
        assert!(scraped.lines[0].chords.is_empty());

        // A lost letter shortens the line; the end-of-line chord no longer fits
        let content = SongContent::new(vec![Line::new("Hi").with_chord(2, Chord::manual("G"))]);
        let mut view = LayoutEngine::default().compute_layout(&content, true);
        view.lines[0].cells[0].letter = None;

        let scraped = scrape_content(&view);
        assert_eq!(scraped.lines[0].text, "i");
        assert!(scraped.lines[0].chords.is_empty());
    }

    #[test]
    fn test_chord_text_is_trimmed() {
        let content = SongContent::new(vec![Line::new("abc")]);
        let mut view = LayoutEngine::default().compute_layout(&content, true);
        view.lines[0].cells[2].chord.as_mut().unwrap().text = "  Dm ".to_string();

        let scraped = scrape_content(&view);
        assert_eq!(scraped.lines[0].chord_at(2), Some(&Chord::manual("Dm")));
    }

    #[test]
    fn test_missing_char_index_falls_back_to_position() {
        let content = SongContent::new(vec![Line::new("abc").with_chord(2, Chord::auto("E"))]);
        let mut view = LayoutEngine::default().compute_layout(&content, true);
        view.lines[0].cells[2].dataset.remove(DATA_CHAR_INDEX);

        let scraped = scrape_content(&view);
        assert_eq!(scraped.lines[0].chord_at(2), Some(&Chord::auto("E")));
    }

    #[test]
    fn test_spacer_row_scrapes_to_empty_line() {
        let content = SongContent::new(vec![Line::new("").with_section(Section::Chorus)]);
        let view = LayoutEngine::default().compute_layout(&content, false);

        let scraped = scrape_content(&view);
        assert_eq!(scraped, content);
    }
}

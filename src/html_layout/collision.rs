//! Chord collision detection
//!
//! A chord label is drawn starting at its offset and is as wide as its text.
//! When that span reaches the next chord's offset the two labels would
//! overlap, and the earlier one is flagged so the renderer can style it.

use std::collections::BTreeSet;

use crate::models::{Chord, Line};

/// Offsets whose chord runs into the next chord on the same line.
///
/// Chords at `i < j` collide iff `i + width(chord[i]) >= j`. Only neighbours
/// in ascending offset order are compared; the last chord is never flagged.
pub fn detect_collisions(line: &Line) -> BTreeSet<usize> {
    // BTreeMap iterates in ascending key order
    let sorted: Vec<(usize, &Chord)> = line.chords.iter().map(|(offset, chord)| (*offset, chord)).collect();

    sorted
        .windows(2)
        .filter(|pair| {
            let (current, chord) = pair[0];
            let (next, _) = pair[1];
            current + chord.width() >= next
        })
        .map(|pair| pair[0].0)
        .collect()
}

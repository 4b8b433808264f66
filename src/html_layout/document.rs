//! Document-level layout computation
//!
//! This module contains the main entry point for layout calculations,
//! taking song content and producing the visual tree.

use serde::{Deserialize, Serialize};

use super::display_list::*;
use super::line::LayoutLineComputer;
use crate::models::SongContent;

/// Configuration for layout calculations
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct LayoutConfig {
    /// Height in rem of blank spacer rows and whitespace-only rows
    pub spacer_height_rem: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            spacer_height_rem: 1.5,
        }
    }
}

/// Main layout engine for computing the visual tree
pub struct LayoutEngine {
    config: LayoutConfig,
}

impl LayoutEngine {
    /// Create a new layout engine
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Compute the complete view for a song
    pub fn compute_layout(&self, content: &SongContent, editable: bool) -> SongView {
        let line_computer = LayoutLineComputer::new(&self.config);

        let lines = content
            .lines
            .iter()
            .enumerate()
            .map(|(line_idx, line)| line_computer.compute_line_layout(line, line_idx, editable))
            .collect();

        SongView { editable, lines }
    }

    /// Render `content` into `container`, replacing whatever it held.
    ///
    /// The container is never patched in place; every render is a full
    /// rebuild, and the content model is only read.
    pub fn render_song(&self, content: &SongContent, container: &mut SongView, editable: bool) {
        *container = self.compute_layout(content, editable);
        log::debug!(
            "rendered {} lines (editable: {})",
            container.lines.len(),
            editable
        );
    }
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new(LayoutConfig::default())
    }
}

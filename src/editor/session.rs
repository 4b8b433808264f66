//! Editing session state
//!
//! One session is bound to one editor view. It owns the working content,
//! the visual tree it was rendered into, the language settings, and the
//! transient popup/drag state. Components receive it explicitly instead of
//! reaching for globals.

use serde::{Deserialize, Serialize};

use crate::error::EditorError;
use crate::html_layout::interaction::{self, ChordInput, DragPayload};
use crate::html_layout::{scrape_content, LayoutConfig, LayoutEngine, SongView};
use crate::models::{SongContent, SongId};

/// Editor configuration supplied by the host
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct EditorConfig {
    /// Used whenever no language has been detected or chosen
    pub default_language: String,

    pub supported_languages: Vec<String>,

    pub layout: LayoutConfig,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            default_language: "pl".to_string(),
            supported_languages: ["pl", "en", "de", "es", "fr", "pt", "ru"]
                .iter()
                .map(|lang| lang.to_string())
                .collect(),
            layout: LayoutConfig::default(),
        }
    }
}

/// State of the single active editing session
#[derive(Clone, Debug, Default)]
pub struct EditorSession {
    pub config: EditorConfig,

    /// Set once the song has been stored
    pub song_id: Option<SongId>,

    pub title: String,

    /// Detected or chosen language; `None` until lyrics are prepared
    pub language: Option<String>,

    /// The user picked the language; it is sent to lyric preparation
    pub language_locked: bool,

    /// Last content committed from a remote response (or fallback)
    pub editing_content: Option<SongContent>,

    /// Editor container: the live visual tree
    pub view: SongView,

    /// Message of the last failed operation, for display
    pub last_error: Option<String>,

    pub chord_input: Option<ChordInput>,

    pub drag: Option<DragPayload>,
}

impl EditorSession {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn engine(&self) -> LayoutEngine {
        LayoutEngine::new(self.config.layout.clone())
    }

    /// Language sent with every normalization request
    pub fn effective_language(&self) -> String {
        self.language
            .clone()
            .unwrap_or_else(|| self.config.default_language.clone())
    }

    /// Language forwarded to lyric preparation, only when the user chose it
    pub fn locked_language(&self) -> Option<String> {
        if self.language_locked {
            self.language.clone()
        } else {
            None
        }
    }

    /// Forget the current song
    pub fn start_new_song(&mut self) {
        log::info!("starting new song");
        self.song_id = None;
        self.title.clear();
        self.language = None;
        self.language_locked = false;
        self.editing_content = None;
        self.view.clear();
        self.last_error = None;
        self.chord_input = None;
        self.drag = None;
    }

    /// Pick a language explicitly; it stays locked for later preparations
    pub fn change_language(&mut self, language: &str) -> Result<(), EditorError> {
        if !self.config.supported_languages.iter().any(|l| l == language) {
            return Err(self.report(EditorError::UnsupportedLanguage(language.to_string())));
        }
        self.language = Some(language.to_string());
        self.language_locked = true;
        log::info!("language changed to {}", language);
        Ok(())
    }

    /// Content model as currently shown in the editor view
    pub fn scrape(&self) -> SongContent {
        scrape_content(&self.view)
    }

    /// Leave chord mode: keep what the editor shows and hand back the lyric text
    pub fn back_to_lyrics(&mut self) -> String {
        let content = self.scrape();
        let lyrics = content.lyrics();
        self.editing_content = Some(content);
        self.chord_input = None;
        self.drag = None;
        lyrics
    }

    /// Read-only rendering for the song view
    pub fn view_song(&self, content: &SongContent) -> SongView {
        self.engine().compute_layout(content, false)
    }

    /// Replace the working content and re-render the editor from it
    pub fn commit(&mut self, content: SongContent) {
        self.engine().render_song(&content, &mut self.view, true);
        self.editing_content = Some(content);
        self.chord_input = None;
        self.drag = None;
    }

    /// Record a failure for display and hand it back for propagation
    pub fn report(&mut self, error: EditorError) -> EditorError {
        log::error!("{}", error);
        self.last_error = Some(error.to_string());
        error
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    /// Open the chord input on a clicked cell, closing any other input
    pub fn open_chord_input(&mut self, line_index: usize, char_index: usize) -> Option<&ChordInput> {
        self.chord_input = interaction::open_chord_input(&self.view, line_index, char_index);
        self.chord_input.as_ref()
    }

    pub fn cancel_chord_input(&mut self) {
        self.chord_input = None;
    }

    pub fn begin_drag(&mut self, line_index: usize, char_index: usize) -> bool {
        self.drag = interaction::begin_drag(&mut self.view, line_index, char_index);
        self.drag.is_some()
    }

    pub fn drag_over(&mut self, line_index: usize, char_index: usize) {
        interaction::drag_over(&mut self.view, line_index, char_index);
    }

    pub fn drag_leave(&mut self, line_index: usize, char_index: usize) {
        interaction::drag_leave(&mut self.view, line_index, char_index);
    }

    /// Drag ended without a drop
    pub fn end_drag(&mut self) {
        interaction::end_drag(&mut self.view);
        self.drag = None;
    }
}

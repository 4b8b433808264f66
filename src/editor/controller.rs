//! Chord placement edit protocol
//!
//! Every edit runs the same steps:
//!
//! 1. scrape a working copy of the content from the editor view;
//! 2. apply the edit locally (set writes a manual chord, clear removes one);
//! 3. send the whole content plus the single-edit descriptor to the
//!    normalizer;
//! 4. on success, replace the working content wholesale with the response
//!    and re-render the view from it.
//!
//! On failure nothing is committed: the session's content and view stay as
//! they were and the error is recorded for display.
//!
//! A move is a clear at the origin followed by a set at the target. Each leg
//! commits on its own, so when the clear succeeds and the set fails the
//! editor shows the song with the chord removed and the error reported.

use crate::error::{EditorError, RemoteError};
use crate::html_layout::interaction;
use crate::models::{ChordEdit, ChordOrigin, NormalizeRequest, PrepareRequest, SaveSongRequest, SongContent, SongId};

use super::remote::{LyricPreparer, RemoteNormalizer, SongStore};
use super::session::EditorSession;

/// Whether an edit reached the normalizer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditOutcome {
    /// The edit round-tripped and its response is now displayed
    Applied,
    /// The edit addressed no valid offset; nothing happened
    Ignored,
}

/// Drives edits against the editor's external collaborators
pub struct EditorController<R> {
    remote: R,
}

impl<R> EditorController<R> {
    pub fn new(remote: R) -> Self {
        Self { remote }
    }
}

impl<R: RemoteNormalizer> EditorController<R> {
    /// Set (non-blank `chord_text`) or clear (blank) the chord at one offset
    pub async fn apply_chord_change(
        &self,
        session: &mut EditorSession,
        line_index: usize,
        char_index: usize,
        chord_text: &str,
    ) -> Result<EditOutcome, EditorError> {
        session.clear_error();
        let chord_text = chord_text.trim();
        let mut content = session.scrape();

        let Some(line) = content.line_mut(line_index) else {
            log::warn!("chord change on missing line {} ignored", line_index);
            return Ok(EditOutcome::Ignored);
        };
        if char_index > line.char_len() {
            log::warn!(
                "chord change at {}:{} is past the end of the line, ignored",
                line_index,
                char_index
            );
            return Ok(EditOutcome::Ignored);
        }

        let chord = if chord_text.is_empty() {
            line.clear_chord(char_index);
            None
        } else {
            line.set_chord(line_index, char_index, chord_text, ChordOrigin::Manual)?;
            Some(chord_text.to_string())
        };

        let edit = ChordEdit {
            line_index,
            char_index,
            chord,
            language: session.effective_language(),
        };
        let normalized = self
            .normalize(content, edit)
            .await
            .map_err(|source| session.report(EditorError::remote("apply chord change", source)))?;

        session.commit(normalized);
        Ok(EditOutcome::Applied)
    }

    /// Move a chord: clear at the origin, then set at the target
    pub async fn apply_chord_move(
        &self,
        session: &mut EditorSession,
        origin_line: usize,
        origin_char: usize,
        target_line: usize,
        target_char: usize,
        chord_text: &str,
    ) -> Result<EditOutcome, EditorError> {
        session.clear_error();
        let chord_text = chord_text.trim();
        let mut content = session.scrape();

        let target_fits = content
            .line(target_line)
            .is_some_and(|line| target_char <= line.char_len());
        if chord_text.is_empty() || !target_fits {
            log::warn!(
                "chord move to {}:{} ignored (chord '{}')",
                target_line,
                target_char,
                chord_text
            );
            return Ok(EditOutcome::Ignored);
        }
        let Some(origin) = content.line_mut(origin_line) else {
            log::warn!("chord move from missing line {} ignored", origin_line);
            return Ok(EditOutcome::Ignored);
        };
        origin.clear_chord(origin_char);

        let language = session.effective_language();
        let clear = ChordEdit {
            line_index: origin_line,
            char_index: origin_char,
            chord: None,
            language: language.clone(),
        };
        let cleared = self
            .normalize(content, clear)
            .await
            .map_err(|source| session.report(EditorError::remote("move chord", source)))?;

        // The clear leg stands on its own from here
        session.commit(cleared.clone());

        let mut content = cleared;
        let placed = match content.line_mut(target_line) {
            Some(line) => line.set_chord(target_line, target_char, chord_text, ChordOrigin::Manual),
            None => Err(EditorError::LineOutOfRange(target_line)),
        };
        if let Err(err) = placed {
            return Err(session.report(err));
        }

        let set = ChordEdit {
            line_index: target_line,
            char_index: target_char,
            chord: Some(chord_text.to_string()),
            language,
        };
        let placed = self
            .normalize(content, set)
            .await
            .map_err(|source| session.report(EditorError::MoveIncomplete(source)))?;

        session.commit(placed);
        Ok(EditOutcome::Applied)
    }

    /// Confirm the open chord input, if any
    pub async fn submit_chord_input(&self, session: &mut EditorSession) -> Result<EditOutcome, EditorError> {
        let Some(input) = session.chord_input.take() else {
            return Ok(EditOutcome::Ignored);
        };
        let change = input.submit();
        self.apply_chord_change(session, change.line_index, change.char_index, &change.chord_text)
            .await
    }

    /// Finish a drag over `target` (`None` when dropped outside every cell)
    pub async fn drop_chord(
        &self,
        session: &mut EditorSession,
        target: Option<(usize, usize)>,
    ) -> Result<EditOutcome, EditorError> {
        let resolved = session
            .drag
            .take()
            .and_then(|payload| interaction::drop_chord(&mut session.view, &payload, target));
        session.end_drag();

        match resolved {
            Some(mv) => {
                self.apply_chord_move(
                    session,
                    mv.origin_line,
                    mv.origin_char,
                    mv.target_line,
                    mv.target_char,
                    &mv.chord_text,
                )
                .await
            }
            None => Ok(EditOutcome::Ignored),
        }
    }

    async fn normalize(&self, content: SongContent, edit: ChordEdit) -> Result<SongContent, RemoteError> {
        log::debug!(
            "normalizing {}:{} -> {:?} ({})",
            edit.line_index,
            edit.char_index,
            edit.chord,
            edit.language
        );
        let result = self.remote.normalize(NormalizeRequest::new(content, edit)).await;
        match &result {
            Ok(content) => log::debug!("normalizer returned {} lines", content.len()),
            Err(err) => log::warn!("normalizer failed: {}", err),
        }
        result
    }
}

impl<R: LyricPreparer> EditorController<R> {
    /// Enter chord mode for freshly typed lyrics
    pub async fn enter_chord_mode(
        &self,
        session: &mut EditorSession,
        title: &str,
        lyrics: &str,
    ) -> Result<(), EditorError> {
        session.clear_error();
        if title.trim().is_empty() || lyrics.trim().is_empty() {
            return Err(session.report(EditorError::MissingLyrics));
        }
        session.title = title.to_string();

        let existing = session.editing_content.clone();
        let fallback = SongContent::from_lyrics(lyrics);
        self.prepare_and_render(session, lyrics, existing, fallback).await;
        Ok(())
    }

    /// Enter chord mode for a stored song
    pub async fn open_song(
        &self,
        session: &mut EditorSession,
        id: SongId,
        title: &str,
        content: SongContent,
    ) -> Result<(), EditorError> {
        session.clear_error();
        session.song_id = Some(id);
        session.title = title.to_string();

        let lyrics = content.lyrics();
        self.prepare_and_render(session, &lyrics, Some(content.clone()), content)
            .await;
        Ok(())
    }

    async fn prepare_and_render(
        &self,
        session: &mut EditorSession,
        lyrics: &str,
        existing: Option<SongContent>,
        fallback: SongContent,
    ) {
        let request = PrepareRequest {
            title: session.title.clone(),
            lyrics: lyrics.to_string(),
            existing_content: existing,
            language: session.locked_language(),
        };

        let (content, language) = match self.remote.prepare(request).await {
            Ok(prepared) => (prepared.content, prepared.language),
            Err(err) => {
                log::warn!("lyric preparation failed, using raw lines: {}", err);
                (fallback, None)
            }
        };

        let language = language
            .or_else(|| session.language.take())
            .unwrap_or_else(|| session.config.default_language.clone());
        log::info!("chord mode: {} lines, language {}", content.len(), language);
        session.language = Some(language);
        session.commit(content);
    }
}

impl<R: SongStore> EditorController<R> {
    /// Store what the editor currently shows
    pub async fn save_song(&self, session: &mut EditorSession, title: &str) -> Result<SongId, EditorError> {
        session.clear_error();
        if session.view.lines.is_empty() {
            return Err(session.report(EditorError::NoContent));
        }
        let content = session.scrape();
        let request = SaveSongRequest {
            id: session.song_id,
            title: title.to_string(),
            content: content.clone(),
        };

        let id = self
            .remote
            .save(request)
            .await
            .map_err(|source| session.report(EditorError::remote("save song", source)))?;

        log::info!("song saved as {}", id);
        session.song_id = Some(id);
        session.title = title.to_string();
        session.editing_content = Some(content);
        Ok(id)
    }
}

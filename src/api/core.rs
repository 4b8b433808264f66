//! JavaScript-facing editor API
//!
//! The module owns one editing session. The host registers its remote
//! callbacks and the editor container once (`initEditor`), then drives edits
//! from its click/drop handlers. Before every edit the session's view is
//! re-read from the container. The container is rebuilt only when an edit
//! changed the view; drag feedback (`dragging`, `drag-over`) is toggled on
//! the mounted nodes so the dragged element and the host's listeners
//! survive the drag.
//!
//! An edit takes the session out of its slot until it finishes. An edit
//! that arrives while another is awaiting its remote response fails with
//! "another edit is still in progress" instead of racing it.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::Element;

use super::dom::{clear_class, mount_view, read_view, toggle_cell_class, toggle_chord_class};
use super::helpers::{deserialize, js_error, serialize};
use super::remote::JsRemote;
use crate::editor::{EditOutcome, EditorConfig, EditorController, EditorSession};
use crate::error::EditorError;
use crate::html_layout::display_list::{CLASS_DRAGGING, CLASS_DRAG_OVER};
use crate::html_layout::{interaction, scrape_content, LayoutEngine, SongView};
use crate::models::{SongContent, SongId};

thread_local! {
    static SESSION: RefCell<Option<EditorSession>> = RefCell::new(Some(EditorSession::default()));
    static REMOTE: RefCell<Option<Rc<JsRemote>>> = const { RefCell::new(None) };
    static EDITOR_CONTAINER: RefCell<Option<Element>> = const { RefCell::new(None) };
}

fn take_session() -> Result<EditorSession, JsValue> {
    SESSION
        .with(|slot| slot.borrow_mut().take())
        .ok_or_else(|| js_error(EditorError::Busy))
}

fn restore_session(session: EditorSession) {
    SESSION.with(|slot| *slot.borrow_mut() = Some(session));
}

fn remote() -> Result<Rc<JsRemote>, JsValue> {
    REMOTE
        .with(|slot| slot.borrow().clone())
        .ok_or_else(|| js_error("editor is not initialized: call initEditor first"))
}

fn editor_container() -> Option<Element> {
    EDITOR_CONTAINER.with(|slot| slot.borrow().clone())
}

/// Pick up whatever the page currently shows
fn sync_from_dom(session: &mut EditorSession) {
    let Some(container) = editor_container() else {
        return;
    };
    match read_view(&container) {
        Ok(view) => session.view = view,
        Err(e) => log::warn!("[WASM] could not read editor container: {:?}", e),
    }
}

fn mount_editor(session: &EditorSession) {
    let Some(container) = editor_container() else {
        return;
    };
    if let Err(e) = mount_view(&session.view, &container) {
        log::error!("[WASM] could not mount editor view: {:?}", e);
    }
}

/// Rebuild the container after an edit that changed the view; otherwise
/// only drop the leftover drag feedback
fn remount_if_changed(mut before: SongView, session: &EditorSession) {
    interaction::end_drag(&mut before);
    if session.view != before {
        mount_editor(session);
    } else {
        patch_editor(|container| {
            clear_class(container, CLASS_DRAGGING)?;
            clear_class(container, CLASS_DRAG_OVER)
        });
    }
}

/// Apply a class change to the mounted nodes in place
fn patch_editor(patch: impl FnOnce(&Element) -> Result<(), JsValue>) {
    let Some(container) = editor_container() else {
        return;
    };
    if let Err(e) = patch(&container) {
        log::warn!("[WASM] could not update editor classes: {:?}", e);
    }
}

fn outcome_to_js(result: Result<EditOutcome, EditorError>) -> Result<JsValue, JsValue> {
    match result {
        Ok(outcome) => Ok(JsValue::from_bool(outcome == EditOutcome::Applied)),
        Err(err) => Err(js_error(err)),
    }
}

/// Register the remote callbacks, the editor container and optional config
#[wasm_bindgen(js_name = initEditor)]
pub fn init_editor(remote: JsValue, container: Element, config: JsValue) -> Result<(), JsValue> {
    let config: EditorConfig = if config.is_undefined() || config.is_null() {
        EditorConfig::default()
    } else {
        deserialize(config, "Invalid editor config")?
    };

    let remote = JsRemote::from_js(&remote)?;
    REMOTE.with(|slot| *slot.borrow_mut() = Some(Rc::new(remote)));
    EDITOR_CONTAINER.with(|slot| *slot.borrow_mut() = Some(container));
    SESSION.with(|slot| *slot.borrow_mut() = Some(EditorSession::new(config)));

    log::info!("[WASM] chord editor initialized");
    Ok(())
}

/// Render song content into any container
#[wasm_bindgen(js_name = renderSong)]
pub fn render_song(content: JsValue, container: Element, editable: bool) -> Result<(), JsValue> {
    let content: SongContent = deserialize(content, "Invalid song content")?;
    let view = LayoutEngine::default().compute_layout(&content, editable);
    mount_view(&view, &container)
}

/// Content model as the editor container currently shows it
#[wasm_bindgen(js_name = scrapeContentFromEditor)]
pub fn scrape_content_from_editor() -> Result<JsValue, JsValue> {
    let container = editor_container().ok_or_else(|| js_error("editor container is not registered"))?;
    let view = read_view(&container)?;
    serialize(&scrape_content(&view), "Failed to serialize content")
}

/// Set (non-empty text) or clear (empty text) one chord.
/// Resolves to `true` when applied, `false` when ignored.
#[wasm_bindgen(js_name = applyChordChange)]
pub async fn apply_chord_change(line_index: usize, char_index: usize, chord_text: String) -> Result<JsValue, JsValue> {
    let remote = remote()?;
    let mut session = take_session()?;
    sync_from_dom(&mut session);
    let before = session.view.clone();

    let result = EditorController::new(remote.as_ref())
        .apply_chord_change(&mut session, line_index, char_index, &chord_text)
        .await;

    remount_if_changed(before, &session);
    restore_session(session);
    outcome_to_js(result)
}

/// Move one chord between offsets (clear, then set)
#[wasm_bindgen(js_name = applyChordMove)]
pub async fn apply_chord_move(
    origin_line: usize,
    origin_char: usize,
    target_line: usize,
    target_char: usize,
    chord_text: String,
) -> Result<JsValue, JsValue> {
    let remote = remote()?;
    let mut session = take_session()?;
    sync_from_dom(&mut session);
    let before = session.view.clone();

    let result = EditorController::new(remote.as_ref())
        .apply_chord_move(&mut session, origin_line, origin_char, target_line, target_char, &chord_text)
        .await;

    remount_if_changed(before, &session);
    restore_session(session);
    outcome_to_js(result)
}

/// Prepare typed lyrics and show them in the chord editor
#[wasm_bindgen(js_name = enterChordMode)]
pub async fn enter_chord_mode(title: String, lyrics: String) -> Result<(), JsValue> {
    let remote = remote()?;
    let mut session = take_session()?;

    let result = EditorController::new(remote.as_ref())
        .enter_chord_mode(&mut session, &title, &lyrics)
        .await;

    mount_editor(&session);
    restore_session(session);
    result.map_err(js_error)
}

/// Open a stored song in the chord editor
#[wasm_bindgen(js_name = openSong)]
pub async fn open_song(id: f64, title: String, content: JsValue) -> Result<(), JsValue> {
    let content: SongContent = deserialize(content, "Invalid song content")?;
    let remote = remote()?;
    let mut session = take_session()?;

    let result = EditorController::new(remote.as_ref())
        .open_song(&mut session, SongId(id as i64), &title, content)
        .await;

    mount_editor(&session);
    restore_session(session);
    result.map_err(js_error)
}

/// Save what the editor shows; resolves to the song id
#[wasm_bindgen(js_name = saveSong)]
pub async fn save_song(title: String) -> Result<JsValue, JsValue> {
    let remote = remote()?;
    let mut session = take_session()?;
    sync_from_dom(&mut session);

    let result = EditorController::new(remote.as_ref())
        .save_song(&mut session, &title)
        .await;

    restore_session(session);
    result
        .map(|id| JsValue::from_f64(id.0 as f64))
        .map_err(js_error)
}

/// Open the chord input on a clicked cell; returns `{line_index, char_index, value}`
/// or `null` for a cell that takes no chord
#[wasm_bindgen(js_name = openChordInput)]
pub fn open_chord_input(line_index: usize, char_index: usize) -> Result<JsValue, JsValue> {
    let mut session = take_session()?;
    sync_from_dom(&mut session);
    let input = session.open_chord_input(line_index, char_index).cloned();
    restore_session(session);

    match input {
        Some(input) => serialize(&input, "Failed to serialize chord input"),
        None => Ok(JsValue::NULL),
    }
}

/// Confirm the open chord input with the typed value
#[wasm_bindgen(js_name = submitChordInput)]
pub async fn submit_chord_input(value: String) -> Result<JsValue, JsValue> {
    let remote = remote()?;
    let mut session = take_session()?;
    sync_from_dom(&mut session);
    let before = session.view.clone();
    if let Some(input) = session.chord_input.as_mut() {
        input.value = value;
    }

    let result = EditorController::new(remote.as_ref())
        .submit_chord_input(&mut session)
        .await;

    remount_if_changed(before, &session);
    restore_session(session);
    outcome_to_js(result)
}

#[wasm_bindgen(js_name = cancelChordInput)]
pub fn cancel_chord_input() -> Result<(), JsValue> {
    let mut session = take_session()?;
    session.cancel_chord_input();
    restore_session(session);
    Ok(())
}

/// Start dragging the chord of a cell; `false` when the cell has none
#[wasm_bindgen(js_name = beginDrag)]
pub fn begin_drag(line_index: usize, char_index: usize) -> Result<bool, JsValue> {
    let mut session = take_session()?;
    sync_from_dom(&mut session);
    let started = session.begin_drag(line_index, char_index);
    if started {
        patch_editor(|container| toggle_chord_class(container, line_index, char_index, CLASS_DRAGGING, true));
    }
    restore_session(session);
    Ok(started)
}

#[wasm_bindgen(js_name = dragOver)]
pub fn drag_over(line_index: usize, char_index: usize) -> Result<(), JsValue> {
    let mut session = take_session()?;
    session.drag_over(line_index, char_index);
    let highlighted = session
        .view
        .cell(line_index, char_index)
        .is_some_and(|cell| cell.has_class(CLASS_DRAG_OVER));
    if highlighted {
        patch_editor(|container| toggle_cell_class(container, line_index, char_index, CLASS_DRAG_OVER, true));
    }
    restore_session(session);
    Ok(())
}

#[wasm_bindgen(js_name = dragLeave)]
pub fn drag_leave(line_index: usize, char_index: usize) -> Result<(), JsValue> {
    let mut session = take_session()?;
    session.drag_leave(line_index, char_index);
    patch_editor(|container| toggle_cell_class(container, line_index, char_index, CLASS_DRAG_OVER, false));
    restore_session(session);
    Ok(())
}

/// Drag ended without a drop
#[wasm_bindgen(js_name = endDrag)]
pub fn end_drag() -> Result<(), JsValue> {
    let mut session = take_session()?;
    session.end_drag();
    patch_editor(|container| {
        clear_class(container, CLASS_DRAGGING)?;
        clear_class(container, CLASS_DRAG_OVER)
    });
    restore_session(session);
    Ok(())
}

/// Finish a drag. Pass no target when the pointer left every cell.
#[wasm_bindgen(js_name = dropChord)]
pub async fn drop_chord(target_line: Option<u32>, target_char: Option<u32>) -> Result<JsValue, JsValue> {
    let remote = remote()?;
    let mut session = take_session()?;
    sync_from_dom(&mut session);
    let before = session.view.clone();
    let target = target_line.zip(target_char).map(|(l, c)| (l as usize, c as usize));

    let result = EditorController::new(remote.as_ref())
        .drop_chord(&mut session, target)
        .await;

    remount_if_changed(before, &session);
    restore_session(session);
    outcome_to_js(result)
}

/// Read-only rendering of stored content into a song view container
#[wasm_bindgen(js_name = viewSong)]
pub fn view_song(content: JsValue, container: Element) -> Result<(), JsValue> {
    let content: SongContent = deserialize(content, "Invalid song content")?;
    let session = take_session()?;
    let view = session.view_song(&content);
    restore_session(session);
    mount_view(&view, &container)
}

/// Leave chord mode; returns the lyric text for the text area
#[wasm_bindgen(js_name = backToLyrics)]
pub fn back_to_lyrics() -> Result<String, JsValue> {
    let mut session = take_session()?;
    sync_from_dom(&mut session);
    let lyrics = session.back_to_lyrics();
    restore_session(session);
    Ok(lyrics)
}

#[wasm_bindgen(js_name = changeLanguage)]
pub fn change_language(language: String) -> Result<(), JsValue> {
    let mut session = take_session()?;
    let result = session.change_language(&language);
    restore_session(session);
    result.map_err(js_error)
}

#[wasm_bindgen(js_name = currentLanguage)]
pub fn current_language() -> Result<String, JsValue> {
    let session = take_session()?;
    let language = session.effective_language();
    restore_session(session);
    Ok(language)
}

#[wasm_bindgen(js_name = startNewSong)]
pub fn start_new_song() -> Result<(), JsValue> {
    let mut session = take_session()?;
    session.start_new_song();
    mount_editor(&session);
    restore_session(session);
    Ok(())
}

/// Message of the last failed operation, if any
#[wasm_bindgen(js_name = lastError)]
pub fn last_error() -> Option<String> {
    SESSION.with(|slot| slot.borrow().as_ref().and_then(|session| session.last_error.clone()))
}

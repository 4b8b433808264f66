//! Remote collaborators backed by host JavaScript callbacks
//!
//! The host passes an object with `previewChords`, `prepareLyrics` and
//! `saveSong` functions. Each takes one plain-object request and returns a
//! promise (or a plain value). A rejected promise or a thrown error is a
//! remote failure.

use js_sys::{Function, Promise, Reflect};
use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

use super::helpers::{js_message, to_js};
use crate::editor::{LyricPreparer, RemoteNormalizer, SongStore};
use crate::error::RemoteError;
use crate::models::{
    NormalizeRequest, NormalizeResponse, PrepareRequest, PreparedLyrics, SaveSongRequest, SavedSong, SongContent,
    SongId,
};

pub struct JsRemote {
    preview_chords: Function,
    prepare_lyrics: Option<Function>,
    save_song: Option<Function>,
}

impl JsRemote {
    /// Read the callbacks off the host object; `previewChords` is required
    pub fn from_js(host: &JsValue) -> Result<Self, JsValue> {
        let preview_chords = callback(host, "previewChords")?
            .ok_or_else(|| JsValue::from_str("remote is missing previewChords()"))?;
        Ok(Self {
            preview_chords,
            prepare_lyrics: callback(host, "prepareLyrics")?,
            save_song: callback(host, "saveSong")?,
        })
    }
}

fn callback(host: &JsValue, name: &str) -> Result<Option<Function>, JsValue> {
    let value = Reflect::get(host, &JsValue::from_str(name))?;
    if value.is_undefined() || value.is_null() {
        return Ok(None);
    }
    value
        .dyn_into::<Function>()
        .map(Some)
        .map_err(|_| JsValue::from_str(&format!("remote.{} is not a function", name)))
}

async fn call<Req, Resp>(func: &Function, request: &Req) -> Result<Resp, RemoteError>
where
    Req: Serialize,
    Resp: DeserializeOwned,
{
    let arg = to_js(request).map_err(|e| RemoteError::Transport(e.to_string()))?;
    let returned = func
        .call1(&JsValue::NULL, &arg)
        .map_err(|e| RemoteError::Transport(js_message(&e)))?;
    let value = JsFuture::from(Promise::resolve(&returned))
        .await
        .map_err(|e| RemoteError::Service(js_message(&e)))?;
    serde_wasm_bindgen::from_value(value).map_err(|e| RemoteError::Decode(e.to_string()))
}

fn missing(name: &str) -> RemoteError {
    RemoteError::Transport(format!("host did not provide {}()", name))
}

impl RemoteNormalizer for JsRemote {
    async fn normalize(&self, request: NormalizeRequest) -> Result<SongContent, RemoteError> {
        let response: NormalizeResponse = call(&self.preview_chords, &request).await?;
        Ok(response.content)
    }
}

impl LyricPreparer for JsRemote {
    async fn prepare(&self, request: PrepareRequest) -> Result<PreparedLyrics, RemoteError> {
        let func = self.prepare_lyrics.as_ref().ok_or_else(|| missing("prepareLyrics"))?;
        call(func, &request).await
    }
}

impl SongStore for JsRemote {
    async fn save(&self, request: SaveSongRequest) -> Result<SongId, RemoteError> {
        let func = self.save_song.as_ref().ok_or_else(|| missing("saveSong"))?;
        let saved: SavedSong = call(func, &request).await?;
        Ok(saved.id)
    }
}

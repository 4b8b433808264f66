//! Serde helpers for the chord content wire format
//!
//! Stored songs carry chords in two shapes: a bare string (`"G"`) or an
//! entry object (`{"text": "G", "type": "auto"}`), keyed by offsets that may
//! arrive as strings or numbers. Everything is normalized here so the rest of
//! the crate only ever sees [`Chord`].

use serde::de::{self, Deserializer, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;

use super::content::{Chord, ChordOrigin, Line, Section};

/// Serialize the chord map with string keys so it is a plain JSON object
pub fn serialize_chord_map<S>(chords: &BTreeMap<usize, Chord>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut map = serializer.serialize_map(Some(chords.len()))?;
    for (offset, chord) in chords {
        map.serialize_entry(&offset.to_string(), chord)?;
    }
    map.end()
}

/// Chord offset key, accepted as a number or a numeric string
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct OffsetKey(pub usize);

impl<'de> Deserialize<'de> for OffsetKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct OffsetVisitor;

        impl<'de> Visitor<'de> for OffsetVisitor {
            type Value = OffsetKey;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a non-negative chord offset")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<OffsetKey, E> {
                usize::try_from(v)
                    .map(OffsetKey)
                    .map_err(|_| E::invalid_value(de::Unexpected::Unsigned(v), &self))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<OffsetKey, E> {
                usize::try_from(v)
                    .map(OffsetKey)
                    .map_err(|_| E::invalid_value(de::Unexpected::Signed(v), &self))
            }

            // JS numbers cross the boundary as f64
            fn visit_f64<E: de::Error>(self, v: f64) -> Result<OffsetKey, E> {
                if v >= 0.0 && v.fract() == 0.0 && v <= usize::MAX as f64 {
                    Ok(OffsetKey(v as usize))
                } else {
                    Err(E::invalid_value(de::Unexpected::Float(v), &self))
                }
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<OffsetKey, E> {
                v.trim()
                    .parse::<usize>()
                    .map(OffsetKey)
                    .map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
            }
        }

        deserializer.deserialize_any(OffsetVisitor)
    }
}

/// Either historical chord shape
#[derive(Deserialize, Debug)]
#[serde(untagged)]
pub enum WireChord {
    Text(String),
    Entry {
        #[serde(default)]
        text: Option<String>,
        #[serde(default, rename = "type", alias = "origin")]
        origin: Option<String>,
    },
}

impl WireChord {
    /// `None` when the entry has no visible text
    pub fn into_chord(self) -> Option<Chord> {
        let (text, origin) = match self {
            WireChord::Text(text) => (text, ChordOrigin::Manual),
            WireChord::Entry { text, origin } => {
                let origin = match origin.as_deref() {
                    Some("auto") => ChordOrigin::Auto,
                    _ => ChordOrigin::Manual,
                };
                (text.unwrap_or_default(), origin)
            }
        };

        let text = text.trim();
        if text.is_empty() {
            None
        } else {
            Some(Chord {
                text: text.to_string(),
                origin,
            })
        }
    }
}

/// Line as it arrives on the wire, before normalization
#[derive(Deserialize, Debug)]
pub struct WireLine {
    #[serde(default)]
    pub text: String,

    #[serde(default)]
    pub chords: Option<BTreeMap<OffsetKey, Option<WireChord>>>,

    #[serde(default)]
    pub section: Option<Section>,
}

impl From<WireLine> for Line {
    fn from(wire: WireLine) -> Self {
        let len = wire.text.chars().count();
        let mut chords = BTreeMap::new();

        for (OffsetKey(offset), raw) in wire.chords.into_iter().flatten() {
            let Some(chord) = raw.and_then(WireChord::into_chord) else {
                continue;
            };
            if offset > len {
                log::warn!(
                    "dropping chord '{}' at offset {} beyond line length {}",
                    chord.text,
                    offset,
                    len
                );
                continue;
            }
            chords.insert(offset, chord);
        }

        Line {
            text: wire.text,
            chords,
            section: wire.section.unwrap_or_default(),
        }
    }
}

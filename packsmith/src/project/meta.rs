//! Pack manifest, language and sound definition types.
//!
//! These mirror the JSON documents found in a resource pack:
//!
//! - `pack.mcmeta` → [`PackMcmeta`]
//! - `assets/minecraft/sounds.json` → [`SoundEntryMap`]

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Metadata of a custom language declared in `pack.mcmeta`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LangEntry {
    /// Language name (e.g. "Français").
    #[serde(default)]
    pub name: String,
    /// Region name (e.g. "France").
    #[serde(default)]
    pub region: String,
    /// Whether text runs right to left.
    #[serde(default)]
    pub bidirectional: bool,
}

/// Detailed sound reference inside a sound event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoundFile {
    /// Sound name relative to the sounds directory, without suffix.
    pub name: String,
    /// `"file"` (default) or `"event"` when `name` refers to another event.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pitch: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<u32>,
}

/// A sound referenced by a sound event: a bare name or a detailed object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SoundRef {
    Name(String),
    Detailed(SoundFile),
}

impl SoundRef {
    /// Sound name relative to the sounds directory, without suffix.
    pub fn name(&self) -> &str {
        match self {
            SoundRef::Name(name) => name,
            SoundRef::Detailed(file) => &file.name,
        }
    }

    /// Check if this refers to another sound event rather than a file.
    pub fn is_event(&self) -> bool {
        match self {
            SoundRef::Name(_) => false,
            SoundRef::Detailed(file) => file.kind.as_deref() == Some("event"),
        }
    }
}

/// A sound event definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SoundEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replace: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    /// Sounds played by the event.
    #[serde(default)]
    pub sounds: Vec<SoundRef>,
}

/// Sound events keyed by event name (`sounds.json`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SoundEntryMap(BTreeMap<String, SoundEntry>);

impl SoundEntryMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `sounds.json` content.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Add or replace an event.
    pub fn insert(&mut self, event: impl Into<String>, entry: SoundEntry) {
        self.0.insert(event.into(), entry);
    }

    /// Look up an event.
    pub fn get(&self, event: &str) -> Option<&SoundEntry> {
        self.0.get(event)
    }

    /// Events in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &SoundEntry)> {
        self.0.iter()
    }

    /// Names of every sound file referenced by any event, in event order.
    ///
    /// References to other events are skipped. A file referenced by several
    /// events appears once per reference.
    pub fn sound_files(&self) -> impl Iterator<Item = &str> {
        self.0
            .values()
            .flat_map(|entry| entry.sounds.iter())
            .filter(|sound| !sound.is_event())
            .map(SoundRef::name)
    }

    /// Number of events.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if there are no events.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The `pack` section of `pack.mcmeta`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PackInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pack_format: Option<u32>,
    /// Plain string or a text component.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Value>,
}

impl PackInfo {
    /// Description as plain text.
    ///
    /// Text components contribute their `text` fields, including `extra`
    /// children; other values yield `None`.
    pub fn title(&self) -> Option<String> {
        let text = component_text(self.description.as_ref()?);
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

fn component_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(parts) => parts.iter().map(component_text).collect(),
        Value::Object(map) => {
            let mut text = map
                .get("text")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            if let Some(extra) = map.get("extra") {
                text.push_str(&component_text(extra));
            }
            text
        }
        _ => String::new(),
    }
}

/// The `pack.mcmeta` manifest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PackMcmeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pack: Option<PackInfo>,
    /// Custom languages keyed by code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<BTreeMap<String, LangEntry>>,
}

impl PackMcmeta {
    /// Parse `pack.mcmeta` content.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Declared pack title, if any.
    pub fn title(&self) -> Option<String> {
        self.pack.as_ref().and_then(PackInfo::title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mcmeta_plain_description() {
        let meta = PackMcmeta::from_json(
            r#"{"pack": {"pack_format": 1, "description": "My Pack"}}"#,
        )
        .unwrap();
        assert_eq!(meta.title().as_deref(), Some("My Pack"));
        assert!(meta.language.is_none());
    }

    #[test]
    fn test_mcmeta_component_description() {
        let meta = PackMcmeta::from_json(
            r#"{"pack": {"description": {"text": "My ", "extra": [{"text": "Pack"}]}}}"#,
        )
        .unwrap();
        assert_eq!(meta.title().as_deref(), Some("My Pack"));
    }

    #[test]
    fn test_mcmeta_without_description() {
        let meta = PackMcmeta::from_json(r#"{"pack": {"pack_format": 3}}"#).unwrap();
        assert_eq!(meta.title(), None);

        let meta = PackMcmeta::from_json(r#"{"pack": {"description": 42}}"#).unwrap();
        assert_eq!(meta.title(), None);
    }

    #[test]
    fn test_mcmeta_languages() {
        let meta = PackMcmeta::from_json(
            r#"{"language": {"fr_FR": {"name": "Français", "region": "France", "bidirectional": false}}}"#,
        )
        .unwrap();
        let languages = meta.language.unwrap();
        assert_eq!(languages["fr_FR"].name, "Français");
        assert_eq!(languages["fr_FR"].region, "France");
    }

    #[test]
    fn test_sound_map_mixed_references() {
        let map = SoundEntryMap::from_json(
            r#"{
                "ambient.cave": {"category": "ambient", "sounds": ["ambient/cave/cave1", {"name": "ambient/cave/cave2", "stream": true}]},
                "mob.custom": {"sounds": [{"name": "ambient.cave", "type": "event"}]}
            }"#,
        )
        .unwrap();

        assert_eq!(map.len(), 2);
        let files: Vec<&str> = map.sound_files().collect();
        assert_eq!(files, vec!["ambient/cave/cave1", "ambient/cave/cave2"]);
    }

    #[test]
    fn test_sound_map_json_round_trip() {
        let mut map = SoundEntryMap::new();
        map.insert(
            "custom.boom",
            SoundEntry {
                category: Some("master".to_string()),
                sounds: vec![SoundRef::Name("custom/boom".to_string())],
                ..Default::default()
            },
        );

        let json = map.to_json().unwrap();
        assert_eq!(SoundEntryMap::from_json(&json).unwrap(), map);
    }

    #[test]
    fn test_sound_map_rejects_wrong_shape() {
        assert!(SoundEntryMap::from_json(r#"["not", "a", "map"]"#).is_err());
    }
}

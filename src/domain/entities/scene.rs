//! Scene snapshot entity - what the extractor recovered from one USD file
//!
//! A `SceneDescription` is a read-only snapshot taken at submission time.
//! It knows nothing about how it was produced; `usdcat` text scanning is one
//! strategy behind the `SceneReader` port.

use std::collections::BTreeMap;

use crate::domain::value_objects::{FrameRange, FrameTemplate};

/// Layer metadata key holding the stage's default settings prim.
pub const RENDER_SETTINGS_PRIM_PATH: &str = "renderSettingsPrimPath";

/// Declared type of a prim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PrimKind {
    RenderSettings,
    RenderProduct,
    RenderVar,
    RenderPass,
    Other(String),
}

impl PrimKind {
    pub fn from_type_name(name: &str) -> Self {
        match name {
            "RenderSettings" => PrimKind::RenderSettings,
            "RenderProduct" => PrimKind::RenderProduct,
            "RenderVar" => PrimKind::RenderVar,
            "RenderPass" => PrimKind::RenderPass,
            other => PrimKind::Other(other.to_string()),
        }
    }

    pub fn type_name(&self) -> &str {
        match self {
            PrimKind::RenderSettings => "RenderSettings",
            PrimKind::RenderProduct => "RenderProduct",
            PrimKind::RenderVar => "RenderVar",
            PrimKind::RenderPass => "RenderPass",
            PrimKind::Other(name) => name,
        }
    }
}

/// One prim recovered from the dump.
#[derive(Debug, Clone, PartialEq)]
pub struct PrimRecord {
    pub path: String,
    pub kind: PrimKind,
    /// Relationship targets by relationship name, in authored order
    pub relationships: BTreeMap<String, Vec<String>>,
    /// `productName` (static or the first time sample)
    pub product_name: Option<FrameTemplate>,
    pub resolution: Option<(u32, u32)>,
}

impl PrimRecord {
    pub fn new(path: impl Into<String>, kind: PrimKind) -> Self {
        Self {
            path: path.into(),
            kind,
            relationships: BTreeMap::new(),
            product_name: None,
            resolution: None,
        }
    }

    /// Targets of a relationship, empty when not authored.
    pub fn targets(&self, relationship: &str) -> &[String] {
        self.relationships
            .get(relationship)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn first_target(&self, relationship: &str) -> Option<&str> {
        self.targets(relationship).first().map(String::as_str)
    }

    pub fn name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }
}

/// Layer metadata as raw `key = value` text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayerMetadata {
    entries: BTreeMap<String, String>,
}

impl LayerMetadata {
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Value with surrounding quotes removed.
    pub fn string(&self, key: &str) -> Option<&str> {
        let raw = self.raw(key)?.trim();
        Some(raw.trim_matches('"').trim_matches('\''))
    }

    pub fn number(&self, key: &str) -> Option<f64> {
        self.string(key)?.parse().ok()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Everything extracted from one USD file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneDescription {
    pub metadata: LayerMetadata,
    prims: Vec<PrimRecord>,
}

impl SceneDescription {
    pub fn new(metadata: LayerMetadata, prims: Vec<PrimRecord>) -> Self {
        Self { metadata, prims }
    }

    /// Prims in declaration order.
    pub fn prims(&self) -> &[PrimRecord] {
        &self.prims
    }

    pub fn prim(&self, path: &str) -> Option<&PrimRecord> {
        self.prims.iter().find(|p| p.path == path)
    }

    pub fn prims_of<'a>(&'a self, kind: &'a PrimKind) -> impl Iterator<Item = &'a PrimRecord> {
        self.prims.iter().filter(move |p| &p.kind == kind)
    }

    pub fn pass_paths(&self) -> Vec<&str> {
        self.prims_of(&PrimKind::RenderPass)
            .map(|p| p.path.as_str())
            .collect()
    }

    pub fn settings_paths(&self) -> Vec<&str> {
        self.prims_of(&PrimKind::RenderSettings)
            .map(|p| p.path.as_str())
            .collect()
    }

    /// Frame range from `startTimeCode` / `endTimeCode`, if both parse.
    pub fn frame_range(&self) -> Option<FrameRange> {
        let start = self.metadata.number("startTimeCode")?;
        let end = self.metadata.number("endTimeCode")?;
        match FrameRange::from_time_codes(start, end) {
            Ok(range) => Some(range),
            Err(e) => {
                log::warn!("ignoring layer time codes: {}", e);
                None
            }
        }
    }

    /// The stage's declared default settings prim.
    pub fn default_settings_path(&self) -> Option<&str> {
        self.metadata
            .string(RENDER_SETTINGS_PRIM_PATH)
            .filter(|s| !s.is_empty())
    }
}

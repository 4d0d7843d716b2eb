//! Named tuning presets
//!
//! Persists a set of named [`ScrollTuning`] snapshots as a JSON document
//! with a "last used" pointer, so the daemon restores the previously
//! selected parameters on startup:
//!
//! ```json
//! {
//!   "presets": { "default": { ... }, "reading": { ... } },
//!   "last_used": "reading"
//! }
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::warn;

use super::ScrollTuning;

/// Name of the built-in preset. Always present, cannot be removed.
pub const DEFAULT_PRESET: &str = "default";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PresetDocument {
    presets: BTreeMap<String, ScrollTuning>,
    last_used: String,
}

impl Default for PresetDocument {
    fn default() -> Self {
        let mut presets = BTreeMap::new();
        presets.insert(DEFAULT_PRESET.to_string(), ScrollTuning::default());
        Self {
            presets,
            last_used: DEFAULT_PRESET.to_string(),
        }
    }
}

/// On-disk store of named tuning presets.
#[derive(Debug)]
pub struct PresetStore {
    path: PathBuf,
    document: PresetDocument,
}

impl PresetStore {
    /// Default store location (`~/.config/glidescroll/presets.json`)
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("glidescroll")
            .join("presets.json")
    }

    /// Load the store from `path`.
    ///
    /// A missing or corrupt file degrades to the built-in default preset;
    /// preset storage is a convenience and must never prevent startup.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let document = match std::fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<PresetDocument>(&content) {
                Ok(mut doc) => {
                    // The default preset and a valid last_used pointer are
                    // restored if the file was hand-edited out of shape.
                    doc.presets
                        .entry(DEFAULT_PRESET.to_string())
                        .or_default();
                    if !doc.presets.contains_key(&doc.last_used) {
                        doc.last_used = DEFAULT_PRESET.to_string();
                    }
                    doc
                }
                Err(e) => {
                    warn!("Corrupt preset file {}: {}, using defaults", path.display(), e);
                    PresetDocument::default()
                }
            },
            Err(_) => PresetDocument::default(),
        };

        Self { path, document }
    }

    /// Write the store back to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let content = serde_json::to_string_pretty(&self.document)?;
        std::fs::write(&self.path, content)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        Ok(())
    }

    /// Insert or replace a named preset.
    pub fn insert(&mut self, name: &str, tuning: ScrollTuning) {
        self.document.presets.insert(name.to_string(), tuning);
    }

    /// Remove a preset. The default preset cannot be removed.
    pub fn remove(&mut self, name: &str) -> Result<()> {
        if name == DEFAULT_PRESET {
            anyhow::bail!("the default preset cannot be removed");
        }
        if self.document.presets.remove(name).is_none() {
            anyhow::bail!("no such preset: {}", name);
        }
        if self.document.last_used == name {
            self.document.last_used = DEFAULT_PRESET.to_string();
        }
        Ok(())
    }

    /// Select a preset, updating the last-used pointer, and return its tuning.
    pub fn select(&mut self, name: &str) -> Result<ScrollTuning> {
        let tuning = *self
            .document
            .presets
            .get(name)
            .with_context(|| format!("no such preset: {}", name))?;
        self.document.last_used = name.to_string();
        Ok(tuning)
    }

    /// Tuning of the last-used preset.
    pub fn last_used(&self) -> ScrollTuning {
        self.document
            .presets
            .get(&self.document.last_used)
            .copied()
            .unwrap_or_default()
    }

    /// Name of the last-used preset.
    pub fn last_used_name(&self) -> &str {
        &self.document.last_used
    }

    /// Preset names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.document.presets.keys().map(String::as_str)
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

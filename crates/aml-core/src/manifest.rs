//! Manifest model: categorized audio clips with primary and mirror URLs.
//!
//! Category order and item order are preserved end-to-end; `serde_json` is
//! built with `preserve_order` so the input's key order survives parsing.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// One audio clip: display text, primary URL, optional mirror URLs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioItem {
    pub text: String,
    pub url: String,
    #[serde(default)]
    pub mirrors: Vec<Mirror>,
}

/// Alternate source for an item's clip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mirror {
    pub text: String,
    pub url: String,
}

/// The manifest: category name → ordered list of items.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    pub categories: Vec<(String, Vec<AudioItem>)>,
}

impl Manifest {
    /// Parses a manifest from JSON text.
    pub fn from_json(data: &str) -> Result<Self> {
        let root: Map<String, Value> =
            serde_json::from_str(data).context("manifest is not a JSON object")?;
        let mut categories = Vec::with_capacity(root.len());
        for (name, items) in root {
            let items: Vec<AudioItem> = serde_json::from_value(items)
                .with_context(|| format!("category {name:?} is not a list of audio items"))?;
            categories.push((name, items));
        }
        Ok(Self { categories })
    }

    /// Serializes the manifest pretty-printed with 4-space indentation.
    ///
    /// Output is deterministic for a given manifest, so re-running the
    /// pipeline over an unchanged cache writes byte-identical files.
    pub fn to_json_pretty(&self) -> Result<String> {
        let mut root = Map::with_capacity(self.categories.len());
        for (name, items) in &self.categories {
            root.insert(name.clone(), serde_json::to_value(items)?);
        }
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        Value::Object(root)
            .serialize(&mut ser)
            .context("serialize manifest")?;
        String::from_utf8(buf).context("manifest JSON is not UTF-8")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("read manifest {}", path.display()))?;
        Self::from_json(&data)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = self.to_json_pretty()?;
        fs::write(path, json).with_context(|| format!("write manifest {}", path.display()))
    }
}

// Copyright 2024 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::label::ContentTypeLabel;
use crate::Result;

const TEXT_MIME_TYPE: &str = "text/plain";
const UNKNOWN_MIME_TYPE: &str = "application/octet-stream";
const UNKNOWN_GROUP: &str = "unknown";

/// Immutable per-label descriptor, one per [`ContentTypeLabel`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ContentTypeInfo {
    /// The label this descriptor is for.
    pub label: ContentTypeLabel,
    /// The MIME type of the content type.
    pub mime_type: String,
    /// The group of the content type (e.g. `"code"`, `"archive"`, `"image"`).
    pub group: String,
    /// A human-readable description of the content type.
    pub description: String,
    /// Possible file extensions for the content type.
    pub extensions: Vec<String>,
    /// Whether the content type is text.
    pub is_text: bool,
}

#[derive(Debug, Deserialize)]
struct RawEntry {
    mime_type: Option<String>,
    group: Option<String>,
    description: Option<String>,
    #[serde(default)]
    extensions: Vec<String>,
    is_text: bool,
}

/// Read-only map from [`ContentTypeLabel`] to [`ContentTypeInfo`], loaded
/// once from a JSON knowledge base at engine construction.
#[derive(Debug, Clone)]
pub struct ContentTypeCatalog {
    entries: HashMap<ContentTypeLabel, ContentTypeInfo>,
}

impl ContentTypeCatalog {
    /// Loads the catalog bundled with this crate.
    pub fn bundled() -> Result<Self> {
        Self::from_json(include_str!("data/content_types.json"))
    }

    /// Loads a catalog from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Parses a content-type knowledge base already read into memory.
    ///
    /// The JSON is a `{label: {mime_type, group, description, extensions,
    /// is_text}}` object; nullable fields fall back to the defaults
    /// described in `spec.md` §6.
    pub fn from_json(text: &str) -> Result<Self> {
        let raw: HashMap<String, RawEntry> = serde_json::from_str(text)?;
        let mut entries = HashMap::with_capacity(raw.len());
        for (name, entry) in raw {
            let label: ContentTypeLabel = name.parse()?;
            let default_mime = if entry.is_text { TEXT_MIME_TYPE } else { UNKNOWN_MIME_TYPE };
            let info = ContentTypeInfo {
                label,
                mime_type: entry.mime_type.unwrap_or_else(|| default_mime.to_string()),
                group: entry.group.unwrap_or_else(|| UNKNOWN_GROUP.to_string()),
                description: entry.description.unwrap_or_else(|| name.clone()),
                extensions: entry.extensions,
                is_text: entry.is_text,
            };
            entries.insert(label, info);
        }
        Ok(ContentTypeCatalog { entries })
    }

    /// Returns the descriptor for `label`, if any.
    pub fn get(&self, label: ContentTypeLabel) -> Option<&ContentTypeInfo> {
        self.entries.get(&label)
    }

    /// Returns the descriptor for `label`, falling back to a generic
    /// descriptor (`group = "unknown"`, `description = label.as_str()`) if
    /// the catalog has no explicit entry. Used for the reserved dispatcher
    /// labels (`EMPTY`, `DIRECTORY`, `SYMLINK`, `UNDEFINED`), which are not
    /// expected to appear in the knowledge base.
    pub(crate) fn get_or_synthetic(&self, label: ContentTypeLabel) -> ContentTypeInfo {
        self.entries.get(&label).cloned().unwrap_or_else(|| ContentTypeInfo {
            label,
            mime_type: UNKNOWN_MIME_TYPE.to_string(),
            group: UNKNOWN_GROUP.to_string(),
            description: label.as_str().to_string(),
            extensions: Vec::new(),
            is_text: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_catalog_parses() {
        let catalog = ContentTypeCatalog::bundled().unwrap();
        let python = catalog.get(ContentTypeLabel::Python).unwrap();
        assert_eq!(python.label, ContentTypeLabel::Python);
        assert!(python.is_text);
    }

    #[test]
    fn null_fields_use_defaults() {
        let json = r#"{"mysterylabel": {"mime_type": null, "group": null, "description": null, "extensions": [], "is_text": false}}"#;
        let catalog = ContentTypeCatalog::from_json(json);
        // "mysterylabel" is not a real ContentTypeLabel, so parsing should fail fast.
        assert!(catalog.is_err());
    }

    #[test]
    fn unknown_label_defaults_to_octet_stream() {
        let json = r#"{"unknown": {"mime_type": null, "group": null, "description": null, "extensions": [], "is_text": false}}"#;
        let catalog = ContentTypeCatalog::from_json(json).unwrap();
        let info = catalog.get(ContentTypeLabel::Unknown).unwrap();
        assert_eq!(info.mime_type, "application/octet-stream");
        assert_eq!(info.group, "unknown");
        assert_eq!(info.description, "unknown");
    }

    #[test]
    fn text_label_defaults_to_text_plain() {
        let json = r#"{"txt": {"mime_type": null, "group": null, "description": null, "extensions": [], "is_text": true}}"#;
        let catalog = ContentTypeCatalog::from_json(json).unwrap();
        let info = catalog.get(ContentTypeLabel::Txt).unwrap();
        assert_eq!(info.mime_type, "text/plain");
    }
}

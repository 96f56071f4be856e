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

use crate::catalog::ContentTypeCatalog;
use crate::label::ContentTypeLabel;
use crate::{Error, Result};

/// Feature-extraction and decision parameters read from `config.min.json`.
///
/// Every field here is a direct translation of a `config.min.json` key; see
/// `spec.md` §3 and §6 for the authoritative description of each.
#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// Size of the "beginning" feature slice.
    pub beg_size: usize,
    /// Size of the "middle" feature slice. The core extractor requires this
    /// to be `0`.
    pub mid_size: usize,
    /// Size of the "end" feature slice.
    pub end_size: usize,
    /// Whether additional offset-window features are enabled. The core
    /// extractor requires this to be `false`.
    pub use_inputs_at_offsets: bool,
    /// Acceptance threshold used in `MEDIUM_CONFIDENCE` mode, and as the
    /// default per-label threshold when a label has no entry in
    /// [`Self::thresholds`].
    pub medium_confidence_threshold: f32,
    /// Inputs with at most this many meaningful (post-strip) bytes bypass
    /// the model entirely.
    pub min_file_size_for_dl: usize,
    /// Sentinel integer used to pad short feature slices. Always outside
    /// `0..=255`.
    pub padding_token: i32,
    /// Size of the read window used at each end of the input.
    pub block_size: usize,
    /// Ordered list of labels the model's output tensor columns correspond
    /// to (index ↔ logit position).
    pub target_labels_space: Vec<ContentTypeLabel>,
    /// Per-label high-confidence threshold, keyed by raw (pre-overwrite)
    /// label.
    pub thresholds: HashMap<ContentTypeLabel, f32>,
    /// Label rewrite applied to the raw prediction before the confidence
    /// check. Labels absent from this map are left unchanged.
    pub overwrite_map: HashMap<ContentTypeLabel, ContentTypeLabel>,
}

#[derive(Debug, Deserialize)]
struct RawModelConfig {
    beg_size: usize,
    mid_size: usize,
    end_size: usize,
    use_inputs_at_offsets: bool,
    medium_confidence_threshold: f32,
    min_file_size_for_dl: usize,
    padding_token: i32,
    block_size: usize,
    target_labels_space: Vec<String>,
    thresholds: HashMap<String, f32>,
    overwrite_map: HashMap<String, String>,
}

impl ModelConfig {
    /// Parses a `config.min.json` file from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|_| Error::MissingConfigFile(path.to_path_buf()))?;
        Self::from_json(&text)
    }

    /// Parses `config.min.json` contents already read into memory.
    pub fn from_json(text: &str) -> Result<Self> {
        let raw: RawModelConfig = serde_json::from_str(text)?;
        let target_labels_space = raw
            .target_labels_space
            .iter()
            .map(|s| s.parse())
            .collect::<Result<Vec<_>>>()?;
        let thresholds = raw
            .thresholds
            .iter()
            .map(|(k, v)| Ok((k.parse()?, *v)))
            .collect::<Result<HashMap<_, _>>>()?;
        let overwrite_map = raw
            .overwrite_map
            .iter()
            .map(|(k, v)| Ok((k.parse()?, v.parse()?)))
            .collect::<Result<HashMap<_, _>>>()?;
        let config = ModelConfig {
            beg_size: raw.beg_size,
            mid_size: raw.mid_size,
            end_size: raw.end_size,
            use_inputs_at_offsets: raw.use_inputs_at_offsets,
            medium_confidence_threshold: raw.medium_confidence_threshold,
            min_file_size_for_dl: raw.min_file_size_for_dl,
            padding_token: raw.padding_token,
            block_size: raw.block_size,
            target_labels_space,
            thresholds,
            overwrite_map,
        };
        debug_assert!(config.mid_size == 0, "mid_size extension is not implemented");
        debug_assert!(!config.use_inputs_at_offsets, "offset features are not implemented");
        Ok(config)
    }

    /// Returns the per-label high-confidence threshold for `label`, falling
    /// back to [`Self::medium_confidence_threshold`] if `label` has no
    /// specific entry.
    pub(crate) fn threshold_for(&self, label: ContentTypeLabel) -> f32 {
        self.thresholds.get(&label).copied().unwrap_or(self.medium_confidence_threshold)
    }

    /// Applies [`Self::overwrite_map`] to `label`, returning `label`
    /// unchanged if absent.
    pub(crate) fn overwrite(&self, label: ContentTypeLabel) -> ContentTypeLabel {
        self.overwrite_map.get(&label).copied().unwrap_or(label)
    }

    /// Every label the model may produce as a raw output, plus [`ContentTypeLabel::Undefined`].
    pub fn model_content_types(&self) -> Vec<ContentTypeLabel> {
        let mut labels: Vec<ContentTypeLabel> = self.target_labels_space.clone();
        labels.push(ContentTypeLabel::Undefined);
        labels.sort();
        labels.dedup();
        labels
    }

    /// Every label that can appear as a final output, i.e. every target
    /// label mapped through [`Self::overwrite_map`], plus the reserved
    /// dispatcher labels.
    pub fn output_content_types(&self) -> Vec<ContentTypeLabel> {
        let mut labels = vec![
            ContentTypeLabel::Directory,
            ContentTypeLabel::Empty,
            ContentTypeLabel::Symlink,
            ContentTypeLabel::Txt,
            ContentTypeLabel::Unknown,
        ];
        for &label in &self.target_labels_space {
            labels.push(self.overwrite(label));
        }
        labels.sort();
        labels.dedup();
        labels
    }

    /// Validates that every label referenced by this config (target labels,
    /// threshold keys, and both sides of the overwrite map) has a catalog
    /// entry. Per `spec.md` §9, a mapped label that is absent from
    /// `target_labels_space` is still valid as long as it appears in the
    /// catalog.
    pub(crate) fn validate_against(&self, catalog: &ContentTypeCatalog) -> Result<()> {
        let mut check = |label: ContentTypeLabel| -> Result<()> {
            if catalog.get(label).is_none() {
                return Err(Error::MissingCatalogEntry(label.as_str().to_string()));
            }
            Ok(())
        };
        for &label in &self.target_labels_space {
            check(label)?;
        }
        for (&raw, &mapped) in &self.overwrite_map {
            check(raw)?;
            check(mapped)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "beg_size": 8,
        "mid_size": 0,
        "end_size": 8,
        "use_inputs_at_offsets": false,
        "medium_confidence_threshold": 0.5,
        "min_file_size_for_dl": 16,
        "padding_token": 256,
        "block_size": 4096,
        "target_labels_space": ["python", "rust", "unknown"],
        "thresholds": {"python": 0.9},
        "overwrite_map": {"rust": "txt"}
    }"#;

    #[test]
    fn parses_sample_config() {
        let cfg = ModelConfig::from_json(SAMPLE).unwrap();
        assert_eq!(cfg.beg_size, 8);
        assert_eq!(cfg.end_size, 8);
        assert_eq!(cfg.mid_size, 0);
        assert_eq!(cfg.padding_token, 256);
        assert_eq!(
            cfg.target_labels_space,
            vec![ContentTypeLabel::Python, ContentTypeLabel::Rust, ContentTypeLabel::Unknown]
        );
    }

    #[test]
    fn rejects_unknown_label_strings() {
        let bad = SAMPLE.replace("\"python\"", "\"not-a-real-label\"");
        assert!(ModelConfig::from_json(&bad).is_err());
    }

    #[test]
    fn threshold_for_falls_back_to_medium_confidence() {
        let cfg = ModelConfig::from_json(SAMPLE).unwrap();
        assert_eq!(cfg.threshold_for(ContentTypeLabel::Python), 0.9);
        assert_eq!(cfg.threshold_for(ContentTypeLabel::Rust), 0.5);
    }

    #[test]
    fn overwrite_applies_map_or_returns_input() {
        let cfg = ModelConfig::from_json(SAMPLE).unwrap();
        assert_eq!(cfg.overwrite(ContentTypeLabel::Rust), ContentTypeLabel::Txt);
        assert_eq!(cfg.overwrite(ContentTypeLabel::Python), ContentTypeLabel::Python);
    }

    #[test]
    fn model_content_types_includes_undefined() {
        let cfg = ModelConfig::from_json(SAMPLE).unwrap();
        let types = cfg.model_content_types();
        assert!(types.contains(&ContentTypeLabel::Undefined));
        assert!(types.contains(&ContentTypeLabel::Python));
        assert!(types.contains(&ContentTypeLabel::Rust));
    }

    #[test]
    fn output_content_types_maps_through_overwrite_and_adds_reserved_labels() {
        let cfg = ModelConfig::from_json(SAMPLE).unwrap();
        let types = cfg.output_content_types();
        // rust maps to txt via overwrite_map, so rust itself should not appear.
        assert!(!types.contains(&ContentTypeLabel::Rust));
        assert!(types.contains(&ContentTypeLabel::Txt));
        assert!(types.contains(&ContentTypeLabel::Python));
        for reserved in [
            ContentTypeLabel::Directory,
            ContentTypeLabel::Empty,
            ContentTypeLabel::Symlink,
            ContentTypeLabel::Txt,
            ContentTypeLabel::Unknown,
        ] {
            assert!(types.contains(&reserved));
        }
    }

    #[test]
    fn validate_against_accepts_overwrite_target_outside_target_labels_space() {
        // "txt" is not in SAMPLE's target_labels_space but is a valid mapped
        // label, and must appear in the catalog (spec.md §9 open question).
        let cfg = ModelConfig::from_json(SAMPLE).unwrap();
        let catalog = ContentTypeCatalog::from_json(
            r#"{
                "python": {"mime_type": null, "group": null, "description": null, "extensions": [], "is_text": true},
                "rust": {"mime_type": null, "group": null, "description": null, "extensions": [], "is_text": false},
                "unknown": {"mime_type": null, "group": null, "description": null, "extensions": [], "is_text": false},
                "txt": {"mime_type": null, "group": null, "description": null, "extensions": [], "is_text": true}
            }"#,
        )
        .unwrap();
        assert!(cfg.validate_against(&catalog).is_ok());
    }

    #[test]
    fn validate_against_rejects_missing_catalog_entry() {
        let cfg = ModelConfig::from_json(SAMPLE).unwrap();
        let catalog = ContentTypeCatalog::from_json(
            r#"{"python": {"mime_type": null, "group": null, "description": null, "extensions": [], "is_text": true}}"#,
        )
        .unwrap();
        assert!(cfg.validate_against(&catalog).is_err());
    }
}

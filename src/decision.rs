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

use crate::catalog::ContentTypeCatalog;
use crate::config::ModelConfig;
use crate::label::ContentTypeLabel;

/// Why a prediction's output label differs from its raw model label, or
/// doesn't.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum OverwriteReason {
    /// The output label equals the raw model label.
    None,
    /// `config.min.json`'s `overwrite_map` rewrote the raw label.
    OverwriteMap,
    /// The model's score did not clear the relevant confidence threshold, so
    /// the output fell back to `txt`/`unknown`.
    LowConfidence,
}

/// Confidence policy controlling how readily a prediction is accepted versus
/// falling back to `txt`/`unknown`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum PredictionMode {
    /// Always accept the (possibly overwritten) raw label, regardless of
    /// score.
    BestGuess,
    /// Accept the label if its score clears
    /// [`ModelConfig::medium_confidence_threshold`].
    MediumConfidence,
    /// Accept the label only if its score clears the label's specific
    /// high-confidence threshold (falling back to the medium-confidence
    /// threshold if the label has none).
    #[default]
    HighConfidence,
}

/// The result of applying [`DecisionPolicy::decide`]: the label that should
/// be reported, and why it may differ from the model's raw prediction.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Decision {
    /// The label to report to the caller.
    pub output: ContentTypeLabel,
    /// Why `output` differs (or doesn't) from the raw model label.
    pub reason: OverwriteReason,
}

/// Turns a raw model prediction into a final output label.
pub struct DecisionPolicy;

impl DecisionPolicy {
    /// Applies `config`'s overwrite map and then `mode`'s confidence check to
    /// a raw `(label, score)` model prediction, returning the label that
    /// should be reported and the corresponding [`OverwriteReason`].
    ///
    /// The low-confidence fallback picks between `txt` and `unknown` based on
    /// whether the *overwritten* label is text, on the assumption that the
    /// model at least got the binary-vs-text category right.
    pub fn decide(
        raw_label: ContentTypeLabel,
        score: f32,
        mode: PredictionMode,
        config: &ModelConfig,
        catalog: &ContentTypeCatalog,
    ) -> Decision {
        let mapped = config.overwrite(raw_label);
        let provisional_reason =
            if mapped != raw_label { OverwriteReason::OverwriteMap } else { OverwriteReason::None };

        let accepted = match mode {
            PredictionMode::BestGuess => true,
            PredictionMode::MediumConfidence => score >= config.medium_confidence_threshold,
            PredictionMode::HighConfidence => score >= config.threshold_for(raw_label),
        };
        if accepted {
            return Decision { output: mapped, reason: provisional_reason };
        }

        let is_text = catalog.get(mapped).map(|i| i.is_text).unwrap_or(false);
        let fallback = if is_text { ContentTypeLabel::Txt } else { ContentTypeLabel::Unknown };
        // Compared against raw_label, not mapped: overwrite_reason reflects
        // whether the *final* output differs from what the model actually
        // predicted, matching the decision's own invariant.
        let reason = if fallback == raw_label {
            OverwriteReason::None
        } else {
            OverwriteReason::LowConfidence
        };
        Decision { output: fallback, reason }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config() -> ModelConfig {
        ModelConfig {
            beg_size: 8,
            mid_size: 0,
            end_size: 8,
            use_inputs_at_offsets: false,
            medium_confidence_threshold: 0.5,
            min_file_size_for_dl: 16,
            padding_token: 256,
            block_size: 4096,
            target_labels_space: vec![ContentTypeLabel::Python, ContentTypeLabel::Rust],
            thresholds: HashMap::from([(ContentTypeLabel::Python, 0.9)]),
            overwrite_map: HashMap::new(),
        }
    }

    // python/txt are text; rust is binary, matching the bundled knowledge
    // base's actual classification.
    fn catalog() -> ContentTypeCatalog {
        ContentTypeCatalog::from_json(
            r#"{
                "python": {"mime_type": null, "group": null, "description": null, "extensions": [], "is_text": true},
                "rust": {"mime_type": null, "group": null, "description": null, "extensions": [], "is_text": false},
                "txt": {"mime_type": null, "group": null, "description": null, "extensions": [], "is_text": true},
                "unknown": {"mime_type": null, "group": null, "description": null, "extensions": [], "is_text": false}
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn best_guess_always_accepts() {
        let d = DecisionPolicy::decide(
            ContentTypeLabel::Python,
            0.01,
            PredictionMode::BestGuess,
            &config(),
            &catalog(),
        );
        assert_eq!(d.output, ContentTypeLabel::Python);
        assert_eq!(d.reason, OverwriteReason::None);
    }

    #[test]
    fn medium_confidence_falls_back_below_threshold() {
        let d = DecisionPolicy::decide(
            ContentTypeLabel::Python,
            0.4,
            PredictionMode::MediumConfidence,
            &config(),
            &catalog(),
        );
        assert_eq!(d.output, ContentTypeLabel::Txt);
        assert_eq!(d.reason, OverwriteReason::LowConfidence);
    }

    #[test]
    fn medium_confidence_falls_back_to_unknown_for_binary() {
        let d = DecisionPolicy::decide(
            ContentTypeLabel::Rust,
            0.4,
            PredictionMode::MediumConfidence,
            &config(),
            &catalog(),
        );
        assert_eq!(d.output, ContentTypeLabel::Unknown);
        assert_eq!(d.reason, OverwriteReason::LowConfidence);
    }

    #[test]
    fn high_confidence_uses_per_label_threshold() {
        let cfg = config();
        let cat = catalog();
        // Python has an explicit 0.9 threshold: 0.6 clears medium but not high.
        let d = DecisionPolicy::decide(
            ContentTypeLabel::Python,
            0.6,
            PredictionMode::HighConfidence,
            &cfg,
            &cat,
        );
        assert_eq!(d.output, ContentTypeLabel::Txt);

        let d = DecisionPolicy::decide(
            ContentTypeLabel::Python,
            0.95,
            PredictionMode::HighConfidence,
            &cfg,
            &cat,
        );
        assert_eq!(d.output, ContentTypeLabel::Python);
        assert_eq!(d.reason, OverwriteReason::None);
    }

    #[test]
    fn high_confidence_falls_back_to_medium_threshold_when_unset() {
        // Rust has no explicit threshold, so it falls back to 0.5.
        let cfg = config();
        let d = DecisionPolicy::decide(
            ContentTypeLabel::Rust,
            0.6,
            PredictionMode::HighConfidence,
            &cfg,
            &catalog(),
        );
        assert_eq!(d.output, ContentTypeLabel::Rust);
    }

    #[test]
    fn overwrite_map_applies_when_confidence_check_passes() {
        let mut cfg = config();
        cfg.overwrite_map.insert(ContentTypeLabel::Python, ContentTypeLabel::Txt);
        // Python's high-confidence threshold is 0.9; 0.99 clears it, so the
        // overwritten label is reported.
        let d = DecisionPolicy::decide(
            ContentTypeLabel::Python,
            0.99,
            PredictionMode::HighConfidence,
            &cfg,
            &catalog(),
        );
        assert_eq!(d.output, ContentTypeLabel::Txt);
        assert_eq!(d.reason, OverwriteReason::OverwriteMap);
    }

    #[test]
    fn overwrite_map_does_not_bypass_the_confidence_check() {
        // The threshold lookup uses the raw (pre-overwrite) label: Python
        // requires 0.9, and 0.2 does not clear it even though overwrite_map
        // would otherwise rewrite the label.
        let mut cfg = config();
        cfg.overwrite_map.insert(ContentTypeLabel::Python, ContentTypeLabel::Rust);
        let d = DecisionPolicy::decide(
            ContentTypeLabel::Python,
            0.2,
            PredictionMode::HighConfidence,
            &cfg,
            &catalog(),
        );
        // rust (the overwritten label) is not text, so the fallback is unknown.
        assert_eq!(d.output, ContentTypeLabel::Unknown);
        assert_eq!(d.reason, OverwriteReason::LowConfidence);
    }

    #[test]
    fn reason_is_none_iff_output_equals_raw_label() {
        let cfg = config();
        let cat = catalog();
        for (label, score, mode) in [
            (ContentTypeLabel::Python, 0.99, PredictionMode::HighConfidence),
            (ContentTypeLabel::Python, 0.1, PredictionMode::HighConfidence),
            (ContentTypeLabel::Rust, 0.99, PredictionMode::MediumConfidence),
        ] {
            let d = DecisionPolicy::decide(label, score, mode, &cfg, &cat);
            assert_eq!(d.reason == OverwriteReason::None, d.output == label);
        }
    }

    #[test]
    fn fallback_reason_is_none_when_it_happens_to_match_raw_label() {
        // The model predicted txt with low confidence; the fallback for a
        // text label is also txt, so nothing actually changed.
        let d = DecisionPolicy::decide(
            ContentTypeLabel::Txt,
            0.1,
            PredictionMode::MediumConfidence,
            &config(),
            &catalog(),
        );
        assert_eq!(d.output, ContentTypeLabel::Txt);
        assert_eq!(d.reason, OverwriteReason::None);
    }
}

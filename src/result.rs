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

use std::path::PathBuf;

use crate::catalog::{ContentTypeCatalog, ContentTypeInfo};
use crate::decision::OverwriteReason;
use crate::label::ContentTypeLabel;

/// Per-input status of a classification attempt.
///
/// `Status::Ok` is the only variant paired with a [`Prediction`]; every
/// other variant means the input could not be classified at all (it never
/// reached the model).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum Status {
    /// A prediction was produced.
    Ok,
    /// The path does not exist.
    FileNotFoundError,
    /// The path exists but could not be read due to filesystem permissions.
    PermissionError,
    /// A generic error-like status, reserved for callers that need to report
    /// a failure that isn't one of the above without raising.
    Unknown,
}

/// The model's raw output for a single input: a label and its confidence.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ModelOutput {
    /// The raw label the model assigned the highest score.
    pub label: ContentTypeLabel,
    /// The score assigned to `label`, in `0.0..=1.0`.
    pub score: f32,
}

/// The full outcome of classifying one input: the model's raw prediction
/// (or [`ContentTypeLabel::Undefined`] if the model never ran) alongside the
/// policy-adjusted label actually reported to the caller, both resolved to
/// their catalog descriptors.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    /// The model's raw prediction, resolved via the catalog.
    /// [`ContentTypeInfo::label`] is [`ContentTypeLabel::Undefined`] for
    /// inputs resolved without reaching the model (empty, `few_bytes`,
    /// directory, symlink).
    pub dl: ContentTypeInfo,
    /// The label ultimately reported, resolved via the catalog.
    pub output: ContentTypeInfo,
    /// The confidence associated with `output`. On the inference path this
    /// is always the model's raw score, unchanged by the decision policy's
    /// overwrite-map or low-confidence fallback; it is `1.0` only when the
    /// input bypassed the model entirely (see [`Prediction::without_inference`]).
    pub score: f32,
    /// Why `output` differs (or doesn't) from `dl`.
    pub overwrite_reason: OverwriteReason,
}

impl Prediction {
    /// Builds a prediction for an input that was resolved without any model
    /// inference (e.g. `empty`, `directory`, `symlink`, `few_bytes`).
    pub(crate) fn without_inference(catalog: &ContentTypeCatalog, output: ContentTypeLabel) -> Self {
        Prediction {
            dl: catalog.get_or_synthetic(ContentTypeLabel::Undefined),
            output: catalog.get_or_synthetic(output),
            score: 1.0,
            overwrite_reason: OverwriteReason::None,
        }
    }
}

/// The outcome of classifying a single path: either a successful
/// [`Prediction`] or a [`Status`] explaining why one could not be produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifyResult {
    /// The path this result is for. `Some("-")` for byte-buffer/stream
    /// inputs, matching the reference implementation's sentinel.
    pub path: Option<PathBuf>,
    /// `Status::Ok` iff `prediction` is `Some`.
    pub status: Status,
    /// The prediction, present iff `status == Status::Ok`.
    pub prediction: Option<Prediction>,
}

impl ClassifyResult {
    pub(crate) fn ok(path: Option<PathBuf>, prediction: Prediction) -> Self {
        ClassifyResult { path, status: Status::Ok, prediction: Some(prediction) }
    }

    pub(crate) fn err(path: Option<PathBuf>, status: Status) -> Self {
        debug_assert_ne!(status, Status::Ok, "Status::Ok results must carry a Prediction");
        ClassifyResult { path, status, prediction: None }
    }

    /// The output label, if this result is `Status::Ok`.
    pub fn output(&self) -> Option<ContentTypeLabel> {
        self.prediction.as_ref().map(|p| p.output.label)
    }

    /// The score of the output label, if this result is `Status::Ok`.
    pub fn score(&self) -> Option<f32> {
        self.prediction.as_ref().map(|p| p.score)
    }

    /// The output label's MIME type, if this result is `Status::Ok`.
    pub fn mime_type(&self) -> Option<&str> {
        self.prediction.as_ref().map(|p| p.output.mime_type.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn err_result_has_no_prediction() {
        let r = ClassifyResult::err(Some(PathBuf::from("/nope")), Status::FileNotFoundError);
        assert_eq!(r.status, Status::FileNotFoundError);
        assert!(r.prediction.is_none());
        assert!(r.output().is_none());
    }

    #[test]
    fn ok_result_exposes_output_and_score() {
        let catalog = ContentTypeCatalog::bundled().unwrap();
        let prediction = Prediction::without_inference(&catalog, ContentTypeLabel::Empty);
        let r = ClassifyResult::ok(None, prediction);
        assert_eq!(r.status, Status::Ok);
        assert_eq!(r.output(), Some(ContentTypeLabel::Empty));
        assert_eq!(r.score(), Some(1.0));
    }

    #[test]
    fn without_inference_sets_dl_to_undefined() {
        let catalog = ContentTypeCatalog::bundled().unwrap();
        let prediction = Prediction::without_inference(&catalog, ContentTypeLabel::Directory);
        assert_eq!(prediction.dl.label, ContentTypeLabel::Undefined);
        assert_eq!(prediction.output.label, ContentTypeLabel::Directory);
        assert_eq!(prediction.overwrite_reason, OverwriteReason::None);
    }
}

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

use ndarray::Array2;

use crate::features::ModelFeatures;
use crate::label::ContentTypeLabel;
use crate::result::ModelOutput;
use crate::Result;

/// Inputs beyond this count are split into multiple ONNX Runtime calls, to
/// keep a single run's memory and latency bounded regardless of how many
/// files the caller batched together.
const MAX_INTERNAL_BATCH: usize = 1000;

/// Owns the loaded ONNX Runtime session and the target label space needed to
/// turn its output tensor back into [`ContentTypeLabel`]s.
#[derive(Debug)]
pub(crate) struct Engine {
    session: ort::session::Session,
    target_labels_space: Vec<ContentTypeLabel>,
}

impl Engine {
    pub(crate) fn new(
        session: ort::session::Session,
        target_labels_space: Vec<ContentTypeLabel>,
    ) -> Self {
        Engine { session, target_labels_space }
    }

    /// Runs inference over `features`, in micro-batches of at most
    /// [`MAX_INTERNAL_BATCH`] rows, preserving input order.
    pub(crate) fn infer(&self, features: &[ModelFeatures]) -> Result<Vec<ModelOutput>> {
        let batches_num = (features.len() + MAX_INTERNAL_BATCH - 1) / MAX_INTERNAL_BATCH;
        let mut outputs = Vec::with_capacity(features.len());
        for (batch_idx, chunk) in features.chunks(MAX_INTERNAL_BATCH).enumerate() {
            tracing::debug!(
                batch = batch_idx + 1,
                of = batches_num,
                rows = chunk.len(),
                "running inference on internal batch",
            );
            outputs.extend(self.infer_one_batch(chunk)?);
        }
        Ok(outputs)
    }

    fn infer_one_batch(&self, features: &[ModelFeatures]) -> Result<Vec<ModelOutput>> {
        if features.is_empty() {
            return Ok(Vec::new());
        }
        let prep_start = std::time::Instant::now();
        let row_len = features[0].flatten().len();
        let flat: Vec<i32> = features.iter().flat_map(|f| f.flatten()).collect();
        let input = Array2::from_shape_vec([features.len(), row_len], flat)?;
        tracing::trace!(elapsed_ms = prep_start.elapsed().as_secs_f64() * 1000.0, "DL input prepared");

        let run_start = std::time::Instant::now();
        let mut run_outputs = self.session.run(ort::inputs!("bytes" => input)?)?;
        tracing::debug!(elapsed_ms = run_start.elapsed().as_secs_f64() * 1000.0, "DL raw prediction");
        let tensor = run_outputs.remove("target_label").ok_or(crate::Error::InvalidInput(
            "ONNX model did not produce a 'target_label' output",
        ))?;
        let tensor = tensor.try_extract_tensor::<f32>()?;

        let mut results = Vec::with_capacity(features.len());
        for row in tensor.view().axis_iter(ndarray::Axis(0)) {
            let scores = row.to_slice().ok_or(crate::Error::InvalidInput(
                "ONNX output tensor row was not contiguous",
            ))?;
            let mut best = 0usize;
            for (i, &x) in scores.iter().enumerate() {
                if x > scores[best] {
                    best = i;
                }
            }
            let label = *self.target_labels_space.get(best).ok_or(crate::Error::InvalidInput(
                "ONNX output column has no corresponding target label",
            ))?;
            results.push(ModelOutput { label, score: scores[best] });
        }
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    // `Engine` can only be constructed from a real ONNX Runtime session, so
    // its batching/argmax logic isn't exercised here directly; `Dispatcher`
    // and `DecisionPolicy` carry the model-free parts of the pipeline's unit
    // tests instead. Chunk-size arithmetic that doesn't need a session is
    // covered here.

    #[test]
    fn max_internal_batch_matches_reference_constant() {
        assert_eq!(super::MAX_INTERNAL_BATCH, 1000);
    }
}

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

//! Determines the content type of a file, a byte buffer, or a stream with
//! deep learning, falling back to simple heuristics for inputs too small or
//! too uniform for the model to usefully classify.
//!
//! # Examples
//!
//! ```rust,no_run
//! use byteprint::{Builder, ContentTypeLabel};
//!
//! # fn main() -> byteprint::Result<()> {
//! let classifier = Builder::default().with_model_dir("model").build()?;
//! let result = classifier.identify_bytes(b"#!/bin/sh\necho hello")?;
//! assert_eq!(result.output(), Some(ContentTypeLabel::Shell));
//! # Ok(())
//! # }
//! ```

#![cfg_attr(feature = "_doc", feature(doc_auto_cfg))]

pub use crate::builder::Builder;
pub use crate::catalog::{ContentTypeCatalog, ContentTypeInfo};
pub use crate::config::ModelConfig;
pub use crate::decision::{OverwriteReason, PredictionMode};
pub use crate::error::{Error, Result};
pub use crate::label::ContentTypeLabel;
pub use crate::result::{ClassifyResult, ModelOutput, Prediction, Status};
pub use crate::seekable::{BufferSeekable, FileSeekable, Seekable, StreamSeekable};

mod builder;
mod catalog;
mod config;
mod decision;
mod dispatch;
mod error;
mod features;
mod label;
mod result;
mod seekable;
mod session;

use std::io::{Read, Seek};
use std::path::{Path, PathBuf};

use crate::decision::DecisionPolicy;
use crate::dispatch::{Dispatcher, Resolution};
use crate::session::Engine;

/// Identifies content types from files, byte buffers, and streams.
///
/// Constructed with [`Builder`].
pub struct Classifier {
    pub(crate) engine: Engine,
    pub(crate) config: ModelConfig,
    pub(crate) catalog: ContentTypeCatalog,
    pub(crate) prediction_mode: PredictionMode,
    pub(crate) no_dereference: bool,
}

impl Classifier {
    /// Creates a new builder.
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// The content-type knowledge base loaded by this classifier.
    pub fn catalog(&self) -> &ContentTypeCatalog {
        &self.catalog
    }

    /// Every label this classifier can report as output, i.e. the
    /// deep-learning target labels (mapped through `overwrite_map`) plus the
    /// reserved dispatcher labels.
    pub fn get_output_content_types(&self) -> Vec<ContentTypeLabel> {
        self.config.output_content_types()
    }

    /// Every label the underlying model may produce as a raw prediction.
    pub fn get_model_content_types(&self) -> Vec<ContentTypeLabel> {
        self.config.model_content_types()
    }

    fn dispatcher(&self) -> Dispatcher<'_> {
        Dispatcher { config: &self.config, catalog: &self.catalog, no_dereference: self.no_dereference }
    }

    /// The `path` value reported for inputs with no filesystem path of their
    /// own (`identify_bytes`, `identify_stream`), matching the reference
    /// implementation's `"-"` sentinel.
    fn no_path() -> Option<PathBuf> {
        Some(PathBuf::from("-"))
    }

    fn finish(&self, resolution: Resolution) -> Result<ClassifyResult> {
        match resolution {
            Resolution::Done(result) => Ok(result),
            Resolution::NeedsInference { path, features } => {
                let outputs = self.engine.infer(std::slice::from_ref(&features))?;
                let output = outputs.into_iter().next().expect("single-row batch");
                Ok(ClassifyResult::ok(path, self.decide(output)))
            }
        }
    }

    fn decide(&self, output: crate::result::ModelOutput) -> Prediction {
        let decision = DecisionPolicy::decide(
            output.label,
            output.score,
            self.prediction_mode,
            &self.config,
            &self.catalog,
        );
        Prediction {
            dl: self.catalog.get_or_synthetic(output.label),
            output: self.catalog.get_or_synthetic(decision.output),
            score: output.score,
            overwrite_reason: decision.reason,
        }
    }

    /// Identifies a single path.
    pub fn identify_path(&self, path: impl AsRef<Path>) -> Result<ClassifyResult> {
        let resolution = self.dispatcher().dispatch_path(path.as_ref())?;
        self.finish(resolution)
    }

    /// Identifies multiple paths, batching the inputs that reach the model
    /// into as few inference calls as the underlying engine allows. Results
    /// are returned in the same order as `paths`.
    pub fn identify_paths(&self, paths: &[impl AsRef<Path>]) -> Result<Vec<ClassifyResult>> {
        tracing::debug!(samples = paths.len(), "dispatching input paths and extracting features");
        let dispatch_start = std::time::Instant::now();

        let dispatcher = self.dispatcher();
        let mut results: Vec<Option<ClassifyResult>> = Vec::with_capacity(paths.len());
        let mut pending_indices = Vec::new();
        let mut pending_features = Vec::new();
        let mut pending_paths = Vec::new();

        for path in paths {
            match dispatcher.dispatch_path(path.as_ref())? {
                Resolution::Done(result) => results.push(Some(result)),
                Resolution::NeedsInference { path, features } => {
                    pending_indices.push(results.len());
                    pending_paths.push(path);
                    pending_features.push(features);
                    results.push(None);
                }
            }
        }
        tracing::debug!(
            samples = paths.len(),
            needs_inference = pending_features.len(),
            elapsed_ms = dispatch_start.elapsed().as_secs_f64() * 1000.0,
            "first pass done and features extracted",
        );

        if !pending_features.is_empty() {
            let outputs = self.engine.infer(&pending_features)?;
            for ((index, path), output) in
                pending_indices.into_iter().zip(pending_paths).zip(outputs)
            {
                results[index] = Some(ClassifyResult::ok(path, self.decide(output)));
            }
        }

        Ok(results.into_iter().map(|r| r.expect("every index is filled exactly once")).collect())
    }

    /// Identifies an in-memory byte buffer. The result's `path` is the
    /// sentinel `"-"`, matching the reference implementation's convention for
    /// non-path inputs.
    pub fn identify_bytes(&self, bytes: &[u8]) -> Result<ClassifyResult> {
        let mut seekable = BufferSeekable::new(bytes);
        let resolution = self.dispatcher().dispatch_seekable(Self::no_path(), &mut seekable)?;
        self.finish(resolution)
    }

    /// Identifies a readable, seekable stream. The stream's position is
    /// restored to where it started, even if this call returns an error.
    /// The result's `path` is the sentinel `"-"`, matching the reference
    /// implementation's convention for non-path inputs.
    pub fn identify_stream<S: Read + Seek>(&self, mut stream: S) -> Result<ClassifyResult> {
        let start = stream.stream_position()?;
        let result = (|| {
            let mut seekable = StreamSeekable::new(&mut stream)?;
            let resolution = self.dispatcher().dispatch_seekable(Self::no_path(), &mut seekable)?;
            self.finish(resolution)
        })();
        stream.seek(std::io::SeekFrom::Start(start))?;
        result
    }
}

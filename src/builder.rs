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

use ort::session::builder::GraphOptimizationLevel;

use crate::catalog::ContentTypeCatalog;
use crate::config::ModelConfig;
use crate::decision::PredictionMode;
use crate::session::Engine;
use crate::{Classifier, Error, Result};

/// Configures and creates a [`Classifier`].
///
/// Unlike `config.min.json` and the content-type knowledge base, which ship
/// bundled with this crate and can be overridden, the trained model itself
/// (`model.onnx`) is never bundled: callers must point [`Builder::model_dir`]
/// at a directory containing one.
#[derive(Debug, Default)]
pub struct Builder {
    model_dir: Option<PathBuf>,
    config_path: Option<PathBuf>,
    content_types_path: Option<PathBuf>,
    prediction_mode: PredictionMode,
    no_dereference: bool,
    inter_threads: Option<usize>,
    intra_threads: Option<usize>,
    optimization_level: Option<GraphOptimizationLevel>,
    parallel_execution: Option<bool>,
}

impl Builder {
    /// Sets the directory `model.onnx` (and, unless overridden,
    /// `config.min.json`) are read from.
    pub fn with_model_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.model_dir = Some(dir.into());
        self
    }

    /// Overrides the model configuration, instead of the bundled default or
    /// `<model_dir>/config.min.json`.
    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    /// Overrides the content-type knowledge base, instead of the bundled
    /// default.
    pub fn with_content_types_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.content_types_path = Some(path.into());
        self
    }

    /// Sets the confidence policy used to accept or reject raw predictions.
    /// Defaults to [`PredictionMode::HighConfidence`].
    pub fn with_prediction_mode(mut self, mode: PredictionMode) -> Self {
        self.prediction_mode = mode;
        self
    }

    /// When set, symbolic links are reported as [`crate::label::ContentTypeLabel::Symlink`]
    /// instead of being followed.
    pub fn with_no_dereference(mut self, no_dereference: bool) -> Self {
        self.no_dereference = no_dereference;
        self
    }

    /// Configures the number of threads used to parallelize the execution of
    /// the graph.
    pub fn with_inter_threads(mut self, num_threads: usize) -> Self {
        self.inter_threads = Some(num_threads);
        self
    }

    /// Configures the number of threads used to parallelize execution within
    /// nodes.
    pub fn with_intra_threads(mut self, num_threads: usize) -> Self {
        self.intra_threads = Some(num_threads);
        self
    }

    /// Configures the session optimization level.
    pub fn with_optimization_level(mut self, opt_level: GraphOptimizationLevel) -> Self {
        self.optimization_level = Some(opt_level);
        self
    }

    /// Configures whether operators within a graph node may run in parallel.
    pub fn with_parallel_execution(mut self, parallel_execution: bool) -> Self {
        self.parallel_execution = Some(parallel_execution);
        self
    }

    /// Consumes the builder, loading the configuration, knowledge base, and
    /// ONNX model, and constructs a [`Classifier`].
    pub fn build(self) -> Result<Classifier> {
        let model_dir = self.model_dir.ok_or(Error::InvalidModelDir(PathBuf::new()))?;
        if !model_dir.is_dir() {
            return Err(Error::InvalidModelDir(model_dir));
        }

        let config = match self.config_path {
            Some(path) => ModelConfig::from_path(path)?,
            None => {
                let default_path = model_dir.join("config.min.json");
                if default_path.is_file() {
                    ModelConfig::from_path(default_path)?
                } else {
                    ModelConfig::from_json(include_str!("data/config.min.json"))?
                }
            }
        };

        let catalog = match self.content_types_path {
            Some(path) => ContentTypeCatalog::from_path(path)?,
            None => ContentTypeCatalog::bundled()?,
        };
        config.validate_against(&catalog)?;

        let model_path = model_dir.join("model.onnx");
        if !model_path.is_file() {
            return Err(Error::MissingModelFile(model_path));
        }

        let mut session_builder = ort::session::Session::builder()?;
        if let Some(num_threads) = self.inter_threads {
            session_builder = session_builder.with_inter_threads(num_threads)?;
        }
        if let Some(num_threads) = self.intra_threads {
            session_builder = session_builder.with_intra_threads(num_threads)?;
        }
        if let Some(opt_level) = self.optimization_level {
            session_builder = session_builder.with_optimization_level(opt_level)?;
        }
        if let Some(parallel_execution) = self.parallel_execution {
            session_builder = session_builder.with_parallel_execution(parallel_execution)?;
        }
        let load_start = std::time::Instant::now();
        let session = session_builder.commit_from_file(&model_path)?;
        tracing::debug!(
            model_path = %model_path.display(),
            elapsed_ms = load_start.elapsed().as_secs_f64() * 1000.0,
            "ONNX DL model loaded",
        );
        let engine = Engine::new(session, config.target_labels_space.clone());

        Ok(Classifier {
            engine,
            config,
            catalog,
            prediction_mode: self.prediction_mode,
            no_dereference: self.no_dereference,
        })
    }
}

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

/// Result type of crate functions.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors returned by crate functions.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Input/output errors reported by the standard library.
    #[error("I/O error")]
    Io(#[from] std::io::Error),

    /// Errors reported by the ONNX Runtime.
    #[error("ONNX Runtime error")]
    Ort(#[from] ort::Error),

    /// Errors reported by the JSON parser while loading the model config or
    /// the content-type knowledge base.
    #[error("JSON error")]
    Json(#[from] serde_json::Error),

    /// Shape errors reported by the ndarray library.
    #[error("ndarray shape error")]
    Shape(#[from] ndarray::ShapeError),

    /// The model directory does not exist or is not a directory.
    #[error("model directory not found at {0}")]
    InvalidModelDir(PathBuf),

    /// `model.onnx` is missing from the model directory.
    #[error("model.onnx not found at {0}")]
    MissingModelFile(PathBuf),

    /// `config.min.json` is missing from the model directory.
    #[error("config.min.json not found at {0}")]
    MissingConfigFile(PathBuf),

    /// A label string does not match any known [`crate::label::ContentTypeLabel`].
    #[error("unknown content type label {0:?}")]
    UnknownLabel(String),

    /// A label referenced by `config.min.json` (in `target_labels_space`,
    /// `thresholds`, or `overwrite_map`) has no entry in the content-type
    /// knowledge base.
    #[error("content type {0:?} has no catalog entry")]
    MissingCatalogEntry(String),

    /// `identify_bytes`/`identify_stream` received an input that does not
    /// satisfy the stream contract (not binary, not seekable, not readable).
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
}

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

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::catalog::ContentTypeCatalog;
use crate::config::ModelConfig;
use crate::features::FeatureExtractor;
use crate::label::ContentTypeLabel;
use crate::result::{ClassifyResult, Prediction, Status};
use crate::seekable::{FileSeekable, Seekable};
use crate::Result;

/// What a single input resolves to before (or instead of) model inference.
pub(crate) enum Resolution {
    /// A final result, reached without running the model.
    Done(ClassifyResult),
    /// The input needs to go through the model; carries the extracted
    /// features and the path they came from (for result assembly).
    NeedsInference { path: Option<PathBuf>, features: crate::features::ModelFeatures },
}

/// Implements the short-circuit decision tree that resolves a single path or
/// in-memory input to either a final result or a feature vector awaiting
/// inference.
pub(crate) struct Dispatcher<'a> {
    pub(crate) config: &'a ModelConfig,
    pub(crate) catalog: &'a ContentTypeCatalog,
    pub(crate) no_dereference: bool,
}

impl<'a> Dispatcher<'a> {
    /// Resolves a filesystem path.
    pub(crate) fn dispatch_path(&self, path: &Path) -> Result<Resolution> {
        let path_buf = path.to_path_buf();

        let symlink_metadata = match fs::symlink_metadata(path) {
            Ok(m) => m,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Ok(Resolution::Done(ClassifyResult::err(
                    Some(path_buf),
                    Status::FileNotFoundError,
                )));
            }
            Err(e) => return Err(e.into()),
        };

        if self.no_dereference && symlink_metadata.file_type().is_symlink() {
            return Ok(Resolution::Done(ClassifyResult::ok(
                Some(path_buf),
                Prediction::without_inference(self.catalog, ContentTypeLabel::Symlink),
            )));
        }

        let metadata = match fs::metadata(path) {
            Ok(m) => m,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Ok(Resolution::Done(ClassifyResult::err(
                    Some(path_buf),
                    Status::FileNotFoundError,
                )));
            }
            Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
                return Ok(Resolution::Done(ClassifyResult::err(
                    Some(path_buf),
                    Status::PermissionError,
                )));
            }
            Err(e) => return Err(e.into()),
        };

        if metadata.is_dir() {
            return Ok(Resolution::Done(ClassifyResult::ok(
                Some(path_buf),
                Prediction::without_inference(self.catalog, ContentTypeLabel::Directory),
            )));
        }

        if !metadata.is_file() {
            return Ok(Resolution::Done(ClassifyResult::ok(
                Some(path_buf),
                Prediction::without_inference(self.catalog, ContentTypeLabel::Unknown),
            )));
        }

        let file = match fs::File::open(path) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
                return Ok(Resolution::Done(ClassifyResult::err(
                    Some(path_buf),
                    Status::PermissionError,
                )));
            }
            Err(e) => return Err(e.into()),
        };
        let mut seekable = FileSeekable::new(file)?;
        self.dispatch_seekable(Some(path_buf), &mut seekable)
    }

    /// Resolves an already-open [`Seekable`] (buffer or stream), with no
    /// filesystem metadata checks (those only apply to paths).
    pub(crate) fn dispatch_seekable(
        &self,
        path: Option<PathBuf>,
        seekable: &mut dyn Seekable,
    ) -> Result<Resolution> {
        let size = seekable.size();

        if size == 0 {
            return Ok(Resolution::Done(ClassifyResult::ok(
                path,
                Prediction::without_inference(self.catalog, ContentTypeLabel::Empty),
            )));
        }

        if size < self.config.min_file_size_for_dl as u64 {
            let content = seekable.read_at(0, size as usize)?;
            return Ok(Resolution::Done(ClassifyResult::ok(
                path,
                Prediction::without_inference(self.catalog, label_from_few_bytes(&content)),
            )));
        }

        let features = FeatureExtractor::extract(seekable, self.config)?;

        // If the input has so little non-whitespace content that even the
        // beg window is mostly padding up to min_file_size_for_dl, treat it
        // the same as a `few_bytes` input.
        let threshold_index = self.config.min_file_size_for_dl.saturating_sub(1);
        let falls_back = features
            .beg
            .get(threshold_index)
            .map(|&v| v == self.config.padding_token)
            .unwrap_or(true);
        if falls_back {
            let read_len = std::cmp::min(self.config.block_size as u64, size) as usize;
            let content = seekable.read_at(0, read_len)?;
            return Ok(Resolution::Done(ClassifyResult::ok(
                path,
                Prediction::without_inference(self.catalog, label_from_few_bytes(&content)),
            )));
        }

        Ok(Resolution::NeedsInference { path, features })
    }
}

/// Decides between `txt` and `unknown` for inputs too small to run through
/// the model, based on whether the content decodes as UTF-8.
fn label_from_few_bytes(content: &[u8]) -> ContentTypeLabel {
    if std::str::from_utf8(content).is_ok() {
        ContentTypeLabel::Txt
    } else {
        ContentTypeLabel::Unknown
    }
}

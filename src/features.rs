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

use crate::config::ModelConfig;
use crate::seekable::Seekable;
use crate::Result;

/// ASCII whitespace bytes that are stripped from the ends of the beg/end
/// feature windows. Note that `0x00` is *not* in this set and is never
/// stripped.
const WHITESPACE: [u8; 6] = [0x09, 0x0A, 0x0B, 0x0C, 0x0D, 0x20];

fn is_whitespace(b: u8) -> bool {
    WHITESPACE.contains(&b)
}

fn lstrip(bytes: &[u8]) -> &[u8] {
    let first_non_ws = bytes.iter().position(|&b| !is_whitespace(b)).unwrap_or(bytes.len());
    &bytes[first_non_ws..]
}

fn rstrip(bytes: &[u8]) -> &[u8] {
    let last_non_ws =
        bytes.iter().rposition(|&b| !is_whitespace(b)).map(|i| i + 1).unwrap_or(0);
    &bytes[..last_non_ws]
}

fn strip(bytes: &[u8]) -> &[u8] {
    rstrip(lstrip(bytes))
}

/// The fixed-length integer feature vector consumed by the model.
///
/// Each entry is either a byte value (`0..=255`) or
/// [`ModelConfig::padding_token`]. `beg`/`end` always have exactly
/// `beg_size`/`end_size` entries; `mid` is always empty for the core
/// extractor (`spec.md` requires `mid_size == 0`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelFeatures {
    /// Feature slice drawn from the (whitespace-stripped) beginning of the input.
    pub beg: Vec<i32>,
    /// Feature slice drawn from the middle of the input. Always empty in the
    /// core extractor.
    pub mid: Vec<i32>,
    /// Feature slice drawn from the (whitespace-stripped) end of the input.
    pub end: Vec<i32>,
}

impl ModelFeatures {
    /// Flattens `beg || mid || end` into the row layout the model expects.
    pub(crate) fn flatten(&self) -> Vec<i32> {
        let mut out = Vec::with_capacity(self.beg.len() + self.mid.len() + self.end.len());
        out.extend_from_slice(&self.beg);
        out.extend_from_slice(&self.mid);
        out.extend_from_slice(&self.end);
        out
    }
}

/// Implements the v2 byte-feature extraction algorithm (`spec.md` §4.1)
/// against any [`Seekable`], in bounded memory.
pub struct FeatureExtractor;

impl FeatureExtractor {
    /// Extracts features using the sizes and thresholds from `config`.
    pub fn extract(seekable: &mut dyn Seekable, config: &ModelConfig) -> Result<ModelFeatures> {
        debug_assert_eq!(config.mid_size, 0, "mid_size extension is not implemented");
        debug_assert!(!config.use_inputs_at_offsets, "offset features are not implemented");
        Self::extract_raw(
            seekable,
            config.beg_size,
            config.end_size,
            config.padding_token,
            config.block_size,
        )
    }

    /// Extracts features with explicit sizes, independent of a
    /// [`ModelConfig`]. Exposed for testing the extractor against the
    /// reference implementation's boundary cases directly.
    pub fn extract_raw(
        seekable: &mut dyn Seekable,
        beg_size: usize,
        end_size: usize,
        padding_token: i32,
        block_size: usize,
    ) -> Result<ModelFeatures> {
        debug_assert!(beg_size < block_size);
        debug_assert!(end_size < block_size);

        let n = seekable.size();
        let read_len = std::cmp::min(block_size as u64, n) as usize;
        let strip_both = n <= block_size as u64;

        let beg = if beg_size > 0 {
            let beg_content = seekable.read_at(0, read_len)?;
            if beg_content.len() != read_len {
                return Err(crate::Error::InvalidInput(
                    "seekable returned fewer bytes than its reported size",
                ));
            }
            let stripped = if strip_both { strip(&beg_content) } else { lstrip(&beg_content) };
            beg_ints_with_padding(stripped, beg_size, padding_token)
        } else {
            Vec::new()
        };

        let end = if end_size > 0 {
            let end_content = seekable.read_at(n - read_len as u64, read_len)?;
            if end_content.len() != read_len {
                return Err(crate::Error::InvalidInput(
                    "seekable returned fewer bytes than its reported size",
                ));
            }
            let stripped = if strip_both { strip(&end_content) } else { rstrip(&end_content) };
            end_ints_with_padding(stripped, end_size, padding_token)
        } else {
            Vec::new()
        };

        Ok(ModelFeatures { beg, mid: Vec::new(), end })
    }
}

/// Takes an already-stripped buffer and returns exactly `beg_size` integers:
/// the first `beg_size` bytes of `content`, right-padded with
/// `padding_token` if `content` is shorter.
fn beg_ints_with_padding(content: &[u8], beg_size: usize, padding_token: i32) -> Vec<i32> {
    let take = std::cmp::min(beg_size, content.len());
    let mut ints: Vec<i32> = content[..take].iter().map(|&b| b as i32).collect();
    ints.resize(beg_size, padding_token);
    ints
}

/// Takes an already-stripped buffer and returns exactly `end_size` integers:
/// the last `end_size` bytes of `content`, left-padded with `padding_token`
/// if `content` is shorter.
fn end_ints_with_padding(content: &[u8], end_size: usize, padding_token: i32) -> Vec<i32> {
    let take = std::cmp::min(end_size, content.len());
    let start = content.len() - take;
    let mut ints = vec![padding_token; end_size - take];
    ints.extend(content[start..].iter().map(|&b| b as i32));
    ints
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seekable::BufferSeekable;

    const PAD: i32 = 256;

    fn extract(content: &[u8], beg_size: usize, end_size: usize, block_size: usize) -> ModelFeatures {
        let mut s = BufferSeekable::new(content);
        FeatureExtractor::extract_raw(&mut s, beg_size, end_size, PAD, block_size).unwrap()
    }

    #[test]
    fn exact_lengths_are_always_produced() {
        for n in [0usize, 1, 5, 16, 4095, 4096, 4097, 8192, 8193] {
            let content = vec![b'a'; n];
            let f = extract(&content, 8, 8, 4096);
            assert_eq!(f.beg.len(), 8);
            assert_eq!(f.end.len(), 8);
            assert!(f.mid.is_empty());
        }
    }

    #[test]
    fn whitespace_only_content_is_all_padding() {
        let content = vec![b' '; 20];
        let f = extract(&content, 8, 8, 4096);
        assert_eq!(f.beg, vec![PAD; 8]);
        assert_eq!(f.end, vec![PAD; 8]);
    }

    #[test]
    fn whitespace_only_content_larger_than_block_is_all_padding() {
        let content = vec![b'\t'; 10_000];
        let f = extract(&content, 8, 8, 4096);
        assert_eq!(f.beg, vec![PAD; 8]);
        assert_eq!(f.end, vec![PAD; 8]);
    }

    #[test]
    fn short_non_whitespace_pads_beg_right_and_end_left() {
        let f = extract(b"AB", 5, 5, 4096);
        assert_eq!(f.beg, vec![b'A' as i32, b'B' as i32, PAD, PAD, PAD]);
        assert_eq!(f.end, vec![PAD, PAD, PAD, b'A' as i32, b'B' as i32]);
    }

    #[test]
    fn interior_whitespace_is_preserved() {
        let f = extract(b"A AAA", 5, 5, 4096);
        assert_eq!(f.beg, vec![b'A' as i32, b' ' as i32, b'A' as i32, b'A' as i32, b'A' as i32]);
    }

    #[test]
    fn null_byte_surrounded_by_whitespace_is_preserved() {
        let f = extract(b"  \x00  ", 1, 1, 4096);
        assert_eq!(f.beg, vec![0]);
        assert_eq!(f.end, vec![0]);
    }

    #[test]
    fn small_file_strips_both_sides() {
        // N <= block_size: both beg and end reads cover the whole content and
        // are fully stripped (both leading and trailing whitespace removed).
        let f = extract(b"  hello  ", 5, 5, 4096);
        assert_eq!(f.beg, vec![b'h' as i32, b'e' as i32, b'l' as i32, b'l' as i32, b'o' as i32]);
        assert_eq!(f.end, vec![b'h' as i32, b'e' as i32, b'l' as i32, b'l' as i32, b'o' as i32]);
    }

    #[test]
    fn large_file_only_strips_the_adjacent_side() {
        // N > block_size: beg read is left-stripped only, end read is
        // right-stripped only.
        let block_size = 16;
        let mut content = vec![b' '; 4];
        content.extend_from_slice(b"0123456789ABCDEF0123456789ABCDEF");
        content.extend(vec![b' '; 4]);
        let f = extract(&content, 4, 4, block_size);
        // beg: first block_size bytes, left-stripped -> starts with "0123"
        assert_eq!(f.beg, vec![b'0' as i32, b'1' as i32, b'2' as i32, b'3' as i32]);
        // end: last block_size bytes, right-stripped -> ends with "DEF "? no,
        // right-stripped means trailing spaces removed, so ends with "...EF".
        assert_eq!(f.end, vec![b'C' as i32, b'D' as i32, b'E' as i32, b'F' as i32]);
    }

    #[test]
    fn padding_prepend_append_of_whitespace_is_invariant() {
        let base = b"def print_primes(n):\n    pass\n".to_vec();
        let f0 = extract(&base, 16, 16, 4096);
        for k in [1usize, 3, 10] {
            let mut padded = vec![b' '; k];
            padded.extend_from_slice(&base);
            padded.extend(vec![b'\t'; k]);
            let fk = extract(&padded, 16, 16, 4096);
            assert_eq!(fk, f0, "padding with {k} whitespace bytes changed features");
        }
    }

    #[test]
    fn path_and_buffer_backed_extraction_agree() {
        use std::io::{Seek, SeekFrom, Write};

        let sizes = [0usize, 1, 10, 15, 16, 17, 31, 32, 33, 4095, 4096, 4097, 8191, 8192, 8193];
        for &n in &sizes {
            let mut content = vec![b'x'; n];
            if n > 2 {
                content[0] = b' ';
                content[n - 1] = b' ';
            }
            let mut tmp = tempfile::tempfile().unwrap();
            tmp.write_all(&content).unwrap();
            tmp.seek(SeekFrom::Start(0)).unwrap();
            let mut file_seekable = crate::seekable::FileSeekable::new(tmp).unwrap();
            let mut buf_seekable = BufferSeekable::new(&content);
            let from_file =
                FeatureExtractor::extract_raw(&mut file_seekable, 8, 8, PAD, 4096).unwrap();
            let from_buf =
                FeatureExtractor::extract_raw(&mut buf_seekable, 8, 8, PAD, 4096).unwrap();
            assert_eq!(from_file, from_buf, "mismatch at size {n}");
        }
    }
}

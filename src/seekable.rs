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

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::os::unix::fs::FileExt;

use crate::Result;

/// Abstraction over a bounded, randomly-readable byte source of known size.
///
/// Implemented for files, in-memory buffers, and generic readable+seekable
/// streams, so [`crate::features::FeatureExtractor`] can extract features
/// without ever holding more than `block_size` bytes in memory at once.
pub trait Seekable {
    /// Total size of the input, in bytes.
    fn size(&self) -> u64;

    /// Reads exactly `len` bytes starting at `offset`. `read_at(offset, 0)`
    /// always returns an empty vector without side effects.
    fn read_at(&mut self, offset: u64, len: usize) -> Result<Vec<u8>>;
}

/// A file-backed [`Seekable`].
pub struct FileSeekable {
    file: File,
    size: u64,
}

impl FileSeekable {
    /// Wraps an already-open file. The file's current size is captured
    /// immediately via `fstat`.
    pub fn new(file: File) -> Result<Self> {
        let size = file.metadata()?.len();
        Ok(FileSeekable { file, size })
    }
}

impl Seekable for FileSeekable {
    fn size(&self) -> u64 {
        self.size
    }

    fn read_at(&mut self, offset: u64, len: usize) -> Result<Vec<u8>> {
        if len == 0 {
            return Ok(Vec::new());
        }
        let mut buffer = vec![0u8; len];
        self.file.read_exact_at(&mut buffer, offset)?;
        Ok(buffer)
    }
}

/// A [`Seekable`] backed by an in-memory buffer.
pub struct BufferSeekable<'a> {
    buffer: &'a [u8],
}

impl<'a> BufferSeekable<'a> {
    /// Wraps a byte slice.
    pub fn new(buffer: &'a [u8]) -> Self {
        BufferSeekable { buffer }
    }
}

impl Seekable for BufferSeekable<'_> {
    fn size(&self) -> u64 {
        self.buffer.len() as u64
    }

    fn read_at(&mut self, offset: u64, len: usize) -> Result<Vec<u8>> {
        if len == 0 {
            return Ok(Vec::new());
        }
        let offset = offset as usize;
        Ok(self.buffer[offset..offset + len].to_vec())
    }
}

/// A [`Seekable`] backed by any readable, seekable stream.
///
/// The size is determined once, at construction, by seeking to the end; the
/// stream's original position is not restored by this type itself — callers
/// that need that (e.g. `identify_stream`) must save and restore it
/// themselves, since [`Seekable::read_at`] is free to move the position
/// between calls.
pub struct StreamSeekable<S> {
    stream: S,
    size: u64,
}

impl<S: Read + Seek> StreamSeekable<S> {
    /// Wraps a stream, seeking to its end to determine its size.
    pub fn new(mut stream: S) -> Result<Self> {
        let size = stream.seek(SeekFrom::End(0))?;
        Ok(StreamSeekable { stream, size })
    }
}

impl<S: Read + Seek> Seekable for StreamSeekable<S> {
    fn size(&self) -> u64 {
        self.size
    }

    fn read_at(&mut self, offset: u64, len: usize) -> Result<Vec<u8>> {
        if len == 0 {
            return Ok(Vec::new());
        }
        self.stream.seek(SeekFrom::Start(offset))?;
        let mut buffer = vec![0u8; len];
        self.stream.read_exact(&mut buffer)?;
        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn buffer_read_at_zero_len_is_empty() {
        let mut s = BufferSeekable::new(b"hello");
        assert_eq!(s.read_at(2, 0).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn buffer_read_at_reads_subrange() {
        let mut s = BufferSeekable::new(b"hello world");
        assert_eq!(s.read_at(6, 5).unwrap(), b"world");
    }

    #[test]
    fn stream_size_is_full_length() {
        let mut s = StreamSeekable::new(Cursor::new(b"0123456789".to_vec())).unwrap();
        assert_eq!(s.size(), 10);
        assert_eq!(s.read_at(0, 0).unwrap(), Vec::<u8>::new());
        assert_eq!(s.read_at(3, 4).unwrap(), b"3456");
    }
}

// SPDX-License-Identifier: LGPL-2.1
// Copyright 2021 Daniel Vogelbacher <daniel@chaospixel.com>

use std::io::Read;

/// Bounds-checked reader over a borrowed byte buffer.
///
/// Reads past the end never fail, they are clamped to the bytes
/// that are still available. The position always stays in `0..=len`.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
  buf: &'a [u8],
  pos: usize,
}

impl<'a> ByteCursor<'a> {
  pub fn new(buf: &'a [u8]) -> Self {
    Self { buf, pos: 0 }
  }

  #[inline]
  pub fn position(&self) -> u64 {
    self.pos as u64
  }

  #[inline]
  pub fn len(&self) -> usize {
    self.buf.len()
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.buf.is_empty()
  }

  #[inline]
  pub fn remaining(&self) -> usize {
    self.buf.len() - self.pos
  }

  #[inline]
  pub fn is_eof(&self) -> bool {
    self.pos >= self.buf.len()
  }

  /// Move to absolute position, clamped to the buffer length.
  /// Returns the new position.
  pub fn seek(&mut self, pos: u64) -> u64 {
    self.pos = usize::try_from(pos).map_or(self.buf.len(), |pos| pos.min(self.buf.len()));
    self.pos as u64
  }

  /// Consume up to `count` bytes and return them as a view into the buffer.
  /// The returned slice is shorter than `count` if the end is reached.
  pub fn read_bytes(&mut self, count: usize) -> &'a [u8] {
    let end = self.pos + count.min(self.remaining());
    let bytes = &self.buf[self.pos..end];
    self.pos = end;
    bytes
  }

  /// Copy up to `dst.len()` bytes into `dst`, returns the number of bytes copied.
  pub fn read_into(&mut self, dst: &mut [u8]) -> usize {
    let src = self.read_bytes(dst.len());
    dst[..src.len()].copy_from_slice(src);
    src.len()
  }

  /// Fill a fixed size record. Bytes behind the end of the buffer stay zero.
  pub fn read_record<const N: usize>(&mut self) -> ([u8; N], usize) {
    let mut record = [0; N];
    let n = self.read_into(&mut record);
    (record, n)
  }
}

impl Read for ByteCursor<'_> {
  fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
    Ok(self.read_into(buf))
  }
}

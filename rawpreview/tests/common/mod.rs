// SPDX-License-Identifier: LGPL-2.1
// Copyright 2021 Daniel Vogelbacher <daniel@chaospixel.com>

#![allow(dead_code)]

use rawpreview::Endian;

pub(crate) const TAG_STRIP_OFFSETS: u16 = 273;
pub(crate) const TAG_STRIP_BYTE_COUNTS: u16 = 279;
pub(crate) const TYPE_BYTE: u16 = 2;
pub(crate) const TYPE_SHORT: u16 = 3;
pub(crate) const TYPE_LONG: u16 = 4;

pub(crate) fn init_test_logger() {
  let _ = env_logger::builder().is_test(true).try_init();
}

/// Builder for minimal DNG buffers with a single IFD
pub(crate) struct DngBuilder {
  endian: Endian,
  marker: [u8; 2],
  ifd_offset: u32,
  entries: Vec<[u8; 12]>,
  entry_count: Option<u16>,
  payload: Vec<u8>,
}

impl DngBuilder {
  pub(crate) fn new(endian: Endian) -> Self {
    Self {
      endian,
      marker: if endian.big() { *b"MM" } else { *b"II" },
      ifd_offset: 8,
      entries: Vec::new(),
      entry_count: None,
      payload: Vec::new(),
    }
  }

  pub(crate) fn marker(mut self, marker: [u8; 2]) -> Self {
    self.marker = marker;
    self
  }

  pub(crate) fn ifd_offset(mut self, offset: u32) -> Self {
    self.ifd_offset = offset;
    self
  }

  /// Override the entry count written to the IFD
  pub(crate) fn entry_count(mut self, count: u16) -> Self {
    self.entry_count = Some(count);
    self
  }

  /// Add an entry with a raw value slot
  pub(crate) fn raw_entry(mut self, tag: u16, typ: u16, count: u32, slot: [u8; 4]) -> Self {
    let mut rec = [0; 12];
    rec[0..2].copy_from_slice(&self.u16_bytes(tag));
    rec[2..4].copy_from_slice(&self.u16_bytes(typ));
    rec[4..8].copy_from_slice(&self.u32_bytes(count));
    rec[8..12].copy_from_slice(&slot);
    self.entries.push(rec);
    self
  }

  pub(crate) fn long_entry(self, tag: u16, value: u32) -> Self {
    let slot = self.u32_bytes(value);
    self.raw_entry(tag, TYPE_LONG, 1, slot)
  }

  pub(crate) fn short_entry(self, tag: u16, value: u16) -> Self {
    let v = self.u16_bytes(value);
    self.raw_entry(tag, TYPE_SHORT, 1, [v[0], v[1], 0, 0])
  }

  /// Bytes appended directly after the IFD
  pub(crate) fn payload(mut self, data: &[u8]) -> Self {
    self.payload.extend_from_slice(data);
    self
  }

  /// Offset of the payload in the final buffer, valid for the default IFD offset
  pub(crate) fn payload_offset(&self) -> u32 {
    self.ifd_offset + 2 + 12 * self.entries.len() as u32
  }

  pub(crate) fn build(self) -> Vec<u8> {
    let mut buf = self.marker.to_vec();
    buf.extend_from_slice(&self.u16_bytes(42));
    buf.extend_from_slice(&self.u32_bytes(self.ifd_offset));
    buf.resize(self.ifd_offset as usize, 0);
    let count = self.entry_count.unwrap_or(self.entries.len() as u16);
    buf.extend_from_slice(&self.u16_bytes(count));
    for rec in &self.entries {
      buf.extend_from_slice(rec);
    }
    buf.extend_from_slice(&self.payload);
    buf
  }

  fn u16_bytes(&self, v: u16) -> [u8; 2] {
    if self.endian.big() { v.to_be_bytes() } else { v.to_le_bytes() }
  }

  fn u32_bytes(&self, v: u32) -> [u8; 4] {
    if self.endian.big() { v.to_be_bytes() } else { v.to_le_bytes() }
  }
}

// SPDX-License-Identifier: MIT
// Copyright 2021 Daniel Vogelbacher <daniel@chaospixel.com>

use byteorder::{ByteOrder, LittleEndian};
use serde::{Deserialize, Serialize};

use crate::bits::{Endian, Endianness, detect_endianness};

pub mod entry;
pub mod ifd;

pub use entry::DirEntry;
pub use ifd::{StripLocation, scan_ifd};

pub const TIFF_MAGIC: u16 = 42;

/// Size of the TIFF file header in bytes
pub const HEADER_SIZE: usize = 8;
/// Size of one IFD entry in bytes
pub const ENTRY_SIZE: usize = 12;

pub const TAG_STRIP_OFFSETS: u16 = 273;
pub const TAG_STRIP_BYTE_COUNTS: u16 = 279;

pub const TYPE_BYTE: u16 = 2;
pub const TYPE_SHORT: u16 = 3;
pub const TYPE_LONG: u16 = 4;

/// TIFF file header as found at offset 0
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TiffHeader {
  pub marker: [u8; 2],
  pub version: u16,
  pub ifd_offset: u32,
}

impl TiffHeader {
  /// Byte order declared by the marker
  pub fn endianness(&self) -> Endianness {
    detect_endianness(&self.marker)
  }

  /// Decode a raw header record with the given byte order.
  pub fn decode(raw: &[u8; HEADER_SIZE], endian: Endian) -> Self {
    Self {
      marker: [raw[0], raw[1]],
      version: endian.fix16(LittleEndian::read_u16(&raw[2..4])),
      ifd_offset: endian.fix32(LittleEndian::read_u32(&raw[4..8])),
    }
  }
}

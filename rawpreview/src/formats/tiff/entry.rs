// SPDX-License-Identifier: MIT
// Copyright 2021 Daniel Vogelbacher <daniel@chaospixel.com>

use byteorder::{ByteOrder, LittleEndian};
use log::debug;
use serde::{Deserialize, Serialize};

use super::{ENTRY_SIZE, TYPE_BYTE, TYPE_LONG, TYPE_SHORT};
use crate::bits::{Endian, swap16};

/// Single IFD entry, decoded from its fixed 12 byte record
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirEntry {
  pub tag: u16,
  pub typ: u16,
  pub count: u32,
  /// Embedded value, interpreted by `typ`
  pub value: u32,
}

impl DirEntry {
  /// Decode an entry record.
  ///
  /// The value slot is always 32 bits wide on disk. For SHORT and BYTE
  /// types only the leading bytes carry the value, so the little-endian
  /// wire word is masked before the byte order is fixed up.
  pub fn decode(raw: &[u8; ENTRY_SIZE], endian: Endian) -> Self {
    let tag = endian.fix16(LittleEndian::read_u16(&raw[0..2]));
    let typ = endian.fix16(LittleEndian::read_u16(&raw[2..4]));
    let count = endian.fix32(LittleEndian::read_u32(&raw[4..8]));
    let wire = LittleEndian::read_u32(&raw[8..12]);

    let value = match typ {
      TYPE_LONG => endian.fix32(wire),
      TYPE_SHORT => {
        let short = (wire & 0xFFFF) as u16;
        (if endian.big() { swap16(short) } else { short }) as u32
      }
      TYPE_BYTE => wire & 0xFF,
      // Not needed for preview extraction, keep as is
      _ => wire,
    };

    debug!("Tag: {:#x}, Typ: {:#x}, count: {}, value: {}", tag, typ, count, value);
    Self { tag, typ, count, value }
  }
}

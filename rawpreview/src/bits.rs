// SPDX-License-Identifier: LGPL-2.1
// Copyright 2021 Daniel Vogelbacher <daniel@chaospixel.com>

use serde::{Deserialize, Serialize};

/// Byte order marker for little-endian files (`II`)
pub const MARKER_LITTLE: u8 = b'I';
/// Byte order marker for big-endian files (`MM`)
pub const MARKER_BIG: u8 = b'M';

#[inline(always)]
pub fn swap16(value: u16) -> u16 {
  value.rotate_left(8)
}

#[inline(always)]
pub fn swap32(value: u32) -> u32 {
  ((value >> 24) & 0xFF) | ((value >> 8) & 0xFF00) | ((value << 8) & 0xFF_0000) | ((value << 24) & 0xFF00_0000)
}

#[inline(always)]
pub fn swap64(value: u64) -> u64 {
  ((swap32(value as u32) as u64) << 32) | swap32((value >> 32) as u32) as u64
}

/// Result of the byte order marker detection
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Endianness {
  LittleEndian,
  BigEndian,
  Invalid,
}

impl Endianness {
  /// Convert into a usable byte order, `None` for an invalid marker
  pub fn endian(self) -> Option<Endian> {
    match self {
      Self::LittleEndian => Some(Endian::Little),
      Self::BigEndian => Some(Endian::Big),
      Self::Invalid => None,
    }
  }
}

/// Detect the byte order from the first two bytes of a TIFF structure.
///
/// Both bytes must be identical: `II` is little-endian, `MM` is big-endian.
/// Everything else, including buffers shorter than two bytes, is reported
/// as [`Endianness::Invalid`].
pub fn detect_endianness(marker: &[u8]) -> Endianness {
  match marker {
    [a, b, ..] if a != b => Endianness::Invalid,
    [MARKER_LITTLE, _, ..] => Endianness::LittleEndian,
    [MARKER_BIG, _, ..] => Endianness::BigEndian,
    _ => Endianness::Invalid,
  }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Endian {
  Big,
  Little,
}

impl Default for Endian {
  fn default() -> Self {
    Self::Little
  }
}

impl Endian {
  #[inline]
  pub fn big(&self) -> bool {
    matches!(*self, Self::Big)
  }
  #[inline]
  pub fn little(&self) -> bool {
    matches!(*self, Self::Little)
  }

  /// Fix up a 16 bit wire word (read as little-endian) to this byte order
  #[inline]
  pub fn fix16(&self, wire: u16) -> u16 {
    match *self {
      Self::Big => swap16(wire),
      Self::Little => wire,
    }
  }

  /// Fix up a 32 bit wire word (read as little-endian) to this byte order
  #[inline]
  pub fn fix32(&self, wire: u32) -> u32 {
    match *self {
      Self::Big => swap32(wire),
      Self::Little => wire,
    }
  }

  /// Fix up a 64 bit wire word (read as little-endian) to this byte order
  #[inline]
  pub fn fix64(&self, wire: u64) -> u64 {
    match *self {
      Self::Big => swap64(wire),
      Self::Little => wire,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use byteorder::{ByteOrder, LittleEndian};

  #[test]
  fn swap_values() {
    assert_eq!(swap16(0x1234), 0x3412);
    assert_eq!(swap32(0x1234_5678), 0x7856_3412);
    assert_eq!(swap64(0x0102_0304_0506_0708), 0x0807_0605_0403_0201);
  }

  #[test]
  fn swap_is_involution() {
    for v in [0_u16, 1, 0x00FF, 0xFF00, 0xBEEF, u16::MAX] {
      assert_eq!(swap16(swap16(v)), v);
      assert_eq!(swap16(v), v.swap_bytes());
    }
    for v in [0_u32, 1, 0xDEAD_BEEF, 0x8000_0001, u32::MAX] {
      assert_eq!(swap32(swap32(v)), v);
      assert_eq!(swap32(v), v.swap_bytes());
    }
    for v in [0_u64, 1, 0xDEAD_BEEF_CAFE_BABE, 0x8000_0000_0000_0001, u64::MAX] {
      assert_eq!(swap64(swap64(v)), v);
      assert_eq!(swap64(v), v.swap_bytes());
    }
  }

  #[test]
  fn detect_markers() {
    assert_eq!(detect_endianness(b"II"), Endianness::LittleEndian);
    assert_eq!(detect_endianness(b"MM"), Endianness::BigEndian);
    assert_eq!(detect_endianness(b"IM"), Endianness::Invalid);
    assert_eq!(detect_endianness(b"MI"), Endianness::Invalid);
    assert_eq!(detect_endianness(b"xx"), Endianness::Invalid);
    assert_eq!(detect_endianness(b"ll"), Endianness::Invalid);
    assert_eq!(detect_endianness(b"I"), Endianness::Invalid);
    assert_eq!(detect_endianness(b""), Endianness::Invalid);
    // Only the first two bytes count
    assert_eq!(detect_endianness(b"MM\0*"), Endianness::BigEndian);
  }

  #[test]
  fn endianness_into_endian() {
    assert_eq!(Endianness::LittleEndian.endian(), Some(Endian::Little));
    assert_eq!(Endianness::BigEndian.endian(), Some(Endian::Big));
    assert_eq!(Endianness::Invalid.endian(), None);
  }

  #[test]
  fn fix_wire_words() {
    let buf = [0x00, 0x2A, 0x00, 0x00, 0x00, 0x08];
    assert_eq!(Endian::Big.fix16(LittleEndian::read_u16(&buf[0..2])), 42);
    assert_eq!(Endian::Big.fix32(LittleEndian::read_u32(&buf[2..6])), 8);
    assert_eq!(Endian::Little.fix16(LittleEndian::read_u16(&buf[0..2])), 0x2A00);
    assert_eq!(Endian::Little.fix64(7), 7);
    assert_eq!(Endian::Big.fix64(7), 7 << 56);
  }
}

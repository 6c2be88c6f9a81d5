// SPDX-License-Identifier: LGPL-2.1
// Copyright 2021 Daniel Vogelbacher <daniel@chaospixel.com>

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::{
  PreviewError, Result,
  bits::{Endian, detect_endianness},
  cursor::ByteCursor,
  formats::tiff::{HEADER_SIZE, StripLocation, TIFF_MAGIC, TiffHeader, ifd::check_read, scan_ifd},
};

/// Parameters for preview extraction
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewParams {
  /// Fail on any short read instead of truncating silently
  pub strict: bool,
  /// Continue as big-endian if the byte order marker is invalid
  pub trust_byte_order: bool,
}

impl PreviewParams {
  pub fn with_strict(mut self, strict: bool) -> Self {
    self.strict = strict;
    self
  }

  pub fn with_trust_byte_order(mut self, trust: bool) -> Self {
    self.trust_byte_order = trust;
    self
  }
}

/// Where the embedded preview lives inside a DNG buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewInfo {
  pub endian: Endian,
  pub ifd_offset: u32,
  pub strip: StripLocation,
  /// Bytes of the strip that are actually present in the buffer
  pub available: u64,
}

impl PreviewInfo {
  pub fn is_truncated(&self) -> bool {
    self.available < self.strip.length as u64
  }
}

/// Run header and IFD parsing, leaves the cursor behind the scanned IFD.
fn scan(cursor: &mut ByteCursor<'_>, params: &PreviewParams) -> Result<Option<PreviewInfo>> {
  let (raw, n) = cursor.read_record::<HEADER_SIZE>();
  check_read(params.strict, 0, HEADER_SIZE, n)?;

  let endian = match detect_endianness(&raw[..2]).endian() {
    Some(endian) => endian,
    None if params.trust_byte_order => {
      warn!("Unknown byte order marker {:02x?}, assuming big-endian", &raw[..2]);
      Endian::Big
    }
    None => return Err(PreviewError::InvalidByteOrder([raw[0], raw[1]])),
  };

  let header = TiffHeader::decode(&raw, endian);
  debug!("TIFF header: {:?}, endian: {:?}", header, endian);
  if header.version != TIFF_MAGIC {
    debug!("Unexpected TIFF version {}, continue anyway", header.version);
  }

  cursor.seek(header.ifd_offset as u64);
  let strip = match scan_ifd(cursor, endian, params.strict)? {
    Some(strip) => strip,
    None => return Ok(None),
  };

  let available = (cursor.len() as u64).saturating_sub(strip.offset as u64).min(strip.length as u64);
  Ok(Some(PreviewInfo {
    endian,
    ifd_offset: header.ifd_offset,
    strip,
    available,
  }))
}

/// Locate the embedded JPEG preview without copying it.
pub fn locate_jpeg_preview(buf: &[u8], params: &PreviewParams) -> Result<Option<PreviewInfo>> {
  scan(&mut ByteCursor::new(buf), params)
}

/// Extract the embedded JPEG preview from a DNG buffer.
///
/// Returns `Ok(None)` if the first IFD does not reference a strip.
/// A strip that runs past the end of the buffer is truncated to the
/// available bytes.
pub fn extract_jpeg_preview(buf: &[u8]) -> Result<Option<Vec<u8>>> {
  extract_jpeg_preview_with_params(buf, &PreviewParams::default())
}

pub fn extract_jpeg_preview_with_params(buf: &[u8], params: &PreviewParams) -> Result<Option<Vec<u8>>> {
  let mut cursor = ByteCursor::new(buf);
  let info = match scan(&mut cursor, params)? {
    Some(info) => info,
    None => {
      debug!("No preview strip found");
      return Ok(None);
    }
  };

  cursor.seek(info.strip.offset as u64);
  let size = info.available as usize;
  check_read(params.strict, info.strip.offset as u64, info.strip.length as usize, size)?;
  if info.is_truncated() {
    info!(
      "Preview strip at {} is truncated: {} of {} bytes available",
      info.strip.offset, info.available, info.strip.length
    );
  }

  let mut preview = Vec::new();
  preview.try_reserve_exact(size).map_err(|_| PreviewError::OutOfMemory(size as u64))?;
  preview.extend_from_slice(cursor.read_bytes(size));
  debug!("Extracted preview with {} bytes", preview.len());
  Ok(Some(preview))
}

/// Calculate MD5 digest for a preview
pub fn preview_digest(data: &[u8]) -> [u8; 16] {
  md5::compute(data).into()
}

#[cfg(test)]
mod tests {
  use super::*;

  fn sample(marker: &[u8; 2], big: bool) -> Vec<u8> {
    let w16 = |v: u16| if big { v.to_be_bytes() } else { v.to_le_bytes() };
    let w32 = |v: u32| if big { v.to_be_bytes() } else { v.to_le_bytes() };
    let mut buf = marker.to_vec();
    buf.extend_from_slice(&w16(42));
    buf.extend_from_slice(&w32(8));
    buf.extend_from_slice(&w16(2));
    for (tag, value) in [(273_u16, 34_u32), (279, 2)] {
      buf.extend_from_slice(&w16(tag));
      buf.extend_from_slice(&w16(4));
      buf.extend_from_slice(&w32(1));
      buf.extend_from_slice(&w32(value));
    }
    buf.extend_from_slice(&[0xFF, 0xD8]);
    buf
  }

  #[test]
  fn locate_little() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let info = locate_jpeg_preview(&sample(b"II", false), &PreviewParams::default())?.expect("preview");
    assert_eq!(info.endian, Endian::Little);
    assert_eq!(info.ifd_offset, 8);
    assert_eq!(info.strip, StripLocation { offset: 34, length: 2 });
    assert_eq!(info.available, 2);
    assert!(!info.is_truncated());
    Ok(())
  }

  #[test]
  fn extract_both_orders() -> std::result::Result<(), Box<dyn std::error::Error>> {
    assert_eq!(extract_jpeg_preview(&sample(b"II", false))?, Some(vec![0xFF, 0xD8]));
    assert_eq!(extract_jpeg_preview(&sample(b"MM", true))?, Some(vec![0xFF, 0xD8]));
    Ok(())
  }

  #[test]
  fn invalid_marker() {
    let buf = sample(b"IM", false);
    assert!(matches!(
      extract_jpeg_preview(&buf),
      Err(PreviewError::InvalidByteOrder([b'I', b'M']))
    ));
  }

  #[test]
  fn trusted_marker_falls_back_to_big_endian() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let params = PreviewParams::default().with_trust_byte_order(true);
    let info = locate_jpeg_preview(&sample(b"XX", true), &params)?.expect("preview");
    assert_eq!(info.endian, Endian::Big);
    assert_eq!(extract_jpeg_preview_with_params(&sample(b"XX", true), &params)?, Some(vec![0xFF, 0xD8]));
    // Little-endian layout read as big-endian points far behind the buffer
    assert_eq!(extract_jpeg_preview_with_params(&sample(b"XX", false), &params)?, None);
    Ok(())
  }

  #[test]
  fn empty_input() {
    assert!(matches!(extract_jpeg_preview(&[]), Err(PreviewError::InvalidByteOrder([0, 0]))));
    let strict = PreviewParams::default().with_strict(true);
    assert!(matches!(
      extract_jpeg_preview_with_params(&[], &strict),
      Err(PreviewError::TruncatedInput { offset: 0, expected: 8, available: 0 })
    ));
  }

  #[test]
  fn ifd_offset_behind_eof() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let mut buf = sample(b"II", false);
    buf[4..8].copy_from_slice(&1000_u32.to_le_bytes());
    assert_eq!(extract_jpeg_preview(&buf)?, None);
    Ok(())
  }

  #[test]
  fn digest_of_preview() {
    assert_eq!(
      preview_digest(&[]),
      [0xd4, 0x1d, 0x8c, 0xd9, 0x8f, 0x00, 0xb2, 0x04, 0xe9, 0x80, 0x09, 0x98, 0xec, 0xf8, 0x42, 0x7e]
    );
  }
}

// SPDX-License-Identifier: MIT
// Copyright 2021 Daniel Vogelbacher <daniel@chaospixel.com>

use byteorder::{ByteOrder, LittleEndian};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::{DirEntry, ENTRY_SIZE, TAG_STRIP_BYTE_COUNTS, TAG_STRIP_OFFSETS};
use crate::{PreviewError, Result, bits::Endian, cursor::ByteCursor};

/// Location of the strip data referenced by an IFD
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StripLocation {
  pub offset: u32,
  pub length: u32,
}

/// Check a short read, only fatal in strict mode
pub(crate) fn check_read(strict: bool, offset: u64, expected: usize, available: usize) -> Result<()> {
  if strict && available < expected {
    return Err(PreviewError::TruncatedInput {
      offset,
      expected: expected as u64,
      available: available as u64,
    });
  }
  Ok(())
}

/// Scan the IFD at the cursor position for the strip offset and byte count tags.
///
/// Both tags must be present, otherwise `None` is returned. If a tag
/// occurs more than once, the last one wins.
pub fn scan_ifd(cursor: &mut ByteCursor<'_>, endian: Endian, strict: bool) -> Result<Option<StripLocation>> {
  let start = cursor.position();
  let (raw_count, n) = cursor.read_record::<2>();
  check_read(strict, start, raw_count.len(), n)?;
  let entry_count = endian.fix16(LittleEndian::read_u16(&raw_count));
  debug!("IFD at {} has {} entries", start, entry_count);

  let mut offset = None;
  let mut length = None;

  for _ in 0..entry_count {
    let pos = cursor.position();
    let (raw, n) = cursor.read_record::<ENTRY_SIZE>();
    check_read(strict, pos, ENTRY_SIZE, n)?;
    let entry = DirEntry::decode(&raw, endian);
    match entry.tag {
      TAG_STRIP_OFFSETS => {
        if offset.replace(entry.value).is_some() {
          warn!("Duplicate StripOffsets tag at {}, using last value {}", pos, entry.value);
        }
      }
      TAG_STRIP_BYTE_COUNTS => {
        if length.replace(entry.value).is_some() {
          warn!("Duplicate StripByteCounts tag at {}, using last value {}", pos, entry.value);
        }
      }
      _ => {}
    }
  }

  match (offset, length) {
    (Some(offset), Some(length)) => Ok(Some(StripLocation { offset, length })),
    _ => {
      debug!("IFD misses strip tags (offset: {:?}, length: {:?})", offset, length);
      Ok(None)
    }
  }
}

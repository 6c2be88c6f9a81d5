//! Library to extract the embedded JPEG preview from DNG files.
//! DNG is a TIFF based container, the preview is referenced by the
//! strip tags of the first IFD. Extraction works on a byte buffer and
//! never reads outside of it.
//!
//! # Example
//! ```rust,no_run
//! use std::env;
//!
//! fn main() {
//!   let args: Vec<_> = env::args().collect();
//!   if args.len() != 2 {
//!     println!("Usage: {} <file>", args[0]);
//!     std::process::exit(2);
//!   }
//!   let data = std::fs::read(&args[1]).unwrap();
//!   match rawpreview::extract_jpeg_preview(&data) {
//!     Ok(Some(jpeg)) => std::fs::write(format!("{}.jpg", args[1]), jpeg).unwrap(),
//!     Ok(None) => eprintln!("File has no embedded preview"),
//!     Err(err) => eprintln!("Failed to extract preview: {}", err),
//!   }
//! }
//! ```

#![deny(unstable_features)]

pub mod bits;
pub mod cursor;
pub mod formats;
pub mod preview;
pub mod rawsource;

pub use bits::{Endian, Endianness, detect_endianness};
pub use cursor::ByteCursor;
pub use formats::tiff::StripLocation;
pub use preview::{PreviewInfo, PreviewParams, extract_jpeg_preview, extract_jpeg_preview_with_params, locate_jpeg_preview, preview_digest};
pub use rawsource::RawSource;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PreviewError {
  #[error("Invalid byte order marker: {:02x?}", _0)]
  InvalidByteOrder([u8; 2]),

  #[error("Input truncated at offset {}: expected {} bytes, only {} available", offset, expected, available)]
  TruncatedInput { offset: u64, expected: u64, available: u64 },

  #[error("Unable to allocate {} bytes for preview", _0)]
  OutOfMemory(u64),

  #[error("I/O error: {}", _0)]
  Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PreviewError>;

#[macro_use]
extern crate afl;

use rawpreview::{PreviewParams, extract_jpeg_preview_with_params};

fn main() {
  fuzz!(|data: &[u8]| {
    for params in [PreviewParams::default(), PreviewParams::default().with_strict(true).with_trust_byte_order(true)] {
      if let Ok(Some(preview)) = extract_jpeg_preview_with_params(data, &params) {
        assert!(preview.len() <= data.len());
      }
    }
  });
}

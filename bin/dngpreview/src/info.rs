// SPDX-License-Identifier: LGPL-2.1
// Copyright 2021 Daniel Vogelbacher <daniel@chaospixel.com>

use clap::ArgMatches;
use log::debug;
use rawpreview::{PreviewInfo, PreviewParams, RawSource, preview_digest};
use serde::Serialize;
use std::path::PathBuf;

use crate::extract::preview_params;

/// Summary printed by the `info` sub command
#[derive(Debug, Serialize)]
struct InfoOutput {
  file: PathBuf,
  size: usize,
  #[serde(skip_serializing_if = "Option::is_none")]
  file_md5: Option<String>,
  preview: Option<PreviewInfo>,
  #[serde(skip_serializing_if = "Option::is_none")]
  preview_md5: Option<String>,
}

/// Entry point for Clap sub command `info`
pub async fn info(options: &ArgMatches) -> crate::Result<()> {
  let in_file: &PathBuf = options.get_one("FILE").expect("FILE not available");
  debug!("Infile: {:?}", in_file);

  let source = RawSource::new(in_file)?;
  let output = collect_info(&source, &preview_params(options), options.get_flag("checksum"))?;

  if options.get_flag("json") {
    println!("{}", serde_json::to_string_pretty(&output)?);
  } else {
    print_text(&output);
  }
  Ok(())
}

fn collect_info(source: &RawSource, params: &PreviewParams, checksum: bool) -> crate::Result<InfoOutput> {
  let preview = source.locate_preview(params)?;
  let preview_md5 = if checksum && preview.is_some() {
    source.extract_preview(params)?.map(|data| hex::encode(preview_digest(&data)))
  } else {
    None
  };

  Ok(InfoOutput {
    file: source.path().to_owned(),
    size: source.len(),
    file_md5: checksum.then(|| format!("{:x}", source.digest())),
    preview,
    preview_md5,
  })
}

fn print_text(output: &InfoOutput) {
  println!("File:        {}", output.file.display());
  println!("Size:        {} bytes", output.size);
  if let Some(md5) = &output.file_md5 {
    println!("File MD5:    {}", md5);
  }
  match &output.preview {
    Some(info) => {
      println!("Byte order:  {:?}", info.endian);
      println!("IFD offset:  {}", info.ifd_offset);
      println!("Preview:     offset {}, length {}", info.strip.offset, info.strip.length);
      if info.is_truncated() {
        println!("Available:   {} bytes (truncated)", info.available);
      }
      if let Some(md5) = &output.preview_md5 {
        println!("Preview MD5: {}", md5);
      }
    }
    None => println!("Preview:     none"),
  }
}

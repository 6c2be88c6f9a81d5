// SPDX-License-Identifier: LGPL-2.1
// Copyright 2021 Daniel Vogelbacher <daniel@chaospixel.com>

use std::{
  fs,
  path::{Path, PathBuf},
};

use log::{debug, warn};

use crate::{AppError, Result};

const DNG_EXT: &str = "dng";
const PREVIEW_EXT: &str = "jpg";

/// A DNG file and the JPEG file its preview is written to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewTarget {
  pub dng: PathBuf,
  pub jpeg: PathBuf,
}

/// Resolve command line input and output to preview targets.
///
/// A single input file is written to `output`, or to `<stem>.jpg` inside
/// `output` if that is a directory. An input directory requires an existing
/// output directory, every DNG below it keeps its relative location and
/// gets the preview extension.
pub fn preview_targets(input: &Path, output: &Path, recursive: bool) -> Result<Vec<PreviewTarget>> {
  if !input.exists() {
    return Err(AppError::NotFound(input.to_owned()));
  }
  let input_md = input.metadata()?;

  if input_md.is_file() {
    let dng = input.canonicalize()?;
    let jpeg = if output.is_dir() { output.join(preview_name(&dng)) } else { output.to_owned() };
    return Ok(vec![PreviewTarget { dng, jpeg }]);
  }
  if !input_md.is_dir() {
    return Err(AppError::General(format!("Unable to determine type of {}", input.display())));
  }

  if !output.exists() {
    return Err(AppError::NotFound(output.to_owned()));
  }
  if !output.is_dir() {
    return Err(AppError::InvalidCmdSwitch(format!(
      "Output '{}' must be a directory, because input is a directory",
      output.display()
    )));
  }

  let root = input.canonicalize()?;
  let dest = output.canonicalize()?;
  let mut dngs = Vec::new();
  collect_dngs(&root, recursive, &mut dngs)?;
  dngs.sort();
  debug!("Found {} DNG files below {}", dngs.len(), root.display());

  dngs
    .into_iter()
    .map(|dng| {
      let relative = dng
        .strip_prefix(&root)
        .map_err(|_| AppError::General(format!("{} is outside of {}", dng.display(), root.display())))?;
      let jpeg = dest.join(relative).with_extension(PREVIEW_EXT);
      Ok(PreviewTarget { dng, jpeg })
    })
    .collect()
}

/// Check for the DNG extension, case-insensitive
pub fn is_dng(path: &Path) -> bool {
  path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case(DNG_EXT))
}

fn preview_name(dng: &Path) -> PathBuf {
  PathBuf::from(dng.file_stem().unwrap_or(dng.as_os_str())).with_extension(PREVIEW_EXT)
}

fn collect_dngs(dir: &Path, recursive: bool, found: &mut Vec<PathBuf>) -> Result<()> {
  for entry in fs::read_dir(dir)? {
    let path = entry?.path();
    let md = fs::metadata(&path)?;
    if md.is_dir() {
      if recursive {
        collect_dngs(&path, recursive, found)?;
      }
    } else if md.is_file() {
      if is_dng(&path) {
        found.push(path);
      } else {
        debug!("Skip non-DNG file {}", path.display());
      }
    } else {
      warn!("Skip {}, not a regular file", path.display());
    }
  }
  Ok(())
}

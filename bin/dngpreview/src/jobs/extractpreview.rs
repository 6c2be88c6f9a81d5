// SPDX-License-Identifier: LGPL-2.1
// Copyright 2021 Daniel Vogelbacher <daniel@chaospixel.com>

use super::Job;
use crate::{AppError, Result};
use async_trait::async_trait;
use log::{debug, warn};
use rawpreview::{PreviewParams, RawSource};
use std::{
  fmt::Display,
  fs::File,
  io::{BufWriter, Write},
  path::PathBuf,
  time::Instant,
};

/// Job for extracting the preview of a single DNG
#[derive(Debug, Clone)]
pub struct ExtractPreviewJob {
  pub input: PathBuf,
  pub output: PathBuf,
  pub replace: bool,
  pub params: PreviewParams,
}

/// State of extraction
#[derive(Debug)]
pub struct JobResult {
  pub job: ExtractPreviewJob,
  pub duration: f32,
  pub size: usize,
  pub error: Option<AppError>,
}

impl Display for JobResult {
  /// Pretty print the extraction state
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    if let Some(error) = self.error.as_ref() {
      f.write_fmt(format_args!("Failed: '{}', {}", self.job.input.display(), error))?;
    } else {
      f.write_fmt(format_args!(
        "Extracted '{}' => '{}' ({} bytes, in {:.2}s)",
        self.job.input.display(),
        self.job.output.display(),
        self.size,
        self.duration
      ))?;
    }
    Ok(())
  }
}

impl ExtractPreviewJob {
  fn internal_exec(&self) -> Result<JobResult> {
    if self.output.exists() && !self.replace {
      return Err(AppError::AlreadyExists(self.output.clone()));
    }
    let source = RawSource::new(&self.input)?;
    let preview = match source.extract_preview(&self.params)? {
      Some(preview) if !preview.is_empty() => preview,
      Some(_) => {
        warn!("Preview strip of {} lies outside of the file", self.input.display());
        return Err(AppError::NoPreview(self.input.clone()));
      }
      None => return Err(AppError::NoPreview(self.input.clone())),
    };

    if let Some(parent) = self.output.parent() {
      if !parent.as_os_str().is_empty() && !parent.exists() {
        debug!("Create output directory {:?}", parent);
        std::fs::create_dir_all(parent)?;
      }
    }
    let mut stream = BufWriter::new(File::create(&self.output)?);
    stream.write_all(&preview)?;
    stream.flush()?;
    Ok(JobResult {
      job: self.clone(),
      duration: 0.0,
      size: preview.len(),
      error: None,
    })
  }
}

#[async_trait]
impl Job for ExtractPreviewJob {
  type Output = JobResult;

  async fn execute(&self) -> Self::Output {
    debug!("Job running: input: {:?}, output: {:?}", self.input, self.output);
    let now = Instant::now();
    match self.internal_exec() {
      Ok(mut stat) => {
        stat.duration = now.elapsed().as_secs_f32();
        stat
      }
      Err(e) => JobResult {
        job: self.clone(),
        duration: now.elapsed().as_secs_f32(),
        size: 0,
        error: Some(e),
      },
    }
  }
}

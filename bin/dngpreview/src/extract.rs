// SPDX-License-Identifier: LGPL-2.1
// Copyright 2021 Daniel Vogelbacher <daniel@chaospixel.com>

use clap::ArgMatches;
use futures::future::join_all;
use rawpreview::PreviewParams;
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use std::path::PathBuf;
use std::time::Instant;

use crate::Result;
use crate::filemap::preview_targets;
use crate::jobs::Job;
use crate::jobs::extractpreview::{ExtractPreviewJob, JobResult};

const BATCH_SIZE: usize = 8;

/// Build preview parameters from command line switches
pub fn preview_params(options: &ArgMatches) -> PreviewParams {
  PreviewParams::default()
    .with_strict(options.get_flag("strict"))
    .with_trust_byte_order(options.get_flag("trust_byteorder"))
}

/// Entry point for Clap sub command `extract`
pub async fn extract(options: &ArgMatches) -> Result<()> {
  let now = Instant::now();

  let in_path: &PathBuf = options.get_one("INPUT").expect("INPUT not available");
  let out_path: &PathBuf = options.get_one("OUTPUT").expect("OUTPUT not available");
  if in_path.is_dir() {
    eprintln!("Scanning directory, please wait...");
  }
  let targets = preview_targets(in_path, out_path, options.get_flag("recursive"))?;

  let replace = options.get_flag("override");
  let params = preview_params(options);
  let jobs: Vec<ExtractPreviewJob> = targets
    .par_iter()
    .map(|target| ExtractPreviewJob {
      input: target.dng.clone(),
      output: target.jpeg.clone(),
      replace,
      params,
    })
    .collect();

  let verbose = options.get_flag("verbose");

  let mut results: Vec<JobResult> = Vec::with_capacity(jobs.len());
  for batch in jobs.chunks(BATCH_SIZE) {
    for res in join_all(batch.iter().map(|j| j.execute())).await {
      if verbose {
        println!("Status: {}", res);
      }
      results.push(res);
    }
  }

  let total = results.len();
  let failed: Vec<&JobResult> = results.iter().filter(|j| j.error.is_some()).collect();

  if failed.is_empty() {
    println!("Extracted {}/{} files", total, total);
  } else {
    eprintln!("Extracted {}/{} files, {} failed:", total - failed.len(), total, failed.len());
    for job in failed {
      eprintln!("   {}", job.job.input.display());
    }
  }
  println!("Total time: {:.2}s", now.elapsed().as_secs_f32());
  Ok(())
}

// SPDX-License-Identifier: LGPL-2.1
// Copyright 2021 Daniel Vogelbacher <daniel@chaospixel.com>

mod app;
mod extract;
mod filemap;
mod info;
mod jobs;

use std::path::PathBuf;

use fern::colors::{Color, ColoredLevelConfig};
use rawpreview::PreviewError;
use thiserror::Error;
use tokio::runtime::Builder;

const STACK_SIZE_MIB: usize = 4;

fn main() -> anyhow::Result<()> {
  let runtime = Builder::new_multi_thread()
    .enable_all()
    .thread_name("dngpreview-tokio-worker")
    .thread_stack_size(STACK_SIZE_MIB * 1024 * 1024)
    .build()?;

  runtime.block_on(main_async())
}

/// Main entry function
///
/// We initialize the fern logger here, create a Clap command line
/// parser and dispatch to the sub command.
async fn main_async() -> anyhow::Result<()> {
  let app = app::create_app();
  let matches = app.try_get_matches().unwrap_or_else(|e| e.exit());

  let colors = ColoredLevelConfig::new().debug(Color::Magenta);
  fern::Dispatch::new()
    .chain(std::io::stderr())
    .level({
      match matches.get_count("debug") {
        0 => log::LevelFilter::Error,
        1 => log::LevelFilter::Warn,
        2 => log::LevelFilter::Info,
        3 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
      }
    })
    .format(move |out, message, record| {
      out.finish(format_args!(
        "[{:6}][{}] {} ({}:{})",
        colors.color(record.level()),
        record.target(),
        message,
        record.file().unwrap_or("<undefined>"),
        record.line().unwrap_or(0)
      ))
    })
    .apply()?;

  match matches.subcommand() {
    Some(("extract", sc)) => extract::extract(sc).await?,
    Some(("info", sc)) => info::info(sc).await?,
    _ => unreachable!("Subcommand is required"),
  }
  Ok(())
}

#[derive(Error, Debug)]
pub enum AppError {
  #[error("{}", _0)]
  General(String),
  #[error("Invalid arguments: {}", _0)]
  InvalidCmdSwitch(String),
  #[error("I/O error: {}", _0)]
  Io(#[from] std::io::Error),
  #[error("Not found: {}", _0.display())]
  NotFound(PathBuf),
  #[error("Already exists: {}", _0.display())]
  AlreadyExists(PathBuf),
  #[error("No embedded preview found: {}", _0.display())]
  NoPreview(PathBuf),
  #[error(transparent)]
  Preview(#[from] PreviewError),
  #[error(transparent)]
  Other(#[from] anyhow::Error),
}

impl From<serde_json::Error> for AppError {
  fn from(value: serde_json::Error) -> Self {
    anyhow::Error::new(value).into()
  }
}

pub type Result<T> = std::result::Result<T, AppError>;

// SPDX-License-Identifier: LGPL-2.1
// Copyright 2021 Daniel Vogelbacher <daniel@chaospixel.com>

use std::path::PathBuf;

use clap::{Arg, ArgAction, Command, crate_version, value_parser};
use log::debug;

pub fn create_app() -> Command {
  debug!("Creating CLAP app configuration");
  Command::new("dngpreview")
    .version(crate_version!())
    .about("DNGPreview - Extract embedded JPEG previews from DNG files")
    .subcommand_required(true)
    .arg_required_else_help(true)
    .arg(
      Arg::new("debug")
        .short('d')
        .action(ArgAction::Count)
        .global(true)
        .help("Sets the level of debugging information"),
    )
    .arg(
      Arg::new("verbose")
        .short('v')
        .long("verbose")
        .action(ArgAction::SetTrue)
        .global(true)
        .help("Print more messages"),
    )
    .subcommand(
      Command::new("extract")
        .about("Extract embedded JPEG preview from DNG")
        .arg(
          Arg::new("recursive")
            .short('r')
            .long("recursive")
            .action(ArgAction::SetTrue)
            .help("Process input directory recursive"),
        )
        .arg(
          Arg::new("override")
            .short('f')
            .long("override")
            .action(ArgAction::SetTrue)
            .help("Override existing files"),
        )
        .args(parser_args())
        .arg(
          Arg::new("INPUT")
            .required(true)
            .value_parser(value_parser!(PathBuf))
            .help("Input file or directory"),
        )
        .arg(
          Arg::new("OUTPUT")
            .required(true)
            .value_parser(value_parser!(PathBuf))
            .help("Output file or existing directory"),
        ),
    )
    .subcommand(
      Command::new("info")
        .about("Show location of the embedded preview")
        .arg(Arg::new("json").long("json").action(ArgAction::SetTrue).help("Format output as JSON"))
        .arg(
          Arg::new("checksum")
            .long("checksum")
            .action(ArgAction::SetTrue)
            .help("Print MD5 checksums of file and preview"),
        )
        .args(parser_args())
        .arg(Arg::new("FILE").required(true).value_parser(value_parser!(PathBuf)).help("Input file")),
    )
}

/// Switches shared by all subcommands that parse DNG files
fn parser_args() -> [Arg; 2] {
  [
    Arg::new("strict")
      .long("strict")
      .action(ArgAction::SetTrue)
      .help("Fail on truncated files instead of writing a shortened preview"),
    Arg::new("trust_byteorder")
      .long("trust-byteorder")
      .action(ArgAction::SetTrue)
      .help("Assume big-endian if the byte order marker is invalid"),
  ]
}

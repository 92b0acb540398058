// Copyright 2022 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::path::PathBuf;

use boardrules::{movegen, Board, RuleOptions};
use structopt::StructOpt;
use tracing_subscriber::{filter::LevelFilter, EnvFilter, FmtSubscriber};

/// Lists the legal moves in a position.
#[derive(Debug, StructOpt)]
struct Options {
    /// FEN representation of the position to analyze.
    #[structopt(name = "FEN")]
    fen: String,

    /// JSON file of rule options.
    #[structopt(long, parse(from_os_str))]
    rules: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(LevelFilter::INFO)
        .with_env_filter(EnvFilter::from_env("BOARDRULES_LOG"))
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Options::from_args();
    let options = match &args.rules {
        Some(path) => RuleOptions::from_json_file(path)?,
        None => RuleOptions::default(),
    };

    let board = Board::from_fen(&args.fen)?;
    for mov in movegen::legal_moves_with(&board, options) {
        println!("{}", mov.as_uci());
    }

    Ok(())
}

// Copyright 2022 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::path::PathBuf;

use boardrules::{rules, Board, Move, RuleOptions, Verdict};
use serde::Serialize;
use structopt::StructOpt;
use tracing_subscriber::{filter::LevelFilter, EnvFilter, FmtSubscriber};

/// Decides whether a move is legal in a position.
#[derive(Debug, StructOpt)]
struct Options {
    /// FEN representation of the position.
    #[structopt(name = "FEN")]
    fen: String,

    /// The move to check, in UCI notation (e.g. e2e4, e7e8q).
    #[structopt(name = "MOVE")]
    mov: String,

    /// Print the verdict as JSON.
    #[structopt(long)]
    json: bool,

    /// JSON file of rule options.
    #[structopt(long, parse(from_os_str))]
    rules: Option<PathBuf>,
}

#[derive(Serialize)]
struct Report<'a> {
    fen: &'a str,
    #[serde(rename = "move")]
    mov: String,
    #[serde(flatten)]
    verdict: Verdict,
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
    let mov = Move::from_uci(&board, &args.mov)?;
    let verdict = rules::check_with(&board, mov, &options)?;
    if args.json {
        let report = Report {
            fen: &args.fen,
            mov: mov.as_uci(),
            verdict,
        };
        println!("{}", serde_json::to_string(&report)?);
    } else {
        println!("{}", verdict);
    }

    Ok(())
}

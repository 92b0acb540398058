// Copyright 2022 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::time::Instant;

use boardrules::{movegen, Board};
use structopt::StructOpt;
use tracing_subscriber::{filter::LevelFilter, EnvFilter, FmtSubscriber};

/// Counts the leaves of the legal move tree of a position.
#[derive(Debug, StructOpt)]
struct Options {
    /// The depth to search to.
    #[structopt(short, long)]
    depth: u32,

    /// FEN representation of the position to analyze.
    #[structopt(name = "FEN")]
    fen: String,

    /// Print the count for each legal move at the root.
    #[structopt(long)]
    divide: bool,
}

fn main() -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(LevelFilter::INFO)
        .with_env_filter(EnvFilter::from_env("BOARDRULES_LOG"))
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Options::from_args();
    let board = Board::from_fen(&args.fen)?;
    let start = Instant::now();
    let count = if args.divide && args.depth > 0 {
        let mut total = 0;
        for mov in movegen::legal_moves(&board) {
            let next = board.with_move_applied(mov)?;
            let count = movegen::perft(&next, args.depth - 1)?;
            println!("{}: {}", mov.as_uci(), count);
            total += count;
        }
        total
    } else {
        movegen::perft(&board, args.depth)?
    };

    tracing::info!(depth = args.depth, elapsed = ?start.elapsed(), "perft finished");
    println!("{}", count);
    Ok(())
}

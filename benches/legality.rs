// Copyright 2022 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use boardrules::core::{self, Color};
use boardrules::{movegen, rules, Board, Move};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/Pp2P3/2N2Q1p/1PPBBPPP/R3K2R b KQkq a3 0 1";

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("quiet-move-check", |b| {
        let board = Board::from_fen("4k3/8/4b3/8/2B5/8/8/4K3 w - - 0 1").unwrap();
        let mov = Move::quiet(core::C4, core::D5);
        b.iter(|| rules::check(black_box(&board), black_box(mov)));
    });

    c.bench_function("castle-check", |b| {
        let board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let mov = Move::kingside_castle(core::E1, core::G1);
        b.iter(|| rules::check(black_box(&board), black_box(mov)));
    });

    c.bench_function("kiwipete-candidates", |b| {
        let board = Board::from_fen(KIWIPETE).unwrap();
        b.iter(|| movegen::candidate_moves(black_box(&board), black_box(Color::Black)));
    });

    c.bench_function("kiwipete-legal-moves", |b| {
        let board = Board::from_fen(KIWIPETE).unwrap();
        b.iter(|| movegen::legal_moves(black_box(&board)));
    });

    c.bench_function("start-perft-3", |b| {
        let board = Board::from_start_position();
        b.iter(|| movegen::perft(black_box(&board), 3).unwrap());
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);

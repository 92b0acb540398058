// Copyright 2021-2022 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Move enumeration on top of the legality checker.
//!
//! Candidate moves are deliberately generous: every square a piece attacks or a pawn could push to, plus the two
//! castling targets. Deciding which of them may actually be played is left entirely to
//! [`MoveLegalityChecker`], which makes `perft` an end-to-end test of the rules.

use crate::{
    board::{king_home, Board, BoardError},
    config::RuleOptions,
    core::*,
    rules::MoveLegalityChecker,
};

fn push_classified(board: &Board, source: Square, dest: Square, moves: &mut Vec<Move>) {
    let us = match board.piece_at(source) {
        Some(piece) => piece,
        None => return,
    };

    if us.is_pawn() && dest.rank() == us.color.promotion_rank() {
        for kind in PieceKind::PROMOTIONS {
            if let Ok(mov) = Move::classify(board, source, dest, Some(kind)) {
                moves.push(mov);
            }
        }
    } else if let Ok(mov) = Move::classify(board, source, dest, None) {
        moves.push(mov);
    }
}

pub fn generate_pawn_candidates(us: Color, board: &Board, moves: &mut Vec<Move>) {
    let forward = us.pawn_direction();
    for source in board.pieces_of_kind(us, PieceKind::Pawn) {
        if let Some(single) = source.offset(0, forward) {
            push_classified(board, source, single, moves);
        }

        if source.rank() == us.pawn_rank() {
            if let Some(double) = source.offset(0, 2 * forward) {
                push_classified(board, source, double, moves);
            }
        }

        // Diagonals are generated whether or not anything stands there; en passant is the checker's business.
        for target in pawn_attacks(source, us) {
            push_classified(board, source, target, moves);
        }
    }
}

pub fn generate_castle_candidates(us: Color, board: &Board, moves: &mut Vec<Move>) {
    let home = king_home(us);
    if board.piece_at(home) != Some(Piece::new(us, PieceKind::King)) {
        return;
    }

    for file in [FILE_G, FILE_C] {
        push_classified(board, home, Square::of(us.back_rank(), file), moves);
    }
}

pub fn generate_candidates_for_kind(
    us: Color,
    board: &Board,
    kind: PieceKind,
    moves: &mut Vec<Move>,
) {
    let occupancy = board.occupancy();
    for source in board.pieces_of_kind(us, kind) {
        for target in attacks(kind, us, source, occupancy) {
            push_classified(board, source, target, moves);
        }
    }
}

/// Every move the pieces of color `us` could conceivably make. A superset of the legal moves.
pub fn candidate_moves(board: &Board, us: Color) -> Vec<Move> {
    let mut moves = Vec::new();
    generate_pawn_candidates(us, board, &mut moves);
    generate_candidates_for_kind(us, board, PieceKind::Knight, &mut moves);
    generate_candidates_for_kind(us, board, PieceKind::Bishop, &mut moves);
    generate_candidates_for_kind(us, board, PieceKind::Rook, &mut moves);
    generate_candidates_for_kind(us, board, PieceKind::Queen, &mut moves);
    generate_candidates_for_kind(us, board, PieceKind::King, &mut moves);
    generate_castle_candidates(us, board, &mut moves);
    moves
}

/// The legal moves for the side to move.
pub fn legal_moves(board: &Board) -> Vec<Move> {
    legal_moves_with(board, RuleOptions::default())
}

pub fn legal_moves_with(board: &Board, options: RuleOptions) -> Vec<Move> {
    let checker = MoveLegalityChecker::with_options(board, options);
    let mut moves = candidate_moves(board, board.side_to_move());
    moves.retain(|&mov| checker.is_legal(mov));
    moves
}

/// Counts the leaves of the legal move tree rooted at `board`, `depth` plies deep. Fails if a move the checker
/// accepted cannot be applied to the board.
pub fn perft(board: &Board, depth: u32) -> Result<u64, BoardError> {
    if depth == 0 {
        return Ok(1);
    }

    let mut count = 0;
    for mov in legal_moves(board) {
        let next = board.with_move_applied(mov).map_err(|err| {
            tracing::error!(mov = %mov, fen = %board.as_fen(), error = %err, "legal move failed to apply");
            err
        })?;
        count += perft(&next, depth - 1)?;
    }

    Ok(count)
}

// Copyright 2022 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Move legality: given a board and a candidate move, decide whether the move may be played.
//!
//! Legality is decided by a fixed sequence of rules, each of which either passes or names the reason the move is
//! illegal. The first rule to fail decides the verdict:
//!
//!  1. the moving piece's movement pattern (including promotion),
//!  2. pawn captures, en passant, and pawn advances,
//!  3. blocking pieces along the path (knights jump),
//!  4. for castles: castle rights, not castling out of check, and not crossing or landing on an attacked square,
//!  5. otherwise: no capturing one's own piece, and not leaving one's own king in check.
//!
//! An illegal move is an ordinary outcome, reported as [`Verdict::Illegal`]. Errors are reserved for moves that do
//! not describe anything on the given board: an empty source square, or flags that contradict the board.

use derive_more::Display;
use serde::Serialize;
use thiserror::Error;

use crate::{
    board::{king_home, rook_corner, Board, BoardError},
    config::RuleOptions,
    core::*,
};

/// The first rule that a move failed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Display, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IllegalReason {
    #[display(fmt = "the piece does not move that way")]
    MovementPattern,
    #[display(fmt = "promotion piece is missing or not allowed")]
    BadPromotion,
    #[display(fmt = "a pawn may only move diagonally to capture")]
    PawnDiagonalWithoutCapture,
    #[display(fmt = "a pawn cannot advance onto an occupied square")]
    PawnAdvanceBlocked,
    #[display(fmt = "another piece is in the way")]
    Blocked,
    #[display(fmt = "castling is not available")]
    CastleUnavailable,
    #[display(fmt = "cannot castle out of check")]
    CastleOutOfCheck,
    #[display(fmt = "the king would cross or land on an attacked square")]
    CastleThroughCheck,
    #[display(fmt = "cannot capture one's own piece")]
    CaptureOwnPiece,
    #[display(fmt = "the move leaves the king in check")]
    LeavesKingInCheck,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "verdict", content = "reason", rename_all = "snake_case")]
pub enum Verdict {
    Legal,
    Illegal(IllegalReason),
}

impl Verdict {
    pub fn is_legal(self) -> bool {
        self == Verdict::Legal
    }

    pub fn reason(self) -> Option<IllegalReason> {
        match self {
            Verdict::Legal => None,
            Verdict::Illegal(reason) => Some(reason),
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Legal => write!(f, "legal"),
            Verdict::Illegal(reason) => write!(f, "illegal: {}", reason),
        }
    }
}

/// A move that cannot be judged against the board it was given.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LegalityError {
    #[error("no piece on source square {0}")]
    EmptySource(Square),
    #[error("move {given:?} does not match the board, which classifies it as {expected:?}")]
    Misclassified { given: Move, expected: Move },
    #[error(transparent)]
    Parse(#[from] MoveParseError),
    #[error("failed to build hypothetical board: {0}")]
    Board(#[from] BoardError),
}

/// Judges moves against one board. The board is borrowed, never modified; every rule that needs to look ahead does
/// so on its own copy.
#[derive(Clone, Debug)]
pub struct MoveLegalityChecker<'a> {
    board: &'a Board,
    options: RuleOptions,
}

impl<'a> MoveLegalityChecker<'a> {
    pub fn new(board: &'a Board) -> MoveLegalityChecker<'a> {
        MoveLegalityChecker::with_options(board, RuleOptions::default())
    }

    pub fn with_options(board: &'a Board, options: RuleOptions) -> MoveLegalityChecker<'a> {
        MoveLegalityChecker { board, options }
    }

    /// Decides whether `mov` is legal on this checker's board.
    pub fn check(&self, mov: Move) -> Result<Verdict, LegalityError> {
        let piece = self
            .board
            .piece_at(mov.source())
            .ok_or(LegalityError::EmptySource(mov.source()))?;
        let expected = Move::classify(
            self.board,
            mov.source(),
            mov.destination(),
            mov.promotion_piece(),
        )?;
        if expected != mov {
            return Err(LegalityError::Misclassified {
                given: mov,
                expected,
            });
        }

        if let Some(reason) = self.movement_pattern(piece, mov) {
            return Ok(rejected(mov, reason));
        }

        if let Some(reason) = self.pawn_rule(piece, mov) {
            return Ok(rejected(mov, reason));
        }

        if let Some(reason) = self.blocking_rule(piece, mov) {
            return Ok(rejected(mov, reason));
        }

        if mov.is_castle() {
            if let Some(reason) = self.castling_rule(piece, mov)? {
                return Ok(rejected(mov, reason));
            }
        } else {
            if let Some(reason) = self.capture_rule(piece, mov) {
                return Ok(rejected(mov, reason));
            }

            if let Some(reason) = self.self_check_rule(piece, mov)? {
                return Ok(rejected(mov, reason));
            }
        }

        Ok(Verdict::Legal)
    }

    /// Like `check`, but treats a move that cannot be judged as illegal.
    pub fn is_legal(&self, mov: Move) -> bool {
        match self.check(mov) {
            Ok(verdict) => verdict.is_legal(),
            Err(err) => {
                tracing::debug!(mov = %mov, error = %err, "rejecting malformed move");
                false
            }
        }
    }

    fn movement_pattern(&self, piece: Piece, mov: Move) -> Option<IllegalReason> {
        let (files, ranks) = (mov.horizontal_delta(), mov.vertical_delta());
        let (file_dist, rank_dist) = (files.abs(), ranks.abs());
        let forward = piece.color.pawn_direction();
        let fits = match piece.kind {
            _ if file_dist == 0 && rank_dist == 0 => false,
            PieceKind::Pawn => {
                (file_dist <= 1 && ranks == forward)
                    || (files == 0
                        && ranks == 2 * forward
                        && mov.source().rank() == piece.color.pawn_rank())
            }
            PieceKind::Knight => (file_dist, rank_dist) == (1, 2) || (file_dist, rank_dist) == (2, 1),
            PieceKind::Bishop => file_dist == rank_dist,
            PieceKind::Rook => files == 0 || ranks == 0,
            PieceKind::Queen => file_dist == rank_dist || files == 0 || ranks == 0,
            PieceKind::King => (file_dist <= 1 && rank_dist <= 1) || mov.is_castle(),
        };

        if !fits {
            return Some(IllegalReason::MovementPattern);
        }

        let must_promote =
            piece.is_pawn() && mov.destination().rank() == piece.color.promotion_rank();
        let promotes_legally = match mov.promotion_piece() {
            Some(kind) => must_promote && PieceKind::PROMOTIONS.contains(&kind),
            None => !must_promote,
        };

        if !promotes_legally {
            return Some(IllegalReason::BadPromotion);
        }

        None
    }

    fn pawn_rule(&self, piece: Piece, mov: Move) -> Option<IllegalReason> {
        if !piece.is_pawn() {
            return None;
        }

        let occupant = self.board.piece_at(mov.destination());
        if mov.horizontal_delta() == 0 {
            return occupant.map(|_| IllegalReason::PawnAdvanceBlocked);
        }

        match occupant {
            Some(target) if target.color == piece.color => Some(IllegalReason::CaptureOwnPiece),
            Some(_) => None,
            None => {
                // En passant: the victim stands beside the capturing pawn, directly behind the destination. Only a
                // pawn on its fifth rank can have been passed by a double push.
                if mov.source().rank() != piece.color.en_passant_rank() {
                    return Some(IllegalReason::PawnDiagonalWithoutCapture);
                }

                let victim_square = Square::of(mov.source().rank(), mov.destination().file());
                let victim_is_enemy_pawn = self.board.piece_at(victim_square)
                    == Some(Piece::new(piece.color.toggle(), PieceKind::Pawn));
                let target_matches = !self.options.require_en_passant_target
                    || self.board.en_passant_square() == Some(mov.destination());
                if victim_is_enemy_pawn && target_matches {
                    None
                } else {
                    Some(IllegalReason::PawnDiagonalWithoutCapture)
                }
            }
        }
    }

    fn blocking_rule(&self, piece: Piece, mov: Move) -> Option<IllegalReason> {
        if piece.is_knight() {
            return None;
        }

        if (mov.squares_between() & self.board.occupancy()).is_empty() {
            None
        } else {
            Some(IllegalReason::Blocked)
        }
    }

    fn castling_rule(&self, king: Piece, mov: Move) -> Result<Option<IllegalReason>, LegalityError> {
        let color = king.color;
        let kingside = mov.is_kingside_castle();
        let (right, crossing) = if kingside {
            (CastleStatus::kingside(color), [FILE_F, FILE_G])
        } else {
            (CastleStatus::queenside(color), [FILE_D, FILE_C])
        };

        let corner = rook_corner(color, kingside);
        let available = self.board.castle_status().contains(right)
            && mov.source() == king_home(color)
            && self.board.piece_at(corner) == Some(Piece::new(color, PieceKind::Rook))
            && (SquareSet::between(mov.source(), corner) & self.board.occupancy()).is_empty();
        if !available {
            return Ok(Some(IllegalReason::CastleUnavailable));
        }

        if self.board.is_check(color) {
            return Ok(Some(IllegalReason::CastleOutOfCheck));
        }

        for file in crossing {
            let step = Square::of(color.back_rank(), file);
            if self
                .board
                .with_piece_stepped(mov.source(), step)?
                .is_check(color)
            {
                return Ok(Some(IllegalReason::CastleThroughCheck));
            }
        }

        Ok(None)
    }

    fn capture_rule(&self, piece: Piece, mov: Move) -> Option<IllegalReason> {
        if !mov.is_capture() {
            return None;
        }

        match self.board.piece_at(mov.destination()) {
            Some(target) if target.color == piece.color => Some(IllegalReason::CaptureOwnPiece),
            _ => None,
        }
    }

    fn self_check_rule(&self, piece: Piece, mov: Move) -> Result<Option<IllegalReason>, LegalityError> {
        let next = self.board.with_move_applied(mov)?;
        if next.is_check(piece.color) {
            Ok(Some(IllegalReason::LeavesKingInCheck))
        } else {
            Ok(None)
        }
    }
}

fn rejected(mov: Move, reason: IllegalReason) -> Verdict {
    tracing::trace!(mov = %mov, reason = %reason, "move rejected");
    Verdict::Illegal(reason)
}

/// Decides whether `mov` is legal on `board` under the default rule options.
pub fn check(board: &Board, mov: Move) -> Result<Verdict, LegalityError> {
    MoveLegalityChecker::new(board).check(mov)
}

/// Decides whether `mov` is legal on `board` under the given rule options.
pub fn check_with(board: &Board, mov: Move, options: &RuleOptions) -> Result<Verdict, LegalityError> {
    MoveLegalityChecker::with_options(board, *options).check(mov)
}

/// Whether `mov` is legal on `board`. Moves that cannot be judged are not legal.
pub fn is_legal(board: &Board, mov: Move) -> bool {
    MoveLegalityChecker::new(board).is_legal(mov)
}

#[cfg(test)]
mod tests {
    use crate::{
        board::Board,
        config::RuleOptions,
        core::*,
        rules::{self, IllegalReason, LegalityError, Verdict},
    };

    fn verdict(fen: &str, uci: &str) -> Verdict {
        let board = Board::from_fen(fen).unwrap();
        let mov = Move::from_uci(&board, uci).unwrap();
        rules::check(&board, mov).unwrap()
    }

    fn rejected_for(fen: &str, uci: &str) -> IllegalReason {
        verdict(fen, uci)
            .reason()
            .unwrap_or_else(|| panic!("{} should be illegal in {}", uci, fen))
    }

    const START: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    mod pieces {
        use super::*;

        #[test]
        fn open_rook_move() {
            assert_eq!(Verdict::Legal, verdict("4k3/8/8/8/8/8/8/R3K3 w - - 0 1", "a1a7"));
        }

        #[test]
        fn knights_jump() {
            assert_eq!(Verdict::Legal, verdict(START, "g1f3"));
            assert_eq!(Verdict::Legal, verdict(START, "b1c3"));
        }

        #[test]
        fn sliders_are_blocked() {
            assert_eq!(IllegalReason::Blocked, rejected_for(START, "a1a3"));
            assert_eq!(IllegalReason::Blocked, rejected_for(START, "c1e3"));
            assert_eq!(IllegalReason::Blocked, rejected_for(START, "d1d4"));
        }

        #[test]
        fn wrong_shape() {
            let fen = "4k3/8/8/8/8/8/8/R3K3 w - - 0 1";
            assert_eq!(IllegalReason::MovementPattern, rejected_for(fen, "a1b2"));
            assert_eq!(IllegalReason::MovementPattern, rejected_for(fen, "e1e3"));
            assert_eq!(IllegalReason::MovementPattern, rejected_for(START, "g1g3"));
        }

        #[test]
        fn capture_own_piece() {
            let fen = "4k3/8/8/8/8/8/P7/R3K3 w - - 0 1";
            assert_eq!(IllegalReason::CaptureOwnPiece, rejected_for(fen, "a1a2"));
        }

        #[test]
        fn capture_enemy_piece() {
            let fen = "4k3/8/8/8/8/8/p7/R3K3 w - - 0 1";
            assert_eq!(Verdict::Legal, verdict(fen, "a1a2"));
        }
    }

    mod pawns {
        use super::*;

        #[test]
        fn pushes() {
            assert_eq!(Verdict::Legal, verdict(START, "e2e3"));
            assert_eq!(Verdict::Legal, verdict(START, "e2e4"));
            assert_eq!(Verdict::Legal, verdict(START, "e7e5"));
        }

        #[test]
        fn double_push_only_from_start() {
            let fen = "4k3/8/8/8/8/4P3/8/4K3 w - - 0 1";
            assert_eq!(IllegalReason::MovementPattern, rejected_for(fen, "e3e5"));
        }

        #[test]
        fn pawns_do_not_move_backwards() {
            let fen = "4k3/8/8/8/8/4P3/8/4K3 w - - 0 1";
            assert_eq!(IllegalReason::MovementPattern, rejected_for(fen, "e3e2"));
        }

        #[test]
        fn advance_onto_piece() {
            let fen = "4k3/8/8/8/4p3/4P3/8/4K3 w - - 0 1";
            assert_eq!(IllegalReason::PawnAdvanceBlocked, rejected_for(fen, "e3e4"));
        }

        #[test]
        fn double_push_through_piece() {
            let fen = "4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1";
            assert_eq!(IllegalReason::Blocked, rejected_for(fen, "e2e4"));
        }

        #[test]
        fn diagonal_without_capture() {
            assert_eq!(
                IllegalReason::PawnDiagonalWithoutCapture,
                rejected_for(START, "e2d3")
            );
        }

        #[test]
        fn diagonal_capture() {
            let fen = "4k3/8/8/3p4/4P3/8/8/4K3 w - - 0 1";
            assert_eq!(Verdict::Legal, verdict(fen, "e4d5"));
            let fen = "4k3/8/8/3p4/4P3/8/8/4K3 b - - 0 1";
            assert_eq!(Verdict::Legal, verdict(fen, "d5e4"));
        }

        #[test]
        fn diagonal_onto_own_piece() {
            let fen = "4k3/8/8/3N4/4P3/8/8/4K3 w - - 0 1";
            assert_eq!(IllegalReason::CaptureOwnPiece, rejected_for(fen, "e4d5"));
        }

        #[test]
        fn en_passant_after_double_push() {
            let fen = "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1";
            assert_eq!(Verdict::Legal, verdict(fen, "e5d6"));
        }

        #[test]
        fn en_passant_needs_target_square() {
            let fen = "4k3/8/8/3pP3/8/8/8/4K3 w - - 0 1";
            assert_eq!(
                IllegalReason::PawnDiagonalWithoutCapture,
                rejected_for(fen, "e5d6")
            );

            let board = Board::from_fen(fen).unwrap();
            let relaxed = RuleOptions {
                require_en_passant_target: false,
            };
            let verdict = rules::check_with(&board, Move::en_passant(E5, D6), &relaxed).unwrap();
            assert_eq!(Verdict::Legal, verdict);
        }

        #[test]
        fn en_passant_needs_enemy_pawn() {
            let fen = "4k3/8/8/3nP3/8/8/8/4K3 w - d6 0 1";
            assert_eq!(
                IllegalReason::PawnDiagonalWithoutCapture,
                rejected_for(fen, "e5d6")
            );
            let fen = "4k3/8/8/3PP3/8/8/8/4K3 w - d6 0 1";
            assert_eq!(
                IllegalReason::PawnDiagonalWithoutCapture,
                rejected_for(fen, "e5d6")
            );
        }

        #[test]
        fn en_passant_only_from_fifth_rank() {
            let board = Board::from_fen("4k3/3pP3/8/8/8/8/8/4K3 w - - 0 1").unwrap();
            let relaxed = RuleOptions {
                require_en_passant_target: false,
            };
            let mov = Move::from_uci(&board, "e7d8q").unwrap();
            assert!(mov.is_en_passant());
            assert_eq!(
                Verdict::Illegal(IllegalReason::PawnDiagonalWithoutCapture),
                rules::check_with(&board, mov, &relaxed).unwrap()
            );

            let board = Board::from_fen("4k3/8/8/8/3pP3/8/8/4K3 w - - 0 1").unwrap();
            let mov = Move::from_uci(&board, "e4d5").unwrap();
            assert_eq!(
                Verdict::Illegal(IllegalReason::PawnDiagonalWithoutCapture),
                rules::check_with(&board, mov, &relaxed).unwrap()
            );
        }

        #[test]
        fn en_passant_exposing_king() {
            let fen = "8/8/8/K2pP2r/8/8/8/4k3 w - d6 0 1";
            assert_eq!(IllegalReason::LeavesKingInCheck, rejected_for(fen, "e5d6"));
        }

        #[test]
        fn promotion_is_required() {
            let fen = "8/4P3/8/8/8/8/8/k3K3 w - - 0 1";
            assert_eq!(IllegalReason::BadPromotion, rejected_for(fen, "e7e8"));
            assert_eq!(Verdict::Legal, verdict(fen, "e7e8q"));
            assert_eq!(Verdict::Legal, verdict(fen, "e7e8n"));
        }

        #[test]
        fn promotion_only_on_last_rank() {
            let board = Board::from_start_position();
            let mov = Move::promotion(E2, E3, PieceKind::Queen);
            assert_eq!(
                Verdict::Illegal(IllegalReason::BadPromotion),
                rules::check(&board, mov).unwrap()
            );
        }

        #[test]
        fn cannot_promote_to_king() {
            let board = Board::from_fen("8/4P3/8/8/8/8/8/k3K3 w - - 0 1").unwrap();
            let mov = Move::promotion(E7, E8, PieceKind::King);
            assert_eq!(
                Verdict::Illegal(IllegalReason::BadPromotion),
                rules::check(&board, mov).unwrap()
            );
        }
    }

    mod castling {
        use super::*;

        #[test]
        fn kingside_castle_is_legal() {
            let fen = "4k3/8/8/8/8/8/8/4K2R w K - 0 1";
            assert_eq!(Verdict::Legal, verdict(fen, "e1g1"));
        }

        #[test]
        fn queenside_castle_is_legal() {
            let fen = "r3k3/8/8/8/8/8/8/4K3 b q - 0 1";
            assert_eq!(Verdict::Legal, verdict(fen, "e8c8"));
        }

        #[test]
        fn castle_out_of_check() {
            let fen = "4k3/4r3/8/8/8/8/8/4K2R w K - 0 1";
            assert_eq!(IllegalReason::CastleOutOfCheck, rejected_for(fen, "e1g1"));
        }

        #[test]
        fn castle_through_attacked_square() {
            let fen = "4k3/5r2/8/8/8/8/8/4K2R w K - 0 1";
            assert_eq!(IllegalReason::CastleThroughCheck, rejected_for(fen, "e1g1"));
        }

        #[test]
        fn castle_into_check() {
            let fen = "4k3/6r1/8/8/8/8/8/4K2R w K - 0 1";
            assert_eq!(IllegalReason::CastleThroughCheck, rejected_for(fen, "e1g1"));
        }

        #[test]
        fn castle_queenside_through_attacked_square() {
            let fen = "4k3/3r4/8/8/8/8/8/R3K3 w Q - 0 1";
            assert_eq!(IllegalReason::CastleThroughCheck, rejected_for(fen, "e1c1"));
        }

        #[test]
        fn castle_queenside_into_check() {
            let fen = "4k3/2r5/8/8/8/8/8/R3K3 w Q - 0 1";
            assert_eq!(IllegalReason::CastleThroughCheck, rejected_for(fen, "e1c1"));
        }

        #[test]
        fn attacked_rook_path_does_not_matter() {
            let fen = "4k3/1r6/8/8/8/8/8/R3K3 w Q - 0 1";
            assert_eq!(Verdict::Legal, verdict(fen, "e1c1"));
        }

        #[test]
        fn castle_blocked_next_to_king() {
            let fen = "4k3/8/8/8/8/8/8/4KB1R w K - 0 1";
            assert_eq!(IllegalReason::Blocked, rejected_for(fen, "e1g1"));
        }

        #[test]
        fn castle_blocked_next_to_rook() {
            let fen = "4k3/8/8/8/8/8/8/RN2K3 w Q - 0 1";
            assert_eq!(IllegalReason::CastleUnavailable, rejected_for(fen, "e1c1"));
        }

        #[test]
        fn castle_without_right() {
            let fen = "4k3/8/8/8/8/8/8/4K2R w - - 0 1";
            assert_eq!(IllegalReason::CastleUnavailable, rejected_for(fen, "e1g1"));
        }

        #[test]
        fn castle_without_rook() {
            let fen = "4k3/8/8/8/8/8/8/4K3 w K - 0 1";
            assert_eq!(IllegalReason::CastleUnavailable, rejected_for(fen, "e1g1"));
        }
    }

    mod self_check {
        use super::*;

        #[test]
        fn pinned_piece() {
            let fen = "4k3/4r3/8/8/8/8/4B3/4K3 w - - 0 1";
            assert_eq!(IllegalReason::LeavesKingInCheck, rejected_for(fen, "e2d3"));
        }

        #[test]
        fn pinned_piece_along_pin() {
            let fen = "4k3/4r3/8/8/8/8/4R3/4K3 w - - 0 1";
            assert_eq!(Verdict::Legal, verdict(fen, "e2e5"));
            assert_eq!(Verdict::Legal, verdict(fen, "e2e7"));
        }

        #[test]
        fn king_walks_into_attack() {
            let fen = "4k3/8/8/8/8/8/3r4/4K3 w - - 0 1";
            assert_eq!(IllegalReason::LeavesKingInCheck, rejected_for(fen, "e1f2"));
            assert_eq!(Verdict::Legal, verdict(fen, "e1d2"));
        }

        #[test]
        fn kings_cannot_touch() {
            let fen = "8/8/8/8/8/8/3k4/5K2 w - - 0 1";
            assert_eq!(IllegalReason::LeavesKingInCheck, rejected_for(fen, "f1e1"));
        }

        #[test]
        fn must_answer_check() {
            let fen = "4k3/4r3/8/8/8/8/P7/4K3 w - - 0 1";
            assert_eq!(IllegalReason::LeavesKingInCheck, rejected_for(fen, "a2a3"));
            assert_eq!(Verdict::Legal, verdict(fen, "e1d1"));
        }
    }

    mod malformed {
        use super::*;

        #[test]
        fn empty_source() {
            let board = Board::from_start_position();
            let mov = Move::quiet(E4, E5);
            assert_eq!(
                LegalityError::EmptySource(E4),
                rules::check(&board, mov).unwrap_err()
            );
            assert!(!rules::is_legal(&board, mov));
        }

        #[test]
        fn flags_disagree_with_board() {
            let board = Board::from_start_position();
            let mov = Move::quiet(A1, A2);
            assert_eq!(
                LegalityError::Misclassified {
                    given: mov,
                    expected: Move::capture(A1, A2),
                },
                rules::check(&board, mov).unwrap_err()
            );
            assert!(!rules::is_legal(&board, mov));
        }

        #[test]
        fn parse_errors_keep_their_message() {
            let err = LegalityError::from(MoveParseError::BadPromotion('k'));
            assert_eq!(LegalityError::Parse(MoveParseError::BadPromotion('k')), err);
            assert_eq!("invalid promotion piece: k", err.to_string());
        }
    }

    mod purity {
        use super::*;

        #[test]
        fn checking_twice_agrees_and_leaves_board_alone() {
            let board =
                Board::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1")
                    .unwrap();
            let snapshot = board.clone();
            for uci in ["e1g1", "e1c1", "d5e6", "e5f7", "a2a4", "h1f1", "e2a6"] {
                let mov = Move::from_uci(&board, uci).unwrap();
                let first = rules::check(&board, mov).unwrap();
                let second = rules::check(&board, mov).unwrap();
                assert_eq!(first, second, "{}", uci);
            }

            assert_eq!(snapshot, board);
        }

        #[test]
        fn verdict_serializes_with_reason() {
            let legal = serde_json::to_string(&Verdict::Legal).unwrap();
            assert_eq!(r#"{"verdict":"legal"}"#, legal);
            let illegal =
                serde_json::to_string(&Verdict::Illegal(IllegalReason::LeavesKingInCheck)).unwrap();
            assert_eq!(
                r#"{"verdict":"illegal","reason":"leaves_king_in_check"}"#,
                illegal
            );
        }

        #[test]
        fn verdict_display() {
            assert_eq!("legal", Verdict::Legal.to_string());
            assert_eq!(
                "illegal: another piece is in the way",
                Verdict::Illegal(IllegalReason::Blocked).to_string()
            );
        }
    }
}

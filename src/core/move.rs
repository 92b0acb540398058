// Copyright 2017-2022 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::fmt;

use bitflags::bitflags;
use thiserror::Error;

use crate::{board::Board, core::*};

bitflags! {
    /// Classification bits carried by a [`Move`]. A move with no bits set is a quiet move.
    pub struct MoveFlags: u8 {
        const CAPTURE = 0b0000_0001;
        const EN_PASSANT = 0b0000_0010;
        const DOUBLE_PAWN_PUSH = 0b0000_0100;
        const KINGSIDE_CASTLE = 0b0000_1000;
        const QUEENSIDE_CASTLE = 0b0001_0000;
        const CASTLE = Self::KINGSIDE_CASTLE.bits | Self::QUEENSIDE_CASTLE.bits;
    }
}

/// Possible errors when turning text or a pair of squares into a classified `Move`.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MoveParseError {
    #[error("move must be four or five characters long: {0:?}")]
    WrongLength(String),
    #[error(transparent)]
    BadSquare(#[from] SquareParseError),
    #[error("invalid promotion piece: {0}")]
    BadPromotion(char),
    #[error("no piece on source square {0}")]
    EmptySource(Square),
}

/// A candidate move: an origin, a destination, and the flags that say what kind of move it is. A `Move` knows
/// nothing about the board it is played on; the board is always passed alongside it.
///
/// The flags are a classification, not a claim of legality. [`Move::classify`] derives them from a board, and the
/// legality checker refuses moves whose flags disagree with the board they are checked against.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Move {
    source: Square,
    destination: Square,
    flags: MoveFlags,
    promotion: Option<PieceKind>,
}

impl Move {
    fn with_flags(source: Square, destination: Square, flags: MoveFlags) -> Move {
        Move {
            source,
            destination,
            flags,
            promotion: None,
        }
    }

    /// Constructs a new quiet move from the source square to the destination square.
    pub fn quiet(source: Square, dest: Square) -> Move {
        Move::with_flags(source, dest, MoveFlags::empty())
    }

    /// Constructs a new capture move from the source square to the destination square.
    pub fn capture(source: Square, dest: Square) -> Move {
        Move::with_flags(source, dest, MoveFlags::CAPTURE)
    }

    /// Constructs a new en passant move. The destination is the empty square the capturing pawn lands on.
    pub fn en_passant(source: Square, dest: Square) -> Move {
        Move::with_flags(source, dest, MoveFlags::CAPTURE | MoveFlags::EN_PASSANT)
    }

    pub fn double_pawn_push(source: Square, dest: Square) -> Move {
        Move::with_flags(source, dest, MoveFlags::DOUBLE_PAWN_PUSH)
    }

    /// Constructs a kingside castle, encoded as the king's own two-square move.
    pub fn kingside_castle(source: Square, dest: Square) -> Move {
        Move::with_flags(source, dest, MoveFlags::KINGSIDE_CASTLE)
    }

    /// Constructs a queenside castle, encoded as the king's own two-square move.
    pub fn queenside_castle(source: Square, dest: Square) -> Move {
        Move::with_flags(source, dest, MoveFlags::QUEENSIDE_CASTLE)
    }

    pub fn promotion(source: Square, dest: Square, promoted: PieceKind) -> Move {
        Move {
            promotion: Some(promoted),
            ..Move::quiet(source, dest)
        }
    }

    pub fn promotion_capture(source: Square, dest: Square, promoted: PieceKind) -> Move {
        Move {
            promotion: Some(promoted),
            ..Move::capture(source, dest)
        }
    }

    /// Returns the source square of this move.
    pub fn source(self) -> Square {
        self.source
    }

    /// Returns the destination square of this move.
    pub fn destination(self) -> Square {
        self.destination
    }

    /// Signed file displacement; positive towards the h-file.
    pub fn horizontal_delta(self) -> i8 {
        self.destination.file().as_u8() as i8 - self.source.file().as_u8() as i8
    }

    /// Signed rank displacement; positive towards the eighth rank.
    pub fn vertical_delta(self) -> i8 {
        self.destination.rank().as_u8() as i8 - self.source.rank().as_u8() as i8
    }

    /// The squares strictly between the source and destination along the move's line. Moves that are not along a
    /// rank, file, or diagonal (knight jumps) have nothing in between.
    pub fn squares_between(self) -> SquareSet {
        SquareSet::between(self.source, self.destination)
    }

    pub fn is_quiet(self) -> bool {
        self.flags.is_empty() && self.promotion.is_none()
    }

    pub fn is_capture(self) -> bool {
        self.flags.contains(MoveFlags::CAPTURE)
    }

    pub fn is_en_passant(self) -> bool {
        self.flags.contains(MoveFlags::EN_PASSANT)
    }

    pub fn is_double_pawn_push(self) -> bool {
        self.flags.contains(MoveFlags::DOUBLE_PAWN_PUSH)
    }

    pub fn is_kingside_castle(self) -> bool {
        self.flags.contains(MoveFlags::KINGSIDE_CASTLE)
    }

    pub fn is_queenside_castle(self) -> bool {
        self.flags.contains(MoveFlags::QUEENSIDE_CASTLE)
    }

    pub fn is_castle(self) -> bool {
        self.flags.intersects(MoveFlags::CASTLE)
    }

    pub fn is_promotion(self) -> bool {
        self.promotion.is_some()
    }

    /// The piece kind a pawn promotes to with this move, if it is a promotion.
    pub fn promotion_piece(self) -> Option<PieceKind> {
        self.promotion
    }

    /// Returns an UCI-compatible string representation of this move.
    pub fn as_uci(self) -> String {
        match self.promotion {
            Some(kind) => format!("{}{}{}", self.source, self.destination, kind),
            None => format!("{}{}", self.source, self.destination),
        }
    }

    /// Classifies a move from `source` to `dest` against the given board.
    ///
    /// The classification is purely descriptive and does not consult the rules of movement:
    ///  * a pawn moving two ranks forward is a double pawn push,
    ///  * a pawn moving one square diagonally forward onto an empty square is en passant,
    ///  * a king moving two files along its back rank from its home square is a castle,
    ///  * any other move onto an occupied square is a capture,
    ///  * anything else is quiet.
    pub fn classify(
        board: &Board,
        source: Square,
        dest: Square,
        promotion: Option<PieceKind>,
    ) -> Result<Move, MoveParseError> {
        let moving = board
            .piece_at(source)
            .ok_or(MoveParseError::EmptySource(source))?;
        let occupied = board.piece_at(dest).is_some();
        let mut mov = Move::quiet(source, dest);
        mov.promotion = promotion;
        let (files, ranks) = (mov.horizontal_delta(), mov.vertical_delta());
        let forward = moving.color.pawn_direction();

        match moving.kind {
            PieceKind::Pawn if files == 0 && ranks == 2 * forward => {
                mov.flags = MoveFlags::DOUBLE_PAWN_PUSH;
            }
            PieceKind::Pawn if files.abs() == 1 && ranks == forward && !occupied => {
                mov.flags = MoveFlags::CAPTURE | MoveFlags::EN_PASSANT;
            }
            PieceKind::King
                if source == Square::of(moving.color.back_rank(), FILE_E)
                    && ranks == 0
                    && files.abs() == 2 =>
            {
                mov.flags = if files > 0 {
                    MoveFlags::KINGSIDE_CASTLE
                } else {
                    MoveFlags::QUEENSIDE_CASTLE
                };
            }
            _ if occupied => mov.flags = MoveFlags::CAPTURE,
            _ => {}
        }

        Ok(mov)
    }

    /// Parses the UCI representation of a move (`e2e4`, `e7e8q`) and classifies it against the given board.
    pub fn from_uci(board: &Board, move_str: &str) -> Result<Move, MoveParseError> {
        if !move_str.is_ascii() || !(4..=5).contains(&move_str.len()) {
            return Err(MoveParseError::WrongLength(move_str.to_owned()));
        }

        let source: Square = move_str[0..2].parse()?;
        let dest: Square = move_str[2..4].parse()?;
        let promotion = match move_str[4..].chars().next() {
            Some(c) => match PieceKind::from_char(c) {
                Some(kind) if PieceKind::PROMOTIONS.contains(&kind) => Some(kind),
                _ => return Err(MoveParseError::BadPromotion(c)),
            },
            None => None,
        };

        Move::classify(board, source, dest, promotion)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "{}", self.as_uci())
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "{} ({:?})", self.as_uci(), self.flags)
    }
}

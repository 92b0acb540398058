// Copyright 2017-2022 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::{convert::TryFrom, fmt};

use thiserror::Error;

use crate::core::{self, *};

/// Errors raised when a board is asked to do something its occupancy does not allow. These indicate a move that
/// does not fit the board it is being applied to, never an illegal-but-well-formed move.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("square {0} is already occupied")]
    SquareOccupied(Square),
    #[error("square {0} is empty")]
    SquareEmpty(Square),
}

/// A chessboard: which piece stands on which square, plus the bits of game state that FEN records and the rules of
/// movement depend on (side to move, castle rights, en-passant target, and the move clocks).
///
/// Boards are plain values. Every operation that "makes" a move does so on a copy, so a board handed to the rules
/// is never changed by them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    /// SquareSets for each piece and color combination (6 pieces, 2 colors = 12 sets).
    sets_by_piece: [SquareSet; 12],
    /// SquareSets for each color.
    sets_by_color: [SquareSet; 2],
    /// The en-passant target square, if the previous move was a double pawn push.
    en_passant_square: Option<Square>,
    halfmove_clock: u16,
    fullmove_clock: u16,
    castle_status: CastleStatus,
    side_to_move: Color,
}

fn piece_index(color: Color, kind: PieceKind) -> usize {
    color as usize * 6 + kind as usize
}

impl Board {
    pub fn en_passant_square(&self) -> Option<Square> {
        self.en_passant_square
    }

    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    pub fn fullmove_clock(&self) -> u16 {
        self.fullmove_clock
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn castle_status(&self) -> CastleStatus {
        self.castle_status
    }

    pub fn can_castle_kingside(&self, color: Color) -> bool {
        self.castle_status.contains(CastleStatus::kingside(color))
    }

    pub fn can_castle_queenside(&self, color: Color) -> bool {
        self.castle_status.contains(CastleStatus::queenside(color))
    }

    pub fn pieces(&self, color: Color) -> SquareSet {
        self.sets_by_color[color as usize]
    }

    pub fn pieces_of_kind(&self, color: Color, kind: PieceKind) -> SquareSet {
        self.sets_by_piece[piece_index(color, kind)]
    }

    /// Every occupied square, regardless of color.
    pub fn occupancy(&self) -> SquareSet {
        self.pieces(Color::White) | self.pieces(Color::Black)
    }

    /// The square of `color`'s king. Boards parsed from FEN have at most one king per color.
    pub fn king(&self, color: Color) -> Option<Square> {
        self.pieces_of_kind(color, PieceKind::King).first()
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        let color = core::colors().find(|&c| self.pieces(c).contains(square))?;
        PieceKind::ALL
            .iter()
            .copied()
            .find(|&kind| self.pieces_of_kind(color, kind).contains(square))
            .map(|kind| Piece::new(color, kind))
    }

    /// The squares strictly between `a` and `b` along a shared rank, file, or diagonal.
    pub fn squares_between(&self, a: Square, b: Square) -> SquareSet {
        SquareSet::between(a, b)
    }
}

impl Board {
    /// Creates an empty board with White to move and no castle rights.
    pub fn new() -> Board {
        Board {
            sets_by_piece: [SquareSet::empty(); 12],
            sets_by_color: [SquareSet::empty(); 2],
            en_passant_square: None,
            halfmove_clock: 0,
            fullmove_clock: 1,
            castle_status: CastleStatus::NONE,
            side_to_move: Color::White,
        }
    }

    pub fn add_piece(&mut self, square: Square, piece: Piece) -> Result<(), BoardError> {
        if self.occupancy().contains(square) {
            return Err(BoardError::SquareOccupied(square));
        }

        self.sets_by_color[piece.color as usize].insert(square);
        self.sets_by_piece[piece_index(piece.color, piece.kind)].insert(square);
        Ok(())
    }

    pub fn remove_piece(&mut self, square: Square) -> Result<Piece, BoardError> {
        let piece = self
            .piece_at(square)
            .ok_or(BoardError::SquareEmpty(square))?;
        self.sets_by_color[piece.color as usize].remove(square);
        self.sets_by_piece[piece_index(piece.color, piece.kind)].remove(square);
        Ok(piece)
    }
}

//
// Attack and check detection.
//

impl Board {
    /// Returns the set of pieces of color `attacker` that attack `target`.
    ///
    /// Attacks are symmetric for every piece except pawns, so this casts each kind's attack pattern outward from the
    /// target and intersects it with the attacker's pieces of that kind. For pawns, the target is attacked by an
    /// attacker's pawn exactly where a defending pawn on the target would attack.
    pub fn squares_attacking(&self, attacker: Color, target: Square) -> SquareSet {
        let occupancy = self.occupancy();
        let queens = self.pieces_of_kind(attacker, PieceKind::Queen);
        let diagonal = self.pieces_of_kind(attacker, PieceKind::Bishop) | queens;
        let orthogonal = self.pieces_of_kind(attacker, PieceKind::Rook) | queens;

        (pawn_attacks(target, attacker.toggle()) & self.pieces_of_kind(attacker, PieceKind::Pawn))
            | (knight_attacks(target) & self.pieces_of_kind(attacker, PieceKind::Knight))
            | (king_attacks(target) & self.pieces_of_kind(attacker, PieceKind::King))
            | (bishop_attacks(target, occupancy) & diagonal)
            | (rook_attacks(target, occupancy) & orthogonal)
    }

    pub fn is_attacked(&self, attacker: Color, target: Square) -> bool {
        !self.squares_attacking(attacker, target).is_empty()
    }

    /// Whether or not a king of color `us` is currently attacked. A side without a king is never in check.
    pub fn is_check(&self, us: Color) -> bool {
        self.pieces_of_kind(us, PieceKind::King)
            .into_iter()
            .any(|king| self.is_attacked(us.toggle(), king))
    }
}

//
// Hypothetical boards.
//
// The legality rules never make moves on the board they were given; instead they ask for a copy with the move
// applied and inspect that. `make_move` does the in-place work and is public for callers that want to play a game
// forward.
//

impl Board {
    /// Returns a copy of this board with the given move played.
    pub fn with_move_applied(&self, mov: Move) -> Result<Board, BoardError> {
        let mut next = self.clone();
        next.make_move(mov)?;
        Ok(next)
    }

    /// Returns a copy of this board where only the piece on `from` has moved to `to`. No other state changes. Used
    /// to ask whether a king would be attacked while crossing a square during a castle.
    pub fn with_piece_stepped(&self, from: Square, to: Square) -> Result<Board, BoardError> {
        let mut next = self.clone();
        let piece = next.remove_piece(from)?;
        next.add_piece(to, piece)?;
        Ok(next)
    }

    /// Makes a move on the board, updating all internal state to reflect the effects of the move. If the move does
    /// not fit the board, an error is returned and the board is left partially updated.
    pub fn make_move(&mut self, mov: Move) -> Result<(), BoardError> {
        let moving = self.remove_piece(mov.source())?;
        let us = moving.color;
        let them = us.toggle();

        if mov.is_capture() {
            // En-passant is the only capture whose victim does not stand on the destination square: it stands
            // behind it, on the capturing pawn's own rank.
            let target = if mov.is_en_passant() {
                Square::of(mov.source().rank(), mov.destination().file())
            } else {
                mov.destination()
            };

            self.remove_piece(target)?;
            if target == rook_corner(them, true) {
                self.castle_status.remove(CastleStatus::kingside(them));
            } else if target == rook_corner(them, false) {
                self.castle_status.remove(CastleStatus::queenside(them));
            }
        }

        if mov.is_castle() {
            let kingside = mov.is_kingside_castle();
            let rook = self.remove_piece(rook_corner(us, kingside))?;
            let rook_file = if kingside { FILE_F } else { FILE_D };
            self.add_piece(Square::of(us.back_rank(), rook_file), rook)?;
        }

        let landing = match mov.promotion_piece() {
            Some(kind) => Piece::new(us, kind),
            None => moving,
        };
        self.add_piece(mov.destination(), landing)?;

        self.en_passant_square = if mov.is_double_pawn_push() {
            mov.source().offset(0, us.pawn_direction())
        } else {
            None
        };

        match moving.kind {
            PieceKind::King => self.castle_status.remove(CastleStatus::both(us)),
            PieceKind::Rook if mov.source() == rook_corner(us, true) => {
                self.castle_status.remove(CastleStatus::kingside(us))
            }
            PieceKind::Rook if mov.source() == rook_corner(us, false) => {
                self.castle_status.remove(CastleStatus::queenside(us))
            }
            _ => {}
        }

        if mov.is_capture() || moving.is_pawn() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock = self.halfmove_clock.saturating_add(1);
        }

        if us == Color::Black {
            self.fullmove_clock = self.fullmove_clock.saturating_add(1);
        }

        self.side_to_move = them;
        Ok(())
    }
}

/// The square a color's rook starts on, on the kingside or queenside.
pub fn rook_corner(color: Color, kingside: bool) -> Square {
    let file = if kingside { FILE_H } else { FILE_A };
    Square::of(color.back_rank(), file)
}

/// The square a color's king starts on.
pub fn king_home(color: Color) -> Square {
    Square::of(color.back_rank(), FILE_E)
}

//
// FEN parsing and generation.
//

/// Possible errors that can arise when parsing a FEN string into a `Board`.
#[derive(Clone, PartialEq, Eq, Debug, Error)]
pub enum FenParseError {
    #[error("missing {0} field")]
    MissingField(&'static str),
    #[error("expected 8 ranks, found {0}")]
    WrongRankCount(usize),
    #[error("invalid digit")]
    InvalidDigit,
    #[error("rank does not sum to 8")]
    RankDoesNotSumToEight,
    #[error("unknown piece: {0}")]
    UnknownPiece(char),
    #[error("{0} has more than one king")]
    WrongKingCount(Color),
    #[error("invalid side to move")]
    InvalidSideToMove,
    #[error("invalid castle")]
    InvalidCastle,
    #[error("invalid en-passant")]
    InvalidEnPassant,
    #[error("invalid halfmove")]
    InvalidHalfmove,
    #[error("invalid fullmove")]
    InvalidFullmove,
    #[error("unexpected trailing input: {0:?}")]
    TrailingInput(String),
}

impl Board {
    pub fn from_start_position() -> Board {
        let mut board = Board::new();
        let back_rank = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        for color in core::colors() {
            for (file, kind) in core::files().zip(back_rank.iter().copied()) {
                board.sets_by_color[color as usize].insert(Square::of(color.back_rank(), file));
                board.sets_by_piece[piece_index(color, kind)]
                    .insert(Square::of(color.back_rank(), file));
                board.sets_by_color[color as usize].insert(Square::of(color.pawn_rank(), file));
                board.sets_by_piece[piece_index(color, PieceKind::Pawn)]
                    .insert(Square::of(color.pawn_rank(), file));
            }
        }

        board.castle_status = CastleStatus::WHITE | CastleStatus::BLACK;
        board
    }

    /// Constructs a new board from a FEN representation of a position. The two clock fields are optional and default
    /// to `0 1`.
    pub fn from_fen(fen: impl AsRef<str>) -> Result<Board, FenParseError> {
        let mut fields = fen.as_ref().split_whitespace();
        let mut board = Board::new();

        let placement = fields
            .next()
            .ok_or(FenParseError::MissingField("piece placement"))?;
        let rank_strs: Vec<_> = placement.split('/').collect();
        if rank_strs.len() != 8 {
            return Err(FenParseError::WrongRankCount(rank_strs.len()));
        }

        for (rank, rank_str) in core::ranks().rev().zip(rank_strs) {
            let mut file = 0u8;
            for c in rank_str.chars() {
                if let Some(skip) = c.to_digit(10) {
                    if !(1..=8).contains(&skip) {
                        return Err(FenParseError::InvalidDigit);
                    }

                    file += skip as u8;
                    if file > 8 {
                        return Err(FenParseError::RankDoesNotSumToEight);
                    }

                    continue;
                }

                let piece = Piece::try_from(c).map_err(|_| FenParseError::UnknownPiece(c))?;
                let file_idx =
                    File::try_from(file).map_err(|_| FenParseError::RankDoesNotSumToEight)?;
                board.sets_by_color[piece.color as usize].insert(Square::of(rank, file_idx));
                board.sets_by_piece[piece_index(piece.color, piece.kind)]
                    .insert(Square::of(rank, file_idx));
                file += 1;
            }

            if file != 8 {
                return Err(FenParseError::RankDoesNotSumToEight);
            }
        }

        for color in core::colors() {
            if board.pieces_of_kind(color, PieceKind::King).len() > 1 {
                return Err(FenParseError::WrongKingCount(color));
            }
        }

        board.side_to_move = match fields.next() {
            Some("w") => Color::White,
            Some("b") => Color::Black,
            Some(_) => return Err(FenParseError::InvalidSideToMove),
            None => return Err(FenParseError::MissingField("side to move")),
        };

        let castle = fields
            .next()
            .ok_or(FenParseError::MissingField("castle status"))?;
        if castle != "-" {
            for c in castle.chars() {
                let right = match c {
                    'K' => CastleStatus::WHITE_KINGSIDE,
                    'Q' => CastleStatus::WHITE_QUEENSIDE,
                    'k' => CastleStatus::BLACK_KINGSIDE,
                    'q' => CastleStatus::BLACK_QUEENSIDE,
                    _ => return Err(FenParseError::InvalidCastle),
                };

                board.castle_status |= right;
            }
        }

        let en_passant = fields
            .next()
            .ok_or(FenParseError::MissingField("en-passant square"))?;
        if en_passant != "-" {
            let square: Square = en_passant
                .parse()
                .map_err(|_| FenParseError::InvalidEnPassant)?;
            // The target is the square the opponent's double push just skipped.
            let target_rank = match board.side_to_move {
                Color::White => RANK_6,
                Color::Black => RANK_3,
            };

            if square.rank() != target_rank {
                return Err(FenParseError::InvalidEnPassant);
            }

            board.en_passant_square = Some(square);
        }

        if let Some(halfmove) = fields.next() {
            board.halfmove_clock = halfmove
                .parse()
                .map_err(|_| FenParseError::InvalidHalfmove)?;
        }

        if let Some(fullmove) = fields.next() {
            board.fullmove_clock = fullmove
                .parse()
                .map_err(|_| FenParseError::InvalidFullmove)?;
        }

        if let Some(rest) = fields.next() {
            return Err(FenParseError::TrailingInput(rest.to_owned()));
        }

        Ok(board)
    }

    pub fn as_fen(&self) -> String {
        let mut ranks = Vec::with_capacity(8);
        for rank in core::ranks().rev() {
            let mut buf = String::new();
            let mut empty_squares = 0;
            for file in core::files() {
                match self.piece_at(Square::of(rank, file)) {
                    Some(piece) => {
                        if empty_squares != 0 {
                            buf.push_str(&empty_squares.to_string());
                            empty_squares = 0;
                        }
                        buf.push_str(&piece.to_string());
                    }
                    None => empty_squares += 1,
                }
            }

            if empty_squares != 0 {
                buf.push_str(&empty_squares.to_string());
            }

            ranks.push(buf);
        }

        let side = match self.side_to_move {
            Color::White => "w",
            Color::Black => "b",
        };

        let mut castle = String::new();
        for (right, c) in [
            (CastleStatus::WHITE_KINGSIDE, 'K'),
            (CastleStatus::WHITE_QUEENSIDE, 'Q'),
            (CastleStatus::BLACK_KINGSIDE, 'k'),
            (CastleStatus::BLACK_QUEENSIDE, 'q'),
        ] {
            if self.castle_status.contains(right) {
                castle.push(c);
            }
        }

        if castle.is_empty() {
            castle.push('-');
        }

        let en_passant = self
            .en_passant_square
            .map(|sq| sq.to_string())
            .unwrap_or_else(|| "-".to_owned());

        format!(
            "{} {} {} {} {} {}",
            ranks.join("/"),
            side,
            castle,
            en_passant,
            self.halfmove_clock,
            self.fullmove_clock
        )
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for rank in core::ranks().rev() {
            for file in core::files() {
                match self.piece_at(Square::of(rank, file)) {
                    Some(piece) => write!(f, " {} ", piece)?,
                    None => write!(f, " . ")?,
                }
            }

            writeln!(f, "| {}", rank)?;
        }

        writeln!(f, "{}", "---".repeat(8))?;
        for file in core::files() {
            write!(f, " {} ", file)?;
        }

        writeln!(f)
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

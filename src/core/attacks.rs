// Copyright 2017-2022 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Attack sets for every kind of piece. Leapers (knights, kings, pawns) are served from tables built once on first
//! use; sliders walk their rays against an occupancy set.

use lazy_static::lazy_static;

use crate::core::*;

const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

const ROOK_DIRECTIONS: [Direction; 4] = [
    Direction::North,
    Direction::East,
    Direction::South,
    Direction::West,
];

const BISHOP_DIRECTIONS: [Direction; 4] = [
    Direction::NorthEast,
    Direction::SouthEast,
    Direction::SouthWest,
    Direction::NorthWest,
];

struct LeaperTable {
    table: [SquareSet; 64],
}

impl LeaperTable {
    fn new(steps: &[(i8, i8)]) -> LeaperTable {
        let mut lt = LeaperTable {
            table: [SquareSet::empty(); 64],
        };

        for sq in squares() {
            lt.table[sq.index()] = steps
                .iter()
                .filter_map(|&(files, ranks)| sq.offset(files, ranks))
                .collect();
        }

        lt
    }

    fn attacks(&self, sq: Square) -> SquareSet {
        self.table[sq.index()]
    }
}

struct PawnTable {
    table: [[SquareSet; 2]; 64],
}

impl PawnTable {
    fn new() -> PawnTable {
        let mut pt = PawnTable {
            table: [[SquareSet::empty(); 2]; 64],
        };

        for sq in squares() {
            for color in colors() {
                let forward = color.pawn_direction();
                pt.table[sq.index()][color as usize] = [-1, 1]
                    .iter()
                    .filter_map(|&files| sq.offset(files, forward))
                    .collect();
            }
        }

        pt
    }

    fn attacks(&self, sq: Square, color: Color) -> SquareSet {
        self.table[sq.index()][color as usize]
    }
}

fn king_steps() -> Vec<(i8, i8)> {
    Direction::ALL.iter().map(|dir| dir.as_offset()).collect()
}

lazy_static! {
    static ref KING_TABLE: LeaperTable = LeaperTable::new(&king_steps());
    static ref KNIGHT_TABLE: LeaperTable = LeaperTable::new(&KNIGHT_JUMPS);
    static ref PAWN_TABLE: PawnTable = PawnTable::new();
}

fn slider_attacks(sq: Square, occupancy: SquareSet, dirs: &[Direction]) -> SquareSet {
    let mut attacks = SquareSet::empty();
    for &dir in dirs {
        let mut cursor = sq;
        while let Some(next) = cursor.towards(dir) {
            attacks.insert(next);
            if occupancy.contains(next) {
                break;
            }

            cursor = next;
        }
    }

    attacks
}

/// The squares a pawn of the given color on `sq` attacks diagonally. Pushes are not attacks.
pub fn pawn_attacks(sq: Square, color: Color) -> SquareSet {
    PAWN_TABLE.attacks(sq, color)
}

pub fn knight_attacks(sq: Square) -> SquareSet {
    KNIGHT_TABLE.attacks(sq)
}

pub fn king_attacks(sq: Square) -> SquareSet {
    KING_TABLE.attacks(sq)
}

pub fn bishop_attacks(sq: Square, occupancy: SquareSet) -> SquareSet {
    slider_attacks(sq, occupancy, &BISHOP_DIRECTIONS)
}

pub fn rook_attacks(sq: Square, occupancy: SquareSet) -> SquareSet {
    slider_attacks(sq, occupancy, &ROOK_DIRECTIONS)
}

pub fn queen_attacks(sq: Square, occupancy: SquareSet) -> SquareSet {
    bishop_attacks(sq, occupancy) | rook_attacks(sq, occupancy)
}

/// The squares attacked by a piece of the given kind and color on `sq`, with sliders stopping at (and including) the
/// first occupied square on each ray.
pub fn attacks(kind: PieceKind, color: Color, sq: Square, occupancy: SquareSet) -> SquareSet {
    match kind {
        PieceKind::Pawn => pawn_attacks(sq, color),
        PieceKind::Knight => knight_attacks(sq),
        PieceKind::Bishop => bishop_attacks(sq, occupancy),
        PieceKind::Rook => rook_attacks(sq, occupancy),
        PieceKind::Queen => queen_attacks(sq, occupancy),
        PieceKind::King => king_attacks(sq),
    }
}

#[cfg(test)]
mod tests {
    use crate::core::*;

    #[test]
    fn knight_in_corner() {
        let attacks = knight_attacks(A1);
        assert_eq!(2, attacks.len());
        assert!(attacks.contains(B3));
        assert!(attacks.contains(C2));
    }

    #[test]
    fn king_in_center() {
        assert_eq!(8, king_attacks(E4).len());
        assert_eq!(3, king_attacks(H8).len());
    }

    #[test]
    fn pawn_attacks_by_color() {
        let white = pawn_attacks(E4, Color::White);
        assert!(white.contains(D5) && white.contains(F5));
        let black = pawn_attacks(A5, Color::Black);
        assert_eq!(1, black.len());
        assert!(black.contains(B4));
    }

    #[test]
    fn rook_stops_at_blocker() {
        let occupancy = SquareSet::single(E6);
        let attacks = rook_attacks(E2, occupancy);
        assert!(attacks.contains(E6));
        assert!(!attacks.contains(E7));
        assert!(attacks.contains(A2));
        assert!(attacks.contains(E1));
    }

    #[test]
    fn queen_is_rook_and_bishop() {
        let occupancy = SquareSet::empty();
        assert_eq!(
            queen_attacks(D4, occupancy),
            rook_attacks(D4, occupancy) | bishop_attacks(D4, occupancy)
        );
        assert_eq!(27, queen_attacks(D4, occupancy).len());
    }
}

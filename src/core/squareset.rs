// Copyright 2021-2022 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::core::{self, Direction, Square};
use std::fmt;
use std::iter::FromIterator;
use std::ops;

/// A set of squares on the chessboard, one bit per square. The API mirrors [`std::collections::HashSet`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct SquareSet(u64);

impl SquareSet {
    /// Creates a new, empty SquareSet.
    pub const fn empty() -> SquareSet {
        SquareSet(0)
    }

    pub const fn single(square: Square) -> SquareSet {
        SquareSet(1u64 << square.0)
    }

    /// Tests whether or not the given square is contained within this SquareSet.
    pub const fn contains(&self, square: Square) -> bool {
        self.0 & (1u64 << square.0) != 0
    }

    pub fn insert(&mut self, square: Square) {
        self.0 |= 1u64 << square.0;
    }

    pub fn remove(&mut self, square: Square) {
        self.0 &= !(1u64 << square.0);
    }

    pub const fn len(&self) -> u32 {
        self.0.count_ones()
    }

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Returns the lowest-numbered square in the set, if any.
    pub fn first(self) -> Option<Square> {
        self.into_iter().next()
    }

    pub const fn and(self, other: SquareSet) -> SquareSet {
        SquareSet(self.0 & other.0)
    }

    pub const fn or(self, other: SquareSet) -> SquareSet {
        SquareSet(self.0 | other.0)
    }

    pub const fn not(self) -> SquareSet {
        SquareSet(!self.0)
    }

    /// The squares strictly between `a` and `b`, exclusive of both. Empty if the two squares do not share a rank,
    /// file, or diagonal, or if they are adjacent.
    pub fn between(a: Square, b: Square) -> SquareSet {
        let files = b.file().as_u8() as i8 - a.file().as_u8() as i8;
        let ranks = b.rank().as_u8() as i8 - a.rank().as_u8() as i8;
        let dir = match Direction::of_delta(files, ranks) {
            Some(dir) => dir,
            None => return SquareSet::empty(),
        };

        let mut set = SquareSet::empty();
        let mut cursor = a;
        while let Some(next) = cursor.towards(dir) {
            if next == b {
                break;
            }

            set.insert(next);
            cursor = next;
        }

        set
    }
}

impl ops::BitOr for SquareSet {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.or(rhs)
    }
}

impl ops::BitOrAssign for SquareSet {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl ops::BitAnd for SquareSet {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        self.and(rhs)
    }
}

impl ops::Not for SquareSet {
    type Output = Self;

    fn not(self) -> Self::Output {
        SquareSet(!self.0)
    }
}

impl FromIterator<Square> for SquareSet {
    fn from_iter<I: IntoIterator<Item = Square>>(iter: I) -> Self {
        let mut set = SquareSet::empty();
        for square in iter {
            set.insert(square);
        }

        set
    }
}

impl IntoIterator for SquareSet {
    type Item = Square;
    type IntoIter = SquareSetIterator;

    fn into_iter(self) -> Self::IntoIter {
        SquareSetIterator(self.0)
    }
}

impl fmt::Display for SquareSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in core::ranks().rev() {
            for file in core::files() {
                let mark = if self.contains(Square::of(rank, file)) {
                    '1'
                } else {
                    '.'
                };
                write!(f, " {} ", mark)?;
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

/// An iterator over squares stored in a [`SquareSet`], lowest square first.
pub struct SquareSetIterator(u64);

impl Iterator for SquareSetIterator {
    type Item = Square;

    fn next(&mut self) -> Option<Self::Item> {
        if self.0 == 0 {
            return None;
        }

        let next = self.0.trailing_zeros() as u8;
        self.0 &= self.0 - 1;
        Some(Square(next))
    }
}

#[cfg(test)]
mod tests {
    use super::SquareSet;
    use crate::core::*;

    #[test]
    fn test_set_clear() {
        let mut set = SquareSet::empty();
        assert!(!set.contains(A1));
        set.insert(A1);
        assert!(set.contains(A1));
        set.remove(A1);
        assert!(!set.contains(A1));
    }

    #[test]
    fn iter() {
        let set: SquareSet = vec![A5, A3, A4].into_iter().collect();
        assert_eq!(set.len(), 3);
        let squares: Vec<_> = set.into_iter().collect();
        assert_eq!(squares, vec![A3, A4, A5]);
    }

    #[test]
    fn between_on_rank() {
        let squares: Vec<_> = SquareSet::between(E1, H1).into_iter().collect();
        assert_eq!(squares, vec![F1, G1]);
        assert_eq!(SquareSet::between(E1, H1), SquareSet::between(H1, E1));
    }

    #[test]
    fn between_on_diagonal() {
        let squares: Vec<_> = SquareSet::between(C1, F4).into_iter().collect();
        assert_eq!(squares, vec![D2, E3]);
    }

    #[test]
    fn between_unaligned_or_adjacent() {
        assert!(SquareSet::between(B1, C3).is_empty());
        assert!(SquareSet::between(E4, E5).is_empty());
        assert!(SquareSet::between(E4, E4).is_empty());
    }
}

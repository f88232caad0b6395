//! Provides a representation of sets of squares on the board
//
//  Copyright 2019 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
//! # Moves and Attacks
//! Besides the [`Bitboard`](struct.Bitboard.html) type, this module provides functions that compute
//! the squares a piece can reach from a given square. The word "attacks" is used for the squares a
//! piece threatens; for every piece but the pawn and the king, those are also the squares it can
//! move to (minus squares held by its own side).
//!
//! ## Leapers (Knights and Kings)
//! A knight on h1 attacks f2 and g3:
//!
//! ```rust
//! use gambit::chess::Square;
//! use gambit::chess::bitboard::knight_attacks;
//!
//! let mut attacks = knight_attacks(Square::H1);
//! assert_eq!(attacks.pop(), Some(Square::F2));
//! assert_eq!(attacks.pop(), Some(Square::G3));
//! assert_eq!(attacks.pop(), None);
//! ```
//!
//! ## Sliding Attacks (Bishops, Rooks and Queens)
//! Sliding pieces are stopped by the first occupied square in each direction. That square is
//! included in the result whatever its color.
//!
//! ```rust
//! use gambit::chess::Square;
//! use gambit::chess::bitboard::{Bitboard, rook_attacks};
//!
//! let occ = Bitboard::from(Square::A2) | Square::C1.into();
//! let mut attacks = rook_attacks(Square::A1, occ);
//! assert_eq!(attacks.pop(), Some(Square::B1));
//! assert_eq!(attacks.pop(), Some(Square::C1));
//! assert_eq!(attacks.pop(), Some(Square::A2));
//! assert_eq!(attacks.pop(), None);
//! ```
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::convert::TryInto;
use std::iter::FusedIterator;
use std::iter::{FromIterator, Extend};
use std::ops;
use std::fmt;
use super::*;

mod attacks;
pub use attacks::*;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A set of squares with each bit representing one square
///
/// Bit `n` of the inner value is set when the square numbered `n` is in the set. Squares are
/// numbered rank by rank, starting from the bottom left corner as seen by `White`:
///
/// ```text
///     a    b    c    d    e    f    g    h
///    ---------------------------------------
/// 8 | 56 | 57 | 58 | 59 | 60 | 61 | 62 | 63 | 8
///    ---------------------------------------
/// 7 | 48 | 49 | 50 | 51 | 52 | 53 | 54 | 55 | 7
///    ---------------------------------------
///                       ...
///    ---------------------------------------
/// 2 | 08 | 09 | 10 | 11 | 12 | 13 | 14 | 15 | 2
///    ---------------------------------------
/// 1 | 00 | 01 | 02 | 03 | 04 | 05 | 06 | 07 | 1
///    ---------------------------------------
///     a    b    c    d    e    f    g    h
/// ```
///
/// `Bitboard` implements the bit-wise logic operators `|`, `&`, `^`, `!`, `|=`, `&=`, and `^=`,
/// along with set-like methods such as `insert`, `remove`, `len`, and `contains`. It is `Copy`, so
/// iterating over it consumes a copy rather than borrowing.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct Bitboard(u64);

impl Bitboard {
    /// Every square on the board
    pub const ALL: Bitboard = Bitboard(!0);

    #[allow(missing_docs)] pub const FILE_A: Bitboard = Bitboard(0x0101_0101_0101_0101);
    #[allow(missing_docs)] pub const FILE_B: Bitboard = Bitboard(0x0202_0202_0202_0202);
    #[allow(missing_docs)] pub const FILE_C: Bitboard = Bitboard(0x0404_0404_0404_0404);
    #[allow(missing_docs)] pub const FILE_D: Bitboard = Bitboard(0x0808_0808_0808_0808);
    #[allow(missing_docs)] pub const FILE_E: Bitboard = Bitboard(0x1010_1010_1010_1010);
    #[allow(missing_docs)] pub const FILE_F: Bitboard = Bitboard(0x2020_2020_2020_2020);
    #[allow(missing_docs)] pub const FILE_G: Bitboard = Bitboard(0x4040_4040_4040_4040);
    #[allow(missing_docs)] pub const FILE_H: Bitboard = Bitboard(0x8080_8080_8080_8080);

    #[allow(missing_docs)] pub const RANK_1: Bitboard = Bitboard(0x0000_0000_0000_00ff);
    #[allow(missing_docs)] pub const RANK_2: Bitboard = Bitboard(0x0000_0000_0000_ff00);
    #[allow(missing_docs)] pub const RANK_3: Bitboard = Bitboard(0x0000_0000_00ff_0000);
    #[allow(missing_docs)] pub const RANK_4: Bitboard = Bitboard(0x0000_0000_ff00_0000);
    #[allow(missing_docs)] pub const RANK_5: Bitboard = Bitboard(0x0000_00ff_0000_0000);
    #[allow(missing_docs)] pub const RANK_6: Bitboard = Bitboard(0x0000_ff00_0000_0000);
    #[allow(missing_docs)] pub const RANK_7: Bitboard = Bitboard(0x00ff_0000_0000_0000);
    #[allow(missing_docs)] pub const RANK_8: Bitboard = Bitboard(0xff00_0000_0000_0000);

    /// Creates a new, empty bitboard
    pub fn new() -> Bitboard {
        Default::default()
    }

    /// Returns the number of squares in the bitboard
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Returns `true` if the bitboard is empty
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if the bitboard contains `sq`
    pub fn contains(self, sq: Square) -> bool {
        !(self & sq.into()).is_empty()
    }

    /// Returns `true` if `self` intersects `other`
    pub fn intersects(self, other: Bitboard) -> bool {
        !(self & other).is_empty()
    }

    /// Returns `true` if `self` does not intersect `other`
    pub fn is_disjoint(self, other: Bitboard) -> bool {
        (self & other).is_empty()
    }

    /// Adds a square to the bitboard if it is not already present
    pub fn insert(&mut self, sq: Square) {
        *self |= sq.into();
    }

    /// Removes a square from the bitboard if it is present
    pub fn remove(&mut self, sq: Square) {
        *self &= !Bitboard::from(sq);
    }

    /// Removes the lowest-numbered square from the bitboard and returns it
    pub fn pop(&mut self) -> Option<Square> {
        let sq = self.peek()?;
        // clear the least significant bit
        self.0 &= self.0 - 1;

        Some(sq)
    }

    /// Returns the square that would be removed by a pop command
    pub fn peek(self) -> Option<Square> {
        if self.0 > 0 {
            Some((self.0.trailing_zeros() as usize).try_into().expect("INFALLIBLE"))
        } else {
            None
        }
    }

    /// Shifts every square by `bits` positions: toward `H8` when positive, toward `A1` when
    /// negative
    ///
    /// Squares shifted off the board are dropped. Shifting across the side edges wraps to the
    /// neighbouring rank, so callers mask with a file mask first.
    ///
    /// ```rust
    /// # use gambit::chess::Square;
    /// # use gambit::chess::bitboard::Bitboard;
    /// #
    /// assert_eq!(Bitboard::from(Square::E2).shift(8), Bitboard::from(Square::E3));
    /// assert_eq!(Bitboard::from(Square::E2).shift(-9), Bitboard::from(Square::D1));
    /// assert_eq!(Bitboard::from(Square::H8).shift(1), Bitboard::new());
    /// ```
    pub fn shift(self, bits: i32) -> Bitboard {
        match bits {
            b if b >= 64 || b <= -64 => Bitboard(0),
            b if b >= 0 => Bitboard(self.0 << b),
            b => Bitboard(self.0 >> -b),
        }
    }
}

impl ops::Not for Bitboard {
    type Output = Self;

    fn not(self) -> Self::Output {
        Bitboard(!self.0)
    }
}

impl ops::BitAnd for Bitboard {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Bitboard(self.0 & rhs.0)
    }
}

impl ops::BitAndAssign for Bitboard {
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0
    }
}

impl ops::BitOr for Bitboard {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Bitboard(self.0 | rhs.0)
    }
}

impl ops::BitOrAssign for Bitboard {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0
    }
}

impl ops::BitXor for Bitboard {
    type Output = Self;

    fn bitxor(self, rhs: Self) -> Self::Output {
        Bitboard(self.0 ^ rhs.0)
    }
}

impl ops::BitXorAssign for Bitboard {
    fn bitxor_assign(&mut self, rhs: Self) {
        self.0 ^= rhs.0
    }
}

impl fmt::Display for Bitboard {
    /// Draws the set as an 8x8 grid, rank 8 at the top, with `x` for members and `.` otherwise.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::ALL.iter().rev() {
            for file in File::ALL.iter() {
                let c = if self.contains(Square::from_coord(*file, *rank)) { 'x' } else { '.' };
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::LowerHex for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl fmt::Binary for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<u64> for Bitboard {
    fn from(val: u64) -> Bitboard {
        Bitboard(val)
    }
}

impl From<Square> for Bitboard {
    fn from(sq: Square) -> Bitboard {
        Bitboard(1 << sq as u64)
    }
}

impl From<File> for Bitboard {
    fn from(f: File) -> Bitboard {
        Bitboard(Bitboard::FILE_A.0 << f as u64)
    }
}

impl From<Rank> for Bitboard {
    fn from(r: Rank) -> Bitboard {
        Bitboard(Bitboard::RANK_1.0 << (8 * r as u64))
    }
}

impl IntoIterator for Bitboard {
    type Item = Square;
    type IntoIter = IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter(self)
    }
}

impl FromIterator<Square> for Bitboard {
    fn from_iter<I: IntoIterator<Item=Square>>(iter: I) -> Self {
        let mut bd = Bitboard::new();
        bd.extend(iter);
        bd
    }
}

impl Extend<Square> for Bitboard {
    fn extend<I: IntoIterator<Item=Square>>(&mut self, iter: I) {
        for sq in iter {
            self.insert(sq);
        }
    }
}

/// Iterator over the squares of a `Bitboard`, lowest-numbered first
#[derive(Debug, Copy, Clone)]
pub struct IntoIter(Bitboard);

impl Iterator for IntoIter {
    type Item = Square;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.pop()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.0.len(), Some(self.0.len()))
    }
}

impl ExactSizeIterator for IntoIter { }

impl FusedIterator for IntoIter { }

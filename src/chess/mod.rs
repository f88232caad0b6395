//! The `chess` module implements the rules of chess on top of bitboards.
//
//  Copyright 2019 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::ops;
use std::fmt;
use std::str::FromStr;
use std::convert::TryFrom;
use error::{Error, Result};

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Which side a piece or player is on, based on the color of the pieces for that side.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Color {
    /// The number of colors
    pub const COUNT: usize = 2;

    /// Both colors, white first
    pub const ALL: [Color; Color::COUNT] = [Color::White, Color::Black];

    /// Returns `1` for white and `-1` for black.
    pub fn sign(self) -> i32 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// Returns the rank the color's pieces start on.
    pub fn home_rank(self) -> Rank {
        match self {
            Color::White => Rank::R1,
            Color::Black => Rank::R8,
        }
    }
}

impl ops::Not for Color {
    type Output = Color;

    /// Returns the opposite color
    ///
    /// # Example
    /// ```
    /// use gambit::chess::Color;
    /// assert_eq!(!Color::White, Color::Black);
    /// assert_eq!(!Color::Black, Color::White);
    /// ```
    fn not(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => 'w'.fmt(f),
            Color::Black => 'b'.fmt(f),
        }
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "w" => Ok(Color::White),
            "b" => Ok(Color::Black),
            _   => Err(Error::InvalidColor),
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::White
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// The type of a chess piece. An empty square is represented by `Option::<Piece>::None`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum Piece {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

impl Piece {
    /// The number of piece types
    pub const COUNT: usize = Piece::King as usize + 1;

    /// All piece types, from pawn to king
    pub const ALL: [Piece; Piece::COUNT] = [
        Piece::Pawn, Piece::Knight, Piece::Bishop, Piece::Rook, Piece::Queen, Piece::King,
    ];

    /// Pieces a pawn may promote to, in the order they are generated
    pub const PROMOTIONS: [Piece; 4] = [Piece::Queen, Piece::Rook, Piece::Bishop, Piece::Knight];

    /// Returns the FEN letter for the piece: uppercase for white, lowercase for black.
    pub fn symbol(self, color: Color) -> char {
        let c = match self {
            Piece::Pawn => 'P',
            Piece::Knight => 'N',
            Piece::Bishop => 'B',
            Piece::Rook => 'R',
            Piece::Queen => 'Q',
            Piece::King => 'K',
        };

        match color {
            Color::White => c,
            Color::Black => c.to_ascii_lowercase(),
        }
    }

    /// Returns the color and piece for a FEN letter.
    pub fn from_symbol(c: char) -> Option<(Color, Piece)> {
        let piece = match c.to_ascii_uppercase() {
            'P' => Piece::Pawn,
            'N' => Piece::Knight,
            'B' => Piece::Bishop,
            'R' => Piece::Rook,
            'Q' => Piece::Queen,
            'K' => Piece::King,
            _ => return None,
        };
        let color = if c.is_ascii_uppercase() { Color::White } else { Color::Black };

        Some((color, piece))
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.symbol(Color::White).fmt(f)
    }
}

impl FromStr for Piece {
    type Err = Error;

    /// Accepts a piece letter in either case or the piece's English name.
    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "p" | "pawn" => Ok(Piece::Pawn),
            "n" | "knight" => Ok(Piece::Knight),
            "b" | "bishop" => Ok(Piece::Bishop),
            "r" | "rook" => Ok(Piece::Rook),
            "q" | "queen" => Ok(Piece::Queen),
            "k" | "king" => Ok(Piece::King),
            _ => Err(Error::InvalidPiece),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Vertical column of the board, labeled from left to right from `White`'s perspective as
/// `A` through `H`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum File {
    A = 0, B = 1, C = 2, D = 3, E = 4, F = 5, G = 6, H = 7,
}

impl File {
    /// The number of files
    pub const COUNT: usize = File::H as usize + 1;

    /// All files from `A` to `H`
    pub const ALL: [File; File::COUNT] = [
        File::A, File::B, File::C, File::D, File::E, File::F, File::G, File::H,
    ];
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        ((b'a' + *self as u8) as char).fmt(f)
    }
}

impl TryFrom<usize> for File {
    type Error = Error;

    fn try_from(value: usize) -> Result<Self> {
        File::ALL.get(value).copied().ok_or(Error::TryFromIntError)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Horizontal row of the board, labeled from nearest to farthest from `White`'s perspective
/// as `R1` through `R8`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum Rank {
    R1 = 0, R2 = 1, R3 = 2, R4 = 3, R5 = 4, R6 = 5, R7 = 6, R8 = 7,
}

impl Rank {
    /// The number of ranks
    pub const COUNT: usize = Rank::R8 as usize + 1;

    /// All ranks from `R1` to `R8`
    pub const ALL: [Rank; Rank::COUNT] = [
        Rank::R1, Rank::R2, Rank::R3, Rank::R4, Rank::R5, Rank::R6, Rank::R7, Rank::R8,
    ];
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (*self as usize + 1).fmt(f)
    }
}

impl TryFrom<usize> for Rank {
    type Error = Error;

    fn try_from(value: usize) -> Result<Self> {
        Rank::ALL.get(value).copied().ok_or(Error::TryFromIntError)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A specific square on the board. Squares are numbered rank by rank, so `A1` is 0, `B1` is 1 and
/// `H8` is 63.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum Square {
    A1 =  0, B1 =  1, C1 =  2, D1 =  3, E1 =  4, F1 =  5, G1 =  6, H1 =  7,
    A2 =  8, B2 =  9, C2 = 10, D2 = 11, E2 = 12, F2 = 13, G2 = 14, H2 = 15,
    A3 = 16, B3 = 17, C3 = 18, D3 = 19, E3 = 20, F3 = 21, G3 = 22, H3 = 23,
    A4 = 24, B4 = 25, C4 = 26, D4 = 27, E4 = 28, F4 = 29, G4 = 30, H4 = 31,
    A5 = 32, B5 = 33, C5 = 34, D5 = 35, E5 = 36, F5 = 37, G5 = 38, H5 = 39,
    A6 = 40, B6 = 41, C6 = 42, D6 = 43, E6 = 44, F6 = 45, G6 = 46, H6 = 47,
    A7 = 48, B7 = 49, C7 = 50, D7 = 51, E7 = 52, F7 = 53, G7 = 54, H7 = 55,
    A8 = 56, B8 = 57, C8 = 58, D8 = 59, E8 = 60, F8 = 61, G8 = 62, H8 = 63,
}

use Square::*;

const SQUARES: [Square; Square::COUNT] = [
    A1, B1, C1, D1, E1, F1, G1, H1,
    A2, B2, C2, D2, E2, F2, G2, H2,
    A3, B3, C3, D3, E3, F3, G3, H3,
    A4, B4, C4, D4, E4, F4, G4, H4,
    A5, B5, C5, D5, E5, F5, G5, H5,
    A6, B6, C6, D6, E6, F6, G6, H6,
    A7, B7, C7, D7, E7, F7, G7, H7,
    A8, B8, C8, D8, E8, F8, G8, H8,
];

const SQUARE_NAMES: [&str; Square::COUNT] = [
    "a1", "b1", "c1", "d1", "e1", "f1", "g1", "h1",
    "a2", "b2", "c2", "d2", "e2", "f2", "g2", "h2",
    "a3", "b3", "c3", "d3", "e3", "f3", "g3", "h3",
    "a4", "b4", "c4", "d4", "e4", "f4", "g4", "h4",
    "a5", "b5", "c5", "d5", "e5", "f5", "g5", "h5",
    "a6", "b6", "c6", "d6", "e6", "f6", "g6", "h6",
    "a7", "b7", "c7", "d7", "e7", "f7", "g7", "h7",
    "a8", "b8", "c8", "d8", "e8", "f8", "g8", "h8",
];

impl Square {
    /// The number of squares
    pub const COUNT: usize = 64;

    /// Returns a square from its file and rank
    pub fn from_coord(file: File, rank: Rank) -> Square {
        SQUARES[rank as usize * File::COUNT + file as usize]
    }

    /// Returns the square's file
    pub fn file(self) -> File {
        File::ALL[self as usize % File::COUNT]
    }

    /// Returns the square's rank
    pub fn rank(self) -> Rank {
        Rank::ALL[self as usize / File::COUNT]
    }

    /// Returns the square's name in algebraic notation, such as `"e4"`.
    pub fn name(self) -> &'static str {
        SQUARE_NAMES[self as usize]
    }

    /// Returns the square mirrored vertically (`A1` becomes `A8`).
    pub fn flip_rank(self) -> Square {
        SQUARES[self as usize ^ 0o70]
    }

    /// Returns an iterator over all 64 squares, from `A1` to `H8`.
    pub fn iter() -> impl Iterator<Item = Square> {
        SQUARES.iter().copied()
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.name().fmt(f)
    }
}

impl FromStr for Square {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.as_bytes() {
            [file @ b'a'..=b'h', rank @ b'1'..=b'8'] => {
                Ok(SQUARES[(file - b'a') as usize + (rank - b'1') as usize * File::COUNT])
            },
            _ => Err(Error::InvalidSquare),
        }
    }
}

impl Default for Square {
    fn default() -> Self {
        Square::A1
    }
}

impl TryFrom<usize> for Square {
    type Error = Error;

    fn try_from(value: usize) -> Result<Self> {
        SQUARES.get(value).copied().ok_or(Error::TryFromIntError)
    }
}

impl From<Square> for usize {
    fn from(value: Square) -> Self {
        value as Self
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
pub mod bitboard;
mod moves;
mod outcome;
mod position;
pub use moves::Move;
pub use outcome::{GameResult, WinReason, DrawReason};
pub use position::{Position, CastlingFlags};
pub use position::zobrist::{Zobrist, ZobristKeys, Hasher, KeyTableError};

pub mod variations;

pub mod error;

#[cfg(test)]
mod color_tests {
    use super::Color;

    #[test]
    fn display_and_fromstr_agree() {
        for c in Color::ALL.iter().copied() {
            assert_eq!(c.to_string().parse::<Color>(), Ok(c));
        }
        assert!("x".parse::<Color>().is_err());
    }

    #[test]
    fn not_is_an_involution() {
        for c in Color::ALL.iter().copied() {
            assert_ne!(!c, c);
            assert_eq!(!!c, c);
        }
    }
}


#[cfg(test)]
mod square_tests {
    use std::convert::TryFrom;
    use super::{File, Rank, Square};

    #[test]
    fn squares_are_numbered_rank_by_rank() {
        assert_eq!(Square::A1 as usize, 0);
        assert_eq!(Square::B1 as usize, 1);
        assert_eq!(Square::A2 as usize, 8);
        assert_eq!(Square::H8 as usize, 63);
    }

    #[test]
    fn file_and_rank_methods_match_from_coord() {
        for f in File::ALL.iter().copied() {
            for r in Rank::ALL.iter().copied() {
                let s = Square::from_coord(f, r);
                assert_eq!(f, s.file());
                assert_eq!(r, s.rank());
                assert_eq!(s as usize, f as usize + r as usize * 8);
            }
        }
    }

    #[test]
    fn display_and_fromstr_traits_match_file_and_rank() {
        for s in Square::iter() {
            assert_eq!(s.to_string(), format!("{}{}", s.file(), s.rank()));
            assert_eq!(s.to_string().parse::<Square>(), Ok(s));
        }
    }

    #[test]
    fn fromstr_trait_produces_errors_when_it_should() {
        assert!("a".parse::<Square>().is_err());
        assert!("1".parse::<Square>().is_err());
        assert!("a9".parse::<Square>().is_err());
        assert!("i1".parse::<Square>().is_err());
        assert!("a1x".parse::<Square>().is_err());
    }

    #[test]
    fn usize_conversions_are_consistent() {
        for i in 0..Square::COUNT {
            let s = Square::try_from(i).expect("in range");
            assert_eq!(usize::from(s), i);
        }
        assert!(Square::try_from(Square::COUNT).is_err());
    }

    #[test]
    fn flip_rank_mirrors_vertically() {
        assert_eq!(Square::A1.flip_rank(), Square::A8);
        assert_eq!(Square::E2.flip_rank(), Square::E7);
        assert_eq!(Square::H5.flip_rank(), Square::H4);
    }
}

//! Defines the error types needed by the chess module
//
//  Copyright 2019 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::fmt;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Error type used by methods in the `chess` module and by the game loop
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Error {
    /// Unexpected character in the piece placement field of a FEN string
    InvalidCharacter(char),
    /// Piece placement has the wrong number of ranks (the count found is included)
    WrongRankCount(usize),
    /// A rank in the piece placement describes more or fewer than eight squares
    WrongRankLength,
    /// A required FEN field is missing
    MissingField(&'static str),
    /// Half-move clock or full-move number is not a non-negative integer
    InvalidCounter,
    /// Cannot parse a square in algebraic notation
    InvalidSquare,
    /// Cannot parse a side-to-move indicator
    InvalidColor,
    /// Cannot parse a piece
    InvalidPiece,
    /// Castling field contains something other than `KQkq` or `-`
    InvalidCastlingFlags,
    /// Missing king or multiple kings of the same color
    InvalidKingCount,
    /// Cannot parse a move
    InvalidMove,
    /// Failed to convert an integer to an another type
    TryFromIntError,
    /// The move is not legal in the current position
    IllegalMove,
    /// Input could not be read or understood
    InvalidInput,
    /// The player resigned
    Resignation,
}

impl Error {
    /// Returns `true` if the error came from parsing text.
    pub fn is_parse_error(self) -> bool {
        use Error::*;

        match self {
            InvalidCharacter(_) | WrongRankCount(_) | WrongRankLength | MissingField(_)
            | InvalidCounter | InvalidSquare | InvalidColor | InvalidPiece
            | InvalidCastlingFlags | InvalidKingCount | InvalidMove => true,
            _ => false,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Error::*;

        match self {
            InvalidCharacter(c) => write!(f, "invalid character '{}' in piece placement", c),
            WrongRankCount(n) => write!(f, "expected 8 ranks but found {}", n),
            WrongRankLength => "rank does not describe exactly 8 squares".fmt(f),
            MissingField(field) => write!(f, "missing field: {}", field),
            InvalidCounter => "move counter is not a non-negative integer".fmt(f),
            InvalidSquare => "invalid square".fmt(f),
            InvalidColor => "invalid side to move".fmt(f),
            InvalidPiece => "invalid piece".fmt(f),
            InvalidCastlingFlags => "invalid castling flags".fmt(f),
            InvalidKingCount => "missing king or multiple kings of the same color".fmt(f),
            InvalidMove => "cannot parse move".fmt(f),
            TryFromIntError => "integer out of range".fmt(f),
            IllegalMove => "illegal move".fmt(f),
            InvalidInput => "invalid input".fmt(f),
            Resignation => "player resigned".fmt(f),
        }
    }
}

impl std::error::Error for Error { }

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Result type used by methods in the `chess` module
pub type Result<T> = std::result::Result<T, Error>;

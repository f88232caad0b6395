//! Contains the `Move` type
//
//  Copyright 2019 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::fmt;
use std::str::FromStr;
use super::*;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A move from one square to another, with an optional promotion
///
/// A `Move` carries no information about captures, castling or en passant. Those are worked out
/// by the [`Position`](struct.Position.html) the move is applied to.
///
/// Moves are written in coordinate notation:
///
/// ```rust
/// use gambit::chess::{Move, Piece, Square};
///
/// let mv: Move = "e7e8q".parse().expect("valid move");
/// assert_eq!(mv, Move::promoting(Square::E7, Square::E8, Piece::Queen));
/// assert_eq!(mv.to_string(), "e7e8q");
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Move {
    start: Square,
    end: Square,
    promotion: Option<Piece>,
}

impl Move {
    /// Creates a move with no promotion.
    pub fn new(start: Square, end: Square) -> Move {
        Move { start, end, promotion: None }
    }

    /// Creates a pawn move that promotes to `piece`.
    pub fn promoting(start: Square, end: Square, piece: Piece) -> Move {
        Move { start, end, promotion: Some(piece) }
    }

    /// Returns the square the piece moves from.
    pub fn start(self) -> Square {
        self.start
    }

    /// Returns the square the piece moves to.
    pub fn end(self) -> Square {
        self.end
    }

    /// Returns the piece a pawn promotes to, if any.
    pub fn promotion(self) -> Option<Piece> {
        self.promotion
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.start, self.end)?;
        if let Some(piece) = self.promotion {
            write!(f, "{}", piece.symbol(Color::Black))?;
        }
        Ok(())
    }
}

impl FromStr for Move {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if !s.is_ascii() || s.len() < 4 || s.len() > 5 {
            return Err(Error::InvalidMove);
        }

        let start = s[0..2].parse()?;
        let end = s[2..4].parse()?;
        match s.get(4..) {
            Some("") | None => Ok(Move::new(start, end)),
            Some(p) => match p.parse()? {
                Piece::Pawn | Piece::King => Err(Error::InvalidPiece),
                piece => Ok(Move::promoting(start, end, piece)),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_coordinate_notation() {
        assert_eq!("e2e4".parse::<Move>(), Ok(Move::new(Square::E2, Square::E4)));
        let underpromotion = Move::promoting(Square::A7, Square::A8, Piece::Knight);
        assert_eq!("a7a8n".parse::<Move>(), Ok(underpromotion));
        assert_eq!("a7a8N".parse::<Move>(), Ok(underpromotion));
    }

    #[test]
    fn rejects_malformed_moves() {
        assert_eq!("e2".parse::<Move>(), Err(Error::InvalidMove));
        assert_eq!("e2e4e5".parse::<Move>(), Err(Error::InvalidMove));
        assert_eq!("e2e9".parse::<Move>(), Err(Error::InvalidSquare));
        assert_eq!("e7e8k".parse::<Move>(), Err(Error::InvalidPiece));
        assert_eq!("e7e8x".parse::<Move>(), Err(Error::InvalidPiece));
    }

    #[test]
    fn display_matches_parse() {
        for s in &["e2e4", "g8f6", "b2b1r"] {
            assert_eq!(s.parse::<Move>().expect("valid move").to_string(), *s);
        }
    }
}

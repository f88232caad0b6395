//! Function to evaluate a position.
//
//  Copyright 2020 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::fmt;
use std::ops;
use crate::chess::{Color, Piece, Square, Position};

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Score from `White`'s point of view, unless noted otherwise
///
/// `Score::MIN` is the negation of `Score::MAX`, so negating a score never overflows.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Score(i32);

impl Score {
    /// The greatest possible score, given when `Black` is checkmated
    pub const MAX: Score = Score(i32::MAX);
    /// The least possible score, given when `White` is checkmated
    pub const MIN: Score = Score(-i32::MAX);
    /// The score for a draw
    pub const DRAW: Score = Score(0);
}

impl ops::Neg for Score {
    type Output = Score;

    fn neg(self) -> Self {
        Score(-self.0)
    }
}

impl From<i32> for Score {
    fn from(val: i32) -> Self {
        Score(val)
    }
}

impl From<Score> for i32 {
    fn from(val: Score) -> Self {
        val.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Score::MAX => "+mate".fmt(f),
            Score::MIN => "-mate".fmt(f),
            Score(val) => write!(f, "{:+}", val),
        }
    }
}

const PIECE_VAL: [i32; Piece::COUNT] = [ 100, 300, 300, 500, 900, 0 ];

const BISHOP_PAIR_VAL: i32 = 75;
const MOBILITY_WEIGHT: i32 = 2;
const ATTACK_WEIGHT: i32 = 1;

/// With fewer pieces than this on the board the king uses its late game table.
const LATE_GAME_PIECES: usize = 10;

// Tables are indexed by square from `White`'s side, starting at a1.
const PIECE_SQUARE_VAL: [[i32; Square::COUNT]; Piece::COUNT - 1] = [
    [ // Pawn
      //  a    b    c    d    e    f    g    h
          0,   0,   0,   0,   0,   0,   0,   0, // 1
          0,   0,   0,   0,   0,   0,   0,   0, // 2
          0,   0,   0,   0,   0,  -5,   0,   0, // 3
          0,   0,   5,  10,  10,   0,   0,   0, // 4
         10,  10,  15,  20,  20,  10,  10,  10, // 5
         20,  20,  25,  30,  30,  20,  20,  20, // 6
         30,  30,  35,  40,  40,  30,  30,  30, // 7
          0,   0,   0,   0,   0,   0,   0,   0, // 8
    ],
    [ // Knight
      //  a    b    c    d    e    f    g    h
        -50, -40, -30, -30, -30, -30, -40, -50, // 1
        -40, -20,   0,   0,   0,   0, -20, -40, // 2
        -30,   0,  10,  15,  15,  10,   0, -30, // 3
        -30,   5,  15,  20,  20,  15,   5, -30, // 4
        -30,   0,  15,  20,  20,  15,   0, -30, // 5
        -30,   5,  10,  15,  15,  10,   5, -30, // 6
        -40, -20,   0,   5,   5,   0, -20, -40, // 7
        -50, -40, -30, -30, -30, -30, -40, -50, // 8
    ],
    [ // Bishop
      //  a    b    c    d    e    f    g    h
         20,  10,   0,   0,   0,   0,  10,  20, // 1
         10,  20,  10,   0,   0,  10,  20,  10, // 2
          0,  10,  20,  10,  10,  20,  10,   0, // 3
          0,   0,  10,  20,  20,  10,   0,   0, // 4
          0,   0,  10,  20,  20,  10,   0,   0, // 5
          0,  10,  20,  10,  10,  20,  10,   0, // 6
         10,  20,  10,   0,   0,  10,  20,  10, // 7
         20,  10,   0,   0,   0,   0,  10,  20, // 8
    ],
    [ // Rook
      //  a    b    c    d    e    f    g    h
          0,   0,   0,  10,  10,   0,   0,   0, // 1
          0,   0,   0,   0,  10,  10,   0,   0, // 2
         -5,   0,   0,  10,  10,   0,   0,  -5, // 3
         -5,   0,   0,  10,  10,   0,   0,  -5, // 4
         -5,   0,   0,  10,  10,   0,   0,  -5, // 5
         -5,   0,   0,  10,  10,   0,   0,  -5, // 6
         10,  20,  20,  20,  20,  20,  20,  10, // 7
         10,  20,  20,  30,  30,  20,  20,  10, // 8
    ],
    [ // Queen
      //  a    b    c    d    e    f    g    h
        -20, -10, -10,  -5,  -5, -10, -10, -20, // 1
        -10,   0,   0,   0,   0,   0,   0, -10, // 2
        -10,   0,   5,   5,   5,   5,   0, -10, // 3
         -5,   0,   5,   5,   5,   5,   0,  -5, // 4
          0,   0,   5,   5,   5,   5,   0,  -5, // 5
        -10,   5,   5,   5,   5,   5,   0, -10, // 6
        -10,   0,   5,   0,   0,   0,   0, -10, // 7
        -20, -10, -10,  -5,  -5, -10, -10, -20, // 8
    ],
];

const MID_KING_TABLE: [i32; Square::COUNT] = [
    //  a    b    c    d    e    f    g    h
       20,  30,  10,   0,   0,  10,  30,  20, // 1
       20,  20,   0,   0,   0,   0,  20,  20, // 2
      -10, -20, -20, -20, -20, -20, -20, -10, // 3
      -20, -30, -30, -40, -40, -30, -30, -20, // 4
      -30, -40, -40, -50, -50, -40, -40, -30, // 5
      -30, -40, -40, -50, -50, -40, -40, -30, // 6
      -30, -40, -40, -50, -50, -40, -40, -30, // 7
      -30, -40, -40, -50, -50, -40, -40, -30, // 8
];

const LATE_KING_TABLE: [i32; Square::COUNT] = [
    //  a    b    c    d    e    f    g    h
      -10, -10, -10, -10, -10, -10, -10, -10, // 1
      -10,   0,   5,   5,   5,   5,   0, -10, // 2
      -10,   5,  10,  10,  10,  10,   5, -10, // 3
      -10,   5,  15,  15,  15,  15,   5, -10, // 4
      -10,   5,  15,  15,  15,  15,   5, -10, // 5
      -10,   5,  10,  10,  10,  10,   5, -10, // 6
      -10,   0,   5,   5,   5,   5,   0, -10, // 7
      -10, -10, -10, -10, -10, -10, -10, -10, // 8
];

/// Returns the material value of a piece. Kings have no material value.
pub fn piece_val(piece: Piece) -> i32 {
    PIECE_VAL[piece as usize]
}

/// Returns the piece-square value of `piece` of color `color` standing on `sq`.
///
/// Tables are written from `White`'s side and mirrored vertically for `Black`.
pub fn piece_square_val(piece: Piece, color: Color, sq: Square, late_game: bool) -> i32 {
    let sq = match color {
        Color::White => sq,
        Color::Black => sq.flip_rank(),
    };

    match piece {
        Piece::King if late_game => LATE_KING_TABLE[sq as usize],
        Piece::King => MID_KING_TABLE[sq as usize],
        _ => PIECE_SQUARE_VAL[piece as usize][sq as usize],
    }
}

/// Returns the static score of `pos` from `White`'s point of view.
///
/// Drawn positions score 0 and checkmate scores `Score::MAX` or `Score::MIN`. Otherwise each side
/// gets material, piece-square values, twice its number of legal moves, and the number of squares
/// it attacks.
pub fn evaluate(pos: &Position) -> Score {
    if pos.is_fifty_move() || pos.is_threefold() || pos.is_stalemate() {
        return Score::DRAW;
    }
    if pos.is_checkmate() {
        return match pos.turn() {
            Color::White => Score::MIN,
            Color::Black => Score::MAX,
        };
    }

    let late_game = pos.occupied().len() < LATE_GAME_PIECES;
    let mut score = 0;

    for color in Color::ALL.iter().copied() {
        let mut val = 0;

        for piece in Piece::ALL.iter().copied() {
            let bits = pos.pieces(color, piece);
            val += bits.len() as i32 * PIECE_VAL[piece as usize];
            for sq in bits {
                val += piece_square_val(piece, color, sq, late_game);
            }
        }
        if pos.pieces(color, Piece::Bishop).len() == 2 {
            val += BISHOP_PAIR_VAL;
        }

        val += pos.legal_moves(color).len() as i32 * MOBILITY_WEIGHT;
        val += pos.all_attacks(color).len() as i32 * ATTACK_WEIGHT;

        score += val * color.sign();
    }

    Score(score)
}

/// Returns the static score of `pos` from the point of view of the side to move.
pub fn evaluate_for_mover(pos: &Position) -> Score {
    match pos.turn() {
        Color::White => evaluate(pos),
        Color::Black => -evaluate(pos),
    }
}

#[cfg(test)]
mod eval_test {
    use super::*;

    fn pos(fen: &str) -> Position {
        Position::from_fen_str(fen).expect("valid fen")
    }

    #[test]
    fn starting_position_is_balanced() {
        assert_eq!(evaluate(&Position::new()), Score::DRAW);
    }

    #[test]
    fn checkmate_gives_extreme_scores() {
        assert_eq!(evaluate(&pos("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1")), Score::MAX);
        assert_eq!(evaluate(&pos("6k1/8/8/8/8/8/5PPP/r5K1 w - - 0 1")), Score::MIN);
        assert_eq!(Score::MIN, -Score::MAX);
    }

    #[test]
    fn draws_score_zero() {
        assert_eq!(evaluate(&pos("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1")), Score::DRAW);
        assert_eq!(evaluate(&pos("4k3/8/8/8/8/8/8/Q3K3 w - - 100 80")), Score::DRAW);
    }

    #[test]
    fn mirrored_positions_have_opposite_scores() {
        let white = pos("4k3/8/8/8/8/2N5/3P4/4K3 w - - 0 1");
        let black = pos("4k3/3p4/2n5/8/8/8/8/4K3 b - - 0 1");

        assert!(evaluate(&white) > Score::DRAW);
        assert_eq!(evaluate(&white), -evaluate(&black));
        assert_eq!(evaluate_for_mover(&white), evaluate_for_mover(&black));
    }

    #[test]
    fn extra_material_favors_its_owner() {
        assert!(evaluate(&pos("4k3/8/8/8/8/8/8/Q3K3 b - - 0 1")) > Score::DRAW);
        assert!(evaluate(&pos("q3k3/8/8/8/8/8/8/4K3 w - - 0 1")) < Score::DRAW);
        assert!(evaluate_for_mover(&pos("q3k3/8/8/8/8/8/8/4K3 b - - 0 1")) > Score::DRAW);

        // evaluate stays White-relative whoever is to move
        let black_up = pos("q3k3/8/8/8/8/8/8/4K3 b - - 0 1");
        assert!(evaluate(&black_up) < Score::DRAW);
        assert_eq!(i32::from(evaluate_for_mover(&black_up)), -i32::from(evaluate(&black_up)));
    }

    #[test]
    fn bishop_pair_earns_a_bonus() {
        assert_eq!(piece_val(Piece::Bishop), 300);

        let pair = pos("4k3/8/8/8/8/8/8/2B1KB2 w - - 0 1");
        let single = pos("4k3/8/8/8/8/8/8/2B1K3 w - - 0 1");
        assert!(i32::from(evaluate(&pair)) - i32::from(evaluate(&single)) > 375);
    }

    #[test]
    fn black_tables_are_mirrored_vertically() {
        // kings are looked up in their tables like every other piece
        assert_eq!(piece_square_val(Piece::Pawn, Color::White, Square::F3, false), -5);
        assert_eq!(piece_square_val(Piece::Pawn, Color::Black, Square::F6, false), -5);
        assert_eq!(piece_square_val(Piece::King, Color::Black, Square::G8, false), 30);
        assert_eq!(piece_square_val(Piece::King, Color::Black, Square::G8, true), -10);
    }

    #[test]
    fn display_marks_mate_scores() {
        assert_eq!(Score::MAX.to_string(), "+mate");
        assert_eq!(Score::MIN.to_string(), "-mate");
        assert_eq!(Score::from(-35).to_string(), "-35");
        assert_eq!(Score::from(12).to_string(), "+12");
    }
}

//! Types describing how a game ended
//
//  Copyright 2020 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::fmt;
use super::*;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// The result of a game
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameResult {
    /// One side has won
    Win {
        /// The side that won
        winner: Color,
        /// How the game was won
        reason: WinReason,
    },
    /// The game has ended in a draw
    Draw(DrawReason),
}

/// How a game was won
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum WinReason {
    Checkmate,
    Resignation,
}

/// Why a game was drawn
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DrawReason {
    /// The side to move has no legal moves and is not in check
    Stalemate,
    /// A hundred plies have passed without a capture or pawn move
    FiftyMove,
    /// The same position has occurred three times
    Threefold,
}

impl GameResult {
    /// Returns the winner, or `None` for a draw.
    pub fn winner(self) -> Option<Color> {
        match self {
            GameResult::Win { winner, .. } => Some(winner),
            GameResult::Draw(_) => None,
        }
    }
}

impl fmt::Display for GameResult {
    /// Writes the score followed by the reason, such as `1-0 {White mates}`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameResult::Win { winner, reason } => {
                let (score, name) = match winner {
                    Color::White => ("1-0", "White"),
                    Color::Black => ("0-1", "Black"),
                };
                match reason {
                    WinReason::Checkmate => write!(f, "{} {{{} mates}}", score, name),
                    WinReason::Resignation => {
                        let loser = if *winner == Color::White { "Black" } else { "White" };
                        write!(f, "{} {{{} resigns}}", score, loser)
                    },
                }
            },
            GameResult::Draw(reason) => {
                let reason = match reason {
                    DrawReason::Stalemate => "Stalemate",
                    DrawReason::FiftyMove => "Fifty move rule",
                    DrawReason::Threefold => "Threefold repetition",
                };
                write!(f, "1/2-1/2 {{{}}}", reason)
            },
        }
    }
}

//! Runs a game between two players
//
//  Copyright 2020 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use log::{debug, info, warn};
use crate::chess::{Color, GameResult, Move, Position, WinReason};
use crate::chess::error::{Error, Result};

pub mod console;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A source of moves for one side of the game
pub trait InputProvider {
    /// Returns the move to play in `position`.
    ///
    /// Returning `Error::Resignation` resigns the game. Any other error, or an illegal move,
    /// causes the provider to be asked again.
    fn get_move(&mut self, position: &Position) -> Result<Move>;
}

/// Shows the game to one side
pub trait OutputHandler {
    /// Shows the current position.
    fn display_board(&mut self, position: &Position);

    /// Tells the side to move that its king is in check.
    fn display_check(&mut self);
}

/// Plays a game from `position` until it is over, returning the result.
///
/// Before each move both handlers are shown the board. The game ends on checkmate, stalemate,
/// the fifty move rule, threefold repetition, or resignation, in which case the opponent of the
/// resigning side wins. The side in check is told so through its own handler.
pub fn play(position: &mut Position,
    white_in: &mut dyn InputProvider, black_in: &mut dyn InputProvider,
    white_out: &mut dyn OutputHandler, black_out: &mut dyn OutputHandler)
-> GameResult {
    info!("starting game: {}", position);

    loop {
        white_out.display_board(position);
        black_out.display_board(position);

        if let Some(result) = position.status() {
            info!("game over: {}", result);
            return result;
        }

        let turn = position.turn();
        let (input, output): (&mut dyn InputProvider, &mut dyn OutputHandler) = match turn {
            Color::White => (&mut *white_in, &mut *white_out),
            Color::Black => (&mut *black_in, &mut *black_out),
        };

        if position.is_check(turn) {
            output.display_check();
        }

        // ask until the side to move gives a legal move or resigns
        let mv = loop {
            match input.get_move(position) {
                Ok(mv) if position.is_legal(mv) => break mv,
                Ok(mv) => warn!("{} tried illegal move {}", turn, mv),
                Err(Error::Resignation) => {
                    let result = GameResult::Win { winner: !turn, reason: WinReason::Resignation };
                    info!("game over: {}", result);
                    return result;
                },
                Err(err) => debug!("{} gave bad input: {}", turn, err),
            }
        };

        debug!("{} plays {}", turn, mv);
        position.play(mv);
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use super::*;
    use crate::chess::DrawReason;

    /// Replies with a fixed list of moves and errors, resigning when it runs out
    struct Scripted(VecDeque<Result<Move>>);

    impl Scripted {
        fn new(script: &[&str]) -> Self {
            Scripted(script.iter()
                .map(|s| match *s {
                    "resign" => Err(Error::Resignation),
                    "junk" => Err(Error::InvalidInput),
                    mv => Ok(mv.parse().expect("valid move")),
                })
                .collect())
        }
    }

    impl InputProvider for Scripted {
        fn get_move(&mut self, _: &Position) -> Result<Move> {
            self.0.pop_front().unwrap_or(Err(Error::Resignation))
        }
    }

    #[derive(Default)]
    struct Recorder {
        boards: usize,
        checks: usize,
    }

    impl OutputHandler for Recorder {
        fn display_board(&mut self, _: &Position) {
            self.boards += 1;
        }

        fn display_check(&mut self) {
            self.checks += 1;
        }
    }

    fn run(position: &mut Position, white: &[&str], black: &[&str])
    -> (GameResult, Recorder, Recorder) {
        let (mut white_out, mut black_out) = (Recorder::default(), Recorder::default());
        let result = play(position,
            &mut Scripted::new(white), &mut Scripted::new(black),
            &mut white_out, &mut black_out);

        (result, white_out, black_out)
    }

    #[test]
    fn fools_mate() {
        let mut pos = Position::new();
        let (result, white_out, black_out) =
            run(&mut pos, &["f2f3", "g2g4"], &["e7e5", "d8h4"]);

        assert_eq!(result, GameResult::Win { winner: Color::Black, reason: WinReason::Checkmate });
        assert_eq!(white_out.boards, 5);
        assert_eq!(black_out.boards, 5);
        assert_eq!(white_out.checks, 0);
    }

    #[test]
    fn illegal_moves_and_bad_input_are_asked_again() {
        let mut pos = Position::new();
        let (result, _, _) = run(&mut pos, &["e2e5", "junk", "e2e4"], &[]);

        assert_eq!(result,
            GameResult::Win { winner: Color::White, reason: WinReason::Resignation });
        assert_eq!(pos.to_fen_str(),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1");
    }

    #[test]
    fn resignation_hands_the_win_to_the_opponent() {
        let mut pos = Position::new();
        let (result, _, _) = run(&mut pos, &["resign"], &[]);

        assert_eq!(result,
            GameResult::Win { winner: Color::Black, reason: WinReason::Resignation });
    }

    #[test]
    fn check_is_shown_to_the_side_in_check() {
        let mut pos = Position::from_fen_str("4k3/8/8/8/8/8/8/R3K3 w - - 0 1")
            .expect("valid fen");
        let (_, white_out, black_out) = run(&mut pos, &["a1a8"], &["resign"]);

        assert_eq!(white_out.checks, 0);
        assert_eq!(black_out.checks, 1);
    }

    #[test]
    fn threefold_repetition_ends_the_game() {
        let mut pos = Position::new();
        let (result, _, _) = run(&mut pos,
            &["g1f3", "f3g1", "g1f3", "f3g1"],
            &["g8f6", "f6g8", "g8f6", "f6g8"]);

        assert_eq!(result, GameResult::Draw(DrawReason::Threefold));
    }

    #[test]
    fn stalemate_ends_the_game() {
        let mut pos = Position::from_fen_str("7k/8/5Q2/6K1/8/8/8/8 w - - 0 1")
            .expect("valid fen");
        let (result, _, _) = run(&mut pos, &["f6f7"], &[]);

        assert_eq!(result, GameResult::Draw(DrawReason::Stalemate));
    }
}

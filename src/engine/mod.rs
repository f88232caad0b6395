//! The engine
//
//  Copyright 2019 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::cmp::{max, min, Reverse};
use std::time::Instant;
use log::{debug, info, trace};
use crate::chess::{Color, Move, Piece, Position};
use crate::chess::error::{Error, Result};
use crate::game::{InputProvider, OutputHandler};

mod eval;
pub use eval::{Score, evaluate, evaluate_for_mover, piece_val, piece_square_val};

/// Ordering bonus for capturing each kind of piece
const CAPTURE_VAL: [i32; Piece::COUNT] = [ 100, 300, 330, 500, 900, 0 ];
const PROMOTION_BONUS: i32 = 900;
const CHECK_BONUS: i32 = 100;
const SAFE_SQUARE_BONUS: i32 = 500;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Searches positions with minimax and alpha-beta pruning, counting the nodes it visits.
///
/// `White` maximizes the score from [`evaluate`](fn.evaluate.html) and `Black` minimizes it.
/// Every branch works on its own clone of the position.
#[derive(Debug, Default)]
pub struct Searcher {
    nodes: u64,
}

impl Searcher {
    /// Creates a new `Searcher`.
    pub fn new() -> Self {
        Searcher { nodes: 0 }
    }

    /// Returns the number of nodes visited since the searcher was created.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Returns the minimax score of `pos` searched `depth` plies deep, within the window
    /// `alpha` to `beta`.
    ///
    /// Leaves and finished games (checkmate, stalemate, threefold repetition or the fifty move
    /// rule) are scored with `evaluate`.
    pub fn alpha_beta(&mut self, pos: &Position, mut alpha: Score, mut beta: Score, depth: usize)
    -> Score {
        self.nodes += 1;

        if depth == 0 || pos.status().is_some() {
            return evaluate(pos);
        }

        let color = pos.turn();
        let moves = pos.legal_moves(color);

        if color == Color::White {
            let mut best = Score::MIN;
            for mv in moves {
                let score = self.alpha_beta(&after(pos, mv), alpha, beta, depth - 1);
                best = max(best, score);
                alpha = max(alpha, score);
                if score >= beta {
                    break;
                }
            }
            best
        } else {
            let mut best = Score::MAX;
            for mv in moves {
                let score = self.alpha_beta(&after(pos, mv), alpha, beta, depth - 1);
                best = min(best, score);
                beta = min(beta, score);
                if score <= alpha {
                    break;
                }
            }
            best
        }
    }

    /// Returns the best move for the side to move in `pos`, searching each reply `depth - 1`
    /// plies deep. Returns `None` if there are no legal moves.
    ///
    /// Moves are tried in the order given by [`order_moves`](fn.order_moves.html), and the
    /// first of equally scored moves is kept.
    pub fn choose_move(&mut self, pos: &Position, depth: usize) -> Option<Move> {
        let start_time = Instant::now();
        let start_nodes = self.nodes;
        let color = pos.turn();
        let depth = depth.saturating_sub(1);

        let mut alpha = Score::MIN;
        let mut beta = Score::MAX;
        let mut best: Option<(Move, Score)> = None;

        debug!("searching: {}", pos);
        for mv in order_moves(pos) {
            let score = self.alpha_beta(&after(pos, mv), alpha, beta, depth);
            trace!("{}: {}", mv, score);

            let better = match (color, best) {
                (_, None) => true,
                (Color::White, Some((_, best_score))) => score > best_score,
                (Color::Black, Some((_, best_score))) => score < best_score,
            };
            if better {
                best = Some((mv, score));
            }

            match color {
                Color::White => alpha = max(alpha, score),
                Color::Black => beta = min(beta, score),
            }
            if alpha >= beta {
                break;
            }
        }

        if let Some((mv, score)) = best {
            debug!("chose {} with score {} ({} nodes in {:?})",
                mv, score, self.nodes - start_nodes, start_time.elapsed());
        }

        best.map(|(mv, _)| mv)
    }
}

/// Returns a copy of `pos` with `mv` played.
fn after(pos: &Position, mv: Move) -> Position {
    let mut next = pos.clone();
    next.play(mv);
    next
}

/// Returns the legal moves of the side to move, most promising first.
///
/// Captures earn the value of the captured piece, promotions and checks earn a bonus, and so
/// does a destination the opponent does not attack. Moves with equal priority keep the order in
/// which they were generated.
pub fn order_moves(pos: &Position) -> Vec<Move> {
    let color = pos.turn();
    let attacked = pos.all_attacks(!color);
    let mut moves: Vec<(Move, i32)> = pos.legal_moves(color).into_iter()
        .map(|mv| {
            let mut priority = 0;

            if let Some((c, p)) = pos.piece_at(mv.end()) {
                if c != color {
                    priority += CAPTURE_VAL[p as usize];
                }
            }
            if mv.promotion().is_some() {
                priority += PROMOTION_BONUS;
            }
            let mut sim = pos.clone();
            sim.apply(mv);
            if sim.is_check(!color) {
                priority += CHECK_BONUS;
            }
            if !attacked.contains(mv.end()) {
                priority += SAFE_SQUARE_BONUS;
            }

            (mv, priority)
        })
        .collect();

    moves.sort_by_key(|&(_, priority)| Reverse(priority));
    moves.into_iter().map(|(mv, _)| mv).collect()
}

/// Returns the minimax score of `pos` searched `depth` plies deep, within the window `alpha` to
/// `beta`.
pub fn alpha_beta(pos: &Position, alpha: Score, beta: Score, depth: usize) -> Score {
    Searcher::new().alpha_beta(pos, alpha, beta, depth)
}

/// Returns the best move for the side to move in `pos`, or `None` if there are no legal moves.
pub fn choose_move(pos: &Position, depth: usize) -> Option<Move> {
    Searcher::new().choose_move(pos, depth)
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A player that picks its moves with an alpha-beta search of fixed depth
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct EnginePlayer {
    /// The search depth in plies
    pub depth: usize,
}

impl EnginePlayer {
    /// Creates a player that searches `depth` plies deep.
    pub fn new(depth: usize) -> Self {
        EnginePlayer { depth }
    }
}

impl InputProvider for EnginePlayer {
    fn get_move(&mut self, position: &Position) -> Result<Move> {
        let mut searcher = Searcher::new();
        let mv = searcher.choose_move(position, self.depth).ok_or(Error::IllegalMove)?;

        info!("engine plays {} after {} nodes", mv, searcher.nodes());
        Ok(mv)
    }
}

/// Output for a side played by the engine, which only needs the board in the log
#[derive(Debug, Copy, Clone, Default)]
pub struct EngineOutput;

impl OutputHandler for EngineOutput {
    fn display_board(&mut self, position: &Position) {
        debug!("board: {}", position);
    }

    fn display_check(&mut self) { }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess::Square;

    fn pos(fen: &str) -> Position {
        Position::from_fen_str(fen).expect("valid fen")
    }

    #[test]
    fn finds_back_rank_mate_for_white() {
        let pos = pos("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1");
        for depth in 1..=2 {
            assert_eq!(choose_move(&pos, depth), Some(Move::new(Square::A1, Square::A8)));
        }
    }

    #[test]
    fn finds_back_rank_mate_for_black() {
        let pos = pos("r5k1/8/8/8/8/8/5PPP/6K1 b - - 0 1");
        assert_eq!(choose_move(&pos, 2), Some(Move::new(Square::A8, Square::A1)));
    }

    #[test]
    fn ties_keep_the_first_ordered_move() {
        // every quiet move reaches the fifty move rule, so all of them score as a draw
        for fen in &["4k3/8/8/8/8/8/8/4K3 w - - 99 60", "4k3/8/8/8/8/8/8/4K3 b - - 99 60"] {
            let pos = pos(fen);
            let moves = order_moves(&pos);
            assert!(moves.len() > 1);
            for depth in 1..=2 {
                assert_eq!(choose_move(&pos, depth), Some(moves[0]), "{}", fen);
            }
        }
    }

    #[test]
    fn no_move_when_the_game_is_over() {
        assert_eq!(choose_move(&pos("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1"), 2), None);
        assert_eq!(choose_move(&pos("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1"), 2), None);
    }

    #[test]
    fn alpha_beta_scores_finished_games_statically() {
        let mated = pos("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1");
        assert_eq!(alpha_beta(&mated, Score::MIN, Score::MAX, 3), Score::MAX);

        let start = Position::new();
        assert_eq!(alpha_beta(&start, Score::MIN, Score::MAX, 0), evaluate(&start));
    }

    #[test]
    fn alpha_beta_sees_mate_in_one() {
        let pos = pos("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1");
        assert_eq!(alpha_beta(&pos, Score::MIN, Score::MAX, 1), Score::MAX);
    }

    #[test]
    fn takes_a_hanging_queen() {
        let pos = pos("4k3/8/8/3q4/8/8/8/3RK3 w - - 0 1");
        assert_eq!(choose_move(&pos, 2), Some(Move::new(Square::D1, Square::D5)));
    }

    #[test]
    fn ordering_puts_captures_first() {
        let pos = pos("4k3/8/8/3q4/8/8/8/3RK3 w - - 0 1");
        let moves = order_moves(&pos);

        assert_eq!(moves.len(), pos.legal_moves(Color::White).len());
        assert_eq!(moves[0], Move::new(Square::D1, Square::D5));
    }

    #[test]
    fn searcher_counts_nodes() {
        let mut searcher = Searcher::new();
        searcher.choose_move(&Position::new(), 2);
        assert!(searcher.nodes() > 20);
    }

    #[test]
    fn engine_player_provides_legal_moves() {
        let pos = Position::new();
        let mv = EnginePlayer::new(1).get_move(&pos).expect("a move");
        assert!(pos.is_legal(mv));
    }
}

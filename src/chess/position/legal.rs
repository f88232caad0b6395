//! Move legality, attack maps and game-state queries for a `Position`
//
//  Copyright 2020 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use super::*;

impl Position {
    /// Returns every square attacked by the pieces of color `c`.
    ///
    /// Pawns attack both forward diagonals whether or not anything stands there. Sliding attacks
    /// stop on the first occupied square. Castling is not an attack.
    pub fn all_attacks(&self, c: Color) -> Bitboard {
        let occ = self.occupied();
        let mut attacks = Bitboard::new();

        for sq in self.pieces(c, Pawn) {
            attacks |= pawn_attacks(sq, c);
        }
        for sq in self.pieces(c, Knight) {
            attacks |= knight_attacks(sq);
        }
        for sq in self.pieces(c, Bishop) | self.pieces(c, Queen) {
            attacks |= bishop_attacks(sq, occ);
        }
        for sq in self.pieces(c, Rook) | self.pieces(c, Queen) {
            attacks |= rook_attacks(sq, occ);
        }
        for sq in self.pieces(c, King) {
            attacks |= king_attacks(sq);
        }

        attacks
    }

    /// Returns `true` if `sq` is attacked by a piece of color `c`.
    pub fn is_attacked(&self, c: Color, sq: Square) -> bool {
        self.all_attacks(c).contains(sq)
    }

    /// Returns `true` if the king of color `c` is attacked.
    pub fn is_check(&self, c: Color) -> bool {
        match self.king_square(c) {
            Some(king) => self.is_attacked(!c, king),
            None => false,
        }
    }

    /// Returns the moves for color `c` that follow each piece's movement rules, including those
    /// that leave its own king attacked.
    pub fn pseudo_legal_moves(&self, c: Color) -> Vec<Move> {
        let own = self.occupancy(c);
        let enemies = self.occupancy(!c);
        let occ = self.occupied();
        let ep = if c == self.turn() { self.en_passant() } else { None };
        let last_rank = match c {
            White => Rank::R8,
            Black => Rank::R1,
        };
        let mut moves = Vec::new();

        for p in Piece::ALL.iter().copied() {
            for from in self.pieces(c, p) {
                let destinations = match p {
                    Pawn => pawn_moves(from, c, occ, enemies, ep),
                    Knight => knight_attacks(from) & !own,
                    Bishop => bishop_attacks(from, occ) & !own,
                    Rook => rook_attacks(from, occ) & !own,
                    Queen => queen_attacks(from, occ) & !own,
                    King => king_moves(from, c, own, occ, self.all_attacks(!c), self.castling(c),
                        self.pieces(c, Rook)),
                };

                for to in destinations {
                    if p == Pawn && to.rank() == last_rank {
                        for promotion in Piece::PROMOTIONS.iter().copied() {
                            moves.push(Move::promoting(from, to, promotion));
                        }
                    } else {
                        moves.push(Move::new(from, to));
                    }
                }
            }
        }

        moves
    }

    /// Returns the legal moves for color `c`.
    ///
    /// Each candidate from [`pseudo_legal_moves`](#method.pseudo_legal_moves) is applied to a
    /// copy of the position and kept only if `c`'s king is not attacked afterwards.
    pub fn legal_moves(&self, c: Color) -> Vec<Move> {
        self.pseudo_legal_moves(c).into_iter()
            .filter(|mv| {
                let mut sim = self.board_copy();
                sim.apply(*mv);
                !sim.is_check(c)
            })
            .collect()
    }

    /// Returns `true` if `mv` is a legal move for the side to move.
    pub fn is_legal(&self, mv: Move) -> bool {
        self.legal_moves(self.turn()).contains(&mv)
    }

    /// Returns `true` if the side to move is in check and has no legal moves.
    pub fn is_checkmate(&self) -> bool {
        self.is_check(self.turn()) && self.legal_moves(self.turn()).is_empty()
    }

    /// Returns `true` if the side to move is not in check and has no legal moves.
    pub fn is_stalemate(&self) -> bool {
        !self.is_check(self.turn()) && self.legal_moves(self.turn()).is_empty()
    }

    /// Returns `true` if the current position has been recorded at least three times.
    pub fn is_threefold(&self) -> bool {
        self.repetition_count() >= 3
    }

    /// Returns `true` if a hundred plies have passed without a capture or pawn move.
    pub fn is_fifty_move(&self) -> bool {
        self.halfmove_clock() >= 100
    }

    /// Returns the result of the game if it is over, or `None` if the side to move has a move to
    /// make.
    ///
    /// Checkmate and stalemate are checked first, then the fifty move rule, then repetition.
    pub fn status(&self) -> Option<GameResult> {
        if self.legal_moves(self.turn()).is_empty() {
            if self.is_check(self.turn()) {
                Some(GameResult::Win { winner: !self.turn(), reason: WinReason::Checkmate })
            } else {
                Some(GameResult::Draw(DrawReason::Stalemate))
            }
        } else if self.is_fifty_move() {
            Some(GameResult::Draw(DrawReason::FiftyMove))
        } else if self.is_threefold() {
            Some(GameResult::Draw(DrawReason::Threefold))
        } else {
            None
        }
    }

    /// Returns a copy of the board without the repetition table, for trying out moves.
    fn board_copy(&self) -> Position {
        Position {
            repetitions: HashMap::new(),
            hasher: self.hasher.clone(),
            ..*self
        }
    }
}

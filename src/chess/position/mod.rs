//! Contains structures related to the `Position`.
//
//  Copyright 2020 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use super::*;

use bitboard::*;
use zobrist::{Hasher, Zobrist, ZobristKeys};

use Color::*;
use Piece::*;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Records which of a side's castling pieces have left their starting squares
///
/// Once a flag is set it stays set, so castling rights are never regained. Moving the king
/// disables castling on both sides.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct CastlingFlags {
    /// The rook that starts on the a-file has moved or been captured
    pub rook_a_moved: bool,
    /// The king has moved
    pub king_moved: bool,
    /// The rook that starts on the h-file has moved or been captured
    pub rook_h_moved: bool,
}

impl CastlingFlags {
    /// Flags for a side that can no longer castle
    pub const NONE: CastlingFlags = CastlingFlags {
        rook_a_moved: true,
        king_moved: true,
        rook_h_moved: true,
    };

    /// Returns `true` if neither the king nor the h-file rook has moved.
    pub fn king_side(self) -> bool {
        !self.king_moved && !self.rook_h_moved
    }

    /// Returns `true` if neither the king nor the a-file rook has moved.
    pub fn queen_side(self) -> bool {
        !self.king_moved && !self.rook_a_moved
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// The state of a game: the arrangement of pieces, whose turn it is, castling and en passant
/// state, the move counters and the count of each position seen so far.
///
/// # Instantiation
///  -  [`new`](#method.new) returns the standard starting position.
///  -  [`from_fen_str`](#method.from_fen_str) (along with `from_str` and `str::parse`) reads
///     [Forsyth-Edwards Notation (FEN)](https://en.wikipedia.org/wiki/Forsyth%E2%80%93Edwards_Notation).
///  -  [`with_keys`](#method.with_keys) and [`from_fen_with_keys`](#method.from_fen_with_keys) do
///     the same with a specific Zobrist key table.
///
/// Positions created any of these ways have their own hash recorded once in the repetition table.
///
/// # Making Moves
/// [`apply`](#method.apply) changes the board only. The caller flips the turn, updates the move
/// counters and records the new position. [`play`](#method.play) does all of that in one call:
///
/// ```rust
/// use gambit::chess::Position;
///
/// let mut pos = Position::new();
/// for mv in &["e2e4", "e7e5", "g1f3"] {
///     pos.play(mv.parse().expect("valid move"));
/// }
/// assert_eq!(pos.to_fen_str(),
///     "rnbqkbnr/pppp1ppp/8/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R b KQkq - 1 2");
/// ```
#[derive(Clone)]
pub struct Position {
    pieces: [[Bitboard; Piece::COUNT]; Color::COUNT],
    occupancy: [Bitboard; Color::COUNT],
    occupied: Bitboard,
    turn: Color,
    castling: [CastlingFlags; Color::COUNT],
    en_passant: Option<Square>,
    halfmove_clock: usize,
    fullmove_number: usize,
    repetitions: HashMap<Zobrist, usize>,
    hasher: Hasher,
}

impl Position {
    /// Returns the standard starting position.
    pub fn new() -> Position {
        Position::with_keys(ZobristKeys::shared_default())
    }

    /// Returns the standard starting position, hashed with `keys`.
    pub fn with_keys(keys: Arc<ZobristKeys>) -> Position {
        let mut pos = Position::empty_board(Hasher::new(keys));

        pos.pieces = [
            // white
            [
                Bitboard::from(0x0000_0000_0000_ff00u64), // pawns
                Bitboard::from(0x0000_0000_0000_0042u64), // knights
                Bitboard::from(0x0000_0000_0000_0024u64), // bishops
                Bitboard::from(0x0000_0000_0000_0081u64), // rooks
                Bitboard::from(0x0000_0000_0000_0008u64), // queen
                Bitboard::from(0x0000_0000_0000_0010u64), // king
            ],
            // black
            [
                Bitboard::from(0x00ff_0000_0000_0000u64),
                Bitboard::from(0x4200_0000_0000_0000u64),
                Bitboard::from(0x2400_0000_0000_0000u64),
                Bitboard::from(0x8100_0000_0000_0000u64),
                Bitboard::from(0x0800_0000_0000_0000u64),
                Bitboard::from(0x1000_0000_0000_0000u64),
            ],
        ];
        pos.castling = [CastlingFlags::default(); Color::COUNT];
        pos.update_occupancy();
        pos.record_position();

        pos
    }

    /// Returns a position with an empty board and no castling rights.
    fn empty_board(hasher: Hasher) -> Position {
        Position {
            pieces: [[Bitboard::new(); Piece::COUNT]; Color::COUNT],
            occupancy: [Bitboard::new(); Color::COUNT],
            occupied: Bitboard::new(),
            turn: White,
            castling: [CastlingFlags::NONE; Color::COUNT],
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            repetitions: HashMap::new(),
            hasher,
        }
    }

    /// Parse a position from a string containing [Forsyth-Edwards
    /// Notation (FEN)](https://en.wikipedia.org/wiki/Forsyth%E2%80%93Edwards_Notation).
    ///
    /// The half-move clock and full-move number may be left off, in which case they default to 0
    /// and 1.
    pub fn from_fen_str(s: &str) -> Result<Position> {
        Position::from_fen_with_keys(s, ZobristKeys::shared_default())
    }

    /// Parse a position from FEN, hashing it with `keys`.
    pub fn from_fen_with_keys(s: &str, keys: Arc<ZobristKeys>) -> Result<Position> {
        use Error::*;

        let mut pos = Position::empty_board(Hasher::new(keys));
        let mut fields = s.split_whitespace();

        // parse the board
        let board = fields.next().ok_or(MissingField("piece placement"))?;
        let ranks: Vec<&str> = board.split('/').collect();
        if ranks.len() != Rank::COUNT {
            return Err(WrongRankCount(ranks.len()));
        }
        for (text, rank) in ranks.iter().zip(Rank::ALL.iter().rev()) {
            let mut f = 0;
            for c in text.chars() {
                match c {
                    '1' ..= '8' => {
                        f += c.to_digit(10).expect("INFALLIBLE") as usize;
                    },
                    _ => {
                        let (color, piece) = Piece::from_symbol(c).ok_or(InvalidCharacter(c))?;
                        let file = File::ALL.get(f).copied().ok_or(WrongRankLength)?;
                        pos.pieces[color as usize][piece as usize]
                            .insert(Square::from_coord(file, *rank));
                        f += 1;
                    },
                }
                if f > File::COUNT {
                    return Err(WrongRankLength);
                }
            }
            if f != File::COUNT {
                return Err(WrongRankLength);
            }
        }
        for c in Color::ALL.iter().copied() {
            if pos.pieces(c, King).len() != 1 {
                return Err(InvalidKingCount);
            }
        }

        // parse the turn
        pos.turn = fields.next().ok_or(MissingField("side to move"))?.parse()?;

        // parse the castling flags
        match fields.next().ok_or(MissingField("castling"))? {
            "-" => {},
            flags => {
                for c in flags.chars() {
                    let color = if c.is_ascii_uppercase() { White } else { Black };
                    let castling = &mut pos.castling[color as usize];
                    match c {
                        'K' | 'k' => castling.rook_h_moved = false,
                        'Q' | 'q' => castling.rook_a_moved = false,
                        _ => return Err(InvalidCastlingFlags),
                    }
                    castling.king_moved = false;
                }
            },
        }

        // parse en passant square
        match fields.next().ok_or(MissingField("en passant"))? {
            "-" => {},
            ep => {
                let sq: Square = ep.parse()?;
                let behind = match pos.turn {
                    White => Rank::R6,
                    Black => Rank::R3,
                };
                if sq.rank() != behind {
                    return Err(InvalidSquare);
                }
                pos.en_passant = Some(sq);
            },
        }

        // parse half move clock, if present
        if let Some(plies) = fields.next() {
            pos.halfmove_clock = plies.parse().map_err(|_| InvalidCounter)?;
        }

        // parse move number, if present
        if let Some(move_num) = fields.next() {
            pos.fullmove_number = move_num.parse().map_err(|_| InvalidCounter)?;
        }

        pos.update_occupancy();
        pos.record_position();

        Ok(pos)
    }

    /// Converts the position to a FEN string.
    pub fn to_fen_str(&self) -> String {
        // the board
        let mut board = String::new();
        for rank in Rank::ALL.iter().rev() {
            let mut count = 0;
            for file in File::ALL.iter() {
                match self.piece_at(Square::from_coord(*file, *rank)) {
                    Some((c, p)) => {
                        if count > 0 {
                            board += &count.to_string();
                            count = 0;
                        }
                        board.push(p.symbol(c));
                    },
                    None => count += 1,
                }
            }
            if count > 0 {
                board += &count.to_string();
            }
            if *rank != Rank::R1 {
                board.push('/');
            }
        }

        // castling rights
        let mut castling = String::new();
        for (c, (k, q)) in Color::ALL.iter().zip(&[('K', 'Q'), ('k', 'q')]) {
            let flags = self.castling(*c);
            if flags.king_side() {
                castling.push(*k);
            }
            if flags.queen_side() {
                castling.push(*q);
            }
        }
        if castling.is_empty() {
            castling.push('-');
        }

        // en passant square
        let ep_square = match self.en_passant {
            Some(sq) => sq.to_string(),
            None => "-".to_string(),
        };

        format!("{} {} {} {} {} {}", board, self.turn, castling, ep_square,
                                     self.halfmove_clock, self.fullmove_number)
    }

    /// Returns the color whose turn it is.
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// Hands the move to the other side.
    pub fn flip_turn(&mut self) {
        self.turn = !self.turn;
    }

    /// Returns the en passant target square, if the last move was a two-square pawn advance.
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    /// Returns the castling flags of `c`.
    pub fn castling(&self, c: Color) -> CastlingFlags {
        self.castling[c as usize]
    }

    /// Returns the castling rights as a 4-bit code: 8 for white king-side, 4 for white
    /// queen-side, 2 for black king-side and 1 for black queen-side.
    pub fn castling_code(&self) -> u8 {
        let white = self.castling(White);
        let black = self.castling(Black);

        (white.king_side() as u8) << 3
            | (white.queen_side() as u8) << 2
            | (black.king_side() as u8) << 1
            | black.queen_side() as u8
    }

    /// Returns the number of plies since the last capture or pawn move.
    pub fn halfmove_clock(&self) -> usize {
        self.halfmove_clock
    }

    /// Returns the move number, which starts at 1 and increases after each of `Black`'s moves.
    pub fn fullmove_number(&self) -> usize {
        self.fullmove_number
    }

    /// Returns a `Bitboard` of all occupied `Square`s.
    pub fn occupied(&self) -> Bitboard {
        self.occupied
    }

    /// Returns a `Bitboard` of `Square`s occupied by player `c`.
    pub fn occupancy(&self, c: Color) -> Bitboard {
        self.occupancy[c as usize]
    }

    /// Returns a `Bitboard` of `Square`s occupied by the given `Color` and `Piece`.
    pub fn pieces(&self, c: Color, p: Piece) -> Bitboard {
        self.pieces[c as usize][p as usize]
    }

    /// Returns the square of the king of color `c`.
    pub fn king_square(&self, c: Color) -> Option<Square> {
        self.pieces(c, King).peek()
    }

    /// Returns the color and type of piece, if any, at the given location.
    pub fn piece_at(&self, sq: Square) -> Option<(Color, Piece)> {
        if !self.occupied.contains(sq) {
            return None;
        }

        let c = if self.occupancy(White).contains(sq) { White } else { Black };
        Piece::ALL.iter().copied()
            .find(|p| self.pieces(c, *p).contains(sq))
            .map(|p| (c, p))
    }

    /// Returns the position's Zobrist key.
    pub fn hash(&self) -> Zobrist {
        self.hasher.hash(self)
    }

    /// Returns how many times the current position has been recorded.
    pub fn repetition_count(&self) -> usize {
        self.repetitions.get(&self.hash()).copied().unwrap_or(0)
    }

    /// Records the current position in the repetition table.
    pub fn record_position(&mut self) {
        let hash = self.hash();
        *self.repetitions.entry(hash).or_insert(0) += 1;
    }

    /// Moves the piece on the start square of `mv` to its end square, returning `true` if a piece
    /// was captured.
    ///
    /// This takes care of captures (including en passant), promotion, moving the rook when the
    /// king castles, the castling flags and the en passant target. A move from an empty square
    /// changes nothing and returns `false`. The move is not checked for legality, and the turn,
    /// move counters and repetition table are left for the caller to update.
    pub fn apply(&mut self, mv: Move) -> bool {
        let (start, end) = (mv.start(), mv.end());
        let (color, piece) = match self.piece_at(start) {
            Some(found) => found,
            None => return false,
        };
        let mut captured = false;

        // clear the destination
        if let Some((c, p)) = self.piece_at(end) {
            self.pieces[c as usize][p as usize].remove(end);
            if c != color {
                captured = true;
                if p == Rook {
                    self.mark_rook_moved(c, end);
                }
            }
        }

        let ep = self.en_passant.take();
        match piece {
            King => {
                self.castling[color as usize].king_moved = true;

                // castling moves the rook too
                let rank = start.rank();
                match end.file() as i8 - start.file() as i8 {
                    2 => {
                        let rook = Square::from_coord(File::H, rank);
                        self.mark_rook_moved(color, rook);
                        self.move_piece(color, Rook, rook, Square::from_coord(File::F, rank));
                    },
                    -2 => {
                        let rook = Square::from_coord(File::A, rank);
                        self.mark_rook_moved(color, rook);
                        self.move_piece(color, Rook, rook, Square::from_coord(File::D, rank));
                    },
                    _ => {},
                }
            },
            Rook => self.mark_rook_moved(color, start),
            Pawn => {
                let (home, passed) = match color {
                    White => (Rank::R2, Rank::R3),
                    Black => (Rank::R7, Rank::R6),
                };
                let distance = (end.rank() as i8 - start.rank() as i8).abs();

                if distance == 2 && start.rank() == home {
                    self.en_passant = Some(Square::from_coord(start.file(), passed));
                } else if Some(end) == ep && start.file() != end.file() {
                    let victim = Square::from_coord(end.file(), start.rank());
                    let pawns = &mut self.pieces[!color as usize][Pawn as usize];
                    captured |= pawns.contains(victim);
                    pawns.remove(victim);
                }
            },
            _ => {},
        }

        let placed = mv.promotion().unwrap_or(piece);
        self.pieces[color as usize][piece as usize].remove(start);
        self.pieces[color as usize][placed as usize].insert(end);
        self.update_occupancy();

        captured
    }

    /// Applies `mv` and then does everything [`apply`](#method.apply) leaves to the caller: resets
    /// or increments the half-move clock, advances the move number after `Black` moves, flips the
    /// turn and records the new position. Returns `true` if a piece was captured.
    pub fn play(&mut self, mv: Move) -> bool {
        let pawn_move = self.pieces(self.turn, Pawn).contains(mv.start());
        let captured = self.apply(mv);

        if captured || pawn_move {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }
        if self.turn == Black {
            self.fullmove_number += 1;
        }
        self.flip_turn();
        self.record_position();

        captured
    }

    fn move_piece(&mut self, c: Color, p: Piece, from: Square, to: Square) {
        let bits = &mut self.pieces[c as usize][p as usize];
        if bits.contains(from) {
            bits.remove(from);
            bits.insert(to);
        }
    }

    /// Sets the rook flag of `c` if `sq` is one of its rooks' starting squares.
    fn mark_rook_moved(&mut self, c: Color, sq: Square) {
        if sq.rank() != c.home_rank() {
            return;
        }
        match sq.file() {
            File::A => self.castling[c as usize].rook_a_moved = true,
            File::H => self.castling[c as usize].rook_h_moved = true,
            _ => {},
        }
    }

    fn update_occupancy(&mut self) {
        for c in Color::ALL.iter().copied() {
            self.occupancy[c as usize] = self.pieces[c as usize].iter()
                .fold(Bitboard::new(), |acc, bits| acc | *bits);
        }
        self.occupied = self.occupancy[White as usize] | self.occupancy[Black as usize];
    }
}

impl Default for Position {
    /// Returns the standard starting Position.
    fn default() -> Self {
        Position::new()
    }
}

impl fmt::Display for Position {
    /// Writes out the position using FEN.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.to_fen_str().fmt(f)
    }
}

impl fmt::Debug for Position {
    /// Writes out the position using FEN.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.to_fen_str().fmt(f)
    }
}

impl FromStr for Position {
    type Err = Error;

    /// Parse a position from a FEN string.
    fn from_str(s: &str) -> Result<Self> {
        Position::from_fen_str(s)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
pub mod zobrist;
mod legal;

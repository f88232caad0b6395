//! Provides data and functions used to compute moves and attacks
//
//  Copyright 2019 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use lazy_static::lazy_static;
use super::*;
use crate::chess::CastlingFlags;

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2), (2, 1), (2, -1), (1, -2), (-1, -2), (-2, -1), (-2, 1), (-1, 2),
];

const DIAGONALS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];
const ORTHOGONALS: [(i8, i8); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

lazy_static! {
    static ref KNIGHT_ATTACKS: [Bitboard; Square::COUNT] = {
        let mut table = [Bitboard::new(); Square::COUNT];

        for sq in Square::iter() {
            table[sq as usize] = KNIGHT_OFFSETS.iter()
                .filter_map(|&(df, dr)| offset(sq, df, dr))
                .collect();
        }

        table
    };
}

/// Returns the square `df` files and `dr` ranks away from `sq`, if it is on the board.
fn offset(sq: Square, df: i8, dr: i8) -> Option<Square> {
    let file = sq.file() as i8 + df;
    let rank = sq.rank() as i8 + dr;

    if file < 0 || file >= File::COUNT as i8 || rank < 0 || rank >= Rank::COUNT as i8 {
        None
    } else {
        Some(Square::from_coord(File::ALL[file as usize], Rank::ALL[rank as usize]))
    }
}

fn ray_attacks(sq: Square, occ: Bitboard, directions: &[(i8, i8)]) -> Bitboard {
    let mut attacks = Bitboard::new();

    for &(df, dr) in directions {
        let mut from = sq;
        while let Some(to) = offset(from, df, dr) {
            attacks.insert(to);
            if occ.contains(to) {
                break;
            }
            from = to;
        }
    }

    attacks
}

/// Computes the squares a pawn of `color` on `sq` attacks
///
/// These are the two forward diagonals, whether or not anything stands on them.
///
/// ```rust
/// use gambit::chess::{Color, Square};
/// use gambit::chess::bitboard::{Bitboard, pawn_attacks};
///
/// assert_eq!(pawn_attacks(Square::A2, Color::White), Bitboard::from(Square::B3));
/// assert_eq!(pawn_attacks(Square::E7, Color::Black),
///     Bitboard::from(Square::D6) | Square::F6.into());
/// ```
pub fn pawn_attacks(sq: Square, color: Color) -> Bitboard {
    let pawn = Bitboard::from(sq);
    let east = pawn & !Bitboard::FILE_H;
    let west = pawn & !Bitboard::FILE_A;

    match color {
        Color::White => east.shift(9) | west.shift(7),
        Color::Black => east.shift(-7) | west.shift(-9),
    }
}

/// Computes the destinations of a pawn of `color` on `sq`
///
/// `occupied` holds every occupied square and `enemies` the squares held by the other side. A
/// pawn on its home rank may advance two squares if both squares in front of it are empty. A
/// diagonal move onto `ep` is included when the pawn attacks that square.
pub fn pawn_moves(sq: Square, color: Color, occupied: Bitboard, enemies: Bitboard,
    ep: Option<Square>) -> Bitboard
{
    let (forward, home) = match color {
        Color::White => (8, Rank::R2),
        Color::Black => (-8, Rank::R7),
    };

    let single = Bitboard::from(sq).shift(forward) & !occupied;
    let mut moves = single;
    if sq.rank() == home {
        moves |= single.shift(forward) & !occupied;
    }

    let attacks = pawn_attacks(sq, color);
    moves |= attacks & enemies;
    if let Some(target) = ep {
        if attacks.contains(target) {
            moves.insert(target);
        }
    }

    moves
}

/// Computes knight-like attacks to or from `sq`
///
/// See the module-level documentation for more information about
/// [this function](index.html#leapers-knights-and-kings).
#[inline]
pub fn knight_attacks(sq: Square) -> Bitboard {
    KNIGHT_ATTACKS[sq as usize]
}

/// Computes bishop-like attacks to or from `sq` based on the occupied squares given by `occ`
///
/// See the module-level documentation for more information about
/// [this function](index.html#sliding-attacks-bishops-rooks-and-queens).
pub fn bishop_attacks(sq: Square, occ: Bitboard) -> Bitboard {
    ray_attacks(sq, occ, &DIAGONALS)
}

/// Computes rook-like attacks to or from `sq` based on the occupied squares given by `occ`
///
/// See the module-level documentation for more information about
/// [this function](index.html#sliding-attacks-bishops-rooks-and-queens).
pub fn rook_attacks(sq: Square, occ: Bitboard) -> Bitboard {
    ray_attacks(sq, occ, &ORTHOGONALS)
}

/// Computes queen-like attacks to or from `sq` based on the occupied squares given by `occ`
#[inline]
pub fn queen_attacks(sq: Square, occ: Bitboard) -> Bitboard {
    rook_attacks(sq, occ) | bishop_attacks(sq, occ)
}

/// Computes king-like attacks to or from `sq`
///
/// Castling is never an attack; see [`king_moves`](fn.king_moves.html).
pub fn king_attacks(sq: Square) -> Bitboard {
    let king = Bitboard::from(sq);
    let east = king & !Bitboard::FILE_H;
    let west = king & !Bitboard::FILE_A;

    king.shift(8) | king.shift(-8)
        | east.shift(1) | east.shift(9) | east.shift(-7)
        | west.shift(-1) | west.shift(7) | west.shift(-9)
}

/// Computes the castling destinations of the king of `color`
///
/// `rooks` holds the rooks of `color` and `attacked` the squares attacked by the opponent. The
/// result contains the g-file square for king-side castling and the c-file square for queen-side
/// castling, when each is available.
///
/// ```rust
/// use gambit::chess::{CastlingFlags, Color, Square};
/// use gambit::chess::bitboard::{Bitboard, castling_moves};
///
/// let rooks = Bitboard::from(Square::A1) | Square::H1.into();
/// let occ = rooks | Square::E1.into() | Square::B1.into();
/// let moves = castling_moves(Color::White, CastlingFlags::default(), occ, Bitboard::new(), rooks);
/// assert_eq!(moves, Bitboard::from(Square::G1));
/// ```
pub fn castling_moves(color: Color, flags: CastlingFlags, occupied: Bitboard, attacked: Bitboard,
    rooks: Bitboard) -> Bitboard
{
    let home = color.home_rank();
    let sq = |file| Square::from_coord(file, home);
    let mut moves = Bitboard::new();

    if flags.king_moved || attacked.contains(sq(File::E)) {
        return moves;
    }

    if !flags.rook_h_moved && rooks.contains(sq(File::H)) {
        let path = Bitboard::from(sq(File::F)) | sq(File::G).into();
        if path.is_disjoint(occupied) && path.is_disjoint(attacked) {
            moves.insert(sq(File::G));
        }
    }

    if !flags.rook_a_moved && rooks.contains(sq(File::A)) {
        let between = Bitboard::from(sq(File::B)) | sq(File::C).into() | sq(File::D).into();
        let path = Bitboard::from(sq(File::C)) | sq(File::D).into();
        if between.is_disjoint(occupied) && path.is_disjoint(attacked) {
            moves.insert(sq(File::C));
        }
    }

    moves
}

/// Computes the destinations of the king of `color` on `sq`
///
/// Squares held by `own` pieces or attacked by the opponent are excluded. When the king stands
/// on its starting square, the castling destinations from
/// [`castling_moves`](fn.castling_moves.html) are added.
pub fn king_moves(sq: Square, color: Color, own: Bitboard, occupied: Bitboard, attacked: Bitboard,
    flags: CastlingFlags, rooks: Bitboard) -> Bitboard
{
    let mut moves = king_attacks(sq) & !own & !attacked;

    if sq == Square::from_coord(File::E, color.home_rank()) {
        moves |= castling_moves(color, flags, occupied, attacked, rooks);
    }

    moves
}

#[cfg(test)]
mod tests {
    use super::*;

    fn squares(list: &[Square]) -> Bitboard {
        list.iter().copied().collect()
    }

    #[test]
    fn knight_attacks_in_the_corner_and_center() {
        assert_eq!(knight_attacks(Square::A1), squares(&[Square::B3, Square::C2]));
        assert_eq!(knight_attacks(Square::H8), squares(&[Square::G6, Square::F7]));
        assert_eq!(knight_attacks(Square::D4).len(), 8);
        assert_eq!(knight_attacks(Square::G2).len(), 4);
    }

    #[test]
    fn king_attacks_do_not_wrap() {
        assert_eq!(king_attacks(Square::A1), squares(&[Square::A2, Square::B1, Square::B2]));
        assert_eq!(king_attacks(Square::H4),
            squares(&[Square::H3, Square::H5, Square::G3, Square::G4, Square::G5]));
        assert_eq!(king_attacks(Square::E4).len(), 8);
    }

    #[test]
    fn sliders_stop_on_the_first_blocker() {
        let occ = squares(&[Square::D6, Square::F2]);

        let rook = rook_attacks(Square::D4, occ);
        assert!(rook.contains(Square::D6));
        assert!(!rook.contains(Square::D7));
        assert!(rook.contains(Square::D1));
        assert!(rook.contains(Square::A4));
        assert!(rook.contains(Square::H4));
        assert_eq!(rook.len(), 12);

        let bishop = bishop_attacks(Square::D4, occ);
        assert!(bishop.contains(Square::F2));
        assert!(!bishop.contains(Square::G1));
        assert!(bishop.contains(Square::H8));
        assert!(bishop.contains(Square::A1));
        assert!(bishop.contains(Square::A7));

        assert_eq!(queen_attacks(Square::D4, occ), rook | bishop);
    }

    #[test]
    fn rook_attacks_on_empty_board() {
        for sq in Square::iter() {
            assert_eq!(rook_attacks(sq, Bitboard::new()).len(), 14);
        }
    }

    #[test]
    fn pawn_moves_from_home_rank() {
        let occ = Bitboard::new();
        assert_eq!(pawn_moves(Square::E2, Color::White, occ, occ, None),
            squares(&[Square::E3, Square::E4]));
        assert_eq!(pawn_moves(Square::E7, Color::Black, occ, occ, None),
            squares(&[Square::E6, Square::E5]));
        assert_eq!(pawn_moves(Square::E3, Color::White, occ, occ, None),
            squares(&[Square::E4]));
    }

    #[test]
    fn blocked_pawns_cannot_jump() {
        let occ = squares(&[Square::E3]);
        assert!(pawn_moves(Square::E2, Color::White, occ, Bitboard::new(), None).is_empty());

        let occ = squares(&[Square::E4]);
        assert_eq!(pawn_moves(Square::E2, Color::White, occ, Bitboard::new(), None),
            squares(&[Square::E3]));
    }

    #[test]
    fn pawn_captures_do_not_wrap() {
        let enemies = squares(&[Square::H3, Square::B3]);
        assert_eq!(pawn_moves(Square::A2, Color::White, enemies, enemies, None),
            squares(&[Square::A3, Square::A4, Square::B3]));

        let enemies = squares(&[Square::A6, Square::G6]);
        assert_eq!(pawn_moves(Square::H7, Color::Black, enemies, enemies, None),
            squares(&[Square::H6, Square::H5, Square::G6]));
    }

    #[test]
    fn pawn_captures_en_passant() {
        let occ = squares(&[Square::E5, Square::D5]);
        let moves = pawn_moves(Square::E5, Color::White, occ, squares(&[Square::D5]),
            Some(Square::D6));
        assert_eq!(moves, squares(&[Square::E6, Square::D6]));

        let moves = pawn_moves(Square::E4, Color::White, occ, Bitboard::new(), Some(Square::D6));
        assert!(!moves.contains(Square::D6));
    }

    #[test]
    fn castling_requires_rights_empty_path_and_safe_squares() {
        let rooks = squares(&[Square::A8, Square::H8]);
        let occ = rooks | Square::E8.into();
        let none = Bitboard::new();
        let flags = CastlingFlags::default();

        assert_eq!(castling_moves(Color::Black, flags, occ, none, rooks),
            squares(&[Square::C8, Square::G8]));

        let moved = CastlingFlags { rook_h_moved: true, ..flags };
        assert_eq!(castling_moves(Color::Black, moved, occ, none, rooks), squares(&[Square::C8]));

        let moved = CastlingFlags { king_moved: true, ..flags };
        assert!(castling_moves(Color::Black, moved, occ, none, rooks).is_empty());

        // b8 must be empty, but may be attacked
        assert_eq!(castling_moves(Color::Black, flags, occ | Square::B8.into(), none, rooks),
            squares(&[Square::G8]));
        assert_eq!(castling_moves(Color::Black, flags, occ, squares(&[Square::B8]), rooks),
            squares(&[Square::C8, Square::G8]));

        // f8 is the transit square
        assert_eq!(castling_moves(Color::Black, flags, occ, squares(&[Square::F8]), rooks),
            squares(&[Square::C8]));

        // no castling out of check
        assert!(castling_moves(Color::Black, flags, occ, squares(&[Square::E8]), rooks)
            .is_empty());

        // the rook must still be on its corner
        assert_eq!(castling_moves(Color::Black, flags, occ, none, squares(&[Square::A8])),
            squares(&[Square::C8]));
    }

    #[test]
    fn king_moves_avoid_own_pieces_and_attacked_squares() {
        let own = squares(&[Square::D1, Square::E1]);
        let attacked = squares(&[Square::F2]);
        let moves = king_moves(Square::E1, Color::White, own, own, attacked,
            CastlingFlags::default(), Bitboard::new());

        assert_eq!(moves, squares(&[Square::D2, Square::E2, Square::F1]));
    }
}

//! Module for counting and printing the number of variations from a given position
//
//  Copyright 2019 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use crate::chess::*;

/// Print the number of variations of the given `depth` for each legal move from `pos`
pub fn print(pos: &Position, depth: usize) -> usize {
    if depth < 1 {
        return 1;
    }

    let mut total = 0;

    for m in pos.legal_moves(pos.turn()) {
        let mut next = pos.clone();
        next.play(m);
        let count = count(&next, depth - 1);
        total += count;
        println!("\t{:7}\t{:12}\t{}", m.to_string(), count, next);
    }

    total
}

/// Count the number of variations of the given `depth` from `pos`
pub fn count(pos: &Position, depth: usize) -> usize {
    if depth < 1 {
        return 1;
    }

    let moves = pos.legal_moves(pos.turn());
    if depth == 1 {
        return moves.len();
    }

    moves.into_iter()
        .map(|m| {
            let mut next = pos.clone();
            next.play(m);
            count(&next, depth - 1)
        })
        .sum()
}

//! A human player at the terminal
//
//  Copyright 2020 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::io::{self, BufRead, Write};
use lazy_static::lazy_static;
use log::{error, info};
use regex::Regex;
use crate::chess::{File, Move, Piece, Position, Rank, Square};
use crate::chess::error::{Error, Result};
use super::{InputProvider, OutputHandler};

lazy_static! {
    static ref MOVE_INPUT: Regex = Regex::new(
        r"(?i)^\s*(?:(resign)|([a-h][1-8])\s*([a-h][1-8])\s*(queen|rook|bishop|knight|[qrbn])?)\s*$"
    ).expect("INFALLIBLE");
}

/// Parses a line typed by a player.
///
/// Accepts a move as two squares, with or without a space between them, optionally followed by
/// a promotion piece as a letter or a name (`e2e4`, `e2 e4`, `e7e8q`, `e7 e8 queen`). `resign`
/// gives `Error::Resignation`.
pub fn parse_input(line: &str) -> Result<Move> {
    let caps = MOVE_INPUT.captures(line).ok_or(Error::InvalidInput)?;

    if caps.get(1).is_some() {
        return Err(Error::Resignation);
    }

    let start: Square = caps[2].to_ascii_lowercase().parse()?;
    let end: Square = caps[3].to_ascii_lowercase().parse()?;
    match caps.get(4) {
        Some(piece) => Ok(Move::promoting(start, end, piece.as_str().parse::<Piece>()?)),
        None => Ok(Move::new(start, end)),
    }
}

/// Returns a text picture of the board with `White` at the bottom.
///
/// Pieces are shown by their FEN letters and empty squares by `.`.
pub fn render_board(position: &Position) -> String {
    let mut board = String::new();

    for rank in Rank::ALL.iter().rev() {
        board += &format!("{} ", rank);
        for file in File::ALL.iter() {
            match position.piece_at(Square::from_coord(*file, *rank)) {
                Some((c, p)) => board.push(p.symbol(c)),
                None => board.push('.'),
            }
            board.push(' ');
        }
        board.pop();
        board.push('\n');
    }
    board += "  a b c d e f g h";

    board
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Reads moves from a player, prompting on the given writer
#[derive(Debug)]
pub struct ConsoleInput<R, W> {
    reader: R,
    writer: W,
}

impl ConsoleInput<io::BufReader<io::Stdin>, io::Stdout> {
    /// Reads from standard input and prompts on standard output.
    pub fn stdin() -> Self {
        ConsoleInput::new(io::BufReader::new(io::stdin()), io::stdout())
    }
}

impl<R: BufRead, W: Write> ConsoleInput<R, W> {
    /// Creates a player that reads lines from `reader` and prompts on `writer`.
    pub fn new(reader: R, writer: W) -> Self {
        ConsoleInput { reader, writer }
    }
}

impl<R: BufRead, W: Write> InputProvider for ConsoleInput<R, W> {
    /// Prompts for and reads one line. End of input resigns the game.
    fn get_move(&mut self, position: &Position) -> Result<Move> {
        let prompt = write!(self.writer, "{} to move: ", position.turn())
            .and_then(|_| self.writer.flush());
        if let Err(err) = prompt {
            error!("io error: {}", err);
        }

        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            Ok(0) => return Err(Error::Resignation),
            Ok(_) => {},
            Err(err) => {
                error!("io error: {}", err);
                return Err(Error::InvalidInput);
            },
        }
        info!("<{}>: {}", position.turn(), line.trim());

        let result = parse_input(&line);
        if let Err(err) = result {
            if err != Error::Resignation {
                if let Err(write_err) = writeln!(self.writer, "{}: {}", line.trim(), err) {
                    error!("io error: {}", write_err);
                }
            }
        }

        result
    }
}

/// Prints the board and check notices to a writer
#[derive(Debug)]
pub struct ConsoleOutput<W> {
    writer: W,
    show_board: bool,
}

impl ConsoleOutput<io::Stdout> {
    /// Prints to standard output.
    pub fn stdout() -> Self {
        ConsoleOutput::new(io::stdout())
    }
}

impl<W: Write> ConsoleOutput<W> {
    /// Creates a handler that prints to `writer`.
    pub fn new(writer: W) -> Self {
        ConsoleOutput { writer, show_board: true }
    }

    /// Stops the handler from printing the board, leaving only check notices.
    pub fn without_board(mut self) -> Self {
        self.show_board = false;
        self
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> OutputHandler for ConsoleOutput<W> {
    fn display_board(&mut self, position: &Position) {
        if !self.show_board {
            return;
        }
        if let Err(err) = writeln!(self.writer, "\n{}\n", render_board(position)) {
            error!("io error: {}", err);
        }
    }

    fn display_check(&mut self) {
        if let Err(err) = writeln!(self.writer, "Check!") {
            error!("io error: {}", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_moves_in_several_forms() {
        let e2e4 = Move::new(Square::E2, Square::E4);
        let e7e8q = Move::promoting(Square::E7, Square::E8, Piece::Queen);

        assert_eq!(parse_input("e2e4\n"), Ok(e2e4));
        assert_eq!(parse_input("  e2 e4 "), Ok(e2e4));
        assert_eq!(parse_input("E2E4"), Ok(e2e4));
        assert_eq!(parse_input("e7e8q"), Ok(e7e8q));
        assert_eq!(parse_input("e7 e8 queen"), Ok(e7e8q));
        assert_eq!(parse_input("e7 e8 Queen"), Ok(e7e8q));
        assert_eq!(parse_input("a2a1 n"),
            Ok(Move::promoting(Square::A2, Square::A1, Piece::Knight)));
    }

    #[test]
    fn resign_is_reported_as_resignation() {
        assert_eq!(parse_input("resign"), Err(Error::Resignation));
        assert_eq!(parse_input("Resign\n"), Err(Error::Resignation));
    }

    #[test]
    fn garbage_is_invalid_input() {
        for line in &["", "e2", "e2e9", "i2i4", "e2e4 king", "e2e4x", "resign now"] {
            assert_eq!(parse_input(line), Err(Error::InvalidInput), "{}", line);
        }
    }

    #[test]
    fn console_input_reads_lines_until_the_end() {
        let input: &[u8] = b"nonsense\ne2 e4\n";
        let mut player = ConsoleInput::new(input, Vec::new());
        let pos = Position::new();

        assert_eq!(player.get_move(&pos), Err(Error::InvalidInput));
        assert_eq!(player.get_move(&pos), Ok(Move::new(Square::E2, Square::E4)));
        assert_eq!(player.get_move(&pos), Err(Error::Resignation));

        let prompts = String::from_utf8(player.writer).expect("utf8");
        assert!(prompts.starts_with("w to move: "));
        assert!(prompts.contains("nonsense: invalid input\n"));
    }

    /// A writer that always fails
    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
    }

    #[test]
    fn write_errors_do_not_stop_input() {
        let input: &[u8] = b"nonsense
e2e4
";
        let mut player = ConsoleInput::new(input, Broken);
        let pos = Position::new();

        assert_eq!(player.get_move(&pos), Err(Error::InvalidInput));
        assert_eq!(player.get_move(&pos), Ok(Move::new(Square::E2, Square::E4)));
    }

    #[test]
    fn renders_the_starting_position() {
        let board = render_board(&Position::new());
        let lines: Vec<&str> = board.lines().collect();

        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], "8 r n b q k b n r");
        assert_eq!(lines[4], "4 . . . . . . . .");
        assert_eq!(lines[7], "1 R N B Q K B N R");
        assert_eq!(lines[8], "  a b c d e f g h");
    }

    #[test]
    fn console_output_prints_check() {
        let mut out = ConsoleOutput::new(Vec::new());
        out.display_check();
        assert_eq!(String::from_utf8(out.into_inner()).expect("utf8"), "Check!\n");
    }

    #[test]
    fn console_output_can_skip_the_board() {
        let mut out = ConsoleOutput::new(Vec::new()).without_board();
        out.display_board(&Position::new());
        out.display_check();
        assert_eq!(String::from_utf8(out.into_inner()).expect("utf8"), "Check!\n");

        let mut out = ConsoleOutput::new(Vec::new());
        out.display_board(&Position::new());
        assert!(String::from_utf8(out.into_inner()).expect("utf8").contains("R N B Q K B N R"));
    }
}

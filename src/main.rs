//! The gambit chess program.
//
//  Copyright 2020 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
#![warn(missing_docs, missing_debug_implementations, unused_extern_crates)]
#![warn(clippy::unimplemented, clippy::todo)]
#![warn(clippy::option_unwrap_used, clippy::result_unwrap_used)]

use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;
use clap::{App, Arg, ArgMatches, SubCommand, crate_version};
use log::info;
use simplelog::{WriteLogger, LevelFilter, Config};
use gambit::chess::{variations, Position, ZobristKeys};
use gambit::engine::{EngineOutput, EnginePlayer};
use gambit::game::{self, InputProvider, OutputHandler};
use gambit::game::console::{ConsoleInput, ConsoleOutput};

const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

fn main() -> Result<(), Error> {
    let app_dir = dirs::home_dir()
        .map(|home| { home.join(".gambit") })
        .unwrap_or_else(|| PathBuf::from("."));
    let default_keys = app_dir.join("zobrist_keys.yaml");

    let matches =
        App::new("Gambit")
            .version(crate_version!())
            .author("Mike Leany")
            .arg(Arg::with_name("log")
                .long("log")
                .short("l")
                .global(true)
                .help("Turns on logging"))
            .arg(Arg::with_name("log-file")
                .long("log-file")
                .global(true)
                .value_name("LOG_FILE")
                .takes_value(true)
                .default_value("gambit.log")
                .help("Sets the log file if logging is turned on"))
            .arg(Arg::with_name("log-level")
                .long("log-level")
                .global(true)
                .value_name("LEVEL")
                .takes_value(true)
                .default_value("info")
                .possible_values(&["off", "error", "warn", "info", "debug", "trace"])
                .help("Sets the log level if logging is turned on"))
            .subcommand(SubCommand::with_name("play")
                .about("Plays a game at the terminal. By default a human plays White against \
                        the engine.")
                .arg(Arg::with_name("depth")
                    .long("depth")
                    .short("d")
                    .value_name("DEPTH")
                    .takes_value(true)
                    .default_value("4")
                    .help("Number of plies the engine searches"))
                .arg(Arg::with_name("white")
                    .long("white")
                    .value_name("PLAYER")
                    .takes_value(true)
                    .possible_values(&["human", "engine"])
                    .default_value("human")
                    .help("Who plays White"))
                .arg(Arg::with_name("black")
                    .long("black")
                    .value_name("PLAYER")
                    .takes_value(true)
                    .possible_values(&["human", "engine"])
                    .default_value("engine")
                    .help("Who plays Black"))
                .arg(Arg::with_name("keys")
                    .long("keys")
                    .value_name("KEY_FILE")
                    .takes_value(true)
                    .help("Zobrist key table to load, or to create if it does not exist \
                           [default: ~/.gambit/zobrist_keys.yaml]"))
                .arg(Arg::with_name("fen")
                    .long("fen")
                    .value_name("FEN_STRING")
                    .takes_value(true)
                    .default_value(START_FEN)
                    .hide_default_value(true)
                    .help("Starting position in Forsyth-Edwards Notation (FEN)")))
            .subcommand(SubCommand::with_name("counts")
                .about("Counts the number of variations from a given starting position \
                        to a specified\ndepth. Defaults to the standard starting position.")
                .arg(Arg::with_name("depth")
                    .long("depth")
                    .short("d")
                    .value_name("DEPTH")
                    .takes_value(true)
                    .required(true)
                    .help("Depth to search the position"))
                .arg(Arg::with_name("fen")
                    .value_name("FEN_STRING")
                    .default_value(START_FEN)
                    .hide_default_value(true)
                    .multiple(true)
                    .help("Position to search in Forsyth-Edwards Notation (FEN)")))
            .get_matches();

    let log_file = PathBuf::from(matches.value_of_os("log-file").expect("INFALLIBLE"));
    let log_level = match matches.value_of("log-level") {
        Some("off") => LevelFilter::Off,
        Some("error") => LevelFilter::Error,
        Some("warn") => LevelFilter::Warn,
        Some("info") => LevelFilter::Info,
        Some("debug") => LevelFilter::Debug,
        Some("trace") => LevelFilter::Trace,
        Some(level) => return Err(Error(format!("{}: invalid log level", level))),
        None => unreachable!(),
    };

    let _logger = if matches.is_present("log") {
        WriteLogger::init(
            log_level,
            Config::default(),
            File::create(&log_file).map_err(|err| {
                Error(format!("{}: {}", log_file.display(), err))
            })?)
    } else {
        WriteLogger::init(LevelFilter::Off, Config::default(), std::io::sink())
    };

    match matches.subcommand() {
        ("play", Some(matches)) => play(matches, default_keys)?,
        ("counts", Some(matches)) => {
            let depth = parse_depth(matches)?;

            println!();
            for fen in matches.values_of("fen").expect("INFALLIBLE") {
                let pos: Position = fen.parse()
                    .map_err(|err| {Error(format!("{}: {}", fen, err))})?;
                println!("{}", fen);
                let count = variations::print(&pos, depth);
                println!("Depth {} total:\t{:12}\n", depth, count);
            }
        },
        _ => play(&ArgMatches::default(), default_keys)?,
    }

    Ok(())
}

/// Plays a game as set up by the `play` subcommand's arguments.
fn play(matches: &ArgMatches, default_keys: PathBuf) -> Result<(), Error> {
    let depth = match matches.value_of("depth") {
        Some(_) => parse_depth(matches)?,
        None => 4,
    };

    let key_file = matches.value_of_os("keys").map(PathBuf::from).unwrap_or(default_keys);
    let keys = ZobristKeys::load_or_generate(&key_file)
        .map_err(|err| Error(format!("{}: {}", key_file.display(), err)))?;

    let fen = matches.value_of("fen").unwrap_or(START_FEN);
    let mut position = Position::from_fen_with_keys(fen, Arc::new(keys))
        .map_err(|err| Error(format!("{}: {}", fen, err)))?;

    let white_engine = matches.value_of("white") == Some("engine");
    let black_engine = matches.value_of("black").unwrap_or("engine") == "engine";

    // the board is printed once per turn, through White's output unless only Black is human
    let (mut white_in, mut white_out) = player(white_engine, depth, !white_engine || black_engine);
    let (mut black_in, mut black_out) = player(black_engine, depth, white_engine && !black_engine);

    let result = game::play(&mut position,
        white_in.as_mut(), black_in.as_mut(),
        white_out.as_mut(), black_out.as_mut());

    info!("{}", position);
    println!("{}", result);

    Ok(())
}

/// Returns the input and output for one side, printing the board only if `show_board` is set.
fn player(engine: bool, depth: usize, show_board: bool)
-> (Box<dyn InputProvider>, Box<dyn OutputHandler>) {
    let input: Box<dyn InputProvider> = if engine {
        Box::new(EnginePlayer::new(depth))
    } else {
        Box::new(ConsoleInput::stdin())
    };
    let output: Box<dyn OutputHandler> = match (engine, show_board) {
        (_, true) => Box::new(ConsoleOutput::stdout()),
        (false, false) => Box::new(ConsoleOutput::stdout().without_board()),
        (true, false) => Box::new(EngineOutput),
    };

    (input, output)
}

fn parse_depth(matches: &ArgMatches) -> Result<usize, Error> {
    matches
        .value_of("depth")
        .expect("INFALLIBLE")
        .parse()
        .map_err(|_| {Error("depth must be numeric".to_owned())})
}

struct Error(String);

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        self.0.fmt(f)
    }
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        std::fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for Error { }

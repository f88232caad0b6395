//! Contains structures and data for Zobrist hash keys
//
//  Copyright 2020 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::convert::TryFrom;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use std::sync::Arc;
use lazy_static::lazy_static;
use log::{debug, info};
use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use super::*;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A 64-bit hash key generated from a position
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct Zobrist(u64);

impl fmt::Display for Zobrist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

impl fmt::LowerHex for Zobrist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<Zobrist> for u64 {
    fn from(key: Zobrist) -> Self {
        key.0
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// The random keys a [`Hasher`](struct.Hasher.html) combines into a
/// [`Zobrist`](struct.Zobrist.html)
///
/// There is one key per (color, piece, square), one per castling rights code, one per en passant
/// file and one for `White` to move. A key table never changes once created; positions share it
/// through an `Arc`.
#[derive(Clone, PartialEq, Eq)]
pub struct ZobristKeys {
    pieces: [[[u64; Square::COUNT]; Piece::COUNT]; Color::COUNT],
    castling: [u64; 16],
    en_passant: [u64; File::COUNT],
    white_to_move: u64,
}

lazy_static! {
    static ref DEFAULT_KEYS: Arc<ZobristKeys> = Arc::new(ZobristKeys::from_entropy());
}

impl ZobristKeys {
    /// Generates a fresh key table from `rng`.
    pub fn generate<R: Rng>(rng: &mut R) -> ZobristKeys {
        let mut keys = ZobristKeys {
            pieces: [[[0; Square::COUNT]; Piece::COUNT]; Color::COUNT],
            castling: [0; 16],
            en_passant: [0; File::COUNT],
            white_to_move: rng.gen(),
        };

        for color in keys.pieces.iter_mut() {
            for piece in color.iter_mut() {
                for key in piece.iter_mut() {
                    *key = rng.gen();
                }
            }
        }
        for key in keys.castling.iter_mut().chain(keys.en_passant.iter_mut()) {
            *key = rng.gen();
        }

        keys
    }

    /// Generates a fresh key table seeded from the operating system.
    pub fn from_entropy() -> ZobristKeys {
        ZobristKeys::generate(&mut StdRng::from_entropy())
    }

    /// Generates a reproducible key table from `seed`.
    pub fn seeded(seed: u64) -> ZobristKeys {
        ZobristKeys::generate(&mut StdRng::seed_from_u64(seed))
    }

    /// Returns the process-wide key table used by positions that were not given one.
    ///
    /// It is generated from entropy on first use.
    pub fn shared_default() -> Arc<ZobristKeys> {
        Arc::clone(&DEFAULT_KEYS)
    }

    /// Reads a key table from the YAML file at `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> KeyTableResult<ZobristKeys> {
        let text = fs::read_to_string(path)?;
        let file: KeyTableFile = serde_yaml::from_str(&text)?;

        ZobristKeys::try_from(file)
    }

    /// Writes the key table to `path` as YAML, creating parent directories as needed.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> KeyTableResult<()> {
        let path = path.as_ref();
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(path, serde_yaml::to_string(&KeyTableFile::from(self))?)?;

        Ok(())
    }

    /// Loads the key table at `path` if the file exists. Otherwise generates a new table and
    /// saves it there.
    pub fn load_or_generate<P: AsRef<Path>>(path: P) -> KeyTableResult<ZobristKeys> {
        let path = path.as_ref();

        if path.exists() {
            debug!("loading zobrist keys from {}", path.display());
            ZobristKeys::load(path)
        } else {
            info!("generating zobrist keys at {}", path.display());
            let keys = ZobristKeys::from_entropy();
            keys.save(path)?;
            Ok(keys)
        }
    }
}

impl fmt::Debug for ZobristKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZobristKeys")
            .field("white_to_move", &format_args!("{:016x}", self.white_to_move))
            .finish()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// On-disk layout of a key table. Serde does not derive for arrays of this size, so the file uses
/// nested sequences whose lengths are checked on load.
#[derive(Serialize, Deserialize)]
struct KeyTableFile {
    pieces: Vec<Vec<Vec<u64>>>,
    castling: Vec<u64>,
    en_passant: Vec<u64>,
    white_to_move: u64,
}

impl From<&ZobristKeys> for KeyTableFile {
    fn from(keys: &ZobristKeys) -> Self {
        KeyTableFile {
            pieces: keys.pieces.iter()
                .map(|color| color.iter().map(|piece| piece.to_vec()).collect())
                .collect(),
            castling: keys.castling.to_vec(),
            en_passant: keys.en_passant.to_vec(),
            white_to_move: keys.white_to_move,
        }
    }
}

fn copy_keys(dest: &mut [u64], src: &[u64], field: &'static str) -> KeyTableResult<()> {
    if dest.len() != src.len() {
        return Err(KeyTableError::WrongLength(field));
    }
    dest.copy_from_slice(src);
    Ok(())
}

impl TryFrom<KeyTableFile> for ZobristKeys {
    type Error = KeyTableError;

    fn try_from(file: KeyTableFile) -> KeyTableResult<Self> {
        let mut keys = ZobristKeys {
            pieces: [[[0; Square::COUNT]; Piece::COUNT]; Color::COUNT],
            castling: [0; 16],
            en_passant: [0; File::COUNT],
            white_to_move: file.white_to_move,
        };

        if file.pieces.len() != Color::COUNT {
            return Err(KeyTableError::WrongLength("pieces"));
        }
        for (dest, src) in keys.pieces.iter_mut().zip(file.pieces.iter()) {
            if src.len() != Piece::COUNT {
                return Err(KeyTableError::WrongLength("pieces"));
            }
            for (dest, src) in dest.iter_mut().zip(src.iter()) {
                copy_keys(dest, src, "pieces")?;
            }
        }
        copy_keys(&mut keys.castling, &file.castling, "castling")?;
        copy_keys(&mut keys.en_passant, &file.en_passant, "en_passant")?;

        Ok(keys)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Error reading or writing a persisted key table
#[derive(Debug)]
pub enum KeyTableError {
    /// The file could not be read or written
    Io(io::Error),
    /// The file is not valid YAML for a key table
    Yaml(serde_yaml::Error),
    /// A key array in the file has the wrong number of entries
    WrongLength(&'static str),
}

/// Result type used when reading or writing a key table
pub type KeyTableResult<T> = std::result::Result<T, KeyTableError>;

impl fmt::Display for KeyTableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyTableError::Io(err) => write!(f, "key table i/o error: {}", err),
            KeyTableError::Yaml(err) => write!(f, "key table format error: {}", err),
            KeyTableError::WrongLength(field) => write!(f, "key table has wrong length: {}", field),
        }
    }
}

impl std::error::Error for KeyTableError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            KeyTableError::Io(err) => Some(err),
            KeyTableError::Yaml(err) => Some(err),
            KeyTableError::WrongLength(_) => None,
        }
    }
}

impl From<io::Error> for KeyTableError {
    fn from(err: io::Error) -> Self {
        KeyTableError::Io(err)
    }
}

impl From<serde_yaml::Error> for KeyTableError {
    fn from(err: serde_yaml::Error) -> Self {
        KeyTableError::Yaml(err)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Computes the [`Zobrist`](struct.Zobrist.html) key of a position from a shared key table
#[derive(Debug, Clone)]
pub struct Hasher {
    keys: Arc<ZobristKeys>,
}

impl Hasher {
    /// Creates a hasher using `keys`.
    pub fn new(keys: Arc<ZobristKeys>) -> Hasher {
        Hasher { keys }
    }

    /// Computes the key of `pos` from scratch.
    pub fn hash(&self, pos: &Position) -> Zobrist {
        let keys = &*self.keys;
        let mut hash = 0;

        for c in Color::ALL.iter().copied() {
            for p in Piece::ALL.iter().copied() {
                for sq in pos.pieces(c, p) {
                    hash ^= keys.pieces[c as usize][p as usize][sq as usize];
                }
            }
        }

        if pos.turn() == Color::White {
            hash ^= keys.white_to_move;
        }
        hash ^= keys.castling[pos.castling_code() as usize];
        if let Some(sq) = pos.en_passant() {
            hash ^= keys.en_passant[sq.file() as usize];
        }

        Zobrist(hash)
    }
}

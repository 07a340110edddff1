//! Line-oriented setup-file parser, the collaborator that feeds the rules
//! engine its initial position.
//!
//! Format:
//!
//! ```text
//! <sign> <coordinate>      one piece per line, until a blank line
//!
//! [<sign> <sign> ...]      white capture seed ("[]" when empty)
//! [<sign> ...]             black capture seed
//!
//! <from> <to>              optional scripted moves, one per line
//! ```

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SetupError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("malformed setup line: {0:?}")]
    Malformed(String),
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct SetupFile {
    /// (sign, coordinate) pairs; sign case encodes the side.
    pub placements: Vec<(char, String)>,
    pub white_captures: Vec<String>,
    pub black_captures: Vec<String>,
    /// Scripted "from to" commands, if any.
    pub moves: Vec<String>,
}

impl SetupFile {
    pub fn parse(path: impl AsRef<Path>) -> Result<SetupFile, SetupError> {
        Self::from_reader(BufReader::new(File::open(path)?))
    }

    pub fn from_reader<R: BufRead>(reader: R) -> Result<SetupFile, SetupError> {
        let mut lines = reader.lines();

        let mut placements = Vec::new();
        for line in lines.by_ref() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() {
                break;
            }
            let mut parts = line.split_whitespace();
            match (parts.next(), parts.next(), parts.next()) {
                (Some(sign), Some(coordinate), None) if sign.chars().count() == 1 => {
                    placements.push((sign.chars().next().unwrap(), coordinate.to_string()));
                }
                _ => return Err(SetupError::Malformed(line.to_string())),
            }
        }

        let white_captures = parse_capture_line(&mut lines)?;
        let black_captures = parse_capture_line(&mut lines)?;

        let mut moves = Vec::new();
        for line in lines {
            let line = line?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            moves.push(line.to_string());
        }

        Ok(SetupFile {
            placements,
            white_captures,
            black_captures,
            moves,
        })
    }
}

/// The next non-blank line must be a bracketed capture list. A missing
/// line means no captures yet (the file may end after the placements).
fn parse_capture_line(
    lines: &mut impl Iterator<Item = io::Result<String>>,
) -> Result<Vec<String>, SetupError> {
    for line in lines {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if !(line.starts_with('[') && line.ends_with(']')) {
            return Err(SetupError::Malformed(line.to_string()));
        }
        return Ok(line[1..line.len() - 1]
            .split_whitespace()
            .map(str::to_string)
            .collect());
    }
    Ok(Vec::new())
}

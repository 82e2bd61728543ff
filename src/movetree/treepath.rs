//! Treepath encoding.
//!
//! A treepath is a list of child indices leading from one position to
//! another. The compact "initial position" string form counts moves along
//! first children and spells out branch choices explicitly:
//!
//! - `"3"` goes three moves down the main line: `[0, 0, 0]`
//! - `"2.1"` goes two moves down, then takes the second child: `[0, 0, 1]`
//! - `"2.1-4"` continues from move 3 along first children up to move 4:
//!   `[0, 0, 1, 0]`

use serde::Deserialize;

/// Errors that can occur when decoding a treepath string.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TreepathError {
    #[error("invalid treepath segment '{segment}' in '{path}'")]
    InvalidSegment { path: String, segment: String },

    #[error("treepath '{path}' is longer than {} moves", MAX_TREEPATH_MOVES)]
    TooLong { path: String },
}

/// Longest path, in moves, that a treepath string may decode to.
pub const MAX_TREEPATH_MOVES: usize = 10_000;

/// Parses the compact initial-position form into child indices.
pub fn parse_init_position(s: &str) -> Result<Vec<usize>, TreepathError> {
    let s = s.trim();
    let mut out = Vec::new();
    if s.is_empty() {
        return Ok(out);
    }

    let parse = |segment: &str| {
        segment
            .trim()
            .parse::<usize>()
            .map_err(|_| TreepathError::InvalidSegment {
                path: s.to_string(),
                segment: segment.to_string(),
            })
    };

    let too_long = || TreepathError::TooLong { path: s.to_string() };

    // Move number reached so far. Never exceeds `MAX_TREEPATH_MOVES`.
    let mut reached = 0usize;
    for section in s.split('-') {
        let mut parts = section.split('.');
        let target = parse(parts.next().unwrap_or_default())?;
        if target > MAX_TREEPATH_MOVES {
            return Err(too_long());
        }
        if target > reached {
            out.resize(out.len() + (target - reached), 0);
            reached = target;
        }
        for part in parts {
            if reached >= MAX_TREEPATH_MOVES {
                return Err(too_long());
            }
            out.push(parse(part)?);
            reached += 1;
        }
    }
    Ok(out)
}

/// A forward move sequence, either already decoded or in string form.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum NextMoves {
    Path(Vec<usize>),
    Encoded(String),
}

impl Default for NextMoves {
    fn default() -> Self {
        NextMoves::Path(Vec::new())
    }
}

impl NextMoves {
    /// Returns the decoded child indices.
    pub fn decode(&self) -> Result<Vec<usize>, TreepathError> {
        match self {
            NextMoves::Path(path) => Ok(path.clone()),
            NextMoves::Encoded(s) => parse_init_position(s),
        }
    }
}

impl From<Vec<usize>> for NextMoves {
    fn from(path: Vec<usize>) -> Self {
        NextMoves::Path(path)
    }
}

impl From<&str> for NextMoves {
    fn from(s: &str) -> Self {
        NextMoves::Encoded(s.to_string())
    }
}

//! Board coordinates, stone colors, and stones.
//!
//! Points are 0-indexed from the top-left of the full board. Their canonical
//! string form is `"x,y"`, which is also how they serialize, so point-keyed
//! maps serialize with `"x,y"` keys.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Errors that can occur when parsing a point or color.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PointError {
    #[error("expected a point of the form 'x,y', got '{0}'")]
    Malformed(String),

    #[error("invalid coordinate '{0}'")]
    InvalidCoordinate(String),

    #[error("unknown color '{0}'")]
    UnknownColor(String),
}

/// An intersection on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point {
    x: u8,
    y: u8,
}

impl Point {
    pub const fn new(x: u8, y: u8) -> Self {
        Point { x, y }
    }

    pub const fn x(self) -> u8 {
        self.x
    }

    pub const fn y(self) -> u8 {
        self.y
    }

    /// Returns the orthogonal neighbours that lie on a board of `size` lines.
    pub fn neighbors(self, size: u8) -> impl Iterator<Item = Point> {
        let (x, y) = (i16::from(self.x), i16::from(self.y));
        let size = i16::from(size);
        [(x - 1, y), (x + 1, y), (x, y - 1), (x, y + 1)]
            .into_iter()
            .filter(move |&(nx, ny)| (0..size).contains(&nx) && (0..size).contains(&ny))
            .map(|(nx, ny)| Point::new(nx as u8, ny as u8))
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

impl FromStr for Point {
    type Err = PointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (xs, ys) = s
            .split_once(',')
            .ok_or_else(|| PointError::Malformed(s.to_string()))?;
        let coord = |c: &str| {
            c.trim()
                .parse::<u8>()
                .map_err(|_| PointError::InvalidCoordinate(c.to_string()))
        };
        Ok(Point::new(coord(xs)?, coord(ys)?))
    }
}

impl Serialize for Point {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Point {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// The color of a stone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    White,
}

impl Color {
    /// Returns the SGF-style single-letter abbreviation.
    pub const fn sgf_char(self) -> char {
        match self {
            Color::Black => 'B',
            Color::White => 'W',
        }
    }

    pub const fn opponent(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }
}

impl FromStr for Color {
    type Err = PointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "B" | "BLACK" => Ok(Color::Black),
            "W" | "WHITE" => Ok(Color::White),
            other => Err(PointError::UnknownColor(other.to_string())),
        }
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut buf = [0u8; 4];
        serializer.serialize_str(self.sgf_char().encode_utf8(&mut buf))
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A stone at a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Stone {
    pub point: Point,
    pub color: Color,
}

impl Stone {
    pub const fn new(point: Point, color: Color) -> Self {
        Stone { point, color }
    }
}

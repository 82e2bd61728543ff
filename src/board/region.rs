//! Named board regions and the cropping boxes derived from them.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use super::point::Point;

/// Errors that can occur when resolving a board region.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RegionError {
    #[error("unknown board region: '{0}'")]
    UnknownRegion(String),

    #[error("board must have at least one intersection")]
    NoIntersections,
}

/// A named rectangular part of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoardRegion {
    All,
    Top,
    Bottom,
    Left,
    Right,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Every named region, smallest first. Region inference relies on this order.
pub const ALL_REGIONS: [BoardRegion; 9] = [
    BoardRegion::TopLeft,
    BoardRegion::TopRight,
    BoardRegion::BottomLeft,
    BoardRegion::BottomRight,
    BoardRegion::Top,
    BoardRegion::Bottom,
    BoardRegion::Left,
    BoardRegion::Right,
    BoardRegion::All,
];

impl BoardRegion {
    pub const fn name(self) -> &'static str {
        match self {
            BoardRegion::All => "ALL",
            BoardRegion::Top => "TOP",
            BoardRegion::Bottom => "BOTTOM",
            BoardRegion::Left => "LEFT",
            BoardRegion::Right => "RIGHT",
            BoardRegion::TopLeft => "TOP_LEFT",
            BoardRegion::TopRight => "TOP_RIGHT",
            BoardRegion::BottomLeft => "BOTTOM_LEFT",
            BoardRegion::BottomRight => "BOTTOM_RIGHT",
        }
    }

    pub fn from_name(name: &str) -> Option<BoardRegion> {
        ALL_REGIONS.iter().copied().find(|r| r.name() == name)
    }
}

impl fmt::Display for BoardRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BoardRegion {
    type Err = RegionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BoardRegion::from_name(s).ok_or_else(|| RegionError::UnknownRegion(s.to_string()))
    }
}

impl Serialize for BoardRegion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// A requested region: either a fixed one or inferred from the position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegionSpec {
    Auto,
    Fixed(BoardRegion),
}

impl Default for RegionSpec {
    fn default() -> Self {
        RegionSpec::Fixed(BoardRegion::All)
    }
}

impl FromStr for RegionSpec {
    type Err = RegionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "AUTO" {
            return Ok(RegionSpec::Auto);
        }
        s.parse().map(RegionSpec::Fixed)
    }
}

/// Inclusive bounding box over 0-indexed board coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Cropping {
    top: u8,
    left: u8,
    bottom: u8,
    right: u8,
}

impl Cropping {
    /// Computes the cropping box for `region` on a board with `intersections` lines.
    ///
    /// Side regions reach one line past the centre line; corner regions
    /// combine two sides.
    pub fn from_region(region: BoardRegion, intersections: u8) -> Result<Cropping, RegionError> {
        if intersections == 0 {
            return Err(RegionError::NoIntersections);
        }
        let last = intersections - 1;
        let mid = intersections / 2;
        let low_end = mid.saturating_add(1).min(last);
        let high_start = mid.saturating_sub(1);

        let (mut top, mut left, mut bottom, mut right) = (0, 0, last, last);
        match region {
            BoardRegion::All => {}
            BoardRegion::Top => bottom = low_end,
            BoardRegion::Bottom => top = high_start,
            BoardRegion::Left => right = low_end,
            BoardRegion::Right => left = high_start,
            BoardRegion::TopLeft => {
                bottom = low_end;
                right = low_end;
            }
            BoardRegion::TopRight => {
                bottom = low_end;
                left = high_start;
            }
            BoardRegion::BottomLeft => {
                top = high_start;
                right = low_end;
            }
            BoardRegion::BottomRight => {
                top = high_start;
                left = high_start;
            }
        }
        Ok(Cropping { top, left, bottom, right })
    }

    pub const fn top(&self) -> u8 {
        self.top
    }

    pub const fn left(&self) -> u8 {
        self.left
    }

    pub const fn bottom(&self) -> u8 {
        self.bottom
    }

    pub const fn right(&self) -> u8 {
        self.right
    }

    /// Number of columns covered.
    pub const fn width(&self) -> usize {
        (self.right - self.left) as usize + 1
    }

    /// Number of rows covered.
    pub const fn height(&self) -> usize {
        (self.bottom - self.top) as usize + 1
    }

    pub fn contains(&self, pt: Point) -> bool {
        (self.left..=self.right).contains(&pt.x()) && (self.top..=self.bottom).contains(&pt.y())
    }

    /// Iterates the covered points row by row, top to bottom, left to right.
    pub fn points(self) -> impl Iterator<Item = Point> {
        (self.top..=self.bottom)
            .flat_map(move |y| (self.left..=self.right).map(move |x| Point::new(x, y)))
    }
}

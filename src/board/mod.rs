//! Board representation.
//!
//! Contains points, stones, named regions with their cropping boxes, and
//! the board-state source that holds the stones currently on the board.

pub mod goban;
pub mod point;
pub mod region;

pub use goban::{Goban, GobanError, StoneSource};
pub use point::{Color, Point, PointError, Stone};
pub use region::{BoardRegion, Cropping, RegionError, RegionSpec, ALL_REGIONS};

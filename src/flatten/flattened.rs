//! The flattened diagram: what a renderer consumes.

use std::collections::BTreeMap;

use serde::Serialize;

use super::symbol::{Symbol, SymbolPair};
use crate::board::point::{Color, Point, Stone};
use crate::board::region::{BoardRegion, Cropping};

/// A replayed move that landed on an occupied point.
///
/// `label` is the move's own label when the point was already labeled
/// ("5 at 3"); it is `None` when the point was given a fresh letter instead,
/// which is then found in the diagram's label map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Collision {
    pub point: Point,
    pub color: Color,
    pub label: Option<String>,
    pub move_num: u32,
    /// The stone that was already on the point.
    pub collision: Stone,
}

/// An immutable snapshot of a position, ready for drawing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Flattened {
    symbol_pairs: Vec<Vec<SymbolPair>>,
    labels: BTreeMap<Point, String>,
    collisions: Vec<Collision>,
    comment: String,
    board_region: BoardRegion,
    cropping: Cropping,
}

impl Flattened {
    pub(crate) fn new(
        symbol_pairs: Vec<Vec<SymbolPair>>,
        labels: BTreeMap<Point, String>,
        collisions: Vec<Collision>,
        comment: String,
        board_region: BoardRegion,
        cropping: Cropping,
    ) -> Self {
        Flattened {
            symbol_pairs,
            labels,
            collisions,
            comment,
            board_region,
            cropping,
        }
    }

    /// Dense row-major grid covering exactly the cropping box.
    pub fn symbol_pairs(&self) -> &[Vec<SymbolPair>] {
        &self.symbol_pairs
    }

    /// Labels keyed by full-board point.
    pub fn labels(&self) -> &BTreeMap<Point, String> {
        &self.labels
    }

    /// Collisions in replay order.
    pub fn collisions(&self) -> &[Collision] {
        &self.collisions
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn board_region(&self) -> BoardRegion {
        self.board_region
    }

    pub fn cropping(&self) -> Cropping {
        self.cropping
    }

    pub fn width(&self) -> usize {
        self.cropping.width()
    }

    pub fn height(&self) -> usize {
        self.cropping.height()
    }

    /// Symbol pair at a cropped-grid point.
    pub fn symbol_pair(&self, grid_pt: Point) -> Option<SymbolPair> {
        self.symbol_pairs
            .get(usize::from(grid_pt.y()))?
            .get(usize::from(grid_pt.x()))
            .copied()
    }

    /// Symbol pair at a full-board point.
    pub fn symbol_pair_at(&self, board_pt: Point) -> Option<SymbolPair> {
        self.symbol_pair(self.to_grid_point(board_pt)?)
    }

    /// Label at a full-board point.
    pub fn label_at(&self, board_pt: Point) -> Option<&str> {
        self.labels.get(&board_pt).map(String::as_str)
    }

    /// Label at a cropped-grid point.
    pub fn label(&self, grid_pt: Point) -> Option<&str> {
        self.label_at(self.to_board_point(grid_pt)?)
    }

    /// Translates a cropped-grid point into full-board space. Returns `None`
    /// if the result does not fit a board coordinate.
    pub fn to_board_point(&self, grid_pt: Point) -> Option<Point> {
        Some(Point::new(
            grid_pt.x().checked_add(self.cropping.left())?,
            grid_pt.y().checked_add(self.cropping.top())?,
        ))
    }

    /// Translates a full-board point into cropped-grid space. Returns `None`
    /// for points above or left of the cropping box.
    pub fn to_grid_point(&self, board_pt: Point) -> Option<Point> {
        Some(Point::new(
            board_pt.x().checked_sub(self.cropping.left())?,
            board_pt.y().checked_sub(self.cropping.top())?,
        ))
    }

    /// Stones drawn in the grid, in row-major order, as full-board stones.
    pub fn stones(&self) -> impl Iterator<Item = Stone> + '_ {
        self.cropping.points().filter_map(move |pt| {
            let pair = self.symbol_pair_at(pt)?;
            let color = match pair.base {
                Symbol::BlackStone => Color::Black,
                Symbol::WhiteStone => Color::White,
                _ => return None,
            };
            Some(Stone::new(pt, color))
        })
    }
}

//! Board state: the stones currently on the board.
//!
//! `Goban` can be filled stone by stone or derived from a tree position by
//! replaying setup stones and moves with capture rules.

use std::collections::{HashMap, HashSet};

use super::point::{Color, Point, Stone};
use crate::movetree::TreeCursor;

/// Read-only access to the stones placed on a board.
pub trait StoneSource {
    /// Every stone currently on the board.
    fn placed_stones(&self) -> Vec<Stone>;
}

impl StoneSource for [Stone] {
    fn placed_stones(&self) -> Vec<Stone> {
        self.to_vec()
    }
}

impl StoneSource for Vec<Stone> {
    fn placed_stones(&self) -> Vec<Stone> {
        self.clone()
    }
}

/// Errors that can occur when playing a move on a `Goban`.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum GobanError {
    #[error("point {0} is off the board")]
    OffBoard(Point),

    #[error("point {0} is already occupied")]
    Occupied(Point),
}

/// A Go board with the stones currently placed on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Goban {
    size: u8,
    stones: HashMap<Point, Color>,
}

impl Goban {
    /// Creates an empty board with `size` lines in each direction.
    pub fn new(size: u8) -> Self {
        Goban {
            size,
            stones: HashMap::new(),
        }
    }

    /// Builds the board at the cursor's position by replaying setup stones
    /// and moves from the root. Unplayable moves are skipped with a warning.
    pub fn from_cursor(cursor: &TreeCursor<'_>) -> Self {
        let tree = cursor.tree();
        let mut goban = Goban::new(tree.intersections());
        for id in cursor.path_from_root() {
            let Some(node) = tree.node(id) else { continue };
            for stone in &node.setup {
                goban.remove(stone.point);
                goban.place(*stone);
            }
            if let Some(stone) = node.play.and_then(|m| m.stone()) {
                if let Err(e) = goban.play(stone) {
                    tracing::warn!(node = id.index(), error = %e, "skipping unplayable move");
                }
            }
        }
        goban
    }

    /// Builds a board holding exactly `stones`, without applying captures.
    /// Fails on a stone off the board or on a point given twice.
    pub fn from_stones(size: u8, stones: &[Stone]) -> Result<Self, GobanError> {
        let mut goban = Goban::new(size);
        for stone in stones {
            if !goban.on_board(stone.point) {
                return Err(GobanError::OffBoard(stone.point));
            }
            if !goban.place(*stone) {
                return Err(GobanError::Occupied(stone.point));
            }
        }
        Ok(goban)
    }

    pub const fn size(&self) -> u8 {
        self.size
    }

    pub fn len(&self) -> usize {
        self.stones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stones.is_empty()
    }

    pub fn stone_at(&self, point: Point) -> Option<Color> {
        self.stones.get(&point).copied()
    }

    fn on_board(&self, point: Point) -> bool {
        point.x() < self.size && point.y() < self.size
    }

    /// Places a stone without applying captures. Returns false if the point
    /// is occupied or off the board.
    pub fn place(&mut self, stone: Stone) -> bool {
        if !self.on_board(stone.point) || self.stones.contains_key(&stone.point) {
            return false;
        }
        self.stones.insert(stone.point, stone.color);
        true
    }

    /// Removes the stone at `point`, returning its color.
    pub fn remove(&mut self, point: Point) -> Option<Color> {
        self.stones.remove(&point)
    }

    /// Plays a move: places the stone, then removes opponent groups left
    /// without liberties, then the mover's own group if it has none.
    ///
    /// Returns the captured points.
    pub fn play(&mut self, stone: Stone) -> Result<Vec<Point>, GobanError> {
        if !self.on_board(stone.point) {
            return Err(GobanError::OffBoard(stone.point));
        }
        if self.stones.contains_key(&stone.point) {
            return Err(GobanError::Occupied(stone.point));
        }
        self.stones.insert(stone.point, stone.color);

        let mut captured = Vec::new();
        let opponent = stone.color.opponent();
        for neighbor in stone.point.neighbors(self.size) {
            if self.stone_at(neighbor) != Some(opponent) {
                continue;
            }
            let (group, liberties) = self.group_at(neighbor);
            if liberties == 0 {
                for pt in group {
                    self.stones.remove(&pt);
                    captured.push(pt);
                }
            }
        }

        let (own, liberties) = self.group_at(stone.point);
        if liberties == 0 {
            for pt in own {
                self.stones.remove(&pt);
                captured.push(pt);
            }
        }
        Ok(captured)
    }

    /// Returns the connected group containing `start` and its liberty count.
    fn group_at(&self, start: Point) -> (Vec<Point>, usize) {
        let Some(color) = self.stone_at(start) else {
            return (Vec::new(), 0);
        };
        let mut group = Vec::new();
        let mut seen = HashSet::from([start]);
        let mut liberties = HashSet::new();
        let mut stack = vec![start];
        while let Some(pt) = stack.pop() {
            group.push(pt);
            for n in pt.neighbors(self.size) {
                match self.stone_at(n) {
                    None => {
                        liberties.insert(n);
                    }
                    Some(c) if c == color && seen.insert(n) => stack.push(n),
                    Some(_) => {}
                }
            }
        }
        (group, liberties.len())
    }
}

impl StoneSource for Goban {
    fn placed_stones(&self) -> Vec<Stone> {
        let mut stones: Vec<Stone> = self
            .stones
            .iter()
            .map(|(&point, &color)| Stone::new(point, color))
            .collect();
        stones.sort_by_key(|s| (s.point.y(), s.point.x()));
        stones
    }
}

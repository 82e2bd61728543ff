//! Symbol-pair classification for a single intersection.

use super::symbol::{Symbol, SymbolPair};
use crate::board::point::{Color, Point};

/// Starpoint coordinate sets per board size. A point is a starpoint when
/// both of its coordinates belong to the same set.
fn starpoint_sets(intersections: u8) -> &'static [&'static [u8]] {
    match intersections {
        9 => &[&[2, 6], &[4]],
        13 => &[&[3, 9], &[6]],
        19 => &[&[3, 9, 15]],
        _ => &[],
    }
}

pub fn is_starpoint(pt: Point, intersections: u8) -> bool {
    starpoint_sets(intersections)
        .iter()
        .any(|set| set.contains(&pt.x()) && set.contains(&pt.y()))
}

/// Returns the board furniture for an empty intersection.
fn geometry(pt: Point, intersections: u8) -> Symbol {
    let last = intersections.saturating_sub(1);
    match (pt.x(), pt.y()) {
        (0, 0) => Symbol::TlCorner,
        (0, y) if y == last => Symbol::BlCorner,
        (x, 0) if x == last => Symbol::TrCorner,
        (x, y) if x == last && y == last => Symbol::BrCorner,
        (_, 0) => Symbol::TopEdge,
        (0, _) => Symbol::LeftEdge,
        (x, _) if x == last => Symbol::RightEdge,
        (_, y) if y == last => Symbol::BotEdge,
        _ if is_starpoint(pt, intersections) => Symbol::CenterStarpoint,
        _ => Symbol::Center,
    }
}

/// Computes what to draw at `pt`.
///
/// A text label or next-variation hint on an empty intersection clears the
/// base so the glyph is drawn on a blank background. Any other mark is drawn
/// over the stone or the board furniture. Symbols that do not belong to the
/// mark layer are ignored as marks.
pub fn classify(pt: Point, stone: Option<Color>, mark: Option<Symbol>, intersections: u8) -> SymbolPair {
    let mark = match mark {
        Some(m) if m.is_mark() => m,
        _ => Symbol::Empty,
    };

    let base = match stone {
        Some(Color::Black) => Symbol::BlackStone,
        Some(Color::White) => Symbol::WhiteStone,
        None if matches!(mark, Symbol::TextLabel | Symbol::NextVariation) => Symbol::Empty,
        None => geometry(pt, intersections),
    };

    SymbolPair::new(base, mark)
}

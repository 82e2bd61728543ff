//! Region inference for `AUTO` cropping.

use crate::board::point::Point;
use crate::board::region::{BoardRegion, Cropping, ALL_REGIONS};
use crate::movetree::TreeCursor;

/// Picks a board region to display for a position.
pub trait RegionInference {
    fn infer_region(&self, cursor: &TreeCursor<'_>) -> BoardRegion;
}

/// Chooses the smallest named region that contains every point touched by
/// the position: moves, setup stones, and markup on the path from the root
/// and throughout the subtree below the current node.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubtreeBounds;

impl RegionInference for SubtreeBounds {
    fn infer_region(&self, cursor: &TreeCursor<'_>) -> BoardRegion {
        let tree = cursor.tree();
        let path = cursor.path_from_root();
        let nodes = path
            .iter()
            .filter_map(|&id| tree.node(id))
            .chain(cursor.descendants());

        let Some((min, max)) = bounds(nodes.flat_map(|n| n.points())) else {
            return BoardRegion::All;
        };

        let region = ALL_REGIONS
            .iter()
            .copied()
            .find(|&region| {
                Cropping::from_region(region, cursor.intersections())
                    .map(|c| c.contains(min) && c.contains(max))
                    .unwrap_or(false)
            })
            .unwrap_or(BoardRegion::All);
        tracing::debug!(%region, %min, %max, "inferred board region");
        region
    }
}

/// Top-left and bottom-right corners of the box enclosing `points`.
fn bounds(points: impl Iterator<Item = Point>) -> Option<(Point, Point)> {
    points.fold(None, |acc, pt| match acc {
        None => Some((pt, pt)),
        Some((lo, hi)) => Some((
            Point::new(lo.x().min(pt.x()), lo.y().min(pt.y())),
            Point::new(hi.x().max(pt.x()), hi.y().max(pt.y())),
        )),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::point::{Color, Stone};
    use crate::movetree::{MarkKind, MoveTree, Node};

    fn pt(x: u8, y: u8) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn empty_tree_shows_whole_board() {
        let tree = MoveTree::new(19).unwrap();
        assert_eq!(SubtreeBounds.infer_region(&tree.cursor()), BoardRegion::All);
    }

    #[test]
    fn corner_problem_is_cropped_to_corner() {
        let root = Node::default()
            .setup_stone(Stone::new(pt(2, 2), Color::White))
            .setup_stone(Stone::new(pt(3, 1), Color::Black));
        let mut tree = MoveTree::with_root(19, root).unwrap();
        tree.add_child(tree.root(), Node::with_move(Color::Black, pt(1, 4)))
            .unwrap();
        assert_eq!(SubtreeBounds.infer_region(&tree.cursor()), BoardRegion::TopLeft);
    }

    #[test]
    fn subtree_moves_widen_the_region() {
        let root = Node::default().setup_stone(Stone::new(pt(16, 2), Color::White));
        let mut tree = MoveTree::with_root(19, root).unwrap();
        let a = tree
            .add_child(tree.root(), Node::with_move(Color::Black, pt(15, 3)))
            .unwrap();
        tree.add_child(a, Node::with_move(Color::White, pt(2, 3))).unwrap();
        assert_eq!(SubtreeBounds.infer_region(&tree.cursor()), BoardRegion::Top);
    }

    #[test]
    fn markup_counts() {
        let root = Node::default()
            .setup_stone(Stone::new(pt(16, 16), Color::White))
            .mark(MarkKind::Triangle, pt(16, 2));
        let tree = MoveTree::with_root(19, root).unwrap();
        assert_eq!(SubtreeBounds.infer_region(&tree.cursor()), BoardRegion::Right);
    }

    #[test]
    fn spread_out_stones_show_everything() {
        let root = Node::default()
            .setup_stone(Stone::new(pt(0, 0), Color::White))
            .setup_stone(Stone::new(pt(18, 18), Color::Black));
        let tree = MoveTree::with_root(19, root).unwrap();
        assert_eq!(SubtreeBounds.infer_region(&tree.cursor()), BoardRegion::All);
    }

    #[test]
    fn bounds_of_points() {
        let b = bounds([pt(4, 1), pt(2, 7), pt(6, 3)].into_iter());
        assert_eq!(b, Some((pt(2, 1), pt(6, 7))));
        assert_eq!(bounds(std::iter::empty()), None);
    }
}

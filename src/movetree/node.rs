//! Move-tree node contents: the move, setup stones, comment, and markup.

use serde::{Deserialize, Deserializer};

use crate::board::point::{Color, Point, Stone};

/// A move: a color and a point, or a pass when the point is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub struct Move {
    pub color: Color,
    #[serde(default)]
    pub point: Option<Point>,
}

impl Move {
    pub const fn play(color: Color, point: Point) -> Self {
        Move { color, point: Some(point) }
    }

    pub const fn pass(color: Color) -> Self {
        Move { color, point: None }
    }

    pub fn is_pass(&self) -> bool {
        self.point.is_none()
    }

    /// The stone this move places, if it is not a pass.
    pub fn stone(&self) -> Option<Stone> {
        self.point.map(|pt| Stone::new(pt, self.color))
    }
}

/// The kind of board markup attached to a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkKind {
    Circle,
    Cross,
    Square,
    Triangle,
    Label,
}

/// Order in which markup is merged into a diagram. Later kinds overwrite
/// earlier ones on the same point, so text labels take precedence.
pub const MARK_MERGE_ORDER: [MarkKind; 5] = [
    MarkKind::Circle,
    MarkKind::Cross,
    MarkKind::Square,
    MarkKind::Triangle,
    MarkKind::Label,
];

impl MarkKind {
    /// Returns the SGF property identifier.
    pub const fn sgf_id(self) -> &'static str {
        match self {
            MarkKind::Circle => "CR",
            MarkKind::Cross => "MA",
            MarkKind::Square => "SQ",
            MarkKind::Triangle => "TR",
            MarkKind::Label => "LB",
        }
    }

    /// Parses a mark kind from its SGF property identifier.
    pub fn from_sgf_id(id: &str) -> Option<MarkKind> {
        MARK_MERGE_ORDER.iter().copied().find(|k| k.sgf_id() == id)
    }
}

impl<'de> Deserialize<'de> for MarkKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        MarkKind::from_sgf_id(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown mark kind '{}'", s)))
    }
}

/// A single piece of markup. Only labels carry text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct Annotation {
    pub kind: MarkKind,
    pub point: Point,
    #[serde(default)]
    pub text: Option<String>,
}

/// The contents of one position in the move tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Node {
    pub play: Option<Move>,
    pub setup: Vec<Stone>,
    pub comment: Option<String>,
    pub annotations: Vec<Annotation>,
}

impl Node {
    /// Creates a node holding a move at `point`.
    pub fn with_move(color: Color, point: Point) -> Self {
        Node {
            play: Some(Move::play(color, point)),
            ..Node::default()
        }
    }

    /// Creates a node holding a pass.
    pub fn with_pass(color: Color) -> Self {
        Node {
            play: Some(Move::pass(color)),
            ..Node::default()
        }
    }

    pub fn comment(mut self, text: impl Into<String>) -> Self {
        self.comment = Some(text.into());
        self
    }

    pub fn setup_stone(mut self, stone: Stone) -> Self {
        self.setup.push(stone);
        self
    }

    /// Adds a shape mark. Use [`Node::label`] for text labels; a textless
    /// `Label` added here is rejected by `MoveTree`.
    pub fn mark(mut self, kind: MarkKind, point: Point) -> Self {
        self.annotations.push(Annotation { kind, point, text: None });
        self
    }

    pub fn label(mut self, point: Point, text: impl Into<String>) -> Self {
        self.annotations.push(Annotation {
            kind: MarkKind::Label,
            point,
            text: Some(text.into()),
        });
        self
    }

    /// Every point this node touches: its move, setup stones, and markup.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.play
            .and_then(|m| m.point)
            .into_iter()
            .chain(self.setup.iter().map(|s| s.point))
            .chain(self.annotations.iter().map(|a| a.point))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mark_kind_sgf_ids() {
        for kind in MARK_MERGE_ORDER {
            assert_eq!(MarkKind::from_sgf_id(kind.sgf_id()), Some(kind));
        }
        assert_eq!(MarkKind::from_sgf_id("XX"), None);
    }

    #[test]
    fn labels_merge_last() {
        assert_eq!(MARK_MERGE_ORDER.last(), Some(&MarkKind::Label));
    }

    #[test]
    fn pass_has_no_stone() {
        assert!(Move::pass(Color::Black).is_pass());
        assert_eq!(Move::pass(Color::Black).stone(), None);
        assert_eq!(
            Move::play(Color::White, Point::new(1, 2)).stone(),
            Some(Stone::new(Point::new(1, 2), Color::White))
        );
    }

    #[test]
    fn node_points_cover_everything() {
        let node = Node::with_move(Color::Black, Point::new(3, 3))
            .setup_stone(Stone::new(Point::new(0, 0), Color::White))
            .mark(MarkKind::Triangle, Point::new(5, 5))
            .label(Point::new(6, 6), "A");
        let pts: Vec<Point> = node.points().collect();
        assert_eq!(
            pts,
            vec![Point::new(3, 3), Point::new(0, 0), Point::new(5, 5), Point::new(6, 6)]
        );
    }

    #[test]
    fn annotation_deserializes_from_sgf_id() {
        let a: Annotation = serde_json::from_str(r#"{"kind":"LB","point":"1,2","text":"A"}"#).unwrap();
        assert_eq!(a.kind, MarkKind::Label);
        assert_eq!(a.text.as_deref(), Some("A"));
        assert!(serde_json::from_str::<Annotation>(r#"{"kind":"ZZ","point":"1,2"}"#).is_err());
    }
}

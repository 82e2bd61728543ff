//! Arena-backed move tree and its traversal cursor.
//!
//! Nodes live in a flat `Vec` and refer to each other by `NodeId`. A
//! `TreeCursor` borrows the tree immutably, so any number of cursors can walk
//! the same tree at once without affecting one another.

use serde::Deserialize;

use super::node::{Annotation, MarkKind, Move, Node};
use crate::board::point::{Point, Stone};

/// Errors that can occur when building or walking a move tree.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TreeError {
    #[error("board must have at least one intersection")]
    NoIntersections,

    #[error("unknown node id {0}")]
    UnknownNode(usize),

    #[error("child index {index} out of range: node has {count} children")]
    ChildOutOfRange { index: usize, count: usize },

    #[error("point {point} is off a {size}x{size} board")]
    PointOffBoard { point: Point, size: u8 },

    #[error("label at {point} has no text")]
    LabelWithoutText { point: Point },

    #[error("{} mark at {point} cannot carry text", .kind.sgf_id())]
    TextOnShapeMark { kind: MarkKind, point: Point },

    #[error("tree description is empty")]
    EmptyTree,

    #[error("node {node} has invalid parent {parent:?}")]
    InvalidParent { node: usize, parent: Option<usize> },
}

/// Index of a node inside its `MoveTree`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub const fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
struct Slot {
    node: Node,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// A game record: one root position with branching continuations.
#[derive(Debug, Clone)]
pub struct MoveTree {
    intersections: u8,
    slots: Vec<Slot>,
}

/// Flat serialized form of a move tree. The first node is the root; every
/// other node names an earlier node as its parent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TreeSpec {
    pub nodes: Vec<NodeSpec>,
}

/// One node of a [`TreeSpec`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NodeSpec {
    pub parent: Option<usize>,
    #[serde(rename = "move")]
    pub play: Option<Move>,
    pub setup: Vec<Stone>,
    pub comment: Option<String>,
    pub marks: Vec<Annotation>,
}

impl MoveTree {
    /// Creates a tree holding only an empty root node.
    pub fn new(intersections: u8) -> Result<Self, TreeError> {
        Self::with_root(intersections, Node::default())
    }

    /// Creates a tree whose root holds `root`.
    pub fn with_root(intersections: u8, root: Node) -> Result<Self, TreeError> {
        if intersections == 0 {
            return Err(TreeError::NoIntersections);
        }
        let mut tree = MoveTree {
            intersections,
            slots: Vec::new(),
        };
        tree.check_node(&root)?;
        tree.slots.push(Slot {
            node: root,
            parent: None,
            children: Vec::new(),
        });
        Ok(tree)
    }

    /// Builds a tree from its flat serialized form.
    pub fn from_spec(intersections: u8, spec: &TreeSpec) -> Result<Self, TreeError> {
        let (root_spec, rest) = spec.nodes.split_first().ok_or(TreeError::EmptyTree)?;
        if root_spec.parent.is_some() {
            return Err(TreeError::InvalidParent {
                node: 0,
                parent: root_spec.parent,
            });
        }
        let mut tree = MoveTree::with_root(intersections, root_spec.to_node())?;
        for (offset, node_spec) in rest.iter().enumerate() {
            let idx = offset + 1;
            let parent = match node_spec.parent {
                Some(p) if p < idx => NodeId(p),
                other => {
                    return Err(TreeError::InvalidParent {
                        node: idx,
                        parent: other,
                    })
                }
            };
            tree.add_child(parent, node_spec.to_node())?;
        }
        Ok(tree)
    }

    pub const fn intersections(&self) -> u8 {
        self.intersections
    }

    pub const fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.slots.get(id.0).map(|s| &s.node)
    }

    /// Appends `node` as the last child of `parent`.
    pub fn add_child(&mut self, parent: NodeId, node: Node) -> Result<NodeId, TreeError> {
        if parent.0 >= self.slots.len() {
            return Err(TreeError::UnknownNode(parent.0));
        }
        self.check_node(&node)?;
        let id = NodeId(self.slots.len());
        self.slots.push(Slot {
            node,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.slots[parent.0].children.push(id);
        Ok(id)
    }

    /// Appends a chain of nodes, each the first child of the previous one.
    /// Returns the id of the last node.
    pub fn add_line<I>(&mut self, from: NodeId, nodes: I) -> Result<NodeId, TreeError>
    where
        I: IntoIterator<Item = Node>,
    {
        let mut at = from;
        for node in nodes {
            at = self.add_child(at, node)?;
        }
        Ok(at)
    }

    /// Returns a cursor positioned at the root.
    pub fn cursor(&self) -> TreeCursor<'_> {
        TreeCursor {
            tree: self,
            node: self.root(),
        }
    }

    /// Returns a cursor that has followed `path` from the root.
    pub fn cursor_at(&self, path: &[usize]) -> Result<TreeCursor<'_>, TreeError> {
        let mut cursor = self.cursor();
        for &index in path {
            cursor.descend(index)?;
        }
        Ok(cursor)
    }

    /// Rejects off-board points, labels without text, and shape marks with text.
    fn check_node(&self, node: &Node) -> Result<(), TreeError> {
        let size = self.intersections;
        if let Some(point) = node.points().find(|p| p.x() >= size || p.y() >= size) {
            return Err(TreeError::PointOffBoard { point, size });
        }
        for a in &node.annotations {
            match (a.kind, &a.text) {
                (MarkKind::Label, None) => return Err(TreeError::LabelWithoutText { point: a.point }),
                (MarkKind::Label, Some(_)) | (_, None) => {}
                (kind, Some(_)) => {
                    return Err(TreeError::TextOnShapeMark { kind, point: a.point });
                }
            }
        }
        Ok(())
    }
}

impl NodeSpec {
    fn to_node(&self) -> Node {
        Node {
            play: self.play,
            setup: self.setup.clone(),
            comment: self.comment.clone(),
            annotations: self.marks.clone(),
        }
    }
}

/// A position inside a `MoveTree`.
///
/// Cloning (or [`TreeCursor::fork`]) yields an independent cursor; moving one
/// never moves another.
#[derive(Debug, Clone)]
pub struct TreeCursor<'a> {
    tree: &'a MoveTree,
    node: NodeId,
}

impl<'a> TreeCursor<'a> {
    /// Returns an independent cursor at the same position.
    pub fn fork(&self) -> TreeCursor<'a> {
        self.clone()
    }

    pub fn tree(&self) -> &'a MoveTree {
        self.tree
    }

    pub fn node_id(&self) -> NodeId {
        self.node
    }

    pub fn node(&self) -> &'a Node {
        &self.tree.slots[self.node.0].node
    }

    pub fn intersections(&self) -> u8 {
        self.tree.intersections
    }

    pub fn child_count(&self) -> usize {
        self.tree.slots[self.node.0].children.len()
    }

    /// The nodes of every child, in child order.
    pub fn children(&self) -> impl Iterator<Item = &'a Node> + 'a {
        let tree = self.tree;
        tree.slots[self.node.0]
            .children
            .iter()
            .map(move |id| &tree.slots[id.0].node)
    }

    /// Moves to the child at `index`.
    pub fn descend(&mut self, index: usize) -> Result<(), TreeError> {
        let children = &self.tree.slots[self.node.0].children;
        let child = children.get(index).ok_or(TreeError::ChildOutOfRange {
            index,
            count: children.len(),
        })?;
        self.node = *child;
        Ok(())
    }

    /// Moves to the parent. Returns false at the root.
    pub fn ascend(&mut self) -> bool {
        match self.tree.slots[self.node.0].parent {
            Some(parent) => {
                self.node = parent;
                true
            }
            None => false,
        }
    }

    pub fn current_move(&self) -> Option<Move> {
        self.node().play
    }

    pub fn comment(&self) -> Option<&'a str> {
        self.node().comment.as_deref()
    }

    /// Markup of one kind on the current node, in declaration order.
    pub fn marks(&self, kind: MarkKind) -> impl Iterator<Item = &'a Annotation> + 'a {
        self.node().annotations.iter().filter(move |a| a.kind == kind)
    }

    /// Node ids from the root down to the current node, inclusive.
    pub fn path_from_root(&self) -> Vec<NodeId> {
        let mut path = vec![self.node];
        let mut at = self.node;
        while let Some(parent) = self.tree.slots[at.0].parent {
            path.push(parent);
            at = parent;
        }
        path.reverse();
        path
    }

    /// Every node in the subtree below the current node, excluding it.
    pub fn descendants(&self) -> Vec<&'a Node> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.tree.slots[self.node.0].children.clone();
        while let Some(id) = stack.pop() {
            let slot = &self.tree.slots[id.0];
            out.push(&slot.node);
            stack.extend(slot.children.iter().copied());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::point::Color;

    fn pt(x: u8, y: u8) -> Point {
        Point::new(x, y)
    }

    fn branching_tree() -> MoveTree {
        let mut tree = MoveTree::new(9).unwrap();
        let root = tree.root();
        let a = tree.add_child(root, Node::with_move(Color::Black, pt(2, 2))).unwrap();
        tree.add_child(root, Node::with_move(Color::Black, pt(6, 6))).unwrap();
        tree.add_child(a, Node::with_move(Color::White, pt(6, 2)).comment("reply"))
            .unwrap();
        tree
    }

    #[test]
    fn rejects_zero_intersections() {
        assert_eq!(MoveTree::new(0).unwrap_err(), TreeError::NoIntersections);
    }

    #[test]
    fn rejects_points_off_board() {
        let mut tree = MoveTree::new(9).unwrap();
        let err = tree
            .add_child(tree.root(), Node::with_move(Color::Black, pt(9, 0)))
            .unwrap_err();
        assert_eq!(err, TreeError::PointOffBoard { point: pt(9, 0), size: 9 });
    }

    #[test]
    fn rejects_label_without_text() {
        let root = Node::default().mark(MarkKind::Label, pt(3, 3));
        assert_eq!(
            MoveTree::with_root(9, root).unwrap_err(),
            TreeError::LabelWithoutText { point: pt(3, 3) }
        );

        let spec: TreeSpec =
            serde_json::from_str(r#"{"nodes":[{"marks":[{"kind":"LB","point":"3,3"}]}]}"#).unwrap();
        assert_eq!(
            MoveTree::from_spec(9, &spec).unwrap_err(),
            TreeError::LabelWithoutText { point: pt(3, 3) }
        );
    }

    #[test]
    fn rejects_text_on_shape_marks() {
        let mut tree = MoveTree::new(9).unwrap();
        let mut node = Node::with_move(Color::Black, pt(4, 4));
        node.annotations.push(Annotation {
            kind: MarkKind::Triangle,
            point: pt(4, 4),
            text: Some("A".to_string()),
        });
        let err = tree.add_child(tree.root(), node).unwrap_err();
        assert_eq!(err, TreeError::TextOnShapeMark { kind: MarkKind::Triangle, point: pt(4, 4) });
        assert_eq!(err.to_string(), "TR mark at 4,4 cannot carry text");
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn labels_with_text_are_accepted() {
        let root = Node::default().label(pt(3, 3), "A").mark(MarkKind::Circle, pt(4, 4));
        assert!(MoveTree::with_root(9, root).is_ok());
    }

    #[test]
    fn descend_and_ascend() {
        let tree = branching_tree();
        let mut cursor = tree.cursor();
        assert_eq!(cursor.child_count(), 2);
        cursor.descend(0).unwrap();
        cursor.descend(0).unwrap();
        assert_eq!(cursor.comment(), Some("reply"));
        assert_eq!(cursor.current_move(), Some(Move::play(Color::White, pt(6, 2))));
        assert_eq!(cursor.path_from_root().len(), 3);
        assert!(cursor.ascend());
        assert!(cursor.ascend());
        assert!(!cursor.ascend());
    }

    #[test]
    fn descend_out_of_range_fails_without_moving() {
        let tree = branching_tree();
        let mut cursor = tree.cursor();
        let err = cursor.descend(5).unwrap_err();
        assert_eq!(err, TreeError::ChildOutOfRange { index: 5, count: 2 });
        assert_eq!(cursor.node_id(), tree.root());
    }

    #[test]
    fn forked_cursor_is_independent() {
        let tree = branching_tree();
        let original = tree.cursor();
        let mut fork = original.fork();
        fork.descend(1).unwrap();
        assert_eq!(original.node_id(), tree.root());
        assert_ne!(fork.node_id(), original.node_id());
    }

    #[test]
    fn cursor_at_follows_path() {
        let tree = branching_tree();
        let cursor = tree.cursor_at(&[0, 0]).unwrap();
        assert_eq!(cursor.comment(), Some("reply"));
        assert!(tree.cursor_at(&[1, 0]).is_err());
    }

    #[test]
    fn descendants_cover_subtree() {
        let tree = branching_tree();
        assert_eq!(tree.cursor().descendants().len(), 3);
        assert_eq!(tree.cursor_at(&[1]).unwrap().descendants().len(), 0);
    }

    #[test]
    fn marks_filter_by_kind() {
        let root = Node::default()
            .mark(MarkKind::Triangle, pt(1, 1))
            .mark(MarkKind::Circle, pt(2, 2))
            .mark(MarkKind::Triangle, pt(3, 3));
        let tree = MoveTree::with_root(9, root).unwrap();
        let cursor = tree.cursor();
        let triangles: Vec<Point> = cursor.marks(MarkKind::Triangle).map(|a| a.point).collect();
        assert_eq!(triangles, vec![pt(1, 1), pt(3, 3)]);
        assert_eq!(cursor.marks(MarkKind::Square).count(), 0);
    }

    #[test]
    fn from_spec_builds_branches() {
        let json = r#"{"nodes":[
            {"comment":"start"},
            {"parent":0,"move":{"color":"B","point":"2,2"}},
            {"parent":0,"move":{"color":"B","point":"6,6"}},
            {"parent":1,"move":{"color":"W"}}
        ]}"#;
        let spec: TreeSpec = serde_json::from_str(json).unwrap();
        let tree = MoveTree::from_spec(9, &spec).unwrap();
        assert_eq!(tree.len(), 4);
        let cursor = tree.cursor_at(&[0, 0]).unwrap();
        assert_eq!(cursor.current_move(), Some(Move::pass(Color::White)));
    }

    #[test]
    fn from_spec_rejects_forward_parents() {
        let spec: TreeSpec =
            serde_json::from_str(r#"{"nodes":[{},{"parent":1}]}"#).unwrap();
        assert_eq!(
            MoveTree::from_spec(9, &spec).unwrap_err(),
            TreeError::InvalidParent { node: 1, parent: Some(1) }
        );
        let empty = TreeSpec::default();
        assert_eq!(MoveTree::from_spec(9, &empty).unwrap_err(), TreeError::EmptyTree);
    }
}

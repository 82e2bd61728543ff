//! Game-tree representation.
//!
//! Contains the node contents (moves, setup stones, comments, markup), the
//! arena-backed tree with its cursor, and treepath decoding.

pub mod node;
pub mod tree;
pub mod treepath;

pub use node::{Annotation, MarkKind, Move, Node, MARK_MERGE_ORDER};
pub use tree::{MoveTree, NodeId, NodeSpec, TreeCursor, TreeError, TreeSpec};
pub use treepath::{parse_init_position, NextMoves, TreepathError, MAX_TREEPATH_MOVES};

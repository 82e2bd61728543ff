//! JSON flatten requests and responses.
//!
//! Each request is one JSON object on one line:
//!
//! ```json
//! {"tree": {"nodes": [...]}, "position": "2.1", "stones": [...], "options": {...}}
//! ```
//!
//! `position` is a treepath from the root (string or array, default root).
//! `stones` lists the board state; when absent it is derived by replaying the
//! tree up to the position. `options` is validated by [`DiagramConfig`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::board::goban::{Goban, GobanError, StoneSource};
use crate::board::point::Stone;
use crate::config::{ConfigError, DiagramConfig};
use crate::flatten::{FlattenError, FlattenOptions, Flattened};
use crate::movetree::{MoveTree, NextMoves, TreeCursor, TreeError, TreeSpec, TreepathError};

/// Errors that can occur while handling a request.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("failed to parse request JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Tree(#[from] TreeError),

    #[error(transparent)]
    Treepath(#[from] TreepathError),

    #[error("invalid stone: {0}")]
    Stone(#[from] GobanError),

    #[error(transparent)]
    Flatten(#[from] FlattenError),
}

#[derive(Debug, Clone, Deserialize)]
struct RawRequest {
    tree: TreeSpec,
    #[serde(default)]
    position: NextMoves,
    #[serde(default)]
    stones: Option<Vec<Stone>>,
    #[serde(default)]
    options: Value,
}

/// A validated request, ready to flatten.
#[derive(Debug, Clone)]
pub struct Request {
    pub tree: MoveTree,
    pub position: Vec<usize>,
    pub stones: Vec<Stone>,
    pub options: FlattenOptions,
}

impl Request {
    /// Cursor at the requested position.
    pub fn cursor(&self) -> Result<TreeCursor<'_>, TreeError> {
        self.tree.cursor_at(&self.position)
    }
}

/// Parses and validates one request line.
pub fn parse_request(line: &str) -> Result<Request, RequestError> {
    let raw: RawRequest = serde_json::from_str(line)?;
    let config = DiagramConfig::from_value(&raw.options)?;
    let tree = MoveTree::from_spec(config.intersections, &raw.tree)?;
    let position = raw.position.decode()?;

    let stones = match raw.stones {
        Some(stones) => Goban::from_stones(config.intersections, &stones)?.placed_stones(),
        None => {
            let cursor = tree.cursor_at(&position)?;
            Goban::from_cursor(&cursor).placed_stones()
        }
    };

    Ok(Request {
        tree,
        position,
        stones,
        options: config.flatten,
    })
}

/// One output line: a diagram or an error message.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Response {
    Diagram(Box<Flattened>),
    Error { error: String },
}

impl Response {
    pub fn from_result(result: Result<Flattened, RequestError>) -> Self {
        match result {
            Ok(flat) => Response::Diagram(Box::new(flat)),
            Err(e) => Response::Error { error: e.to_string() },
        }
    }
}

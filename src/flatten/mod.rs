//! Diagram flattening.
//!
//! Turns a tree position plus the stones on the board into a dense grid of
//! symbol pairs with labels, collisions, and the position's comment.

pub mod classify;
pub mod crop;
pub mod flattened;
pub mod flattener;
pub mod symbol;

pub use classify::{classify, is_starpoint};
pub use crop::{RegionInference, SubtreeBounds};
pub use flattened::{Collision, Flattened};
pub use flattener::{
    flatten, FlattenError, FlattenJob, FlattenOptions, Flattener, UnknownVariationMode, VariationMode,
};
pub use symbol::{Symbol, SymbolPair};

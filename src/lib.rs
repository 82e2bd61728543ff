//! Hoshi: Go diagram flattening.
//!
//! Exposes the board primitives, the move tree, the flattening engine, the
//! options layer, and the request protocol used by the binary entry point.

pub mod board;
pub mod config;
pub mod flatten;
pub mod movetree;
pub mod protocol;

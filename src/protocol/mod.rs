//! Line protocol for the `hoshi` binary.
//!
//! Requests and responses are single-line JSON objects; see [`request`].

pub mod request;

pub use request::{parse_request, Request, RequestError, Response};

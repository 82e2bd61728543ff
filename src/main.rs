//! Hoshi -- flattens Go positions into diagram definitions.
//!
//! This binary reads one JSON request per line from stdin and answers each
//! with one JSON line on stdout before reading the next. Blank lines are
//! skipped.

use std::io::{self, BufRead, Write};

use hoshi::flatten::{Flattener, SubtreeBounds};
use hoshi::protocol::{parse_request, RequestError, Response};

fn main() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(tracing::Level::WARN)
        .init();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let flattener = Flattener::new(SubtreeBounds);

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };
        if line.trim().is_empty() {
            continue;
        }

        let response = handle_request(&flattener, &line);
        let json = match serde_json::to_string(&response) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!(error = %e, "failed to serialize response");
                continue;
            }
        };
        if let Err(e) = writeln!(out, "{}", json).and_then(|_| out.flush()) {
            tracing::error!(error = %e, "failed to write response");
            return;
        }
    }
}

/// Parses, validates and flattens one request line.
fn handle_request(flattener: &Flattener, line: &str) -> Response {
    let result = parse_request(line).and_then(|request| {
        let cursor = request.cursor()?;
        flattener
            .flatten(&cursor, &request.stones, &request.options)
            .map_err(RequestError::from)
    });
    Response::from_result(result)
}

//! Integration tests for the hoshi binary.
//!
//! Spawns the process, feeds request lines via stdin, and checks the JSON
//! responses on stdout.

use std::io::{BufRead, Write};
use std::process::{Command, Stdio};

use serde_json::Value;

/// Sends request lines to the binary and parses every stdout line as JSON.
fn run_hoshi(requests: &[&str]) -> Vec<Value> {
    let exe = env!("CARGO_BIN_EXE_hoshi");
    let mut child = Command::new(exe)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("failed to start hoshi");

    let mut stdin = child.stdin.take().unwrap();
    let stdout = child.stdout.take().unwrap();
    let reader = std::io::BufReader::new(stdout);

    for req in requests {
        writeln!(stdin, "{}", req).unwrap();
    }
    stdin.flush().unwrap();
    drop(stdin);

    let lines: Vec<Value> = reader
        .lines()
        .map(|l| serde_json::from_str(&l.unwrap()).expect("response is not JSON"))
        .collect();
    let status = child.wait().expect("failed to wait on child");
    assert!(status.success());
    lines
}

/// Black plays 2,6 then white plays 6,2; a second branch at move 2 plays 4,4.
const TWO_MOVES: &str = r#"{"tree":{"nodes":[{"comment":"start"},{"parent":0,"move":{"color":"B","point":"2,6"}},{"parent":1,"move":{"color":"W","point":"6,2"},"comment":"second"},{"parent":1,"move":{"color":"W","point":"4,4"}}]},"options":{"intersections":9,"nextMovesPath":[0,0]}}"#;

#[test]
fn two_move_replay_on_9x9() {
    let out = run_hoshi(&[TWO_MOVES]);
    assert_eq!(out.len(), 1);
    let diagram = &out[0];

    assert_eq!(diagram["labels"]["2,6"], "1");
    assert_eq!(diagram["labels"]["6,2"], "2");
    assert_eq!(diagram["collisions"].as_array().map(Vec::len), Some(0));
    assert_eq!(diagram["comment"], "second");
    assert_eq!(diagram["board_region"], "ALL");

    let rows = diagram["symbol_pairs"].as_array().unwrap();
    assert_eq!(rows.len(), 9);
    assert!(rows.iter().all(|r| r.as_array().map(Vec::len) == Some(9)));
    assert_eq!(rows[6][2]["base"], "BSTONE");
    assert_eq!(rows[6][2]["mark"], "TEXTLABEL");
    assert_eq!(rows[2][6]["base"], "WSTONE");
    assert_eq!(rows[0][0]["base"], "TL_CORNER");
    assert_eq!(rows[4][4]["base"], "CENTER_STARPOINT");
}

#[test]
fn responses_follow_input_order() {
    let at_branch = r#"{"tree":{"nodes":[{},{"parent":0,"move":{"color":"B","point":"2,6"}},{"parent":1,"move":{"color":"W","point":"6,2"}},{"parent":1,"move":{"color":"W","point":"4,4"}}]},"position":"1","options":{"intersections":9,"showVariations":"MORE_THAN_ONE"}}"#;
    let out = run_hoshi(&[at_branch, "not json", TWO_MOVES]);
    assert_eq!(out.len(), 3);

    assert_eq!(out[0]["labels"]["6,2"], "1");
    assert_eq!(out[0]["labels"]["4,4"], "2");
    assert_eq!(out[0]["symbol_pairs"][4][4]["mark"], "NEXTVARIATION");
    assert_eq!(out[0]["symbol_pairs"][6][2]["base"], "BSTONE");

    assert!(out[1]["error"].is_string());
    assert_eq!(out[2]["labels"]["6,2"], "2");
}

#[test]
fn blank_lines_are_skipped() {
    let out = run_hoshi(&["", "   ", TWO_MOVES, ""]);
    assert_eq!(out.len(), 1);
    assert!(out[0].get("error").is_none());
}

#[test]
fn invalid_options_are_reported() {
    let bad_region = r#"{"tree":{"nodes":[{}]},"options":{"boardRegion":"MIDDLE"}}"#;
    let bad_move_num = r#"{"tree":{"nodes":[{}]},"options":{"startingMoveNum":0}}"#;
    let bad_path = r#"{"tree":{"nodes":[{}]},"options":{"nextMovesPath":"1.x"}}"#;
    let out = run_hoshi(&[bad_region, bad_move_num, bad_path]);
    assert_eq!(out.len(), 3);
    assert_eq!(out[0]["error"], "unknown board region: 'MIDDLE'");
    assert!(out[1]["error"].as_str().unwrap().contains("starting move number"));
    assert!(out[2]["error"].as_str().unwrap().contains("1.x"));
}

#[test]
fn missing_position_is_reported() {
    let req = r#"{"tree":{"nodes":[{}]},"position":[2],"options":{"intersections":9}}"#;
    let out = run_hoshi(&[req]);
    assert_eq!(out.len(), 1);
    assert!(out[0]["error"].is_string());
}

#[test]
fn cropped_region_with_explicit_stones() {
    let req = r#"{"tree":{"nodes":[{"marks":[{"kind":"TR","point":"1,1"},{"kind":"LB","point":"2,1","text":"A"}]}]},"stones":[{"point":"1,1","color":"W"}],"options":{"boardRegion":"TOP_LEFT"}}"#;
    let out = run_hoshi(&[req]);
    let diagram = &out[0];
    assert_eq!(diagram["board_region"], "TOP_LEFT");
    assert_eq!(diagram["cropping"]["bottom"], 10);
    assert_eq!(diagram["cropping"]["right"], 10);
    assert_eq!(diagram["symbol_pairs"].as_array().map(Vec::len), Some(11));
    assert_eq!(diagram["symbol_pairs"][1][1]["base"], "WSTONE");
    assert_eq!(diagram["symbol_pairs"][1][1]["mark"], "TRIANGLE");
    assert_eq!(diagram["symbol_pairs"][1][2]["base"], "EMPTY");
    assert_eq!(diagram["labels"]["2,1"], "A");
}

#[test]
fn empty_input_produces_no_output() {
    assert!(run_hoshi(&[]).is_empty());
}

#[test]
fn oversized_treepath_does_not_stop_the_session() {
    let huge = r#"{"tree":{"nodes":[{}]},"options":{"intersections":9,"nextMovesPath":"4000000000000"}}"#;
    let out = run_hoshi(&[TWO_MOVES, huge, TWO_MOVES]);
    assert_eq!(out.len(), 3);
    assert_eq!(out[0]["labels"]["6,2"], "2");
    assert!(out[1]["error"].as_str().unwrap().contains("longer than"));
    assert_eq!(out[2]["labels"]["2,6"], "1");
}

#[test]
fn off_board_stones_are_reported() {
    let req = r#"{"tree":{"nodes":[{}]},"stones":[{"point":"30,30","color":"B"}],"options":{"intersections":9}}"#;
    let out = run_hoshi(&[req]);
    assert_eq!(out[0]["error"], "invalid stone: point 30,30 is off the board");
}

#[test]
fn each_request_is_answered_before_the_next_is_read() {
    let exe = env!("CARGO_BIN_EXE_hoshi");
    let mut child = Command::new(exe)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("failed to start hoshi");

    let mut stdin = child.stdin.take().unwrap();
    let mut reader = std::io::BufReader::new(child.stdout.take().unwrap());

    for _ in 0..2 {
        writeln!(stdin, "{}", TWO_MOVES).unwrap();
        stdin.flush().unwrap();
        let mut line = String::new();
        reader.read_line(&mut line).unwrap();
        let response: Value = serde_json::from_str(&line).unwrap();
        assert_eq!(response["labels"]["2,6"], "1");
    }

    drop(stdin);
    let status = child.wait().expect("failed to wait on child");
    assert!(status.success());
}

// tests/reference.rs
use std::fs;

use bullseye::ReferenceError;
use bullseye::reference::{RecordedRun, load_recorded_run, parse_recorded_run};
use pretty_assertions::assert_eq;

fn csv(rows: usize) -> String {
    let mut s = String::from("stage,bullets\n");
    for i in 0..rows {
        s.push_str(&format!("{},{}\n", i + 1, i % 5 + 1));
    }
    s
}

#[test]
fn parses_header_and_hundred_rows() {
    let run = parse_recorded_run(&csv(100)).expect("valid csv");
    assert_eq!(run.stages.len(), 100);
    assert_eq!(&run.stages[..6], &[1, 2, 3, 4, 5, 1]);
    assert_eq!(run.total(), 20 * 15);
}

#[test]
fn tolerates_quotes_blank_lines_and_crlf() {
    let mut text = String::from("\"stage\",\"bullets\"\r\n\r\n");
    for i in 0..100 {
        text.push_str(&format!("\"{}\", \"3\"\r\n", i + 1));
    }
    let run = parse_recorded_run(&text).expect("valid csv");
    assert!(run.stages.iter().all(|&v| v == 3));
}

#[test]
fn rejects_wrong_line_count() {
    match parse_recorded_run(&csv(99)) {
        Err(ReferenceError::LineCount(n)) => assert_eq!(n, 100),
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn rejects_wrong_column_count() {
    let text = csv(100).replacen("3,3\n", "3,3,extra\n", 1);
    match parse_recorded_run(&text) {
        Err(ReferenceError::ColumnCount { line, found }) => assert_eq!((line, found), (3, 3)),
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn rejects_non_numeric_bullets() {
    let text = csv(100).replacen("2,2\n", "2,two\n", 1);
    match parse_recorded_run(&text) {
        Err(ReferenceError::Malformed(line)) => assert_eq!(line, 2),
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn loads_from_disk() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("recorded.csv");
    fs::write(&path, csv(100)).expect("write csv");
    let run = load_recorded_run(&path).expect("load");
    assert_eq!(run.stages.len(), 100);
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let res = load_recorded_run(dir.path().join("nope.csv"));
    assert!(matches!(res, Err(ReferenceError::Io(_))));
}

#[test]
fn from_stages_requires_every_stage() {
    assert!(matches!(
        RecordedRun::from_stages(vec![1; 42]),
        Err(ReferenceError::StageCount(42))
    ));
    assert!(RecordedRun::from_stages(vec![1; 100]).is_ok());
}

#[test]
fn overlay_points_are_jittered_within_family() {
    let stages: Vec<u32> = (0..100).map(|s| s as u32 + 1).collect();
    let run = RecordedRun::from_stages(stages).expect("run");
    let pts = run.overlay_points();
    assert_eq!(pts.len(), 100);

    let fam2: Vec<_> = pts.iter().filter(|p| p.family == 2).collect();
    assert_eq!(fam2.len(), 20);
    // stages 3, 8, 13, ... in stage order
    assert_eq!(fam2[0].bullets, 3);
    assert_eq!(fam2[1].bullets, 8);
    assert!((fam2[0].x - 1.9).abs() < 1e-12);
    assert!((fam2[10].x - 2.0).abs() < 1e-12);
    assert!(pts.iter().all(|p| {
        let f = p.family as f64;
        p.x >= f - 0.1 && p.x < f + 0.1
    }));
}

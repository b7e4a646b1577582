use std::fs;
use std::io::Cursor;

use tweet_labeler::labeler::{label_file, LabelSummary};
use tweet_labeler::LabelError;

fn labeled(source: &str, answers: &str) -> (Result<LabelSummary, LabelError>, String) {
    let dir = tempfile::tempdir().expect("tempdir");
    let src = dir.path().join("tweets.tsv");
    let dest = dir.path().join("out").join("labeled.csv");
    fs::write(&src, source).expect("write source");

    let res = label_file(&src, &dest, Cursor::new(answers.to_owned()), Vec::new());
    let out = fs::read_to_string(&dest).expect("destination exists");
    (res, out)
}

#[test]
fn accepted_records_reach_the_file() {
    let (res, out) = labeled("id1\t\tGreat product!\nid2\t\tmeh\n", "p\nf\n");
    assert_eq!(res.expect("run").accepted, 2);
    assert_eq!(out, "\"Positive\",\"Great product!\"\n\"Flat\",\"meh\"\n");
}

#[test]
fn interrupted_run_keeps_earlier_lines() {
    let (res, out) = labeled("1\t\tone\n2\t\ttwo\n3\t\tthree\n", "n\nq\np\n");
    assert!(matches!(res, Err(LabelError::UnrecognizedLabel { .. })));
    assert_eq!(out, "\"Negative\",\"one\"\n");
}

#[test]
fn malformed_record_keeps_earlier_lines() {
    let (res, out) = labeled("1\t\tone\nbroken\n", "p\n");
    assert!(matches!(
        res,
        Err(LabelError::MalformedRecord { line: 2, found: 1 })
    ));
    assert_eq!(out, "\"Positive\",\"one\"\n");
}

#[test]
fn empty_source_gives_empty_output() {
    let (res, out) = labeled("", "");
    assert_eq!(res.expect("clean exit"), LabelSummary::default());
    assert!(out.is_empty());
}

#[test]
fn rerun_truncates_destination() {
    let dir = tempfile::tempdir().expect("tempdir");
    let src = dir.path().join("tweets.tsv");
    let dest = dir.path().join("labeled.csv");
    fs::write(&src, "1\t\tone\n").expect("write source");

    label_file(&src, &dest, Cursor::new("p\n"), Vec::new()).expect("first run");
    label_file(&src, &dest, Cursor::new("d\n"), Vec::new()).expect("second run");
    assert_eq!(fs::read_to_string(&dest).expect("read"), "");
}

#[test]
fn missing_source_is_io_error_and_creates_nothing() {
    let dir = tempfile::tempdir().expect("tempdir");
    let dest = dir.path().join("labeled.csv");
    let res = label_file(
        &dir.path().join("absent.tsv"),
        &dest,
        Cursor::new("p\n"),
        Vec::new(),
    );
    assert!(matches!(res, Err(LabelError::Io(_))));
    assert!(!dest.exists());
}

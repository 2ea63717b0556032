use crate::error::FlowtagError;
use crate::lookup::{load_lookup_table, read_lookup_rows};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

#[test]
fn rows_after_the_header_are_returned_with_line_numbers() {
    // Arrange
    let csv = "dstport,protocol,tag\n25,tcp,sv_P1\n443,tcp,sv_P2\n";

    // Act
    let rows = read_lookup_rows(csv.as_bytes(), Path::new("lookup.csv")).unwrap();

    // Assert
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].line, 2);
    assert_eq!(rows[0].fields, vec!["25", "tcp", "sv_P1"]);
    assert_eq!(rows[1].line, 3);
}

#[test]
fn quoted_fields_are_unquoted() {
    let csv = "dstport,protocol,tag\n\"143\",tcp,\"email, imap\"\n";

    let rows = read_lookup_rows(csv.as_bytes(), Path::new("lookup.csv")).unwrap();

    assert_eq!(rows[0].fields, vec!["143", "tcp", "email, imap"]);
}

#[test]
fn short_and_long_rows_are_kept_for_validation() {
    let csv = "dstport,protocol,tag\n25,tcp\n25,tcp,a,b\n";

    let rows = read_lookup_rows(csv.as_bytes(), Path::new("lookup.csv")).unwrap();

    assert_eq!(rows[0].fields.len(), 2);
    assert_eq!(rows[1].fields.len(), 4);
}

#[test]
fn empty_file_is_rejected() {
    let err = read_lookup_rows("".as_bytes(), Path::new("lookup.csv")).unwrap_err();

    assert!(matches!(err, FlowtagError::EmptyLookup { .. }));
}

#[test]
fn header_only_file_yields_no_rows() {
    let rows =
        read_lookup_rows("dstport,protocol,tag\n".as_bytes(), Path::new("lookup.csv")).unwrap();

    assert!(rows.is_empty());
}

#[test]
fn unexpected_header_is_tolerated() {
    let csv = "port,proto,label\n25,tcp,sv_P1\n";

    let rows = read_lookup_rows(csv.as_bytes(), Path::new("lookup.csv")).unwrap();

    assert_eq!(rows.len(), 1);
}

#[test]
fn load_lookup_table_reads_file() {
    // Arrange
    let dir = tempdir().unwrap();
    let path = dir.path().join("lookup.csv");
    fs::write(&path, "dstport,protocol,tag\n25,tcp,sv_P1\nbad,tcp,x\n993,TCP,email\n").unwrap();

    // Act
    let table = load_lookup_table(&path).unwrap();

    // Assert
    assert_eq!(table.len(), 2);
    assert_eq!(table.lookup(993, "tcp"), Some("email"));
    assert_eq!(table.stats().skipped, 1);
}

#[test]
fn missing_file_is_input_unavailable() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing.csv");

    let err = load_lookup_table(&path).unwrap_err();

    match err {
        FlowtagError::InputUnavailable { path: p, .. } => assert_eq!(p, path),
        other => panic!("Expected InputUnavailable, got {:?}", other),
    }
}

#[test]
fn rows_after_blank_lines_keep_their_file_line() {
    // Arrange
    let csv = "dstport,protocol,tag\n25,tcp,sv_P1\n\n\n443,tcp,sv_P2\n\n110,tcp,email\n";

    // Act
    let rows = read_lookup_rows(csv.as_bytes(), Path::new("lookup.csv")).unwrap();

    // Assert
    let lines: Vec<u64> = rows.iter().map(|r| r.line).collect();
    assert_eq!(lines, vec![2, 5, 7]);
}

#[test]
fn crlf_and_leading_blank_lines_are_counted() {
    let csv = "\r\n\r\ndstport,protocol,tag\r\n25,tcp,sv_P1\r\n\r\n443,tcp,sv_P2\r\n";

    let rows = read_lookup_rows(csv.as_bytes(), Path::new("lookup.csv")).unwrap();

    let lines: Vec<u64> = rows.iter().map(|r| r.line).collect();
    assert_eq!(lines, vec![4, 6]);
}

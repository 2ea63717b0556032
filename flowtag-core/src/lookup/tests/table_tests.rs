use crate::lookup::{LookupRow, LookupRowError, LookupStats, LookupTable};
use pretty_assertions::assert_eq;

fn rows(raw: &[&[&str]]) -> Vec<LookupRow> {
    raw.iter()
        .enumerate()
        .map(|(i, fields)| LookupRow::new(i as u64 + 2, fields.iter().copied()))
        .collect()
}

#[test]
fn lookup_is_case_insensitive_on_protocol() {
    // Arrange
    let table = LookupTable::build(rows(&[&["443", "tcp", "sv_P2"]]));

    // Act
    let upper = table.lookup(443, "TCP");
    let lower = table.lookup(443, "tcp");

    // Assert
    assert_eq!(upper, Some("sv_P2"));
    assert_eq!(upper, lower);
}

#[test]
fn mixed_case_table_rows_match_lowercase_queries() {
    let table = LookupTable::build(rows(&[&["68", "UDP", "sv_P2"]]));

    assert_eq!(table.lookup(68, "udp"), Some("sv_P2"));
}

#[test]
fn lookup_is_exact_on_port_and_protocol() {
    let table = LookupTable::build(rows(&[&["443", "tcp", "sv_P2"]]));

    assert_eq!(table.lookup(444, "tcp"), None);
    assert_eq!(table.lookup(443, "udp"), None);
    assert_eq!(table.lookup(443, "tc"), None);
}

#[test]
fn zero_padded_ports_share_a_key() {
    let table = LookupTable::build(rows(&[&["080", "tcp", "old"], &["80", "tcp", "new"]]));

    assert_eq!(table.len(), 1);
    assert_eq!(table.lookup(80, "tcp"), Some("new"));
}

#[test]
fn duplicate_keys_keep_the_last_row() {
    // Arrange
    let raw = rows(&[
        &["25", "tcp", "sv_P1"],
        &["25", "tcp", "mail"],
        &["25", "udp", "other"],
    ]);

    // Act
    let table = LookupTable::build(raw);

    // Assert
    assert_eq!(table.len(), 2);
    assert_eq!(table.lookup(25, "tcp"), Some("mail"));
    assert_eq!(table.stats().overridden, 1);
}

#[test]
fn malformed_rows_are_skipped_and_later_rows_still_load() {
    // Arrange
    let raw = rows(&[
        &["25", "tcp", "sv_P1"],
        &["abc", "tcp", "broken"],
        &["110", "tcp"],
        &["", "", ""],
        &["993", "tcp", "email"],
    ]);
    let mut rejected = Vec::new();

    // Act
    let table = LookupTable::build_with(raw, |row, err| rejected.push((row.line, err.clone())));

    // Assert
    assert_eq!(table.len(), 2);
    assert_eq!(table.lookup(993, "tcp"), Some("email"));
    assert_eq!(
        rejected,
        vec![
            (
                3,
                LookupRowError::InvalidPort {
                    value: "abc".to_string()
                }
            ),
            (4, LookupRowError::MissingField { field: "tag" }),
        ]
    );
    assert_eq!(
        table.stats(),
        LookupStats {
            rows: 5,
            loaded: 2,
            skipped: 2,
            blank: 1,
            overridden: 0,
        }
    );
}

#[test]
fn empty_table_matches_nothing() {
    let table = LookupTable::build(Vec::new());

    assert!(table.is_empty());
    assert_eq!(table.lookup(443, "tcp"), None);
}

#[test]
fn ten_thousand_entries_all_resolve() {
    // Arrange
    let protocol = |i: u32| if i % 2 == 0 { "tcp" } else { "udp" };
    let raw: Vec<LookupRow> = (0..12_000u32)
        .map(|i| {
            LookupRow::new(
                u64::from(i) + 2,
                [i.to_string(), protocol(i).to_string(), format!("tag_{i}")],
            )
        })
        .collect();

    // Act
    let table = LookupTable::build(raw);

    // Assert
    assert_eq!(table.len(), 12_000);
    for i in (0..12_000u32).step_by(997) {
        let expected = format!("tag_{i}");
        assert_eq!(table.lookup(i as u16, protocol(i)), Some(expected.as_str()));
    }
}

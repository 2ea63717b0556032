use crate::lookup::{LookupKey, LookupRow, LookupRowError, parse_row};
use pretty_assertions::assert_eq;

fn row(fields: &[&str]) -> LookupRow {
    LookupRow::new(2, fields.iter().copied())
}

#[test]
fn valid_row_is_parsed() {
    // Arrange
    let raw = row(&["25", "tcp", "sv_P1"]);

    // Act
    let parsed = parse_row(&raw).unwrap();

    // Assert
    assert_eq!(
        parsed,
        Some((
            LookupKey {
                port: 25,
                protocol: "tcp".to_string()
            },
            "sv_P1".to_string()
        ))
    );
}

#[test]
fn protocol_is_lowercased_and_fields_trimmed() {
    let (key, tag) = parse_row(&row(&[" 443 ", " TCP ", " sv_P2 "])).unwrap().unwrap();

    assert_eq!(key.port, 443);
    assert_eq!(key.protocol, "tcp");
    assert_eq!(tag, "sv_P2");
}

#[test]
fn leading_zeros_in_port_are_accepted() {
    let (key, _) = parse_row(&row(&["080", "tcp", "web"])).unwrap().unwrap();

    assert_eq!(key.port, 80);
}

#[test]
fn tag_case_is_preserved() {
    let (_, tag) = parse_row(&row(&["993", "tcp", "Email"])).unwrap().unwrap();

    assert_eq!(tag, "Email");
}

#[test]
fn extra_columns_are_ignored() {
    let (key, tag) = parse_row(&row(&["22", "tcp", "ssh", "comment"]))
        .unwrap()
        .unwrap();

    assert_eq!(key.port, 22);
    assert_eq!(tag, "ssh");
}

#[test]
fn blank_row_is_not_an_error() {
    assert_eq!(parse_row(&row(&["", " ", ""])), Ok(None));
    assert_eq!(parse_row(&row(&[])), Ok(None));
}

#[test]
fn non_numeric_port_is_rejected() {
    assert_eq!(
        parse_row(&row(&["http", "tcp", "web"])),
        Err(LookupRowError::InvalidPort {
            value: "http".to_string()
        })
    );
}

#[test]
fn out_of_range_port_is_rejected() {
    assert_eq!(
        parse_row(&row(&["65536", "tcp", "web"])),
        Err(LookupRowError::InvalidPort {
            value: "65536".to_string()
        })
    );
    assert!(parse_row(&row(&["-1", "tcp", "web"])).is_err());
}

#[test]
fn missing_fields_are_rejected() {
    assert_eq!(
        parse_row(&row(&["25"])),
        Err(LookupRowError::MissingField { field: "protocol" })
    );
    assert_eq!(
        parse_row(&row(&["25", "tcp"])),
        Err(LookupRowError::MissingField { field: "tag" })
    );
}

#[test]
fn empty_tag_is_rejected() {
    assert_eq!(
        parse_row(&row(&["25", "tcp", ""])),
        Err(LookupRowError::EmptyTag)
    );
}

#[test]
fn empty_protocol_is_rejected() {
    assert_eq!(
        parse_row(&row(&["25", "", "mail"])),
        Err(LookupRowError::EmptyProtocol)
    );
}

#[test]
fn signed_port_is_invalid() {
    assert_eq!(
        parse_row(&row(&["+80", "tcp", "web"])),
        Err(LookupRowError::InvalidPort {
            value: "+80".to_string()
        })
    );
}

use crate::flow::{FlowField, FlowRecord, ParseError, parse_record};
use pretty_assertions::assert_eq;

const LINE: &str = "2 123456789012 eni-0a1b2c3d 10.0.1.201 198.51.100.2 49153 443 6 25 20000 1620140761 1620140821 ACCEPT OK";

fn with_field(index: usize, value: &str) -> String {
    let mut fields: Vec<&str> = LINE.split_whitespace().collect();
    fields[index] = value;
    fields.join(" ")
}

#[test]
fn well_formed_line_is_parsed() {
    // Act
    let record = parse_record(LINE).unwrap().unwrap();

    // Assert
    assert_eq!(
        record,
        FlowRecord {
            account_id: "123456789012",
            interface_id: "eni-0a1b2c3d",
            src_addr: "10.0.1.201",
            dst_addr: "198.51.100.2",
            src_port: 49153,
            dst_port: 443,
            protocol: 6,
            packets: 25,
            bytes: 20000,
            start: 1620140761,
            end: 1620140821,
            action: "ACCEPT",
            log_status: "OK",
        }
    );
}

#[test]
fn runs_of_whitespace_separate_fields() {
    let spaced = LINE.replace(' ', " \t  ");

    let line = format!("  {spaced}\r\n");

    let record = parse_record(&line).unwrap().unwrap();

    assert_eq!(record.dst_port, 443);
    assert_eq!(record.log_status, "OK");
}

#[test]
fn blank_lines_are_skipped() {
    assert_eq!(parse_record(""), Ok(None));
    assert_eq!(parse_record("   \t \r\n"), Ok(None));
}

#[test]
fn too_few_fields_is_a_field_count_mismatch() {
    assert_eq!(
        parse_record("2 123456789012 eni-0a1b2c3d 10.0.1.201"),
        Err(ParseError::FieldCountMismatch { found: 4 })
    );
}

#[test]
fn too_many_fields_is_a_field_count_mismatch() {
    assert_eq!(
        parse_record(&format!("{LINE} extra")),
        Err(ParseError::FieldCountMismatch { found: 15 })
    );
}

#[test]
fn other_versions_are_unsupported() {
    for version in ["3", "5", "02", "v2"] {
        assert_eq!(
            parse_record(&with_field(0, version)),
            Err(ParseError::UnsupportedVersion {
                version: version.to_string()
            })
        );
    }
}

#[test]
fn field_count_is_checked_before_version() {
    assert_eq!(
        parse_record("3 a b"),
        Err(ParseError::FieldCountMismatch { found: 3 })
    );
}

#[test]
fn non_numeric_fields_are_rejected_by_name() {
    let cases = [
        (5, FlowField::SrcPort),
        (6, FlowField::DstPort),
        (7, FlowField::Protocol),
        (8, FlowField::Packets),
        (9, FlowField::Bytes),
        (10, FlowField::Start),
        (11, FlowField::End),
    ];

    for (index, field) in cases {
        assert_eq!(
            parse_record(&with_field(index, "x")),
            Err(ParseError::InvalidNumericField {
                field,
                value: "x".to_string()
            })
        );
    }
}

#[test]
fn out_of_range_port_and_protocol_are_rejected() {
    assert_eq!(
        parse_record(&with_field(6, "70000")),
        Err(ParseError::InvalidNumericField {
            field: FlowField::DstPort,
            value: "70000".to_string()
        })
    );
    assert_eq!(
        parse_record(&with_field(7, "256")),
        Err(ParseError::InvalidNumericField {
            field: FlowField::Protocol,
            value: "256".to_string()
        })
    );
}

#[test]
fn nodata_records_are_rejected() {
    let line = "2 123456789012 eni-0a1b2c3d - - - - - - - 1431280876 1431280934 - NODATA";

    assert_eq!(
        parse_record(line),
        Err(ParseError::InvalidNumericField {
            field: FlowField::SrcPort,
            value: "-".to_string()
        })
    );
}

#[test]
fn text_fields_are_not_interpreted() {
    let line = with_field(12, "WHATEVER");

    let record = parse_record(&line).unwrap().unwrap();

    assert_eq!(record.action, "WHATEVER");
}

#[test]
fn signed_numeric_fields_are_rejected() {
    let line = with_field(6, "+443");

    assert_eq!(
        parse_record(&line),
        Err(ParseError::InvalidNumericField {
            field: FlowField::DstPort,
            value: "+443".to_string()
        })
    );
}

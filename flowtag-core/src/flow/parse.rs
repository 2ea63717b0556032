use crate::flow::record::{FIELD_COUNT, FlowField, FlowRecord, SUPPORTED_VERSION};
use std::str::FromStr;
use thiserror::Error;

/// Why a line could not be turned into a [`FlowRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("expected 14 fields, found {found}")]
    FieldCountMismatch { found: usize },

    #[error("unsupported flow log version '{version}'")]
    UnsupportedVersion { version: String },

    #[error("invalid {field} value '{value}'")]
    InvalidNumericField { field: FlowField, value: String },

    #[error("line is not valid UTF-8")]
    InvalidEncoding,
}

/// Parses one flow log line.
///
/// Blank lines yield `Ok(None)`. Checks run in order: field count, version,
/// numeric fields.
pub fn parse_record(line: &str) -> Result<Option<FlowRecord<'_>>, ParseError> {
    let mut fields = [""; FIELD_COUNT];
    let mut found = 0;

    for field in line.split_whitespace() {
        if found < FIELD_COUNT {
            fields[found] = field;
        }
        found += 1;
    }

    if found == 0 {
        return Ok(None);
    }
    if found != FIELD_COUNT {
        return Err(ParseError::FieldCountMismatch { found });
    }

    let [
        version,
        account_id,
        interface_id,
        src_addr,
        dst_addr,
        src_port,
        dst_port,
        protocol,
        packets,
        bytes,
        start,
        end,
        action,
        log_status,
    ] = fields;

    if version != SUPPORTED_VERSION {
        return Err(ParseError::UnsupportedVersion {
            version: version.to_string(),
        });
    }

    Ok(Some(FlowRecord {
        account_id,
        interface_id,
        src_addr,
        dst_addr,
        src_port: numeric(FlowField::SrcPort, src_port)?,
        dst_port: numeric(FlowField::DstPort, dst_port)?,
        protocol: numeric(FlowField::Protocol, protocol)?,
        packets: numeric(FlowField::Packets, packets)?,
        bytes: numeric(FlowField::Bytes, bytes)?,
        start: numeric(FlowField::Start, start)?,
        end: numeric(FlowField::End, end)?,
        action,
        log_status,
    }))
}

/// Numeric fields are plain ASCII digits; `str::parse` alone would also take a
/// leading `+`.
fn numeric<T: FromStr>(field: FlowField, raw: &str) -> Result<T, ParseError> {
    let invalid = || ParseError::InvalidNumericField {
        field,
        value: raw.to_string(),
    };

    if !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    raw.parse().map_err(|_| invalid())
}

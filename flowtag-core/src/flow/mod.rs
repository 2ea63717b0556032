//! Version 2 flow log records.
//!
//! One record per line, 14 whitespace separated fields:
//!
//! version account-id interface-id srcaddr dstaddr srcport dstport protocol
//! packets bytes start end action log-status

mod parse;
mod record;
#[cfg(test)]
mod tests;

pub use parse::{ParseError, parse_record};
pub use record::{FIELD_COUNT, FlowField, FlowRecord, SUPPORTED_VERSION};

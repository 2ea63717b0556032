//! Matching and aggregation.
//!
//! Every structurally valid record bumps exactly one tag counter and exactly
//! one (port, protocol) counter, so both tables always sum to the number of
//! records processed. Malformed lines touch neither.

mod stats;

pub use stats::RunStats;

use crate::FastMap;
use crate::flow::{FlowRecord, ParseError, parse_record};
use crate::lookup::LookupTable;
use crate::protocol::{ProtocolResolver, UNKNOWN_PROTOCOL};
use serde::Serialize;

/// Tag given to records without a lookup match.
pub const UNTAGGED: &str = "Untagged";

/// Destination port and resolved protocol name of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct PortProtocol<'a> {
    pub port: u16,
    pub protocol: &'a str,
}

/// What a record was counted under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match<'a> {
    pub tag: &'a str,
    pub key: PortProtocol<'a>,
}

/// Running tag and port/protocol counters for one run.
///
/// Borrows the lookup table and protocol resolver for its whole life; counter
/// keys point into them, so counting never allocates per record.
pub struct FlowTally<'a, R> {
    table: &'a LookupTable,
    resolver: &'a R,
    tag_counts: FastMap<&'a str, u64>,
    port_protocol_counts: FastMap<PortProtocol<'a>, u64>,
    unresolved_seen: [bool; 256],
    stats: RunStats,
}

impl<'a, R: ProtocolResolver> FlowTally<'a, R> {
    pub fn new(table: &'a LookupTable, resolver: &'a R) -> Self {
        Self {
            table,
            resolver,
            tag_counts: FastMap::default(),
            port_protocol_counts: FastMap::default(),
            unresolved_seen: [false; 256],
            stats: RunStats::default(),
        }
    }

    /// Tags one record and updates both counters.
    ///
    /// A protocol the resolver does not know is never looked up: the record is
    /// `Untagged` and counted under `(port, "unknown")`.
    pub fn process(&mut self, record: &FlowRecord<'_>) -> Match<'a> {
        let resolver: &'a R = self.resolver;
        let table: &'a LookupTable = self.table;

        let protocol = resolver.resolve(record.protocol);

        let matched = if protocol == UNKNOWN_PROTOCOL {
            self.note_unresolved(record);
            None
        } else {
            table.lookup(record.dst_port, protocol)
        };
        let tag = matched.unwrap_or(UNTAGGED);

        let key = PortProtocol {
            port: record.dst_port,
            protocol,
        };

        *self.tag_counts.entry(tag).or_insert(0) += 1;
        *self.port_protocol_counts.entry(key).or_insert(0) += 1;

        self.stats.records += 1;
        if matched.is_some() {
            self.stats.tagged += 1;
        }

        Match { tag, key }
    }

    /// Parses and tallies one raw line. Returns `None` for blank and malformed
    /// lines, which are counted in [`RunStats`] and otherwise skipped.
    pub fn observe_line(&mut self, line_no: u64, line: &[u8]) -> Option<Match<'a>> {
        self.stats.lines += 1;

        let parsed = match std::str::from_utf8(line) {
            Ok(line) => parse_record(line),
            Err(_) => Err(ParseError::InvalidEncoding),
        };

        match parsed {
            Ok(Some(record)) => Some(self.process(&record)),
            Ok(None) => {
                self.stats.blank += 1;
                None
            }
            Err(err) => {
                self.stats.malformed += 1;
                tracing::warn!(
                    line = line_no,
                    reason = %err,
                    "skipping malformed flow log line"
                );
                None
            }
        }
    }

    fn note_unresolved(&mut self, record: &FlowRecord<'_>) {
        self.stats.unresolved += 1;

        let seen = &mut self.unresolved_seen[record.protocol as usize];
        if !*seen {
            *seen = true;
            tracing::warn!(
                protocol = record.protocol,
                "unresolved protocol number; matching records are untagged"
            );
        } else {
            tracing::debug!(
                protocol = record.protocol,
                port = record.dst_port,
                "unresolved protocol number"
            );
        }
    }

    pub fn tag_counts(&self) -> &FastMap<&'a str, u64> {
        &self.tag_counts
    }

    pub fn port_protocol_counts(&self) -> &FastMap<PortProtocol<'a>, u64> {
        &self.port_protocol_counts
    }

    pub fn stats(&self) -> RunStats {
        self.stats
    }
}

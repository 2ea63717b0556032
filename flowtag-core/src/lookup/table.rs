use crate::FastMap;
use crate::lookup::row::{LookupKey, LookupRow, LookupRowError, parse_row};
use serde::Serialize;
use std::borrow::Cow;

/// Read-only mapping from (port, protocol) to tag.
///
/// Stored as protocol -> port -> tag so a lookup can borrow the protocol name
/// instead of building an owned key per record.
#[derive(Debug, Default)]
pub struct LookupTable {
    entries: FastMap<String, FastMap<u16, String>>,
    len: usize,
    stats: LookupStats,
}

/// Outcome of building a [`LookupTable`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LookupStats {
    /// Rows offered to the builder, blank ones included.
    pub rows: u64,
    pub loaded: u64,
    pub skipped: u64,
    pub blank: u64,
    /// Rows whose key was already present; the later tag replaced the earlier one.
    pub overridden: u64,
}

impl LookupTable {
    pub fn build<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = LookupRow>,
    {
        Self::build_with(rows, |_, _| {})
    }

    /// Builds the table, calling `on_reject` for every row that fails
    /// validation. Rejected rows are also reported as warnings.
    pub fn build_with<I, F>(rows: I, mut on_reject: F) -> Self
    where
        I: IntoIterator<Item = LookupRow>,
        F: FnMut(&LookupRow, &LookupRowError),
    {
        let mut table = Self::default();

        for row in rows {
            table.stats.rows += 1;

            match parse_row(&row) {
                Ok(Some((key, tag))) => {
                    table.stats.loaded += 1;
                    if let Some(previous) = table.insert(key, tag) {
                        table.stats.overridden += 1;
                        tracing::debug!(
                            line = row.line,
                            previous = %previous,
                            "duplicate lookup key; last row wins"
                        );
                    }
                }
                Ok(None) => {
                    table.stats.blank += 1;
                    tracing::debug!(line = row.line, "skipping blank lookup row");
                }
                Err(err) => {
                    table.stats.skipped += 1;
                    tracing::warn!(
                        line = row.line,
                        reason = %err,
                        "skipping malformed lookup row"
                    );
                    on_reject(&row, &err);
                }
            }
        }

        table
    }

    /// Inserts an entry, returning the tag it replaced.
    pub fn insert(&mut self, key: LookupKey, tag: String) -> Option<String> {
        let previous = self
            .entries
            .entry(key.protocol)
            .or_default()
            .insert(key.port, tag);

        if previous.is_none() {
            self.len += 1;
        }
        previous
    }

    /// Exact match on port, case-insensitive on protocol.
    pub fn lookup(&self, port: u16, protocol: &str) -> Option<&str> {
        let protocol = if protocol.chars().any(char::is_uppercase) {
            Cow::Owned(protocol.to_lowercase())
        } else {
            Cow::Borrowed(protocol)
        };

        self.entries
            .get(protocol.as_ref())?
            .get(&port)
            .map(String::as_str)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn stats(&self) -> LookupStats {
        self.stats
    }
}

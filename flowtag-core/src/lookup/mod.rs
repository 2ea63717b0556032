//! Lookup table: (destination port, protocol) -> tag.
//!
//! Rows come from a CSV file with a `dstport,protocol,tag` header. Each row is
//! validated on its own; a bad row is skipped with a warning and the rest of
//! the table still loads.

mod row;
mod source;
mod table;
#[cfg(test)]
mod tests;

pub use row::{LookupKey, LookupRow, LookupRowError, parse_row};
pub use source::{EXPECTED_HEADER, load_lookup_table, read_lookup_rows};
pub use table::{LookupStats, LookupTable};

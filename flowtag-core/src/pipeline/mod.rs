//! Run driver.
//!
//! The overall data processing architecture is:
//!
//! lookup csv
//! load_lookup_table
//! LookupTable
//!
//! flow log
//! tally_lines
//! FlowTally (LookupTable + ProtocolRegistry)
//! Report
//! write_report
//!
//! Each phase opens and releases its own file. Only an unreadable input or an
//! unwritable output ends the run early.

mod run;

pub use run::{RunSummary, run, run_with_registry, tally_lines, write_report};

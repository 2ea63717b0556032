//! `flowtag check`: validates the inputs and lists every row or line a run
//! would skip, without writing a report.

mod report;
#[cfg(test)]
mod tests;

pub use report::{Origin, Severity, ValidationIssue, ValidationReport};

use crate::cli::CheckArgs;
use crate::config::FlowtagConfig;
use crate::error::FlowtagError;
use crate::flow::{ParseError, parse_record};
use crate::lookup::{LookupTable, read_lookup_rows};
use crate::protocol::{ProtocolRegistry, ProtocolResolver, UNKNOWN_PROTOCOL};
use serde::Serialize;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// Counts gathered while checking.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CheckSummary {
    pub lookup_entries: usize,
    pub lookup_rows_skipped: u64,
    pub flow_log_checked: bool,
    pub flow_log_lines: u64,
    pub flow_log_records: u64,
    pub flow_log_lines_skipped: u64,
}

#[derive(Serialize)]
struct CheckOutput<'a> {
    summary: &'a CheckSummary,
    report: &'a ValidationReport,
}

/// Runs the check and prints its outcome. Returns `false` when any row or line
/// would be skipped.
pub fn check(args: &CheckArgs) -> anyhow::Result<bool> {
    let cfg = args.resolve_config()?;
    let mut report = ValidationReport::new(args.max_issues);

    let summary = check_inputs(&cfg, !args.lookup_only, &ProtocolRegistry::iana(), &mut report)?;

    if args.json {
        let output = CheckOutput {
            summary: &summary,
            report: &report,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if args.plain {
        print!("{}", report.render_plain());
        print!("{}", render_summary(&summary));
    } else {
        print!("{}", report.render_pretty());
        print!("{}", render_summary(&summary));
    }

    Ok(!report.has_errors())
}

/// Validates the lookup table and, when `scan_flow_log` is set, the flow log.
/// Unreadable inputs are errors; bad rows and lines end up in `report`.
pub fn check_inputs<R: ProtocolResolver>(
    cfg: &FlowtagConfig,
    scan_flow_log: bool,
    resolver: &R,
    report: &mut ValidationReport,
) -> Result<CheckSummary, FlowtagError> {
    let mut summary = CheckSummary::default();

    let lookup_path = &cfg.input.lookup;
    let file = File::open(lookup_path).map_err(|e| FlowtagError::input(lookup_path, e))?;
    let table = check_lookup(file, lookup_path, report)?;
    summary.lookup_entries = table.len();
    summary.lookup_rows_skipped = table.stats().skipped;

    if scan_flow_log {
        let flow_log = &cfg.input.flow_log;
        let file = File::open(flow_log).map_err(|e| FlowtagError::input(flow_log, e))?;
        check_flow_log(BufReader::new(file), flow_log, resolver, report, &mut summary)
            .map_err(|e| FlowtagError::input(flow_log, e))?;
        summary.flow_log_checked = true;
    }

    Ok(summary)
}

pub fn check_lookup<R: Read>(
    reader: R,
    origin: &Path,
    report: &mut ValidationReport,
) -> Result<LookupTable, FlowtagError> {
    let rows = read_lookup_rows(reader, origin)?;

    Ok(LookupTable::build_with(rows, |row, err| {
        report.rejected_lookup_row(row, err, origin)
    }))
}

pub fn check_flow_log<B, R>(
    mut reader: B,
    origin: &Path,
    resolver: &R,
    report: &mut ValidationReport,
    summary: &mut CheckSummary,
) -> std::io::Result<()>
where
    B: BufRead,
    R: ProtocolResolver,
{
    let mut buf = Vec::with_capacity(256);
    let mut unresolved_seen = [false; 256];
    let mut line_no = 0u64;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_no += 1;
        summary.flow_log_lines += 1;

        let parsed = match std::str::from_utf8(&buf) {
            Ok(line) => parse_record(line),
            Err(_) => Err(ParseError::InvalidEncoding),
        };

        match parsed {
            Ok(Some(record)) => {
                summary.flow_log_records += 1;

                let seen = &mut unresolved_seen[record.protocol as usize];
                if !*seen && resolver.resolve(record.protocol) == UNKNOWN_PROTOCOL {
                    *seen = true;
                    report.unresolved_protocol(record.protocol, Origin::new(origin, line_no));
                }
            }
            Ok(None) => {}
            Err(err) => {
                summary.flow_log_lines_skipped += 1;
                report.unparseable_flow_line(&err, Origin::new(origin, line_no));
            }
        }
    }

    Ok(())
}

fn render_summary(summary: &CheckSummary) -> String {
    let mut out = String::new();

    out.push_str(&format!("✔ {} lookup entries\n", summary.lookup_entries));
    if summary.lookup_rows_skipped > 0 {
        out.push_str(&format!(
            "✘ {} lookup rows would be skipped\n",
            summary.lookup_rows_skipped
        ));
    }

    if summary.flow_log_checked {
        out.push_str(&format!(
            "✔ {} flow records in {} lines\n",
            summary.flow_log_records, summary.flow_log_lines
        ));
        if summary.flow_log_lines_skipped > 0 {
            out.push_str(&format!(
                "✘ {} flow log lines would be skipped\n",
                summary.flow_log_lines_skipped
            ));
        }
    }

    out
}

use crate::config::FlowtagConfig;
use crate::error::FlowtagError;
use crate::lookup::{LookupStats, load_lookup_table};
use crate::protocol::{ProtocolRegistry, ProtocolResolver};
use crate::report::{OutputFormat, Report};
use crate::tally::{FlowTally, RunStats};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// What a completed run produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub lookup_entries: usize,
    pub lookup: LookupStats,
    pub flow_log: RunStats,
    pub distinct_tags: usize,
    pub distinct_port_protocols: usize,
    pub output: PathBuf,
}

/// Runs the whole pipeline with the IANA protocol registry.
pub fn run(config: &FlowtagConfig) -> Result<RunSummary, FlowtagError> {
    run_with_registry(config, &ProtocolRegistry::iana())
}

pub fn run_with_registry<R: ProtocolResolver>(
    config: &FlowtagConfig,
    resolver: &R,
) -> Result<RunSummary, FlowtagError> {
    let started = Instant::now();

    //--------------------------------------------------------------------------
    // Lookup table (hard fail if unreadable)
    //--------------------------------------------------------------------------
    let table = load_lookup_table(&config.input.lookup)?;

    //--------------------------------------------------------------------------
    // Flow log (hard fail if unreadable, per-line problems are skipped)
    //--------------------------------------------------------------------------
    let flow_log = &config.input.flow_log;
    tracing::info!(path = %flow_log.display(), "processing flow log");

    let mut tally = FlowTally::new(&table, resolver);
    {
        let file = File::open(flow_log).map_err(|e| FlowtagError::input(flow_log, e))?;
        tally_lines(BufReader::new(file), &mut tally)
            .map_err(|e| FlowtagError::input(flow_log, e))?;
    }

    let stats = tally.stats();
    tracing::info!(
        lines = stats.lines,
        records = stats.records,
        tagged = stats.tagged,
        untagged = stats.untagged(),
        unresolved = stats.unresolved,
        malformed = stats.malformed,
        blank = stats.blank,
        "finished processing flow log"
    );

    //--------------------------------------------------------------------------
    // Report
    //--------------------------------------------------------------------------
    let report = Report::from_tally(&tally, config.output.order);
    debug_assert_eq!(report.tag_total(), report.port_protocol_total());
    let output = &config.output.path;

    let written = if config.output.is_stdout() {
        write_report(&report, config.output.format, &mut io::stdout().lock())
    } else {
        write_report_file(&report, config.output.format, output)
    };
    written.map_err(|e| {
        tracing::error!(path = %output.display(), error = %e, "failed to write report");
        FlowtagError::output(output, e)
    })?;

    tracing::info!(
        path = %output.display(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "report written"
    );

    Ok(RunSummary {
        lookup_entries: table.len(),
        lookup: table.stats(),
        flow_log: stats,
        distinct_tags: report.tag_counts.len(),
        distinct_port_protocols: report.port_protocol_counts.len(),
        output: output.clone(),
    })
}

/// Feeds every line of `reader` into `tally`, in order.
///
/// Lines are read as raw bytes into one reused buffer; encoding problems are
/// per-line failures, only I/O errors abort.
pub fn tally_lines<B, R>(mut reader: B, tally: &mut FlowTally<'_, R>) -> io::Result<()>
where
    B: BufRead,
    R: ProtocolResolver,
{
    let mut buf = Vec::with_capacity(256);
    let mut line_no = 0u64;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_no += 1;
        tally.observe_line(line_no, &buf);
    }

    Ok(())
}

pub fn write_report<W: Write>(
    report: &Report<'_>,
    format: OutputFormat,
    out: &mut W,
) -> io::Result<()> {
    let rendered = report.render(format).map_err(io::Error::other)?;
    out.write_all(rendered.as_bytes())?;
    out.flush()
}

fn write_report_file(report: &Report<'_>, format: OutputFormat, path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut writer = io::BufWriter::new(File::create(path)?);
    write_report(report, format, &mut writer)
}

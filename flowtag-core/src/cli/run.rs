use crate::config::FlowtagConfig;
use crate::pipeline::{self, RunSummary};
use anyhow::Context;

/// Runs the pipeline and logs a one line summary.
pub fn run(cfg: &FlowtagConfig) -> anyhow::Result<RunSummary> {
    let summary = pipeline::run(cfg).context("flow log tagging failed")?;

    tracing::info!(
        records = summary.flow_log.records,
        tags = summary.distinct_tags,
        port_protocols = summary.distinct_port_protocols,
        skipped_lines = summary.flow_log.malformed,
        skipped_lookup_rows = summary.lookup.skipped,
        "done"
    );

    Ok(summary)
}

use crate::config::{ConfigError, FlowtagConfig};
use crate::error::FlowtagError;
use crate::report::{OutputFormat, ReportOrder};
use clap::Args;
use std::path::{Path, PathBuf};

#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Path to a flowtag TOML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Lookup table CSV (dstport,protocol,tag)
    #[arg(long)]
    pub lookup: Option<PathBuf>,

    /// Version 2 flow log
    #[arg(long)]
    pub flow_log: Option<PathBuf>,

    /// Report destination, `-` for stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Report format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Row ordering inside each report section
    #[arg(long, value_enum)]
    pub order: Option<ReportOrder>,
}

impl RunArgs {
    /// Loads the config file (or defaults) and applies command line overrides.
    pub fn resolve_config(&self) -> Result<FlowtagConfig, FlowtagError> {
        let mut cfg = load_base_config(self.config.as_deref())?;

        if let Some(lookup) = &self.lookup {
            cfg.input.lookup = lookup.clone();
        }
        if let Some(flow_log) = &self.flow_log {
            cfg.input.flow_log = flow_log.clone();
        }
        if let Some(output) = &self.output {
            cfg.output.path = output.clone();
        }
        if let Some(format) = self.format {
            cfg.output.format = format;
        }
        if let Some(order) = self.order {
            cfg.output.order = order;
        }

        cfg.validate()?;
        Ok(cfg)
    }
}

#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    /// Path to a flowtag TOML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Lookup table CSV (dstport,protocol,tag)
    #[arg(long)]
    pub lookup: Option<PathBuf>,

    /// Version 2 flow log
    #[arg(long)]
    pub flow_log: Option<PathBuf>,

    /// Only validate the lookup table
    #[arg(long, default_value = "false")]
    pub lookup_only: bool,

    /// Output as JSON
    #[arg(long, conflicts_with = "plain")]
    pub json: bool,

    /// Plain `file:line: severity: message` output without colors
    #[arg(short, long, default_value = "false")]
    pub plain: bool,

    /// Stop listing issues after this many; the rest are only counted
    #[arg(long, default_value_t = 100)]
    pub max_issues: usize,
}

impl CheckArgs {
    pub fn resolve_config(&self) -> Result<FlowtagConfig, FlowtagError> {
        let mut cfg = load_base_config(self.config.as_deref())?;

        if let Some(lookup) = &self.lookup {
            cfg.input.lookup = lookup.clone();
        }
        if let Some(flow_log) = &self.flow_log {
            cfg.input.flow_log = flow_log.clone();
        }

        cfg.validate()?;
        Ok(cfg)
    }
}

fn load_base_config(path: Option<&Path>) -> Result<FlowtagConfig, ConfigError> {
    match path {
        Some(path) => FlowtagConfig::from_file(path),
        None => Ok(FlowtagConfig::default()),
    }
}

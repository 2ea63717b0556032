mod error;

pub use error::ConfigError;

use crate::logging::LogFormat;
use crate::report::{OutputFormat, ReportOrder};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::level_filters::LevelFilter;

/// Path meaning "write the report to stdout".
pub const STDOUT_PATH: &str = "-";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FlowtagConfig {
    pub input: InputConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InputConfig {
    /// CSV file with a `dstport,protocol,tag` header.
    pub lookup: PathBuf,

    /// Version 2 flow log, one record per line.
    pub flow_log: PathBuf,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            lookup: PathBuf::from("lookup_table.csv"),
            flow_log: PathBuf::from("flow_log.log"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Report destination; `-` for stdout.
    pub path: PathBuf,
    pub format: OutputFormat,
    pub order: ReportOrder,
}

impl OutputConfig {
    pub fn is_stdout(&self) -> bool {
        self.path == Path::new(STDOUT_PATH)
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("output.txt"),
            format: OutputFormat::default(),
            order: ReportOrder::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Default level or filter directives; `RUST_LOG` wins when set.
    pub level: String,
    pub format: LogFormat,
    /// Optional file that receives a copy of every diagnostic.
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
            file: None,
        }
    }
}

impl FlowtagConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        let cfg: Self = toml::from_str(&contents).map_err(|e| ConfigError::parse(path, e))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.input.lookup.as_os_str().is_empty() {
            return Err(ConfigError::EmptyPath { key: "input.lookup" });
        }
        if self.input.flow_log.as_os_str().is_empty() {
            return Err(ConfigError::EmptyPath {
                key: "input.flow_log",
            });
        }
        if self.output.path.as_os_str().is_empty() {
            return Err(ConfigError::EmptyPath { key: "output.path" });
        }
        if !is_valid_level(&self.logging.level) {
            return Err(ConfigError::InvalidLogLevel {
                level: self.logging.level.clone(),
            });
        }
        Ok(())
    }
}

/// Accepts a bare level (`info`) or comma separated `target=level` directives.
/// A bare word must be a level name.
fn is_valid_level(level: &str) -> bool {
    !level.trim().is_empty()
        && level.split(',').all(|directive| {
            let directive = directive.trim();
            match directive.rsplit_once('=') {
                Some((target, level)) => {
                    !target.trim().is_empty() && LevelFilter::from_str(level.trim()).is_ok()
                }
                None => LevelFilter::from_str(directive).is_ok(),
            }
        })
}

impl FromStr for FlowtagConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cfg: Self = toml::from_str(s).map_err(|e| ConfigError::parse("<string>", e))?;
        cfg.validate()?;
        Ok(cfg)
    }
}

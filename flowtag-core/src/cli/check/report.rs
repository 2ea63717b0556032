use crate::flow::ParseError;
use crate::lookup::{LookupRow, LookupRowError};
use owo_colors::OwoColorize;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Origin {
    pub file: PathBuf,
    pub line: u64,
}

impl Origin {
    pub fn new(file: &Path, line: u64) -> Self {
        Self {
            file: file.to_path_buf(),
            line,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidationIssue {
    pub severity: Severity,
    pub message: String,
    pub origin: Origin,
    pub help: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// Issues found by `flowtag check`, capped at `max_issues` listed entries.
#[derive(Debug, Serialize)]
pub struct ValidationReport {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
    /// Issues beyond the cap; counted but not listed.
    pub suppressed: u64,
    #[serde(skip)]
    max_issues: usize,
}

impl ValidationReport {
    pub fn new(max_issues: usize) -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
            suppressed: 0,
            max_issues,
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty() || self.suppressed > 0
    }

    pub fn has_violations(&self) -> bool {
        self.has_errors() || !self.warnings.is_empty()
    }

    pub(crate) fn error(&mut self, message: String, origin: Origin, help: Option<String>) {
        self.push(Severity::Error, message, origin, help);
    }

    pub(crate) fn warning(&mut self, message: String, origin: Origin, help: Option<String>) {
        self.push(Severity::Warning, message, origin, help);
    }

    fn push(&mut self, severity: Severity, message: String, origin: Origin, help: Option<String>) {
        if self.errors.len() + self.warnings.len() >= self.max_issues {
            self.suppressed += 1;
            return;
        }

        let issue = ValidationIssue {
            severity,
            message,
            origin,
            help,
        };
        match severity {
            Severity::Error => self.errors.push(issue),
            Severity::Warning => self.warnings.push(issue),
        }
    }

    pub fn render_plain(&self) -> String {
        let mut out = String::new();

        for issue in self.errors.iter().chain(self.warnings.iter()) {
            let severity = match issue.severity {
                Severity::Error => "error",
                Severity::Warning => "warning",
            };

            out.push_str(&format!(
                "{}:{}: {}: {}\n",
                issue.origin.file.display(),
                issue.origin.line,
                severity,
                issue.message
            ));

            if let Some(help) = &issue.help {
                out.push_str(&format!("  help: {}\n", help));
            }
        }

        if self.suppressed > 0 {
            out.push_str(&format!("... {} more issues not shown\n", self.suppressed));
        }

        out
    }

    pub fn render_pretty(&self) -> String {
        let mut out = String::new();

        if self.has_violations() {
            out.push_str(&format!(
                "input validation found {} errors, {} warnings\n\n",
                self.errors.len() as u64 + self.suppressed,
                self.warnings.len()
            ));
        }

        let mut by_file = BTreeMap::new();
        for issue in self.errors.iter().chain(self.warnings.iter()) {
            by_file
                .entry(&issue.origin.file)
                .or_insert(Vec::new())
                .push(issue);
        }

        for (file, mut issues) in by_file {
            issues.sort_by_key(|i| i.origin.line);
            out.push_str(&format!("{}\n", file.display()));

            for issue in issues {
                let label = match issue.severity {
                    Severity::Error => "error".red().bold().to_string(),
                    Severity::Warning => "warning".yellow().bold().to_string(),
                };
                out.push_str(&format!(
                    "  line {}: {}: {}\n",
                    issue.origin.line, label, issue.message
                ));
                if let Some(help) = &issue.help {
                    out.push_str(&format!("    help: {}\n", help));
                }
            }
            out.push('\n');
        }

        if self.suppressed > 0 {
            out.push_str(&format!("... {} more issues not shown\n", self.suppressed));
        }

        out
    }
}

/// Lookup Table Validation
impl ValidationReport {
    pub fn rejected_lookup_row(&mut self, row: &LookupRow, err: &LookupRowError, file: &Path) {
        self.error(
            err.to_string(),
            Origin::new(file, row.line),
            Some(format!("row: {}", row.fields.join(","))),
        );
    }
}

/// Flow Log Validation
impl ValidationReport {
    pub fn unparseable_flow_line(&mut self, err: &ParseError, origin: Origin) {
        let help = match err {
            ParseError::FieldCountMismatch { .. } => Some(
                "version 2 records have 14 fields: version account-id interface-id srcaddr \
                 dstaddr srcport dstport protocol packets bytes start end action log-status"
                    .to_string(),
            ),
            ParseError::UnsupportedVersion { .. } => {
                Some("only version 2 flow logs are supported".to_string())
            }
            _ => None,
        };
        self.error(err.to_string(), origin, help);
    }

    pub fn unresolved_protocol(&mut self, number: u8, origin: Origin) {
        self.warning(
            format!("protocol number {} does not resolve to a name", number),
            origin,
            Some("records with this protocol are counted as Untagged".to_string()),
        );
    }
}

use thiserror::Error;

/// Key of a lookup entry. `protocol` is always lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LookupKey {
    pub port: u16,
    pub protocol: String,
}

/// One raw lookup row as read from the source, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupRow {
    /// 1-based line in the source file, 0 when the row did not come from a file.
    pub line: u64,
    pub fields: Vec<String>,
}

impl LookupRow {
    pub fn new<I, S>(line: u64, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            line,
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    fn field(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(|f| f.trim())
    }

    fn is_blank(&self) -> bool {
        self.fields.iter().all(|f| f.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupRowError {
    #[error("missing {field} field")]
    MissingField { field: &'static str },

    #[error("invalid port '{value}'")]
    InvalidPort { value: String },

    #[error("empty protocol")]
    EmptyProtocol,

    #[error("empty tag")]
    EmptyTag,
}

/// Validates a row into a key and its tag.
///
/// Returns `Ok(None)` for rows with nothing but empty fields. Columns past the
/// third are ignored.
pub fn parse_row(row: &LookupRow) -> Result<Option<(LookupKey, String)>, LookupRowError> {
    if row.is_blank() {
        return Ok(None);
    }

    let port = row
        .field(0)
        .ok_or(LookupRowError::MissingField { field: "dstport" })?;
    let protocol = row
        .field(1)
        .ok_or(LookupRowError::MissingField { field: "protocol" })?;
    let tag = row
        .field(2)
        .ok_or(LookupRowError::MissingField { field: "tag" })?;

    let port = parse_port(port).ok_or_else(|| LookupRowError::InvalidPort {
        value: port.to_string(),
    })?;

    if protocol.is_empty() {
        return Err(LookupRowError::EmptyProtocol);
    }
    if tag.is_empty() {
        return Err(LookupRowError::EmptyTag);
    }

    Ok(Some((
        LookupKey {
            port,
            protocol: protocol.to_lowercase(),
        },
        tag.to_string(),
    )))
}

/// Ports are plain ASCII digits, no sign.
fn parse_port(raw: &str) -> Option<u16> {
    if !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

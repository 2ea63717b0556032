use serde::Serialize;

/// Line accounting for one pass over a flow log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    /// Lines read, including blank and malformed ones.
    pub lines: u64,
    pub blank: u64,
    pub malformed: u64,
    /// Structurally valid records counted.
    pub records: u64,
    /// Records that matched a lookup entry.
    pub tagged: u64,
    /// Records whose protocol number did not resolve.
    pub unresolved: u64,
}

impl RunStats {
    pub fn untagged(&self) -> u64 {
        self.records - self.tagged
    }
}

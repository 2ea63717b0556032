use crate::error::FlowtagError;
use crate::lookup::row::LookupRow;
use crate::lookup::table::LookupTable;
use csv::{ByteRecord, ReaderBuilder, Trim};
use std::fs::File;
use std::io::Read;
use std::path::Path;

pub const EXPECTED_HEADER: [&str; 3] = ["dstport", "protocol", "tag"];

/// Reads and builds the lookup table at `path`.
///
/// The file handle is released before this returns, whatever the outcome.
pub fn load_lookup_table(path: &Path) -> Result<LookupTable, FlowtagError> {
    tracing::info!(path = %path.display(), "loading lookup table");

    let file = File::open(path).map_err(|e| FlowtagError::input(path, e))?;
    let rows = read_lookup_rows(file, path)?;
    let table = LookupTable::build(rows);

    let stats = table.stats();
    tracing::info!(
        entries = table.len(),
        loaded = stats.loaded,
        skipped = stats.skipped,
        overridden = stats.overridden,
        "loaded lookup table"
    );

    Ok(table)
}

/// Reads every data row of a lookup CSV. The header row is required but only
/// checked loosely: an unexpected header is reported and otherwise ignored.
///
/// `origin` is used for diagnostics and errors only.
pub fn read_lookup_rows<R: Read>(
    mut reader: R,
    origin: &Path,
) -> Result<Vec<LookupRow>, FlowtagError> {
    let mut input = Vec::new();
    reader
        .read_to_end(&mut input)
        .map_err(|e| FlowtagError::input(origin, e))?;

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(input.as_slice());

    let mut lines = LineIndex::new(&input);
    let mut records = reader.byte_records();

    let header = match records.next() {
        Some(record) => record.map_err(|e| lookup_error(origin, e))?,
        None => {
            return Err(FlowtagError::EmptyLookup {
                path: origin.to_path_buf(),
            });
        }
    };

    let header = to_row(&header, &mut lines);
    if header.fields.iter().all(|f| f.trim().is_empty()) {
        return Err(FlowtagError::EmptyLookup {
            path: origin.to_path_buf(),
        });
    }
    if !is_expected_header(&header) {
        tracing::warn!(
            path = %origin.display(),
            header = %header.fields.join(","),
            "unexpected lookup header; expected dstport,protocol,tag"
        );
    }

    let mut rows = Vec::new();
    for record in records {
        let record = record.map_err(|e| lookup_error(origin, e))?;
        rows.push(to_row(&record, &mut lines));
    }

    Ok(rows)
}

/// Maps record positions to 1-based file lines.
///
/// `csv::Position::line` does not count the empty lines the reader skips, and
/// a record's byte position sits before those lines. Both are resolved here
/// from the raw input. Positions must be queried in increasing order.
struct LineIndex<'a> {
    input: &'a [u8],
    offset: usize,
    line: u64,
}

impl<'a> LineIndex<'a> {
    fn new(input: &'a [u8]) -> Self {
        Self {
            input,
            offset: 0,
            line: 1,
        }
    }

    fn line_at(&mut self, byte: u64) -> u64 {
        let target = usize::try_from(byte)
            .unwrap_or(usize::MAX)
            .min(self.input.len());

        while self.offset < target {
            self.advance();
        }
        while matches!(self.input.get(self.offset), Some(b'\r' | b'\n')) {
            self.advance();
        }
        self.line
    }

    fn advance(&mut self) {
        if self.input[self.offset] == b'\n' {
            self.line += 1;
        }
        self.offset += 1;
    }
}

fn to_row(record: &ByteRecord, lines: &mut LineIndex<'_>) -> LookupRow {
    let line = record
        .position()
        .map(|p| lines.line_at(p.byte()))
        .unwrap_or(0);

    LookupRow::new(
        line,
        record
            .iter()
            .map(|field| String::from_utf8_lossy(field).into_owned()),
    )
}

fn is_expected_header(header: &LookupRow) -> bool {
    header.fields.len() >= EXPECTED_HEADER.len()
        && header
            .fields
            .iter()
            .zip(EXPECTED_HEADER)
            .all(|(actual, expected)| {
                actual
                    .trim_start_matches('\u{feff}')
                    .trim()
                    .eq_ignore_ascii_case(expected)
            })
}

fn lookup_error(origin: &Path, source: csv::Error) -> FlowtagError {
    FlowtagError::Lookup {
        path: origin.to_path_buf(),
        source,
    }
}

//! CSV scanning shared by the validation and load passes
//!
//! Both passes go through [`scan`], so a row accepted by `validate` is
//! exactly a row `load` can turn into a record.
//!
//! The `csv` reader drops empty lines, so the physical layout of the file is
//! walked separately by [`layout`]: a blank line is a data row with 0 fields.

use std::fs;
use std::io;
use std::path::Path;

use contracts::{LoadError, RecipientRecord, RowDefect};
use csv::{ByteRecord, ReaderBuilder, StringRecord};

/// One logical row of the input, keyed by its first physical line (1-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RowSpan {
    Blank(u64),
    Record(u64),
}

/// Read the whole input
pub(crate) fn read(path: &Path) -> Result<Vec<u8>, LoadError> {
    fs::read(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => LoadError::not_found(path.display().to_string()),
        _ => LoadError::read(format!("{}: {e}", path.display())),
    })
}

/// Walk every data row, handing each validated record to `on_record`
///
/// The first non-blank row is the header and is skipped unconditionally,
/// its field count is not checked. Stops at the first defective row.
pub(crate) fn scan<F>(path: &Path, mut on_record: F) -> Result<usize, LoadError>
where
    F: FnMut(RecipientRecord),
{
    let bytes = read(path)?;
    let mut records = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes.as_slice())
        .into_byte_records();
    let mut rows = layout(&bytes)
        .into_iter()
        .skip_while(|span| matches!(span, RowSpan::Blank(_)));

    if rows.next().is_some() {
        next_record(&mut records, 1)?;
    }

    let mut count = 0;
    for span in rows {
        match span {
            RowSpan::Blank(line) => {
                return Err(LoadError::malformed_row(line, RowDefect::FieldCount { found: 0 }));
            }
            RowSpan::Record(line) => {
                let row = next_record(&mut records, line)?;
                let row = StringRecord::from_byte_record(row)
                    .map_err(|e| LoadError::read(format!("line {line}: {e}")))?;
                on_record(parse_row(line, &row)?);
                count += 1;
            }
        }
    }

    Ok(count)
}

fn next_record<I>(records: &mut I, line: u64) -> Result<ByteRecord, LoadError>
where
    I: Iterator<Item = csv::Result<ByteRecord>>,
{
    records
        .next()
        .transpose()
        .map_err(|e| LoadError::read(e.to_string()))?
        .ok_or_else(|| LoadError::read(format!("line {line}: row could not be parsed")))
}

fn parse_row(line: u64, row: &StringRecord) -> Result<RecipientRecord, LoadError> {
    let fields: Vec<&str> = row.iter().collect();
    RecipientRecord::from_row(&fields).map_err(|defect| LoadError::malformed_row(line, defect))
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Field {
    Start,
    Unquoted,
    Quoted,
    QuoteInQuoted,
}

/// Split the input into rows the way the `csv` reader does, keeping blanks
///
/// Line breaks inside a quoted field belong to the row. `\n`, `\r` and
/// `\r\n` each count as one break.
pub(crate) fn layout(bytes: &[u8]) -> Vec<RowSpan> {
    let mut spans = Vec::new();
    let mut line = 1;
    let mut row_start = 1;
    let mut empty = true;
    let mut state = Field::Start;

    for (i, &b) in bytes.iter().enumerate() {
        if b == b'\r' || b == b'\n' {
            if b == b'\r' && bytes.get(i + 1) == Some(&b'\n') {
                continue;
            }
            line += 1;
            if state == Field::Quoted {
                continue;
            }
            spans.push(if empty {
                RowSpan::Blank(row_start)
            } else {
                RowSpan::Record(row_start)
            });
            row_start = line;
            empty = true;
            state = Field::Start;
            continue;
        }

        empty = false;
        state = match (state, b) {
            (Field::Start, b'"') => Field::Quoted,
            (Field::Start | Field::Unquoted | Field::QuoteInQuoted, b',') => Field::Start,
            (Field::Start | Field::Unquoted, _) => Field::Unquoted,
            (Field::Quoted, b'"') => Field::QuoteInQuoted,
            (Field::Quoted, _) => Field::Quoted,
            (Field::QuoteInQuoted, b'"') => Field::Quoted,
            (Field::QuoteInQuoted, _) => Field::Unquoted,
        };
    }

    if !empty {
        spans.push(RowSpan::Record(row_start));
    }

    spans
}

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::io::recovery::{self, RecoveryCategory, RecoveryEntry};
use crate::model::record::{HEADER, TaskRecord, parse_date};
use crate::model::store::{LineEnding, Store};

/// Error type for data file I/O
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{path} is not a work log: expected header `{expected}`, found `{found}`")]
    BadHeader {
        path: PathBuf,
        expected: String,
        found: String,
    },
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
}

/// A data row that was left out of the store at load time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    /// 1-based line number in the data file
    pub line: u64,
    pub reason: String,
    /// The row exactly as it appears in the file, without its line terminator.
    /// Bytes that are not UTF-8 are read as Latin-1.
    pub raw: String,
}

/// Result of loading the data file
#[derive(Debug)]
pub struct LoadOutcome {
    pub store: Store,
    pub skipped: Vec<SkippedRow>,
    /// The file did not exist and was created with just the header
    pub created: bool,
}

/// Load the store from `path`.
///
/// A missing file is created (with parent directories) holding only the
/// header. Malformed rows are skipped, returned in `skipped` and written to
/// the recovery log; an unreadable file or a wrong header is an error.
pub fn load_store(path: &Path) -> Result<LoadOutcome, StoreError> {
    if !path.exists() {
        if let Some(dir) = path.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir).map_err(|e| StoreError::WriteError {
                path: path.to_path_buf(),
                source: e,
            })?;
        }
        let store = Store::new();
        write_store(path, &store)?;
        return Ok(LoadOutcome {
            store,
            skipped: Vec::new(),
            created: true,
        });
    }

    let data = fs::read(path).map_err(|e| StoreError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    let (store, skipped) = parse_store(path, &data)?;

    for row in &skipped {
        recovery::log_recovery(
            path,
            RecoveryEntry::new(RecoveryCategory::Parser, "row skipped")
                .field("Line", row.line.to_string())
                .field("Reason", row.reason.clone())
                .body(row.raw.clone()),
        );
    }

    Ok(LoadOutcome {
        store,
        skipped,
        created: false,
    })
}

/// Parse data file bytes into a store plus the rows that had to be skipped.
///
/// Empty input is an empty store. The header must match exactly; a data row
/// that is not UTF-8 or does not make a valid record is skipped. The store
/// remembers whether the header line ended in CRLF.
pub fn parse_store(path: &Path, data: &[u8]) -> Result<(Store, Vec<SkippedRow>), StoreError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(data);

    let mut row = csv::ByteRecord::new();
    if !reader.read_byte_record(&mut row)? {
        return Ok((Store::new(), Vec::new()));
    }
    let header_to = (reader.position().byte() as usize).min(data.len());
    let (header_start, header_end) = row_span(data, 0, header_to);
    if row.iter().ne(HEADER.iter().map(|h| h.as_bytes())) {
        return Err(StoreError::BadHeader {
            path: path.to_path_buf(),
            expected: HEADER.join(","),
            found: decode_raw(&data[header_start..header_end]),
        });
    }
    let line_ending = if data[header_end..].starts_with(b"\r\n") {
        LineEnding::CrLf
    } else {
        LineEnding::Lf
    };

    let mut records: Vec<TaskRecord> = Vec::new();
    let mut seen = HashSet::new();
    let mut skipped = Vec::new();
    let mut line = 1;
    let mut counted = 0;

    loop {
        let before = reader.position().byte() as usize;
        let read = reader.read_byte_record(&mut row);
        if matches!(read, Ok(false)) {
            break;
        }
        let after = (reader.position().byte() as usize).clamp(before, data.len());
        let (start, end) = row_span(data, before, after);
        line += data[counted..start].iter().filter(|&&b| b == b'\n').count() as u64;
        counted = start;
        let raw = || decode_raw(&data[start..end]);

        let parsed = match read {
            Ok(_) => decode_row(&row).and_then(|record| parse_row(&record)),
            Err(e) => Err(e.to_string()),
        };
        match parsed {
            Ok(record) if seen.insert(record.id) => records.push(record),
            Ok(record) => skipped.push(SkippedRow {
                line,
                reason: format!("duplicate id {}", record.id),
                raw: raw(),
            }),
            Err(reason) => skipped.push(SkippedRow {
                line,
                reason,
                raw: raw(),
            }),
        }
        if after == before {
            break;
        }
    }

    Ok((
        Store::from_records(records).with_line_ending(line_ending),
        skipped,
    ))
}

/// The bytes of the row read between offsets `from` and `to`, without
/// blank lines before it or the terminator after it
fn row_span(data: &[u8], from: usize, to: usize) -> (usize, usize) {
    let is_term = |b: &u8| *b == b'\r' || *b == b'\n';
    let slice = &data[from..to];
    let start = from + slice.iter().take_while(|b| is_term(b)).count();
    let end = to - slice[start - from..].iter().rev().take_while(|b| is_term(b)).count();
    (start, end)
}

/// UTF-8 when valid, otherwise each byte as its Latin-1 character
fn decode_raw(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => bytes.iter().map(|&b| char::from(b)).collect(),
    }
}

fn decode_row(row: &csv::ByteRecord) -> Result<csv::StringRecord, String> {
    csv::StringRecord::from_byte_record(row.clone()).map_err(|e| {
        match HEADER.get(e.utf8_error().field()) {
            Some(name) => format!("invalid UTF-8 in {}", name),
            None => "invalid UTF-8".to_string(),
        }
    })
}

fn parse_row(row: &csv::StringRecord) -> Result<TaskRecord, String> {
    if row.len() != HEADER.len() {
        return Err(format!(
            "expected {} fields, found {}",
            HEADER.len(),
            row.len()
        ));
    }
    let id = row[0]
        .trim()
        .parse::<u32>()
        .map_err(|_| format!("invalid id `{}`", &row[0]))?;
    let date = parse_date(&row[1]).ok_or_else(|| format!("invalid date `{}`", &row[1]))?;
    Ok(TaskRecord {
        id,
        date,
        name: row[2].to_string(),
        duration: row[3].to_string(),
        notes: row[4].to_string(),
    })
}

/// Serialize the whole store: header first, then one row per record in canonical order.
/// Rows end with the store's line ending.
pub fn serialize_store(store: &Store) -> Result<String, StoreError> {
    let terminator = match store.line_ending() {
        LineEnding::Lf => csv::Terminator::Any(b'\n'),
        LineEnding::CrLf => csv::Terminator::CRLF,
    };
    let mut writer = csv::WriterBuilder::new()
        .terminator(terminator)
        .from_writer(Vec::new());
    writer.write_record(HEADER)?;
    for record in store.records() {
        writer.write_record(record.to_row())?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| StoreError::IoError(e.into_error()))?;
    String::from_utf8(bytes)
        .map_err(|e| StoreError::IoError(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

/// Overwrite the data file with the full store, atomically.
///
/// On failure the content that could not be written goes to the recovery log.
pub fn write_store(path: &Path, store: &Store) -> Result<(), StoreError> {
    let content = serialize_store(store)?;
    if let Err(e) = recovery::atomic_write(path, content.as_bytes()) {
        recovery::log_recovery(
            path,
            RecoveryEntry::new(RecoveryCategory::Write, "data file write failed")
                .field("Target", path.display().to_string())
                .field("Error", e.to_string())
                .body(content),
        );
        return Err(StoreError::WriteError {
            path: path.to_path_buf(),
            source: e,
        });
    }
    Ok(())
}

//! Sample Sheet
//!
//! Loads a delimited annotation table into a row-ordered, column-named
//! table. The first header cell names the canonical sample-name column. A
//! zero-row table (or a zero-byte placeholder file) is a valid empty sheet.

use crate::error::SheetError;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Conventional header of the sample-name column.
pub const SAMPLE_NAME_COLUMN: &str = "sample_name";
/// Column carrying the protocol/assay tag used for sheet filtering.
pub const PROTOCOL_COLUMN: &str = "protocol";

/// A row-ordered table of named columns, one row per sample.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SampleSheet {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl SampleSheet {
    /// Load a sheet from a file, sniffing the delimiter.
    ///
    /// The header line decides between tab and comma; the file extension
    /// (`.tsv`, `.txt`) breaks the tie when the header is a single column.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SheetError> {
        let path = path.as_ref();
        let text = read_source(path)?;
        let delimiter = detect_delimiter(&text, path);
        Self::from_text(&text, delimiter)
    }

    /// Load a sheet from a file with an explicit delimiter.
    pub fn from_file_with_delimiter(
        path: impl AsRef<Path>,
        delimiter: u8,
    ) -> Result<Self, SheetError> {
        let text = read_source(path.as_ref())?;
        Self::from_text(&text, delimiter)
    }

    /// Parse sheet text with the given delimiter.
    pub fn from_text(text: &str, delimiter: u8) -> Result<Self, SheetError> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .trim(csv::Trim::All)
            .from_reader(text.as_bytes());

        let columns: Vec<String> = reader.headers()?.iter().map(String::from).collect();
        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.as_str()) {
                return Err(SheetError::DuplicateColumn(column.clone()));
            }
        }

        let mut rows = Vec::new();
        for (index, record) in reader.records().enumerate() {
            let record = record?;
            let row: Vec<String> = record.iter().map(String::from).collect();
            if row.first().map_or(true, |name| name.is_empty()) {
                return Err(SheetError::MissingSampleName { row: index + 1 });
            }
            rows.push(row);
        }

        Ok(Self { columns, rows })
    }

    /// Assemble a sheet from columns and rows already in memory.
    pub fn from_parts(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { columns, rows }
    }

    /// Column headers in declared order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Header of the sample-name column (the first column).
    pub fn name_column(&self) -> Option<&str> {
        self.columns.first().map(String::as_str)
    }

    /// Rows in original order.
    pub fn rows(&self) -> impl Iterator<Item = &[String]> {
        self.rows.iter().map(Vec::as_slice)
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Value at `row` for the named column.
    pub fn get(&self, row: usize, column: &str) -> Option<&str> {
        let position = self.columns.iter().position(|c| c == column)?;
        self.rows.get(row)?.get(position).map(String::as_str)
    }

    /// Render the sheet back to delimited text, header first.
    pub fn to_delimited_string(&self, delimiter: u8) -> Result<String, SheetError> {
        if self.columns.is_empty() {
            return Ok(String::new());
        }
        let mut bytes = Vec::new();
        {
            let mut writer = csv::WriterBuilder::new()
                .delimiter(delimiter)
                .from_writer(&mut bytes);
            writer.write_record(&self.columns)?;
            for row in &self.rows {
                writer.write_record(row)?;
            }
            writer
                .flush()
                .map_err(|e| SheetError::Malformed(csv::Error::from(e)))?;
        }
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

fn read_source(path: &Path) -> Result<String, SheetError> {
    fs::read_to_string(path).map_err(|source| SheetError::Unreadable {
        path: path.to_path_buf(),
        source,
    })
}

/// Decide between tab and comma from the header line, falling back to the
/// file extension for single-column sheets.
fn detect_delimiter(text: &str, path: &Path) -> u8 {
    let header = text.lines().next().unwrap_or("");
    if header.contains('\t') {
        return b'\t';
    }
    if header.contains(',') {
        return b',';
    }
    match path.extension().and_then(|e| e.to_str()) {
        Some("tsv") | Some("txt") => b'\t',
        _ => b',',
    }
}

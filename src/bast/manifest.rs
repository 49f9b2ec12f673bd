//! Manifest table loading.
//!
//! Turns uploaded bytes into a rectangular table of named columns. Delimited
//! text goes through the `csv` crate, everything else is treated as a
//! spreadsheet workbook and read with `calamine` (first sheet only, first row
//! as header).

use std::io::Cursor;
use std::path::Path;

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use thiserror::Error;

use super::validation::REQUIRED_QTY_COLUMN;

/// Declared kind of an uploaded manifest file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Csv,
    Spreadsheet,
}

impl FileKind {
    /// Decide the parser from the uploaded filename. Only a `.csv` extension
    /// selects the delimited-text path; anything else is read as a workbook.
    pub fn from_filename(filename: &str) -> Self {
        let ext = Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase());

        match ext.as_deref() {
            Some("csv") => Self::Csv,
            _ => Self::Spreadsheet,
        }
    }
}

/// Errors from parsing uploaded manifest bytes. The underlying library
/// message is preserved so the caller can surface it verbatim.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("{0}")]
    Csv(#[from] csv::Error),
    #[error("{0}")]
    Spreadsheet(#[from] calamine::Error),
    #[error("workbook tidak memiliki sheet")]
    NoSheet,
}

/// In-memory manifest: named columns over string cells, rows padded to the
/// column count. Lives only for the duration of one request.
#[derive(Debug, Clone, Default)]
pub struct ManifestTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ManifestTable {
    /// Parse uploaded bytes according to the declared file kind.
    pub fn from_bytes(bytes: &[u8], kind: FileKind) -> Result<Self, ManifestError> {
        match kind {
            FileKind::Csv => Self::from_csv(bytes),
            FileKind::Spreadsheet => Self::from_workbook(bytes),
        }
    }

    fn from_csv(bytes: &[u8]) -> Result<Self, ManifestError> {
        let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(bytes);

        let columns: Vec<String> = reader
            .headers()?
            .iter()
            .map(|name| name.trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            let mut row: Vec<String> =
                record.iter().map(|cell| cell.to_string()).collect();
            row.resize(columns.len(), String::new());
            rows.push(row);
        }

        Ok(Self { columns, rows })
    }

    fn from_workbook(bytes: &[u8]) -> Result<Self, ManifestError> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or(ManifestError::NoSheet)??;

        let mut sheet_rows = range.rows();
        let columns: Vec<String> = match sheet_rows.next() {
            Some(header) => header.iter().map(|cell| cell_to_string(cell)).collect(),
            None => return Ok(Self::default()),
        };

        let rows = sheet_rows
            .map(|row| {
                let mut cells: Vec<String> =
                    row.iter().map(|cell| cell_to_string(cell)).collect();
                cells.resize(columns.len(), String::new());
                cells
            })
            .collect();

        Ok(Self { columns, rows })
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Position of a column by its exact (case-sensitive) name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|col| col == name)
    }

    /// Sum of the `KOLI QTY` column. Cells that do not coerce to a number
    /// count as zero; the sum truncates to an integer. Never fails.
    pub fn total_koli(&self) -> i64 {
        let Some(idx) = self.column_index(REQUIRED_QTY_COLUMN) else {
            return 0;
        };

        self.rows
            .iter()
            .map(|row| {
                row.get(idx)
                    .and_then(|cell| cell.trim().parse::<f64>().ok())
                    .unwrap_or(0.0)
            })
            .sum::<f64>() as i64
    }
}

/// Render a workbook cell as the string shown in the table. Whole-number
/// floats drop the trailing `.0`.
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) if f.fract() == 0.0 => format!("{}", *f as i64),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt.as_f64().to_string(),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Error(e) => e.to_string(),
    }
}

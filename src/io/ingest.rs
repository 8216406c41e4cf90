//! Tabular ingest: turn an uploaded `.csv` / `.xlsx` into `ScoreRecord`s.
//!
//! Both formats go through the same path:
//! - header row -> required-column check (`MissingColumns`)
//! - every data row -> serde deserialization into `ScoreRecord`
//!   (any non-numeric score is a `Read` error naming the row and column)
//!
//! Spreadsheet cells are converted to text first so that coercion rules and
//! error messages are identical for both formats.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use calamine::{Data, Range, Reader, Xlsx, XlsxError, open_workbook};
use csv::StringRecord;

use crate::domain::{REQUIRED_COLUMNS, ScoreRecord};
use crate::error::RenderError;

/// Accepted upload formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// Comma-separated text with a header row.
    Csv,
    /// Excel workbook; only the first worksheet is read.
    Xlsx,
}

impl InputFormat {
    /// Resolve the format from the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self, RenderError> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match ext.as_deref() {
            Some("csv") => Ok(Self::Csv),
            Some("xlsx") => Ok(Self::Xlsx),
            _ => Err(RenderError::read(format!(
                "unsupported file type '{}' (expected .csv or .xlsx)",
                path.display()
            ))),
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Xlsx => "xlsx",
        }
    }
}

/// Ingest output: the validated records plus where they came from.
#[derive(Debug, Clone)]
pub struct IngestedData {
    pub source: PathBuf,
    pub format: InputFormat,
    pub records: Vec<ScoreRecord>,
}

/// Read, validate and coerce the uploaded file at `path`.
pub fn load_score_table(path: &Path) -> Result<IngestedData, RenderError> {
    let format = InputFormat::from_path(path)?;

    let records = match format {
        InputFormat::Csv => {
            let file = File::open(path).map_err(|e| {
                RenderError::read(format!("failed to open '{}': {e}", path.display()))
            })?;
            read_csv(file)?
        }
        InputFormat::Xlsx => read_xlsx(path)?,
    };

    tracing::info!(
        path = %path.display(),
        format = format.display_name(),
        rows = records.len(),
        "score table loaded"
    );

    Ok(IngestedData {
        source: path.to_path_buf(),
        format,
        records,
    })
}

/// Parse a comma-separated table.
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<ScoreRecord>, RenderError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| RenderError::read(format!("failed to read CSV headers: {e}")))?;
    let headers = normalize_headers(headers.iter());
    ensure_required_columns_exist(&headers)?;

    let mut records = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        // Header is line 1.
        let row = idx + 2;
        let record = result.map_err(|e| RenderError::read(format!("row {row}: {e}")))?;
        records.push(deserialize_row(&record, &headers, row)?);
    }
    Ok(records)
}

/// Parse the first worksheet of an Excel workbook.
pub fn read_xlsx(path: &Path) -> Result<Vec<ScoreRecord>, RenderError> {
    let mut workbook: Xlsx<_> = open_workbook(path).map_err(|e: XlsxError| {
        RenderError::read(format!("failed to open '{}': {e}", path.display()))
    })?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| RenderError::read("workbook contains no worksheets"))?
        .map_err(|e| RenderError::read(format!("failed to read first worksheet: {e}")))?;

    records_from_range(&range)
}

/// Convert an in-memory worksheet range (first row = headers) to records.
pub fn records_from_range(range: &Range<Data>) -> Result<Vec<ScoreRecord>, RenderError> {
    let mut rows = range.rows();

    let Some(header_row) = rows.next() else {
        // A blank sheet has no header row, so every required column is absent.
        return ensure_required_columns_exist(&StringRecord::new()).map(|()| Vec::new());
    };

    let header_cells = header_row
        .iter()
        .map(|cell| cell_text(cell, 1))
        .collect::<Result<Vec<_>, _>>()?;
    let headers = normalize_headers(header_cells.iter().map(String::as_str));
    ensure_required_columns_exist(&headers)?;

    let mut records = Vec::new();
    for (idx, cells) in rows.enumerate() {
        let row = idx + 2;
        if cells.iter().all(|cell| matches!(cell, Data::Empty)) {
            continue;
        }
        let fields = cells
            .iter()
            .map(|cell| cell_text(cell, row))
            .collect::<Result<Vec<_>, _>>()?;
        let record = StringRecord::from(fields);
        records.push(deserialize_row(&record, &headers, row)?);
    }
    Ok(records)
}

fn normalize_headers<'a>(names: impl Iterator<Item = &'a str>) -> StringRecord {
    // Excel and other tools sometimes emit UTF-8 CSVs with a BOM prefix on the
    // first header. Left in place it hides the `Name` column.
    names
        .map(|name| name.trim().trim_start_matches('\u{feff}').to_string())
        .collect()
}

fn ensure_required_columns_exist(headers: &StringRecord) -> Result<(), RenderError> {
    let missing = missing_columns(headers);
    if missing.is_empty() {
        return Ok(());
    }
    tracing::warn!(missing = ?missing, "required columns absent");
    Err(RenderError::MissingColumns { missing })
}

fn missing_columns(headers: &StringRecord) -> Vec<String> {
    REQUIRED_COLUMNS
        .iter()
        .filter(|required| !headers.iter().any(|h| h == **required))
        .map(|s| s.to_string())
        .collect()
}

fn deserialize_row(
    record: &StringRecord,
    headers: &StringRecord,
    row: usize,
) -> Result<ScoreRecord, RenderError> {
    record.deserialize::<ScoreRecord>(Some(headers)).map_err(|e| {
        let message = match e.kind() {
            csv::ErrorKind::Deserialize { err, .. } => match err.field() {
                Some(field) => {
                    let field = field as usize;
                    let column = headers.get(field).unwrap_or("?");
                    let value = record.get(field).unwrap_or("");
                    format!("row {row}, column `{column}`: {} (value: {value:?})", err.kind())
                }
                None => format!("row {row}: {}", err.kind()),
            },
            _ => format!("row {row}: {e}"),
        };
        RenderError::Read(message)
    })
}

fn cell_text(cell: &Data, row: usize) -> Result<String, RenderError> {
    match cell {
        Data::Empty => Ok(String::new()),
        Data::String(s) => Ok(s.trim().to_string()),
        Data::Error(e) => Err(RenderError::read(format!("row {row}: spreadsheet cell error {e}"))),
        other => Ok(other.to_string()),
    }
}

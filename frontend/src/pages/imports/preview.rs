use calamine::{Data, Reader, Xlsx};
use std::io::Cursor;
use thiserror::Error;

pub const PREVIEW_ROWS: usize = 20;
pub const MAX_IMPORT_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportError {
    #[error("Unsupported file type \"{0}\". Choose a .csv or .xlsx file.")]
    UnsupportedFormat(String),
    #[error("The file is {size} bytes; the limit is {limit} bytes.")]
    TooLarge { size: usize, limit: usize },
    #[error("The file contains no rows.")]
    Empty,
    #[error("Could not read CSV: {0}")]
    Csv(String),
    #[error("Could not read spreadsheet: {0}")]
    Spreadsheet(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportFormat {
    Csv,
    Xlsx,
}

impl ImportFormat {
    pub fn from_file_name(name: &str) -> Result<Self, ImportError> {
        let extension = name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();
        match extension.as_str() {
            "csv" => Ok(ImportFormat::Csv),
            "xlsx" => Ok(ImportFormat::Xlsx),
            _ => Err(ImportError::UnsupportedFormat(name.to_string())),
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            ImportFormat::Csv => "text/csv",
            ImportFormat::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
        }
    }
}

/// Header plus the first [`PREVIEW_ROWS`] data rows of a picked file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportPreview {
    pub format: ImportFormat,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Data rows in the file, header excluded.
    pub total_rows: usize,
}

impl ImportPreview {
    pub fn is_truncated(&self) -> bool {
        self.total_rows > self.rows.len()
    }
}

pub fn build_preview(file_name: &str, bytes: &[u8]) -> Result<ImportPreview, ImportError> {
    let format = ImportFormat::from_file_name(file_name)?;
    if bytes.len() > MAX_IMPORT_BYTES {
        return Err(ImportError::TooLarge {
            size: bytes.len(),
            limit: MAX_IMPORT_BYTES,
        });
    }
    let preview = match format {
        ImportFormat::Csv => preview_csv(bytes)?,
        ImportFormat::Xlsx => preview_xlsx(bytes)?,
    };
    log::debug!(
        "previewed {}: {} columns, {} rows",
        file_name,
        preview.headers.len(),
        preview.total_rows
    );
    Ok(preview)
}

fn preview_csv(bytes: &[u8]) -> Result<ImportPreview, ImportError> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(bytes);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| ImportError::Csv(e.to_string()))?
        .iter()
        .map(str::to_string)
        .collect();
    if headers.iter().all(String::is_empty) {
        return Err(ImportError::Empty);
    }

    let mut rows = Vec::new();
    let mut total_rows = 0;
    for record in reader.records() {
        let record = record.map_err(|e| ImportError::Csv(e.to_string()))?;
        total_rows += 1;
        if rows.len() < PREVIEW_ROWS {
            rows.push(record.iter().map(str::to_string).collect());
        }
    }

    Ok(ImportPreview {
        format: ImportFormat::Csv,
        headers,
        rows,
        total_rows,
    })
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(d) => d.to_string(),
        Data::DateTimeIso(d) | Data::DurationIso(d) => d.clone(),
    }
}

fn preview_xlsx(bytes: &[u8]) -> Result<ImportPreview, ImportError> {
    let mut workbook = Xlsx::new(Cursor::new(bytes.to_vec()))
        .map_err(|e| ImportError::Spreadsheet(e.to_string()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(ImportError::Empty)?
        .map_err(|e| ImportError::Spreadsheet(e.to_string()))?;

    let mut rows = range
        .rows()
        .map(|row| row.iter().map(cell_text).collect::<Vec<_>>())
        .filter(|row| row.iter().any(|cell| !cell.is_empty()));
    let headers = rows.next().ok_or(ImportError::Empty)?;

    let mut preview_rows = Vec::new();
    let mut total_rows = 0;
    for row in rows {
        total_rows += 1;
        if preview_rows.len() < PREVIEW_ROWS {
            preview_rows.push(row);
        }
    }

    Ok(ImportPreview {
        format: ImportFormat::Xlsx,
        headers,
        rows: preview_rows,
        total_rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_follows_extension() {
        assert_eq!(ImportFormat::from_file_name("March.CSV"), Ok(ImportFormat::Csv));
        assert_eq!(ImportFormat::from_file_name("q1.xlsx"), Ok(ImportFormat::Xlsx));
        assert_eq!(
            ImportFormat::from_file_name("notes.txt"),
            Err(ImportError::UnsupportedFormat("notes.txt".into()))
        );
        assert!(ImportFormat::from_file_name("README").is_err());
    }

    #[test]
    fn csv_preview_keeps_header_and_first_rows() {
        let mut data = String::from("date,vendor,amount\n");
        for i in 0..25 {
            data.push_str(&format!("2026-01-{:02},Acme,{}\n", i % 28 + 1, i));
        }
        let preview = build_preview("expenses.csv", data.as_bytes()).unwrap();
        assert_eq!(preview.headers, vec!["date", "vendor", "amount"]);
        assert_eq!(preview.rows.len(), PREVIEW_ROWS);
        assert_eq!(preview.total_rows, 25);
        assert!(preview.is_truncated());
        assert_eq!(preview.rows[0], vec!["2026-01-01", "Acme", "0"]);
    }

    #[test]
    fn csv_preview_tolerates_ragged_rows_and_bom() {
        let data = "\u{feff}date, amount\n2026-01-01, 12.5, extra\n2026-01-02\n";
        let preview = build_preview("e.csv", data.as_bytes()).unwrap();
        assert_eq!(preview.headers, vec!["date", "amount"]);
        assert_eq!(preview.rows[0], vec!["2026-01-01", "12.5", "extra"]);
        assert_eq!(preview.rows[1], vec!["2026-01-02"]);
        assert!(!preview.is_truncated());
    }

    #[test]
    fn empty_csv_is_rejected() {
        assert_eq!(build_preview("e.csv", b""), Err(ImportError::Empty));
    }

    #[test]
    fn corrupt_xlsx_reports_spreadsheet_error() {
        let err = build_preview("e.xlsx", b"definitely not a zip").unwrap_err();
        assert!(matches!(err, ImportError::Spreadsheet(_)));
    }

    #[test]
    fn oversized_file_is_rejected_before_parsing() {
        let bytes = vec![b'a'; MAX_IMPORT_BYTES + 1];
        assert_eq!(
            build_preview("big.csv", &bytes),
            Err(ImportError::TooLarge {
                size: MAX_IMPORT_BYTES + 1,
                limit: MAX_IMPORT_BYTES
            })
        );
    }

    #[test]
    fn whole_floats_render_without_fraction() {
        assert_eq!(cell_text(&Data::Float(42.0)), "42");
        assert_eq!(cell_text(&Data::Float(4.25)), "4.25");
        assert_eq!(cell_text(&Data::Empty), "");
    }
}

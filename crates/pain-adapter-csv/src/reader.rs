//! CSV reader producing [`Record`]s

use crate::config::CsvConfig;
use crate::errors::{CsvError, CsvResult};
use pain_ir::Record;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, trace};

const BOM: char = '\u{feff}';

/// Reader for header-first CSV files
#[derive(Debug, Clone, Default)]
pub struct CsvReader {
    config: CsvConfig,
}

impl CsvReader {
    /// Create a new CSV reader
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create reader with configuration
    #[must_use]
    pub fn with_config(mut self, config: CsvConfig) -> Self {
        self.config = config;
        self
    }

    /// Read every data row. An empty or header-only input yields an empty
    /// vector.
    ///
    /// # Errors
    ///
    /// Fails on malformed CSV, a missing or duplicated header, or a row
    /// whose width differs from the header.
    pub fn read<R: Read>(&self, input: R) -> CsvResult<Vec<Record>> {
        self.config.validate()?;

        let mut builder = csv::ReaderBuilder::new();
        builder
            .delimiter(self.config.delimiter_u8())
            .quote(self.config.quote_char_u8())
            .has_headers(true)
            .flexible(true);
        if let Some(escape) = self.config.escape_char_u8() {
            builder.escape(Some(escape)).double_quote(false);
        }
        let mut reader = builder.from_reader(input);

        let raw_headers = reader.headers()?;
        if raw_headers.is_empty() {
            debug!("CSV input has no header row");
            return Ok(Vec::new());
        }
        let headers = self.headers(raw_headers)?;
        trace!("CSV header: {:?}", headers);

        let mut records = Vec::new();
        for (index, row) in reader.records().enumerate() {
            let row = row?;
            let line = row
                .position()
                .map_or(index + 2, |p| usize::try_from(p.line()).unwrap_or(index + 2));
            if row.len() != headers.len() {
                return Err(CsvError::row_length_mismatch(line, headers.len(), row.len()));
            }
            records.push(Record::from_pairs(
                index + 1,
                headers.iter().map(String::as_str).zip(row.iter()),
            ));
        }

        debug!("Read {} CSV record(s)", records.len());
        Ok(records)
    }

    /// Read a CSV file
    ///
    /// # Errors
    ///
    /// Returns [`CsvError::NotFound`] when the file is absent, otherwise as
    /// [`CsvReader::read`].
    pub fn read_path(&self, path: impl AsRef<Path>) -> CsvResult<Vec<Record>> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(CsvError::not_found(path));
        }
        debug!("Reading CSV data from {}", path.display());
        self.read(File::open(path)?)
    }

    fn headers(&self, raw: &csv::StringRecord) -> CsvResult<Vec<String>> {
        let mut headers = Vec::with_capacity(raw.len());
        for (i, name) in raw.iter().enumerate() {
            let name = if i == 0 { name.trim_start_matches(BOM) } else { name };
            let name = if self.config.trim_headers { name.trim() } else { name };
            if name.is_empty() {
                return Err(CsvError::header(format!("column {} has no name", i + 1)));
            }
            if headers.iter().any(|h| h == name) {
                return Err(CsvError::header(format!("duplicate column '{name}'")));
            }
            headers.push(name.to_string());
        }

        Ok(headers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_records() {
        let data = "id,payment_amount\n1,10.50\n2,20\n";
        let records = CsvReader::new().read(Cursor::new(data)).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].row, 1);
        assert_eq!(records[0].get("payment_amount"), Some("10.50"));
        assert_eq!(records[1].row, 2);
        assert_eq!(records[1].get("id"), Some("2"));
    }

    #[test]
    fn test_header_only_is_empty() {
        let records = CsvReader::new()
            .read(Cursor::new("id,payment_amount\n"))
            .unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_empty_input_has_no_records() {
        assert!(CsvReader::new().read(Cursor::new("")).unwrap().is_empty());
        assert!(CsvReader::new().read(Cursor::new("\n\n")).unwrap().is_empty());
    }

    #[test]
    fn test_unnamed_header_column() {
        let err = CsvReader::new()
            .read(Cursor::new("id,,currency\n1,2,EUR\n"))
            .unwrap_err();
        assert!(matches!(err, CsvError::Header(_)));
    }

    #[test]
    fn test_custom_delimiter_and_quotes() {
        let data = "id;creditor_name\n1;\"Smith; Jones\"\n";
        let reader = CsvReader::new().with_config(CsvConfig::new().delimiter(';'));
        let records = reader.read(Cursor::new(data)).unwrap();
        assert_eq!(records[0].get("creditor_name"), Some("Smith; Jones"));
    }

    #[test]
    fn test_headers_are_trimmed_and_bom_stripped() {
        let data = "\u{feff}id , currency\n1,EUR\n";
        let records = CsvReader::new().read(Cursor::new(data)).unwrap();
        assert_eq!(records[0].get("id"), Some("1"));
        assert_eq!(records[0].get("currency"), Some("EUR"));
    }

    #[test]
    fn test_values_are_kept_verbatim() {
        let data = "id,currency\n 1 ,EUR\n";
        let records = CsvReader::new().read(Cursor::new(data)).unwrap();
        assert_eq!(records[0].get("id"), Some(" 1 "));
    }

    #[test]
    fn test_row_length_mismatch() {
        let data = "id,currency\n1,EUR\n2\n";
        let err = CsvReader::new().read(Cursor::new(data)).unwrap_err();
        assert_eq!(err.line_number(), Some(3));
        assert!(err.to_string().contains("missing values"));
    }

    #[test]
    fn test_duplicate_header() {
        let err = CsvReader::new()
            .read(Cursor::new("id,id\n1,2\n"))
            .unwrap_err();
        assert!(err.to_string().contains("duplicate column 'id'"));
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let data = "id,currency\n1,EUR\n\n2,CHF\n";
        let records = CsvReader::new().read(Cursor::new(data)).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].row, 2);
    }

    #[test]
    fn test_read_missing_path() {
        let err = CsvReader::new()
            .read_path("/definitely/not/here.csv")
            .unwrap_err();
        assert!(matches!(err, CsvError::NotFound { .. }));
    }
}

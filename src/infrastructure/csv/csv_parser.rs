// ============================================================
// CSV PARSER
// ============================================================
// Decode delimited file content into raw records

use std::path::Path;

use csv::ReaderBuilder;

use crate::domain::error::{AppError, Result};
use crate::domain::table::RawRecord;

const QUOTE: u8 = b'"';

/// Delimited-text decoder. Record 0 is always returned as the header.
#[derive(Debug, Clone, Copy)]
pub struct CsvParser {
    /// Delimiter character (default: comma)
    delimiter: u8,
}

impl Default for CsvParser {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl CsvParser {
    /// Create a new CSV parser with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set custom delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Read a whole file and decode it
    pub async fn parse_file(&self, path: &Path) -> Result<Vec<RawRecord>> {
        let content = tokio::fs::read(path).await.map_err(|e| {
            AppError::FileRead(format!("Failed to read {}: {}", path.display(), e))
        })?;

        self.parse_content(&content).map_err(|e| match e {
            AppError::ParseError(msg) => {
                AppError::ParseError(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })
    }

    /// Decode raw bytes into records.
    ///
    /// Quoted fields may contain the delimiter, line breaks and doubled quotes.
    /// Every record must have as many fields as the first one.
    pub fn parse_content(&self, content: &[u8]) -> Result<Vec<RawRecord>> {
        self.check_quoting(content)?;

        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(false)
            .flexible(false)
            .from_reader(content);

        let mut records = Vec::new();
        for (index, result) in reader.records().enumerate() {
            let record = result.map_err(|e| {
                AppError::ParseError(format!("Failed to parse record {}: {}", index + 1, e))
            })?;
            records.push(record.iter().map(str::to_string).collect());
        }

        Ok(records)
    }

    /// Reject quoting the csv reader would silently accept: an unterminated
    /// quoted field, a quote inside an unquoted field, or text after a closing quote.
    fn check_quoting(&self, content: &[u8]) -> Result<()> {
        let mut line = 1usize;
        let mut field_start = true;
        let mut in_quotes = false;
        let mut quoted_field_line = 0usize;
        let mut bytes = content.iter().copied().peekable();

        while let Some(byte) = bytes.next() {
            if in_quotes {
                match byte {
                    QUOTE if bytes.peek() == Some(&QUOTE) => {
                        bytes.next();
                    }
                    QUOTE => {
                        in_quotes = false;
                        match bytes.peek() {
                            None | Some(b'\n') | Some(b'\r') => {}
                            Some(&next) if next == self.delimiter => {}
                            Some(_) => {
                                return Err(AppError::ParseError(format!(
                                    "Invalid closing quote at line {}",
                                    line
                                )));
                            }
                        }
                    }
                    b'\n' => line += 1,
                    _ => {}
                }
                continue;
            }

            match byte {
                QUOTE if field_start => {
                    in_quotes = true;
                    quoted_field_line = line;
                    field_start = false;
                }
                QUOTE => {
                    return Err(AppError::ParseError(format!(
                        "Invalid opening quote at line {}",
                        line
                    )));
                }
                b'\n' => {
                    line += 1;
                    field_start = true;
                }
                b'\r' => field_start = true,
                b if b == self.delimiter => field_start = true,
                _ => field_start = false,
            }
        }

        if in_quotes {
            return Err(AppError::ParseError(format!(
                "Quoted field starting at line {} is never closed",
                quoted_field_line
            )));
        }

        Ok(())
    }
}

//! MITAB row reader
//!
//! Line-oriented parser tolerant of `-` empties and `#` header/comment
//! lines. Rows with the wrong column count are data errors.

use super::{BinaryInteraction, MitabField, COLUMN_COUNT, EMPTY};
use flate2::read::GzDecoder;
use midex_common::{MidexError, Result};
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// Parser for MITAB documents
pub struct MitabReader {
    /// Maximum number of rows to read (None for unlimited)
    limit: Option<usize>,
}

impl MitabReader {
    pub fn new() -> Self {
        Self { limit: None }
    }

    pub fn with_limit(limit: usize) -> Self {
        Self { limit: Some(limit) }
    }

    /// Parse a MITAB file, handling `.gz` by extension
    pub fn read_file(&self, path: &Path) -> Result<Vec<BinaryInteraction>> {
        let file = std::fs::File::open(path)?;
        if path.extension().and_then(|s| s.to_str()) == Some("gz") {
            self.read_from(GzDecoder::new(file))
        } else {
            self.read_from(file)
        }
    }

    /// Parse MITAB text
    pub fn read_str(&self, content: &str) -> Result<Vec<BinaryInteraction>> {
        self.read_from(content.as_bytes())
    }

    fn read_from<R: Read>(&self, reader: R) -> Result<Vec<BinaryInteraction>> {
        let buf_reader = BufReader::new(reader);
        let mut rows = Vec::new();

        for (line_no, line) in buf_reader.lines().enumerate() {
            let line = line?;
            let trimmed = line.trim_end();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            if let Some(limit) = self.limit {
                if rows.len() >= limit {
                    break;
                }
            }
            rows.push(parse_row(trimmed, line_no + 1)?);
        }

        Ok(rows)
    }
}

impl Default for MitabReader {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_fields(column: &str) -> Vec<MitabField> {
    if column == EMPTY || column.is_empty() {
        return Vec::new();
    }
    column.split('|').filter_map(MitabField::parse).collect()
}

fn parse_single(column: &str) -> Option<MitabField> {
    if column == EMPTY || column.is_empty() {
        None
    } else {
        MitabField::parse(column)
    }
}

fn parse_text(column: &str) -> Option<String> {
    if column == EMPTY || column.is_empty() {
        None
    } else {
        Some(column.to_string())
    }
}

fn parse_row(line: &str, line_no: usize) -> Result<BinaryInteraction> {
    let columns: Vec<&str> = line.split('\t').collect();
    if columns.len() != COLUMN_COUNT {
        return Err(MidexError::Parse(format!(
            "Line {}: expected {} columns, found {}",
            line_no,
            COLUMN_COUNT,
            columns.len()
        )));
    }

    Ok(BinaryInteraction {
        id_a: parse_single(columns[0]),
        id_b: parse_single(columns[1]),
        alt_ids_a: parse_fields(columns[2]),
        alt_ids_b: parse_fields(columns[3]),
        aliases_a: parse_fields(columns[4]),
        aliases_b: parse_fields(columns[5]),
        detection_methods: parse_fields(columns[6]),
        first_author: parse_text(columns[7]),
        publications: parse_fields(columns[8]),
        taxid_a: parse_fields(columns[9]),
        taxid_b: parse_fields(columns[10]),
        interaction_types: parse_fields(columns[11]),
        source_databases: parse_fields(columns[12]),
        interaction_ids: parse_fields(columns[13]),
        confidences: parse_fields(columns[14]),
        expansion: parse_text(columns[15]),
        checksum_a: parse_single(columns[16]),
        checksum_b: parse_single(columns[17]),
        interaction_checksum: parse_single(columns[18]),
        annotations: parse_fields(columns[19]),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_line() -> String {
        let columns = vec![
            "uniprotkb:P12345",
            "uniprotkb:Q67890",
            "-",
            "-",
            "intact:tp53(gene name)",
            "-",
            "psi-mi:MI:0018(two hybrid)",
            "Smith J. (2010)",
            "pmid:12345|imex:IM-3",
            "taxid:9606(Homo sapiens)",
            "taxid:9606(Homo sapiens)",
            "psi-mi:MI:0915(physical association)",
            "psi-mi:intact",
            "intact:EBI-I1|imex:IM-3-1",
            "-",
            "-",
            "-",
            "-",
            "rigid:AbCdEf",
            "-",
        ];
        columns.join("\t")
    }

    #[test]
    fn test_parse_full_row() {
        let reader = MitabReader::new();
        let rows = reader.read_str(&sample_line()).unwrap();
        assert_eq!(rows.len(), 1);

        let row = &rows[0];
        assert_eq!(row.id_a.as_ref().unwrap().id, "P12345");
        assert_eq!(row.publications.len(), 2);
        assert_eq!(row.publications[1].db, "imex");
        assert_eq!(row.interaction_ids[1].id, "IM-3-1");
        assert_eq!(row.first_author.as_deref(), Some("Smith J. (2010)"));
        assert_eq!(
            row.detection_methods[0].text.as_deref(),
            Some("two hybrid")
        );
        assert!(row.confidences.is_empty());
        assert!(row.expansion.is_none());
    }

    #[test]
    fn test_header_and_blank_lines_skipped() {
        let content = format!("# header line\n\n{}\n", sample_line());
        let rows = MitabReader::new().read_str(&content).unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_wrong_column_count_is_an_error() {
        let err = MitabReader::new().read_str("a\tb\tc").unwrap_err();
        assert!(err.to_string().contains("expected 20 columns"));
    }

    #[test]
    fn test_limit() {
        let content = format!("{}\n{}\n{}\n", sample_line(), sample_line(), sample_line());
        let rows = MitabReader::with_limit(2).read_str(&content).unwrap();
        assert_eq!(rows.len(), 2);
    }
}

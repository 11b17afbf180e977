//! CSV parsing with encoding and delimiter auto-detection.
//!
//! Converts raw bytes into a typed [`Dataset`]. No grouping logic here.

use crate::error::CsvError;
use crate::models::{CellValue, Dataset};

/// Result of parsing with detection metadata.
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Parsed dataset.
    pub dataset: Dataset,
    /// Detected encoding.
    pub encoding: String,
    /// Detected delimiter.
    pub delimiter: char,
}

/// Detect the encoding of raw bytes using chardet.
pub fn detect_encoding(bytes: &[u8]) -> String {
    let result = chardet::detect(bytes);
    let charset = result.0;

    // Normalize charset names
    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        other => other.to_string(),
    }
}

/// Decode bytes to a string using the detected encoding.
pub fn decode_content(bytes: &[u8], encoding: &str) -> Result<String, CsvError> {
    match encoding.to_lowercase().as_str() {
        "utf-8" | "utf8" | "ascii" => match String::from_utf8(bytes.to_vec()) {
            Ok(s) => Ok(s),
            Err(_) => Ok(String::from_utf8_lossy(bytes).to_string()),
        },
        "iso-8859-1" | "latin-1" | "latin1" => {
            Ok(encoding_rs::ISO_8859_15.decode(bytes).0.to_string())
        }
        "windows-1252" | "cp1252" => Ok(encoding_rs::WINDOWS_1252.decode(bytes).0.to_string()),
        _ => {
            // Fallback: UTF-8 with lossy conversion
            Ok(String::from_utf8_lossy(bytes).to_string())
        }
    }
}

/// Detect the delimiter by counting occurrences in the header line.
pub fn detect_delimiter(content: &str) -> char {
    let first_line = content.lines().next().unwrap_or("");

    let separators = [',', ';', '\t', '|'];
    let mut best_sep = ',';
    let mut best_count = 0;

    for &sep in &separators {
        let count = first_line.matches(sep).count();
        if count > best_count {
            best_count = count;
            best_sep = sep;
        }
    }

    best_sep
}

/// Parse CSV bytes with auto-detection of encoding and delimiter.
pub fn parse_bytes_auto(bytes: &[u8]) -> Result<ParseResult, CsvError> {
    let encoding = detect_encoding(bytes);
    let content = decode_content(bytes, &encoding)?;
    let delimiter = detect_delimiter(&content);
    let dataset = parse_content(&content, delimiter)?;

    Ok(ParseResult {
        dataset,
        encoding,
        delimiter,
    })
}

/// Parse decoded CSV text with an explicit delimiter.
///
/// The first record is the header row. Short records are padded with empty
/// cells; surplus fields beyond the header width are dropped.
pub fn parse_content(content: &str, delimiter: char) -> Result<Dataset, CsvError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    if content.trim().is_empty() {
        return Err(CsvError::EmptyFile);
    }

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter as u8)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| CsvError::ParseError {
            line: 1,
            message: e.to_string(),
        })?
        .iter()
        .map(|h| h.trim().trim_matches('"').to_string())
        .collect();

    if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
        return Err(CsvError::NoHeaders);
    }

    let mut rows = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record = record.map_err(|e| CsvError::ParseError {
            // +1 for 0-index, +1 for the header row
            line: idx + 2,
            message: e.to_string(),
        })?;

        if record.iter().all(|field| field.trim().is_empty()) {
            continue;
        }

        let mut cells: Vec<CellValue> = record
            .iter()
            .take(headers.len())
            .map(CellValue::infer)
            .collect();
        cells.resize(headers.len(), CellValue::Empty);
        rows.push(cells);
    }

    Ok(Dataset::new(headers, rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_csv() {
        let csv = "name,age\nAlice,30\nBob,25";
        let ds = parse_content(csv, ',').unwrap();

        assert_eq!(ds.headers, vec!["name", "age"]);
        assert_eq!(ds.row_count(), 2);
        assert_eq!(ds.rows[0][0], CellValue::Text("Alice".into()));
        assert_eq!(ds.rows[0][1], CellValue::Number(30.0));
        assert_eq!(ds.rows[1][0], CellValue::Text("Bob".into()));
    }

    #[test]
    fn test_quoted_values_keep_delimiter() {
        let csv = "name,note\nAlice,\"a, quoted value\"";
        let ds = parse_content(csv, ',').unwrap();

        assert_eq!(ds.rows[0][1], CellValue::Text("a, quoted value".into()));
    }

    #[test]
    fn test_short_rows_padded() {
        let csv = "a,b,c\n1,2";
        let ds = parse_content(csv, ',').unwrap();

        assert_eq!(ds.rows[0][0], CellValue::Number(1.0));
        assert_eq!(ds.rows[0][2], CellValue::Empty);
    }

    #[test]
    fn test_long_rows_truncated() {
        let csv = "a,b\n1,2,3,4";
        let ds = parse_content(csv, ',').unwrap();

        assert_eq!(ds.rows[0].len(), 2);
        assert_eq!(ds.rows[0][1], CellValue::Number(2.0));
    }

    #[test]
    fn test_empty_lines_skipped() {
        let csv = "a,b\n1,2\n\n3,4\n";
        let ds = parse_content(csv, ',').unwrap();

        assert_eq!(ds.row_count(), 2);
    }

    #[test]
    fn test_header_only_is_empty_dataset() {
        let csv = "a,b,c\n";
        let ds = parse_content(csv, ',').unwrap();

        assert_eq!(ds.headers.len(), 3);
        assert_eq!(ds.row_count(), 0);
    }

    #[test]
    fn test_bom_stripped_from_first_header() {
        let csv = "\u{feff}a,b\n1,2";
        let ds = parse_content(csv, ',').unwrap();

        assert_eq!(ds.headers, vec!["a", "b"]);
    }

    #[test]
    fn test_empty_content_error() {
        let err = parse_content("", ',').unwrap_err();
        assert!(matches!(err, CsvError::EmptyFile));
    }

    #[test]
    fn test_detect_delimiter_comma() {
        assert_eq!(detect_delimiter("a,b,c\n1,2,3"), ',');
    }

    #[test]
    fn test_detect_delimiter_semicolon() {
        assert_eq!(detect_delimiter("a;b;c\n1;2;3"), ';');
    }

    #[test]
    fn test_detect_delimiter_tab() {
        assert_eq!(detect_delimiter("a\tb\tc"), '\t');
    }

    #[test]
    fn test_detect_delimiter_defaults_to_comma() {
        assert_eq!(detect_delimiter("single-column"), ',');
    }

    #[test]
    fn test_auto_parse() {
        let csv = "name;age\nAlice;30";
        let result = parse_bytes_auto(csv.as_bytes()).unwrap();

        assert_eq!(result.delimiter, ';');
        assert_eq!(result.encoding, "utf-8");
        assert_eq!(result.dataset.row_count(), 1);
    }

    #[test]
    fn test_latin1_decoding() {
        // "Société" in ISO-8859-1
        let bytes: &[u8] = &[0x53, 0x6F, 0x63, 0x69, 0xE9, 0x74, 0xE9];
        let decoded = decode_content(bytes, "iso-8859-1").unwrap();
        assert!(decoded.contains("Soci"));
    }
}

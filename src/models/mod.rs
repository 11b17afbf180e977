//! Core tabular data model.
//!
//! A [`Dataset`] is the in-memory form of one parsed CSV file: ordered column
//! headers plus row-major [`CellValue`] cells. Datasets are immutable once
//! parsed and live only for the duration of a single file conversion.

use std::fmt;

// =============================================================================
// Cell Values
// =============================================================================

/// A single scalar cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Missing/empty value. Written as a blank cell.
    Empty,
    /// Numeric value. Written as a native number cell.
    Number(f64),
    /// Text value. Written as a string cell.
    Text(String),
}

impl CellValue {
    /// Infer a cell from a raw CSV field.
    ///
    /// Whitespace-only fields are [`CellValue::Empty`]; anything that parses
    /// as a finite number becomes [`CellValue::Number`]; everything else is
    /// kept as text.
    pub fn infer(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return CellValue::Empty;
        }
        if let Ok(n) = trimmed.parse::<f64>() {
            if n.is_finite() {
                return CellValue::Number(n);
            }
        }
        CellValue::Text(trimmed.to_string())
    }
}

impl fmt::Display for CellValue {
    /// Canonical string rendering, used for grouping keys and sheet names.
    ///
    /// Integral numbers render without a fractional part (`10`, not `10.0`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Number(n) => {
                // 2^53: beyond this an f64 no longer represents every integer.
                if n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

// =============================================================================
// Dataset
// =============================================================================

/// In-memory tabular dataset: headers plus row-major cells.
///
/// Every row holds exactly `headers.len()` cells; the parser pads short CSV
/// records with [`CellValue::Empty`].
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// Ordered column names from the header row.
    pub headers: Vec<String>,
    /// Row-major cell storage, in source order.
    pub rows: Vec<Vec<CellValue>>,
}

impl Dataset {
    /// Create a dataset from headers and rows.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        Self { headers, rows }
    }

    /// Number of data rows (the header is not a row).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Index of a column by exact name, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_empty() {
        assert_eq!(CellValue::infer(""), CellValue::Empty);
        assert_eq!(CellValue::infer("   "), CellValue::Empty);
    }

    #[test]
    fn test_infer_number() {
        assert_eq!(CellValue::infer("10"), CellValue::Number(10.0));
        assert_eq!(CellValue::infer("-3.5"), CellValue::Number(-3.5));
        assert_eq!(CellValue::infer(" 42 "), CellValue::Number(42.0));
        assert_eq!(CellValue::infer("1e3"), CellValue::Number(1000.0));
    }

    #[test]
    fn test_infer_text() {
        assert_eq!(
            CellValue::infer("2024-01"),
            CellValue::Text("2024-01".into())
        );
        assert_eq!(CellValue::infer("abc"), CellValue::Text("abc".into()));
    }

    #[test]
    fn test_non_finite_stays_text() {
        // "NaN"/"inf" parse as f64 but are not meaningful report values.
        assert_eq!(CellValue::infer("NaN"), CellValue::Text("NaN".into()));
        assert_eq!(CellValue::infer("inf"), CellValue::Text("inf".into()));
    }

    #[test]
    fn test_display_integral_number() {
        assert_eq!(CellValue::Number(10.0).to_string(), "10");
        assert_eq!(CellValue::Number(-2.0).to_string(), "-2");
        assert_eq!(CellValue::Number(2.5).to_string(), "2.5");
        assert_eq!(CellValue::Empty.to_string(), "");
    }

    #[test]
    fn test_column_index() {
        let ds = Dataset::new(vec!["a".into(), "b".into()], vec![]);
        assert_eq!(ds.column_index("b"), Some(1));
        assert_eq!(ds.column_index("c"), None);
    }
}

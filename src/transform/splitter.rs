//! Partition dataset rows by grouping-column value.
//!
//! One scan over the rows, collecting the distinct values of the grouping
//! column in first-occurrence order. Every row lands in exactly one group;
//! the union of all groups is the full dataset.
//!
//! ```text
//! CSV rows                      ->  Row groups (first-occurrence order)
//! ┌──────────────────────────┐      ┌─────────────────────────┐
//! │ period: 2024-01, amt: 10 │      │ 2024-01 -> rows [0, 2]  │
//! │ period: 2024-02, amt: 20 │  ->  ├─────────────────────────┤
//! │ period: 2024-01, amt: 30 │      │ 2024-02 -> rows [1]     │
//! └──────────────────────────┘      └─────────────────────────┘
//! ```

use indexmap::IndexMap;

use crate::error::TransformError;
use crate::models::Dataset;

/// The rows carrying one distinct grouping-column value.
#[derive(Debug, Clone, PartialEq)]
pub struct RowGroup {
    /// Canonical string rendering of the grouping value. An empty cell maps
    /// to the empty string and is a distinct key.
    pub key: String,
    /// Indices into `dataset.rows`, in source order.
    pub rows: Vec<usize>,
}

/// Partition `dataset` by the distinct values of `group_column`.
///
/// Groups come back in first-occurrence order of their key. Fails with
/// [`TransformError::ColumnNotFound`] if the column is absent; the error
/// message names the columns that do exist.
pub fn split_by_column(dataset: &Dataset, group_column: &str) -> Result<Vec<RowGroup>, TransformError> {
    let col = dataset
        .column_index(group_column)
        .ok_or_else(|| TransformError::ColumnNotFound {
            column: group_column.to_string(),
            available: dataset.headers.join(", "),
        })?;

    let mut groups: IndexMap<String, Vec<usize>> = IndexMap::new();
    for (idx, row) in dataset.rows.iter().enumerate() {
        groups
            .entry(row[col].to_string())
            .or_insert_with(Vec::new)
            .push(idx);
    }

    Ok(groups
        .into_iter()
        .map(|(key, rows)| RowGroup { key, rows })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CellValue;

    fn transactions() -> Dataset {
        Dataset::new(
            vec!["Last_Transaction_Date_Range".into(), "amt".into()],
            vec![
                vec![CellValue::Text("2024-01".into()), CellValue::Number(10.0)],
                vec![CellValue::Text("2024-02".into()), CellValue::Number(20.0)],
                vec![CellValue::Text("2024-01".into()), CellValue::Number(30.0)],
            ],
        )
    }

    #[test]
    fn test_groups_in_first_occurrence_order() {
        let groups = split_by_column(&transactions(), "Last_Transaction_Date_Range").unwrap();

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].key, "2024-01");
        assert_eq!(groups[0].rows, vec![0, 2]);
        assert_eq!(groups[1].key, "2024-02");
        assert_eq!(groups[1].rows, vec![1]);
    }

    #[test]
    fn test_partition_is_complete_and_disjoint() {
        let ds = transactions();
        let groups = split_by_column(&ds, "Last_Transaction_Date_Range").unwrap();

        let mut all: Vec<usize> = groups.iter().flat_map(|g| g.rows.clone()).collect();
        all.sort_unstable();
        assert_eq!(all, vec![0, 1, 2]);
    }

    #[test]
    fn test_missing_column_is_an_error() {
        let err = split_by_column(&transactions(), "Region").unwrap_err();
        match err {
            TransformError::ColumnNotFound { column, available } => {
                assert_eq!(column, "Region");
                assert!(available.contains("amt"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_empty_cell_is_a_distinct_key() {
        let ds = Dataset::new(
            vec!["k".into()],
            vec![
                vec![CellValue::Text("a".into())],
                vec![CellValue::Empty],
                vec![CellValue::Empty],
            ],
        );
        let groups = split_by_column(&ds, "k").unwrap();

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[1].key, "");
        assert_eq!(groups[1].rows, vec![1, 2]);
    }

    #[test]
    fn test_numeric_keys_use_canonical_rendering() {
        // "7" and "7.0" both parse to Number(7.0) and share a group.
        let ds = Dataset::new(
            vec!["k".into()],
            vec![
                vec![CellValue::Number(7.0)],
                vec![CellValue::Number(7.0)],
            ],
        );
        let groups = split_by_column(&ds, "k").unwrap();

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].key, "7");
    }

    #[test]
    fn test_empty_dataset_yields_no_groups() {
        let ds = Dataset::new(vec!["k".into()], vec![]);
        let groups = split_by_column(&ds, "k").unwrap();
        assert!(groups.is_empty());
    }
}

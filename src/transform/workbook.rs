//! xlsx workbook serialization.
//!
//! Turns a dataset plus its row groups into the output workbook: one sheet
//! per group, in group order, then the all-records `Total` sheet last. Every
//! sheet starts with a header row of column names; cells keep their native
//! types (numbers as numbers, text as text, empty as blank).

use rust_xlsxwriter::{Workbook, Worksheet};
use serde::{Deserialize, Serialize};

use crate::error::TransformError;
use crate::models::{CellValue, Dataset};
use crate::transform::sanitize::{assign_sheet_names, ALL_RECORDS_SHEET};
use crate::transform::splitter::RowGroup;

/// Metadata about one emitted sheet.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetInfo {
    /// Final (sanitized, de-duplicated) sheet name.
    pub name: String,
    /// Number of data rows on the sheet, excluding the header.
    pub data_rows: usize,
}

/// Serialize the grouped dataset into an in-memory xlsx buffer.
///
/// Returns the workbook bytes together with the per-sheet metadata, in sheet
/// order (the `Total` sheet is always last).
pub fn build_workbook(
    dataset: &Dataset,
    groups: &[RowGroup],
) -> Result<(Vec<u8>, Vec<SheetInfo>), TransformError> {
    let keys: Vec<&str> = groups.iter().map(|g| g.key.as_str()).collect();
    let names = assign_sheet_names(&keys);

    let mut workbook = Workbook::new();
    let mut sheets = Vec::with_capacity(groups.len() + 1);

    for (group, name) in groups.iter().zip(&names) {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(name.as_str())?;
        write_sheet(worksheet, dataset, &group.rows)?;
        sheets.push(SheetInfo {
            name: name.clone(),
            data_rows: group.rows.len(),
        });
    }

    let all_rows: Vec<usize> = (0..dataset.rows.len()).collect();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(ALL_RECORDS_SHEET)?;
    write_sheet(worksheet, dataset, &all_rows)?;
    sheets.push(SheetInfo {
        name: ALL_RECORDS_SHEET.to_string(),
        data_rows: all_rows.len(),
    });

    let bytes = workbook.save_to_buffer()?;
    Ok((bytes, sheets))
}

/// Write the header row plus the selected dataset rows onto one worksheet.
fn write_sheet(
    worksheet: &mut Worksheet,
    dataset: &Dataset,
    row_indices: &[usize],
) -> Result<(), TransformError> {
    for (col, header) in dataset.headers.iter().enumerate() {
        worksheet.write_string(0, col as u16, header.as_str())?;
    }

    for (offset, &row_idx) in row_indices.iter().enumerate() {
        let row = (offset + 1) as u32;
        for (col, cell) in dataset.rows[row_idx].iter().enumerate() {
            match cell {
                CellValue::Empty => {}
                CellValue::Number(n) => {
                    worksheet.write_number(row, col as u16, *n)?;
                }
                CellValue::Text(s) => {
                    worksheet.write_string(row, col as u16, s.as_str())?;
                }
            }
        }
    }

    Ok(())
}

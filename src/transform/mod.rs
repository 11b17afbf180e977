//! Transformation module.
//!
//! CSV dataset to multi-sheet workbook:
//! - Sanitize: sheet-name cleanup and uniqueness
//! - Splitter: row partitioning by grouping-column value
//! - Workbook: xlsx serialization
//! - Pipeline: parse -> split -> serialize glue

pub mod pipeline;
pub mod sanitize;
pub mod splitter;
pub mod workbook;

pub use pipeline::*;
pub use sanitize::{assign_sheet_names, sanitize_sheet_name, ALL_RECORDS_SHEET};
pub use splitter::{split_by_column, RowGroup};
pub use workbook::{build_workbook, SheetInfo};

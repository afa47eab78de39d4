//! Dispatch spreadsheets and batch lifecycle
//!
//! - `row`: the fixed 32-column fulfillment schema
//! - `sheet`: row building, XLSX serialization and upload validation
//! - `batch`: `ready → downloaded → done` status machine

pub mod batch;
pub mod row;
pub mod sheet;

pub use batch::{BatchStatus, DispatchBatch};
pub use row::{COLUMNS, Cell, ColumnKind, ColumnSpec, DispatchRow};
pub use sheet::{DispatchSheet, DispatchSheetBuilder, read_rows, validate_headers};

/// Sheet name the fulfillment system expects.
pub const DEFAULT_SHEET_NAME: &str = "발송목록";

/// Sheet name of the downloadable sample.
pub const SAMPLE_SHEET_NAME: &str = "샘플";

pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

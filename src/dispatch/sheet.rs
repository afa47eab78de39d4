//! 发货表格生成 / 校验 / 解析

use std::collections::BTreeMap;
use std::io::Cursor;

use calamine::{Data, Reader, Xlsx, open_workbook_from_rs};
use chrono::{NaiveDate, NaiveDateTime, Utc};
use rust_xlsxwriter::{Format, Workbook};
use tracing::{debug, trace};

use super::row::{COLUMNS, Cell, DispatchRow, REQUIRED_HEADERS};
use super::{DEFAULT_SHEET_NAME, SAMPLE_SHEET_NAME};
use crate::errors::{OutreachError, Result};
use crate::mapping::{MappingSimType, ProductMapping, resolve_mapping};
use crate::storage::SurveySubmission;

/// Builds dispatch rows from submissions and the mapping table.
///
/// "Now" is injected so the order numbers and dates are reproducible.
pub struct DispatchSheetBuilder<'a> {
    mappings: &'a [ProductMapping],
    order_prefix: String,
    sheet_name: String,
    now: NaiveDateTime,
}

impl<'a> DispatchSheetBuilder<'a> {
    pub fn new(mappings: &'a [ProductMapping]) -> Self {
        Self {
            mappings,
            order_prefix: "RV".to_string(),
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
            now: Utc::now().naive_utc(),
        }
    }

    pub fn order_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.order_prefix = prefix.into();
        self
    }

    pub fn sheet_name(mut self, name: impl Into<String>) -> Self {
        self.sheet_name = name.into();
        self
    }

    pub fn at(mut self, now: NaiveDateTime) -> Self {
        self.now = now;
        self
    }

    /// One row per submission, in input order. Mapping misses give blank cells.
    pub fn build_rows(&self, submissions: &[SurveySubmission]) -> Vec<DispatchRow> {
        submissions
            .iter()
            .enumerate()
            .map(|(idx, submission)| {
                let mapping = resolve_mapping(self.mappings, &submission.country, submission.days);
                if mapping.is_none() {
                    debug!(
                        "No product mapping for {} / {} days (submission {})",
                        submission.country, submission.days, submission.id
                    );
                }
                DispatchRow::from_submission(
                    DispatchRow::order_number(&self.order_prefix, self.now, idx + 1),
                    submission,
                    mapping,
                    self.now,
                )
            })
            .collect()
    }

    pub fn build(&self, submissions: &[SurveySubmission]) -> Result<DispatchSheet> {
        if submissions.is_empty() {
            return Err(OutreachError::validation(
                "cannot build a dispatch sheet without submissions",
            ));
        }
        Ok(DispatchSheet {
            sheet_name: self.sheet_name.clone(),
            rows: self.build_rows(submissions),
        })
    }
}

/// A single-sheet dispatch workbook.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchSheet {
    pub sheet_name: String,
    pub rows: Vec<DispatchRow>,
}

impl DispatchSheet {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// One example row for operators to copy from.
    pub fn sample() -> Self {
        let submission = SurveySubmission::sample();
        let mapping = ProductMapping {
            id: "sample".to_string(),
            country: submission.country.clone(),
            sim_type: MappingSimType::Esim,
            plan_name: "KDDI 7일".to_string(),
            days: submission.days,
            seller_product_code: "ESAZB-JPKD007D_003GD".to_string(),
        };
        let now = NaiveDate::from_ymd_opt(2024, 1, 15)
            .and_then(|d| d.and_hms_opt(9, 0, 0))
            .unwrap_or_default();

        let mappings = [mapping];
        let rows = DispatchSheetBuilder::new(&mappings)
            .at(now)
            .build_rows(std::slice::from_ref(&submission));
        Self {
            sheet_name: SAMPLE_SHEET_NAME.to_string(),
            rows,
        }
    }

    /// Serializes to XLSX bytes: bold header row, template column widths.
    pub fn to_xlsx(&self) -> Result<Vec<u8>> {
        let mut workbook = Workbook::new();
        let header_format = Format::new().set_bold();

        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&self.sheet_name)?;

        for (col, column) in COLUMNS.iter().enumerate() {
            let col = col as u16;
            worksheet.write_string_with_format(0, col, column.header, &header_format)?;
            worksheet.set_column_width(col, column.width)?;
        }

        for (idx, row) in self.rows.iter().enumerate() {
            let row_num = (idx + 1) as u32;
            for (col, cell) in row.cells().into_iter().enumerate() {
                let col = col as u16;
                match cell {
                    Cell::Text("") => {}
                    Cell::Text(text) => {
                        worksheet.write_string(row_num, col, text)?;
                    }
                    Cell::Number(n) => {
                        worksheet.write_number(row_num, col, n)?;
                    }
                }
            }
        }

        let bytes = workbook.save_to_buffer()?;
        trace!(
            "Serialized dispatch sheet '{}' ({} rows, {} bytes)",
            self.sheet_name,
            self.rows.len(),
            bytes.len()
        );
        Ok(bytes)
    }
}

fn first_sheet_rows(bytes: &[u8]) -> Result<Vec<Vec<String>>> {
    let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| OutreachError::serialization("workbook has no sheets"))??;

    Ok(range
        .rows()
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect())
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        Data::Int(i) => i.to_string(),
        other => other.to_string(),
    }
}

/// True when the first sheet has a header row, at least one data row and
/// every required header. Unreadable bytes are simply invalid.
pub fn validate_headers(bytes: &[u8]) -> bool {
    let rows = match first_sheet_rows(bytes) {
        Ok(rows) => rows,
        Err(e) => {
            debug!("Dispatch sheet validation failed to read workbook: {}", e);
            return false;
        }
    };
    if rows.len() < 2 {
        return false;
    }
    let headers = &rows[0];
    REQUIRED_HEADERS
        .iter()
        .all(|required| headers.iter().any(|h| h == required))
}

/// First sheet as header-keyed maps, one per data row.
pub fn read_rows(bytes: &[u8]) -> Result<Vec<BTreeMap<String, String>>> {
    let mut rows = first_sheet_rows(bytes)?.into_iter();
    let Some(headers) = rows.next() else {
        return Ok(Vec::new());
    };

    Ok(rows
        .map(|row| {
            headers
                .iter()
                .zip(row)
                .filter(|(header, _)| !header.is_empty())
                .map(|(header, value)| (header.clone(), value))
                .collect()
        })
        .collect())
}

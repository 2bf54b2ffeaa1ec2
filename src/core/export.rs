// LeadGrid - core/export.rs
//
// CSV and spreadsheet export of the filtered view.
// Core layer: CSV writes to any Write trait object; the spreadsheet
// writer produces an in-memory workbook payload.
//
// Export is a pure serialisation of the already-filtered view: the
// projection determines column set and order, row order matches the
// view, and no value is aggregated or transformed.

use crate::core::model::{Column, Lead};
use crate::util::constants::{MAX_EXPORT_ROWS, SHEET_NAME};
use crate::util::error::ExportError;
use std::io::Write;

/// Requested output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// UTF-8 text, header row, comma-separated.
    Csv,

    /// Single-sheet xlsx workbook, sheet named "Filtered Data".
    Xlsx,
}

impl ExportFormat {
    /// File extension for this format (without the dot).
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Xlsx => "xlsx",
        }
    }
}

/// Resolve projection column names against the fixed schema.
///
/// Order is preserved; an unrecognised name is a typed error rather
/// than a silently empty output column.
pub fn resolve_projection(names: &[String]) -> Result<Vec<Column>, ExportError> {
    names
        .iter()
        .map(|name| {
            Column::from_name(name).ok_or_else(|| ExportError::UnknownColumn {
                column: name.clone(),
            })
        })
        .collect()
}

fn check_dimensions(view: &[usize], projection: &[Column]) -> Result<(), ExportError> {
    if projection.is_empty() {
        return Err(ExportError::EmptyProjection);
    }
    if view.len() > MAX_EXPORT_ROWS {
        return Err(ExportError::TooManyRows {
            count: view.len(),
            max: MAX_EXPORT_ROWS,
        });
    }
    Ok(())
}

/// Export the view as CSV. Returns the number of data rows written.
pub fn export_csv<W: Write>(
    dataset: &[Lead],
    view: &[usize],
    projection: &[Column],
    writer: W,
) -> Result<usize, ExportError> {
    check_dimensions(view, projection)?;

    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer
        .write_record(projection.iter().map(|c| c.name()))
        .map_err(|e| ExportError::Csv { source: e })?;

    let mut count = 0;
    for lead in view.iter().filter_map(|&i| dataset.get(i)) {
        csv_writer
            .write_record(projection.iter().map(|c| c.value(lead)))
            .map_err(|e| ExportError::Csv { source: e })?;
        count += 1;
    }

    csv_writer
        .flush()
        .map_err(|e| ExportError::Io { source: e })?;
    tracing::debug!(rows = count, columns = projection.len(), "CSV export written");
    Ok(count)
}

/// Export the view as a single-sheet xlsx workbook payload.
///
/// Sales values are written as numeric cells; everything else as text.
/// Null cells are left blank.
pub fn export_xlsx(
    dataset: &[Lead],
    view: &[usize],
    projection: &[Column],
) -> Result<Vec<u8>, ExportError> {
    check_dimensions(view, projection)?;

    let mut workbook = rust_xlsxwriter::Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(SHEET_NAME)
        .map_err(|e| ExportError::Xlsx { source: e })?;

    for (col_idx, column) in projection.iter().enumerate() {
        worksheet
            .write_string(0, col_idx as u16, column.name())
            .map_err(|e| ExportError::Xlsx { source: e })?;
    }

    for (row_idx, lead) in view.iter().filter_map(|&i| dataset.get(i)).enumerate() {
        let row = row_idx as u32 + 1;
        for (col_idx, column) in projection.iter().enumerate() {
            let col = col_idx as u16;
            match column {
                Column::EstimatedYearlySales => {
                    if let Some(sales) = lead.estimated_yearly_sales {
                        worksheet
                            .write_number(row, col, sales)
                            .map_err(|e| ExportError::Xlsx { source: e })?;
                    }
                }
                _ => {
                    let value = column.value(lead);
                    if !value.is_empty() {
                        worksheet
                            .write_string(row, col, value.as_str())
                            .map_err(|e| ExportError::Xlsx { source: e })?;
                    }
                }
            }
        }
    }

    let payload = workbook
        .save_to_buffer()
        .map_err(|e| ExportError::Xlsx { source: e })?;
    tracing::debug!(
        rows = view.len(),
        columns = projection.len(),
        bytes = payload.len(),
        "Spreadsheet export written"
    );
    Ok(payload)
}

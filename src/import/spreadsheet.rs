use std::path::Path;

use calamine::{open_workbook_auto, Reader};

use super::{collect_rows, Columns, ImportBatch, ImportError};
use crate::domain::User;

/// Reads the first worksheet of an ODS/XLSX workbook.
pub fn parse_spreadsheet(path: &Path, supplier: &User) -> Result<ImportBatch, ImportError> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook.worksheet_range_at(0).ok_or(ImportError::EmptySheet)??;

    // The range starts at the first non-empty cell, not necessarily row 1.
    let first_line = range.start().map_or(1, |(row, _)| row as usize + 1);

    let mut rows = range
        .rows()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect::<Vec<String>>());

    let header = rows.next().ok_or(ImportError::EmptySheet)?;
    let columns = Columns::new(header.iter().map(String::as_str))?;

    Ok(collect_rows(&columns, rows.enumerate().map(|(i, cells)| (first_line + i + 1, cells)), supplier))
}

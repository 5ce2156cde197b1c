// Spreadsheet input (xlsx, xlsm, xls, xlsb, ods)
//
// Only the first column of the first sheet is read. Row 1 is a header and is
// skipped; every row after it up to the last used row yields one entry, blank
// cells included, so the report keeps the input's row count and order.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Range, Reader, Sheets};

/// Read compound names from the first column of the first sheet.
///
/// Blank and error cells come back as `None`. Numbers are rendered as text
/// (`1234.0` becomes `"1234"`).
pub fn read_compound_names(path: &Path) -> Result<Vec<Option<String>>, String> {
    let range = first_sheet_range(path)?;
    Ok(data_rows(&range)
        .map(|row| range.get_value((row, 0)).and_then(cell_text))
        .collect())
}

/// Open a workbook and load its first worksheet. The file handle is released
/// before this returns.
pub(crate) fn first_sheet_range(path: &Path) -> Result<Range<Data>, String> {
    let mut workbook: Sheets<_> = open_workbook_auto(path)
        .map_err(|e| format!("Failed to open Excel file: {}", e))?;

    match workbook.worksheet_range_at(0) {
        Some(range) => range.map_err(|e| format!("Failed to read first sheet: {}", e)),
        None => Err("Excel file contains no sheets".to_string()),
    }
}

/// Absolute indices of the rows below the header, through the last used row.
pub(crate) fn data_rows(range: &Range<Data>) -> std::ops::Range<u32> {
    match range.end() {
        Some((last_row, _)) if last_row >= 1 => 1..last_row + 1,
        _ => 0..0,
    }
}

/// Text content of a cell, `None` for blank, empty or error cells.
pub(crate) fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) if s.is_empty() => None,
        Data::String(s) => Some(s.clone()),
        Data::Float(f) => Some(format_number(*f)),
        Data::Int(i) => Some(i.to_string()),
        Data::Bool(b) => Some(b.to_string()),
        Data::DateTime(dt) => Some(format_number(dt.as_f64())),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Some(s.clone()),
    }
}

/// Non-negative integral number stored in a cell, e.g. a PubChem CID.
pub(crate) fn cell_u64(cell: &Data) -> Option<u64> {
    match cell {
        Data::Int(i) => u64::try_from(*i).ok(),
        Data::Float(f) if *f >= 0.0 && f.fract() == 0.0 && *f <= u64::MAX as f64 => Some(*f as u64),
        Data::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

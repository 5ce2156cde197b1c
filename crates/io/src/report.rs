// Annotated XLSX report
//
// The report is produced in two passes over the same file:
//   1. write_table: plain table, one row per lookup, hyperlink column blank.
//   2. annotate: reopen the written table, then rewrite it with status fills,
//      search links for unresolved names and the summary block.
// Each pass opens and releases the file on its own; nothing is held between
// them except the path.

use std::path::{Path, PathBuf};

use rust_xlsxwriter::{Format, Url, Workbook as XlsxWorkbook, Worksheet, XlsxError};
use smilefetch_core::{url_encode, Hyperlink, LookupStatus, PercentEncoding, ReportRow, SummaryCounts};

use crate::input::{cell_text, cell_u64, data_rows, first_sheet_range};
use crate::styles::{self, Palette};

/// Column headers, in column order.
pub const HEADERS: [&str; 5] = ["Compound name", "PubChem ID", "SMILES", "Status", "Hyperlink"];

const COL_NAME: u16 = 0;
const COL_ID: u16 = 1;
const COL_SMILES: u16 = 2;
const COL_STATUS: u16 = 3;
const COL_LINK: u16 = 4;

const COLUMN_WIDTHS: [f64; 5] = [32.0, 12.0, 48.0, 16.0, 32.0];

const SHEET_NAME: &str = "Sheet1";

/// A report row as stored in the sheet. The status is kept as the raw cell
/// text so a row whose label is not one of the known three survives the
/// reopen untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredRow {
    pub name: Option<String>,
    pub identifier: Option<u64>,
    pub structure: Option<String>,
    pub status_label: String,
    pub hyperlink: Option<Hyperlink>,
}

impl StoredRow {
    pub fn status(&self) -> Option<LookupStatus> {
        LookupStatus::from_label(&self.status_label)
    }
}

impl From<&ReportRow> for StoredRow {
    fn from(row: &ReportRow) -> Self {
        Self {
            name: row.name.clone(),
            identifier: row.identifier,
            structure: row.structure.clone(),
            status_label: row.status.label().to_string(),
            hyperlink: None,
        }
    }
}

/// Settings for the styling pass.
#[derive(Debug, Clone)]
pub struct AnnotateOptions {
    /// Link prefix; the encoded name is appended
    pub query_url: String,
    pub encoding: PercentEncoding,
    pub palette: Palette,
}

/// What the styling pass wrote.
#[derive(Debug, Default)]
pub struct AnnotateResult {
    pub counts: SummaryCounts,
    /// Number of search links written
    pub hyperlinks: usize,
    /// Links too long for Excel, written as plain label text instead
    pub oversized_links: usize,
    /// Rows whose Status cell held none of the known labels (left unfilled)
    pub unrecognized_status: usize,
    /// Zero-based sheet row of the first summary line
    pub summary_row: u32,
}

/// Output path for `input`: same directory, `prefix` prepended to the file
/// name. The report is always XLSX, so any other extension becomes `.xlsx`.
pub fn output_path_for(input: &Path, prefix: &str) -> Result<PathBuf, String> {
    let file_name = input
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| format!("'{}' does not name a file", input.display()))?;

    let mut output = input.with_file_name(format!("{}{}", prefix, file_name));
    let is_xlsx = output
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("xlsx"))
        .unwrap_or(false);
    if !is_xlsx {
        output.set_extension("xlsx");
    }
    Ok(output)
}

/// Search link for an unresolved name, `None` when the name is empty.
pub fn hyperlink_for(name: &str, options: &AnnotateOptions) -> Option<Hyperlink> {
    if name.is_empty() {
        return None;
    }
    let label = url_encode(name, options.encoding);
    Some(Hyperlink {
        target: format!("{}{}", options.query_url, label),
        label,
    })
}

/// Fill for a Status cell holding `label`; unknown labels get none.
pub fn status_fill(label: &str, palette: &Palette) -> Option<Format> {
    LookupStatus::from_label(label).map(|status| palette.status_format(status))
}

/// First pass: write the plain table.
pub fn write_table(path: &Path, rows: &[ReportRow]) -> Result<(), String> {
    let stored: Vec<StoredRow> = rows.iter().map(StoredRow::from).collect();

    let mut workbook = XlsxWorkbook::new();
    let worksheet = new_report_sheet(&mut workbook)?;
    for (i, row) in stored.iter().enumerate() {
        write_row(worksheet, i as u32 + 1, row, None)?;
    }

    workbook
        .save(path)
        .map_err(|e| format!("Failed to save XLSX file: {}", e))
}

/// Read the report table back. Stops at the last used row, so it must run
/// before the summary block is appended.
pub fn read_table(path: &Path) -> Result<Vec<StoredRow>, String> {
    let range = first_sheet_range(path)?;

    let rows = data_rows(&range)
        .map(|row| {
            let text = |col: u16| range.get_value((row, col as u32)).and_then(cell_text);
            StoredRow {
                name: text(COL_NAME),
                identifier: range.get_value((row, COL_ID as u32)).and_then(cell_u64),
                structure: text(COL_SMILES),
                status_label: text(COL_STATUS).unwrap_or_default(),
                hyperlink: None,
            }
        })
        .collect();
    Ok(rows)
}

/// Second pass: reopen the table at `path` and rewrite it with status fills,
/// search links for unresolved rows and the summary block.
pub fn annotate(path: &Path, options: &AnnotateOptions) -> Result<AnnotateResult, String> {
    let mut rows = read_table(path)?;
    let mut result = AnnotateResult::default();

    for row in &mut rows {
        match row.status() {
            Some(LookupStatus::NotFound) => {
                row.hyperlink = row
                    .name
                    .as_deref()
                    .and_then(|name| hyperlink_for(name, options));
            }
            Some(_) => {}
            None => {
                tracing::warn!(
                    status = %row.status_label,
                    "unrecognized status label, leaving row unstyled"
                );
                result.unrecognized_status += 1;
            }
        }
    }
    result.counts = SummaryCounts::from_statuses(rows.iter().filter_map(StoredRow::status));

    let mut workbook = XlsxWorkbook::new();
    let worksheet = new_report_sheet(&mut workbook)?;
    for (i, row) in rows.iter().enumerate() {
        match write_row(worksheet, i as u32 + 1, row, Some(&options.palette))? {
            LinkCell::Link => result.hyperlinks += 1,
            LinkCell::PlainText => result.oversized_links += 1,
            LinkCell::Empty => {}
        }
    }

    // One blank row between the table and the summary.
    result.summary_row = rows.len() as u32 + 2;
    write_summary(worksheet, result.summary_row, &result.counts)?;

    workbook
        .save(path)
        .map_err(|e| format!("Failed to save XLSX file: {}", e))?;
    Ok(result)
}

fn new_report_sheet(workbook: &mut XlsxWorkbook) -> Result<&mut Worksheet, String> {
    let worksheet = workbook
        .add_worksheet()
        .set_name(SHEET_NAME)
        .map_err(|e| format!("Failed to create sheet '{}': {}", SHEET_NAME, e))?;

    let header = styles::header_format();
    for (col, title) in HEADERS.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, *title, &header)
            .map_err(|e| format!("Failed to write header: {}", e))?;
    }
    for (col, width) in COLUMN_WIDTHS.iter().enumerate() {
        worksheet
            .set_column_width(col as u16, *width)
            .map_err(|e| format!("Failed to set column width: {}", e))?;
    }
    Ok(worksheet)
}

/// What ended up in the Hyperlink column of a written row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LinkCell {
    Empty,
    Link,
    /// Target over Excel's URL length limit; only the label was written
    PlainText,
}

fn write_row(
    worksheet: &mut Worksheet,
    row: u32,
    data: &StoredRow,
    palette: Option<&Palette>,
) -> Result<LinkCell, String> {
    let cell_err = |col: u16, e: XlsxError| {
        format!("Failed to write cell ({}, {}): {}", row, col, e)
    };

    if let Some(name) = data.name.as_deref().filter(|n| !n.is_empty()) {
        worksheet
            .write_string(row, COL_NAME, name)
            .map_err(|e| cell_err(COL_NAME, e))?;
    }
    if let Some(id) = data.identifier {
        worksheet
            .write_number(row, COL_ID, id as f64)
            .map_err(|e| cell_err(COL_ID, e))?;
    }
    if let Some(smiles) = data.structure.as_deref().filter(|s| !s.is_empty()) {
        worksheet
            .write_string(row, COL_SMILES, smiles)
            .map_err(|e| cell_err(COL_SMILES, e))?;
    }

    match palette.and_then(|p| status_fill(&data.status_label, p)) {
        Some(fill) => worksheet
            .write_string_with_format(row, COL_STATUS, &data.status_label, &fill)
            .map_err(|e| cell_err(COL_STATUS, e))?,
        None => worksheet
            .write_string(row, COL_STATUS, &data.status_label)
            .map_err(|e| cell_err(COL_STATUS, e))?,
    };

    let Some(link) = &data.hyperlink else {
        return Ok(LinkCell::Empty);
    };
    match worksheet.write_url_with_text(row, COL_LINK, Url::new(link.target.as_str()), link.label.as_str()) {
        Ok(_) => Ok(LinkCell::Link),
        // The URL is validated before anything is stored, so the cell is still free.
        Err(XlsxError::MaxUrlLengthExceeded) => {
            tracing::warn!(
                row,
                chars = link.target.chars().count(),
                "search link exceeds Excel's URL length limit, writing label only"
            );
            worksheet
                .write_string(row, COL_LINK, link.label.as_str())
                .map_err(|e| cell_err(COL_LINK, e))?;
            Ok(LinkCell::PlainText)
        }
        Err(e) => Err(cell_err(COL_LINK, e)),
    }
}

fn write_summary(worksheet: &mut Worksheet, first_row: u32, counts: &SummaryCounts) -> Result<(), String> {
    let label_format = styles::summary_label_format();
    for (offset, (label, value)) in counts.lines().iter().enumerate() {
        let row = first_row + offset as u32;
        worksheet
            .write_string_with_format(row, 0, *label, &label_format)
            .and_then(|ws| ws.write_number(row, 1, *value as f64))
            .map_err(|e| format!("Failed to write summary row {}: {}", row, e))?;
    }
    Ok(())
}

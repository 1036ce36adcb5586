//! Writes a prepared `Sheet` to a spreadsheet file.

use crate::export::Sheet;
use crate::Result;
use anyhow::Context;
use rust_xlsxwriter::Workbook;
use std::path::Path;
use tracing::debug;

/// The contract between the export transformation and the file writer:
/// given an ordered sequence of rows, produce a file at `path`.
pub trait SheetSink {
    fn write(&mut self, sheet: &Sheet, path: &Path) -> Result<()>;
}

/// Implements the `SheetSink` trait by writing an xlsx workbook with a
/// single worksheet, honoring the sheet's column width hints.
#[derive(Debug, Default)]
pub struct XlsxSink;

impl SheetSink for XlsxSink {
    fn write(&mut self, sheet: &Sheet, path: &Path) -> Result<()> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(sheet.name())
            .with_context(|| format!("Invalid worksheet name '{}'", sheet.name()))?;

        let mut row_ix: u32 = 0;
        if sheet.header() {
            for (col_ix, column) in sheet.columns().iter().enumerate() {
                worksheet.write_string(row_ix, col_ix as u16, column.header())?;
            }
            row_ix += 1;
        }

        for row in sheet.rows() {
            for (col_ix, column) in sheet.columns().iter().enumerate() {
                worksheet.write_string(row_ix, col_ix as u16, row.get(*column))?;
            }
            row_ix += 1;
        }

        for (col_ix, column) in sheet.columns().iter().enumerate() {
            worksheet.set_column_width(col_ix as u16, column.width())?;
        }

        workbook
            .save(path)
            .with_context(|| format!("Unable to write spreadsheet file {}", path.display()))?;
        debug!("Wrote {} rows to {}", sheet.rows().len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::all_purchases;
    use crate::model::Tracker;
    use tempfile::TempDir;

    #[test]
    fn test_xlsx_sink_writes_a_file() {
        let dir = TempDir::new().unwrap();
        let tracker = Tracker::default().add_person("Alice");
        let sheet = all_purchases(&tracker);
        let path = dir.path().join(sheet.filename());

        XlsxSink.write(&sheet, &path).unwrap();

        let metadata = std::fs::metadata(&path).unwrap();
        assert!(metadata.len() > 0);
    }

    #[test]
    fn test_xlsx_sink_rejects_invalid_worksheet_name() {
        let dir = TempDir::new().unwrap();
        // Worksheet names cannot contain '[' or ']'.
        let tracker = Tracker::default().add_person("A[1]");
        let sheet = crate::export::person_purchases(&tracker.people()[0]);
        let path = dir.path().join("out.xlsx");
        assert!(XlsxSink.write(&sheet, &path).is_err());
    }
}

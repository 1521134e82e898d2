//! Excel report renderer.

use std::path::PathBuf;

use rust_xlsxwriter::{Format, Workbook};

use super::{Cell, ReportError, ReportRenderer, ReportResult};

// Layout: title, subtitle, one blank row, headers, then data.
const HEADER_ROW: u32 = 3;

/// [`ReportRenderer`] that writes a single-sheet `.xlsx` workbook.
#[derive(Debug)]
pub struct ExcelReportRenderer {
    output_path: PathBuf,
}

impl ExcelReportRenderer {
    /// Renderer that saves the workbook to `output_path`.
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: output_path.into(),
        }
    }
}

impl ReportRenderer for ExcelReportRenderer {
    fn render_table(
        &mut self,
        title: &str,
        subtitle: &str,
        columns: &[&str],
        rows: &[Vec<Cell>],
    ) -> ReportResult<()> {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        let header_format = Format::new().set_bold();

        sheet
            .write_string_with_format(0, 0, title, &header_format)
            .map_err(|e| ReportError::Excel(e.to_string()))?;
        sheet
            .write_string(1, 0, subtitle)
            .map_err(|e| ReportError::Excel(e.to_string()))?;

        for (col, header) in columns.iter().enumerate() {
            sheet
                .write_string_with_format(HEADER_ROW, col as u16, *header, &header_format)
                .map_err(|e| ReportError::Excel(e.to_string()))?;
        }

        for (i, row) in rows.iter().enumerate() {
            let r = HEADER_ROW + 1 + i as u32;
            for (col, cell) in row.iter().enumerate() {
                match cell {
                    Cell::Text(text) => sheet
                        .write_string(r, col as u16, text)
                        .map_err(|e| ReportError::Excel(e.to_string()))?,
                    Cell::Number(value) => sheet
                        .write_number(r, col as u16, *value)
                        .map_err(|e| ReportError::Excel(e.to_string()))?,
                };
            }
        }

        workbook
            .save(&self.output_path)
            .map_err(|e| ReportError::Excel(e.to_string()))?;
        Ok(())
    }
}

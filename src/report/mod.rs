pub mod excel;

use thiserror::Error;

use crate::{
    core::log::TripLog,
    mail::{MAIL_BODY, MAIL_SUBJECT, MessageComposer},
    types::Km,
};

/// Fixed report title.
pub const REPORT_TITLE: &str = "Körjournal";

/// Column headers, in table order.
pub const REPORT_COLUMNS: [&str; 6] = ["Datum", "Från", "Till", "Start km", "Slut km", "Km"];

/// Failures while emitting the report artifact.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Excel workbook construction or save failure.
    #[error("excel export error: {0}")]
    Excel(String),
    /// Anything else, as a message.
    #[error("report error: {0}")]
    Message(String),
}

/// Result alias for report operations.
pub type ReportResult<T> = Result<T, ReportError>;

/// One table cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Free-text cell.
    Text(String),
    /// Numeric cell, in kilometers.
    Number(Km),
}

/// Renders a titled table and emits the resulting document artifact. The
/// concrete artifact (file format, location) belongs to the implementation.
pub trait ReportRenderer {
    /// Renders `rows` under `columns`, with a title line and a subtitle line
    /// above the table.
    fn render_table(
        &mut self,
        title: &str,
        subtitle: &str,
        columns: &[&str],
        rows: &[Vec<Cell>],
    ) -> ReportResult<()>;
}

impl TripLog {
    /// Tabular projection of the records in stored (newest-first) order, one
    /// row per trip with the [`REPORT_COLUMNS`] columns.
    pub fn report_rows(&self) -> Vec<Vec<Cell>> {
        self.records()
            .iter()
            .map(|rec| {
                vec![
                    Cell::Text(rec.date.clone()),
                    Cell::Text(rec.origin.clone()),
                    Cell::Text(rec.destination.clone()),
                    Cell::Number(rec.start_odometer),
                    Cell::Number(rec.end_odometer),
                    Cell::Number(rec.distance),
                ]
            })
            .collect()
    }

    /// Renders the report artifact, then opens a pre-filled mail draft with
    /// the fixed subject/body template.
    ///
    /// The draft carries no attachment; the user attaches the artifact
    /// manually.
    pub fn export_report(
        &self,
        renderer: &mut dyn ReportRenderer,
        composer: &mut dyn MessageComposer,
    ) -> ReportResult<()> {
        let subtitle = format!("Registreringsnummer: {}", self.vehicle_id());
        renderer.render_table(REPORT_TITLE, &subtitle, &REPORT_COLUMNS, &self.report_rows())?;
        composer.compose(MAIL_SUBJECT, MAIL_BODY);
        Ok(())
    }
}

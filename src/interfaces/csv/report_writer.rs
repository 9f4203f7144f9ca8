use crate::domain::card::CardReport;
use crate::error::Result;
use std::io::Write;

/// Writes one CSV line per validated card row.
///
/// Columns are `row,number,expiry,cvv,holder,valid`; each field column holds
/// `ok`, `blank` or the rejection message.
pub struct ReportWriter<W: Write> {
    writer: csv::Writer<W>,
    header_written: bool,
}

impl<W: Write> ReportWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
            header_written: false,
        }
    }

    pub fn write_report(&mut self, row: usize, report: &CardReport) -> Result<()> {
        if !self.header_written {
            self.writer
                .write_record(["row", "number", "expiry", "cvv", "holder", "valid"])?;
            self.header_written = true;
        }
        let mut record = vec![row.to_string()];
        record.extend(report.fields().iter().map(|(_, verdict)| verdict.to_string()));
        record.push(report.is_valid().to_string());
        self.writer.write_record(&record)?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

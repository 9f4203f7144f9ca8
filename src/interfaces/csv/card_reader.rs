use crate::domain::card::CardInput;
use crate::error::{DineError, Result};
use csv::StringRecord;
use std::io::Read;

/// Positions of the card columns in the header row.
#[derive(Debug, Clone, Copy, Default)]
struct CardColumns {
    number: Option<usize>,
    expiry: Option<usize>,
    cvv: Option<usize>,
    holder: Option<usize>,
}

impl CardColumns {
    fn locate(headers: &StringRecord) -> Self {
        let position = |name: &str| headers.iter().position(|h| h == name);
        Self {
            number: position("number"),
            expiry: position("expiry"),
            cvv: position("cvv"),
            holder: position("holder"),
        }
    }

    fn is_empty(&self) -> bool {
        self.number.is_none() && self.expiry.is_none() && self.cvv.is_none() && self.holder.is_none()
    }

    /// Missing columns and cells past the end of a short row read as blank.
    fn card(&self, record: &StringRecord) -> CardInput {
        let cell = |column: Option<usize>| {
            column
                .and_then(|i| record.get(i))
                .unwrap_or_default()
                .to_string()
        };
        CardInput {
            number: cell(self.number),
            expiry: cell(self.expiry),
            cvv: cell(self.cvv),
            holder_name: cell(self.holder),
        }
    }
}

/// Reads card rows (`number,expiry,cvv,holder`) from a CSV source.
///
/// Fields are not trimmed: the validators decide how whitespace counts.
pub struct CardReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> CardReader<R> {
    /// Creates a new `CardReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Reads the header and returns an iterator over the card rows.
    ///
    /// Fails when the header names none of the card columns.
    pub fn cards(mut self) -> Result<impl Iterator<Item = Result<CardInput>>> {
        let columns = CardColumns::locate(self.reader.headers()?);
        if columns.is_empty() {
            return Err(DineError::InvalidInput(
                "header has none of the columns number, expiry, cvv, holder".to_string(),
            ));
        }
        Ok(self
            .reader
            .into_records()
            .map(move |result| result.map(|record| columns.card(&record)).map_err(DineError::from)))
    }
}

//! Fill attempt records and the sinks that receive them.

use std::io;

use serde::Serialize;

/// Result of one attempt to fill one item request.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FillOutcome {
    Filled,
    AlreadyFilled,
    OutOfStock,
}

/// One line of the fill log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FillEntry {
    pub outcome: FillOutcome,
    pub customer: String,
    pub product: String,
    pub item: String,
    /// Serial number stamped on the request, or 0 if it never got one.
    pub serial_number: u64,
}

impl FillEntry {
    pub fn new(
        outcome: FillOutcome,
        customer: &str,
        product: &str,
        item: &str,
        serial_number: u64,
    ) -> Self {
        Self {
            outcome,
            customer: customer.to_owned(),
            product: product.to_owned(),
            item: item.to_owned(),
            serial_number,
        }
    }

    pub fn is_filled(&self) -> bool {
        self.outcome == FillOutcome::Filled
    }
}

impl core::fmt::Display for FillEntry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let Self {
            customer,
            product,
            item,
            serial_number,
            ..
        } = self;
        match self.outcome {
            FillOutcome::Filled => {
                write!(f, " Filled {customer} [{product}][{item}][{serial_number}]")
            }
            FillOutcome::AlreadyFilled => write!(
                f,
                " Unable to fill {customer} [{product}][{item}][{serial_number}] already filled"
            ),
            FillOutcome::OutOfStock => write!(
                f,
                " Unable to fill {customer} [{product}][{item}][{serial_number}] out of stock"
            ),
        }
    }
}

/// Append-only sink for fill attempts.
pub trait FillLog {
    fn record(&mut self, entry: FillEntry);
}

impl FillLog for Vec<FillEntry> {
    fn record(&mut self, entry: FillEntry) {
        self.push(entry);
    }
}

/// Writes each entry as a text line.
///
/// Recording cannot fail, so the first write error is parked and later writes
/// are dropped; `finish` hands it back.
#[derive(Debug)]
pub struct WriteLog<W: io::Write> {
    writer: W,
    error: Option<io::Error>,
}

impl<W: io::Write> WriteLog<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            error: None,
        }
    }

    pub fn finish(mut self) -> io::Result<W> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        self.writer.flush()?;
        Ok(self.writer)
    }
}

impl<W: io::Write> FillLog for WriteLog<W> {
    fn record(&mut self, entry: FillEntry) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = writeln!(self.writer, "{entry}") {
            self.error = Some(err);
        }
    }
}

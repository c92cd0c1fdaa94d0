use serde::Serialize;

use fulfill_core::{FromRecord, ParseError, RecordResult, Tokenizer};

/// Stock of one named item held by a station.
///
/// Not `Clone`: each station owns exactly one stock and hands it over only by
/// move.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct Stock {
    name: String,
    serial_number: u64,
    quantity: u32,
    description: String,
}

impl Stock {
    pub fn new(
        name: impl Into<String>,
        serial_number: u64,
        quantity: u32,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            serial_number,
            quantity,
            description: description.into(),
        }
    }

    /// Parse `name|serial|quantity|description`.
    pub fn parse(record: &str, tokenizer: &Tokenizer) -> RecordResult<Self> {
        let mut cursor = tokenizer.cursor(record);
        let name = cursor.next_field("item name")?;
        let serial_number: u64 = cursor.parse_field("serial number")?;
        let quantity: u32 = cursor.parse_field("quantity")?;
        let description = cursor.next_field("description")?;
        cursor.finish()?;

        if serial_number.checked_add(u64::from(quantity)).is_none() {
            return Err(ParseError::invalid(
                "serial number",
                serial_number.to_string(),
                format!("no room for {quantity} more serial numbers"),
            )
            .into());
        }

        Ok(Self::new(name, serial_number, quantity, description))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Serial number the next unit taken from this stock will carry.
    pub fn serial_number(&self) -> u64 {
        self.serial_number
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_exhausted(&self) -> bool {
        self.quantity == 0
    }

    /// Take one unit: quantity down by one, serial number up by one.
    ///
    /// Callers check `quantity()` first. On an exhausted stock, or one whose
    /// serial numbers have run out, both counters stay where they are so they
    /// never drift apart.
    pub fn decrement(&mut self) -> &mut Self {
        if self.quantity == 0 {
            tracing::warn!(item = %self.name, "decrement on exhausted stock ignored");
            return self;
        }
        let Some(next) = self.serial_number.checked_add(1) else {
            tracing::warn!(
                item = %self.name,
                serial = self.serial_number,
                "decrement past the last serial number ignored"
            );
            return self;
        };
        self.quantity -= 1;
        self.serial_number = next;
        self
    }
}

impl FromRecord for Stock {
    fn from_record(record: &str, tokenizer: &Tokenizer) -> RecordResult<Self> {
        Self::parse(record, tokenizer)
    }
}

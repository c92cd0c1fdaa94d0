//! Delimited record tokenization.
//!
//! A record is one line of text whose fields are separated by a single
//! delimiter character. Fields are read left to right through a byte cursor
//! that the caller owns, so an entity constructor can pull exactly the fields
//! it needs and then inspect what is left.

use core::str::FromStr;

use crate::error::{ParseError, RecordResult};

/// Delimiter used when none is configured.
pub const DEFAULT_DELIMITER: char = '|';

/// Splits records on a configured delimiter.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Tokenizer {
    delimiter: char,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(DEFAULT_DELIMITER)
    }
}

impl Tokenizer {
    pub fn new(delimiter: char) -> Self {
        Self { delimiter }
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    /// Start a cursor over `record`.
    pub fn cursor<'r>(&self, record: &'r str) -> Cursor<'r> {
        Cursor {
            record,
            position: 0,
            delimiter: self.delimiter,
        }
    }
}

/// Read position inside one record.
///
/// `position` is the byte offset where the next field starts. Once the last
/// field has been consumed it moves one past the end of the record, which is
/// how a trailing delimiter (an empty last field) stays distinguishable from
/// an exhausted record.
#[derive(Debug, Clone)]
pub struct Cursor<'r> {
    record: &'r str,
    position: usize,
    delimiter: char,
}

impl<'r> Cursor<'r> {
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_exhausted(&self) -> bool {
        self.position > self.record.len()
    }

    /// Return the next field, trimmed, and advance past its delimiter.
    pub fn next_field(&mut self, field: &'static str) -> Result<&'r str, ParseError> {
        if self.is_exhausted() {
            return Err(ParseError::missing(field));
        }

        let rest = &self.record[self.position..];
        let (raw, advance) = match rest.find(self.delimiter) {
            Some(at) => (&rest[..at], at + self.delimiter.len_utf8()),
            None => (rest, rest.len() + 1),
        };
        self.position += advance;

        let value = raw.trim();
        if value.is_empty() {
            return Err(ParseError::empty(field));
        }
        Ok(value)
    }

    /// Read the next field and convert it with `FromStr`.
    pub fn parse_field<T>(&mut self, field: &'static str) -> Result<T, ParseError>
    where
        T: FromStr,
        T::Err: core::fmt::Display,
    {
        let raw = self.next_field(field)?;
        raw.parse::<T>()
            .map_err(|e| ParseError::invalid(field, raw, e))
    }

    /// Consume every remaining field.
    pub fn rest(&mut self, field: &'static str) -> Result<Vec<&'r str>, ParseError> {
        let mut fields = Vec::new();
        while !self.is_exhausted() {
            fields.push(self.next_field(field)?);
        }
        Ok(fields)
    }

    /// Fail if anything is left unread.
    pub fn finish(mut self) -> Result<(), ParseError> {
        if self.is_exhausted() {
            return Ok(());
        }
        let position = self.position;
        match self.next_field("trailing") {
            Ok(value) => Err(ParseError::trailing(value)),
            Err(_) => Err(ParseError::trailing(&self.record[position..])),
        }
    }
}

/// Construction of an entity from one delimited record.
pub trait FromRecord: Sized {
    fn from_record(record: &str, tokenizer: &Tokenizer) -> RecordResult<Self>;
}

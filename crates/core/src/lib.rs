//! `fulfill-core`: record parsing building blocks.
//!
//! This crate contains the tokenizer and error types shared by every entity
//! that is built from a delimited text record (no IO).

pub mod error;
pub mod record;

pub use error::{ParseError, RecordError, RecordResult};
pub use record::{Cursor, FromRecord, Tokenizer, DEFAULT_DELIMITER};

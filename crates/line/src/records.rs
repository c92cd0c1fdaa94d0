//! Turning a text file of records into entities.

use fulfill_core::{FromRecord, RecordResult, Tokenizer};

/// One non-blank line of input and what it parsed into.
#[derive(Debug)]
pub struct ParsedRecord<T> {
    /// 1-based line number in the source text.
    pub line: usize,
    pub result: RecordResult<T>,
}

/// Parse every non-blank line of `text` as a `T`.
///
/// Failures are returned in place so the caller decides whether to skip the
/// record or abort.
pub fn parse_records<T: FromRecord>(text: &str, tokenizer: &Tokenizer) -> Vec<ParsedRecord<T>> {
    text.lines()
        .enumerate()
        .filter(|(_, raw)| !raw.trim().is_empty())
        .map(|(index, raw)| ParsedRecord {
            line: index + 1,
            result: T::from_record(raw, tokenizer),
        })
        .collect()
}

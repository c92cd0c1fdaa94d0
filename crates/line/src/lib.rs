//! `fulfill-line`: wires stations into an assembly line.
//!
//! Orders enter at the first station and move one station per step until they
//! fall off the end of the line, where they are sorted into completed and
//! incomplete. Also provides record loading and plain-text rendering for the
//! driver.

pub mod assembly;
pub mod records;
pub mod report;

pub use assembly::{AssemblyLine, LineError, LineOutcome, LineSummary};
pub use records::{parse_records, ParsedRecord};

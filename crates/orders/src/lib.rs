//! Customer orders domain module.
//!
//! An [`Order`] is a customer's request for a fixed list of named items. Each
//! request is filled independently when the order visits a station holding
//! stock of that item. Every attempt is reported to a [`FillLog`].

pub mod fill;
pub mod order;

pub use fill::{FillEntry, FillLog, FillOutcome, WriteLog};
pub use order::{ItemRequest, Order};

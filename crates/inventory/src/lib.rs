//! Inventory domain module.
//!
//! A [`Stock`] tracks how many units of one named item remain and which serial
//! number the next unit handed out will carry. Pure bookkeeping: no IO.

pub mod stock;

pub use stock::Stock;

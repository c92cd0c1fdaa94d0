//! Stations: one stock plus a FIFO queue of orders waiting on it.
//!
//! Only the order at the front of a station's queue is ever filled or
//! released. A station releases its front order once that order needs nothing
//! more from it, or once its stock is gone for good.

pub mod station;

pub use station::{Release, Station};

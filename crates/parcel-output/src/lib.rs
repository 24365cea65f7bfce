//! `parcel-output` — where tracking events go.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                |
//! |--------------|---------------------------------------------------------|
//! | [`producer`] | `Producer` trait — one handle per worker                |
//! | [`csv`]      | `CsvProducer` — one CSV file of events                  |
//! | [`json`]     | `JsonLinesProducer` — newline-delimited JSON            |
//! | [`channel`]  | `ChannelProducer` — bounded in-process channel          |
//! | [`error`]    | `ProducerError`, `ProducerResult<T>`                    |
//!
//! Every worker owns exactly one producer handle, so backends are `Send`
//! but never shared.  `send` is allowed to block (bounded-channel
//! backpressure); delivery is best-effort — a failed send is the caller's
//! to log and count, not to die over.

pub mod channel;
pub mod csv;
pub mod error;
pub mod json;
pub mod producer;

#[cfg(test)]
mod tests;

pub use channel::ChannelProducer;
pub use self::csv::CsvProducer;
pub use error::{ProducerError, ProducerResult};
pub use json::JsonLinesProducer;
pub use producer::Producer;

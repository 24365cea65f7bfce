//! Newline-delimited JSON event backend.
//!
//! One JSON object per line, the shape a message-bus payload takes.  Useful
//! for piping into downstream tooling without a CSV parser.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use parcel_core::TrackingEvent;

use crate::producer::Producer;
use crate::ProducerResult;

/// Writes tracking events as newline-delimited JSON.
pub struct JsonLinesProducer {
    out:      BufWriter<File>,
    finished: bool,
}

impl JsonLinesProducer {
    /// Open (or create) the file at `path`.
    pub fn new(path: &Path) -> ProducerResult<Self> {
        let file = File::create(path)?;
        Ok(Self { out: BufWriter::new(file), finished: false })
    }
}

impl Producer for JsonLinesProducer {
    fn send(&mut self, event: &TrackingEvent) -> ProducerResult<()> {
        serde_json::to_writer(&mut self.out, event)?;
        self.out.write_all(b"\n")?;
        Ok(())
    }

    fn close(&mut self) -> ProducerResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.out.flush()?;
        Ok(())
    }
}

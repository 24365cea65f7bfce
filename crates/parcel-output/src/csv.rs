//! CSV event backend.
//!
//! One file per worker (the orchestrator derives per-worker paths), with a
//! header row and one row per tracking event.

use std::fs::File;
use std::path::Path;

use ::csv::Writer;

use parcel_core::TrackingEvent;

use crate::producer::Producer;
use crate::ProducerResult;

/// Writes tracking events to a single CSV file.
pub struct CsvProducer {
    writer:   Writer<File>,
    finished: bool,
}

impl CsvProducer {
    /// Open (or create) the file at `path` and write the header row.
    pub fn new(path: &Path) -> ProducerResult<Self> {
        let mut writer = Writer::from_path(path)?;
        writer.write_record(["package_id", "time", "event", "location", "lat", "lon"])?;
        Ok(Self { writer, finished: false })
    }
}

impl Producer for CsvProducer {
    fn send(&mut self, event: &TrackingEvent) -> ProducerResult<()> {
        self.writer.write_record(&[
            event.package_id.clone(),
            event.time.0.to_string(),
            event.kind.as_str().to_string(),
            event.location.0.to_string(),
            event.position.lat.to_string(),
            event.position.lon.to_string(),
        ])?;
        Ok(())
    }

    fn close(&mut self) -> ProducerResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.writer.flush()?;
        Ok(())
    }
}

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::debug;

use crate::models::FlatRecord;
use crate::sink::{RecordSink, SinkError};

/// Appends one JSON object per line.
pub struct JsonLinesSink<W: Write + Send + 'static = File> {
    writer: BufWriter<W>
}

impl JsonLinesSink<File> {
    /// Opens `path` for appending, creating it when missing. Existing lines are kept.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SinkError> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| SinkError::Open { path: path.display().to_string(), source })?;

        debug!("Appending records to [{}]", path.display());
        Ok(Self::from_writer(file))
    }
}

impl<W: Write + Send + 'static> JsonLinesSink<W> {
    pub fn from_writer(writer: W) -> Self {
        Self { writer: BufWriter::new(writer) }
    }

    pub fn into_inner(self) -> Result<W, SinkError> {
        self.writer.into_inner().map_err(|error| SinkError::Io(error.into_error()))
    }

    fn write_line(&mut self, record: &FlatRecord) -> Result<(), SinkError> {
        //NOTE: A record reaches the writer only once it has fully serialized
        let line = record.to_json_line()?;
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }
}

impl<W: Write + Send + 'static> RecordSink for JsonLinesSink<W> {
    fn append(&mut self, records: &[FlatRecord]) -> Result<usize, SinkError> {
        for (written, record) in records.iter().enumerate() {
            self.write_line(record).map_err(|source| SinkError::partial(written, source))?;
        }

        Ok(records.len())
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        self.writer.flush()?;
        Ok(())
    }
}

mod errors;
mod json_lines;

use crate::models::FlatRecord;

pub use errors::SinkError;
pub use json_lines::JsonLinesSink;

/// Destination for finished rows. Every `append` is followed by a `flush` before the next batch.
pub trait RecordSink: Send + 'static {
    /// Writes the batch in order and returns how many rows were written. A failure partway through
    /// reports the rows already written through `SinkError::written`.
    fn append(&mut self, records: &[FlatRecord]) -> Result<usize, SinkError>;
    fn flush(&mut self) -> Result<(), SinkError>;
}

use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Unable to open sink at [{path}]: {source}")]
    Open {
        path: String,
        #[source]
        source: io::Error
    },
    #[error("Unable to write to sink: {0}")]
    Io(#[from] io::Error),
    #[error("Unable to serialize record: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("Batch stopped after [{written}] records: {source}")]
    Partial {
        written: usize,
        #[source]
        source: Box<SinkError>
    }
}

impl SinkError {
    pub fn partial(written: usize, source: SinkError) -> Self {
        Self::Partial { written, source: Box::new(source) }
    }

    /// Rows of the failed batch that reached the writer before the failure.
    pub fn written(&self) -> usize {
        match self {
            Self::Partial { written, .. } => *written,
            _ => 0
        }
    }
}

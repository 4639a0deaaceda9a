use crate::stream::StreamError;
use prost::DecodeError;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecordFileError {
    #[error("Unable to access record file [{path}]: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error
    },
    #[error("Record format version [{found}] in [{filename}] does not match expected version [{expected}]")]
    RecordFormatVersion {
        filename: String,
        found: i32,
        expected: i32
    },
    #[error("Record file [{0}] ends before its version word")]
    Truncated(String),
    #[error("Malformed object stream in [{filename}]: {source}")]
    Stream {
        filename: String,
        #[source]
        source: StreamError
    },
    #[error("Unable to decode record stream file [{filename}]: {source}")]
    Decode {
        filename: String,
        #[source]
        source: DecodeError
    }
}

impl RecordFileError {
    pub fn io(path: impl Into<String>, source: io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    pub fn stream(filename: &str, source: StreamError) -> Self {
        Self::Stream { filename: filename.to_string(), source }
    }
}

use prost::DecodeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Validation failed for [{context}]: field [{field}] is required")]
    Validation {
        context: &'static str,
        field: &'static str
    },
    #[error("Missing attribute [{0}] on transaction record")]
    MissingAttribute(&'static str),
    #[error("Unable to parse transaction item: {0}")]
    ParseItem(String),
    #[error("Unable to parse transaction record: {0}")]
    ParseRecord(String),
    #[error("Unable to reclassify token transaction: {0}")]
    Reclassify(String),
    #[error("Unable to add transaction metadata: {0}")]
    Metadata(String),
    #[error("Unable to create timestamp from seconds [{seconds}] and nanos [{nanos:?}]")]
    Timestamp {
        seconds: i64,
        nanos: Option<i64>
    },
    #[error("Signature pair [{0}] does not carry a signature")]
    SignKeys(usize),
    #[error("Unexpected error in transaction pipeline: {0}")]
    Unexpected(String)
}

impl ParseError {
    pub fn validation(context: &'static str, field: &'static str) -> Self {
        Self::Validation { context, field }
    }

    pub fn item_decode(error: DecodeError) -> Self {
        Self::ParseItem(error.to_string())
    }

    pub fn record_decode(error: DecodeError) -> Self {
        Self::ParseRecord(error.to_string())
    }

    pub fn timestamp(seconds: i64, nanos: Option<i64>) -> Self {
        Self::Timestamp { seconds, nanos }
    }

    /// Whether the failure is confined to the one transaction that raised it.
    ///
    /// Recoverable errors are logged and the transaction skipped. Anything else aborts the chunk.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Unexpected(_))
    }
}

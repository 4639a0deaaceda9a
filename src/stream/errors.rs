use thiserror::Error;

#[derive(Debug, Error)]
pub enum StreamError {
    #[error("Unexpected end of stream at position [{position}], wanted [{wanted}] bytes but only [{available}] remain")]
    UnexpectedEof {
        position: usize,
        wanted: usize,
        available: usize
    },
    #[error("Checksum mismatch for array of length [{length}], expected [{expected}] but read [{actual}]")]
    ChecksumMismatch {
        length: i32,
        expected: i64,
        actual: i32
    },
    #[error("Array of length [{length}] exceeds the maximum of [{max}]")]
    LengthExceeded {
        length: usize,
        max: usize
    },
    #[error("Negative length [{0}] is not allowed here")]
    NegativeLength(i32),
    #[error("Instant nanos [{0}] is not within [0, 999999999]")]
    InvalidInstant(i64),
    #[error("Invalid version [{version}] for class [{class}], supported versions are 1..={max}")]
    InvalidVersion {
        class: &'static str,
        version: i32,
        max: i32
    },
    #[error("List of length [{length}] exceeds the maximum of [{max}]")]
    ListTooLarge {
        length: i32,
        max: usize
    },
    #[error("Class ID [{0:#018x}] is not registered")]
    UnknownClassId(u64),
    #[error("Expected class [{expected}] but found [{found}]")]
    ClassMismatch {
        expected: &'static str,
        found: &'static str
    },
    #[error("No class ID was read and no constructor was supplied")]
    MissingConstructor,
    #[error("Digest type [{0}] is not supported")]
    UnknownDigestType(i32),
    #[error("Signature type [{0}] is not supported")]
    UnknownSignatureType(i32),
    #[error("Hash value is an array of zeroes")]
    EmptyHash,
    #[error("Required object [{0}] was absent from the stream")]
    MissingObject(&'static str),
    #[error("String is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error)
}

impl StreamError {
    pub fn checksum_mismatch(length: i32, constant: i32, actual: i32) -> Self {
        Self::ChecksumMismatch { length, expected: expected_checksum(length, constant), actual }
    }

    pub fn length_exceeded(length: usize, max: usize) -> Self {
        Self::LengthExceeded { length, max }
    }
}

/// `constant - length`, widened so that no length word can overflow it.
pub(crate) fn expected_checksum(length: i32, constant: i32) -> i64 {
    i64::from(constant) - i64::from(length)
}

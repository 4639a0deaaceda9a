mod errors;
mod legacy;
mod modern;

use std::fmt::{Display, Formatter};
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::{fmt, io};

use byteorder::{BigEndian, ByteOrder};
use flate2::read::GzDecoder;
use tracing::debug;

use crate::proto::{SignatureMap, TransactionBody, TransactionRecord};

pub use errors::RecordFileError;
pub use legacy::{read_legacy_file, read_legacy_records, RECORD_FORMAT_VERSION};
pub use modern::{read_modern_file, read_modern_records, RECORD_STREAM_VERSION};

/// Suffix of the empty marker file written beside every record file that has been read.
pub const PROCESSED_SUFFIX: &str = "_processed";

/// One transaction as read from a record file, not yet flattened.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTransactionEntry {
    pub filename: String,
    pub payload: TransactionPayload
}

#[derive(Debug, Clone, PartialEq)]
pub enum TransactionPayload {
    /// Still encoded `Transaction` and `TransactionRecord` blobs from a version 5 file.
    Legacy {
        transaction: Vec<u8>,
        record: Vec<u8>
    },
    /// Decoded body and record from a version 6 file, with the signatures of the envelope.
    Modern {
        body: Box<TransactionBody>,
        record: Box<TransactionRecord>,
        signatures: Option<SignatureMap>
    }
}

/// Format of a record file: the framed object stream, or a protobuf container with the version
/// word it was written under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordVersion {
    Legacy,
    Modern(i32)
}

impl Display for RecordVersion {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Legacy => write!(formatter, "v{RECORD_FORMAT_VERSION}"),
            Self::Modern(version) => write!(formatter, "v{version}")
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadedFile {
    pub entries: Vec<RawTransactionEntry>,
    pub version: RecordVersion
}

/// Reads every transaction of one record file.
///
/// Gzipped files are always protobuf containers: they are expanded beside the original
/// (`x.rcd.gz` to `x.rcd`) and read from there. Uncompressed files are sniffed by their first word.
pub fn load_txns(path: &Path) -> Result<LoadedFile, RecordFileError> {
    let filename = path.to_string_lossy().into_owned();

    if path.extension().is_some_and(|extension| extension == "gz") {
        let rcd_path = path.with_extension("");
        gunzip(path, &rcd_path)?;

        return read_modern_file(&rcd_path, &filename);
    }

    let bytes = fs::read(path).map_err(|error| RecordFileError::io(filename.as_str(), error))?;

    if bytes.len() >= 4 && BigEndian::read_i32(&bytes[..4]) == RECORD_STREAM_VERSION {
        return read_modern_records(&bytes, &filename);
    }

    let entries = read_legacy_records(&bytes, &filename)?;
    Ok(LoadedFile { entries, version: RecordVersion::Legacy })
}

/// Touches `<path>_processed`.
pub fn mark_processed(path: &Path) -> io::Result<()> {
    OpenOptions::new().create(true).append(true).open(processed_marker(path))?;
    Ok(())
}

pub fn processed_marker(path: &Path) -> PathBuf {
    let mut marker = path.as_os_str().to_owned();
    marker.push(PROCESSED_SUFFIX);
    PathBuf::from(marker)
}

fn gunzip(source: &Path, destination: &Path) -> Result<(), RecordFileError> {
    let input = File::open(source).map_err(|error| RecordFileError::io(source.to_string_lossy(), error))?;
    let mut output = File::create(destination).map_err(|error| RecordFileError::io(destination.to_string_lossy(), error))?;

    let copied = io::copy(&mut GzDecoder::new(input), &mut output)
        .map_err(|error| RecordFileError::io(source.to_string_lossy(), error))?;

    debug!("Expanded [{}] into [{}] bytes at [{}]", source.display(), copied, destination.display());
    Ok(())
}

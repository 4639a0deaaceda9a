use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::records::{RawTransactionEntry, RecordFileError, TransactionPayload};
use crate::serializable::StreamObject;
use crate::stream::{ByteStream, StreamError};

pub const RECORD_FORMAT_VERSION: i32 = 5;

pub fn read_legacy_file(path: &Path) -> Result<Vec<RawTransactionEntry>, RecordFileError> {
    let filename = path.to_string_lossy();
    let bytes = fs::read(path).map_err(|error| RecordFileError::io(filename.to_string(), error))?;

    read_legacy_records(&bytes, &filename)
}

/// Walks a version 5 object stream and keeps every record stream object in file order.
///
/// Running hashes and any other registered objects between records are decoded and dropped.
/// The version gate runs before a single object is read.
pub fn read_legacy_records(bytes: &[u8], filename: &str) -> Result<Vec<RawTransactionEntry>, RecordFileError> {
    let mut stream = ByteStream::new(bytes);
    check_version(&mut stream, filename)?;

    let mut entries = Vec::new();

    while stream.available() {
        let object = stream
            .read_serializable(true, None)
            .map_err(|source| RecordFileError::stream(filename, source))?;

        if let Some(StreamObject::RecordStreamObject(object)) = object {
            entries.push(RawTransactionEntry {
                filename: filename.to_string(),
                payload: TransactionPayload::Legacy {
                    transaction: object.transaction,
                    record: object.transaction_record
                }
            });
        }
    }

    debug!("Read [{}] legacy transactions from [{filename}]", entries.len());
    Ok(entries)
}

fn check_version(stream: &mut ByteStream<'_>, filename: &str) -> Result<(), RecordFileError> {
    let found = stream
        .read_i32()
        .map_err(|_| RecordFileError::Truncated(filename.to_string()))?;

    if found != RECORD_FORMAT_VERSION {
        return Err(RecordFileError::RecordFormatVersion {
            filename: filename.to_string(),
            found,
            expected: RECORD_FORMAT_VERSION
        });
    }

    //NOTE: The informational header words never fail the file.
    match read_hapi_version(stream) {
        Ok((major, minor, patch)) => debug!("HAPI proto version [{major}.{minor}.{patch}] in [{filename}]"),
        Err(error) => warn!("Unable to read HAPI proto version in [{filename}]: {error}")
    }

    match stream.read_i32() {
        Ok(version) => debug!("Object stream version [{version}] in [{filename}]"),
        Err(error) => warn!("Unable to read object stream version in [{filename}]: {error}")
    }

    Ok(())
}

fn read_hapi_version(stream: &mut ByteStream<'_>) -> Result<(i32, i32, i32), StreamError> {
    Ok((stream.read_i32()?, stream.read_i32()?, stream.read_i32()?))
}

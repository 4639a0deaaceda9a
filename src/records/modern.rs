use std::fs;
use std::path::Path;

use byteorder::{BigEndian, ByteOrder};
use prost::Message;
use tracing::{debug, warn};

use crate::proto::{RecordStreamFile, RecordStreamItem, SignedTransaction, TransactionBody};
use crate::records::{mark_processed, LoadedFile, RawTransactionEntry, RecordFileError, RecordVersion, TransactionPayload};

/// Leading word that marks an uncompressed file as a protobuf record stream.
pub const RECORD_STREAM_VERSION: i32 = 6;

const VERSION_WORD_LENGTH: usize = 4;

/// Reads an uncompressed protobuf record file. Entries are attributed to `source_name`, the file
/// the caller was handed, which for compressed inputs is not the file on disk.
pub fn read_modern_file(path: &Path, source_name: &str) -> Result<LoadedFile, RecordFileError> {
    let bytes = fs::read(path).map_err(|error| RecordFileError::io(path.to_string_lossy(), error))?;

    if bytes.len() >= VERSION_WORD_LENGTH {
        mark_processed(path).map_err(|error| RecordFileError::io(path.to_string_lossy(), error))?;
    }

    read_modern_records(&bytes, source_name)
}

/// Decodes a version word followed by a single `RecordStreamFile` message.
///
/// The version word only tags the result; the message is decoded whatever its value.
pub fn read_modern_records(bytes: &[u8], filename: &str) -> Result<LoadedFile, RecordFileError> {
    if bytes.len() < VERSION_WORD_LENGTH {
        return Err(RecordFileError::Truncated(filename.to_string()));
    }

    let (version_word, message) = bytes.split_at(VERSION_WORD_LENGTH);
    let version = BigEndian::read_i32(version_word);

    if version != RECORD_STREAM_VERSION {
        debug!("Record stream version [{version}] in [{filename}]");
    }

    let file = RecordStreamFile::decode(message).map_err(|source| RecordFileError::Decode {
        filename: filename.to_string(),
        source
    })?;

    let total = file.record_stream_items.len();
    let entries: Vec<_> = file
        .record_stream_items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match into_entry(item, filename) {
            Ok(entry) => Some(entry),
            Err(reason) => {
                warn!("Skipping record stream item [{index}] in [{filename}]: {reason}");
                None
            }
        })
        .collect();

    debug!("Read [{}] of [{total}] record stream items from [{filename}]", entries.len());
    Ok(LoadedFile { entries, version: RecordVersion::Modern(version) })
}

fn into_entry(item: RecordStreamItem, filename: &str) -> Result<RawTransactionEntry, String> {
    let transaction = item.transaction.ok_or("item carries no transaction")?;
    let record = item.record.ok_or("item carries no record")?;

    let (body_bytes, signatures) = if transaction.signed_transaction_bytes.is_empty() {
        (transaction.body_bytes, transaction.sig_map)
    } else {
        let signed = SignedTransaction::decode(transaction.signed_transaction_bytes.as_slice())
            .map_err(|error| format!("signed transaction does not decode: {error}"))?;
        (signed.body_bytes, signed.sig_map)
    };

    let body = TransactionBody::decode(body_bytes.as_slice())
        .map_err(|error| format!("transaction body does not decode: {error}"))?;

    Ok(RawTransactionEntry {
        filename: filename.to_string(),
        payload: TransactionPayload::Modern {
            body: Box::new(body),
            record: Box::new(record),
            signatures
        }
    })
}

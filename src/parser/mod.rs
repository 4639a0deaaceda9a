mod body;
mod enrich;
mod errors;
mod flatten;
mod record;
#[cfg(test)]
mod tests;

use prost::Message;
use tracing::{error, warn};

use crate::models::{FieldValue, FlatRecord};
use crate::proto::{SignatureMap, SignedTransaction, Transaction, TransactionBody, TransactionRecord};
use crate::records::{RawTransactionEntry, TransactionPayload};

pub use body::parse_transaction_body;
pub use enrich::{add_txn_metadata, create_ts, reclassify_token_txns};
pub use errors::ParseError;
pub use record::parse_transaction_record;

/// Records decoded from one chunk, plus the number of transactions skipped on the way.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ChunkOutcome {
    pub records: Vec<FlatRecord>,
    pub skipped: usize
}

/// Names the signature kind of every pair in a signature map, in order.
pub fn parse_sign_keys(signatures: &SignatureMap) -> Result<Vec<String>, ParseError> {
    signatures
        .sig_pair
        .iter()
        .enumerate()
        .map(|(index, pair)| {
            pair.signature
                .as_ref()
                .map(|signature| signature.field_name().to_string())
                .ok_or(ParseError::SignKeys(index))
        })
        .collect()
}

/// Runs one raw entry through record and body decoding, reclassification and metadata, and
/// returns the finished row with every byte field hex encoded.
pub fn parse_transaction(entry: &RawTransactionEntry, processed: &str) -> Result<FlatRecord, ParseError> {
    let mut output = match &entry.payload {
        TransactionPayload::Legacy { transaction, record } => {
            let body = decode_legacy_body(transaction)?;
            let record = TransactionRecord::decode(record.as_slice()).map_err(ParseError::record_decode)?;

            let mut output = parse_transaction_record(&record)?;
            output.merge(parse_transaction_body(&body)?);
            output
        }
        TransactionPayload::Modern { body, record, signatures } => {
            let mut output = parse_transaction_record(record)?;
            output.merge(parse_transaction_body(body)?);

            if let Some(signatures) = signatures {
                output.insert("txn_sign_keys", FieldValue::list(parse_sign_keys(signatures)?));
            }
            output
        }
    };

    if output.txn_type().is_none() {
        return Err(ParseError::Unexpected(format!("transaction from [{}] was flattened without a txn_type", entry.filename)));
    }

    reclassify_token_txns(&mut output)?;
    add_txn_metadata(&mut output, processed, &entry.filename)?;
    output.hex_encode_bytes();

    Ok(output)
}

/// Decodes the body of a legacy transaction blob, unwrapping the signed envelope when present.
fn decode_legacy_body(bytes: &[u8]) -> Result<TransactionBody, ParseError> {
    let transaction = Transaction::decode(bytes).map_err(ParseError::item_decode)?;

    let body_bytes = if transaction.signed_transaction_bytes.is_empty() {
        transaction.body_bytes
    } else {
        SignedTransaction::decode(transaction.signed_transaction_bytes.as_slice())
            .map_err(ParseError::item_decode)?
            .body_bytes
    };

    TransactionBody::decode(body_bytes.as_slice()).map_err(ParseError::item_decode)
}

/// Decodes a chunk of raw entries in order.
///
/// A recoverable failure skips only the transaction that raised it. Any other failure aborts the
/// rest of the chunk and is returned, losing the records already decoded from it.
pub fn parse_chunk(chunk: &[RawTransactionEntry], processed: &str) -> Result<ChunkOutcome, ParseError> {
    let mut outcome = ChunkOutcome::default();

    for entry in chunk {
        match parse_transaction(entry, processed) {
            Ok(record) => outcome.records.push(record),
            Err(parse_error) if parse_error.is_recoverable() => {
                warn!("Skipping transaction in [{}]: {parse_error}", entry.filename);
                outcome.skipped += 1;
            }
            Err(parse_error) => {
                error!("Aborting chunk at transaction in [{}]: {parse_error}", entry.filename);
                return Err(parse_error);
            }
        }
    }

    Ok(outcome)
}

use std::path::Path;

use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{FlatRecord, TxnType};
use crate::parser::ParseError;
use crate::proto::TOKEN_TYPE_NON_FUNGIBLE_UNIQUE;
use crate::stream::MAX_NANOS;

const NANOS_PER_MILLI: i64 = 1_000_000;

/// Splits token operations into their fungible and non fungible forms.
///
/// Token and NFT operations share one body shape, so the tag is decided by what the record
/// carries: NFT serials, fungible token transfers, or a non fungible token type.
pub fn reclassify_token_txns(record: &mut FlatRecord) -> Result<(), ParseError> {
    let current = record.txn_type().ok_or_else(|| ParseError::Reclassify("record carries no txn_type".to_string()))?;
    let mut txn_type = current.parse::<TxnType>().map_err(ParseError::Reclassify)?;

    if record.contains_key("nft_serial_number_1") {
        txn_type = match txn_type {
            TxnType::CryptoTransfer => TxnType::NftTransfer,
            TxnType::TokenWipe => TxnType::NftWipe,
            TxnType::TokenBurn => TxnType::NftBurn,
            TxnType::TokenMint => TxnType::NftMint,
            other => other
        };
    }

    if record.contains_key("nft_serial_numbers") && txn_type == TxnType::TokenMint {
        txn_type = TxnType::NftMint;
    }

    if record.contains_key("token_transfer_amount_1") && txn_type == TxnType::CryptoTransfer {
        txn_type = TxnType::TokenTransfers;
    }

    if record.get_i64("token_type") == Some(i64::from(TOKEN_TYPE_NON_FUNGIBLE_UNIQUE)) {
        txn_type = TxnType::NftCreation;
    }

    record.set_txn_type(txn_type);
    Ok(())
}

/// Stamps the batch timestamp, source file and the three reconstructed timestamps onto a record.
pub fn add_txn_metadata(record: &mut FlatRecord, processed: &str, filename: &str) -> Result<(), ParseError> {
    let basename = Path::new(filename).file_name().and_then(|name| name.to_str()).unwrap_or(filename);

    record.insert("@processed", processed);
    record.insert("rcd_filename", basename);
    record.insert("msg", "transaction");

    let body_timestamp = timestamp_from(record, "body.transactionValidStart")?;
    let record_timestamp = timestamp_from(record, "record.transactionValidStart")?;
    let consensus_timestamp = timestamp_from(record, "record.consensusTimestamp")?;

    record.insert("body.@timestamp", body_timestamp);
    record.insert("record.@timestamp", record_timestamp);
    record.insert("consensusTimestamp", consensus_timestamp);
    Ok(())
}

fn timestamp_from(record: &FlatRecord, prefix: &str) -> Result<String, ParseError> {
    let seconds_key = format!("{prefix}.seconds");
    let seconds = record.get_i64(&seconds_key).ok_or_else(|| ParseError::Metadata(format!("field [{seconds_key}] is missing")))?;
    create_ts(seconds, record.get_i64(&format!("{prefix}.nanos")))
}

/// Renders epoch seconds and nanos as `YYYY-MM-DDTHH:MM:SS.<ms>Z`.
///
/// Milliseconds are `nanos / 10^6` rounded half to even and printed without padding, so
/// 19_767_741 nanos gives `.20` and zero gives `.0`. Absent nanos give `.000`.
pub fn create_ts(seconds: i64, nanos: Option<i64>) -> Result<String, ParseError> {
    let datetime = DateTime::<Utc>::from_timestamp(seconds, 0).ok_or_else(|| ParseError::timestamp(seconds, nanos))?;
    let whole_seconds = datetime.format("%Y-%m-%dT%H:%M:%S");

    let Some(nanos) = nanos else {
        return Ok(format!("{whole_seconds}.000Z"));
    };

    if !(0..=MAX_NANOS).contains(&nanos) {
        return Err(ParseError::timestamp(seconds, Some(nanos)));
    }

    let millis = (Decimal::from(nanos) / Decimal::from(NANOS_PER_MILLI))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven)
        .to_i64()
        .ok_or_else(|| ParseError::timestamp(seconds, Some(nanos)))?;

    Ok(format!("{whole_seconds}.{millis}Z"))
}

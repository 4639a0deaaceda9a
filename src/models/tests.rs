use super::{FieldValue, FlatRecord, TxnType};

use std::str::FromStr;

use anyhow::Result;
use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde_json::json;

#[test]
fn test_merge_later_record_wins_and_keeps_first_position() {
    let mut record = FlatRecord::new()
        .with("status", "22")
        .with("token_number", "0")
        .with("record.memo", "");

    record.merge(FlatRecord::new().with("token_number", "1001").with("txn_type", "TOKENMINT"));

    let keys: Vec<&str> = record.iter().map(|(key, _)| key.as_str()).collect();

    assert_eq!(keys, vec!["status", "token_number", "record.memo", "txn_type"]);
    assert_eq!(record.get("token_number"), Some(&FieldValue::from("1001")));
    assert_eq!(record.txn_type(), Some("TOKENMINT"));
}

#[test]
fn test_hex_encode_bytes_reaches_nested_values() {
    let mut nested = IndexMap::new();
    nested.insert("ed25519".to_string(), FieldValue::bytes(vec![0xab, 0xcd]));

    let mut record = FlatRecord::new()
        .with("record.transactionHash", FieldValue::bytes(vec![0x01, 0xff]))
        .with("token_mint_metadata", FieldValue::List(vec![FieldValue::bytes(b"a".to_vec())]))
        .with("admin_key", nested);

    record.hex_encode_bytes();

    assert_eq!(record.get("record.transactionHash"), Some(&FieldValue::from("01ff")));
    assert_eq!(record.get("token_mint_metadata"), Some(&FieldValue::List(vec![FieldValue::from("61")])));

    match record.get("admin_key") {
        Some(FieldValue::Map(entries)) => assert_eq!(entries.get("ed25519"), Some(&FieldValue::from("abcd"))),
        other => panic!("expected a map, got {other:?}")
    }
}

#[test]
fn test_flat_record_serializes_in_insertion_order() -> Result<()> {
    let record = FlatRecord::new()
        .with("txn_type", "NODESTAKEUPDATE")
        .with("scheduled", false)
        .with("body.transactionFee", 100_000u64)
        .with("nonce", 0i32)
        .with("node_stake_max_stake", FieldValue::list([Decimal::from_str("1")?, Decimal::from_str("0.5")?]))
        .with("record.transactionHash", FieldValue::bytes(vec![0xde, 0xad]));

    let line = record.to_json_line()?;

    assert_eq!(
        line,
        r#"{"txn_type":"NODESTAKEUPDATE","scheduled":false,"body.transactionFee":100000,"nonce":0,"node_stake_max_stake":[1,0.5],"record.transactionHash":"dead"}"#
    );

    let value: serde_json::Value = serde_json::from_str(&line)?;
    assert_eq!(value["node_stake_max_stake"], json!([1, 0.5]));

    Ok(())
}

#[test]
fn test_txn_type_round_trips_through_its_tag() -> Result<()> {
    for txn_type in TxnType::ALL {
        assert_eq!(TxnType::from_str(txn_type.as_str()).map_err(anyhow::Error::msg)?, *txn_type);
    }

    assert!(TxnType::from_str("NOTATYPE").is_err());
    assert_eq!(TxnType::NftCreation.to_string(), "NFTCREATION");

    Ok(())
}

#[test]
fn test_get_i64_accepts_signed_and_unsigned_values() {
    let record = FlatRecord::new()
        .with("seconds", 1_665_705_830i64)
        .with("fee", 5u64)
        .with("huge", u64::MAX)
        .with("text", "1");

    assert_eq!(record.get_i64("seconds"), Some(1_665_705_830));
    assert_eq!(record.get_i64("fee"), Some(5));
    assert_eq!(record.get_i64("huge"), None);
    assert_eq!(record.get_i64("text"), None);
    assert_eq!(record.get_i64("missing"), None);
}

use super::*;
use crate::models::{FieldValue, TxnType};
use crate::proto::{
    contract_id, signature_pair, transaction_body, transaction_record, AccountAmount, AccountId,
    ConsensusCreateTopicTransactionBody, ConsensusSubmitMessageTransactionBody, ContractFunctionResult, ContractId,
    ContractLogInfo, CryptoTransferTransactionBody, NftTransfer, NodeStake, NodeStakeUpdateTransactionBody,
    SignaturePair, Timestamp, TokenAssociateTransactionBody, TokenId, TokenTransferList, TransactionId,
    TransactionReceipt, TransferList
};
use crate::records::{RawTransactionEntry, TransactionPayload};
use anyhow::{anyhow, Result};
use rust_decimal::Decimal;
use std::str::FromStr;

const PROCESSED: &str = "2022-10-14T00:05:00.000000Z";

fn transaction_id() -> TransactionId {
    TransactionId {
        transaction_valid_start: Some(Timestamp { seconds: 1_665_619_446, nanos: 943_094_539 }),
        account_id: Some(AccountId::with_num(48_461_821)),
        ..Default::default()
    }
}

fn body_with(data: Option<transaction_body::Data>) -> TransactionBody {
    TransactionBody {
        transaction_id: Some(transaction_id()),
        node_account_id: Some(AccountId::with_num(5)),
        transaction_fee: 200_000_000,
        transaction_valid_duration: Some(crate::proto::Duration { seconds: 120 }),
        memo: "VC creation message".to_string(),
        data
    }
}

fn record_with(receipt: TransactionReceipt) -> TransactionRecord {
    TransactionRecord {
        receipt: Some(receipt),
        transaction_hash: vec![0xAB, 0xCD],
        consensus_timestamp: Some(Timestamp { seconds: 1_665_705_830, nanos: 19_767_741 }),
        transaction_id: Some(transaction_id()),
        transaction_fee: 91_000,
        ..Default::default()
    }
}

fn success_receipt() -> TransactionReceipt {
    TransactionReceipt { status: 22, ..Default::default() }
}

fn modern_entry(body: TransactionBody, record: TransactionRecord, signatures: Option<SignatureMap>) -> RawTransactionEntry {
    RawTransactionEntry {
        filename: "/data/recordstreams/record0.0.3/2022-10-14T00_03_50.019767741Z.rcd.gz".to_string(),
        payload: TransactionPayload::Modern { body: Box::new(body), record: Box::new(record), signatures }
    }
}

fn account_amount(account: i64, amount: i64) -> AccountAmount {
    AccountAmount { account_id: Some(AccountId::with_num(account)), amount, is_approval: false }
}

fn token(number: i64) -> TokenId {
    TokenId { token_num: number, ..Default::default() }
}

#[test]
fn test_create_ts_rounds_nanos_to_unpadded_millis() -> Result<()> {
    assert_eq!(create_ts(1_665_705_830, Some(19_767_741))?, "2022-10-14T00:03:50.20Z");
    assert_eq!(create_ts(1_665_705_830, Some(0))?, "2022-10-14T00:03:50.0Z");
    assert_eq!(create_ts(1_665_705_830, None)?, "2022-10-14T00:03:50.000Z");
    assert_eq!(create_ts(1_665_705_830, Some(2_500_000))?, "2022-10-14T00:03:50.2Z");
    assert_eq!(create_ts(1_665_705_830, Some(3_500_000))?, "2022-10-14T00:03:50.4Z");

    Ok(())
}

#[test]
fn test_create_ts_rejects_out_of_range_values() {
    assert!(matches!(create_ts(0, Some(-1)), Err(ParseError::Timestamp { .. })));
    assert!(matches!(create_ts(0, Some(1_000_000_000)), Err(ParseError::Timestamp { .. })));
    assert!(matches!(create_ts(i64::MAX, Some(0)), Err(ParseError::Timestamp { .. })));
}

#[test]
fn test_body_with_single_operation_gets_its_tag() -> Result<()> {
    let body = body_with(Some(transaction_body::Data::ConsensusCreateTopic(ConsensusCreateTopicTransactionBody {
        memo: "memo".to_string()
    })));

    let expected = FlatRecord::new()
        .with("body.transactionValidStart.seconds", 1_665_619_446_i64)
        .with("body.transactionValidStart.nanos", 943_094_539)
        .with("body.accountID.accountNum", "48461821")
        .with("body.nodeAccountID.accountNum", "5")
        .with("scheduled", false)
        .with("body.transactionFee", 200_000_000_u64)
        .with("body.transactionValidDuration.seconds", 120_i64)
        .with("nonce", 0)
        .with("consensus_create_memo", "memo")
        .with("txn_type", "CONSENSUSCREATETOPIC");

    assert_eq!(parse_transaction_body(&body)?, expected);

    Ok(())
}

#[test]
fn test_body_without_operation_is_other() -> Result<()> {
    let output = parse_transaction_body(&body_with(None))?;

    assert_eq!(output.txn_type(), Some("OTHER"));
    assert_eq!(output.len(), 9);

    Ok(())
}

#[test]
fn test_body_validation_failures() {
    let missing_topic = body_with(Some(transaction_body::Data::ConsensusSubmitMessage(
        ConsensusSubmitMessageTransactionBody { topic_id: None, message: b"message".to_vec() }
    )));
    let missing_id = TransactionBody { transaction_id: None, ..body_with(None) };

    assert!(matches!(
        parse_transaction_body(&missing_topic),
        Err(ParseError::Validation { context: "consensusSubmitMessage", field: "topicID" })
    ));
    assert!(matches!(parse_transaction_body(&missing_id), Err(ParseError::Validation { field: "transactionID", .. })));
}

#[test]
fn test_crypto_transfer_explodes_amounts_from_one() -> Result<()> {
    let body = body_with(Some(transaction_body::Data::CryptoTransfer(CryptoTransferTransactionBody {
        transfers: Some(TransferList { account_amounts: vec![account_amount(1, -1), account_amount(0, 1)] }),
        token_transfers: Vec::new()
    })));

    let output = parse_transaction_body(&body)?;
    let exploded: Vec<_> = output.iter().skip(8).map(|(key, _)| key.as_str()).collect();

    assert_eq!(exploded, vec!["body.accountNum.1", "body.accountNum.2", "body.amount.1", "body.amount.2", "txn_type"]);
    assert_eq!(output.get("body.accountNum.1"), Some(&FieldValue::from("1")));
    assert_eq!(output.get_i64("body.amount.1"), Some(-1));
    assert_eq!(output.get_i64("body.amount.2"), Some(1));

    Ok(())
}

#[test]
fn test_token_associate_numbers_every_token() -> Result<()> {
    let body = body_with(Some(transaction_body::Data::TokenAssociate(TokenAssociateTransactionBody {
        account: Some(AccountId::with_num(77)),
        tokens: vec![token(10), token(11), token(12)]
    })));

    let output = parse_transaction_body(&body)?;

    assert_eq!(output.get("token_account_number"), Some(&FieldValue::from("77")));
    assert_eq!(output.get("token_number"), Some(&FieldValue::from("10")));
    assert_eq!(output.get("token_number2"), Some(&FieldValue::from("11")));
    assert_eq!(output.get("token_number3"), Some(&FieldValue::from("12")));
    assert_eq!(output.txn_type(), Some("TOKENASSOCIATE"));

    Ok(())
}

#[test]
fn test_node_stake_update_builds_per_metric_lists() -> Result<()> {
    let stake = |node_id, max_stake| NodeStake {
        max_stake,
        min_stake: 0,
        node_id,
        reward_rate: 17_808,
        stake: 0,
        stake_not_rewarded: 1_000_020,
        stake_rewarded: 0
    };
    let body = body_with(Some(transaction_body::Data::NodeStakeUpdate(NodeStakeUpdateTransactionBody {
        end_of_staking_period: None,
        node_stake: vec![stake(0, 100_000_000), stake(6, 45_000_000_000_000_000)]
    })));

    let output = parse_transaction_body(&body)?;

    assert_eq!(output.get("node_stake_account"), Some(&FieldValue::list(["0.0.3", "0.0.9"])));
    assert_eq!(output.get("node_stake_id"), Some(&FieldValue::list([0_i64, 6])));
    assert_eq!(output.get("node_stake_reward_rate"), Some(&FieldValue::list([17_808_i64, 17_808])));
    assert_eq!(
        output.get("node_stake_max_stake"),
        Some(&FieldValue::list([Decimal::from(1), Decimal::from(450_000_000)]))
    );
    assert_eq!(
        output.get("node_stake_not_rewarded"),
        Some(&FieldValue::list([Decimal::from_str("0.0100002")?, Decimal::from_str("0.0100002")?]))
    );

    let overflowing = body_with(Some(transaction_body::Data::NodeStakeUpdate(NodeStakeUpdateTransactionBody {
        end_of_staking_period: None,
        node_stake: vec![stake(i64::MAX, 0)]
    })));
    assert!(matches!(parse_transaction_body(&overflowing), Err(ParseError::ParseItem(_))));

    Ok(())
}

#[test]
fn test_record_defaults_absent_receipt_ids_to_zero() -> Result<()> {
    let output = parse_transaction_record(&record_with(success_receipt()))?;

    assert_eq!(output.get("status"), Some(&FieldValue::from("22")));
    assert_eq!(output.get("record.transactionHash"), Some(&FieldValue::bytes(vec![0xAB, 0xCD])));
    for key in ["created_account", "schedule_id", "token_number", "file_id", "consensus_create_topicID"] {
        assert_eq!(output.get(key), Some(&FieldValue::from("0")), "{key}");
    }
    assert!(!output.contains_key("record.accountNum.1"));

    let no_receipt = TransactionRecord { receipt: None, ..record_with(success_receipt()) };
    assert!(matches!(parse_transaction_record(&no_receipt), Err(ParseError::MissingAttribute("receipt"))));

    Ok(())
}

#[test]
fn test_record_token_transfers_number_across_lists() -> Result<()> {
    let record = TransactionRecord {
        receipt: Some(TransactionReceipt { serial_numbers: vec![3, 4], ..success_receipt() }),
        token_transfer_lists: vec![
            TokenTransferList {
                token: Some(token(100)),
                transfers: vec![account_amount(1, -5), account_amount(2, 5)],
                nft_transfers: Vec::new()
            },
            TokenTransferList {
                token: Some(token(200)),
                transfers: Vec::new(),
                nft_transfers: vec![NftTransfer {
                    sender_account_id: None,
                    receiver_account_id: Some(AccountId::with_num(9)),
                    serial_number: 3,
                    is_approval: false
                }]
            },
        ],
        ..record_with(success_receipt())
    };

    let output = parse_transaction_record(&record)?;

    assert_eq!(output.get("token_number"), Some(&FieldValue::from("100")));
    assert_eq!(output.get("token_transfer_account_2"), Some(&FieldValue::from("2")));
    assert_eq!(output.get_i64("token_transfer_amount_2"), Some(5));
    assert!(!output.contains_key("nft_sender_1"));
    assert_eq!(output.get("nft_receiver_1"), Some(&FieldValue::from("9")));
    assert_eq!(output.get_i64("nft_serial_number_1"), Some(3));
    assert_eq!(output.get("nft_serial_numbers"), Some(&FieldValue::list([3_i64, 4])));
    assert!(!output.contains_key("token_transfer_ambiguous"));

    Ok(())
}

#[test]
fn test_record_flags_ambiguous_token_lists() -> Result<()> {
    let record = TransactionRecord {
        token_transfer_lists: vec![TokenTransferList { token: Some(token(100)), ..Default::default() }],
        ..record_with(success_receipt())
    };

    let output = parse_transaction_record(&record)?;

    assert_eq!(output.get("token_transfer_ambiguous"), Some(&FieldValue::from(true)));

    Ok(())
}

#[test]
fn test_record_contract_logs_are_prefixed_by_count() -> Result<()> {
    let contract = ContractId { contract: Some(contract_id::Contract::ContractNum(1_001)), ..Default::default() };
    let log = |data: u8| ContractLogInfo {
        contract_id: Some(contract.clone()),
        bloom: Vec::new(),
        topic: vec![vec![0x01], vec![0x02]],
        data: vec![data]
    };
    let result = |logs: Vec<ContractLogInfo>| ContractFunctionResult {
        contract_id: Some(contract.clone()),
        gas_used: 21_000,
        log_info: logs,
        ..Default::default()
    };

    let single = TransactionRecord {
        body: Some(transaction_record::Body::ContractCallResult(result(vec![log(0xAA)]))),
        ..record_with(success_receipt())
    };
    let output = parse_transaction_record(&single)?;

    assert_eq!(output.get("record.contractID.contractNum"), Some(&FieldValue::from("1001")));
    assert_eq!(output.get("record.gasUsed"), Some(&FieldValue::from(21_000_u64)));
    assert_eq!(output.get("record.logInfo.topic.2"), Some(&FieldValue::bytes(vec![0x02])));
    assert_eq!(output.get("record.logInfo.data"), Some(&FieldValue::bytes(vec![0xAA])));
    assert!(!output.contains_key("record.bloom"));

    let multiple = TransactionRecord {
        body: Some(transaction_record::Body::ContractCreateResult(result(vec![log(0xAA), log(0xBB)]))),
        ..record_with(success_receipt())
    };
    let output = parse_transaction_record(&multiple)?;

    assert_eq!(output.get("record.logInfo.0.data"), Some(&FieldValue::bytes(vec![0xAA])));
    assert_eq!(output.get("record.logInfo.1.data"), Some(&FieldValue::bytes(vec![0xBB])));
    assert!(!output.contains_key("record.logInfo.data"));

    Ok(())
}

#[test]
fn test_reclassification_rules() -> Result<()> {
    let cases = [
        (FlatRecord::new().with("txn_type", "CRYPTOTRANSFER").with("nft_serial_number_1", 1), "NFTTRANSFER"),
        (FlatRecord::new().with("txn_type", "TOKENBURN").with("nft_serial_number_1", 1), "NFTBURN"),
        (FlatRecord::new().with("txn_type", "TOKENMINT").with("nft_serial_numbers", FieldValue::list([1])), "NFTMINT"),
        (FlatRecord::new().with("txn_type", "CRYPTOTRANSFER").with("token_transfer_amount_1", 5), "TOKENTRANSFERS"),
        (FlatRecord::new().with("txn_type", "TOKENCREATION").with("token_type", 1), "NFTCREATION"),
        (FlatRecord::new().with("txn_type", "TOKENCREATION").with("token_type", 0), "TOKENCREATION"),
        (FlatRecord::new().with("txn_type", "CONSENSUSSUBMITMESSAGE").with("nft_serial_number_1", 1), "CONSENSUSSUBMITMESSAGE"),
    ];

    for (mut record, expected) in cases {
        reclassify_token_txns(&mut record)?;
        assert_eq!(record.txn_type(), Some(expected));
    }

    let mut unknown = FlatRecord::new().with("txn_type", "NOT_A_TYPE");
    assert!(matches!(reclassify_token_txns(&mut unknown), Err(ParseError::Reclassify(_))));
    assert!(matches!(reclassify_token_txns(&mut FlatRecord::new()), Err(ParseError::Reclassify(_))));

    Ok(())
}

#[test]
fn test_metadata_needs_every_seconds_field() -> Result<()> {
    let mut record = FlatRecord::new()
        .with("body.transactionValidStart.seconds", 1_665_705_830_i64)
        .with("body.transactionValidStart.nanos", 0)
        .with("record.transactionValidStart.seconds", 1_665_705_830_i64);

    let result = add_txn_metadata(&mut record, PROCESSED, "a/b/c.rcd");

    assert!(matches!(result, Err(ParseError::Metadata(_))));

    record.insert("record.consensusTimestamp.seconds", 1_665_705_831_i64);
    add_txn_metadata(&mut record, PROCESSED, "a/b/c.rcd")?;

    assert_eq!(record.get("rcd_filename"), Some(&FieldValue::from("c.rcd")));
    assert_eq!(record.get("body.@timestamp"), Some(&FieldValue::from("2022-10-14T00:03:50.0Z")));
    assert_eq!(record.get("record.@timestamp"), Some(&FieldValue::from("2022-10-14T00:03:50.000Z")));
    assert_eq!(record.get("consensusTimestamp"), Some(&FieldValue::from("2022-10-14T00:03:51.000Z")));

    Ok(())
}

#[test]
fn test_sign_keys_name_each_signature() -> Result<()> {
    let pair = |signature| SignaturePair { pub_key_prefix: vec![1], signature };
    let signatures = SignatureMap {
        sig_pair: vec![
            pair(Some(signature_pair::Signature::Ed25519(vec![1]))),
            pair(Some(signature_pair::Signature::EcdsaSecp256k1(vec![2]))),
        ]
    };

    assert_eq!(parse_sign_keys(&signatures)?, vec!["ed25519", "ECDSA_secp256k1"]);

    let unsigned = SignatureMap { sig_pair: vec![pair(None)] };
    assert!(matches!(parse_sign_keys(&unsigned), Err(ParseError::SignKeys(0))));

    Ok(())
}

#[test]
fn test_parse_transaction_merges_body_over_record() -> Result<()> {
    let body = body_with(Some(transaction_body::Data::TokenAssociate(TokenAssociateTransactionBody {
        account: Some(AccountId::with_num(77)),
        tokens: vec![token(10)]
    })));
    let record = record_with(TransactionReceipt { token_id: Some(token(55)), ..success_receipt() });
    let signatures = SignatureMap {
        sig_pair: vec![SignaturePair { pub_key_prefix: vec![], signature: Some(signature_pair::Signature::Ed25519(vec![1])) }]
    };

    let output = parse_transaction(&modern_entry(body, record, Some(signatures)), PROCESSED)?;

    assert_eq!(output.get("token_number"), Some(&FieldValue::from("10")));
    assert_eq!(output.get("record.transactionHash"), Some(&FieldValue::from("abcd")));
    assert_eq!(output.get("txn_sign_keys"), Some(&FieldValue::list(["ed25519"])));
    assert_eq!(output.get("@processed"), Some(&FieldValue::from(PROCESSED)));
    assert_eq!(output.get("rcd_filename"), Some(&FieldValue::from("2022-10-14T00_03_50.019767741Z.rcd.gz")));
    assert_eq!(output.get("consensusTimestamp"), Some(&FieldValue::from("2022-10-14T00:03:50.20Z")));

    let keys: Vec<_> = output.iter().map(|(key, _)| key.as_str()).collect();
    assert_eq!(keys.first(), Some(&"status"));
    assert!(output.iter().all(|(_, value)| !matches!(value, FieldValue::Bytes(_))));

    Ok(())
}

#[test]
fn test_parse_transaction_decodes_legacy_blobs() -> Result<()> {
    let body = body_with(Some(transaction_body::Data::ConsensusCreateTopic(ConsensusCreateTopicTransactionBody {
        memo: "legacy".to_string()
    })));
    let transaction = Transaction { body_bytes: body.encode_to_vec(), ..Default::default() };
    let entry = RawTransactionEntry {
        filename: "2021-01-01T00_00_00.000000000Z.rcd".to_string(),
        payload: TransactionPayload::Legacy {
            transaction: transaction.encode_to_vec(),
            record: record_with(success_receipt()).encode_to_vec()
        }
    };

    let output = parse_transaction(&entry, PROCESSED)?;

    assert_eq!(output.txn_type(), Some(TxnType::ConsensusCreateTopic.as_str()));
    assert_eq!(output.get("consensus_create_memo"), Some(&FieldValue::from("legacy")));
    assert!(!output.contains_key("txn_sign_keys"));

    let garbage = RawTransactionEntry {
        filename: entry.filename.clone(),
        payload: TransactionPayload::Legacy { transaction: vec![0xFF; 4], record: Vec::new() }
    };
    assert!(matches!(parse_transaction(&garbage, PROCESSED), Err(ParseError::ParseItem(_))));

    Ok(())
}

#[test]
fn test_chunk_skips_only_the_invalid_transaction() -> Result<()> {
    let valid = || {
        modern_entry(
            body_with(Some(transaction_body::Data::ConsensusCreateTopic(ConsensusCreateTopicTransactionBody {
                memo: "memo".to_string()
            }))),
            record_with(success_receipt()),
            None
        )
    };
    let invalid = modern_entry(
        body_with(Some(transaction_body::Data::ConsensusSubmitMessage(ConsensusSubmitMessageTransactionBody {
            topic_id: None,
            message: Vec::new()
        }))),
        record_with(success_receipt()),
        None
    );

    let chunk = vec![valid(), valid(), invalid, valid(), valid()];
    let outcome = parse_chunk(&chunk, PROCESSED)?;

    assert_eq!(outcome.records.len(), chunk.len() - 1);
    assert_eq!(outcome.skipped, 1);

    let first = outcome.records.first().ok_or_else(|| anyhow!("chunk produced no records"))?;
    assert_eq!(first.txn_type(), Some("CONSENSUSCREATETOPIC"));

    Ok(())
}

#[test]
fn test_only_unexpected_errors_abort_a_chunk() {
    assert!(ParseError::validation("body", "field").is_recoverable());
    assert!(ParseError::SignKeys(0).is_recoverable());
    assert!(ParseError::timestamp(0, None).is_recoverable());
    assert!(!ParseError::Unexpected("boom".to_string()).is_recoverable());
}

use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::Command;

use anyhow::{anyhow, Result};
use byteorder::{BigEndian, WriteBytesExt};
use flate2::write::GzEncoder;
use flate2::Compression;
use prost::Message;
use serde_json::Value;
use tempfile::tempdir;

use recordstream_parser::proto::{
    signature_pair, transaction_body, AccountId, NodeStake, NodeStakeUpdateTransactionBody, RecordStreamFile,
    RecordStreamItem, SignatureMap, SignaturePair, SignedTransaction, Timestamp, Transaction, TransactionBody,
    TransactionId, TransactionReceipt, TransactionRecord, TransferList
};

const SUCCESS: i32 = 22;

fn node_stake_item() -> RecordStreamItem {
    let transaction_id = TransactionId {
        transaction_valid_start: Some(Timestamp { seconds: 1_665_705_830, nanos: 19_767_741 }),
        account_id: Some(AccountId::with_num(800)),
        ..Default::default()
    };

    let body = TransactionBody {
        transaction_id: Some(transaction_id.clone()),
        node_account_id: Some(AccountId::with_num(3)),
        data: Some(transaction_body::Data::NodeStakeUpdate(NodeStakeUpdateTransactionBody {
            end_of_staking_period: Some(Timestamp { seconds: 1_665_705_799, nanos: 999_999_999 }),
            node_stake: vec![NodeStake {
                max_stake: 100_000_000,
                min_stake: 0,
                node_id: 0,
                reward_rate: 1,
                stake: 250_000_000,
                stake_not_rewarded: 50_000_000,
                stake_rewarded: 0
            }]
        })),
        ..Default::default()
    };

    let signed = SignedTransaction {
        body_bytes: body.encode_to_vec(),
        sig_map: Some(SignatureMap {
            sig_pair: vec![SignaturePair {
                pub_key_prefix: vec![0x0A],
                signature: Some(signature_pair::Signature::Ed25519(vec![0x01; 64]))
            }]
        })
    };

    RecordStreamItem {
        transaction: Some(Transaction { signed_transaction_bytes: signed.encode_to_vec(), ..Default::default() }),
        record: Some(TransactionRecord {
            receipt: Some(TransactionReceipt { status: SUCCESS, ..Default::default() }),
            transaction_hash: vec![0xDE, 0xAD, 0xBE, 0xEF],
            consensus_timestamp: Some(Timestamp { seconds: 1_665_705_831, nanos: 0 }),
            transaction_id: Some(transaction_id),
            transfer_list: Some(TransferList::default()),
            ..Default::default()
        })
    }
}

fn modern_bytes() -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    bytes.write_i32::<BigEndian>(6)?;
    bytes.extend(RecordStreamFile { record_stream_items: vec![node_stake_item()], ..Default::default() }.encode_to_vec());
    Ok(bytes)
}

fn write_config(directory: &Path, output: &Path) -> Result<std::path::PathBuf> {
    let config = directory.join("config.json");
    let content = serde_json::json!({
        "chunk_size": 2,
        "batch_size": 10,
        "max_workers": 2,
        "output_path": output,
        "log_level": "warn"
    });
    fs::write(&config, content.to_string())?;
    Ok(config)
}

fn read_lines(path: &Path) -> Result<Vec<Value>> {
    fs::read_to_string(path)?
        .lines()
        .map(|line| serde_json::from_str::<Value>(line).map_err(anyhow::Error::from))
        .collect()
}

#[test]
fn test_cli_decodes_compressed_node_stake_file() -> Result<()> {
    let binary_path = env!("CARGO_BIN_EXE_recordstream-parser");
    let directory = tempdir()?;
    let output = directory.path().join("recordstreams.json");
    let config = write_config(directory.path(), &output)?;

    let input = directory.path().join("2022-10-14T00_03_50.019767741Z.rcd.gz");
    let mut encoder = GzEncoder::new(fs::File::create(&input)?, Compression::default());
    encoder.write_all(&modern_bytes()?)?;
    encoder.finish()?;

    let status = Command::new(binary_path).arg(&config).arg(&input).status()?;
    assert!(status.success());

    let lines = read_lines(&output)?;
    let record = lines.first().ok_or_else(|| anyhow!("no record written"))?;

    assert_eq!(lines.len(), 1);
    assert_eq!(record["txn_type"], "NODESTAKEUPDATE");
    assert_eq!(record["node_stake_account"], serde_json::json!(["0.0.3"]));
    assert_eq!(record["node_stake_id"], serde_json::json!([0]));
    assert_eq!(record["node_stake_max_stake"], serde_json::json!([1]));
    assert_eq!(record["node_stake_not_rewarded"], serde_json::json!([0.5]));
    assert_eq!(record["node_stake_reward_rate"], serde_json::json!([1]));
    assert_eq!(record["status"], "22");
    assert_eq!(record["record.transactionHash"], "deadbeef");
    assert_eq!(record["txn_sign_keys"], serde_json::json!(["ed25519"]));
    assert_eq!(record["body.@timestamp"], "2022-10-14T00:03:50.20Z");
    assert_eq!(record["rcd_filename"], "2022-10-14T00_03_50.019767741Z.rcd.gz");

    let expanded = directory.path().join("2022-10-14T00_03_50.019767741Z.rcd");
    assert!(expanded.exists());
    assert!(directory.path().join("2022-10-14T00_03_50.019767741Z.rcd_processed").exists());
    assert!(directory.path().join("2022-10-14T00_03_50.019767741Z.rcd.gz_processed").exists());

    Ok(())
}

#[test]
fn test_cli_abandons_legacy_file_with_wrong_version() -> Result<()> {
    let binary_path = env!("CARGO_BIN_EXE_recordstream-parser");
    let directory = tempdir()?;
    let output = directory.path().join("recordstreams.json");
    let config = write_config(directory.path(), &output)?;

    let input = directory.path().join("legacy.rcd");
    let mut bytes = Vec::new();
    for word in [4, 0, 30, 1, 1] {
        bytes.write_i32::<BigEndian>(word)?;
    }
    fs::write(&input, bytes)?;

    let status = Command::new(binary_path).arg(&config).arg(&input).status()?;

    assert!(status.success());
    assert_eq!(fs::read_to_string(&output)?, "");

    Ok(())
}

#[test]
fn test_cli_requires_config_and_files() -> Result<()> {
    let binary_path = env!("CARGO_BIN_EXE_recordstream-parser");

    let output = Command::new(binary_path).output()?;

    assert!(!output.status.success());
    assert!(String::from_utf8(output.stderr)?.contains("Usage"));

    Ok(())
}

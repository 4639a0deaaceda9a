use tracing::debug;

use crate::models::{FieldValue, FlatRecord};
use crate::parser::flatten::explode_account_amounts;
use crate::parser::ParseError;
use crate::proto::transaction_record::Body;
use crate::proto::*;

/// Envelope fields every transaction record carries: outcome, rates, timing, payer and receipt ids.
#[derive(Debug, Clone, PartialEq)]
struct RecordParsed {
    status: String,
    current_rate: ExchangeRate,
    next_rate: ExchangeRate,
    transaction_hash: Vec<u8>,
    consensus_timestamp: Timestamp,
    valid_start: Timestamp,
    account_number: String,
    transaction_fee: u64,
    memo: String,
    topic_sequence_number: u64,
    topic_running_hash: Vec<u8>,
    topic_running_hash_version: u64,
    created_account: String,
    schedule_id: String,
    token_number: String,
    file_id: String,
    topic_id: String
}

impl RecordParsed {
    fn from_record(record: &TransactionRecord) -> Result<Self, ParseError> {
        let receipt = record.receipt.as_ref().ok_or(ParseError::MissingAttribute("receipt"))?;
        let transaction_id = record.transaction_id.as_ref().ok_or(ParseError::MissingAttribute("transactionID"))?;
        let rates = receipt.exchange_rate.clone().unwrap_or_default();

        Ok(Self {
            status: receipt.status.to_string(),
            current_rate: rates.current_rate.unwrap_or_default(),
            next_rate: rates.next_rate.unwrap_or_default(),
            transaction_hash: record.transaction_hash.clone(),
            consensus_timestamp: record.consensus_timestamp.unwrap_or_default(),
            valid_start: transaction_id.transaction_valid_start.unwrap_or_default(),
            account_number: entity_number_or_zero(transaction_id.account_id.as_ref()),
            transaction_fee: record.transaction_fee,
            memo: record.memo.clone(),
            topic_sequence_number: receipt.topic_sequence_number,
            topic_running_hash: receipt.topic_running_hash.clone(),
            topic_running_hash_version: receipt.topic_running_hash_version,
            created_account: entity_number_or_zero(receipt.account_id.as_ref()),
            schedule_id: entity_number_or_zero(receipt.schedule_id.as_ref()),
            token_number: entity_number_or_zero(receipt.token_id.as_ref()),
            file_id: entity_number_or_zero(receipt.file_id.as_ref()),
            topic_id: entity_number_or_zero(receipt.topic_id.as_ref())
        })
    }

    fn into_flat(self) -> FlatRecord {
        let mut output = FlatRecord::new().with("status", self.status);
        insert_rate(&mut output, "currentRate", &self.current_rate);
        insert_rate(&mut output, "nextRate", &self.next_rate);

        output
            .with("record.transactionHash", FieldValue::bytes(self.transaction_hash))
            .with("record.consensusTimestamp.seconds", self.consensus_timestamp.seconds)
            .with("record.consensusTimestamp.nanos", self.consensus_timestamp.nanos)
            .with("record.transactionValidStart.seconds", self.valid_start.seconds)
            .with("record.transactionValidStart.nanos", self.valid_start.nanos)
            .with("record.accountID.accountNum", self.account_number)
            .with("record.transactionFee", self.transaction_fee)
            .with("record.memo", self.memo)
            .with("topic_sequence_number", self.topic_sequence_number)
            .with("topic_running_hash", FieldValue::bytes(self.topic_running_hash))
            .with("topic_running_hash_version", self.topic_running_hash_version)
            .with("created_account", self.created_account)
            .with("schedule_id", self.schedule_id)
            .with("token_number", self.token_number)
            .with("file_id", self.file_id)
            .with("consensus_create_topicID", self.topic_id)
    }
}

fn insert_rate(output: &mut FlatRecord, prefix: &str, rate: &ExchangeRate) {
    output.insert(format!("{prefix}.hbarEquiv"), rate.hbar_equiv);
    output.insert(format!("{prefix}.centEquiv"), rate.cent_equiv);
    output.insert(format!("{prefix}.expirationTime.seconds"), rate.expiration_time.map(|time| time.seconds).unwrap_or_default());
}

/// Flattens the post-execution record of a transaction.
///
/// Receipt identifiers that are absent come out as `"0"`. Transfer lists, token transfer lists and
/// contract results add their exploded fields only when present.
pub fn parse_transaction_record(record: &TransactionRecord) -> Result<FlatRecord, ParseError> {
    let mut output = RecordParsed::from_record(record)?.into_flat();

    if let Some(transfers) = &record.transfer_list {
        explode_account_amounts(&mut output, "record", &transfers.account_amounts);
    }

    if !record.token_transfer_lists.is_empty() {
        let serial_numbers = record.receipt.as_ref().map(|receipt| receipt.serial_numbers.as_slice()).unwrap_or_default();
        output.merge(parse_token_transfer_lists(&record.token_transfer_lists, serial_numbers));
    }

    match &record.body {
        Some(Body::ContractCreateResult(result)) | Some(Body::ContractCallResult(result)) => {
            output.merge(parse_contract_result(result));
        }
        None => {}
    }

    Ok(output)
}

/// Explodes fungible and NFT transfers of every list, numbered continuously from 1.
///
/// `token_number` comes from the first list only. Fungibility is judged per list by which transfer
/// kind it carries; a list carrying both or neither marks the record `token_transfer_ambiguous`.
fn parse_token_transfer_lists(lists: &[TokenTransferList], serial_numbers: &[i64]) -> FlatRecord {
    let mut output = FlatRecord::new().with("token_number", entity_number_or_zero(lists.first().and_then(|list| list.token.as_ref())));
    let mut fungible_count = 0;
    let mut nft_count = 0;
    let mut ambiguous = false;

    for list in lists {
        if list.transfers.is_empty() == list.nft_transfers.is_empty() {
            debug!("Token transfer list for token [{}] is ambiguous", entity_number_or_zero(list.token.as_ref()));
            ambiguous = true;
        }

        for transfer in &list.transfers {
            fungible_count += 1;
            output.insert(format!("token_transfer_account_{fungible_count}"), entity_number_or_zero(transfer.account_id.as_ref()));
            output.insert(format!("token_transfer_amount_{fungible_count}"), transfer.amount);
        }

        for transfer in &list.nft_transfers {
            nft_count += 1;
            if let Some(sender) = &transfer.sender_account_id {
                output.insert(format!("nft_sender_{nft_count}"), sender.entity_number());
            }
            if let Some(receiver) = &transfer.receiver_account_id {
                output.insert(format!("nft_receiver_{nft_count}"), receiver.entity_number());
            }
            output.insert(format!("nft_serial_number_{nft_count}"), transfer.serial_number);
        }
    }

    if nft_count > 0 && !serial_numbers.is_empty() {
        output.insert("nft_serial_numbers", FieldValue::list(serial_numbers.iter().copied()));
    }

    if ambiguous {
        output.insert("token_transfer_ambiguous", true);
    }

    output
}

fn parse_contract_result(result: &ContractFunctionResult) -> FlatRecord {
    let mut output = FlatRecord::new();

    if let Some(contract_id) = &result.contract_id {
        output.insert("record.contractID.contractNum", contract_id.entity_number());
    }
    if !result.contract_call_result.is_empty() {
        output.insert("record.contractCallResult", FieldValue::bytes(result.contract_call_result.clone()));
    }
    if !result.bloom.is_empty() {
        output.insert("record.bloom", FieldValue::bytes(result.bloom.clone()));
    }
    if result.gas_used != 0 {
        output.insert("record.gasUsed", result.gas_used);
    }
    for (index, created) in result.created_contract_ids.iter().enumerate() {
        output.insert(format!("record.createdContractIDs.contractNum.{}", index + 1), created.entity_number());
    }

    match result.log_info.as_slice() {
        [single] => insert_log_info(&mut output, "record.logInfo", single),
        entries => {
            for (index, entry) in entries.iter().enumerate() {
                insert_log_info(&mut output, &format!("record.logInfo.{index}"), entry);
            }
        }
    }

    output
}

fn insert_log_info(output: &mut FlatRecord, prefix: &str, log: &ContractLogInfo) {
    if let Some(contract_id) = &log.contract_id {
        output.insert(format!("{prefix}.contractID.contractNum"), contract_id.entity_number());
    }
    if !log.bloom.is_empty() {
        output.insert(format!("{prefix}.bloom"), FieldValue::bytes(log.bloom.clone()));
    }
    for (index, topic) in log.topic.iter().enumerate() {
        output.insert(format!("{prefix}.topic.{}", index + 1), FieldValue::bytes(topic.clone()));
    }
    if !log.data.is_empty() {
        output.insert(format!("{prefix}.data"), FieldValue::bytes(log.data.clone()));
    }
}

use tracing::debug;

use crate::models::{FieldValue, FlatRecord, TxnType};
use crate::parser::flatten::{ed25519_key, explode_account_amounts, key_summary, required};
use crate::parser::ParseError;
use crate::proto::transaction_body::Data;
use crate::proto::*;
use crate::types::Tinybars;

/// Offset between a node id and the account number of the node's account.
const NODE_ACCOUNT_OFFSET: i64 = 3;

/// Envelope fields every transaction body carries regardless of its operation.
#[derive(Debug, Clone, PartialEq)]
struct CommonParsed {
    valid_start_seconds: i64,
    valid_start_nanos: i32,
    account_number: String,
    node_account_number: String,
    scheduled: bool,
    transaction_fee: u64,
    valid_duration_seconds: i64,
    nonce: i32
}

impl CommonParsed {
    fn from_body(body: &TransactionBody) -> Result<Self, ParseError> {
        let transaction_id = required(body.transaction_id.as_ref(), "transactionBody", "transactionID")?;
        let valid_start = transaction_id.transaction_valid_start.unwrap_or_default();

        Ok(Self {
            valid_start_seconds: valid_start.seconds,
            valid_start_nanos: valid_start.nanos,
            account_number: entity_number_or_zero(transaction_id.account_id.as_ref()),
            node_account_number: entity_number_or_zero(body.node_account_id.as_ref()),
            scheduled: transaction_id.scheduled,
            transaction_fee: body.transaction_fee,
            valid_duration_seconds: body.transaction_valid_duration.map(|duration| duration.seconds).unwrap_or_default(),
            nonce: transaction_id.nonce
        })
    }

    fn into_flat(self) -> FlatRecord {
        FlatRecord::new()
            .with("body.transactionValidStart.seconds", self.valid_start_seconds)
            .with("body.transactionValidStart.nanos", self.valid_start_nanos)
            .with("body.accountID.accountNum", self.account_number)
            .with("body.nodeAccountID.accountNum", self.node_account_number)
            .with("scheduled", self.scheduled)
            .with("body.transactionFee", self.transaction_fee)
            .with("body.transactionValidDuration.seconds", self.valid_duration_seconds)
            .with("nonce", self.nonce)
    }
}

/// Flattens a transaction body into the envelope fields plus the fields of its one operation.
///
/// Operation fields are merged last and win on key collision. A body without an operation, or
/// with one this decoder does not model, is tagged `OTHER`.
pub fn parse_transaction_body(body: &TransactionBody) -> Result<FlatRecord, ParseError> {
    let mut output = CommonParsed::from_body(body)?.into_flat();
    output.merge(parse_operation(body.data.as_ref())?);
    Ok(output)
}

fn parse_operation(data: Option<&Data>) -> Result<FlatRecord, ParseError> {
    let Some(data) = data else {
        return Ok(FlatRecord::new().tagged(TxnType::Other));
    };

    match data {
        Data::ConsensusSubmitMessage(body) => consensus_submit_message(body),
        Data::ConsensusCreateTopic(body) => Ok(FlatRecord::new()
            .with("consensus_create_memo", body.memo.as_str())
            .tagged(TxnType::ConsensusCreateTopic)),
        Data::ConsensusUpdateTopic(body) => {
            let topic = required(body.topic_id.as_ref(), "consensusUpdateTopic", "topicID")?;
            Ok(FlatRecord::new().with("consensus_update_topicID", topic.entity_number()).tagged(TxnType::ConsensusUpdateTopic))
        }
        Data::ConsensusDeleteTopic(body) => {
            let topic = required(body.topic_id.as_ref(), "consensusDeleteTopic", "topicID")?;
            Ok(FlatRecord::new().with("consensus_delete_topicID", topic.entity_number()).tagged(TxnType::ConsensusDeleteTopic))
        }
        Data::CryptoTransfer(body) => Ok(crypto_transfer(body)),
        Data::CryptoCreateAccount(body) => Ok(crypto_create_account(body)),
        Data::CryptoUpdateAccount(body) => {
            let account = required(body.account_id_to_update.as_ref(), "cryptoUpdateAccount", "accountIDToUpdate")?;
            Ok(FlatRecord::new()
                .with("body.key", ed25519_key(body.key.as_ref()))
                .with("updated_account", account.entity_number())
                .tagged(TxnType::CryptoUpdateAccount))
        }
        Data::CryptoDelete(body) => {
            let account = required(body.delete_account_id.as_ref(), "cryptoDelete", "deleteAccountID")?;
            Ok(FlatRecord::new().with("deleted_account", account.entity_number()).tagged(TxnType::CryptoDelete))
        }
        Data::FileUpdate(body) => file_operation(body.file_id.as_ref(), "fileUpdate", TxnType::FileUpdate),
        Data::FileAppend(body) => file_operation(body.file_id.as_ref(), "fileAppend", TxnType::FileAppend),
        Data::FileDelete(body) => file_operation(body.file_id.as_ref(), "fileDelete", TxnType::FileDelete),
        Data::FileCreate(_) => Ok(FlatRecord::new().tagged(TxnType::FileCreate)),
        Data::ScheduleSign(body) => schedule_operation(body.schedule_id.as_ref(), "scheduleSign", TxnType::ScheduleSign),
        Data::ScheduleCreate(body) => Ok(schedule_create(body)),
        Data::ScheduleDelete(body) => schedule_operation(body.schedule_id.as_ref(), "scheduleDelete", TxnType::ScheduleDelete),
        Data::TokenCreation(body) => Ok(token_creation(body)),
        Data::TokenAssociate(body) => token_association(body.account.as_ref(), &body.tokens, "tokenAssociate", TxnType::TokenAssociate),
        Data::TokenDissociate(body) => token_association(body.account.as_ref(), &body.tokens, "tokenDissociate", TxnType::TokenDissociate),
        Data::TokenGrantKyc(body) => token_account(body, "tokenGrantKyc", TxnType::TokenGrantKyc),
        Data::TokenRevokeKyc(body) => token_account(body, "tokenRevokeKyc", TxnType::TokenRevokeKyc),
        Data::TokenMint(body) => token_mint(body),
        Data::TokenFreeze(body) => token_account(body, "tokenFreeze", TxnType::TokenFreeze),
        Data::TokenUnfreeze(body) => token_account(body, "tokenUnfreeze", TxnType::TokenUnfreeze),
        Data::TokenPause(body) => token_only(body, "tokenPause", TxnType::TokenPause),
        Data::TokenUnpause(body) => token_only(body, "tokenUnpause", TxnType::TokenUnpause),
        Data::TokenDeletion(body) => token_only(body, "tokenDeletion", TxnType::TokenDeletion),
        Data::TokenUpdate(body) => token_update(body),
        Data::TokenBurn(body) => token_burn(body),
        Data::TokenWipe(body) => token_wipe(body),
        Data::ContractCreateInstance(body) => Ok(contract_create(body)),
        Data::ContractUpdateInstance(body) => {
            contract_operation(body.contract_id.as_ref(), "contractUpdateInstance", TxnType::ContractUpdateInstance)
        }
        Data::ContractCall(body) => contract_call(body),
        Data::ContractDeleteInstance(body) => {
            contract_operation(body.contract_id.as_ref(), "contractDeleteInstance", TxnType::ContractDelete)
        }
        Data::EthereumTransaction(body) => Ok(ethereum_transaction(body)),
        Data::CryptoApproveAllowance(_) => Ok(FlatRecord::new().tagged(TxnType::CryptoApproveAllowance)),
        Data::CryptoDeleteAllowance(_) => Ok(FlatRecord::new().tagged(TxnType::CryptoDeleteAllowance)),
        Data::TokenFeeScheduleUpdate(_) => Ok(FlatRecord::new().tagged(TxnType::TokenFeeScheduleUpdate)),
        Data::NodeStakeUpdate(body) => node_stake_update(body)
    }
}

fn consensus_submit_message(body: &ConsensusSubmitMessageTransactionBody) -> Result<FlatRecord, ParseError> {
    let topic = required(body.topic_id.as_ref(), "consensusSubmitMessage", "topicID")?;

    Ok(FlatRecord::new()
        .with("consensus_submit_topicID", topic.entity_number())
        .with("consensus_submit_message", FieldValue::bytes(body.message.clone()))
        .with("consensus_submit_message_bytes", body.message.len())
        .tagged(TxnType::ConsensusSubmitMessage))
}

fn crypto_transfer(body: &CryptoTransferTransactionBody) -> FlatRecord {
    let mut output = FlatRecord::new();

    if let Some(transfers) = &body.transfers {
        explode_account_amounts(&mut output, "body", &transfers.account_amounts);
    }

    output.tagged(TxnType::CryptoTransfer)
}

fn crypto_create_account(body: &CryptoCreateTransactionBody) -> FlatRecord {
    FlatRecord::new()
        .with("body.key", ed25519_key(body.key.as_ref()))
        .with("body.sendRecordThreshold", body.send_record_threshold.to_string())
        .with("body.receiveRecordThreshold", body.receive_record_threshold.to_string())
        .with("body.autoRenewPeriod", duration_seconds(body.auto_renew_period).to_string())
        .tagged(TxnType::CryptoCreateAccount)
}

fn file_operation(file_id: Option<&FileId>, context: &'static str, txn_type: TxnType) -> Result<FlatRecord, ParseError> {
    let file_id = required(file_id, context, "fileID")?;
    Ok(FlatRecord::new().with("file_id", file_id.entity_number()).tagged(txn_type))
}

fn schedule_operation(schedule_id: Option<&ScheduleId>, context: &'static str, txn_type: TxnType) -> Result<FlatRecord, ParseError> {
    let schedule_id = required(schedule_id, context, "scheduleID")?;
    Ok(FlatRecord::new().with("schedule_id", schedule_id.entity_number()).tagged(txn_type))
}

fn schedule_create(body: &ScheduleCreateTransactionBody) -> FlatRecord {
    let mut scheduled = indexmap::IndexMap::new();

    if let Some(inner) = &body.scheduled_transaction_body {
        scheduled.insert("transactionFee".to_string(), FieldValue::from(inner.transaction_fee));
        scheduled.insert("memo".to_string(), FieldValue::from(inner.memo.as_str()));
    }

    FlatRecord::new().with("schedule_txn_body", scheduled).tagged(TxnType::ScheduleCreate)
}

fn token_creation(body: &TokenCreateTransactionBody) -> FlatRecord {
    FlatRecord::new()
        .with("token_name", body.name.as_str())
        .with("token_symbol", body.symbol.as_str())
        .with("token_type", body.token_type)
        .with("token_decimals", body.decimals)
        .with("token_account_number", entity_number_or_zero(body.treasury.as_ref()))
        .with("token_admin_key", ed25519_key(body.admin_key.as_ref()))
        .with("token_kyc_key", ed25519_key(body.kyc_key.as_ref()))
        .with("token_wipe_key", ed25519_key(body.wipe_key.as_ref()))
        .with("token_supply_key", ed25519_key(body.supply_key.as_ref()))
        .with("token_freeze_key", ed25519_key(body.freeze_key.as_ref()))
        .with("freeze_default", body.freeze_default)
        .with("auto_renew_account", entity_number_or_zero(body.auto_renew_account.as_ref()))
        .with("auto_renew_period_seconds", duration_seconds(body.auto_renew_period))
        .with("memo", body.memo.as_str())
        .with("supply_type", body.supply_type)
        .with("max_supply", body.max_supply)
        .with("token_initial_supply", body.initial_supply)
        .tagged(TxnType::TokenCreation)
}

fn token_association(
    account: Option<&AccountId>,
    tokens: &[TokenId],
    context: &'static str,
    txn_type: TxnType
) -> Result<FlatRecord, ParseError> {
    let account = required(account, context, "account")?;
    let mut output = FlatRecord::new().with("token_account_number", account.entity_number());

    for (index, token) in tokens.iter().enumerate() {
        let key = match index {
            0 => "token_number".to_string(),
            _ => format!("token_number{}", index + 1)
        };
        output.insert(key, token.entity_number());
    }

    Ok(output.tagged(txn_type))
}

fn token_account(body: &TokenAccountTransactionBody, context: &'static str, txn_type: TxnType) -> Result<FlatRecord, ParseError> {
    let token = required(body.token.as_ref(), context, "token")?;
    let account = required(body.account.as_ref(), context, "account")?;

    Ok(FlatRecord::new()
        .with("token_number", token.entity_number())
        .with("token_account_number", account.entity_number())
        .tagged(txn_type))
}

fn token_only(body: &TokenOnlyTransactionBody, context: &'static str, txn_type: TxnType) -> Result<FlatRecord, ParseError> {
    let token = required(body.token.as_ref(), context, "token")?;
    Ok(FlatRecord::new().with("token_number", token.entity_number()).tagged(txn_type))
}

fn token_mint(body: &TokenMintTransactionBody) -> Result<FlatRecord, ParseError> {
    let token = required(body.token.as_ref(), "tokenMint", "token")?;

    Ok(FlatRecord::new()
        .with("token_number", token.entity_number())
        .with("token_mint_amount", body.amount)
        .with("token_mint_metadata", FieldValue::list(body.metadata.iter().cloned().map(FieldValue::bytes)))
        .tagged(TxnType::TokenMint))
}

fn token_update(body: &TokenUpdateTransactionBody) -> Result<FlatRecord, ParseError> {
    let token = required(body.token.as_ref(), "tokenUpdate", "token")?;

    Ok(FlatRecord::new()
        .with("token_number", token.entity_number())
        .with("token_name", body.name.as_str())
        .with("token_symbol", body.symbol.as_str())
        .with("token_account_number", entity_number_or_zero(body.treasury.as_ref()))
        .with("token_admin_key", ed25519_key(body.admin_key.as_ref()))
        .with("token_kyc_key", ed25519_key(body.kyc_key.as_ref()))
        .with("token_wipe_key", ed25519_key(body.wipe_key.as_ref()))
        .with("token_supply_key", ed25519_key(body.supply_key.as_ref()))
        .with("token_freeze_key", ed25519_key(body.freeze_key.as_ref()))
        .with("auto_renew_account", entity_number_or_zero(body.auto_renew_account.as_ref()))
        .with("memo", body.memo.as_ref().map(|memo| memo.value.as_str()).unwrap_or_default())
        .tagged(TxnType::TokenUpdate))
}

fn token_burn(body: &TokenBurnTransactionBody) -> Result<FlatRecord, ParseError> {
    let token = required(body.token.as_ref(), "tokenBurn", "token")?;

    let mut output = FlatRecord::new()
        .with("token_number", token.entity_number())
        .with("token_account_number", "0")
        .with("token_burn_amount", body.amount);

    if !body.serial_numbers.is_empty() {
        output.insert("nft_serial_numbers", FieldValue::list(body.serial_numbers.iter().copied()));
    }

    Ok(output.tagged(TxnType::TokenBurn))
}

fn token_wipe(body: &TokenWipeAccountTransactionBody) -> Result<FlatRecord, ParseError> {
    let token = required(body.token.as_ref(), "tokenWipe", "token")?;
    let account = required(body.account.as_ref(), "tokenWipe", "account")?;

    let mut output = FlatRecord::new()
        .with("token_number", token.entity_number())
        .with("token_account_number", account.entity_number())
        .with("token_wipe_amount", body.amount);

    if !body.serial_numbers.is_empty() {
        output.insert("nft_serial_numbers", FieldValue::list(body.serial_numbers.iter().copied()));
    }

    Ok(output.tagged(TxnType::TokenWipe))
}

fn contract_create(body: &ContractCreateTransactionBody) -> FlatRecord {
    let mut output = FlatRecord::new()
        .with("file_id", entity_number_or_zero(body.file_id.as_ref()))
        .with("body.gasUsed", body.gas)
        .with("auto_renew_period_seconds", duration_seconds(body.auto_renew_period))
        .with("admin_key", key_summary(body.admin_key.as_ref()))
        .with("initial_balance", body.initial_balance);

    if let Some(proxy) = &body.proxy_account_id {
        output.insert("proxy_account_id", proxy.entity_number());
    }

    output.with("memo", body.memo.as_str()).tagged(TxnType::ContractCreateInstance)
}

fn contract_operation(contract_id: Option<&ContractId>, context: &'static str, txn_type: TxnType) -> Result<FlatRecord, ParseError> {
    let contract_id = required(contract_id, context, "contractID")?;
    Ok(FlatRecord::new().with("body.contractID", contract_id.entity_number()).tagged(txn_type))
}

fn contract_call(body: &ContractCallTransactionBody) -> Result<FlatRecord, ParseError> {
    let contract_id = required(body.contract_id.as_ref(), "contractCall", "contractID")?;

    Ok(FlatRecord::new()
        .with("body.contractID", contract_id.entity_number())
        .with("body.gasUsed", body.gas)
        .with("amount", body.amount)
        .tagged(TxnType::ContractCall))
}

fn ethereum_transaction(body: &EthereumTransactionBody) -> FlatRecord {
    let mut output = FlatRecord::new().with("ethereum_data", FieldValue::bytes(body.ethereum_data.clone()));

    if let Some(call_data) = &body.call_data {
        output.insert("call_data", call_data.entity_number());
    }

    output.with("max_gas_allowance", body.max_gas_allowance).tagged(TxnType::EthereumTransaction)
}

fn node_stake_update(body: &NodeStakeUpdateTransactionBody) -> Result<FlatRecord, ParseError> {
    let stakes = &body.node_stake;
    debug!("Flattening [{}] node stakes", stakes.len());

    let accounts = stakes
        .iter()
        .map(|stake| {
            stake
                .node_id
                .checked_add(NODE_ACCOUNT_OFFSET)
                .map(|account| FieldValue::from(format!("0.0.{account}")))
                .ok_or_else(|| ParseError::ParseItem(format!("node id [{}] has no account number", stake.node_id)))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let hbars = |select: fn(&NodeStake) -> i64| FieldValue::list(stakes.iter().map(|stake| Tinybars::new(select(stake))));

    Ok(FlatRecord::new()
        .with("node_stake_max_stake", hbars(|stake| stake.max_stake))
        .with("node_stake_min_stake", hbars(|stake| stake.min_stake))
        .with("node_stake_id", FieldValue::list(stakes.iter().map(|stake| stake.node_id)))
        .with("node_stake_account", FieldValue::List(accounts))
        .with("node_stake_reward_rate", FieldValue::list(stakes.iter().map(|stake| stake.reward_rate)))
        .with("node_stake_not_rewarded", hbars(|stake| stake.stake_not_rewarded))
        .with("node_stake_rewarded", hbars(|stake| stake.stake_rewarded))
        .tagged(TxnType::NodeStakeUpdate))
}

fn duration_seconds(duration: Option<Duration>) -> i64 {
    duration.map(|duration| duration.seconds).unwrap_or_default()
}

use super::basic_types::{
    AccountId, ContractId, Duration, FileId, Key, ScheduleId, StringValue, Timestamp, TokenId, TokenTransferList,
    TopicId, TransactionId, TransferList
};

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TransactionBody {
    #[prost(message, optional, tag = "1")]
    pub transaction_id: Option<TransactionId>,
    #[prost(message, optional, tag = "2")]
    pub node_account_id: Option<AccountId>,
    #[prost(uint64, tag = "3")]
    pub transaction_fee: u64,
    #[prost(message, optional, tag = "4")]
    pub transaction_valid_duration: Option<Duration>,
    #[prost(string, tag = "6")]
    pub memo: String,
    #[prost(
        oneof = "transaction_body::Data",
        tags = "7, 8, 9, 11, 12, 14, 15, 16, 17, 18, 19, 22, 24, 25, 26, 27, 29, 31, 32, 33, 34, 35, 36, 37, 38, 39, 40, 41, 42, 43, 44, 45, 46, 47, 48, 49, 50, 51"
    )]
    pub data: Option<transaction_body::Data>,
}

pub mod transaction_body {
    use super::*;

    /// Operation carried by a transaction body. Operations this decoder does not model decode to
    /// `None` and are reported as `OTHER`.
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Data {
        #[prost(message, tag = "7")]
        ContractCall(ContractCallTransactionBody),
        #[prost(message, tag = "8")]
        ContractCreateInstance(ContractCreateTransactionBody),
        #[prost(message, tag = "9")]
        ContractUpdateInstance(ContractUpdateTransactionBody),
        #[prost(message, tag = "11")]
        CryptoCreateAccount(CryptoCreateTransactionBody),
        #[prost(message, tag = "12")]
        CryptoDelete(CryptoDeleteTransactionBody),
        #[prost(message, tag = "14")]
        CryptoTransfer(CryptoTransferTransactionBody),
        #[prost(message, tag = "15")]
        CryptoUpdateAccount(CryptoUpdateTransactionBody),
        #[prost(message, tag = "16")]
        FileAppend(FileAppendTransactionBody),
        #[prost(message, tag = "17")]
        FileCreate(FileCreateTransactionBody),
        #[prost(message, tag = "18")]
        FileDelete(FileDeleteTransactionBody),
        #[prost(message, tag = "19")]
        FileUpdate(FileUpdateTransactionBody),
        #[prost(message, tag = "22")]
        ContractDeleteInstance(ContractDeleteTransactionBody),
        #[prost(message, tag = "24")]
        ConsensusCreateTopic(ConsensusCreateTopicTransactionBody),
        #[prost(message, tag = "25")]
        ConsensusUpdateTopic(ConsensusUpdateTopicTransactionBody),
        #[prost(message, tag = "26")]
        ConsensusDeleteTopic(ConsensusDeleteTopicTransactionBody),
        #[prost(message, tag = "27")]
        ConsensusSubmitMessage(ConsensusSubmitMessageTransactionBody),
        #[prost(message, tag = "29")]
        TokenCreation(TokenCreateTransactionBody),
        #[prost(message, tag = "31")]
        TokenFreeze(TokenFreezeAccountTransactionBody),
        #[prost(message, tag = "32")]
        TokenUnfreeze(TokenUnfreezeAccountTransactionBody),
        #[prost(message, tag = "33")]
        TokenGrantKyc(TokenGrantKycTransactionBody),
        #[prost(message, tag = "34")]
        TokenRevokeKyc(TokenRevokeKycTransactionBody),
        #[prost(message, tag = "35")]
        TokenDeletion(TokenDeleteTransactionBody),
        #[prost(message, tag = "36")]
        TokenUpdate(TokenUpdateTransactionBody),
        #[prost(message, tag = "37")]
        TokenMint(TokenMintTransactionBody),
        #[prost(message, tag = "38")]
        TokenBurn(TokenBurnTransactionBody),
        #[prost(message, tag = "39")]
        TokenWipe(TokenWipeAccountTransactionBody),
        #[prost(message, tag = "40")]
        TokenAssociate(TokenAssociateTransactionBody),
        #[prost(message, tag = "41")]
        TokenDissociate(TokenDissociateTransactionBody),
        #[prost(message, tag = "42")]
        ScheduleCreate(ScheduleCreateTransactionBody),
        #[prost(message, tag = "43")]
        ScheduleDelete(ScheduleDeleteTransactionBody),
        #[prost(message, tag = "44")]
        ScheduleSign(ScheduleSignTransactionBody),
        #[prost(message, tag = "45")]
        TokenFeeScheduleUpdate(TokenFeeScheduleUpdateTransactionBody),
        #[prost(message, tag = "46")]
        TokenPause(TokenPauseTransactionBody),
        #[prost(message, tag = "47")]
        TokenUnpause(TokenUnpauseTransactionBody),
        #[prost(message, tag = "48")]
        CryptoApproveAllowance(CryptoApproveAllowanceTransactionBody),
        #[prost(message, tag = "49")]
        CryptoDeleteAllowance(CryptoDeleteAllowanceTransactionBody),
        #[prost(message, tag = "50")]
        EthereumTransaction(EthereumTransactionBody),
        #[prost(message, tag = "51")]
        NodeStakeUpdate(NodeStakeUpdateTransactionBody),
    }
}

// Consensus service

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ConsensusSubmitMessageTransactionBody {
    #[prost(message, optional, tag = "1")]
    pub topic_id: Option<TopicId>,
    #[prost(bytes = "vec", tag = "2")]
    pub message: Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ConsensusCreateTopicTransactionBody {
    #[prost(string, tag = "1")]
    pub memo: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ConsensusUpdateTopicTransactionBody {
    #[prost(message, optional, tag = "1")]
    pub topic_id: Option<TopicId>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ConsensusDeleteTopicTransactionBody {
    #[prost(message, optional, tag = "1")]
    pub topic_id: Option<TopicId>,
}

// Crypto service

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CryptoTransferTransactionBody {
    #[prost(message, optional, tag = "1")]
    pub transfers: Option<TransferList>,
    #[prost(message, repeated, tag = "2")]
    pub token_transfers: Vec<TokenTransferList>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CryptoCreateTransactionBody {
    #[prost(message, optional, tag = "1")]
    pub key: Option<Key>,
    #[prost(uint64, tag = "2")]
    pub initial_balance: u64,
    #[prost(uint64, tag = "6")]
    pub send_record_threshold: u64,
    #[prost(uint64, tag = "7")]
    pub receive_record_threshold: u64,
    #[prost(message, optional, tag = "9")]
    pub auto_renew_period: Option<Duration>,
    #[prost(string, tag = "13")]
    pub memo: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CryptoUpdateTransactionBody {
    #[prost(message, optional, tag = "2")]
    pub account_id_to_update: Option<AccountId>,
    #[prost(message, optional, tag = "3")]
    pub key: Option<Key>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CryptoDeleteTransactionBody {
    #[prost(message, optional, tag = "1")]
    pub transfer_account_id: Option<AccountId>,
    #[prost(message, optional, tag = "2")]
    pub delete_account_id: Option<AccountId>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CryptoApproveAllowanceTransactionBody {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CryptoDeleteAllowanceTransactionBody {}

// File service

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FileUpdateTransactionBody {
    #[prost(message, optional, tag = "1")]
    pub file_id: Option<FileId>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FileAppendTransactionBody {
    #[prost(message, optional, tag = "2")]
    pub file_id: Option<FileId>,
    #[prost(bytes = "vec", tag = "4")]
    pub contents: Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FileDeleteTransactionBody {
    #[prost(message, optional, tag = "2")]
    pub file_id: Option<FileId>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FileCreateTransactionBody {
    #[prost(string, tag = "8")]
    pub memo: String,
}

// Schedule service

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SchedulableTransactionBody {
    #[prost(uint64, tag = "1")]
    pub transaction_fee: u64,
    #[prost(string, tag = "2")]
    pub memo: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ScheduleCreateTransactionBody {
    #[prost(message, optional, tag = "1")]
    pub scheduled_transaction_body: Option<SchedulableTransactionBody>,
    #[prost(string, tag = "2")]
    pub memo: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ScheduleSignTransactionBody {
    #[prost(message, optional, tag = "1")]
    pub schedule_id: Option<ScheduleId>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ScheduleDeleteTransactionBody {
    #[prost(message, optional, tag = "1")]
    pub schedule_id: Option<ScheduleId>,
}

// Token service

/// Wire value of `TokenType::NON_FUNGIBLE_UNIQUE`.
pub const TOKEN_TYPE_NON_FUNGIBLE_UNIQUE: i32 = 1;

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TokenCreateTransactionBody {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(string, tag = "2")]
    pub symbol: String,
    #[prost(uint32, tag = "3")]
    pub decimals: u32,
    #[prost(uint64, tag = "4")]
    pub initial_supply: u64,
    #[prost(message, optional, tag = "5")]
    pub treasury: Option<AccountId>,
    #[prost(message, optional, tag = "6")]
    pub admin_key: Option<Key>,
    #[prost(message, optional, tag = "7")]
    pub kyc_key: Option<Key>,
    #[prost(message, optional, tag = "8")]
    pub freeze_key: Option<Key>,
    #[prost(message, optional, tag = "9")]
    pub wipe_key: Option<Key>,
    #[prost(message, optional, tag = "10")]
    pub supply_key: Option<Key>,
    #[prost(bool, tag = "11")]
    pub freeze_default: bool,
    #[prost(message, optional, tag = "14")]
    pub auto_renew_account: Option<AccountId>,
    #[prost(message, optional, tag = "15")]
    pub auto_renew_period: Option<Duration>,
    #[prost(string, tag = "16")]
    pub memo: String,
    #[prost(int32, tag = "17")]
    pub token_type: i32,
    #[prost(int32, tag = "18")]
    pub supply_type: i32,
    #[prost(int64, tag = "19")]
    pub max_supply: i64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TokenUpdateTransactionBody {
    #[prost(message, optional, tag = "1")]
    pub token: Option<TokenId>,
    #[prost(string, tag = "2")]
    pub symbol: String,
    #[prost(string, tag = "3")]
    pub name: String,
    #[prost(message, optional, tag = "4")]
    pub treasury: Option<AccountId>,
    #[prost(message, optional, tag = "5")]
    pub admin_key: Option<Key>,
    #[prost(message, optional, tag = "6")]
    pub kyc_key: Option<Key>,
    #[prost(message, optional, tag = "7")]
    pub freeze_key: Option<Key>,
    #[prost(message, optional, tag = "8")]
    pub wipe_key: Option<Key>,
    #[prost(message, optional, tag = "9")]
    pub supply_key: Option<Key>,
    #[prost(message, optional, tag = "10")]
    pub auto_renew_account: Option<AccountId>,
    #[prost(message, optional, tag = "11")]
    pub auto_renew_period: Option<Duration>,
    #[prost(message, optional, tag = "12")]
    pub expiry: Option<Timestamp>,
    #[prost(message, optional, tag = "13")]
    pub memo: Option<StringValue>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TokenAssociateTransactionBody {
    #[prost(message, optional, tag = "1")]
    pub account: Option<AccountId>,
    #[prost(message, repeated, tag = "2")]
    pub tokens: Vec<TokenId>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TokenDissociateTransactionBody {
    #[prost(message, optional, tag = "1")]
    pub account: Option<AccountId>,
    #[prost(message, repeated, tag = "2")]
    pub tokens: Vec<TokenId>,
}

/// Shape shared by the kyc and freeze bodies: a token and the account it applies to.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TokenAccountTransactionBody {
    #[prost(message, optional, tag = "1")]
    pub token: Option<TokenId>,
    #[prost(message, optional, tag = "2")]
    pub account: Option<AccountId>,
}

pub type TokenGrantKycTransactionBody = TokenAccountTransactionBody;
pub type TokenRevokeKycTransactionBody = TokenAccountTransactionBody;
pub type TokenFreezeAccountTransactionBody = TokenAccountTransactionBody;
pub type TokenUnfreezeAccountTransactionBody = TokenAccountTransactionBody;

/// Shape shared by the pause, unpause and delete bodies.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TokenOnlyTransactionBody {
    #[prost(message, optional, tag = "1")]
    pub token: Option<TokenId>,
}

pub type TokenPauseTransactionBody = TokenOnlyTransactionBody;
pub type TokenUnpauseTransactionBody = TokenOnlyTransactionBody;
pub type TokenDeleteTransactionBody = TokenOnlyTransactionBody;
pub type TokenFeeScheduleUpdateTransactionBody = TokenOnlyTransactionBody;

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TokenMintTransactionBody {
    #[prost(message, optional, tag = "1")]
    pub token: Option<TokenId>,
    #[prost(uint64, tag = "2")]
    pub amount: u64,
    #[prost(bytes = "vec", repeated, tag = "3")]
    pub metadata: Vec<Vec<u8>>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TokenBurnTransactionBody {
    #[prost(message, optional, tag = "1")]
    pub token: Option<TokenId>,
    #[prost(uint64, tag = "2")]
    pub amount: u64,
    #[prost(int64, repeated, tag = "3")]
    pub serial_numbers: Vec<i64>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TokenWipeAccountTransactionBody {
    #[prost(message, optional, tag = "1")]
    pub token: Option<TokenId>,
    #[prost(message, optional, tag = "2")]
    pub account: Option<AccountId>,
    #[prost(uint64, tag = "3")]
    pub amount: u64,
    #[prost(int64, repeated, tag = "4")]
    pub serial_numbers: Vec<i64>,
}

// Smart contract service

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ContractCreateTransactionBody {
    #[prost(message, optional, tag = "1")]
    pub file_id: Option<FileId>,
    #[prost(message, optional, tag = "3")]
    pub admin_key: Option<Key>,
    #[prost(int64, tag = "4")]
    pub gas: i64,
    #[prost(int64, tag = "5")]
    pub initial_balance: i64,
    #[prost(message, optional, tag = "6")]
    pub proxy_account_id: Option<AccountId>,
    #[prost(message, optional, tag = "8")]
    pub auto_renew_period: Option<Duration>,
    #[prost(string, tag = "13")]
    pub memo: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ContractUpdateTransactionBody {
    #[prost(message, optional, tag = "1")]
    pub contract_id: Option<ContractId>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ContractCallTransactionBody {
    #[prost(message, optional, tag = "1")]
    pub contract_id: Option<ContractId>,
    #[prost(int64, tag = "2")]
    pub gas: i64,
    #[prost(int64, tag = "3")]
    pub amount: i64,
    #[prost(bytes = "vec", tag = "4")]
    pub function_parameters: Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ContractDeleteTransactionBody {
    #[prost(message, optional, tag = "1")]
    pub contract_id: Option<ContractId>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct EthereumTransactionBody {
    #[prost(bytes = "vec", tag = "1")]
    pub ethereum_data: Vec<u8>,
    #[prost(message, optional, tag = "2")]
    pub call_data: Option<FileId>,
    #[prost(int64, tag = "3")]
    pub max_gas_allowance: i64,
}

// Network staking

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct NodeStake {
    #[prost(int64, tag = "1")]
    pub max_stake: i64,
    #[prost(int64, tag = "2")]
    pub min_stake: i64,
    #[prost(int64, tag = "3")]
    pub node_id: i64,
    #[prost(int64, tag = "4")]
    pub reward_rate: i64,
    #[prost(int64, tag = "5")]
    pub stake: i64,
    #[prost(int64, tag = "6")]
    pub stake_not_rewarded: i64,
    #[prost(int64, tag = "7")]
    pub stake_rewarded: i64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct NodeStakeUpdateTransactionBody {
    #[prost(message, optional, tag = "1")]
    pub end_of_staking_period: Option<Timestamp>,
    #[prost(message, repeated, tag = "2")]
    pub node_stake: Vec<NodeStake>,
}

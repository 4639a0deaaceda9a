use super::basic_types::{
    AccountId, ContractId, FileId, ScheduleId, Timestamp, TimestampSeconds, TokenId, TokenTransferList, TopicId,
    TransactionId, TransferList
};

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ExchangeRate {
    #[prost(int32, tag = "1")]
    pub hbar_equiv: i32,
    #[prost(int32, tag = "2")]
    pub cent_equiv: i32,
    #[prost(message, optional, tag = "3")]
    pub expiration_time: Option<TimestampSeconds>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ExchangeRateSet {
    #[prost(message, optional, tag = "1")]
    pub current_rate: Option<ExchangeRate>,
    #[prost(message, optional, tag = "2")]
    pub next_rate: Option<ExchangeRate>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TransactionReceipt {
    /// `ResponseCodeEnum` value, kept numeric.
    #[prost(int32, tag = "1")]
    pub status: i32,
    #[prost(message, optional, tag = "2")]
    pub account_id: Option<AccountId>,
    #[prost(message, optional, tag = "3")]
    pub file_id: Option<FileId>,
    #[prost(message, optional, tag = "4")]
    pub contract_id: Option<ContractId>,
    #[prost(message, optional, tag = "5")]
    pub exchange_rate: Option<ExchangeRateSet>,
    #[prost(message, optional, tag = "6")]
    pub topic_id: Option<TopicId>,
    #[prost(uint64, tag = "7")]
    pub topic_sequence_number: u64,
    #[prost(bytes = "vec", tag = "8")]
    pub topic_running_hash: Vec<u8>,
    #[prost(uint64, tag = "9")]
    pub topic_running_hash_version: u64,
    #[prost(message, optional, tag = "10")]
    pub token_id: Option<TokenId>,
    #[prost(uint64, tag = "11")]
    pub new_total_supply: u64,
    #[prost(message, optional, tag = "12")]
    pub schedule_id: Option<ScheduleId>,
    #[prost(int64, repeated, tag = "14")]
    pub serial_numbers: Vec<i64>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ContractLogInfo {
    #[prost(message, optional, tag = "1")]
    pub contract_id: Option<ContractId>,
    #[prost(bytes = "vec", tag = "2")]
    pub bloom: Vec<u8>,
    #[prost(bytes = "vec", repeated, tag = "3")]
    pub topic: Vec<Vec<u8>>,
    #[prost(bytes = "vec", tag = "4")]
    pub data: Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ContractFunctionResult {
    #[prost(message, optional, tag = "1")]
    pub contract_id: Option<ContractId>,
    #[prost(bytes = "vec", tag = "2")]
    pub contract_call_result: Vec<u8>,
    #[prost(string, tag = "3")]
    pub error_message: String,
    #[prost(bytes = "vec", tag = "4")]
    pub bloom: Vec<u8>,
    #[prost(uint64, tag = "5")]
    pub gas_used: u64,
    #[prost(message, repeated, tag = "6")]
    pub log_info: Vec<ContractLogInfo>,
    #[prost(message, repeated, tag = "7")]
    pub created_contract_ids: Vec<ContractId>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TransactionRecord {
    #[prost(message, optional, tag = "1")]
    pub receipt: Option<TransactionReceipt>,
    #[prost(bytes = "vec", tag = "2")]
    pub transaction_hash: Vec<u8>,
    #[prost(message, optional, tag = "3")]
    pub consensus_timestamp: Option<Timestamp>,
    #[prost(message, optional, tag = "4")]
    pub transaction_id: Option<TransactionId>,
    #[prost(string, tag = "5")]
    pub memo: String,
    #[prost(uint64, tag = "6")]
    pub transaction_fee: u64,
    #[prost(oneof = "transaction_record::Body", tags = "7, 8")]
    pub body: Option<transaction_record::Body>,
    #[prost(message, optional, tag = "10")]
    pub transfer_list: Option<TransferList>,
    #[prost(message, repeated, tag = "11")]
    pub token_transfer_lists: Vec<TokenTransferList>,
}

pub mod transaction_record {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Body {
        #[prost(message, tag = "7")]
        ContractCallResult(super::ContractFunctionResult),
        #[prost(message, tag = "8")]
        ContractCreateResult(super::ContractFunctionResult),
    }
}

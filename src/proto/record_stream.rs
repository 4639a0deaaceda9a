use super::basic_types::SemanticVersion;
use super::transaction::Transaction;
use super::record_types::TransactionRecord;

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct HashObject {
    #[prost(int32, tag = "1")]
    pub algorithm: i32,
    #[prost(int32, tag = "2")]
    pub length: i32,
    #[prost(bytes = "vec", tag = "3")]
    pub hash: Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RecordStreamItem {
    #[prost(message, optional, tag = "1")]
    pub transaction: Option<Transaction>,
    #[prost(message, optional, tag = "2")]
    pub record: Option<TransactionRecord>,
}

/// Body of a version 6 record file, following the four byte version word.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RecordStreamFile {
    #[prost(message, optional, tag = "1")]
    pub hapi_proto_version: Option<SemanticVersion>,
    #[prost(message, optional, tag = "2")]
    pub start_object_running_hash: Option<HashObject>,
    #[prost(message, repeated, tag = "3")]
    pub record_stream_items: Vec<RecordStreamItem>,
    #[prost(message, optional, tag = "4")]
    pub end_object_running_hash: Option<HashObject>,
    #[prost(int64, tag = "5")]
    pub block_number: i64,
}

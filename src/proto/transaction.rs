use super::basic_types::SignatureMap;

/// Outer transaction envelope. Current nodes populate `signed_transaction_bytes`, older ones set
/// `body_bytes` and `sig_map` directly.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Transaction {
    #[prost(message, optional, tag = "3")]
    pub sig_map: Option<SignatureMap>,
    #[prost(bytes = "vec", tag = "4")]
    pub body_bytes: Vec<u8>,
    #[prost(bytes = "vec", tag = "5")]
    pub signed_transaction_bytes: Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SignedTransaction {
    #[prost(bytes = "vec", tag = "1")]
    pub body_bytes: Vec<u8>,
    #[prost(message, optional, tag = "2")]
    pub sig_map: Option<SignatureMap>,
}

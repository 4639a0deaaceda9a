//! Shared HAPI value types: identifiers, timestamps, keys, signatures and transfer lists.

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct Timestamp {
    #[prost(int64, tag = "1")]
    pub seconds: i64,
    #[prost(int32, tag = "2")]
    pub nanos: i32,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct TimestampSeconds {
    #[prost(int64, tag = "1")]
    pub seconds: i64,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct Duration {
    #[prost(int64, tag = "1")]
    pub seconds: i64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SemanticVersion {
    #[prost(int32, tag = "1")]
    pub major: i32,
    #[prost(int32, tag = "2")]
    pub minor: i32,
    #[prost(int32, tag = "3")]
    pub patch: i32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct StringValue {
    #[prost(string, tag = "1")]
    pub value: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AccountId {
    #[prost(int64, tag = "1")]
    pub shard_num: i64,
    #[prost(int64, tag = "2")]
    pub realm_num: i64,
    #[prost(oneof = "account_id::Account", tags = "3, 4")]
    pub account: Option<account_id::Account>,
}

pub mod account_id {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Account {
        #[prost(int64, tag = "3")]
        AccountNum(i64),
        #[prost(bytes, tag = "4")]
        Alias(Vec<u8>),
    }
}

impl AccountId {
    pub fn with_num(num: i64) -> Self {
        Self { account: Some(account_id::Account::AccountNum(num)), ..Default::default() }
    }
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct TokenId {
    #[prost(int64, tag = "1")]
    pub shard_num: i64,
    #[prost(int64, tag = "2")]
    pub realm_num: i64,
    #[prost(int64, tag = "3")]
    pub token_num: i64,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct TopicId {
    #[prost(int64, tag = "1")]
    pub shard_num: i64,
    #[prost(int64, tag = "2")]
    pub realm_num: i64,
    #[prost(int64, tag = "3")]
    pub topic_num: i64,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct FileId {
    #[prost(int64, tag = "1")]
    pub shard_num: i64,
    #[prost(int64, tag = "2")]
    pub realm_num: i64,
    #[prost(int64, tag = "3")]
    pub file_num: i64,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct ScheduleId {
    #[prost(int64, tag = "1")]
    pub shard_num: i64,
    #[prost(int64, tag = "2")]
    pub realm_num: i64,
    #[prost(int64, tag = "3")]
    pub schedule_num: i64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ContractId {
    #[prost(int64, tag = "1")]
    pub shard_num: i64,
    #[prost(int64, tag = "2")]
    pub realm_num: i64,
    #[prost(oneof = "contract_id::Contract", tags = "3, 4")]
    pub contract: Option<contract_id::Contract>,
}

pub mod contract_id {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Contract {
        #[prost(int64, tag = "3")]
        ContractNum(i64),
        #[prost(bytes, tag = "4")]
        EvmAddress(Vec<u8>),
    }
}

/// Renders an entity identifier the way flat records carry it: the entity number as a decimal
/// string, or the hex alias for alias-addressed entities.
pub trait EntityNumber {
    fn entity_number(&self) -> String;
}

impl EntityNumber for AccountId {
    fn entity_number(&self) -> String {
        match &self.account {
            Some(account_id::Account::AccountNum(num)) => num.to_string(),
            Some(account_id::Account::Alias(alias)) => hex::encode(alias),
            None => "0".to_string()
        }
    }
}

impl EntityNumber for ContractId {
    fn entity_number(&self) -> String {
        match &self.contract {
            Some(contract_id::Contract::ContractNum(num)) => num.to_string(),
            Some(contract_id::Contract::EvmAddress(address)) => hex::encode(address),
            None => "0".to_string()
        }
    }
}

impl EntityNumber for TokenId {
    fn entity_number(&self) -> String {
        self.token_num.to_string()
    }
}

impl EntityNumber for TopicId {
    fn entity_number(&self) -> String {
        self.topic_num.to_string()
    }
}

impl EntityNumber for FileId {
    fn entity_number(&self) -> String {
        self.file_num.to_string()
    }
}

impl EntityNumber for ScheduleId {
    fn entity_number(&self) -> String {
        self.schedule_num.to_string()
    }
}

/// Entity number of an optional identifier, `"0"` when it is absent.
pub fn entity_number_or_zero<T: EntityNumber>(id: Option<&T>) -> String {
    id.map(EntityNumber::entity_number).unwrap_or_else(|| "0".to_string())
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TransactionId {
    #[prost(message, optional, tag = "1")]
    pub transaction_valid_start: Option<Timestamp>,
    #[prost(message, optional, tag = "2")]
    pub account_id: Option<AccountId>,
    #[prost(bool, tag = "3")]
    pub scheduled: bool,
    #[prost(int32, tag = "4")]
    pub nonce: i32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Key {
    #[prost(oneof = "key::Key", tags = "1, 2, 3, 4, 5, 6, 7, 8")]
    pub key: Option<key::Key>,
}

pub mod key {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Key {
        #[prost(message, tag = "1")]
        ContractId(super::ContractId),
        #[prost(bytes, tag = "2")]
        Ed25519(Vec<u8>),
        #[prost(bytes, tag = "3")]
        Rsa3072(Vec<u8>),
        #[prost(bytes, tag = "4")]
        Ecdsa384(Vec<u8>),
        #[prost(message, tag = "5")]
        ThresholdKey(super::ThresholdKey),
        #[prost(message, tag = "6")]
        KeyList(super::KeyList),
        #[prost(bytes, tag = "7")]
        EcdsaSecp256k1(Vec<u8>),
        #[prost(message, tag = "8")]
        DelegatableContractId(super::ContractId),
    }
}

impl Key {
    pub fn ed25519(bytes: Vec<u8>) -> Self {
        Self { key: Some(key::Key::Ed25519(bytes)) }
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct KeyList {
    #[prost(message, repeated, tag = "1")]
    pub keys: Vec<Key>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ThresholdKey {
    #[prost(uint32, tag = "1")]
    pub threshold: u32,
    #[prost(message, optional, tag = "2")]
    pub keys: Option<KeyList>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SignatureMap {
    #[prost(message, repeated, tag = "1")]
    pub sig_pair: Vec<SignaturePair>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SignaturePair {
    #[prost(bytes = "vec", tag = "1")]
    pub pub_key_prefix: Vec<u8>,
    #[prost(oneof = "signature_pair::Signature", tags = "2, 3, 4, 5, 6")]
    pub signature: Option<signature_pair::Signature>,
}

pub mod signature_pair {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Signature {
        #[prost(bytes, tag = "2")]
        Contract(Vec<u8>),
        #[prost(bytes, tag = "3")]
        Ed25519(Vec<u8>),
        #[prost(bytes, tag = "4")]
        Rsa3072(Vec<u8>),
        #[prost(bytes, tag = "5")]
        Ecdsa384(Vec<u8>),
        #[prost(bytes, tag = "6")]
        EcdsaSecp256k1(Vec<u8>),
    }

    impl Signature {
        /// Field name of the populated signature, as it appears in the HAPI schema.
        pub fn field_name(&self) -> &'static str {
            match self {
                Self::Contract(_) => "contract",
                Self::Ed25519(_) => "ed25519",
                Self::Rsa3072(_) => "RSA_3072",
                Self::Ecdsa384(_) => "ECDSA_384",
                Self::EcdsaSecp256k1(_) => "ECDSA_secp256k1"
            }
        }
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AccountAmount {
    #[prost(message, optional, tag = "1")]
    pub account_id: Option<AccountId>,
    #[prost(sint64, tag = "2")]
    pub amount: i64,
    #[prost(bool, tag = "3")]
    pub is_approval: bool,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TransferList {
    #[prost(message, repeated, tag = "1")]
    pub account_amounts: Vec<AccountAmount>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct NftTransfer {
    #[prost(message, optional, tag = "1")]
    pub sender_account_id: Option<AccountId>,
    #[prost(message, optional, tag = "2")]
    pub receiver_account_id: Option<AccountId>,
    #[prost(int64, tag = "3")]
    pub serial_number: i64,
    #[prost(bool, tag = "4")]
    pub is_approval: bool,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TokenTransferList {
    #[prost(message, optional, tag = "1")]
    pub token: Option<TokenId>,
    #[prost(message, repeated, tag = "2")]
    pub transfers: Vec<AccountAmount>,
    #[prost(message, repeated, tag = "3")]
    pub nft_transfers: Vec<NftTransfer>,
}

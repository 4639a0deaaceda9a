use sha2::{Digest, Sha384};

use crate::serializable::objects::{HashObject, MAX_SIG_LENGTH};
use crate::serializable::{ClassId, SelfSerializable, StreamObject};
use crate::stream::{ByteStream, Instant, StreamError};

pub const MAX_TRANSACTION_COUNT_PER_EVENT: usize = 245_760;

#[derive(Debug, Clone, PartialEq)]
pub struct BaseEventHashedData {
    pub creator_id: i64,
    pub self_parent_gen: i64,
    pub other_parent_gen: i64,
    pub self_parent_hash: Option<HashObject>,
    pub other_parent_hash: Option<HashObject>,
    pub time_created: Option<Instant>,
    pub total_byte_length: Option<i32>,
    pub transactions: Vec<Option<StreamObject>>,
    /// SHA-384 of the class header and every byte consumed for this event, hex encoded.
    pub hash: String
}

impl SelfSerializable for BaseEventHashedData {
    const CLASS_ID: u64 = 0x21C2620E9B6A2243;
    const CLASS_VERSION: i32 = 2;
    const NAME: &'static str = "BaseEventHashedData";

    fn deserialize(stream: &mut ByteStream<'_>, version: i32) -> Result<Self, StreamError> {
        let start = stream.position();

        let creator_id = stream.read_i64()?;
        let self_parent_gen = stream.read_i64()?;
        let other_parent_gen = stream.read_i64()?;
        let self_parent_hash = stream.read_object::<HashObject>()?;
        let other_parent_hash = stream.read_object::<HashObject>()?;
        let time_created = stream.read_instant()?;

        let (total_byte_length, transactions) = if version == 2 {
            let total_byte_length = stream.read_i32()?;
            let transactions = stream.read_serializable_list(MAX_TRANSACTION_COUNT_PER_EVENT, true, ClassId::Transaction)?;

            (Some(total_byte_length), transactions)
        } else {
            (None, stream.read_serializable_list(MAX_TRANSACTION_COUNT_PER_EVENT, false, ClassId::Transaction)?)
        };

        let mut hasher = Sha384::new();
        hasher.update(Self::CLASS_ID.to_be_bytes());
        hasher.update((Self::CLASS_VERSION as u32).to_be_bytes());
        hasher.update(stream.consumed_since(start));

        Ok(Self {
            creator_id,
            self_parent_gen,
            other_parent_gen,
            self_parent_hash,
            other_parent_hash,
            time_created,
            total_byte_length,
            transactions: transactions.unwrap_or_default(),
            hash: hex::encode(hasher.finalize())
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BaseEventUnhashedData {
    pub creator_seq: i64,
    pub other_id: i64,
    pub other_seq: i64,
    pub signature: Option<Vec<u8>>
}

impl SelfSerializable for BaseEventUnhashedData {
    const CLASS_ID: u64 = 0x33CB9D4AE38C9E91;
    const CLASS_VERSION: i32 = 1;
    const NAME: &'static str = "BaseEventUnhashedData";

    fn deserialize(stream: &mut ByteStream<'_>, _version: i32) -> Result<Self, StreamError> {
        Ok(Self {
            creator_seq: stream.read_i64()?,
            other_id: stream.read_i64()?,
            other_seq: stream.read_i64()?,
            signature: stream.read_byte_array(MAX_SIG_LENGTH, false)?
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConsensusData {
    pub generation: i64,
    pub round_created: i64,
    pub stale: bool,
    pub last_in_round_received: bool,
    pub consensus_timestamp: Option<Instant>,
    pub round_received: i64,
    pub consensus_order: i64
}

impl SelfSerializable for ConsensusData {
    const CLASS_ID: u64 = 0xDDF20B7CE114A711;
    const CLASS_VERSION: i32 = 2;
    const NAME: &'static str = "ConsensusData";

    fn deserialize(stream: &mut ByteStream<'_>, _version: i32) -> Result<Self, StreamError> {
        Ok(Self {
            generation: stream.read_i64()?,
            round_created: stream.read_i64()?,
            stale: stream.read_bool()?,
            last_in_round_received: stream.read_bool()?,
            consensus_timestamp: stream.read_instant()?,
            round_received: stream.read_i64()?,
            consensus_order: stream.read_i64()?
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConsensusEvent {
    pub hashed_data: Option<BaseEventHashedData>,
    pub unhashed_data: Option<BaseEventUnhashedData>,
    pub consensus_data: Option<ConsensusData>
}

impl SelfSerializable for ConsensusEvent {
    const CLASS_ID: u64 = 0xE250A9FBDCC4B1BA;
    const CLASS_VERSION: i32 = 1;
    const NAME: &'static str = "ConsensusEvent";

    fn deserialize(stream: &mut ByteStream<'_>, _version: i32) -> Result<Self, StreamError> {
        Ok(Self {
            hashed_data: stream.read_object()?,
            unhashed_data: stream.read_object()?,
            consensus_data: stream.read_object()?
        })
    }
}

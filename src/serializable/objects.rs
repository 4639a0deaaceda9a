use crate::serializable::SelfSerializable;
use crate::stream::{ByteStream, StreamError};

pub const MAX_SIG_LENGTH: usize = 384;
pub const TRANSACTION_MAX_BYTES: usize = 6_144;
pub const MAX_RECORD_LENGTH: usize = 64 * 1024;
pub const MAX_TRANSACTION_LENGTH: usize = 64 * 1024;

const TRANSACTION_CONTENTS_CHECKSUM: i32 = 277;
const TRANSACTION_SIGNATURES_CHECKSUM: i32 = 353;
const SIGNATURE_CHECKSUM: i32 = 439;
const PUBLIC_KEY_CHECKSUM: i32 = 541;
const MESSAGE_CHECKSUM: i32 = 647;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigestType {
    Sha384,
    Sha512
}

impl DigestType {
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            1_493_139_739 => Some(Self::Sha384),
            -1_882_633_858 => Some(Self::Sha512),
            _ => None
        }
    }

    pub fn output_length(self) -> usize {
        match self {
            Self::Sha384 => 48,
            Self::Sha512 => 64
        }
    }
}

/// Running hash written between records in the legacy stream.
#[derive(Debug, Clone, PartialEq)]
pub struct HashObject {
    pub digest_type: DigestType,
    pub value: Vec<u8>
}

impl SelfSerializable for HashObject {
    const CLASS_ID: u64 = 0xF422DA83A251741E;
    const CLASS_VERSION: i32 = 1;
    const NAME: &'static str = "Hash";

    fn deserialize(stream: &mut ByteStream<'_>, _version: i32) -> Result<Self, StreamError> {
        let code = stream.read_i32()?;
        let digest_type = DigestType::from_code(code).ok_or(StreamError::UnknownDigestType(code))?;
        let value = stream.read_byte_array(digest_type.output_length(), false)?
            .unwrap_or_default();

        if !value.iter().any(|byte| *byte != 0) {
            return Err(StreamError::EmptyHash);
        }

        Ok(Self { digest_type, value })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureType {
    Ed25519,
    Rsa,
    Ecdsa
}

impl SignatureType {
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Ed25519),
            1 => Some(Self::Rsa),
            2 => Some(Self::Ecdsa),
            _ => None
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Signature {
    pub signature_type: SignatureType,
    pub signature: Vec<u8>,
    pub public_key: Vec<u8>,
    pub message: Vec<u8>
}

impl Signature {
    fn read(stream: &mut ByteStream<'_>) -> Result<Self, StreamError> {
        let signature_length = stream.read_checked_length(SIGNATURE_CHECKSUM)?;
        let code = stream.read_i32()?;
        let signature_type = SignatureType::from_code(code).ok_or(StreamError::UnknownSignatureType(code))?;
        let signature = stream.read_fully(signature_length)?.to_vec();

        let public_key_length = stream.read_checked_length(PUBLIC_KEY_CHECKSUM)?;
        let public_key = stream.read_fully(public_key_length)?.to_vec();

        let message_length = stream.read_checked_length(MESSAGE_CHECKSUM)?;
        let message = stream.read_fully(message_length)?.to_vec();

        Ok(Self { signature_type, signature, public_key, message })
    }
}

/// Application transaction as gossiped between nodes, with its detached signatures.
#[derive(Debug, Clone, PartialEq)]
pub struct SwirldTransaction {
    pub system: bool,
    pub contents: Vec<u8>,
    pub signatures: Vec<Signature>
}

impl SelfSerializable for SwirldTransaction {
    const CLASS_ID: u64 = 0xA0EDA13E329FECCA;
    const CLASS_VERSION: i32 = 1;
    const NAME: &'static str = "Transaction";

    fn deserialize(stream: &mut ByteStream<'_>, _version: i32) -> Result<Self, StreamError> {
        let length = stream.read_checked_length(TRANSACTION_CONTENTS_CHECKSUM)?;

        if length > TRANSACTION_MAX_BYTES {
            return Err(StreamError::length_exceeded(length, TRANSACTION_MAX_BYTES));
        }

        let system = stream.read_bool()?;
        let contents = stream.read_fully(length)?.to_vec();
        let signature_count = stream.read_checked_length(TRANSACTION_SIGNATURES_CHECKSUM)?;

        let mut signatures = Vec::with_capacity(signature_count.min(stream.remaining()));

        for _ in 0..signature_count {
            signatures.push(Signature::read(stream)?);
        }

        Ok(Self { system, contents, signatures })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransactionV2 {
    pub contents: Vec<u8>
}

impl SelfSerializable for TransactionV2 {
    const CLASS_ID: u64 = 0x9FF79186F4C4DB97;
    const CLASS_VERSION: i32 = 2;
    const NAME: &'static str = "TransactionV2";

    fn deserialize(stream: &mut ByteStream<'_>, _version: i32) -> Result<Self, StreamError> {
        let length = stream.read_i32()?;

        if length < 0 {
            return Err(StreamError::NegativeLength(length));
        }

        let length = length as usize;

        if length > TRANSACTION_MAX_BYTES {
            return Err(StreamError::length_exceeded(length, TRANSACTION_MAX_BYTES));
        }

        Ok(Self { contents: stream.read_fully(length)?.to_vec() })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StateSignatureTransaction {
    pub is_freeze: bool,
    pub signature: Option<Vec<u8>>,
    pub last_round_received: i64
}

impl SelfSerializable for StateSignatureTransaction {
    const CLASS_ID: u64 = 0xAF7024C653CAABF4;
    const CLASS_VERSION: i32 = 2;
    const NAME: &'static str = "StateSignatureTransaction";

    fn deserialize(stream: &mut ByteStream<'_>, _version: i32) -> Result<Self, StreamError> {
        Ok(Self {
            is_freeze: stream.read_bool()?,
            signature: stream.read_byte_array(MAX_SIG_LENGTH, false)?,
            last_round_received: stream.read_i64()?
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BitsPerSecondTransaction {
    pub bits_per_second: Vec<i64>
}

impl SelfSerializable for BitsPerSecondTransaction {
    const CLASS_ID: u64 = 0x6922237D8F4DAC99;
    const CLASS_VERSION: i32 = 2;
    const NAME: &'static str = "BitsPerSecondTransaction";

    fn deserialize(stream: &mut ByteStream<'_>, _version: i32) -> Result<Self, StreamError> {
        Ok(Self { bits_per_second: stream.read_long_array()? })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PingTransaction {
    pub ping_values: Vec<i32>
}

impl SelfSerializable for PingTransaction {
    const CLASS_ID: u64 = 0xE98D3E2C500A6647;
    const CLASS_VERSION: i32 = 2;
    const NAME: &'static str = "PingTransaction";

    fn deserialize(stream: &mut ByteStream<'_>, _version: i32) -> Result<Self, StreamError> {
        Ok(Self { ping_values: stream.read_int_array()? })
    }
}

/// One transaction of a legacy record file: the serialized record followed by the serialized
/// transaction, both protobuf encoded.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordStreamObject {
    pub transaction_record: Vec<u8>,
    pub transaction: Vec<u8>
}

impl SelfSerializable for RecordStreamObject {
    const CLASS_ID: u64 = 0xE370929BA5429D8B;
    const CLASS_VERSION: i32 = 1;
    const NAME: &'static str = "RecordStreamObject";

    fn deserialize(stream: &mut ByteStream<'_>, _version: i32) -> Result<Self, StreamError> {
        let transaction_record = stream.read_byte_array(MAX_RECORD_LENGTH, false)?
            .ok_or(StreamError::MissingObject("transaction record"))?;
        let transaction = stream.read_byte_array(MAX_TRANSACTION_LENGTH, false)?
            .ok_or(StreamError::MissingObject("transaction"))?;

        Ok(Self { transaction_record, transaction })
    }
}

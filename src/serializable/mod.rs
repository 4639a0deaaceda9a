mod events;
mod objects;

use crate::stream::{ByteStream, StreamError, INTEGER_MIN_VALUE, LONG_MIN_VALUE};

pub use events::{
    BaseEventHashedData, BaseEventUnhashedData, ConsensusData, ConsensusEvent, MAX_TRANSACTION_COUNT_PER_EVENT
};
pub use objects::{
    BitsPerSecondTransaction, DigestType, HashObject, PingTransaction, RecordStreamObject, Signature, SignatureType,
    StateSignatureTransaction, SwirldTransaction, TransactionV2, MAX_RECORD_LENGTH, MAX_SIG_LENGTH,
    MAX_TRANSACTION_LENGTH, TRANSACTION_MAX_BYTES
};

/// A platform object that knows how to read itself once its class header has been consumed.
pub trait SelfSerializable: Sized {
    const CLASS_ID: u64;
    const CLASS_VERSION: i32;
    const NAME: &'static str;

    fn deserialize(stream: &mut ByteStream<'_>, version: i32) -> Result<Self, StreamError>;
}

fn validate_version(class: &'static str, version: i32, max: i32) -> Result<(), StreamError> {
    if version < 1 || version > max {
        return Err(StreamError::InvalidVersion { class, version, max });
    }

    Ok(())
}

//NOTE: Every wire type is known ahead of time, so the registry is a closed enum generated from this one
//      table. Adding a type here adds its class id lookup, its constructor arm and its StreamObject variant.
macro_rules! class_registry {
    ($($variant:ident => $object:ty),+ $(,)?) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum ClassId {
            $($variant),+
        }

        #[derive(Debug, Clone, PartialEq)]
        pub enum StreamObject {
            $($variant($object)),+
        }

        impl ClassId {
            pub const ALL: &'static [ClassId] = &[$(ClassId::$variant),+];

            pub fn id(self) -> u64 {
                match self {
                    $(ClassId::$variant => <$object>::CLASS_ID),+
                }
            }

            pub fn class_version(self) -> i32 {
                match self {
                    $(ClassId::$variant => <$object>::CLASS_VERSION),+
                }
            }

            pub fn name(self) -> &'static str {
                match self {
                    $(ClassId::$variant => <$object>::NAME),+
                }
            }

            fn construct(self, stream: &mut ByteStream<'_>, version: i32) -> Result<StreamObject, StreamError> {
                match self {
                    $(ClassId::$variant => Ok(StreamObject::$variant(<$object>::deserialize(stream, version)?))),+
                }
            }
        }

        impl StreamObject {
            pub fn class_id(&self) -> ClassId {
                match self {
                    $(StreamObject::$variant(_) => ClassId::$variant),+
                }
            }
        }

        $(
            impl TryFrom<StreamObject> for $object {
                type Error = StreamError;

                fn try_from(object: StreamObject) -> Result<Self, Self::Error> {
                    match object {
                        StreamObject::$variant(value) => Ok(value),
                        other => Err(StreamError::ClassMismatch {
                            expected: <$object>::NAME,
                            found: other.class_id().name()
                        })
                    }
                }
            }
        )+
    };
}

class_registry! {
    Hash => HashObject,
    Transaction => SwirldTransaction,
    TransactionV2 => TransactionV2,
    StateSignatureTransaction => StateSignatureTransaction,
    BitsPerSecondTransaction => BitsPerSecondTransaction,
    PingTransaction => PingTransaction,
    BaseEventHashedData => BaseEventHashedData,
    BaseEventUnhashedData => BaseEventUnhashedData,
    ConsensusData => ConsensusData,
    ConsensusEvent => ConsensusEvent,
    RecordStreamObject => RecordStreamObject,
}

impl ClassId {
    pub fn from_id(id: u64) -> Option<Self> {
        Self::ALL.iter().copied().find(|class| class.id() == id)
    }

    pub fn validate_version(self, version: i32) -> Result<(), StreamError> {
        validate_version(self.name(), version, self.class_version())
    }
}

impl ByteStream<'_> {
    /// Reads an optional class id and a version header, then the object itself.
    ///
    /// When `read_class_id` is set the registry decides the concrete type, otherwise `constructor`
    /// does. Sentinel values in either header word mean the object was written as null.
    pub fn read_serializable(&mut self, read_class_id: bool, constructor: Option<ClassId>) -> Result<Option<StreamObject>, StreamError> {
        let class_id = if read_class_id {
            let raw = self.read_i64()?;

            if raw == LONG_MIN_VALUE {
                return Ok(None);
            }

            Some(raw as u64)
        } else {
            None
        };

        let version = self.read_i32()?;

        if version == INTEGER_MIN_VALUE {
            return Ok(None);
        }

        let class = match class_id {
            Some(id) => ClassId::from_id(id).ok_or(StreamError::UnknownClassId(id))?,
            None => constructor.ok_or(StreamError::MissingConstructor)?
        };

        class.validate_version(version)?;

        class.construct(self, version).map(Some)
    }

    /// Reads a version header followed by an object of a statically known type.
    pub fn read_object<T: SelfSerializable>(&mut self) -> Result<Option<T>, StreamError> {
        let version = self.read_i32()?;

        if version == INTEGER_MIN_VALUE {
            return Ok(None);
        }

        validate_version(T::NAME, version, T::CLASS_VERSION)?;

        T::deserialize(self, version).map(Some)
    }

    /// Reads a length prefixed list of objects. A length of -1 is a null list, not an empty one.
    ///
    /// Lists are written either with every element carrying its own header, or in a compact form
    /// where a single class id and version are written before the first non-null element and every
    /// element is preceded by a null flag.
    pub fn read_serializable_list(&mut self, max_size: usize, read_class_id: bool, constructor: ClassId) -> Result<Option<Vec<Option<StreamObject>>>, StreamError> {
        let length = self.read_i32()?;

        if length == -1 {
            return Ok(None);
        }

        if length < 0 {
            return Err(StreamError::NegativeLength(length));
        }

        if length as usize > max_size {
            return Err(StreamError::ListTooLarge { length, max: max_size });
        }

        let length = length as usize;
        let mut objects = Vec::with_capacity(length.min(self.remaining()));

        if length == 0 {
            return Ok(Some(objects));
        }

        let all_same_class = self.read_bool()?;
        let mut shared_header: Option<(ClassId, i32)> = None;

        for _ in 0..length {
            if !all_same_class {
                objects.push(self.read_serializable(read_class_id, Some(constructor))?);
                continue;
            }

            if self.read_bool()? {
                objects.push(None);
                continue;
            }

            let (class, version) = match shared_header {
                Some(header) => header,
                None => {
                    let class = if read_class_id {
                        let id = self.read_u64()?;
                        ClassId::from_id(id).ok_or(StreamError::UnknownClassId(id))?
                    } else {
                        constructor
                    };

                    let version = self.read_i32()?;
                    class.validate_version(version)?;
                    shared_header = Some((class, version));

                    (class, version)
                }
            };

            objects.push(Some(class.construct(self, version)?));
        }

        Ok(Some(objects))
    }
}

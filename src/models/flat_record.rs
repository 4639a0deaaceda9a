use indexmap::map::Iter;
use indexmap::IndexMap;
use serde::{Serialize, Serializer};

use crate::models::{FieldValue, TxnType};

pub const TXN_TYPE_KEY: &str = "txn_type";

/// One output row: an insertion ordered accumulator of flattened fields.
///
/// Inserting a key that already exists replaces its value but keeps its original position, so
/// merging one record into another behaves like a dictionary spread where the later record wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlatRecord {
    fields: IndexMap<String, FieldValue>
}

impl FlatRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(key.into(), value.into());
    }

    /// Moves every field of `other` into this record. Fields of `other` win on collision.
    pub fn merge(&mut self, other: FlatRecord) {
        self.fields.extend(other.fields);
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(FieldValue::as_i64)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, String, FieldValue> {
        self.fields.iter()
    }

    pub fn txn_type(&self) -> Option<&str> {
        self.get(TXN_TYPE_KEY).and_then(FieldValue::as_str)
    }

    pub fn set_txn_type(&mut self, txn_type: TxnType) {
        self.insert(TXN_TYPE_KEY, txn_type.as_str());
    }

    pub fn tagged(mut self, txn_type: TxnType) -> Self {
        self.set_txn_type(txn_type);
        self
    }

    pub fn hex_encode_bytes(&mut self) {
        self.fields.values_mut().for_each(FieldValue::hex_encode_bytes);
    }

    pub fn to_json_line(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl Serialize for FlatRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(&self.fields)
    }
}

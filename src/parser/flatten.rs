use indexmap::IndexMap;

use crate::models::{FieldValue, FlatRecord};
use crate::parser::ParseError;
use crate::proto::{entity_number_or_zero, key, AccountAmount, EntityNumber, Key};

pub(crate) fn required<'a, T>(value: Option<&'a T>, context: &'static str, field: &'static str) -> Result<&'a T, ParseError> {
    value.ok_or_else(|| ParseError::validation(context, field))
}

/// Explodes account amounts into `{prefix}.accountNum.{i}` and `{prefix}.amount.{i}`, numbered from 1.
pub(crate) fn explode_account_amounts(record: &mut FlatRecord, prefix: &str, amounts: &[AccountAmount]) {
    for (index, amount) in amounts.iter().enumerate() {
        record.insert(format!("{prefix}.accountNum.{}", index + 1), entity_number_or_zero(amount.account_id.as_ref()));
    }

    for (index, amount) in amounts.iter().enumerate() {
        record.insert(format!("{prefix}.amount.{}", index + 1), amount.amount);
    }
}

/// ED25519 key bytes, or an empty value for any other kind of key.
pub(crate) fn ed25519_key(key: Option<&Key>) -> FieldValue {
    match key.and_then(|key| key.key.as_ref()) {
        Some(key::Key::Ed25519(bytes)) => FieldValue::bytes(bytes.clone()),
        _ => FieldValue::bytes(Vec::new())
    }
}

/// The populated key field, by its schema name. Key lists recurse.
pub(crate) fn key_summary(key: Option<&Key>) -> FieldValue {
    let mut entries = IndexMap::new();

    if let Some(inner) = key.and_then(|key| key.key.as_ref()) {
        let (name, value) = match inner {
            key::Key::ContractId(id) => ("contractID", FieldValue::from(id.entity_number())),
            key::Key::Ed25519(bytes) => ("ed25519", FieldValue::bytes(bytes.clone())),
            key::Key::Rsa3072(bytes) => ("RSA_3072", FieldValue::bytes(bytes.clone())),
            key::Key::Ecdsa384(bytes) => ("ECDSA_384", FieldValue::bytes(bytes.clone())),
            key::Key::ThresholdKey(threshold) => ("thresholdKey", FieldValue::from(threshold.threshold)),
            key::Key::KeyList(list) => ("keyList", FieldValue::list(list.keys.iter().map(|key| key_summary(Some(key))))),
            key::Key::EcdsaSecp256k1(bytes) => ("ECDSA_secp256k1", FieldValue::bytes(bytes.clone())),
            key::Key::DelegatableContractId(id) => ("delegatable_contract_id", FieldValue::from(id.entity_number()))
        };

        entries.insert(name.to_string(), value);
    }

    FieldValue::Map(entries)
}

mod field_value;
mod flat_record;
#[cfg(test)]
mod tests;
mod txn_type;

pub use field_value::FieldValue;
pub use flat_record::{FlatRecord, TXN_TYPE_KEY};
pub use txn_type::TxnType;

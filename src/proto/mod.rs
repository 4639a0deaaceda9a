//! Protobuf messages of the Hedera API that appear inside record files.
//!
//! Only the fields the decoder reads are declared; everything else on the wire is skipped by prost
//! as an unknown field.

mod basic_types;
mod body_types;
mod record_stream;
mod record_types;
mod transaction;

pub use basic_types::*;
pub use body_types::*;
pub use record_stream::{HashObject, RecordStreamFile, RecordStreamItem};
pub use record_types::*;
pub use transaction::{SignedTransaction, Transaction};

//! Decoder for Hedera record stream files.
//!
//! Version 5 files are walked as a framed object stream, version 6 files as a protobuf container.
//! Every transaction is flattened into one JSON object whose keys are stable across transaction
//! types, ready to be appended to a JSON lines sink.

pub mod actors;
pub mod config;
pub mod engine;
pub mod models;
pub mod parser;
pub mod proto;
pub mod records;
pub mod serializable;
pub mod sink;
pub mod stream;
pub mod types;

pub use parser::parse_chunk as parse;

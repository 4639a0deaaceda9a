use super::SinkActor;
use crate::models::FlatRecord;
use crate::sink::{JsonLinesSink, RecordSink, SinkError};
use anyhow::Result;
use rust_decimal::Decimal;
use std::fs;
use tempfile::tempdir;

struct FailingSink;

impl RecordSink for FailingSink {
    fn append(&mut self, _records: &[FlatRecord]) -> Result<usize, SinkError> {
        Err(SinkError::Io(std::io::Error::other("disk full")))
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        Ok(())
    }
}

fn batch(start: i64, count: i64) -> Vec<FlatRecord> {
    (start..start + count).map(|number| FlatRecord::new().with("nonce", number)).collect()
}

#[tokio::test]
async fn test_actor_writes_batches_in_acceptance_order() -> Result<()> {
    let directory = tempdir()?;
    let path = directory.path().join("out.json");
    let actor = SinkActor::spawn(JsonLinesSink::open(&path)?, 1);

    assert!(actor.accept(batch(0, 3)).await);
    assert!(actor.accept(Vec::new()).await);
    assert!(actor.accept(batch(3, 2)).await);

    assert_eq!(actor.despawn().await?, 5);

    let nonces: Vec<_> = fs::read_to_string(&path)?
        .lines()
        .map(|line| serde_json::from_str::<serde_json::Value>(line).map(|value| value["nonce"].clone()))
        .collect::<Result<_, _>>()?;

    assert_eq!(nonces, (0..5).map(serde_json::Value::from).collect::<Vec<_>>());

    Ok(())
}

#[tokio::test]
async fn test_actor_survives_sink_failures() -> Result<()> {
    let actor = SinkActor::spawn(FailingSink, 4);

    assert!(actor.accept(batch(0, 2)).await);
    assert!(actor.accept(batch(2, 2)).await);

    assert_eq!(actor.despawn().await?, 0);

    Ok(())
}

#[tokio::test]
async fn test_actor_counts_rows_flushed_from_a_failed_batch() -> Result<()> {
    let directory = tempdir()?;
    let path = directory.path().join("out.json");
    let actor = SinkActor::spawn(JsonLinesSink::open(&path)?, 2);

    let mut failing = batch(0, 2);
    failing.push(FlatRecord::new().with("nonce", Decimal::MAX));
    failing.extend(batch(3, 1));

    assert!(actor.accept(failing).await);
    assert!(actor.accept(batch(10, 1)).await);

    assert_eq!(actor.despawn().await?, 3);
    assert_eq!(fs::read_to_string(&path)?.lines().count(), 3);

    Ok(())
}

use std::mem;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;
use futures::future::join_all;
use tokio::sync::Semaphore;
use tokio::task::spawn_blocking;
use tracing::{error, info, warn};

use crate::actors::SinkActor;
use crate::config::PipelineConfig;
use crate::parser::{parse_chunk, ChunkOutcome, ParseError};
use crate::records::{load_txns, mark_processed, LoadedFile, RawTransactionEntry};
use crate::sink::RecordSink;

/// Counters of one engine run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineReport {
    pub files_read: usize,
    pub files_failed: usize,
    pub records_written: usize,
    pub transactions_skipped: usize,
    pub chunks_aborted: usize
}

/// Decodes one chunk of entries stamped with the batch processed time.
pub type ChunkDecoder = fn(&[RawTransactionEntry], &str) -> Result<ChunkOutcome, ParseError>;

/// Reads record files in order and decodes their transactions on a bounded pool of workers.
pub struct AsyncEngine {
    config: PipelineConfig,
    backpressure: usize,
    decoder: ChunkDecoder
}

impl AsyncEngine {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            backpressure: 16,
            decoder: parse_chunk
        }
    }

    /// Caps how many decoded batches may wait for the sink.
    pub fn with_backpressure(mut self, backpressure: usize) -> Self {
        self.backpressure = backpressure;
        self
    }

    /// Replaces the per chunk decoder, `parse_chunk` by default.
    pub fn with_chunk_decoder(mut self, decoder: ChunkDecoder) -> Self {
        self.decoder = decoder;
        self
    }

    /// Processes every file, sorted by path, and appends the decoded rows to `sink`.
    ///
    /// Transactions accumulate across files and are dispatched whenever more than `batch_size`
    /// are pending, then once more after the last file. A file that cannot be read is logged and
    /// skipped.
    pub async fn run<S: RecordSink>(&self, mut files: Vec<PathBuf>, sink: S) -> anyhow::Result<EngineReport> {
        files.sort();

        let actor = SinkActor::spawn(sink, self.backpressure);
        let mut report = EngineReport::default();
        let mut pending = Vec::new();

        for path in files {
            match self.load(&path).await {
                Ok(loaded) => {
                    info!("Loaded [{}] {} transactions from [{}]", loaded.entries.len(), loaded.version, path.display());
                    report.files_read += 1;
                    pending.extend(loaded.entries);
                }
                Err(error) => {
                    report.files_failed += 1;
                    error!("Abandoning [{}]: {error:#}", path.display());
                }
            }

            if pending.len() > self.config.batch_size {
                self.dispatch(mem::take(&mut pending), &actor, &mut report).await;
            }
        }

        if !pending.is_empty() {
            self.dispatch(pending, &actor, &mut report).await;
        }

        report.records_written = actor.despawn().await?;

        info!("Finished run: {report:?}");
        Ok(report)
    }

    async fn load(&self, path: &Path) -> anyhow::Result<LoadedFile> {
        if let Err(error) = mark_processed(path) {
            warn!("Unable to mark [{}] as processed: {error}", path.display());
        }

        let path = path.to_path_buf();
        let loaded = spawn_blocking(move || load_txns(&path)).await??;

        Ok(loaded)
    }

    /// Splits a batch into contiguous chunks and decodes them in parallel, at most `max_workers`
    /// at a time. Rows reach the sink in chunk submission order.
    async fn dispatch(&self, entries: Vec<RawTransactionEntry>, actor: &SinkActor, report: &mut EngineReport) {
        let processed: Arc<str> = Arc::from(Utc::now().format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string());
        let semaphore = Arc::new(Semaphore::new(self.config.max_workers));
        let chunks = into_chunks(entries, self.config.chunk_size);

        info!("Dispatching [{}] chunks for batch processed at [{processed}]", chunks.len());

        let decoder = self.decoder;

        let workers = chunks.into_iter().map(|chunk| {
            let semaphore = semaphore.clone();
            let processed = processed.clone();

            async move {
                let _permit = semaphore.acquire_owned().await?;
                let outcome = spawn_blocking(move || decoder(&chunk, &processed)).await??;

                Ok::<ChunkOutcome, anyhow::Error>(outcome)
            }
        });

        let mut records = Vec::new();

        for (index, result) in join_all(workers).await.into_iter().enumerate() {
            match result {
                Ok(outcome) => {
                    report.transactions_skipped += outcome.skipped;
                    records.extend(outcome.records);
                }
                Err(error) => {
                    //NOTE: Rows already decoded by an aborted chunk are dropped with it
                    error!("Chunk [{index}] aborted: {error:#}");
                    report.chunks_aborted += 1;
                }
            }
        }

        let count = records.len();

        if !actor.accept(records).await {
            error!("Sink stopped before a batch of [{count}] records could be written");
        }
    }
}

fn into_chunks(entries: Vec<RawTransactionEntry>, chunk_size: usize) -> Vec<Vec<RawTransactionEntry>> {
    let mut remaining = entries.into_iter().peekable();
    let mut chunks = Vec::new();

    while remaining.peek().is_some() {
        chunks.push(remaining.by_ref().take(chunk_size.max(1)).collect());
    }

    chunks
}

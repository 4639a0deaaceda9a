use tokio::sync::mpsc;
use tokio::task::{spawn_blocking, JoinError, JoinHandle};
use tracing::{debug, error};

use crate::models::FlatRecord;
use crate::sink::RecordSink;

/// Owns the sink on a blocking thread and writes batches in the order they are accepted.
pub struct SinkActor {
    sender: mpsc::Sender<Vec<FlatRecord>>,
    handle: JoinHandle<usize>
}

impl SinkActor {
    /// Spawns the writer. At most `backpressure` batches wait in its queue.
    pub fn spawn<S: RecordSink>(mut sink: S, backpressure: usize) -> Self {
        let (sender, mut receiver) = mpsc::channel::<Vec<FlatRecord>>(backpressure.max(1));

        let handle = spawn_blocking(move || {
            let mut written = 0;

            while let Some(batch) = receiver.blocking_recv() {
                match sink.append(&batch) {
                    Ok(count) => {
                        written += count;
                        debug!("Appended [{count}] records to sink");
                    }
                    Err(error) => {
                        written += error.written();
                        error!("Unable to append batch of [{}] records: {error}", batch.len());
                    }
                }

                if let Err(error) = sink.flush() {
                    error!("Unable to flush sink: {error}");
                }
            }

            written
        });

        Self { sender, handle }
    }

    /// Queues a batch, waiting while the queue is full. Returns false once the writer has stopped.
    pub async fn accept(&self, batch: Vec<FlatRecord>) -> bool {
        if batch.is_empty() {
            return true;
        }

        self.sender.send(batch).await.is_ok()
    }

    /// Closes the queue, waits for every accepted batch to be written and returns the row count.
    pub async fn despawn(self) -> Result<usize, JoinError> {
        drop(self.sender);
        self.handle.await
    }
}

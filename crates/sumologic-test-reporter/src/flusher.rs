//! Batch delivery to the collector with a single-flight guard.
//!
//! Each sync attempt captures the oldest bounded prefix of the buffer, sends
//! it as one POST, and trims the buffer only on confirmed acceptance. At most
//! one transmission is ever in flight; overlapping scheduler ticks and the
//! shutdown drain degrade to no-ops instead of racing.
//!
//! Retry is purely interval-driven: a failing endpoint is retried on every
//! scheduler tick indefinitely, with no backoff and no attempt cap.

use crate::aggregator::Aggregator;
use crate::transport::{CollectorRequest, Transport};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{debug, error};

/// Maximum number of lines shipped per sync attempt.
pub const MAX_BATCH_LINES: usize = 100;

/// Result of one sync attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Nothing to do: buffer empty or another transmission in flight.
    Skipped,
    /// The collector accepted the batch; that many lines were trimmed.
    Flushed(usize),
    /// Transport error or rejecting status; the buffer was left untouched.
    Failed,
}

#[derive(Clone)]
pub struct Flusher {
    aggregator: Arc<Mutex<Aggregator>>,
    transport: Arc<dyn Transport>,
    source_address: String,
    in_flight: Arc<AtomicBool>,
}

#[allow(clippy::expect_used)]
impl Flusher {
    pub fn new(
        aggregator: Arc<Mutex<Aggregator>>,
        transport: Arc<dyn Transport>,
        source_address: String,
    ) -> Self {
        Flusher {
            aggregator,
            transport,
            source_address,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Attempts to ship one batch of buffered lines.
    ///
    /// No-op if the buffer is empty or a transmission is already in flight.
    /// On acceptance the shipped lines are trimmed; on any failure the buffer
    /// is untouched and the same lines are retried on the next tick.
    pub async fn sync(&self) -> SyncOutcome {
        if self.aggregator.lock().expect("lock poisoned").is_empty() {
            return SyncOutcome::Skipped;
        }

        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("sync already in flight, skipping tick");
            return SyncOutcome::Skipped;
        }

        // Deterministic batch: the oldest lines at the moment of the attempt.
        // Lines appended while the request is pending are not part of it.
        let batch = self
            .aggregator
            .lock()
            .expect("lock poisoned")
            .peek_batch(MAX_BATCH_LINES);
        if batch.is_empty() {
            self.in_flight.store(false, Ordering::Release);
            return SyncOutcome::Skipped;
        }

        let request = CollectorRequest {
            url: self.source_address.clone(),
            body: batch.join("\n"),
        };

        let outcome = match self.transport.send(request).await {
            Ok(response) if response.is_accepted() => {
                self.aggregator
                    .lock()
                    .expect("lock poisoned")
                    .trim_front(batch.len());
                debug!("shipped {} event lines to collector", batch.len());
                SyncOutcome::Flushed(batch.len())
            }
            Ok(response) => {
                error!(
                    "failed to send data to collector: rejected with status {}",
                    response.status
                );
                SyncOutcome::Failed
            }
            Err(e) => {
                error!("failed to send data to collector: {e}");
                SyncOutcome::Failed
            }
        };

        self.in_flight.store(false, Ordering::Release);
        outcome
    }
}

//! Lifecycle controller: maps test-runner signals to buffered event lines
//! and drives the periodic flush loop.
//!
//! # Shutdown
//!
//! On the `end` signal the reporter stops the flush loop and issues one last
//! best-effort sync. That final attempt is not awaited; if the process exits
//! before it completes, remaining entries are lost (delivery is best-effort,
//! not guaranteed).

use crate::aggregator::Aggregator;
use crate::config::Config;
use crate::error::ReporterError;
use crate::event::{serialize_event, EventKind};
use crate::flusher::Flusher;
use crate::transport::{HttpTransport, Transport};
use serde::Serialize;
use serde_json::{json, Value};
use std::fmt;
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tokio::time::{interval, Duration};
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Buffers lifecycle events and ships them to the collector on a fixed
/// interval.
///
/// Must be created inside a tokio runtime: construction spawns the flush
/// loop as a background task.
pub struct Reporter {
    aggregator: Arc<Mutex<Aggregator>>,
    flusher: Flusher,
    cancel_token: CancellationToken,
    run_start: Mutex<Option<Instant>>,
}

#[allow(clippy::expect_used)]
impl Reporter {
    /// Creates a reporter with the default HTTP transport and starts the
    /// flush loop.
    ///
    /// # Errors
    ///
    /// Returns [`ReporterError::InvalidConfig`] if the configuration is
    /// invalid; the engine never starts in an invalid state.
    pub fn new(config: Config) -> Result<Self, ReporterError> {
        Self::with_transport(config, Arc::new(HttpTransport::new()))
    }

    /// Creates a reporter with an injected transport capability.
    pub fn with_transport(
        config: Config,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, ReporterError> {
        config.validate()?;

        let aggregator = Arc::new(Mutex::new(Aggregator::new()));
        let flusher = Flusher::new(
            Arc::clone(&aggregator),
            transport,
            config.source_address.clone(),
        );
        let cancel_token = CancellationToken::new();

        Self::spawn_flush_loop(
            flusher.clone(),
            cancel_token.clone(),
            config.sync_interval_ms,
        );

        Ok(Reporter {
            aggregator,
            flusher,
            cancel_token,
            run_start: Mutex::new(None),
        })
    }

    fn spawn_flush_loop(flusher: Flusher, cancel_token: CancellationToken, interval_ms: u64) {
        tokio::spawn(async move {
            let mut flush_interval = interval(Duration::from_millis(interval_ms));
            flush_interval.tick().await; // discard first tick, which is instantaneous

            loop {
                tokio::select! {
                    _ = flush_interval.tick() => {
                        flusher.sync().await;
                    }
                    () = cancel_token.cancelled() => {
                        debug!("flush loop stopped");
                        break;
                    }
                }
            }
        });
    }

    /// Records one lifecycle event.
    ///
    /// Every kind appends exactly one serialized line. `Start` additionally
    /// captures the run clock; `End` augments its payload with the run
    /// duration in milliseconds, stops the flush loop, and issues the final
    /// best-effort sync.
    pub fn emit<T: Serialize + fmt::Debug>(&self, kind: EventKind, data: &T) {
        match kind {
            EventKind::Start => {
                *self.run_start.lock().expect("lock poisoned") = Some(Instant::now());
                self.append(kind, data);
            }
            EventKind::End => {
                let duration_ms = self
                    .run_start
                    .lock()
                    .expect("lock poisoned")
                    .map_or(0, |start| {
                        u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
                    });
                let payload = augment_with_duration(data, duration_ms);
                self.append(kind, &payload);

                self.stop();

                // Final drain; completion is deliberately not awaited.
                let flusher = self.flusher.clone();
                tokio::spawn(async move {
                    flusher.sync().await;
                });
            }
            _ => self.append(kind, data),
        }
    }

    /// Stops the periodic flush loop. Idempotent.
    ///
    /// An in-flight transmission is allowed to complete or fail on its own.
    pub fn stop(&self) {
        self.cancel_token.cancel();
    }

    /// Number of buffered lines not yet confirmed delivered.
    #[must_use]
    pub fn pending_events(&self) -> usize {
        self.aggregator.lock().expect("lock poisoned").len()
    }

    fn append<T: Serialize + fmt::Debug>(&self, kind: EventKind, data: &T) {
        let line = serialize_event(kind, data);
        self.aggregator.lock().expect("lock poisoned").push(line);
    }
}

/// Adds a `duration` field (milliseconds) to the `end` payload.
///
/// Non-object payloads cannot carry the extra field directly, so they are
/// wrapped under a `payload` key instead.
fn augment_with_duration<T: Serialize + fmt::Debug>(data: &T, duration_ms: u64) -> Value {
    match serde_json::to_value(data) {
        Ok(Value::Object(mut map)) => {
            map.insert("duration".to_string(), json!(duration_ms));
            Value::Object(map)
        }
        Ok(other) => json!({ "payload": other, "duration": duration_ms }),
        Err(_) => json!({ "payload": format!("{data:?}"), "duration": duration_ms }),
    }
}

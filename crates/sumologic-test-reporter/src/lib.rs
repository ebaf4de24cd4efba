//! Test-run telemetry reporter for Sumo Logic HTTP collector sources.
//!
//! This crate buffers structured lifecycle events emitted during a test run
//! and ships them, in bounded batches, to a Sumo Logic collector endpoint
//! over HTTP POST without blocking the test execution itself.
//!
//! # Architecture
//!
//! ```text
//!   Lifecycle signals
//!         │
//!         v
//!   ┌──────────────┐
//!   │   Reporter   │  (maps signals to serialized event lines)
//!   └──────┬───────┘
//!          │
//!          v
//!   ┌──────────────┐
//!   │  Aggregator  │  (FIFO buffer of serialized lines)
//!   └──────┬───────┘
//!          │  periodic tick
//!          v
//!   ┌──────────────┐
//!   │   Flusher    │  (single-flight batch POST, up to 100 lines)
//!   └──────┬───────┘
//!          │
//!          v
//!   ┌──────────────┐
//!   │  Collector   │
//!   └──────────────┘
//! ```
//!
//! Entries leave the buffer only after the collector has accepted the batch
//! containing them; a failed delivery leaves the buffer untouched and the
//! same entries are retried on the next scheduler tick.

#![cfg_attr(not(test), deny(clippy::panic))]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::todo))]
#![cfg_attr(not(test), deny(clippy::unimplemented))]

pub mod aggregator;
pub mod config;
pub mod error;
pub mod event;
pub mod flusher;
pub mod reporter;
pub mod transport;

pub use config::Config;
pub use error::ReporterError;
pub use event::EventKind;
pub use reporter::Reporter;
pub use transport::{CollectorRequest, CollectorResponse, HttpTransport, Transport};

//! Lifecycle event kinds and loss-free serialization into collector lines.
//!
//! Every lifecycle signal produces exactly one serialized line, even when the
//! payload refuses structured serialization: serialization degrades through a
//! fallback chain instead of propagating an error to the caller.

use chrono::{DateTime, Local};
use serde::Serialize;
use std::fmt;

/// Timestamp layout for the `time` field of each event line, e.g.
/// `2026-08-29 14:03:07,412 +0000`.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f %z";

/// Line emitted when a payload cannot be serialized at all.
pub const SERIALIZATION_ERROR_SENTINEL: &str = "error serializing event";

/// The lifecycle signals a test runner can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Start,
    RunnerStart,
    SuiteStart,
    TestStart,
    TestPending,
    TestPass,
    TestFail,
    TestEnd,
    SuiteEnd,
    RunnerEnd,
    End,
}

impl EventKind {
    /// Wire name of the event as it appears in the `event` field.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Start => "start",
            EventKind::RunnerStart => "runner:start",
            EventKind::SuiteStart => "suite:start",
            EventKind::TestStart => "test:start",
            EventKind::TestPending => "test:pending",
            EventKind::TestPass => "test:pass",
            EventKind::TestFail => "test:fail",
            EventKind::TestEnd => "test:end",
            EventKind::SuiteEnd => "suite:end",
            EventKind::RunnerEnd => "runner:end",
            EventKind::End => "end",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Serialize)]
struct Envelope<'a, T: Serialize> {
    time: &'a str,
    event: &'a str,
    data: &'a T,
}

/// Format a timestamp for the `time` field of an event line.
#[must_use]
pub fn format_timestamp(time: DateTime<Local>) -> String {
    time.format(TIMESTAMP_FORMAT).to_string()
}

/// Serialize a lifecycle event into a single collector line. Never fails.
///
/// Fallback chain:
/// 1. structured JSON of the full `{time, event, data}` envelope;
/// 2. same envelope with the payload coerced to its textual representation;
/// 3. the fixed [`SERIALIZATION_ERROR_SENTINEL`] line.
pub fn serialize_event<T: Serialize + fmt::Debug>(kind: EventKind, data: &T) -> String {
    let time = format_timestamp(Local::now());
    serialize_event_at(&time, kind, data)
}

pub(crate) fn serialize_event_at<T: Serialize + fmt::Debug>(
    time: &str,
    kind: EventKind,
    data: &T,
) -> String {
    let envelope = Envelope {
        time,
        event: kind.as_str(),
        data,
    };
    if let Ok(line) = serde_json::to_string(&envelope) {
        return line;
    }

    let textual = format!("{data:?}");
    let coerced = Envelope {
        time,
        event: kind.as_str(),
        data: &textual,
    };
    if let Ok(line) = serde_json::to_string(&coerced) {
        return line;
    }

    match serde_json::to_string(SERIALIZATION_ERROR_SENTINEL) {
        Ok(line) => line,
        Err(_) => format!("\"{SERIALIZATION_ERROR_SENTINEL}\""),
    }
}

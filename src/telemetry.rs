//! Library telemetry events and sinks.
//!
//! The review store is an embedded client component, but it still benefits
//! from lightweight telemetry to support debugging and to capture
//! operational signals such as refresh latency against the backend.

use std::io;

use serde::{Deserialize, Serialize};

/// A structured telemetry event emitted by the review store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TelemetryEvent {
    /// Records a completed refresh round trip.
    RefreshLatencyRecorded {
        /// Wall-clock milliseconds for the list call and state replacement.
        latency_ms: u64,
        /// Number of reviews in the fetched listing.
        review_count: usize,
    },
    /// Records a completed submission round trip.
    SubmitLatencyRecorded {
        /// Wall-clock milliseconds for the create call.
        latency_ms: u64,
        /// Whether the server echoed the stored review back.
        echoed: bool,
    },
}

/// A sink that can record telemetry events.
pub trait TelemetrySink: Send + Sync {
    /// Records a telemetry event.
    fn record(&self, event: TelemetryEvent);
}

/// Telemetry sink that drops all events.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTelemetrySink;

impl TelemetrySink for NoopTelemetrySink {
    fn record(&self, _event: TelemetryEvent) {}
}

/// Telemetry sink that writes events to stderr as JSON lines.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrJsonlTelemetrySink;

impl TelemetrySink for StderrJsonlTelemetrySink {
    fn record(&self, event: TelemetryEvent) {
        let Ok(serialised) = serde_json::to_string(&event) else {
            return;
        };
        // Telemetry must never take the caller down with it.
        let _ignored = writeln_stderr(&serialised);
    }
}

fn writeln_stderr(message: &str) -> io::Result<()> {
    use io::Write;

    let stderr = io::stderr();
    let mut handle = stderr.lock();
    writeln!(handle, "{message}")
}

#[cfg(feature = "test-support")]
pub mod test_support {
    //! Telemetry doubles for tests.

    use std::sync::{Mutex, PoisonError};

    use super::{TelemetryEvent, TelemetrySink};

    /// Sink that captures events for later assertion.
    #[derive(Debug, Default)]
    pub struct RecordingTelemetrySink {
        events: Mutex<Vec<TelemetryEvent>>,
    }

    impl RecordingTelemetrySink {
        /// Creates an empty recording sink.
        #[must_use]
        pub const fn new() -> Self {
            Self {
                events: Mutex::new(Vec::new()),
            }
        }

        /// Returns the captured events, clearing the sink.
        #[must_use]
        pub fn take(&self) -> Vec<TelemetryEvent> {
            self.events
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .drain(..)
                .collect()
        }

        /// Returns a copy of the captured events.
        #[must_use]
        pub fn events(&self) -> Vec<TelemetryEvent> {
            self.events
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone()
        }
    }

    impl TelemetrySink for RecordingTelemetrySink {
        fn record(&self, event: TelemetryEvent) {
            self.events
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(event);
        }
    }
}

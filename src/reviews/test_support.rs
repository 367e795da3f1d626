//! Observer doubles for review store tests.

use std::sync::{Mutex, PoisonError};

use crate::api::error::ApiError;

use super::observer::{ReviewEvent, ReviewObserver, ReviewsSnapshot};

/// Observer that captures every event for later assertion.
///
/// # Examples
///
/// ```
/// use vitrine::reviews::test_support::RecordingObserver;
/// use vitrine::reviews::{ReviewEvent, ReviewObserver, ReviewsSnapshot};
///
/// let observer = RecordingObserver::new();
/// observer.on_event(&ReviewEvent::Updated(ReviewsSnapshot::default()));
/// assert_eq!(observer.updates().len(), 1);
/// ```
#[derive(Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<ReviewEvent>>,
}

impl RecordingObserver {
    /// Creates an observer with no captured events.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
        }
    }

    /// Returns a copy of every captured event, in delivery order.
    #[must_use]
    pub fn events(&self) -> Vec<ReviewEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the snapshots from captured update events.
    #[must_use]
    pub fn updates(&self) -> Vec<ReviewsSnapshot> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                ReviewEvent::Updated(snapshot) => Some(snapshot),
                ReviewEvent::RefreshFailed { .. } => None,
            })
            .collect()
    }

    /// Returns the errors from captured refresh failures.
    #[must_use]
    pub fn failures(&self) -> Vec<ApiError> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                ReviewEvent::RefreshFailed { error } => Some(error),
                ReviewEvent::Updated(_) => None,
            })
            .collect()
    }
}

impl ReviewObserver for RecordingObserver {
    fn on_event(&self, event: &ReviewEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
    }
}

//! Change notification for review store observers.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use crate::api::error::ApiError;
use crate::api::models::{Review, ReviewStatistics};

/// Immutable copy of the store's current view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewsSnapshot {
    /// Reviews in display order, most recent first.
    pub reviews: Vec<Review>,
    /// Aggregate statistics for the collection.
    pub stats: ReviewStatistics,
}

/// Notification raised by the review store.
#[derive(Debug, Clone, PartialEq)]
pub enum ReviewEvent {
    /// The store applied a successful refresh or an optimistic submission.
    Updated(ReviewsSnapshot),
    /// A refresh failed and the previous view was kept.
    RefreshFailed {
        /// The failure the store absorbed.
        error: ApiError,
    },
}

/// Observer of review store changes.
///
/// Observers run synchronously, in registration order, outside the store's
/// state lock. A panicking observer is isolated: the remaining observers
/// still run and store state is unaffected.
pub trait ReviewObserver: Send + Sync {
    /// Receives a store notification.
    fn on_event(&self, event: &ReviewEvent);
}

/// Handle identifying a subscription, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

/// Ordered observer registry with panic isolation.
#[derive(Default)]
pub(crate) struct ObserverRegistry {
    next_id: AtomicU64,
    entries: Mutex<Vec<(ObserverId, Arc<dyn ReviewObserver>)>>,
}

impl ObserverRegistry {
    /// Registers an observer at the end of the notification order.
    pub(crate) fn subscribe(&self, observer: Arc<dyn ReviewObserver>) -> ObserverId {
        let id = ObserverId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, observer));
        id
    }

    /// Removes a registered observer, reporting whether it was present.
    pub(crate) fn unsubscribe(&self, id: ObserverId) -> bool {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        let before = entries.len();
        entries.retain(|(entry_id, _)| *entry_id != id);
        entries.len() != before
    }

    /// Notifies all observers in registration order.
    ///
    /// The registry lock is released before any observer runs, so observers
    /// may subscribe or unsubscribe reentrantly.
    pub(crate) fn notify(&self, event: &ReviewEvent) {
        let observers: Vec<Arc<dyn ReviewObserver>> = self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, observer)| Arc::clone(observer))
            .collect();
        for observer in observers {
            if catch_unwind(AssertUnwindSafe(|| observer.on_event(event))).is_err() {
                tracing::warn!("review observer panicked during notification");
            }
        }
    }
}

//! The polling review store.

use std::ops::RangeInclusive;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::api::error::ApiError;
use crate::api::gateway::ReviewGateway;
use crate::api::models::{NewReview, Review, ReviewListing, ReviewReceipt, ReviewStatistics};
use crate::telemetry::{NoopTelemetrySink, TelemetryEvent, TelemetrySink};

use super::observer::{ObserverId, ObserverRegistry, ReviewEvent, ReviewObserver, ReviewsSnapshot};

/// Default period between background refreshes.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(30_000);
/// Default delay before the reconciling refresh that follows a submission.
pub const DEFAULT_RECONCILE_DELAY: Duration = Duration::from_millis(1_000);

/// Ratings the backend accepts.
const RATING_RANGE: RangeInclusive<u8> = 1..=5;

/// Store lifecycle phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Lifecycle {
    /// Not initialised, or destroyed.
    #[default]
    Idle,
    /// Initial refresh in flight.
    Starting,
    /// Poll task running.
    Running,
}

#[derive(Default)]
struct StoreState {
    reviews: Vec<Review>,
    stats: ReviewStatistics,
    lifecycle: Lifecycle,
    /// Bumped by destroy so stale completions can be recognised.
    generation: u64,
    poll_task: Option<JoinHandle<()>>,
}

struct StoreInner {
    gateway: Arc<dyn ReviewGateway>,
    telemetry: Arc<dyn TelemetrySink>,
    observers: ObserverRegistry,
    poll_interval: Duration,
    reconcile_delay: Duration,
    state: Mutex<StoreState>,
}

impl StoreInner {
    fn state(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn snapshot_locked(state: &StoreState) -> ReviewsSnapshot {
        ReviewsSnapshot {
            reviews: state.reviews.clone(),
            stats: state.stats.clone(),
        }
    }

    fn is_stale(&self, generation: u64) -> bool {
        self.state().generation != generation
    }

    /// Fetches the listing and replaces local state wholesale.
    ///
    /// `generation` pins the call to the store generation observed when it
    /// was issued; a completion whose generation has moved on (the store was
    /// destroyed meanwhile) is discarded without touching state or
    /// observers.
    async fn refresh_once(&self, generation: u64) -> Result<(), ApiError> {
        let started = Instant::now();
        match self.gateway.list_reviews().await {
            Ok(listing) => {
                let Some(snapshot) = self.apply_listing(listing, generation) else {
                    return Ok(());
                };
                self.telemetry.record(TelemetryEvent::RefreshLatencyRecorded {
                    latency_ms: elapsed_ms(started),
                    review_count: snapshot.reviews.len(),
                });
                self.observers.notify(&ReviewEvent::Updated(snapshot));
                Ok(())
            }
            Err(error) => {
                if self.is_stale(generation) {
                    return Ok(());
                }
                tracing::warn!("review refresh failed: {error}");
                self.observers.notify(&ReviewEvent::RefreshFailed {
                    error: error.clone(),
                });
                Err(error)
            }
        }
    }

    /// Replaces state with the fetched listing unless the generation is
    /// stale.
    fn apply_listing(&self, listing: ReviewListing, generation: u64) -> Option<ReviewsSnapshot> {
        let mut state = self.state();
        if state.generation != generation {
            return None;
        }
        state.reviews = listing.reviews;
        state.stats = listing.stats;
        Some(Self::snapshot_locked(&state))
    }

    /// Applies an optimistic submission unless the generation is stale.
    fn apply_receipt(&self, receipt: ReviewReceipt, generation: u64) -> Option<ReviewsSnapshot> {
        let review = receipt.review?;
        let mut state = self.state();
        if state.generation != generation {
            return None;
        }
        state.reviews.insert(0, review);
        if let Some(stats) = receipt.stats {
            state.stats = stats;
        }
        Some(Self::snapshot_locked(&state))
    }
}

/// Builder for [`ReviewStore`].
pub struct ReviewStoreBuilder {
    gateway: Arc<dyn ReviewGateway>,
    telemetry: Arc<dyn TelemetrySink>,
    poll_interval: Duration,
    reconcile_delay: Duration,
}

impl ReviewStoreBuilder {
    /// Replaces the period between background refreshes.
    #[must_use]
    pub const fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Replaces the delay before the post-submit reconciling refresh.
    #[must_use]
    pub const fn reconcile_delay(mut self, delay: Duration) -> Self {
        self.reconcile_delay = delay;
        self
    }

    /// Replaces the telemetry sink.
    #[must_use]
    pub fn telemetry(mut self, sink: Arc<dyn TelemetrySink>) -> Self {
        self.telemetry = sink;
        self
    }

    /// Builds the store.
    #[must_use]
    pub fn build(self) -> ReviewStore {
        ReviewStore {
            inner: Arc::new(StoreInner {
                gateway: self.gateway,
                telemetry: self.telemetry,
                observers: ObserverRegistry::default(),
                poll_interval: self.poll_interval,
                reconcile_delay: self.reconcile_delay,
                state: Mutex::new(StoreState::default()),
            }),
        }
    }
}

/// Polling, optimistically updated local view of the site's reviews.
///
/// The store owns a single ordered review list plus its aggregate
/// statistics, keeps them fresh with a recurring background refresh, and
/// broadcasts every applied change to registered observers. Clones are
/// cheap handles onto the same store.
///
/// Refreshes replace local state wholesale, so overlapping fetches resolve
/// by whichever response is applied last.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
///
/// use vitrine::api::HttpReviewGateway;
/// use vitrine::config::SiteConfig;
/// use vitrine::reviews::ReviewStore;
///
/// # fn main() -> Result<(), vitrine::api::ApiError> {
/// let config = SiteConfig::default();
/// let gateway = HttpReviewGateway::new(config.resolve_api_base_url()?)?;
/// let store = ReviewStore::builder(Arc::new(gateway))
///     .poll_interval(config.poll_interval())
///     .reconcile_delay(config.reconcile_delay())
///     .build();
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ReviewStore {
    inner: Arc<StoreInner>,
}

impl ReviewStore {
    /// Creates a store with default settings and no telemetry.
    #[must_use]
    pub fn new(gateway: Arc<dyn ReviewGateway>) -> Self {
        Self::builder(gateway).build()
    }

    /// Starts building a store with custom settings.
    #[must_use]
    pub fn builder(gateway: Arc<dyn ReviewGateway>) -> ReviewStoreBuilder {
        ReviewStoreBuilder {
            gateway,
            telemetry: Arc::new(NoopTelemetrySink),
            poll_interval: DEFAULT_POLL_INTERVAL,
            reconcile_delay: DEFAULT_RECONCILE_DELAY,
        }
    }

    /// Starts the store: one awaited refresh, then the recurring poll task.
    ///
    /// Safe to call repeatedly; once the store is starting or running,
    /// further calls do nothing. When the initial refresh fails the error is
    /// logged and broadcast, no poll task starts, and the store stays empty,
    /// so a later call may try again.
    pub async fn initialize(&self) {
        let generation = {
            let mut state = self.inner.state();
            if state.lifecycle != Lifecycle::Idle {
                return;
            }
            state.lifecycle = Lifecycle::Starting;
            state.generation
        };

        match self.inner.refresh_once(generation).await {
            Ok(()) => self.finish_initialize(generation),
            Err(_) => self.abort_initialize(generation),
        }
    }

    fn finish_initialize(&self, generation: u64) {
        let mut state = self.inner.state();
        if state.generation != generation {
            return;
        }
        state.lifecycle = Lifecycle::Running;
        state.poll_task = Some(spawn_poll_task(&self.inner, generation));
    }

    fn abort_initialize(&self, generation: u64) {
        let mut state = self.inner.state();
        if state.generation == generation && state.lifecycle == Lifecycle::Starting {
            state.lifecycle = Lifecycle::Idle;
        }
    }

    /// Fetches the listing now and replaces local state wholesale.
    ///
    /// # Errors
    ///
    /// Returns the listing failure. The previous view is kept, and the
    /// failure is also broadcast to observers as
    /// [`ReviewEvent::RefreshFailed`].
    pub async fn refresh(&self) -> Result<(), ApiError> {
        let generation = self.inner.state().generation;
        self.inner.refresh_once(generation).await
    }

    /// Validates and submits a review, applying it optimistically.
    ///
    /// The candidate is validated before any network activity. On success
    /// the echoed review is prepended to the local list, updated statistics
    /// are applied when the server provides them, observers are notified
    /// immediately, and a single reconciling refresh is scheduled after the
    /// configured delay. On failure local state is untouched.
    ///
    /// Returns the review as stored by the server, when the server echoed
    /// it back.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidRating`] or [`ApiError::MissingField`] for
    /// an invalid candidate, [`ApiError::Rejected`] when the server declines
    /// the submission, and the usual network, HTTP, and protocol failures
    /// otherwise.
    pub async fn submit(&self, candidate: &NewReview) -> Result<Option<Review>, ApiError> {
        validate_candidate(candidate)?;

        let generation = self.inner.state().generation;
        let started = Instant::now();
        let receipt = self.inner.gateway.create_review(candidate).await?;
        self.inner.telemetry.record(TelemetryEvent::SubmitLatencyRecorded {
            latency_ms: elapsed_ms(started),
            echoed: receipt.review.is_some(),
        });

        let accepted = receipt.review.clone();
        if let Some(snapshot) = self.inner.apply_receipt(receipt, generation) {
            self.inner.observers.notify(&ReviewEvent::Updated(snapshot));
        }
        spawn_reconcile_task(&self.inner, generation);
        Ok(accepted)
    }

    /// Current review list, most recent first.
    #[must_use]
    pub fn reviews(&self) -> Vec<Review> {
        self.inner.state().reviews.clone()
    }

    /// Current aggregate statistics.
    #[must_use]
    pub fn stats(&self) -> ReviewStatistics {
        self.inner.state().stats.clone()
    }

    /// Current review list and statistics as one consistent copy.
    #[must_use]
    pub fn snapshot(&self) -> ReviewsSnapshot {
        StoreInner::snapshot_locked(&self.inner.state())
    }

    /// Whether the store has initialised successfully and is polling.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.inner.state().lifecycle == Lifecycle::Running
    }

    /// Registers an observer; it runs for every subsequent notification.
    #[must_use]
    pub fn subscribe(&self, observer: Arc<dyn ReviewObserver>) -> ObserverId {
        self.inner.observers.subscribe(observer)
    }

    /// Removes a previously registered observer, reporting whether it was
    /// present.
    #[must_use]
    pub fn unsubscribe(&self, id: ObserverId) -> bool {
        self.inner.observers.unsubscribe(id)
    }

    /// Stops polling and clears local state.
    ///
    /// Responses still in flight when destroy runs are discarded when they
    /// complete. Observers stay registered. Safe to call repeatedly and on
    /// a store that was never initialised.
    pub fn destroy(&self) {
        let previous_task = {
            let mut state = self.inner.state();
            state.generation = state.generation.wrapping_add(1);
            state.lifecycle = Lifecycle::Idle;
            state.reviews.clear();
            state.stats = ReviewStatistics::default();
            state.poll_task.take()
        };
        if let Some(task) = previous_task {
            task.abort();
        }
    }
}

/// Runs the periodic poll loop.
///
/// Each tick spawns its fetch as an independent task so a slow response
/// never delays the next tick; completions apply in arrival order.
fn spawn_poll_task(inner: &Arc<StoreInner>, generation: u64) -> JoinHandle<()> {
    let weak = Arc::downgrade(inner);
    // tokio rejects a zero-period interval.
    let period = inner.poll_interval.max(Duration::from_millis(1));
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The interval fires immediately; the initial refresh already ran.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let Some(store) = weak.upgrade() else {
                return;
            };
            tokio::spawn(async move {
                // Failures are logged and broadcast inside refresh_once.
                let _ignored = store.refresh_once(generation).await;
            });
        }
    })
}

/// Schedules the one-shot reconciling refresh that follows a submission.
fn spawn_reconcile_task(inner: &Arc<StoreInner>, generation: u64) {
    let weak = Arc::downgrade(inner);
    let delay = inner.reconcile_delay;
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        let Some(store) = weak.upgrade() else {
            return;
        };
        if store.is_stale(generation) {
            return;
        }
        // Failures are logged and broadcast inside refresh_once.
        let _ignored = store.refresh_once(generation).await;
    });
}

fn validate_candidate(candidate: &NewReview) -> Result<(), ApiError> {
    if !RATING_RANGE.contains(&candidate.rating) {
        return Err(ApiError::InvalidRating {
            rating: candidate.rating,
        });
    }
    if candidate.name.trim().is_empty() {
        return Err(ApiError::MissingField {
            field: "name".to_owned(),
        });
    }
    if candidate.comment.trim().is_empty() {
        return Err(ApiError::MissingField {
            field: "comment".to_owned(),
        });
    }
    Ok(())
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}

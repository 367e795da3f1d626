//! The review store: a polling local view of the site's visitor reviews.
//!
//! [`ReviewStore`] keeps the review list and its aggregate statistics
//! current with a recurring background refresh, applies submissions
//! optimistically, and broadcasts every change through [`ReviewObserver`]
//! subscriptions. The [`display`] helpers turn snapshots into presentable
//! fragments without binding the crate to any particular front end.

pub mod display;
pub mod observer;
pub mod store;

#[cfg(feature = "test-support")]
pub mod test_support;

pub use observer::{ObserverId, ReviewEvent, ReviewObserver, ReviewsSnapshot};
pub use store::{
    DEFAULT_POLL_INTERVAL, DEFAULT_RECONCILE_DELAY, ReviewStore, ReviewStoreBuilder,
};

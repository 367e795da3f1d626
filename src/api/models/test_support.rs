//! Builders for review API models used across unit and integration tests.

use super::{NewReview, Review, ReviewListing, ReviewStatistics};

/// Builds a five-star review with the given identifier.
///
/// # Examples
///
/// ```
/// use vitrine::api::models::test_support::review_with_id;
///
/// let review = review_with_id("rev-1");
/// assert_eq!(review.id, "rev-1");
/// assert_eq!(review.rating, 5);
/// ```
#[must_use]
pub fn review_with_id(id: &str) -> Review {
    review_named(id, "Ada Price")
}

/// Builds a five-star review with the given identifier and author name.
///
/// # Examples
///
/// ```
/// use vitrine::api::models::test_support::review_named;
///
/// let review = review_named("rev-2", "Ben Okafor");
/// assert_eq!(review.name, "Ben Okafor");
/// ```
#[must_use]
pub fn review_named(id: &str, name: &str) -> Review {
    Review {
        id: id.to_owned(),
        name: name.to_owned(),
        email: "reviewer@example.com".to_owned(),
        rating: 5,
        comment: format!("Comment for {id}"),
        created_at: None,
    }
}

/// Builds a listing from the given reviews and statistics.
#[must_use]
pub fn listing(reviews: Vec<Review>, stats: ReviewStatistics) -> ReviewListing {
    ReviewListing { reviews, stats }
}

/// Builds a listing of `count` five-star reviews with matching statistics.
///
/// # Examples
///
/// ```
/// use vitrine::api::models::test_support::five_star_listing;
///
/// let listing = five_star_listing(3);
/// assert_eq!(listing.reviews.len(), 3);
/// assert_eq!(listing.stats.total_reviews, 3);
/// ```
#[must_use]
pub fn five_star_listing(count: u64) -> ReviewListing {
    let reviews = (1..=count)
        .map(|index| review_with_id(&format!("rev-{index}")))
        .collect();
    listing(
        reviews,
        ReviewStatistics {
            average_rating: 5.0,
            total_reviews: count,
        },
    )
}

/// Builds a valid submission candidate.
///
/// # Examples
///
/// ```
/// use vitrine::api::models::test_support::candidate;
///
/// assert_eq!(candidate().rating, 4);
/// ```
#[must_use]
pub fn candidate() -> NewReview {
    NewReview {
        name: "Nia Clarke".to_owned(),
        email: "nia@example.com".to_owned(),
        rating: 4,
        comment: "Fitted the new staircase in a day.".to_owned(),
    }
}

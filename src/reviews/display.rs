//! Presentation-independent helpers for rendering reviews.
//!
//! These helpers carry no markup or widget assumptions, so any front end
//! can apply them to the store's snapshots.

/// Derives up to two uppercase initials from an author display name.
///
/// # Examples
///
/// ```
/// use vitrine::reviews::display::author_initials;
///
/// assert_eq!(author_initials("ann smith"), "AS");
/// assert_eq!(author_initials("Cher"), "C");
/// assert_eq!(author_initials("Mary Jane van Dyke"), "MJ");
/// ```
#[must_use]
pub fn author_initials(name: &str) -> String {
    name.split_whitespace()
        .take(2)
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

/// Number of filled stars for an average rating.
///
/// Rounds to the nearest whole star and clamps to the five-star scale;
/// values that are not meaningful ratings (negative or not a number) render
/// as zero stars.
///
/// # Examples
///
/// ```
/// use vitrine::reviews::display::star_fill;
///
/// assert_eq!(star_fill(3.5), 4);
/// assert_eq!(star_fill(7.2), 5);
/// assert_eq!(star_fill(0.0), 0);
/// ```
#[must_use]
pub fn star_fill(average_rating: f64) -> u8 {
    let rounded = average_rating.round();
    (0..=5_u8)
        .rev()
        .find(|stars| rounded >= f64::from(*stars))
        .unwrap_or(0)
}

/// Label for the total review count, e.g. `(3 Reviews)`.
///
/// # Examples
///
/// ```
/// use vitrine::reviews::display::review_count_label;
///
/// assert_eq!(review_count_label(1), "(1 Review)");
/// assert_eq!(review_count_label(12), "(12 Reviews)");
/// ```
#[must_use]
pub fn review_count_label(total_reviews: u64) -> String {
    if total_reviews == 1 {
        "(1 Review)".to_owned()
    } else {
        format!("({total_reviews} Reviews)")
    }
}

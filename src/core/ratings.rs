//! Rating aggregation
//!
//! Pure functions that turn raw review rows into the numbers the artist and
//! concert pages display: a 1-5 star histogram, per-tour histograms, and the
//! "would go again" percentage (share of ratings >= 4).
//!
//! Reviews without a usable rating are treated as unrated: they never count
//! toward any bucket or denominator, and never cause an error.

use std::collections::BTreeMap;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::models::Review;

/// Star counts for ratings 1 through 5. All five buckets are always present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RatingHistogram {
    counts: [u32; 5],
}

impl RatingHistogram {
    /// Build from explicit per-star counts, index 0 being one star
    pub fn from_counts(counts: [u32; 5]) -> Self {
        Self { counts }
    }

    /// Count for a star value. Out-of-range stars read as 0.
    pub fn count(&self, star: u8) -> u32 {
        match star {
            1..=5 => self.counts[(star - 1) as usize],
            _ => 0,
        }
    }

    /// Total number of rated reviews counted
    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    fn increment(&mut self, star: u8) {
        if (1..=5).contains(&star) {
            self.counts[(star - 1) as usize] += 1;
        }
    }
}

// serialized as {"1": n, ..., "5": n} to match the page's rating bars
impl Serialize for RatingHistogram {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(5))?;
        for star in 1..=5u8 {
            map.serialize_entry(&star.to_string(), &self.count(star))?;
        }
        map.end()
    }
}

/// Per-tour histograms keyed by tour name. Tours with zero rated reviews are
/// not present; callers treat a missing key as "no data".
pub type TourRatingMap = BTreeMap<String, RatingHistogram>;

/// Map a raw rating value onto a star bucket.
///
/// Well-formed input is already an integer 1-5; anything else is rounded
/// half-up and clamped into range. Non-finite values are unrated.
fn star_bucket(rating: f64) -> Option<u8> {
    if !rating.is_finite() {
        return None;
    }
    Some(rating.round().clamp(1.0, 5.0) as u8)
}

/// Compute the star histogram over a set of reviews.
///
/// Guarantee: the bucket counts sum to the number of reviews carrying a
/// usable rating.
pub fn compute_histogram(reviews: &[Review]) -> RatingHistogram {
    let mut histogram = RatingHistogram::default();

    for review in reviews {
        if let Some(star) = review.rating.and_then(star_bucket) {
            histogram.increment(star);
        }
    }

    histogram
}

/// Group reviews by tour name and compute a histogram per tour.
///
/// Only rated reviews contribute, so a tour whose reviews are all unrated
/// never appears in the map.
pub fn compute_tour_histograms(reviews: &[Review]) -> TourRatingMap {
    let mut tours = TourRatingMap::new();

    for review in reviews {
        if let Some(star) = review.rating.and_then(star_bucket) {
            tours
                .entry(review.tour.clone())
                .or_default()
                .increment(star);
        }
    }

    tours
}

/// Percentage of rated reviews with a rating of 4 or 5, rounded half-up.
/// Returns 0 when no rated reviews exist.
pub fn compute_go_again(reviews: &[Review]) -> u8 {
    let mut rated = 0u32;
    let mut would_go = 0u32;

    for review in reviews {
        if let Some(star) = review.rating.and_then(star_bucket) {
            rated += 1;
            if star >= 4 {
                would_go += 1;
            }
        }
    }

    if rated == 0 {
        return 0;
    }

    (100.0 * f64::from(would_go) / f64::from(rated)).round() as u8
}

/// Display-only stand-in histogram for artists with no reviews yet.
///
/// Deterministic in the ticket price so the page renders stable bars, skewed
/// toward 4-5 stars. Never stored; responses carrying it are flagged as
/// simulated.
pub fn simulated_histogram(price: f64) -> RatingHistogram {
    let seed = price.abs() as u32;

    RatingHistogram::from_counts([
        1 + seed % 3,
        2 + seed % 4,
        4 + seed % 5,
        9 + seed % 7,
        7 + seed % 6,
    ])
}

/// Display-only stand-in for the go-again percentage, derived from price
pub fn simulated_go_again(price: f64) -> u8 {
    let seed = price.abs().min(10_000.0) as u32;
    (55 + seed % 41) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rated(rating: f64, tour: &str) -> Review {
        Review::rated(rating, tour)
    }

    fn unrated(tour: &str) -> Review {
        Review {
            rating: None,
            ..Review::rated(0.0, tour)
        }
    }

    #[test]
    fn test_histogram_counts_rated_only() {
        let reviews = vec![
            rated(5.0, "Tour A"),
            rated(5.0, "Tour A"),
            rated(3.0, "Tour B"),
            unrated("Tour A"),
        ];

        let h = compute_histogram(&reviews);
        assert_eq!(h.count(5), 2);
        assert_eq!(h.count(3), 1);
        assert_eq!(h.count(1), 0);
        assert_eq!(h.total(), 3);
    }

    #[test]
    fn test_histogram_total_matches_rated_count() {
        let reviews = vec![
            rated(1.0, "A"),
            rated(2.0, "A"),
            unrated("A"),
            rated(4.0, "B"),
            unrated("B"),
        ];

        let rated_count = reviews.iter().filter(|r| r.rating.is_some()).count() as u32;
        assert_eq!(compute_histogram(&reviews).total(), rated_count);
    }

    #[test]
    fn test_histogram_rounds_and_clamps() {
        let reviews = vec![
            rated(4.5, "A"),  // rounds up to 5
            rated(0.0, "A"),  // clamps to 1
            rated(9.0, "A"),  // clamps to 5
            rated(-3.0, "A"), // clamps to 1
            rated(f64::NAN, "A"),
        ];

        let h = compute_histogram(&reviews);
        assert_eq!(h.count(5), 2);
        assert_eq!(h.count(1), 2);
        assert_eq!(h.total(), 4);
    }

    #[test]
    fn test_histogram_empty() {
        assert_eq!(compute_histogram(&[]).total(), 0);
    }

    #[test]
    fn test_histogram_serializes_all_five_keys() {
        let json = serde_json::to_value(compute_histogram(&[rated(4.0, "A")])).unwrap();
        for star in 1..=5 {
            assert!(json.get(star.to_string()).is_some());
        }
        assert_eq!(json["4"], 1);
        assert_eq!(json["1"], 0);
    }

    #[test]
    fn test_tour_histograms_group_by_tour() {
        let reviews = vec![
            rated(5.0, "Tour A"),
            rated(4.0, "Tour A"),
            rated(2.0, "Tour B"),
        ];

        let tours = compute_tour_histograms(&reviews);
        assert_eq!(tours.len(), 2);
        assert_eq!(tours["Tour A"].total(), 2);
        assert_eq!(tours["Tour B"].count(2), 1);
    }

    #[test]
    fn test_tour_with_no_rated_reviews_is_omitted() {
        let reviews = vec![rated(5.0, "Tour A"), unrated("Tour B")];

        let tours = compute_tour_histograms(&reviews);
        assert!(tours.contains_key("Tour A"));
        assert!(!tours.contains_key("Tour B"));
    }

    #[test]
    fn test_go_again_empty_is_zero() {
        assert_eq!(compute_go_again(&[]), 0);
        assert_eq!(compute_go_again(&[unrated("A")]), 0);
    }

    #[test]
    fn test_go_again_rounds_half_up() {
        // 2 of 3 ratings are >= 4: 66.67 rounds to 67
        let reviews = vec![rated(5.0, "A"), rated(3.0, "A"), rated(4.0, "A")];
        assert_eq!(compute_go_again(&reviews), 67);

        // 1 of 2: exactly 50
        let reviews = vec![rated(4.0, "A"), rated(1.0, "A")];
        assert_eq!(compute_go_again(&reviews), 50);
    }

    #[test]
    fn test_go_again_ignores_unrated() {
        let reviews = vec![rated(5.0, "A"), unrated("A"), unrated("A")];
        assert_eq!(compute_go_again(&reviews), 100);
    }

    #[test]
    fn test_simulated_values_are_deterministic() {
        assert_eq!(simulated_histogram(79.5), simulated_histogram(79.5));
        assert_eq!(simulated_go_again(79.5), simulated_go_again(79.5));
        assert!(simulated_go_again(79.5) <= 100);
        assert!(simulated_histogram(0.0).total() > 0);
    }
}

//! The append-only review store.
//!
//! The [`ReviewStore`] is the authoritative, ordered sequence of reviews. It
//! grows only through [`ReviewStore::append`]; there is no update or removal.

use std::collections::HashSet;

use chrono::NaiveDate;
use tracing::instrument;

use crate::{DraftError, DraftReview, Review, domain::seed};

/// An ordered, append-only collection of reviews with unique ids.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewStore {
    reviews: Vec<Review>,

    /// Id handed to the next appended review. Always greater than every id
    /// in `reviews`.
    next_id: u64,
}

/// Errors that can occur when building or appending to a store.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StoreError {
    /// Two reviews share the same id.
    #[error("duplicate review id {0}")]
    DuplicateId(u64),

    /// Every id up to `u64::MAX` has been used.
    #[error("no review ids left to assign")]
    IdsExhausted,

    /// The draft could not be turned into a review.
    #[error(transparent)]
    InvalidDraft(#[from] DraftError),
}

impl Default for ReviewStore {
    fn default() -> Self {
        Self {
            reviews: Vec::new(),
            next_id: 1,
        }
    }
}

impl ReviewStore {
    /// A store holding the fixed set of sample reviews.
    ///
    /// # Panics
    ///
    /// Never: the sample reviews are numbered 1 to 5.
    #[must_use]
    pub fn seeded() -> Self {
        Self::from_reviews(seed::reviews()).expect("seed ids are unique and small")
    }

    /// Build a store from existing reviews, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns an error if two reviews share an id, or if one of them has id
    /// `u64::MAX` and no id is left for the next append.
    pub fn from_reviews(reviews: Vec<Review>) -> Result<Self, StoreError> {
        let mut seen = HashSet::with_capacity(reviews.len());
        for review in &reviews {
            if !seen.insert(review.id()) {
                return Err(StoreError::DuplicateId(review.id()));
            }
        }

        let next_id = next_id_after(&reviews)?;
        Ok(Self { reviews, next_id })
    }

    /// Turn `draft` into a new review and append it to the end of the store.
    ///
    /// The review is dated `today` unless the draft carries its own date.
    /// Returns a copy of the appended review.
    ///
    /// # Errors
    ///
    /// Returns an error if the draft fails validation or if the id space is
    /// used up. The store is left unchanged in either case.
    #[instrument(level = "debug", skip(self, draft))]
    pub fn append(&mut self, draft: &DraftReview, today: NaiveDate) -> Result<Review, StoreError> {
        let following = self.next_id.checked_add(1).ok_or(StoreError::IdsExhausted)?;
        let review = draft.to_review(self.next_id, today)?;

        tracing::debug!(id = review.id(), product = review.product(), "appending review");

        self.next_id = following;
        self.reviews.push(review.clone());
        Ok(review)
    }

    /// All reviews, in the order they were added.
    #[must_use]
    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    /// Looks up a review by id.
    #[must_use]
    pub fn get(&self, id: u64) -> Option<&Review> {
        self.reviews.iter().find(|review| review.id() == id)
    }

    /// The number of reviews in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.reviews.len()
    }

    /// Returns `true` if the store holds no reviews.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reviews.is_empty()
    }
}

fn next_id_after(reviews: &[Review]) -> Result<u64, StoreError> {
    reviews
        .iter()
        .map(Review::id)
        .max()
        .map_or(Some(1), |max| max.checked_add(1))
        .ok_or(StoreError::IdsExhausted)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use non_empty_string::NonEmptyString;

    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, 1).unwrap()
    }

    fn draft() -> DraftReview {
        DraftReview {
            author: "X".to_string(),
            product: "Y".to_string(),
            rating: "3".to_string(),
            comment: "ok".to_string(),
            tags: "a, B ,c".to_string(),
            date: String::new(),
        }
    }

    fn review(id: u64) -> Review {
        Review::new(
            id,
            NonEmptyString::new("author".to_string()).unwrap(),
            NonEmptyString::new("product".to_string()).unwrap(),
            3.0,
            today(),
            String::new(),
            Vec::new(),
        )
    }

    #[test]
    fn seeded_store_has_five_reviews_in_order() {
        let store = ReviewStore::seeded();
        let ids: Vec<u64> = store.reviews().iter().map(Review::id).collect();
        assert_eq!(ids, [1, 2, 3, 4, 5]);

        let ratings: Vec<f64> = store.reviews().iter().map(Review::rating).collect();
        assert_eq!(ratings, [4.5, 3.0, 5.0, 4.0, 2.0]);
    }

    #[test]
    fn append_assigns_next_id_and_grows_by_one() {
        let mut store = ReviewStore::seeded();
        let before = store.len();

        let review = store.append(&draft(), today()).unwrap();

        assert_eq!(store.len(), before + 1);
        assert_eq!(review.id(), u64::try_from(before).unwrap() + 1);
        assert_eq!(review.id(), 6);
        assert_eq!(review.tags(), ["a", "b", "c"]);
        assert_eq!(review.date(), today());
        assert_eq!(store.reviews().last(), Some(&review));
    }

    #[test]
    fn successive_appends_have_unique_ids() {
        let mut store = ReviewStore::default();
        for expected in 1..=3 {
            let review = store.append(&draft(), today()).unwrap();
            assert_eq!(review.id(), expected);
        }
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn rejected_draft_leaves_store_unchanged() {
        let mut store = ReviewStore::seeded();
        let before = store.clone();

        let mut bad = draft();
        bad.author = String::new();
        assert!(store.append(&bad, today()).is_err());
        assert_eq!(store, before);

        // The failed attempt must not consume an id.
        assert_eq!(store.append(&draft(), today()).unwrap().id(), 6);
    }

    #[test]
    fn from_reviews_rejects_duplicate_ids() {
        let error = ReviewStore::from_reviews(vec![review(1), review(2), review(1)]).unwrap_err();
        assert_eq!(error, StoreError::DuplicateId(1));
    }

    #[test]
    fn from_reviews_continues_after_highest_id() {
        let mut store = ReviewStore::from_reviews(vec![review(3), review(7)]).unwrap();
        assert_eq!(store.append(&draft(), today()).unwrap().id(), 8);
    }

    #[test]
    fn from_reviews_rejects_max_id() {
        let error = ReviewStore::from_reviews(vec![review(1), review(u64::MAX)]).unwrap_err();
        assert_eq!(error, StoreError::IdsExhausted);
    }

    #[test]
    fn append_fails_once_ids_run_out() {
        let mut store = ReviewStore::from_reviews(vec![review(u64::MAX - 1)]).unwrap();
        let before = store.clone();

        let error = store.append(&draft(), today()).unwrap_err();

        assert_eq!(error, StoreError::IdsExhausted);
        assert_eq!(store, before);
    }

    #[test]
    fn get_finds_by_id() {
        let store = ReviewStore::seeded();
        assert_eq!(store.get(2).map(Review::product), Some("Coffee Maker"));
        assert!(store.get(42).is_none());
    }

    #[test]
    fn empty_store() {
        let store = ReviewStore::default();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
    }
}

//! The filter/sort pipeline.
//!
//! The pipeline never mutates the reviews it is given. It works on a list of
//! indices into the input slice, narrows it with each active filter in turn,
//! then sorts it.

use std::cmp::Ordering;

use tracing::instrument;

use crate::{FilterState, Review, SortOption};

/// Derive the displayed reviews from `reviews` and `filter`.
///
/// Filters are applied in order: search term, minimum rating, tag. The result
/// is then sorted by `filter.sort_option`. The sort is stable.
#[must_use]
pub fn derive<'a>(reviews: &'a [Review], filter: &FilterState) -> Vec<&'a Review> {
    derive_indices(reviews, filter)
        .into_iter()
        .map(|index| &reviews[index])
        .collect()
}

/// Same as [`derive`], but returns positions in `reviews`.
#[must_use]
#[instrument(level = "debug", skip_all, fields(total = reviews.len()))]
pub fn derive_indices(reviews: &[Review], filter: &FilterState) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..reviews.len()).collect();

    if let Some(needle) = filter.search_needle() {
        indices.retain(|&index| reviews[index].mentions(&needle));
    }

    if filter.min_rating.is_active() {
        indices.retain(|&index| filter.min_rating.admits(reviews[index].rating()));
    }

    if let Some(needle) = filter.tag_needle() {
        indices.retain(|&index| reviews[index].has_tag_matching(&needle));
    }

    indices.sort_by(|&a, &b| compare(&reviews[a], &reviews[b], filter.sort_option));

    tracing::debug!(shown = indices.len(), "derived display sequence");
    indices
}

fn compare(a: &Review, b: &Review, sort_option: SortOption) -> Ordering {
    match sort_option {
        SortOption::Newest => b.date().cmp(&a.date()),
        SortOption::Oldest => a.date().cmp(&b.date()),
        SortOption::Highest => b.rating().total_cmp(&a.rating()),
        SortOption::Lowest => a.rating().total_cmp(&b.rating()),
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use non_empty_string::NonEmptyString;
    use test_case::test_case;

    use super::*;
    use crate::{MinRating, ReviewStore};

    fn ids(reviews: &[&Review]) -> Vec<u64> {
        reviews.iter().map(|review| review.id()).collect()
    }

    fn review(id: u64, rating: f64, date: (i32, u32, u32)) -> Review {
        Review::new(
            id,
            NonEmptyString::new(format!("author {id}")).unwrap(),
            NonEmptyString::new(format!("product {id}")).unwrap(),
            rating,
            NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            String::new(),
            Vec::new(),
        )
    }

    #[test_case(SortOption::Newest, &[5, 3, 1, 2, 4])]
    #[test_case(SortOption::Oldest, &[4, 2, 1, 3, 5])]
    #[test_case(SortOption::Highest, &[3, 1, 4, 2, 5])]
    #[test_case(SortOption::Lowest, &[5, 2, 4, 1, 3])]
    fn no_filters_only_reorders(sort_option: SortOption, expected: &[u64]) {
        let store = ReviewStore::seeded();
        let derived = derive(store.reviews(), &FilterState::sorted_by(sort_option));
        assert_eq!(ids(&derived), expected);
    }

    #[test]
    fn min_rating_four_sorted_highest() {
        let store = ReviewStore::seeded();
        let filter = FilterState {
            min_rating: MinRating::new(4).unwrap(),
            sort_option: SortOption::Highest,
            ..FilterState::default()
        };
        assert_eq!(ids(&derive(store.reviews(), &filter)), [3, 1, 4]);
    }

    #[test]
    fn reviews_below_min_rating_are_excluded() {
        let store = ReviewStore::seeded();
        for value in 1..=MinRating::MAX {
            let min_rating = MinRating::new(value).unwrap();
            let filter = FilterState {
                min_rating,
                ..FilterState::default()
            };
            let derived = derive(store.reviews(), &filter);
            assert!(
                derived
                    .iter()
                    .all(|review| review.rating() >= f64::from(value))
            );
            let excluded = store
                .reviews()
                .iter()
                .filter(|review| review.rating() < f64::from(value))
                .count();
            assert_eq!(derived.len() + excluded, store.len());
        }
    }

    #[test_case("coffee", &[2]; "product")]
    #[test_case("COFFEE", &[2]; "case insensitive")]
    #[test_case("broke", &[5]; "comment")]
    #[test_case("smith", &[1]; "author")]
    #[test_case("great", &[1, 4]; "several matches")]
    #[test_case("toaster", &[]; "no matches")]
    fn search_term(term: &str, expected: &[u64]) {
        let store = ReviewStore::seeded();
        let filter = FilterState {
            search_term: term.to_string(),
            sort_option: SortOption::Oldest,
            ..FilterState::default()
        };
        let mut found = ids(&derive(store.reviews(), &filter));
        found.sort_unstable();
        assert_eq!(found, expected);
    }

    #[test_case("kitchen", &[2, 5]; "whole tag")]
    #[test_case("Kitch", &[2, 5]; "case insensitive prefix")]
    #[test_case("tron", &[1, 4]; "substring")]
    #[test_case("garden", &[]; "no matches")]
    fn tag_filter(tag: &str, expected: &[u64]) {
        let store = ReviewStore::seeded();
        let filter = FilterState {
            tag_filter: tag.to_string(),
            ..FilterState::default()
        };
        let mut found = ids(&derive(store.reviews(), &filter));
        found.sort_unstable();
        assert_eq!(found, expected);
    }

    #[test]
    fn filters_combine() {
        let store = ReviewStore::seeded();
        let filter = FilterState {
            search_term: "great".to_string(),
            min_rating: MinRating::new(4).unwrap(),
            tag_filter: "mobile".to_string(),
            sort_option: SortOption::Newest,
        };
        assert_eq!(ids(&derive(store.reviews(), &filter)), [4]);
    }

    #[test]
    fn newest_is_reverse_of_oldest_without_date_ties() {
        let store = ReviewStore::seeded();
        let newest = ids(&derive(
            store.reviews(),
            &FilterState::sorted_by(SortOption::Newest),
        ));
        let mut oldest = ids(&derive(
            store.reviews(),
            &FilterState::sorted_by(SortOption::Oldest),
        ));
        oldest.reverse();
        assert_eq!(newest, oldest);
    }

    #[test]
    fn ties_keep_input_order() {
        let reviews = [
            review(1, 4.0, (2025, 1, 1)),
            review(2, 4.0, (2025, 1, 1)),
            review(3, 5.0, (2025, 1, 2)),
            review(4, 4.0, (2025, 1, 1)),
        ];

        let highest = derive(&reviews, &FilterState::sorted_by(SortOption::Highest));
        assert_eq!(ids(&highest), [3, 1, 2, 4]);

        let oldest = derive(&reviews, &FilterState::sorted_by(SortOption::Oldest));
        assert_eq!(ids(&oldest), [1, 2, 4, 3]);
    }

    #[test]
    fn input_is_not_reordered() {
        let store = ReviewStore::seeded();
        let before: Vec<u64> = store.reviews().iter().map(Review::id).collect();
        let _ = derive(store.reviews(), &FilterState::sorted_by(SortOption::Highest));
        let after: Vec<u64> = store.reviews().iter().map(Review::id).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn empty_input_derives_nothing() {
        assert!(derive(&[], &FilterState::default()).is_empty());
    }
}

//! A review browsing session.
//!
//! The [`Browser`] owns the store, the filter parameters and the draft form.
//! Every mutating entry point recomputes the display sequence before it
//! returns, so [`Browser::display`] always reflects the latest store and
//! filter state.

use chrono::{NaiveDate, Utc};
use tracing::instrument;

use crate::{
    DraftField, DraftReview, FilterState, MinRating, Review, ReviewStore, SortOption, StoreError,
    domain::pipeline,
};

mod intent;
pub use intent::{Intent, ParseIntentError};

/// The result of dispatching an [`Intent`].
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Filter or draft state changed.
    Updated,
    /// The draft was submitted and this review was appended.
    Submitted(Review),
}

/// Review store, filter state and draft form, wired together.
#[derive(Debug, Clone)]
pub struct Browser {
    store: ReviewStore,
    filter: FilterState,
    draft: DraftReview,

    /// Sort mode restored by [`Browser::reset_filters`].
    default_sort: SortOption,

    /// Date stamped on new reviews. `None` means the current UTC date.
    today: Option<NaiveDate>,

    /// Positions in `store` of the displayed reviews, in display order.
    display: Vec<usize>,
}

impl Browser {
    /// Start a session over `store` with no filters applied.
    #[must_use]
    pub fn new(store: ReviewStore) -> Self {
        let mut browser = Self {
            store,
            filter: FilterState::default(),
            draft: DraftReview::default(),
            default_sort: SortOption::default(),
            today: None,
            display: Vec::new(),
        };
        browser.recompute();
        browser
    }

    /// Use `sort` as the initial and reset sort mode.
    #[must_use]
    pub fn with_default_sort(mut self, sort: SortOption) -> Self {
        self.default_sort = sort;
        self.filter.sort_option = sort;
        self.recompute();
        self
    }

    /// Stamp new reviews with `today` instead of the current date.
    #[must_use]
    pub fn with_fixed_date(mut self, today: Option<NaiveDate>) -> Self {
        self.today = today;
        self
    }

    /// Apply a single user intent.
    ///
    /// # Errors
    ///
    /// Returns an error if a [`Intent::SubmitDraft`] is rejected by the
    /// store. The store and draft are left untouched in that case.
    pub fn dispatch(&mut self, intent: Intent) -> Result<Outcome, StoreError> {
        match intent {
            Intent::SetSearchTerm(term) => self.set_search_term(term),
            Intent::SetMinRating(min) => self.set_min_rating(min),
            Intent::SetTagFilter(tag) => self.set_tag_filter(tag),
            Intent::SetSortOption(sort) => self.set_sort_option(sort),
            Intent::UpdateDraftField(field, value) => self.update_draft_field(field, value),
            Intent::SubmitDraft => return self.submit_draft().map(Outcome::Submitted),
            Intent::ResetFilters => self.reset_filters(),
            Intent::ResetDraft => self.reset_draft(),
        }
        Ok(Outcome::Updated)
    }

    /// Sets the search term.
    pub fn set_search_term(&mut self, term: String) {
        self.filter.search_term = term;
        self.recompute();
    }

    /// Sets the minimum rating.
    pub fn set_min_rating(&mut self, min: MinRating) {
        self.filter.min_rating = min;
        self.recompute();
    }

    /// Sets the tag filter.
    pub fn set_tag_filter(&mut self, tag: String) {
        self.filter.tag_filter = tag;
        self.recompute();
    }

    /// Sets the sort mode.
    pub fn set_sort_option(&mut self, sort: SortOption) {
        self.filter.sort_option = sort;
        self.recompute();
    }

    /// Clears every filter and restores the default sort mode.
    pub fn reset_filters(&mut self) {
        self.filter.reset(self.default_sort);
        self.recompute();
    }

    /// Overwrites one field of the draft form.
    pub fn update_draft_field(&mut self, field: DraftField, value: String) {
        self.draft.set(field, value);
    }

    /// Clears the draft form.
    pub fn reset_draft(&mut self) {
        self.draft.reset();
    }

    /// Appends the draft to the store and clears the form.
    ///
    /// # Errors
    ///
    /// Returns an error if the draft fails validation or the store has run
    /// out of ids. Nothing changes in that case.
    #[instrument(level = "debug", skip(self))]
    pub fn submit_draft(&mut self) -> Result<Review, StoreError> {
        let today = self.today.unwrap_or_else(|| Utc::now().date_naive());
        let review = self.store.append(&self.draft, today)?;
        self.draft.reset();
        self.recompute();
        Ok(review)
    }

    /// The filtered, sorted reviews currently on display.
    #[must_use]
    pub fn display(&self) -> Vec<&Review> {
        let reviews = self.store.reviews();
        self.display.iter().map(|&index| &reviews[index]).collect()
    }

    /// The underlying store.
    #[must_use]
    pub const fn store(&self) -> &ReviewStore {
        &self.store
    }

    /// The current filter parameters.
    #[must_use]
    pub const fn filter(&self) -> &FilterState {
        &self.filter
    }

    /// The current contents of the draft form.
    #[must_use]
    pub const fn draft(&self) -> &DraftReview {
        &self.draft
    }

    fn recompute(&mut self) {
        self.display = pipeline::derive_indices(self.store.reviews(), &self.filter);
    }
}

impl Default for Browser {
    fn default() -> Self {
        Self::new(ReviewStore::seeded())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::DraftError;

    fn ids(browser: &Browser) -> Vec<u64> {
        browser.display().iter().map(|review| review.id()).collect()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, 1).unwrap()
    }

    fn fill_draft(browser: &mut Browser) {
        for (field, value) in [
            (DraftField::Author, "X"),
            (DraftField::Product, "Y"),
            (DraftField::Rating, "3"),
            (DraftField::Comment, "ok"),
            (DraftField::Tags, "a, B ,c"),
        ] {
            browser
                .dispatch(Intent::UpdateDraftField(field, value.to_string()))
                .unwrap();
        }
    }

    #[test]
    fn starts_with_whole_store_newest_first() {
        let browser = Browser::default();
        assert_eq!(ids(&browser), [5, 3, 1, 2, 4]);
    }

    #[test]
    fn each_intent_recomputes_display() {
        let mut browser = Browser::default();

        browser
            .dispatch(Intent::SetMinRating(MinRating::new(4).unwrap()))
            .unwrap();
        assert_eq!(ids(&browser), [3, 1, 4]);

        browser
            .dispatch(Intent::SetSortOption(SortOption::Highest))
            .unwrap();
        assert_eq!(ids(&browser), [3, 1, 4]);

        browser
            .dispatch(Intent::SetTagFilter("electronics".to_string()))
            .unwrap();
        assert_eq!(ids(&browser), [1, 4]);

        browser
            .dispatch(Intent::SetSearchTerm("smartphone".to_string()))
            .unwrap();
        assert_eq!(ids(&browser), [4]);

        browser.dispatch(Intent::ResetFilters).unwrap();
        assert_eq!(browser.filter(), &FilterState::default());
        assert_eq!(ids(&browser), [5, 3, 1, 2, 4]);
    }

    #[test]
    fn submit_appends_clears_draft_and_recomputes() {
        let mut browser = Browser::default().with_fixed_date(Some(today()));
        fill_draft(&mut browser);

        let Outcome::Submitted(review) = browser.dispatch(Intent::SubmitDraft).unwrap() else {
            panic!("expected a submitted review");
        };

        assert_eq!(review.id(), 6);
        assert_eq!(review.tags(), ["a", "b", "c"]);
        assert_eq!(review.date(), today());
        assert!(browser.draft().is_empty());
        assert_eq!(browser.store().len(), 6);
        // 2025-04-01 is newer than every seeded review.
        assert_eq!(ids(&browser)[0], 6);
    }

    #[test]
    fn submitted_review_respects_active_filters() {
        let mut browser = Browser::default().with_fixed_date(Some(today()));
        browser.set_min_rating(MinRating::new(4).unwrap());
        fill_draft(&mut browser);

        browser.submit_draft().unwrap();

        assert_eq!(browser.store().len(), 6);
        assert!(!ids(&browser).contains(&6));
    }

    #[test]
    fn failed_submit_keeps_draft_and_store() {
        let mut browser = Browser::default();
        browser.update_draft_field(DraftField::Author, "X".to_string());

        let error = browser.dispatch(Intent::SubmitDraft).unwrap_err();

        assert_eq!(
            error,
            StoreError::InvalidDraft(DraftError::MissingField(DraftField::Product))
        );
        assert_eq!(browser.draft().author, "X");
        assert_eq!(browser.store().len(), 5);
    }

    #[test]
    fn reset_draft_clears_form() {
        let mut browser = Browser::default();
        fill_draft(&mut browser);
        browser.dispatch(Intent::ResetDraft).unwrap();
        assert!(browser.draft().is_empty());
    }

    #[test]
    fn default_sort_is_used_initially_and_on_reset() {
        let mut browser = Browser::default().with_default_sort(SortOption::Lowest);
        assert_eq!(ids(&browser), [5, 2, 4, 1, 3]);

        browser.set_sort_option(SortOption::Oldest);
        browser.reset_filters();
        assert_eq!(browser.filter().sort_option, SortOption::Lowest);
    }

    #[test]
    fn display_is_subset_of_store() {
        let mut browser = Browser::default();
        browser.set_search_term("e".to_string());
        for review in browser.display() {
            assert_eq!(browser.store().get(review.id()), Some(review));
        }
    }
}

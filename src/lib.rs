//! In-memory product review browsing
//!
//! Reviews live in a [`ReviewStore`]. A [`Browser`] session combines the store
//! with a [`FilterState`] and a [`DraftReview`], and re-derives the filtered,
//! sorted display sequence after every change.

pub mod domain;
pub use domain::{
    Config, DraftError, DraftField, DraftReview, FilterState, MinRating, Review, ReviewStore,
    SortOption, StoreError,
};

/// Session state and the intents that drive it.
pub mod browser;
pub use browser::{Browser, Intent, Outcome};

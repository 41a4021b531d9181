//! Domain models for review browsing.
//!
//! This module contains the review record, the draft form buffer, the
//! filter state and the filter/sort pipeline that derives what is displayed.

/// Review record.
pub mod review;
pub use review::Review;

/// Draft review form buffer and its validation.
pub mod draft;
pub use draft::{DraftError, DraftField, DraftReview};

/// Filter parameters and sort modes.
pub mod filter;
pub use filter::{FilterState, MinRating, ParseSortOptionError, SortOption};

/// Derivation of the display sequence from the store and filter state.
pub mod pipeline;

/// Append-only review store.
pub mod store;
pub use store::{ReviewStore, StoreError};

mod seed;

mod config;
pub use config::Config;

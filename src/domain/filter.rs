use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// The four independent parameters used to derive the displayed reviews.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    /// Case-insensitive substring matched against product, comment and
    /// author. Empty disables the search filter.
    pub search_term: String,

    /// Lowest rating to keep.
    pub min_rating: MinRating,

    /// Case-insensitive substring matched against each tag. Empty disables
    /// the tag filter.
    pub tag_filter: String,

    /// Ordering applied after filtering.
    pub sort_option: SortOption,
}

impl FilterState {
    /// A filter state with no filters and the given sort mode.
    #[must_use]
    pub fn sorted_by(sort_option: SortOption) -> Self {
        Self {
            sort_option,
            ..Self::default()
        }
    }

    /// Clear all filters.
    ///
    /// The sort mode is reset to `sort_option`.
    pub fn reset(&mut self, sort_option: SortOption) {
        *self = Self::sorted_by(sort_option);
    }

    /// The lowercased search term, or `None` if the search filter is off.
    pub(crate) fn search_needle(&self) -> Option<String> {
        needle(&self.search_term)
    }

    /// The lowercased tag filter, or `None` if the tag filter is off.
    pub(crate) fn tag_needle(&self) -> Option<String> {
        needle(&self.tag_filter)
    }
}

fn needle(text: &str) -> Option<String> {
    (!text.is_empty()).then(|| text.to_lowercase())
}

/// Minimum star rating filter, between 0 and 5 inclusive.
///
/// Zero means "no filter".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct MinRating(u8);

/// Error returned when a minimum rating is outside `0..=5`.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("invalid minimum rating '{0}': expected a whole number from 0 to 5")]
pub struct InvalidMinRating(String);

impl MinRating {
    /// No minimum rating.
    pub const NONE: Self = Self(0);

    /// The largest supported minimum.
    pub const MAX: u8 = 5;

    /// Creates a minimum rating, returning `None` if `value` is above 5.
    #[must_use]
    pub const fn new(value: u8) -> Option<Self> {
        if value <= Self::MAX {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Parses user input, treating anything that is not a whole number from 0
    /// to 5 as "no filter".
    #[must_use]
    pub fn parse_lenient(text: &str) -> Self {
        text.parse().unwrap_or_else(|e| {
            tracing::warn!("{e}; minimum rating filter disabled");
            Self::NONE
        })
    }

    /// The threshold value.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Returns `true` unless this is [`MinRating::NONE`].
    #[must_use]
    pub const fn is_active(self) -> bool {
        self.0 > 0
    }

    /// Returns `true` if `rating` meets this minimum.
    ///
    /// Always `true` when the filter is inactive.
    #[must_use]
    pub fn admits(self, rating: f64) -> bool {
        !self.is_active() || rating >= f64::from(self.0)
    }
}

impl FromStr for MinRating {
    type Err = InvalidMinRating;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u8>()
            .ok()
            .and_then(Self::new)
            .ok_or_else(|| InvalidMinRating(s.to_string()))
    }
}

impl fmt::Display for MinRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How the displayed reviews are ordered.
///
/// Sorting is stable: reviews that compare equal keep their store order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOption {
    /// Most recent date first.
    #[default]
    Newest,
    /// Oldest date first.
    Oldest,
    /// Highest rating first.
    Highest,
    /// Lowest rating first.
    Lowest,
}

impl SortOption {
    /// All sort modes.
    pub const ALL: [Self; 4] = [Self::Newest, Self::Oldest, Self::Highest, Self::Lowest];

    /// The mode's name, as accepted by [`FromStr`].
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Oldest => "oldest",
            Self::Highest => "highest",
            Self::Lowest => "lowest",
        }
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown [`SortOption`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown sort option '{0}': expected one of newest, oldest, highest, lowest")]
pub struct ParseSortOptionError(String);

impl FromStr for SortOption {
    type Err = ParseSortOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|option| option.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseSortOptionError(s.to_string()))
    }
}

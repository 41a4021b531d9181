use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use non_empty_string::NonEmptyString;

use crate::Review;

/// The in-progress, not yet submitted review form.
///
/// Every field is held as raw text, exactly as typed. Parsing happens in
/// [`DraftReview::to_review`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftReview {
    /// Name of the reviewer.
    pub author: String,
    /// Name of the product.
    pub product: String,
    /// Star rating, parsed as a number on submission.
    pub rating: String,
    /// Review body.
    pub comment: String,
    /// Comma separated tags.
    pub tags: String,
    /// Optional `YYYY-MM-DD` date. Empty means "today".
    pub date: String,
}

/// A named field of the [`DraftReview`] form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    /// [`DraftReview::author`]
    Author,
    /// [`DraftReview::product`]
    Product,
    /// [`DraftReview::rating`]
    Rating,
    /// [`DraftReview::comment`]
    Comment,
    /// [`DraftReview::tags`]
    Tags,
    /// [`DraftReview::date`]
    Date,
}

/// Reasons a draft cannot be turned into a review.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DraftError {
    /// A required field was left blank.
    #[error("{0} is required")]
    MissingField(DraftField),

    /// The rating was not a number in `(0, 5]`.
    #[error("invalid rating '{0}': expected a number greater than 0 and at most 5")]
    InvalidRating(String),

    /// The date was not a valid ISO 8601 calendar date.
    #[error("invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),
}

/// Error returned when parsing an unknown [`DraftField`] name.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown draft field '{0}': expected one of author, product, rating, comment, tags, date")]
pub struct DraftFieldError(String);

impl DraftReview {
    /// Overwrite a single field with `value`.
    pub fn set(&mut self, field: DraftField, value: String) {
        *self.field_mut(field) = value;
    }

    /// The current text of a single field.
    #[must_use]
    pub fn get(&self, field: DraftField) -> &str {
        match field {
            DraftField::Author => &self.author,
            DraftField::Product => &self.product,
            DraftField::Rating => &self.rating,
            DraftField::Comment => &self.comment,
            DraftField::Tags => &self.tags,
            DraftField::Date => &self.date,
        }
    }

    /// Clear every field back to its empty default.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Returns `true` if no field has been filled in.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    fn field_mut(&mut self, field: DraftField) -> &mut String {
        match field {
            DraftField::Author => &mut self.author,
            DraftField::Product => &mut self.product,
            DraftField::Rating => &mut self.rating,
            DraftField::Comment => &mut self.comment,
            DraftField::Tags => &mut self.tags,
            DraftField::Date => &mut self.date,
        }
    }

    /// Build a [`Review`] from this draft.
    ///
    /// `today` is used when no date was entered. `author`, `product` and
    /// `comment` are stored trimmed, so `" ok "` is stored as `"ok"`. Tags
    /// are split with [`split_tags`].
    ///
    /// # Errors
    ///
    /// Returns an error if `author`, `product`, `comment` or `rating` is
    /// blank, if the rating is not a number in `(0, 5]`, or if a date was
    /// entered that is not `YYYY-MM-DD`.
    pub fn to_review(&self, id: u64, today: NaiveDate) -> Result<Review, DraftError> {
        let author = required(&self.author, DraftField::Author)?;
        let product = required(&self.product, DraftField::Product)?;
        let rating = parse_rating(&self.rating)?;
        let comment = required(&self.comment, DraftField::Comment)?;
        let date = parse_date(&self.date, today)?;

        Ok(Review::new(
            id,
            author,
            product,
            rating,
            date,
            comment.to_string(),
            split_tags(&self.tags),
        ))
    }
}

fn required(value: &str, field: DraftField) -> Result<NonEmptyString, DraftError> {
    NonEmptyString::new(value.trim().to_string()).map_err(|_| DraftError::MissingField(field))
}

fn parse_rating(value: &str) -> Result<f64, DraftError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DraftError::MissingField(DraftField::Rating));
    }

    match trimmed.parse::<f64>() {
        Ok(rating) if rating > 0.0 && rating <= 5.0 => Ok(rating),
        _ => Err(DraftError::InvalidRating(trimmed.to_string())),
    }
}

fn parse_date(value: &str, today: NaiveDate) -> Result<NaiveDate, DraftError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(today);
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map_err(|_| DraftError::InvalidDate(trimmed.to_string()))
}

/// Split comma separated text into trimmed, lowercase tags.
///
/// Blank tokens are dropped: `""` gives no tags and `"a,,b"` gives `a`, `b`.
#[must_use]
pub fn split_tags(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_lowercase)
        .collect()
}

impl DraftField {
    /// All fields, in form order.
    pub const ALL: [Self; 6] = [
        Self::Author,
        Self::Product,
        Self::Rating,
        Self::Comment,
        Self::Tags,
        Self::Date,
    ];

    /// The field's name, as accepted by [`FromStr`].
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Author => "author",
            Self::Product => "product",
            Self::Rating => "rating",
            Self::Comment => "comment",
            Self::Tags => "tags",
            Self::Date => "date",
        }
    }
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DraftField {
    type Err = DraftFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DraftFieldError(s.to_string()))
    }
}

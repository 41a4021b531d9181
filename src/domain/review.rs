use chrono::NaiveDate;
use non_empty_string::NonEmptyString;

/// A single product evaluation submitted by a user.
///
/// Reviews are never modified once created. New reviews are appended to the
/// [`ReviewStore`](crate::ReviewStore).
#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    /// Unique identifier, assigned by the store.
    id: u64,
    author: NonEmptyString,
    product: NonEmptyString,
    /// Expected to lie in `(0, 5]`. Fractional values are allowed.
    rating: f64,
    date: NaiveDate,
    comment: String,
    /// Lowercase tokens in insertion order. Duplicates are kept.
    tags: Vec<String>,
}

impl Review {
    /// Construct a new [`Review`].
    ///
    /// Tags are stored as given. Callers building reviews from user input
    /// should go through [`DraftReview`](crate::DraftReview), which normalises
    /// them.
    #[must_use]
    pub const fn new(
        id: u64,
        author: NonEmptyString,
        product: NonEmptyString,
        rating: f64,
        date: NaiveDate,
        comment: String,
        tags: Vec<String>,
    ) -> Self {
        Self {
            id,
            author,
            product,
            rating,
            date,
            comment,
            tags,
        }
    }

    /// The review's unique identifier.
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// Who wrote the review.
    #[must_use]
    pub fn author(&self) -> &str {
        self.author.as_str()
    }

    /// The product under review.
    #[must_use]
    pub fn product(&self) -> &str {
        self.product.as_str()
    }

    /// The star rating.
    #[must_use]
    pub const fn rating(&self) -> f64 {
        self.rating
    }

    /// The date the review was written.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// Free text body of the review.
    #[must_use]
    pub fn comment(&self) -> &str {
        &self.comment
    }

    /// The review's tags
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Returns `true` if `needle` occurs in the product, comment or author.
    ///
    /// `needle` must already be lowercase.
    pub(crate) fn mentions(&self, needle: &str) -> bool {
        [self.product(), self.comment(), self.author()]
            .into_iter()
            .any(|field| field.to_lowercase().contains(needle))
    }

    /// Returns `true` if any tag contains `needle`.
    ///
    /// `needle` must already be lowercase.
    pub(crate) fn has_tag_matching(&self, needle: &str) -> bool {
        self.tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(needle))
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use non_empty_string::NonEmptyString;

    use super::Review;

    fn review(tags: &[&str]) -> Review {
        Review::new(
            1,
            NonEmptyString::new("Jane Smith".to_string()).unwrap(),
            NonEmptyString::new("Wireless Headphones".to_string()).unwrap(),
            4.5,
            NaiveDate::from_ymd_opt(2025, 3, 15).unwrap(),
            "Great sound quality".to_string(),
            tags.iter().map(ToString::to_string).collect(),
        )
    }

    #[test]
    fn mentions_checks_product_comment_and_author() {
        let review = review(&[]);
        assert!(review.mentions("headphones"));
        assert!(review.mentions("sound"));
        assert!(review.mentions("jane"));
        assert!(!review.mentions("coffee"));
    }

    #[test]
    fn tag_match_is_substring() {
        let review = review(&["electronics", "audio"]);
        assert!(review.has_tag_matching("tron"));
        assert!(review.has_tag_matching("audio"));
        assert!(!review.has_tag_matching("kitchen"));
    }

    #[test]
    fn tags_with_uppercase_still_match() {
        let review = review(&["Audio"]);
        assert!(review.has_tag_matching("audio"));
    }
}

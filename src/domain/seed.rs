use chrono::NaiveDate;
use non_empty_string::NonEmptyString;

use crate::Review;

/// `(author, product, rating, date, comment, tags)`
type SeedRow = (
    &'static str,
    &'static str,
    f64,
    (i32, u32, u32),
    &'static str,
    &'static [&'static str],
);

const SEED: [SeedRow; 5] = [
    (
        "Jane Smith",
        "Wireless Headphones",
        4.5,
        (2025, 3, 15),
        "Great sound quality and battery life!",
        &["electronics", "audio", "wireless"],
    ),
    (
        "John Doe",
        "Coffee Maker",
        3.0,
        (2025, 3, 10),
        "Decent product but takes too long to brew.",
        &["appliance", "kitchen"],
    ),
    (
        "Sam Wilson",
        "Running Shoes",
        5.0,
        (2025, 3, 20),
        "Perfect fit and very comfortable for long runs!",
        &["footwear", "sports", "running"],
    ),
    (
        "Alex Johnson",
        "Smartphone",
        4.0,
        (2025, 3, 5),
        "Great performance but camera could be better.",
        &["electronics", "mobile", "gadget"],
    ),
    (
        "Taylor Reed",
        "Blender",
        2.0,
        (2025, 3, 25),
        "Broke after just two months of use.",
        &["appliance", "kitchen"],
    ),
];

/// The fixed set of reviews a store starts with, numbered from 1.
pub(crate) fn reviews() -> Vec<Review> {
    (1..)
        .zip(SEED)
        .map(|(id, (author, product, rating, (y, m, d), comment, tags))| {
            Review::new(
                id,
                NonEmptyString::new(author.to_string()).expect("seed author is non-empty"),
                NonEmptyString::new(product.to_string()).expect("seed product is non-empty"),
                rating,
                NaiveDate::from_ymd_opt(y, m, d).expect("seed date is valid"),
                comment.to_string(),
                tags.iter().map(ToString::to_string).collect(),
            )
        })
        .collect()
}

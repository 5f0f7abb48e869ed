//! Category normalization
//!
//! Maps free-text transaction categories onto the fixed Wattle taxonomy via
//! case-insensitive keyword matching. Categories that already carry a
//! canonical name pass through unchanged, which makes normalization
//! idempotent; anything unrecognized falls back to `other`.

use std::str::FromStr;

use tracing::debug;

use crate::models::{Category, Transaction};

/// Keyword table for category matching
///
/// Ordered: earlier entries win when keywords from more than one category
/// match the same raw string.
const CATEGORY_KEYWORDS: &[(Category, &[&str])] = &[
    (
        Category::Groceries,
        &["woolworths", "coles", "aldi", "food", "supermarket"],
    ),
    (
        Category::Transport,
        &["uber", "taxi", "public transport", "fuel"],
    ),
    (
        Category::Entertainment,
        &["netflix", "spotify", "cinema", "restaurant"],
    ),
    (
        Category::Utilities,
        &["electricity", "water", "gas", "internet"],
    ),
    (
        Category::Work,
        &["office supplies", "work equipment", "professional development"],
    ),
    (
        Category::Investment,
        &["shares", "etf", "stock", "brokerage"],
    ),
    (Category::Super, &["superannuation", "retirement"]),
    (Category::Donation, &["charity", "donation"]),
];

/// Map a raw category string to a standard category
pub fn normalize_category(raw: &str) -> Category {
    let lower = raw.trim().to_lowercase();

    // Already canonical
    if let Ok(category) = Category::from_str(&lower) {
        return category;
    }

    for (category, keywords) in CATEGORY_KEYWORDS {
        if keywords.iter().any(|keyword| lower.contains(keyword)) {
            return *category;
        }
    }

    Category::Other
}

/// Produce a derived transaction list with categories rewritten to the
/// standard taxonomy; all other fields pass through unchanged
pub fn normalize_categories(transactions: &[Transaction]) -> Vec<Transaction> {
    let normalized: Vec<Transaction> = transactions
        .iter()
        .map(|tx| Transaction {
            category: normalize_category(&tx.category).as_str().to_string(),
            ..tx.clone()
        })
        .collect();

    debug!(count = normalized.len(), "Normalized transaction categories");
    normalized
}

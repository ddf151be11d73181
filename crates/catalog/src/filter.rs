//! Filter stage: narrow a product list by price, label and rating bucket.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use shopfront_core::ValueObject;

use crate::product::ProductRecord;

#[derive(Debug, Clone, Copy, Deserialize)]
struct PriceBounds {
    min: u64,
    max: u64,
}

/// Inclusive price window in smallest currency units.
///
/// Always `min <= max`: an inverted pair (free-form numeric input) is swapped,
/// never rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "PriceBounds")]
pub struct PriceRange {
    min: u64,
    max: u64,
}

impl PriceRange {
    pub fn new(min: u64, max: u64) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    /// Range that admits every price.
    pub const fn unbounded() -> Self {
        Self { min: 0, max: u64::MAX }
    }

    pub fn min(&self) -> u64 {
        self.min
    }

    pub fn max(&self) -> u64 {
        self.max
    }

    pub fn contains(&self, price: u64) -> bool {
        (self.min..=self.max).contains(&price)
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self::unbounded()
    }
}

impl From<PriceBounds> for PriceRange {
    fn from(value: PriceBounds) -> Self {
        Self::new(value.min, value.max)
    }
}

impl ValueObject for PriceRange {}

/// Filter criteria chosen by the shopper.
///
/// Empty label/bucket sets mean "no restriction" for that dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    #[serde(default)]
    pub price_range: PriceRange,
    #[serde(default)]
    pub allowed_labels: BTreeSet<String>,
    #[serde(default)]
    pub allowed_rating_buckets: BTreeSet<u8>,
}

impl FilterCriteria {
    pub fn with_price_range(mut self, min: u64, max: u64) -> Self {
        self.price_range = PriceRange::new(min, max);
        self
    }

    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_labels = labels.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_rating_buckets(mut self, buckets: impl IntoIterator<Item = u8>) -> Self {
        self.allowed_rating_buckets = buckets.into_iter().collect();
        self
    }

    /// True when the criteria admit every record.
    pub fn is_open(&self) -> bool {
        self.price_range == PriceRange::unbounded()
            && self.allowed_labels.is_empty()
            && self.allowed_rating_buckets.is_empty()
    }

    /// Predicate applied by [`filter`]: every active dimension must match.
    pub fn matches(&self, record: &ProductRecord) -> bool {
        if !self.price_range.contains(record.price()) {
            return false;
        }
        if !self.allowed_labels.is_empty() && !self.allowed_labels.contains(record.label()) {
            return false;
        }
        if !self.allowed_rating_buckets.is_empty()
            && !self.allowed_rating_buckets.contains(&record.rating_bucket())
        {
            return false;
        }
        true
    }
}

impl ValueObject for FilterCriteria {}

/// Order-preserving subsequence of `records` that satisfies `criteria`.
///
/// No matches yields an empty vector, not an error.
pub fn filter(records: &[ProductRecord], criteria: &FilterCriteria) -> Vec<ProductRecord> {
    records
        .iter()
        .filter(|r| criteria.matches(r))
        .cloned()
        .collect()
}

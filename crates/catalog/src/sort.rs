//! Sort stage: deterministic ordering with an explicit `id` tie-break.

use core::cmp::Ordering;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use shopfront_core::DomainError;

use crate::product::ProductRecord;

/// Ordering offered by the listing pages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    #[default]
    Newest,
    #[serde(rename = "price-asc")]
    PriceAscending,
    #[serde(rename = "price-desc")]
    PriceDescending,
    #[serde(rename = "popularity")]
    PopularityDescending,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [
        SortKey::Newest,
        SortKey::PriceAscending,
        SortKey::PriceDescending,
        SortKey::PopularityDescending,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Newest => "newest",
            SortKey::PriceAscending => "price-asc",
            SortKey::PriceDescending => "price-desc",
            SortKey::PopularityDescending => "popularity",
        }
    }

    /// Total order for this key. Never returns `Equal` for records with distinct ids.
    pub fn compare(&self, a: &ProductRecord, b: &ProductRecord) -> Ordering {
        match self {
            SortKey::Newest => b
                .created_at()
                .cmp(&a.created_at())
                .then_with(|| b.id_typed().cmp(&a.id_typed())),
            SortKey::PriceAscending => a
                .price()
                .cmp(&b.price())
                .then_with(|| a.id_typed().cmp(&b.id_typed())),
            SortKey::PriceDescending => b
                .price()
                .cmp(&a.price())
                .then_with(|| a.id_typed().cmp(&b.id_typed())),
            SortKey::PopularityDescending => b
                .rating()
                .total_cmp(&a.rating())
                .then_with(|| a.id_typed().cmp(&b.id_typed())),
        }
    }
}

impl core::fmt::Display for SortKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "newest" => Ok(SortKey::Newest),
            "price-asc" => Ok(SortKey::PriceAscending),
            "price-desc" => Ok(SortKey::PriceDescending),
            "popularity" => Ok(SortKey::PopularityDescending),
            other => Err(DomainError::validation(format!(
                "unknown sort key `{other}` (expected one of: newest, price-asc, price-desc, popularity)"
            ))),
        }
    }
}

/// New vector holding `records` ordered by `key`.
pub fn sort(records: &[ProductRecord], key: SortKey) -> Vec<ProductRecord> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| key.compare(a, b));
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{ids, record};

    #[test]
    fn price_ascending_scenario() {
        let input = vec![record(1, 100, 3.0, "Alpine", 0), record(2, 50, 3.0, "Alpine", 31)];
        assert_eq!(ids(&sort(&input, SortKey::PriceAscending)), vec![2, 1]);
    }

    #[test]
    fn newest_breaks_ties_by_id_descending() {
        let input = vec![
            record(1, 100, 3.0, "Alpine", 2),
            record(2, 100, 3.0, "Alpine", 5),
            record(3, 100, 3.0, "Alpine", 2),
        ];
        assert_eq!(ids(&sort(&input, SortKey::Newest)), vec![2, 3, 1]);
    }

    #[test]
    fn price_descending_breaks_ties_by_id_ascending() {
        let input = vec![
            record(3, 200, 3.0, "Alpine", 0),
            record(1, 200, 3.0, "Alpine", 0),
            record(2, 900, 3.0, "Alpine", 0),
        ];
        assert_eq!(ids(&sort(&input, SortKey::PriceDescending)), vec![2, 1, 3]);
    }

    #[test]
    fn popularity_orders_by_rating_then_id() {
        let input = vec![
            record(4, 100, 4.0, "Alpine", 0),
            record(2, 100, 4.8, "Alpine", 0),
            record(1, 100, 4.0, "Alpine", 0),
        ];
        assert_eq!(ids(&sort(&input, SortKey::PopularityDescending)), vec![2, 1, 4]);
    }

    #[test]
    fn popularity_treats_signed_zero_ratings_as_equal() {
        let input = vec![record(2, 100, 0.0, "Alpine", 0), record(1, 100, -0.0, "Alpine", 0)];
        assert_eq!(ids(&sort(&input, SortKey::PopularityDescending)), vec![1, 2]);
    }

    #[test]
    fn sort_does_not_touch_input() {
        let input = vec![record(1, 100, 3.0, "Alpine", 0), record(2, 50, 3.0, "Alpine", 1)];
        let before = input.clone();
        let _ = sort(&input, SortKey::PriceAscending);
        assert_eq!(input, before);
    }

    #[test]
    fn sort_key_round_trips_through_strings() {
        for key in SortKey::ALL {
            assert_eq!(key.as_str().parse::<SortKey>().unwrap(), key);
            let json = serde_json::to_string(&key).unwrap();
            assert_eq!(json, format!("\"{}\"", key.as_str()));
        }
        assert!(matches!("cheapest".parse::<SortKey>(), Err(DomainError::Validation(_))));
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use crate::test_support::arb_records;
        use proptest::prelude::*;

        fn arb_key() -> impl Strategy<Value = SortKey> {
            prop::sample::select(SortKey::ALL.to_vec())
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 500,
                ..ProptestConfig::default()
            })]

            /// Property: sorting keeps the same multiset of records.
            #[test]
            fn sort_is_a_permutation(records in arb_records(), key in arb_key()) {
                let sorted = sort(&records, key);
                prop_assert_eq!(sorted.len(), records.len());

                let mut before = ids(&records);
                let mut after = ids(&sorted);
                before.sort_unstable();
                after.sort_unstable();
                prop_assert_eq!(before, after);
            }

            /// Property: sorting an already sorted list is a no-op.
            #[test]
            fn sort_is_idempotent(records in arb_records(), key in arb_key()) {
                let once = sort(&records, key);
                let twice = sort(&once, key);
                prop_assert_eq!(once, twice);
            }

            /// Property: adjacent elements are ordered by the key (strictly, ids are unique).
            #[test]
            fn sort_output_is_ordered(records in arb_records(), key in arb_key()) {
                let sorted = sort(&records, key);
                for pair in sorted.windows(2) {
                    prop_assert_eq!(key.compare(&pair[0], &pair[1]), Ordering::Less);
                }
            }

            /// Property: input order does not influence the output.
            #[test]
            fn sort_is_deterministic_under_shuffle(records in arb_records(), key in arb_key()) {
                let mut reversed = records.clone();
                reversed.reverse();
                prop_assert_eq!(sort(&records, key), sort(&reversed, key));
            }
        }
    }
}

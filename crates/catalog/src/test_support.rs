//! Fixtures and proptest strategies shared by the stage tests.

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;

use shopfront_core::ProductId;

use crate::product::{NewProduct, ProductRecord};

pub(crate) const LABELS: [&str; 4] = ["Nordwear", "Alpine", "Linea", "Basics"];

pub(crate) fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

pub(crate) fn record(id: u64, price: u64, rating: f32, label: &str, day: i64) -> ProductRecord {
    ProductRecord::new(NewProduct {
        id: ProductId::new(id),
        name: format!("Item {id}"),
        price,
        discount_price: None,
        rating,
        label: label.to_string(),
        created_at: epoch() + Duration::days(day),
        stock: 5,
        category_id: None,
        image_url: None,
    })
    .unwrap()
}

pub(crate) fn ids(records: &[ProductRecord]) -> Vec<u64> {
    records.iter().map(|r| r.id_typed().get()).collect()
}

/// Records with unique ids but colliding prices, ratings and dates so tie-breaks matter.
pub(crate) fn arb_records() -> impl Strategy<Value = Vec<ProductRecord>> {
    prop::collection::vec((0u64..20, 0u8..=10, 0usize..LABELS.len(), 0i64..5), 0..40).prop_map(
        |rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (price, half_stars, label, day))| {
                    record(
                        i as u64 + 1,
                        price * 100,
                        f32::from(half_stars) / 2.0,
                        LABELS[label],
                        day,
                    )
                })
                .collect()
        },
    )
}

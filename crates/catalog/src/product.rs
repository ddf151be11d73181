use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shopfront_core::{CategoryId, DomainError, DomainResult, Entity, ProductId};

/// Highest rating a product can carry.
pub const MAX_RATING: f32 = 5.0;

/// Input for building a [`ProductRecord`] (also the wire shape of a catalog entry).
///
/// Optional fields default to absent so sparse mock entries and backend payloads
/// both deserialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub id: ProductId,
    pub name: String,
    /// Price in smallest currency unit (e.g., cents).
    pub price: u64,
    #[serde(default)]
    pub discount_price: Option<u64>,
    pub rating: f32,
    /// Brand or category label used by the label filter.
    pub label: String,
    pub created_at: DateTime<Utc>,
    pub stock: u32,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Immutable catalog entry as served by a catalog source.
///
/// The discovery pipeline only ever reads these; every stage returns new
/// sequences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "NewProduct")]
pub struct ProductRecord {
    id: ProductId,
    name: String,
    price: u64,
    discount_price: Option<u64>,
    rating: f32,
    label: String,
    created_at: DateTime<Utc>,
    stock: u32,
    category_id: Option<CategoryId>,
    image_url: Option<String>,
}

impl ProductRecord {
    /// Validate and build a record.
    ///
    /// Rejects a discount above the list price and ratings outside `[0, 5]`
    /// (including NaN).
    pub fn new(input: NewProduct) -> DomainResult<Self> {
        if input.name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }

        if !(0.0..=MAX_RATING).contains(&input.rating) {
            return Err(DomainError::validation(format!(
                "rating must be within [0, {MAX_RATING}] (got {})",
                input.rating
            )));
        }

        if let Some(discount) = input.discount_price {
            if discount > input.price {
                return Err(DomainError::invariant(format!(
                    "discount price {discount} exceeds price {}",
                    input.price
                )));
            }
        }

        Ok(Self {
            id: input.id,
            name: input.name,
            price: input.price,
            discount_price: input.discount_price,
            // -0.0 would sort apart from 0.0 under a total float order
            rating: if input.rating == 0.0 { 0.0 } else { input.rating },
            label: input.label,
            created_at: input.created_at,
            stock: input.stock,
            category_id: input.category_id,
            image_url: input.image_url,
        })
    }

    pub fn id_typed(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> u64 {
        self.price
    }

    pub fn discount_price(&self) -> Option<u64> {
        self.discount_price
    }

    pub fn rating(&self) -> f32 {
        self.rating
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn stock(&self) -> u32 {
        self.stock
    }

    pub fn category_id(&self) -> Option<CategoryId> {
        self.category_id
    }

    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    /// Price the customer pays: the discount when present, the list price otherwise.
    pub fn effective_price(&self) -> u64 {
        self.discount_price.unwrap_or(self.price)
    }

    pub fn is_on_sale(&self) -> bool {
        matches!(self.discount_price, Some(d) if d < self.price)
    }

    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Whole-star bucket used by the rating filter (`floor(rating)`).
    pub fn rating_bucket(&self) -> u8 {
        self.rating.floor() as u8
    }
}

impl TryFrom<NewProduct> for ProductRecord {
    type Error = DomainError;

    fn try_from(value: NewProduct) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl Entity for ProductRecord {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Catalog category (navigation grouping, e.g. "Outerwear").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
}

impl Entity for Category {
    type Id = CategoryId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

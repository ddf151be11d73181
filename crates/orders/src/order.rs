use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shopfront_catalog::{Page, PageRequest, paginate};
use shopfront_core::{Entity, OrderId, ProductId};

/// Order status lifecycle as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Paid,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn is_open(&self) -> bool {
        matches!(self, OrderStatus::Pending | OrderStatus::Paid | OrderStatus::Shipped)
    }
}

/// Order line: product, quantity, unit price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub name: String,
    pub quantity: u32,
    /// Price in smallest currency unit (e.g., cents).
    pub unit_price: u64,
}

impl OrderLine {
    pub fn line_total(&self) -> u64 {
        self.unit_price.saturating_mul(u64::from(self.quantity))
    }
}

/// A placed order as listed in the customer's order history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub id: OrderId,
    pub placed_at: DateTime<Utc>,
    pub status: OrderStatus,
    #[serde(default)]
    pub lines: Vec<OrderLine>,
    pub subtotal: u64,
    /// Absent on older orders; see [`OrderRecord::resolved_shipping_fee`].
    #[serde(default)]
    pub shipping_fee: Option<u64>,
    pub total: u64,
}

impl OrderRecord {
    /// Shipping fee to display.
    ///
    /// Uses the explicit fee when the backend sent one, otherwise `total - subtotal`
    /// (floored at zero). The fallback also absorbs any discount or rounding
    /// difference between the two totals.
    pub fn resolved_shipping_fee(&self) -> u64 {
        match self.shipping_fee {
            Some(fee) => fee,
            None => {
                let derived = self.total.saturating_sub(self.subtotal);
                tracing::debug!(
                    order_id = %self.id,
                    derived,
                    "shipping fee missing; derived from total - subtotal"
                );
                derived
            }
        }
    }

    /// Subtotal recomputed from the lines (may differ from `subtotal` when the
    /// backend applied order-level discounts).
    pub fn lines_subtotal(&self) -> u64 {
        self.lines
            .iter()
            .fold(0u64, |acc, l| acc.saturating_add(l.line_total()))
    }

    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0u32, |acc, l| acc.saturating_add(l.quantity))
    }
}

impl Entity for OrderRecord {
    type Id = OrderId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// A customer's orders, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderHistory {
    orders: Vec<OrderRecord>,
}

impl OrderHistory {
    /// Order by `placed_at` descending, ties broken by `id` descending.
    pub fn new(mut orders: Vec<OrderRecord>) -> Self {
        orders.sort_by(|a, b| b.placed_at.cmp(&a.placed_at).then_with(|| b.id.cmp(&a.id)));
        Self { orders }
    }

    pub fn orders(&self) -> &[OrderRecord] {
        &self.orders
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    pub fn find(&self, id: OrderId) -> Option<&OrderRecord> {
        self.orders.iter().find(|o| o.id == id)
    }

    pub fn page(&self, request: &PageRequest) -> Page<OrderRecord> {
        paginate(&self.orders, request)
    }

    /// Orders that have not reached a terminal status.
    pub fn open_orders(&self) -> impl Iterator<Item = &OrderRecord> {
        self.orders.iter().filter(|o| o.status.is_open())
    }
}

use serde::{Deserialize, Serialize};

use shopfront_catalog::ProductRecord;
use shopfront_core::{DomainError, DomainResult, ProductId};

/// One product in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub name: String,
    /// Price in smallest currency unit, captured from the record's effective price.
    pub unit_price: u64,
    pub quantity: u32,
    /// Stock available when the line was last touched.
    pub max_quantity: u32,
}

impl CartLine {
    pub fn line_total(&self) -> u64 {
        self.unit_price.saturating_mul(u64::from(self.quantity))
    }
}

/// Shopping cart: one line per product, in the order products were first added.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product_id == product_id)
    }

    /// Add `quantity` units of `record`, merging with an existing line.
    ///
    /// The merged line picks up the record's current effective price and stock.
    pub fn add(&mut self, record: &ProductRecord, quantity: u32) -> DomainResult<()> {
        if quantity == 0 {
            return Err(DomainError::validation("quantity must be positive"));
        }
        if !record.in_stock() {
            return Err(DomainError::invariant(format!(
                "product {} is out of stock",
                record.id_typed()
            )));
        }

        let product_id = record.id_typed();
        let already = self.line(product_id).map_or(0, |l| l.quantity);
        let wanted = already.saturating_add(quantity);
        if wanted > record.stock() {
            return Err(DomainError::validation(format!(
                "only {} of product {} in stock (requested {wanted})",
                record.stock(),
                product_id
            )));
        }

        match self.lines.iter_mut().find(|l| l.product_id == product_id) {
            Some(line) => {
                line.quantity = wanted;
                line.unit_price = record.effective_price();
                line.max_quantity = record.stock();
                line.name = record.name().to_string();
            }
            None => self.lines.push(CartLine {
                product_id,
                name: record.name().to_string(),
                unit_price: record.effective_price(),
                quantity,
                max_quantity: record.stock(),
            }),
        }
        Ok(())
    }

    /// Overwrite a line's quantity; `0` removes the line.
    pub fn set_quantity(&mut self, product_id: ProductId, quantity: u32) -> DomainResult<()> {
        if quantity == 0 {
            return self.remove(product_id).map(|_| ());
        }

        let line = self
            .lines
            .iter_mut()
            .find(|l| l.product_id == product_id)
            .ok_or_else(DomainError::not_found)?;

        if quantity > line.max_quantity {
            return Err(DomainError::validation(format!(
                "only {} of product {product_id} in stock (requested {quantity})",
                line.max_quantity
            )));
        }

        line.quantity = quantity;
        Ok(())
    }

    pub fn remove(&mut self, product_id: ProductId) -> DomainResult<CartLine> {
        let idx = self
            .lines
            .iter()
            .position(|l| l.product_id == product_id)
            .ok_or_else(DomainError::not_found)?;
        Ok(self.lines.remove(idx))
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Total units across all lines (badge count).
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0u32, |acc, l| acc.saturating_add(l.quantity))
    }

    /// Sum of line totals in smallest currency unit. Shipping is not included.
    pub fn subtotal(&self) -> u64 {
        self.lines
            .iter()
            .fold(0u64, |acc, l| acc.saturating_add(l.line_total()))
    }
}

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use orderdesk_core::{AppError, AppResult, Entity, ProductId};

/// A catalog product with its available stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    /// Units in stock; never negative.
    pub quantity: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    pub fn from_request(data: CreateProduct, now: DateTime<Utc>) -> Self {
        Self {
            id: ProductId::new(),
            name: data.name,
            price: data.price,
            quantity: data.quantity,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn has_stock_for(&self, requested: i64) -> bool {
        self.quantity >= requested
    }

    /// Remove `requested` units from stock.
    ///
    /// Leaves the product untouched when stock is short.
    pub fn take_stock(&mut self, requested: i64, now: DateTime<Utc>) -> AppResult<()> {
        if !self.has_stock_for(requested) {
            return Err(AppError::insufficient_stock(&self.name));
        }
        self.quantity -= requested;
        self.updated_at = now;
        Ok(())
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// Request: add a product to the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateProduct {
    pub name: String,
    pub price: Decimal,
    pub quantity: i64,
}

/// A product id paired with a quantity (requested or to decrement).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductQuantity {
    pub id: ProductId,
    pub quantity: i64,
}

/// The summed quantity for one product does not fit in an `i64`.
///
/// No stock can satisfy such a demand; callers report it as a shortfall.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct QuantityOverflow {
    pub id: ProductId,
}

/// Sum quantities of repeated ids, keeping first-seen order.
pub fn merge_quantities(
    entries: &[ProductQuantity],
) -> Result<Vec<ProductQuantity>, QuantityOverflow> {
    let mut merged: Vec<ProductQuantity> = Vec::with_capacity(entries.len());
    for entry in entries {
        match merged.iter_mut().find(|m| m.id == entry.id) {
            Some(existing) => {
                existing.quantity = existing
                    .quantity
                    .checked_add(entry.quantity)
                    .ok_or(QuantityOverflow { id: entry.id })?;
            }
            None => merged.push(*entry),
        }
    }
    Ok(merged)
}

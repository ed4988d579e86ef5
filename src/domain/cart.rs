use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::Product;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    #[error("Product is out of stock: {0}")]
    OutOfStock(String),
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(u32),
    #[error("Product not in cart: {0}")]
    NotInCart(String),
}

/// One product line in a restaurant's cart. The price is captured when the
/// line is first added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: String,
    pub product_name: String,
    pub supplier_id: String,
    pub supplier_name: String,
    pub unit_price: f64,
    pub quantity: u32,
}

impl CartItem {
    pub fn line_total(&self) -> f64 {
        self.unit_price * self.quantity as f64
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Adds `quantity` packs of `product`, merging with an existing line.
    pub fn add(&mut self, product: &Product, quantity: u32) -> Result<(), CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity(quantity));
        }
        if !product.in_stock {
            return Err(CartError::OutOfStock(product.id.clone()));
        }
        match self.items.iter_mut().find(|item| item.product_id == product.id) {
            Some(item) => item.quantity = item.quantity.saturating_add(quantity),
            None => self.items.push(CartItem {
                product_id: product.id.clone(),
                product_name: product.name.clone(),
                supplier_id: product.supplier_id.clone(),
                supplier_name: product.supplier_name.clone(),
                unit_price: product.price,
                quantity,
            }),
        }
        Ok(())
    }

    /// Sets the quantity of an existing line; zero removes it.
    pub fn set_quantity(&mut self, product_id: &str, quantity: u32) -> Result<(), CartError> {
        if quantity == 0 {
            return self.remove(product_id);
        }
        let item = self
            .items
            .iter_mut()
            .find(|item| item.product_id == product_id)
            .ok_or_else(|| CartError::NotInCart(product_id.to_string()))?;
        item.quantity = quantity;
        Ok(())
    }

    pub fn remove(&mut self, product_id: &str) -> Result<(), CartError> {
        let before = self.items.len();
        self.items.retain(|item| item.product_id != product_id);
        if self.items.len() == before {
            return Err(CartError::NotInCart(product_id.to_string()));
        }
        Ok(())
    }

    pub fn subtotal(&self) -> f64 {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Amount owed to each supplier, keyed by supplier name.
    pub fn totals_by_supplier(&self) -> BTreeMap<String, f64> {
        let mut totals = BTreeMap::new();
        for item in &self.items {
            *totals.entry(item.supplier_name.clone()).or_insert(0.0) += item.line_total();
        }
        totals
    }

    pub fn item_count(&self) -> u32 {
        self.items.iter().fold(0u32, |total, item| total.saturating_add(item.quantity))
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

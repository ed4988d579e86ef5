use chrono::Utc;

use crate::actor_framework::Entity;
use crate::domain::{Product, ProductCreate, ProductPatch};
use super::actions::{ProductAction, ProductActionResult};

impl Entity for Product {
    const KIND: &'static str = "product";
    type Id = String;
    type CreatePayload = ProductCreate;
    type Patch = ProductPatch;
    type Action = ProductAction;
    type ActionResult = ProductActionResult;

    fn id(&self) -> &String { &self.id }

    fn from_create(id: String, payload: ProductCreate) -> Result<Self, String> {
        let product = Self {
            id,
            name: payload.name.trim().to_string(),
            brand: payload.brand,
            category: payload.category,
            size: payload.size,
            dimension: payload.dimension,
            price: payload.price,
            quality: payload.quality,
            delivery_days: payload.delivery_days,
            supplier_id: payload.supplier_id,
            supplier_name: payload.supplier_name,
            in_stock: payload.in_stock,
            last_updated: Utc::now(),
        };
        validate(&product)?;
        Ok(product)
    }

    /// Applies every field present in the patch, then re-validates the result.
    fn on_update(&mut self, patch: ProductPatch) -> Result<(), String> {
        if let Some(name) = patch.name {
            self.name = name.trim().to_string();
        }
        if let Some(brand) = patch.brand {
            self.brand = brand;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(size) = patch.size {
            self.size = size;
        }
        if let Some(dimension) = patch.dimension {
            self.dimension = dimension;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(quality) = patch.quality {
            self.quality = quality;
        }
        if let Some(delivery_days) = patch.delivery_days {
            self.delivery_days = delivery_days;
        }
        if let Some(in_stock) = patch.in_stock {
            self.in_stock = in_stock;
        }
        validate(self)?;
        self.last_updated = Utc::now();
        Ok(())
    }

    fn handle_action(&mut self, action: ProductAction) -> Result<ProductActionResult, String> {
        match action {
            ProductAction::SetStock(in_stock) => {
                let previous = std::mem::replace(&mut self.in_stock, in_stock);
                self.last_updated = Utc::now();
                Ok(ProductActionResult::SetStock(previous))
            }
            ProductAction::Reprice(price) => {
                check_price(price)?;
                let previous = std::mem::replace(&mut self.price, price);
                self.last_updated = Utc::now();
                Ok(ProductActionResult::Reprice(previous))
            }
        }
    }
}

fn check_price(price: f64) -> Result<(), String> {
    if price.is_finite() && price > 0.0 {
        Ok(())
    } else {
        Err(format!("price must be positive, got {}", price))
    }
}

fn validate(product: &Product) -> Result<(), String> {
    if product.name.is_empty() {
        return Err("name is required".to_string());
    }
    if !(product.size.is_finite() && product.size > 0.0) {
        return Err(format!("size must be positive, got {}", product.size));
    }
    check_price(product.price)?;
    if product.delivery_days < 1 {
        return Err("delivery days must be at least 1".to_string());
    }
    Ok(())
}

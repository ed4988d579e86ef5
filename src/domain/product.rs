use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Supplier-declared quality tier of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Quality {
    High,
    Medium,
    Basic,
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Quality::High => "High",
            Quality::Medium => "Medium",
            Quality::Basic => "Basic",
        };
        f.write_str(label)
    }
}

impl FromStr for Quality {
    type Err = String;

    /// Accepts the English labels and the Spanish ones used in supplier sheets.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "high" | "alta" => Ok(Quality::High),
            "medium" | "media" => Ok(Quality::Medium),
            "basic" | "básica" | "basica" | "baja" => Ok(Quality::Basic),
            other => Err(format!("unknown quality '{}'", other)),
        }
    }
}

/// A catalog entry offered by a supplier.
///
/// `size` + `dimension` describe the pack being sold for `price`
/// (e.g. 1 "kg" for 40.0). The dimension is a free-text unit label that the
/// cost engine normalizes before comparing products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub brand: String,
    pub category: String,
    pub size: f64,
    pub dimension: String,
    pub price: f64,
    pub quality: Quality,
    pub delivery_days: u32,
    pub supplier_id: String,
    pub supplier_name: String,
    pub in_stock: bool,
    pub last_updated: DateTime<Utc>,
}

impl Product {
    /// Creates a product with neutral defaults for the descriptive fields.
    ///
    /// # Arguments
    /// * `id` - Unique identifier (normally assigned by the product store)
    /// * `name` - Product name, used for ingredient matching
    /// * `size` / `dimension` - Pack size and its unit label
    /// * `price` - Price of one pack
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        size: f64,
        dimension: impl Into<String>,
        price: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            brand: String::new(),
            category: String::new(),
            size,
            dimension: dimension.into(),
            price,
            quality: Quality::Medium,
            delivery_days: 1,
            supplier_id: String::new(),
            supplier_name: String::new(),
            in_stock: true,
            last_updated: Utc::now(),
        }
    }

    pub fn with_supplier(mut self, supplier_id: impl Into<String>, supplier_name: impl Into<String>) -> Self {
        self.supplier_id = supplier_id.into();
        self.supplier_name = supplier_name.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }
}

/// Payload for creating a new product.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductCreate {
    pub name: String,
    pub brand: String,
    pub category: String,
    pub size: f64,
    pub dimension: String,
    pub price: f64,
    pub quality: Quality,
    pub delivery_days: u32,
    pub supplier_id: String,
    pub supplier_name: String,
    pub in_stock: bool,
}

/// Payload for updating an existing product. `None` leaves a field as is.
#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub brand: Option<String>,
    pub category: Option<String>,
    pub size: Option<f64>,
    pub dimension: Option<String>,
    pub price: Option<f64>,
    pub quality: Option<Quality>,
    pub delivery_days: Option<u32>,
    pub in_stock: Option<bool>,
}

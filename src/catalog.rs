//! Catalog browsing for restaurant buyers: text search, filters and sorting
//! over a snapshot of the product list.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::cost::units::price_per_base_unit;
use crate::domain::{Product, Quality};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortBy {
    /// Keep catalog order.
    #[default]
    Listed,
    Name,
    PriceAsc,
    PriceDesc,
    DeliveryDays,
    /// Cheapest per gram / millilitre / piece first. Unusable pack sizes go last.
    UnitPrice,
}

#[derive(Debug, Clone, Default)]
pub struct CatalogQuery {
    /// Matched case-insensitively against name, brand and category.
    pub text: Option<String>,
    pub category: Option<String>,
    pub supplier_id: Option<String>,
    pub quality: Option<Quality>,
    pub in_stock_only: bool,
    pub max_price: Option<f64>,
    pub sort: SortBy,
}

impl CatalogQuery {
    fn matches(&self, product: &Product) -> bool {
        if self.in_stock_only && !product.in_stock {
            return false;
        }
        if let Some(text) = &self.text {
            let needle = text.trim().to_lowercase();
            let found = [&product.name, &product.brand, &product.category]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle));
            if !found {
                return false;
            }
        }
        if let Some(category) = &self.category {
            if !product.category.eq_ignore_ascii_case(category) {
                return false;
            }
        }
        if let Some(supplier_id) = &self.supplier_id {
            if &product.supplier_id != supplier_id {
                return false;
            }
        }
        if self.quality.is_some_and(|q| q != product.quality) {
            return false;
        }
        if self.max_price.is_some_and(|max| product.price > max) {
            return false;
        }
        true
    }
}

pub fn search<'a>(products: &'a [Product], query: &CatalogQuery) -> Vec<&'a Product> {
    let mut found: Vec<&Product> = products.iter().filter(|p| query.matches(p)).collect();

    match query.sort {
        SortBy::Listed => {}
        SortBy::Name => found.sort_by_key(|p| p.name.to_lowercase()),
        SortBy::PriceAsc => found.sort_by(|a, b| a.price.partial_cmp(&b.price).unwrap_or(Ordering::Equal)),
        SortBy::PriceDesc => found.sort_by(|a, b| b.price.partial_cmp(&a.price).unwrap_or(Ordering::Equal)),
        SortBy::DeliveryDays => found.sort_by_key(|p| p.delivery_days),
        SortBy::UnitPrice => found.sort_by(|a, b| {
            let unit = |p: &Product| price_per_base_unit(p.price, p.size, &p.dimension).map(|(price, _)| price);
            match (unit(a), unit(b)) {
                (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            }
        }),
    }

    found
}

/// Distinct non-empty categories, sorted.
pub fn categories(products: &[Product]) -> Vec<String> {
    products
        .iter()
        .map(|p| p.category.trim())
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

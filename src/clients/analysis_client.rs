use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

use super::{DishClient, ProductClient};
use crate::cost::{build_report, CostReport};
use crate::dish_actor::DishError;
use crate::domain::{Dish, Product};
use crate::product_actor::ProductError;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum AnalysisError {
    #[error("Could not load dishes: {0}")]
    Dishes(#[from] DishError),
    #[error("Could not load catalog: {0}")]
    Catalog(#[from] ProductError),
}

struct CachedReport {
    fingerprint: u64,
    report: Arc<CostReport>,
}

/// Builds ingredient cost reports from snapshots of the dish and product stores.
///
/// Owns no store of its own. The last report is kept and reused while the
/// inputs it was computed from are unchanged.
#[derive(Clone)]
pub struct CostAnalysisClient {
    dish_client: DishClient,
    product_client: ProductClient,
    cache: Arc<Mutex<Option<CachedReport>>>,
}

impl CostAnalysisClient {
    pub fn new(dish_client: DishClient, product_client: ProductClient) -> Self {
        Self {
            dish_client,
            product_client,
            cache: Arc::new(Mutex::new(None)),
        }
    }

    #[instrument(skip(self))]
    pub async fn report_for(&self, user_id: String) -> Result<Arc<CostReport>, AnalysisError> {
        let dishes = self.dish_client.list_dishes_for_user(user_id.clone()).await?;
        let catalog = self.product_client.list_products().await?;
        let fingerprint = fingerprint(&user_id, &dishes, &catalog);

        let mut cache = self.cache.lock().await;
        if let Some(cached) = cache.as_ref().filter(|c| c.fingerprint == fingerprint) {
            debug!("Inputs unchanged, reusing cost report");
            return Ok(Arc::clone(&cached.report));
        }

        let report = Arc::new(build_report(&dishes, &catalog));
        info!(
            dishes = dishes.len(),
            products = catalog.len(),
            ingredients = report.results.len(),
            alternatives = report.with_alternatives().count(),
            monthly_savings = report.total_monthly_savings,
            "Cost report computed"
        );
        *cache = Some(CachedReport { fingerprint, report: Arc::clone(&report) });
        Ok(report)
    }
}

/// Hash of everything the report depends on.
fn fingerprint(user_id: &str, dishes: &[Dish], catalog: &[Product]) -> u64 {
    let mut hasher = DefaultHasher::new();
    user_id.hash(&mut hasher);

    dishes.len().hash(&mut hasher);
    for dish in dishes {
        dish.id.hash(&mut hasher);
        dish.name.hash(&mut hasher);
        dish.monthly_servings.hash(&mut hasher);
        dish.ingredients.len().hash(&mut hasher);
        for ingredient in &dish.ingredients {
            ingredient.name.hash(&mut hasher);
            ingredient.quantity.to_bits().hash(&mut hasher);
            ingredient.unit.hash(&mut hasher);
            ingredient.cost.map(f64::to_bits).hash(&mut hasher);
        }
    }

    catalog.len().hash(&mut hasher);
    for product in catalog {
        product.id.hash(&mut hasher);
        product.name.hash(&mut hasher);
        product.size.to_bits().hash(&mut hasher);
        product.dimension.hash(&mut hasher);
        product.price.to_bits().hash(&mut hasher);
        // The report hands out product clones, so every shown field counts.
        product.brand.hash(&mut hasher);
        product.category.hash(&mut hasher);
        product.quality.hash(&mut hasher);
        product.delivery_days.hash(&mut hasher);
        product.supplier_id.hash(&mut hasher);
        product.supplier_name.hash(&mut hasher);
        product.in_stock.hash(&mut hasher);
        product.last_updated.hash(&mut hasher);
    }

    hasher.finish()
}

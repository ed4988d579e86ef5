use std::cmp::Ordering;
use std::collections::HashMap;

use serde::Serialize;

use super::matcher::{MatchStrategy, SubstringMatcher};
use super::optimizer::{optimize_with, CostOptimization};
use crate::domain::{Dish, Product};

/// One ingredient as used across all of a restaurant's dishes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientUsage {
    /// Grouping key: trimmed, lower-cased ingredient name.
    pub name: String,
    /// Name as written in the first dish that uses it.
    pub display_name: String,
    /// Quantity and unit of the first occurrence. Later occurrences are not reconciled.
    pub quantity: f64,
    pub unit: Option<String>,
    /// Highest cost recorded for this ingredient in any dish.
    pub current_cost: f64,
    pub total_monthly_servings: u32,
    pub dishes: Vec<String>,
}

/// The full cost-optimization report for one restaurant.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostReport {
    /// Sorted by `monthly_savings`, largest first.
    pub results: Vec<CostOptimization>,
    pub total_current_cost: f64,
    pub total_monthly_savings: f64,
    pub total_annual_savings: f64,
}

impl CostReport {
    pub fn with_alternatives(&self) -> impl Iterator<Item = &CostOptimization> {
        self.results.iter().filter(|r| r.alternative.is_some())
    }
}

/// Groups every ingredient of `dishes` by normalized name, in first-seen order.
pub fn aggregate(dishes: &[Dish]) -> Vec<IngredientUsage> {
    let mut usages: Vec<IngredientUsage> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for dish in dishes {
        let servings = dish.effective_monthly_servings();
        for ingredient in &dish.ingredients {
            let key = ingredient.name.trim().to_lowercase();
            let cost = ingredient.cost.unwrap_or(0.0);

            match index.get(&key) {
                Some(&i) => {
                    let usage = &mut usages[i];
                    usage.total_monthly_servings = usage.total_monthly_servings.saturating_add(servings);
                    usage.current_cost = usage.current_cost.max(cost);
                    usage.dishes.push(dish.name.clone());
                }
                None => {
                    index.insert(key.clone(), usages.len());
                    usages.push(IngredientUsage {
                        name: key,
                        display_name: ingredient.name.trim().to_string(),
                        quantity: ingredient.quantity,
                        unit: ingredient.unit.clone(),
                        current_cost: cost,
                        total_monthly_servings: servings,
                        dishes: vec![dish.name.clone()],
                    });
                }
            }
        }
    }

    usages
}

/// Optimizes every aggregate and sorts by monthly savings, largest first.
/// Aggregates with equal savings keep their original order.
pub fn analyze(usages: &[IngredientUsage], catalog: &[Product]) -> Vec<CostOptimization> {
    analyze_with(&SubstringMatcher, usages, catalog)
}

pub fn analyze_with<M: MatchStrategy + ?Sized>(
    matcher: &M,
    usages: &[IngredientUsage],
    catalog: &[Product],
) -> Vec<CostOptimization> {
    let mut results: Vec<CostOptimization> = usages
        .iter()
        .map(|usage| optimize_with(matcher, usage, catalog))
        .collect();
    results.sort_by(|a, b| {
        b.monthly_savings
            .partial_cmp(&a.monthly_savings)
            .unwrap_or(Ordering::Equal)
    });
    results
}

/// Builds the report for a snapshot of one restaurant's dishes and the catalog.
pub fn build_report(dishes: &[Dish], catalog: &[Product]) -> CostReport {
    let results = analyze(&aggregate(dishes), catalog);
    CostReport {
        total_current_cost: results.iter().map(|r| r.ingredient.current_cost).sum(),
        total_monthly_savings: results.iter().map(|r| r.monthly_savings).sum(),
        total_annual_savings: results.iter().map(|r| r.annual_savings).sum(),
        results,
    }
}

use serde::Serialize;

use super::aggregator::IngredientUsage;
use super::matcher::{MatchStrategy, SubstringMatcher};
use super::units::{normalize, price_per_base_unit};
use crate::domain::Product;

pub const MONTHS_PER_YEAR: f64 = 12.0;

/// A catalog product that beats an ingredient's current cost basis.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Alternative {
    pub product: Product,
    pub cost_per_base_unit: f64,
}

/// Outcome of comparing one ingredient aggregate against the catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostOptimization {
    pub ingredient: IngredientUsage,
    pub base_unit: String,
    pub base_quantity: f64,
    /// Zero when the ingredient has no usable cost basis.
    pub cost_per_base_unit: f64,
    pub alternative: Option<Alternative>,
    /// Savings for one recipe's worth of the ingredient.
    pub potential_savings_per_unit: f64,
    pub monthly_savings: f64,
    pub annual_savings: f64,
    pub savings_percentage: f64,
}

impl CostOptimization {
    fn without_alternative(usage: &IngredientUsage, base_unit: String, base_quantity: f64, cost_per_base_unit: f64) -> Self {
        Self {
            ingredient: usage.clone(),
            base_unit,
            base_quantity,
            cost_per_base_unit,
            alternative: None,
            potential_savings_per_unit: 0.0,
            monthly_savings: 0.0,
            annual_savings: 0.0,
            savings_percentage: 0.0,
        }
    }
}

/// Finds the cheapest compatible alternative for `usage` with the default matcher.
pub fn optimize(usage: &IngredientUsage, catalog: &[Product]) -> CostOptimization {
    optimize_with(&SubstringMatcher, usage, catalog)
}

/// Finds the cheapest compatible alternative for `usage`.
///
/// Only candidates that normalize to exactly the ingredient's base unit are
/// compared. The cheapest one per base unit wins (the first one seen on a tie)
/// and is reported only when it is strictly cheaper than what the restaurant
/// pays today.
pub fn optimize_with<M: MatchStrategy + ?Sized>(
    matcher: &M,
    usage: &IngredientUsage,
    catalog: &[Product],
) -> CostOptimization {
    let normalized = normalize(usage.quantity, usage.unit.as_deref());
    let (base_quantity, base_unit) = (normalized.value, normalized.base_unit);

    if base_quantity == 0.0 || base_unit.is_empty() || usage.current_cost == 0.0 {
        return CostOptimization::without_alternative(usage, base_unit, base_quantity, 0.0);
    }

    let own_cost = usage.current_cost / base_quantity;

    let mut cheapest: Option<(&Product, f64)> = None;
    for product in matcher.candidates(&usage.name, catalog) {
        let Some((unit_price, product_unit)) = price_per_base_unit(product.price, product.size, &product.dimension) else {
            continue;
        };
        if product_unit != base_unit {
            continue;
        }
        if cheapest.map_or(true, |(_, best)| unit_price < best) {
            cheapest = Some((product, unit_price));
        }
    }

    let Some((product, best_cost)) = cheapest.filter(|(_, best)| *best < own_cost) else {
        return CostOptimization::without_alternative(usage, base_unit, base_quantity, own_cost);
    };

    let savings_per_base_unit = own_cost - best_cost;
    let potential_savings_per_unit = savings_per_base_unit * base_quantity;
    let monthly_savings = if usage.total_monthly_servings > 0 {
        potential_savings_per_unit * usage.total_monthly_servings as f64
    } else {
        0.0
    };

    CostOptimization {
        ingredient: usage.clone(),
        base_unit,
        base_quantity,
        cost_per_base_unit: own_cost,
        alternative: Some(Alternative {
            product: product.clone(),
            cost_per_base_unit: best_cost,
        }),
        potential_savings_per_unit,
        monthly_savings,
        annual_savings: monthly_savings * MONTHS_PER_YEAR,
        savings_percentage: savings_per_base_unit / own_cost * 100.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;

    fn usage(name: &str, quantity: f64, unit: &str, cost: f64, servings: u32) -> IngredientUsage {
        IngredientUsage {
            name: name.to_lowercase(),
            display_name: name.to_string(),
            quantity,
            unit: Some(unit.to_string()),
            current_cost: cost,
            total_monthly_servings: servings,
            dishes: vec!["Café con leche".to_string()],
        }
    }

    #[test]
    fn cheaper_milk_is_reported_with_projected_savings() {
        let catalog = vec![Product::new("p1", "Leche Entera", 1.0, "L", 40.0)];
        let result = optimize(&usage("Leche", 1.0, "L", 50.0, 10), &catalog);

        assert_eq!(result.base_unit, "ml");
        assert_eq!(result.base_quantity, 1000.0);
        assert!(approx_eq!(f64, result.cost_per_base_unit, 0.05, epsilon = 1e-12));

        let alternative = result.alternative.as_ref().expect("alternative");
        assert_eq!(alternative.product.id, "p1");
        assert!(approx_eq!(f64, alternative.cost_per_base_unit, 0.04, epsilon = 1e-12));

        assert!(approx_eq!(f64, result.potential_savings_per_unit, 10.0, epsilon = 1e-9));
        assert!(approx_eq!(f64, result.monthly_savings, 100.0, epsilon = 1e-9));
        assert!(approx_eq!(f64, result.annual_savings, 1200.0, epsilon = 1e-9));
        assert!(approx_eq!(f64, result.savings_percentage, 20.0, epsilon = 1e-9));

        assert_eq!(result.monthly_savings, result.potential_savings_per_unit * 10.0);
        assert_eq!(result.annual_savings, result.monthly_savings * 12.0);
    }

    #[test]
    fn pricier_candidate_is_not_reported() {
        let catalog = vec![Product::new("p1", "Leche Entera", 1.0, "L", 60.0)];
        let result = optimize(&usage("Leche", 1.0, "L", 50.0, 10), &catalog);

        assert!(result.alternative.is_none());
        assert_eq!(result.potential_savings_per_unit, 0.0);
        assert_eq!(result.monthly_savings, 0.0);
        assert_eq!(result.annual_savings, 0.0);
        assert_eq!(result.savings_percentage, 0.0);
    }

    #[test]
    fn equal_price_is_not_an_alternative() {
        let catalog = vec![Product::new("p1", "Leche Entera", 1000.0, "ml", 50.0)];
        let result = optimize(&usage("Leche", 1.0, "L", 50.0, 10), &catalog);
        assert!(result.alternative.is_none());
    }

    #[test]
    fn zero_quantity_short_circuits() {
        let catalog = vec![Product::new("p1", "Leche Entera", 1.0, "L", 1.0)];
        let result = optimize(&usage("Leche", 0.0, "L", 50.0, 10), &catalog);

        assert_eq!(result.base_quantity, 0.0);
        assert!(result.alternative.is_none());
        assert_eq!(result.cost_per_base_unit, 0.0);
        assert_eq!(result.monthly_savings, 0.0);
    }

    #[test]
    fn zero_cost_and_blank_unit_have_no_cost_basis() {
        let catalog = vec![Product::new("p1", "Leche Entera", 1.0, "L", 1.0)];
        assert!(optimize(&usage("Leche", 1.0, "L", 0.0, 10), &catalog).alternative.is_none());
        assert!(optimize(&usage("Leche", 1.0, "  ", 50.0, 10), &catalog).alternative.is_none());
    }

    #[test]
    fn incompatible_base_units_are_ignored() {
        let catalog = vec![
            Product::new("p1", "Huevo Blanco", 30.0, "unidades", 1.0),
            Product::new("p2", "Huevo Líquido", 1.0, "L", 2.0),
            Product::new("p3", "Huevo en Polvo", 0.0, "kg", 0.5),
        ];
        let result = optimize(&usage("Huevo", 500.0, "g", 100.0, 4), &catalog);
        assert!(result.alternative.is_none());
        assert_eq!(result.cost_per_base_unit, 0.2);
    }

    #[test]
    fn cheapest_compatible_candidate_wins_across_units() {
        let catalog = vec![
            Product::new("p1", "Harina de Trigo", 1.0, "kg", 30.0),
            Product::new("p2", "Harina Integral", 500.0, "gramos", 10.0),
            Product::new("p3", "Harina de Maíz", 2.0, "kilogramos", 50.0),
        ];
        let result = optimize(&usage("Harina", 250.0, "g", 12.5, 8), &catalog);

        let alternative = result.alternative.expect("alternative");
        assert_eq!(alternative.product.id, "p2");
        assert!(approx_eq!(f64, result.potential_savings_per_unit, 7.5, epsilon = 1e-9));
        assert!(approx_eq!(f64, result.monthly_savings, 60.0, epsilon = 1e-9));
    }

    #[test]
    fn first_cheapest_wins_on_ties() {
        let catalog = vec![
            Product::new("p1", "Arroz Blanco", 1.0, "kg", 20.0),
            Product::new("p2", "Arroz Largo", 1000.0, "g", 20.0),
        ];
        let result = optimize(&usage("Arroz", 1.0, "kg", 40.0, 1), &catalog);
        assert_eq!(result.alternative.unwrap().product.id, "p1");
    }

    #[test]
    fn zero_servings_keep_per_unit_savings_only() {
        let catalog = vec![Product::new("p1", "Leche Entera", 1.0, "L", 40.0)];
        let result = optimize(&usage("Leche", 1.0, "L", 50.0, 0), &catalog);

        assert!(result.alternative.is_some());
        assert!(result.potential_savings_per_unit > 0.0);
        assert_eq!(result.monthly_savings, 0.0);
        assert_eq!(result.annual_savings, 0.0);
    }

    #[test]
    fn custom_strategy_controls_candidates() {
        struct ExactName;
        impl MatchStrategy for ExactName {
            fn candidates<'a>(&self, name: &str, catalog: &'a [Product]) -> Vec<&'a Product> {
                catalog.iter().filter(|p| p.name.eq_ignore_ascii_case(name)).collect()
            }
        }

        let catalog = vec![
            Product::new("p1", "Leche Entera", 1.0, "L", 10.0),
            Product::new("p2", "Leche", 1.0, "L", 45.0),
        ];
        let result = optimize_with(&ExactName, &usage("Leche", 1.0, "L", 50.0, 1), &catalog);
        assert_eq!(result.alternative.unwrap().product.id, "p2");
    }
}

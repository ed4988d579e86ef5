//! Ingredient cost optimization.
//!
//! Pure functions over snapshots of a restaurant's dishes and the supplier
//! catalog:
//!
//! - [`units`] normalizes quantities to base units (g, ml, unidad)
//! - [`matcher`] finds catalog products that may be the same ingredient
//! - [`optimizer`] picks the cheapest compatible alternative for one ingredient
//! - [`aggregator`] groups ingredients across dishes and builds the report

pub mod units;
pub mod matcher;
pub mod optimizer;
pub mod aggregator;

pub use aggregator::{aggregate, analyze, build_report, CostReport, IngredientUsage};
pub use matcher::{find_candidates, MatchStrategy, SubstringMatcher};
pub use optimizer::{optimize, Alternative, CostOptimization};
pub use units::{normalize, Normalized};

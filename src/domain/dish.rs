use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One line of a dish recipe.
///
/// `cost` is the total paid for `quantity` of the ingredient, not a unit price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub quantity: f64,
    pub unit: Option<String>,
    pub cost: Option<f64>,
}

impl Ingredient {
    pub fn new(name: impl Into<String>, quantity: f64, unit: impl Into<String>, cost: f64) -> Self {
        Self {
            name: name.into(),
            quantity,
            unit: Some(unit.into()),
            cost: Some(cost),
        }
    }
}

/// A menu item owned by a restaurant user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dish {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub price: f64,
    /// Minutes.
    pub preparation_time: u32,
    pub is_active: bool,
    pub monthly_servings: Option<u32>,
    pub ingredients: Vec<Ingredient>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Dish {
    pub fn new(id: impl Into<String>, user_id: impl Into<String>, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            user_id: user_id.into(),
            name: name.into(),
            description: String::new(),
            category: String::new(),
            price: 0.0,
            preparation_time: 0,
            is_active: true,
            monthly_servings: None,
            ingredients: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_servings(mut self, monthly_servings: u32) -> Self {
        self.monthly_servings = Some(monthly_servings);
        self
    }

    pub fn with_ingredient(mut self, ingredient: Ingredient) -> Self {
        self.ingredients.push(ingredient);
        self
    }

    /// Servings per month used for cost projections. Dishes that never
    /// declared a figure count as one serving.
    pub fn effective_monthly_servings(&self) -> u32 {
        self.monthly_servings.unwrap_or(1)
    }
}

/// Payload for creating a new dish.
#[derive(Debug, Clone)]
pub struct DishCreate {
    pub user_id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub price: f64,
    pub preparation_time: u32,
    pub monthly_servings: Option<u32>,
    pub ingredients: Vec<Ingredient>,
}

/// Payload for updating an existing dish.
#[derive(Debug, Clone, Default)]
pub struct DishPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
    pub preparation_time: Option<u32>,
    pub monthly_servings: Option<u32>,
    pub ingredients: Option<Vec<Ingredient>>,
}

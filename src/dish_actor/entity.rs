use chrono::Utc;

use crate::actor_framework::Entity;
use crate::domain::{Dish, DishCreate, DishPatch, Ingredient};
use super::actions::{DishAction, DishActionResult};

impl Entity for Dish {
    const KIND: &'static str = "dish";
    type Id = String;
    type CreatePayload = DishCreate;
    type Patch = DishPatch;
    type Action = DishAction;
    type ActionResult = DishActionResult;

    fn id(&self) -> &String { &self.id }

    /// Creates an active dish owned by `payload.user_id`.
    fn from_create(id: String, payload: DishCreate) -> Result<Self, String> {
        let now = Utc::now();
        let dish = Self {
            id,
            user_id: payload.user_id,
            name: payload.name.trim().to_string(),
            description: payload.description,
            category: payload.category,
            price: payload.price,
            preparation_time: payload.preparation_time,
            is_active: true,
            monthly_servings: payload.monthly_servings,
            ingredients: payload.ingredients,
            created_at: now,
            updated_at: now,
        };
        validate(&dish)?;
        Ok(dish)
    }

    fn on_update(&mut self, patch: DishPatch) -> Result<(), String> {
        if let Some(name) = patch.name {
            self.name = name.trim().to_string();
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(preparation_time) = patch.preparation_time {
            self.preparation_time = preparation_time;
        }
        if let Some(monthly_servings) = patch.monthly_servings {
            self.monthly_servings = Some(monthly_servings);
        }
        if let Some(ingredients) = patch.ingredients {
            self.ingredients = ingredients;
        }
        validate(self)?;
        self.updated_at = Utc::now();
        Ok(())
    }

    fn handle_action(&mut self, action: DishAction) -> Result<DishActionResult, String> {
        let result = match action {
            DishAction::AddIngredient(ingredient) => {
                check_ingredient(&ingredient)?;
                self.ingredients.push(ingredient);
                DishActionResult::Ingredients(self.ingredients.len())
            }
            DishAction::RemoveIngredient(index) => {
                if index >= self.ingredients.len() {
                    return Err(format!(
                        "no ingredient at position {} ({} in recipe)",
                        index,
                        self.ingredients.len()
                    ));
                }
                DishActionResult::Removed(self.ingredients.remove(index))
            }
            DishAction::SetActive(active) => {
                DishActionResult::SetActive(std::mem::replace(&mut self.is_active, active))
            }
        };
        self.updated_at = Utc::now();
        Ok(result)
    }
}

fn check_ingredient(ingredient: &Ingredient) -> Result<(), String> {
    if ingredient.name.trim().is_empty() {
        return Err("ingredient name is required".to_string());
    }
    if !(ingredient.quantity.is_finite() && ingredient.quantity >= 0.0) {
        return Err(format!("invalid quantity for {}: {}", ingredient.name, ingredient.quantity));
    }
    if let Some(cost) = ingredient.cost {
        if !(cost.is_finite() && cost >= 0.0) {
            return Err(format!("invalid cost for {}: {}", ingredient.name, cost));
        }
    }
    Ok(())
}

fn validate(dish: &Dish) -> Result<(), String> {
    if dish.name.is_empty() {
        return Err("name is required".to_string());
    }
    if !(dish.price.is_finite() && dish.price >= 0.0) {
        return Err(format!("price must not be negative, got {}", dish.price));
    }
    dish.ingredients.iter().try_for_each(check_ingredient)
}

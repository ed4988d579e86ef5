use crate::domain::Ingredient;

/// Menu-editing operations on a single dish.
#[derive(Debug, Clone)]
pub enum DishAction {
    AddIngredient(Ingredient),
    /// Removes the ingredient at this position in the recipe.
    RemoveIngredient(usize),
    SetActive(bool),
}

#[derive(Debug, Clone, PartialEq)]
pub enum DishActionResult {
    /// Number of ingredients after the change.
    Ingredients(usize),
    /// The removed ingredient.
    Removed(Ingredient),
    /// Previous active flag.
    SetActive(bool),
}

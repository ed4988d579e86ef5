use tracing::{debug, instrument};
use crate::actor_framework::ResourceClient;
use crate::dish_actor::{DishAction, DishActionResult, DishError};
use crate::domain::{Dish, DishCreate, Ingredient};

/// Client for interacting with the Dish actor.
#[derive(Clone)]
pub struct DishClient {
    inner: ResourceClient<Dish>,
}

impl_basic_client!(DishClient, Dish, DishError, dish, dishes);

impl DishClient {
    #[instrument(skip(self, payload), fields(dish_name = %payload.name, user_id = %payload.user_id))]
    pub async fn create_dish(&self, payload: DishCreate) -> Result<String, DishError> {
        debug!("Sending request");
        self.inner.create(payload).await.map_err(DishError::from)
    }

    /// Every dish owned by `user_id`, active or not, in creation order.
    #[instrument(skip(self))]
    pub async fn list_dishes_for_user(&self, user_id: String) -> Result<Vec<Dish>, DishError> {
        let dishes = self.list_dishes().await?;
        Ok(dishes.into_iter().filter(|d| d.user_id == user_id).collect())
    }

    /// Returns the ingredient count after the addition.
    #[instrument(skip(self, ingredient), fields(ingredient = %ingredient.name))]
    pub async fn add_ingredient(&self, id: String, ingredient: Ingredient) -> Result<usize, DishError> {
        debug!("Sending request");
        match self.inner.perform_action(id, DishAction::AddIngredient(ingredient)).await? {
            DishActionResult::Ingredients(count) => Ok(count),
            other => Err(DishError::ActorCommunicationError(format!("Unexpected result: {:?}", other))),
        }
    }

    #[instrument(skip(self))]
    pub async fn remove_ingredient(&self, id: String, index: usize) -> Result<Ingredient, DishError> {
        debug!("Sending request");
        match self.inner.perform_action(id, DishAction::RemoveIngredient(index)).await? {
            DishActionResult::Removed(ingredient) => Ok(ingredient),
            other => Err(DishError::ActorCommunicationError(format!("Unexpected result: {:?}", other))),
        }
    }

    /// Returns the previous active flag.
    #[instrument(skip(self))]
    pub async fn set_active(&self, id: String, active: bool) -> Result<bool, DishError> {
        debug!("Sending request");
        match self.inner.perform_action(id, DishAction::SetActive(active)).await? {
            DishActionResult::SetActive(previous) => Ok(previous),
            other => Err(DishError::ActorCommunicationError(format!("Unexpected result: {:?}", other))),
        }
    }
}

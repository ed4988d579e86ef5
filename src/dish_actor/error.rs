use thiserror::Error;

use crate::actor_framework::FrameworkError;

/// Errors that can occur during dish operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DishError {
    #[error("Dish not found: {0}")]
    NotFound(String),
    #[error("Invalid dish: {0}")]
    Validation(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for DishError {
    fn from(err: FrameworkError) -> Self {
        match err {
            FrameworkError::NotFound(id) => DishError::NotFound(id),
            FrameworkError::Rejected(reason) => DishError::Validation(reason),
            other => DishError::ActorCommunicationError(other.to_string()),
        }
    }
}

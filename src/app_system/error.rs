use thiserror::Error;

use crate::clients::AnalysisError;
use crate::config::ConfigError;
use crate::dish_actor::DishError;
use crate::domain::CartError;
use crate::import::ImportError;
use crate::product_actor::ProductError;
use crate::session::SessionError;
use crate::user_actor::UserError;

/// Everything that can stop the application.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Import(#[from] ImportError),
    #[error(transparent)]
    Product(#[from] ProductError),
    #[error(transparent)]
    Dish(#[from] DishError),
    #[error(transparent)]
    User(#[from] UserError),
    #[error(transparent)]
    Analysis(#[from] AnalysisError),
    #[error(transparent)]
    Cart(#[from] CartError),
    #[error("Actor task failed: {0}")]
    Shutdown(String),
}

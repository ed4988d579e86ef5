//! Dish store: restaurant menu items and their ingredient lists.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::actor_framework::ResourceActor;
use crate::clients::DishClient;
use crate::domain::Dish;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Creates a new Dish actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Dish>, DishClient) {
    let dish_id_counter = Arc::new(AtomicU64::new(1));
    let next_dish_id = move || {
        let id = dish_id_counter.fetch_add(1, Ordering::SeqCst);
        format!("dish_{}", id)
    };

    let (actor, generic_client) = ResourceActor::new(buffer_size, next_dish_id);
    (actor, DishClient::new(generic_client))
}

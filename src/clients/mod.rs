//! Typed clients over the generic store actors.

#[macro_use]
mod macros;

mod analysis_client;
mod dish_client;
mod product_client;
mod user_client;

pub use analysis_client::*;
pub use dish_client::*;
pub use product_client::*;
pub use user_client::*;

pub mod user;
pub mod product;
pub mod dish;
pub mod cart;

pub use user::*;
pub use product::*;
pub use dish::*;
pub use cart::*;

//! System orchestration, startup, and shutdown logic.

pub mod error;
pub mod marketplace_system;
pub mod tracing;

pub use error::*;
pub use marketplace_system::*;
pub use self::tracing::*;

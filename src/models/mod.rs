//! Data models
//!
//! Rust structs representing database entities.

mod calculation;
mod food;
mod nutrition;

pub use calculation::{CalculationEntry, CalculationType};
pub use food::{Food, FoodCreate, FoodUpdate};
pub use nutrition::Nutrition;

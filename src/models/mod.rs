//! Data models
//!
//! Rust structs representing foods, servings and nutrition values.

mod food;
mod meal;
mod nutrition;
mod serving;

pub use food::Food;
pub use meal::MealType;
pub use nutrition::Nutrition;
pub use serving::{
    DefaultServing, Serving, ServingCreate, ServingPatch, SYSTEM_DEFAULT_GRAMS,
};

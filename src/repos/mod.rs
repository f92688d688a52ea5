pub mod drink_repo;
pub mod error;

pub use drink_repo::{Drink, DrinkStore, Ingredient, PgDrinkStore};
pub use error::RepoError;

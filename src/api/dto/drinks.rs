/*
 * Responsibility
 * - Drinks の request/response DTO
 * - short form (公開) と long form (要 permission) の 2 種類のシリアライズ
 * - recipe は単一オブジェクトでも配列でも受け付け、配列に正規化する
 */
use serde::{Deserialize, Serialize};

use crate::repos::{Drink, Ingredient};

#[derive(Debug, Deserialize)]
pub struct IngredientInput {
    pub color: String,
    pub name: String,
    pub parts: u32,
}

/// `recipe` as sent by clients: one ingredient object, or a list of them.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RecipeInput {
    One(IngredientInput),
    Many(Vec<IngredientInput>),
}

impl RecipeInput {
    pub fn validate(&self) -> Result<(), &'static str> {
        let ingredients = match self {
            RecipeInput::One(one) => std::slice::from_ref(one),
            RecipeInput::Many(many) => many.as_slice(),
        };

        if ingredients.is_empty() {
            return Err("recipe must contain at least one ingredient");
        }
        for ingredient in ingredients {
            if ingredient.color.trim().is_empty() {
                return Err("ingredient color is required");
            }
            if ingredient.name.trim().is_empty() {
                return Err("ingredient name is required");
            }
            if ingredient.parts == 0 {
                return Err("ingredient parts must be positive");
            }
        }

        Ok(())
    }

    pub fn into_ingredients(self) -> Vec<Ingredient> {
        let inputs = match self {
            RecipeInput::One(one) => vec![one],
            RecipeInput::Many(many) => many,
        };

        inputs
            .into_iter()
            .map(|i| Ingredient {
                color: i.color,
                name: i.name,
                parts: i.parts,
            })
            .collect()
    }
}

// Both fields are optional at the serde level so that a missing field is
// reported as 422 by `validate()` instead of a deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct CreateDrinkRequest {
    pub title: Option<String>,
    pub recipe: Option<RecipeInput>,
}

impl CreateDrinkRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        match &self.title {
            Some(title) if !title.trim().is_empty() => {}
            _ => return Err("title is required"),
        }
        match &self.recipe {
            Some(recipe) => recipe.validate(),
            None => Err("recipe is required"),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateDrinkRequest {
    pub title: Option<String>,
    pub recipe: Option<RecipeInput>,
}

impl UpdateDrinkRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if let Some(title) = &self.title
            && title.trim().is_empty()
        {
            return Err("title cannot be empty");
        }
        if let Some(recipe) = &self.recipe {
            recipe.validate()?;
        }

        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct ShortIngredient {
    pub color: String,
    pub parts: u32,
}

/// Public representation: ingredient names are withheld.
#[derive(Debug, Serialize)]
pub struct DrinkShort {
    pub id: i32,
    pub title: String,
    pub recipe: Vec<ShortIngredient>,
}

impl From<Drink> for DrinkShort {
    fn from(drink: Drink) -> Self {
        Self {
            id: drink.id,
            title: drink.title,
            recipe: drink
                .recipe
                .into_iter()
                .map(|i| ShortIngredient {
                    color: i.color,
                    parts: i.parts,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DrinkLong {
    pub id: i32,
    pub title: String,
    pub recipe: Vec<Ingredient>,
}

impl From<Drink> for DrinkLong {
    fn from(drink: Drink) -> Self {
        Self {
            id: drink.id,
            title: drink.title,
            recipe: drink.recipe,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DrinksResponse<T> {
    pub success: bool,
    pub drinks: Vec<T>,
}

impl<T> DrinksResponse<T> {
    pub fn new(drinks: Vec<T>) -> Self {
        Self {
            success: true,
            drinks,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DeleteDrinkResponse {
    pub success: bool,
    pub delete: i32,
}

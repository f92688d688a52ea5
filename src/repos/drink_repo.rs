/*
 * Responsibility
 * - drinks テーブル向け SQLx 操作 (DrinkStore の PostgreSQL 実装)
 * - recipe は JSON 文字列として 1 カラムに保存する (long form のまま)
 * - DB エラーは RepoError に変換して返す (重複 title は Conflict)
 */
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::repos::error::RepoError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub color: String,
    pub name: String,
    pub parts: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Drink {
    pub id: i32,
    pub title: String,
    pub recipe: Vec<Ingredient>,
}

/// Persistence seam for drinks.
///
/// Handlers only see this trait; `PgDrinkStore` is the production backend.
#[async_trait]
pub trait DrinkStore: Send + Sync + 'static {
    async fn list(&self) -> Result<Vec<Drink>, RepoError>;

    async fn create(&self, title: &str, recipe: &[Ingredient]) -> Result<Drink, RepoError>;

    // `None` fields are left untouched. Returns `Ok(None)` when `id` does not exist.
    async fn update(
        &self,
        id: i32,
        title: Option<&str>,
        recipe: Option<&[Ingredient]>,
    ) -> Result<Option<Drink>, RepoError>;

    // Returns false when `id` does not exist.
    async fn delete(&self, id: i32) -> Result<bool, RepoError>;
}

#[derive(Debug, FromRow)]
struct DrinkRow {
    id: i32,
    title: String,
    recipe: String,
}

impl TryFrom<DrinkRow> for Drink {
    type Error = RepoError;

    fn try_from(row: DrinkRow) -> Result<Self, Self::Error> {
        Ok(Drink {
            id: row.id,
            title: row.title,
            recipe: serde_json::from_str(&row.recipe)?,
        })
    }
}

#[derive(Clone, Debug)]
pub struct PgDrinkStore {
    pool: PgPool,
}

impl PgDrinkStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DrinkStore for PgDrinkStore {
    async fn list(&self) -> Result<Vec<Drink>, RepoError> {
        let rows = sqlx::query_as::<_, DrinkRow>(
            r#"
            SELECT id, title, recipe
            FROM drinks
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Drink::try_from).collect()
    }

    async fn create(&self, title: &str, recipe: &[Ingredient]) -> Result<Drink, RepoError> {
        let recipe = serde_json::to_string(recipe)?;

        let row = sqlx::query_as::<_, DrinkRow>(
            r#"
            INSERT INTO drinks (title, recipe)
            VALUES ($1, $2)
            RETURNING id, title, recipe
            "#,
        )
        .bind(title)
        .bind(recipe)
        .fetch_one(&self.pool)
        .await?;

        Drink::try_from(row)
    }

    async fn update(
        &self,
        id: i32,
        title: Option<&str>,
        recipe: Option<&[Ingredient]>,
    ) -> Result<Option<Drink>, RepoError> {
        let recipe = recipe.map(serde_json::to_string).transpose()?;

        let row = sqlx::query_as::<_, DrinkRow>(
            r#"
            UPDATE drinks
            SET
                title = COALESCE($2, title),
                recipe = COALESCE($3, recipe)
            WHERE id = $1
            RETURNING id, title, recipe
            "#,
        )
        .bind(id)
        .bind(title)
        .bind(recipe)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Drink::try_from).transpose()
    }

    async fn delete(&self, id: i32) -> Result<bool, RepoError> {
        let result = sqlx::query(
            r#"
            DELETE FROM drinks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

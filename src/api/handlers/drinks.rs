/*
 * Responsibility
 * - /drinks 系 CRUD handler
 * - 認可は引数の Authorized<P> が担う (handler 本体は認可済みの場合のみ実行される)
 * - Json body は DTO validation → DrinkStore 呼び出し → short/long form で返す
 */
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::{
    api::{
        dto::drinks::{
            CreateDrinkRequest, DeleteDrinkResponse, DrinkLong, DrinkShort, DrinksResponse,
            UpdateDrinkRequest,
        },
        extractors::{Authorized, DeleteDrinks, DrinkId, GetDrinksDetail, PatchDrinks, PostDrinks},
    },
    error::AppError,
    state::AppState,
};

fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    body.map(|Json(req)| req).map_err(|rejection| {
        tracing::debug!(error = %rejection, "rejected request body");
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge
        } else {
            AppError::unprocessable(rejection.body_text())
        }
    })
}

/// GET /drinks (public, short form)
pub async fn list_drinks(
    State(state): State<AppState>,
) -> Result<Json<DrinksResponse<DrinkShort>>, AppError> {
    let drinks = state.drinks.list().await?;

    Ok(Json(DrinksResponse::new(
        drinks.into_iter().map(DrinkShort::from).collect(),
    )))
}

/// GET /drinks-detail (long form)
pub async fn list_drinks_detail(
    _auth: Authorized<GetDrinksDetail>,
    State(state): State<AppState>,
) -> Result<Json<DrinksResponse<DrinkLong>>, AppError> {
    let drinks = state.drinks.list().await?;

    Ok(Json(DrinksResponse::new(
        drinks.into_iter().map(DrinkLong::from).collect(),
    )))
}

pub async fn create_drink(
    auth: Authorized<PostDrinks>,
    State(state): State<AppState>,
    body: Result<Json<CreateDrinkRequest>, JsonRejection>,
) -> Result<Json<DrinksResponse<DrinkLong>>, AppError> {
    let req = json_body(body)?;
    req.validate().map_err(AppError::unprocessable)?;

    // validate() guarantees both are present
    let (Some(title), Some(recipe)) = (req.title, req.recipe) else {
        return Err(AppError::unprocessable("title and recipe are required"));
    };
    let recipe = recipe.into_ingredients();

    let drink = state.drinks.create(title.trim(), &recipe).await?;

    tracing::info!(drink_id = drink.id, sub = ?auth.claims.sub, "drink created");

    Ok(Json(DrinksResponse::new(vec![DrinkLong::from(drink)])))
}

pub async fn update_drink(
    auth: Authorized<PatchDrinks>,
    State(state): State<AppState>,
    DrinkId(drink_id): DrinkId,
    body: Result<Json<UpdateDrinkRequest>, JsonRejection>,
) -> Result<Json<DrinksResponse<DrinkLong>>, AppError> {
    let req = json_body(body)?;
    req.validate().map_err(AppError::unprocessable)?;

    let recipe = req.recipe.map(|r| r.into_ingredients());

    let drink = state
        .drinks
        .update(drink_id, req.title.as_deref().map(str::trim), recipe.as_deref())
        .await?
        .ok_or(AppError::not_found("drink"))?;

    tracing::info!(drink_id, sub = ?auth.claims.sub, "drink updated");

    Ok(Json(DrinksResponse::new(vec![DrinkLong::from(drink)])))
}

pub async fn delete_drink(
    auth: Authorized<DeleteDrinks>,
    State(state): State<AppState>,
    DrinkId(drink_id): DrinkId,
) -> Result<Json<DeleteDrinkResponse>, AppError> {
    if !state.drinks.delete(drink_id).await? {
        return Err(AppError::not_found("drink"));
    }

    tracing::info!(drink_id, sub = ?auth.claims.sub, "drink deleted");

    Ok(Json(DeleteDrinkResponse {
        success: true,
        delete: drink_id,
    }))
}

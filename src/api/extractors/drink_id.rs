/*
 * Responsibility
 * - Path の `{drink_id}` を受け、整数 id に変換する
 * - 数値でない / 範囲外の id は「存在しない drink」として 404 を返す
 */
use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrinkId(pub i32);

impl FromRequestParts<AppState> for DrinkId {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::not_found("drink"))?;

        raw.parse::<i32>()
            .map(DrinkId)
            .map_err(|_| AppError::not_found("drink"))
    }
}

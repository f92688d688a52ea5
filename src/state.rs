/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - drinks: DrinkStore (本番は PgDrinkStore), auth: AuthGuard
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use crate::repos::DrinkStore;
use crate::services::auth::AuthGuard;

#[derive(Clone)]
pub struct AppState {
    pub drinks: Arc<dyn DrinkStore>,
    pub auth: Arc<AuthGuard>,
}

impl AppState {
    pub fn new(drinks: Arc<dyn DrinkStore>, auth: Arc<AuthGuard>) -> Self {
        Self { drinks, auth }
    }
}

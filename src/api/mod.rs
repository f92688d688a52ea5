/*
 * Responsibility
 * - API の公開ポイント (routes() の re-export など)
 * - drinks API はバージョン prefix なしでルート直下に載せる (既存クライアントの URL 互換)
 */
pub mod dto;
pub mod extractors;
pub mod handlers;
mod routes;

pub use routes::routes;

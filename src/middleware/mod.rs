/*
 * Responsibility
 * - middleware の公開インターフェース (re-export)
 * - 認可は middleware ではなく extractor (api::extractors::Authorized) 側
 */
pub mod cors;
pub mod http;

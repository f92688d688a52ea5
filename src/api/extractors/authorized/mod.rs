/*!
 * Authorization extractor
 *
 * Responsibility:
 * - handler に「検証済み・認可済み」の claims を渡す
 * - 必要な permission は型パラメータ (タグ型) で handler ごとに静的に宣言する
 * - axum 依存は core に閉じ込め、タグ型は types に分離する
 *
 * Public API:
 * - Authorized<P>
 * - 各タグ型 (Permission trait 自体は core / types の内部でのみ使う)
 */

mod core;
mod types;

pub use core::Authorized;
pub use types::*;

/*
 * Responsibility
 * - handler が受け取る extractor の公開口
 *   - Authorized<P>: 認可済み claims (permission はタグ型で静的に宣言)
 *   - DrinkId: Path の drink id
 */
pub mod authorized;
pub mod drink_id;

pub use authorized::{Authorized, DeleteDrinks, GetDrinksDetail, PatchDrinks, PostDrinks};
pub use drink_id::DrinkId;

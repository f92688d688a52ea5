/**
 * Responsibility
 *
 * 主な責務
 *  - endpoint ごとに必要な permission をタグ型として宣言する
 *
 * 置くもの
 *  - GetDrinksDetail, PostDrinks などのタグ型と Permission 実装
 *
 * 置かないもの
 *  - 検証ロジック / extractor 実装
 *
 * 変更理由
 *  - endpoint が増えた
 *  - IdP 側の permission 名が変わった
 */
use super::core::Permission;

pub enum GetDrinksDetail {}
impl Permission for GetDrinksDetail {
    const NAME: &'static str = "get:drinks-detail";
}

pub enum PostDrinks {}
impl Permission for PostDrinks {
    const NAME: &'static str = "post:drinks";
}

pub enum PatchDrinks {}
impl Permission for PatchDrinks {
    const NAME: &'static str = "patch:drinks";
}

pub enum DeleteDrinks {}
impl Permission for DeleteDrinks {
    const NAME: &'static str = "delete:drinks";
}

use std::marker::PhantomData;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::services::auth::AccessTokenClaims;
use crate::state::AppState;

/// 型レベルで宣言する permission
///
/// 実装は types.rs に置く (`const NAME` が IdP 側の permission 文字列)
pub trait Permission: Send + Sync + 'static {
    const NAME: &'static str;
}

/// Handler の引数に置くだけで認可がかかる extractor
///
/// - Authorization ヘッダ抽出 → JWT 検証 → permission チェックを AuthGuard で実行
/// - どこかで失敗したら handler 本体は実行されず、AppError (401/403/400) を返す
/// - 成功時は検証済み claims をそのまま受け取れる
pub struct Authorized<P> {
    pub claims: AccessTokenClaims,
    _marker: PhantomData<fn() -> P>,
}

impl<P> Authorized<P> {
    fn new(claims: AccessTokenClaims) -> Self {
        Self {
            claims,
            _marker: PhantomData,
        }
    }
}

impl<P> FromRequestParts<AppState> for Authorized<P>
where
    P: Permission,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let claims = state.auth.authorize(&parts.headers, P::NAME).await?;
        Ok(Self::new(claims))
    }
}

impl<P: Permission> std::fmt::Debug for Authorized<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authorized")
            .field("permission", &P::NAME)
            .field("sub", &self.claims.sub)
            .finish()
    }
}

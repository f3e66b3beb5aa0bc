//! group access 判定 → 許可なら downstream handler へ、拒否なら status だけ返す
//!
//! - token は cookie から取り出す (Authorization header は見ない)
//! - 署名検証はしない。claim は自己申告のまま扱う
//! - 許可時も request には何も足さない (extensions / header ともに素通し)

use axum::{
    Router,
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
};

use crate::error::Rejection;
use crate::services::access::GroupAccess;

/// Router の既存 route に group access filter を掛ける。
///
/// `route_layer` なので、先に route を足してから呼ぶこと。未知の path は filter を通らず 404。
///
/// 例：
/// ```ignore
/// let access = GroupAccess::new("group-access", config.group_access.clone());
/// let v1 = middleware::group_access::apply(api::v1::routes(), access);
/// app = app.nest("/api/v1", v1);
/// ```
pub fn apply<S>(router: Router<S>, access: GroupAccess) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.route_layer(middleware::from_fn_with_state(access, group_access_middleware))
}

async fn group_access_middleware(
    State(access): State<GroupAccess>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, Rejection> {
    // 拒否時は next を呼ばずに終了
    access.evaluate(req.headers())?;

    Ok(next.run(req).await)
}

/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - /verify だけに group access filter を掛ける (/health は素通し)
 */
use axum::{
    Router,
    routing::{any, get},
};

use crate::api::v1::handlers::{health::health, verify::verify};
use crate::middleware;
use crate::services::access::GroupAccess;

pub fn routes(access: GroupAccess) -> Router {
    let protected = Router::new().route("/verify", any(verify));

    Router::new()
        .route("/health", get(health))
        .merge(middleware::group_access::apply(protected, access))
}

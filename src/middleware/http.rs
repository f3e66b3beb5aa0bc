//! Transport layers for the forward-auth server.
//!
//! Sits outside the group-access filter, so rejected requests still get a
//! request id and an access-log line. Limits come from `HttpPolicy`.

use axum::Router;
use axum::error_handling::HandleErrorLayer;
use axum::http::{StatusCode, header::HeaderName};
use tower::timeout::{TimeoutLayer, error::Elapsed};
use tower::{BoxError, ServiceBuilder};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::config::HttpPolicy;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

pub fn apply(router: Router, policy: &HttpPolicy) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    let layers = ServiceBuilder::new()
        .layer(HandleErrorLayer::new(transport_error))
        // proxy 側の request id があればそのまま使う
        .layer(SetRequestIdLayer::new(request_id.clone(), MakeRequestUuid))
        .layer(PropagateRequestIdLayer::new(request_id))
        // verify は body を読まないので小さめで十分
        .layer(RequestBodyLimitLayer::new(policy.body_limit_bytes))
        .layer(TimeoutLayer::new(policy.timeout))
        .layer(TraceLayer::new_for_http());

    router.layer(layers)
}

async fn transport_error(err: BoxError) -> StatusCode {
    if err.is::<Elapsed>() {
        StatusCode::REQUEST_TIMEOUT
    } else {
        tracing::error!(error = %err, "transport layer failed");
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

/*
 * Responsibility
 * - tracing / panic hook の初期化
 * - Config読み込み → GroupAccess 生成 → Router 組み立て
 * - Middleware の適用 (request id / trace / timeout)
 * - axum::serve() で起動
 */
use std::{panic, process};

use anyhow::Result;
use axum::Router;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{api, config::Config, middleware, services::access::GroupAccess};

fn init_tracing() {
    // RUST_LOG=info,jwt_group_access=debug で claim の中身や照合過程も出る
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        tracing::error!(?info, "panic");

        // Development: fail fast. Production: default hook, keep serving.
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;
    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        filter = %config.group_access_name,
        allow_groups = ?config.group_access.allow_groups,
        claims_prefix = %config.group_access.claims_prefix,
        group_property = %config.group_access.group_property,
        "starting forward-auth in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let app = build_router(&config);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn build_router(config: &Config) -> Router {
    let access = GroupAccess::new(
        config.group_access_name.clone(),
        config.group_access.clone(),
    );

    let router = Router::new().nest("/api/v1", api::v1::routes(access));

    middleware::http::apply(router, &config.http)
}

use adapter::store::SharedStore;
use anyhow::{Context, Result};
use api::route::v1;
use axum::Router;
use kernel::model::auth::AccessToken;
use kernel::model::role::Role;
use kernel::model::user::event::CreateUser;
use registry::AppRegistry;
use shared::config::AppConfig;
use shared::env::{which, Environment};
use std::net::{Ipv4Addr, SocketAddr};
use tokio::net::TcpListener;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tower_http::LatencyUnit;
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    init_logger()?;
    bootstrap().await
}

fn init_logger() -> Result<()> {
    let log_level = match which() {
        Environment::Development => "debug",
        Environment::Production => "info",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| log_level.into());

    let subscriber = tracing_subscriber::fmt::layer()
        .with_file(true)
        .with_line_number(true)
        .with_target(false);

    tracing_subscriber::registry()
        .with(subscriber)
        .with(env_filter)
        .try_init()?;

    Ok(())
}

async fn bootstrap() -> Result<()> {
    let app_config = AppConfig::new()?;
    let store = SharedStore::new(app_config.ledger.admission_timeout);

    // A malformed slot grid aborts startup here; it is never a
    // per-request failure.
    let registry = AppRegistry::new(store, app_config.clone())
        .context("failed to build the application registry")?;

    seed_bootstrap_admin(&registry, &app_config).await?;

    let app = Router::new()
        .merge(v1::routes())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .latency_unit(LatencyUnit::Millis),
                ),
        )
        .with_state(registry);

    let addr = SocketAddr::new(Ipv4Addr::LOCALHOST.into(), app_config.server.port);
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);
    axum::serve(listener, app)
        .await
        .context("Unexpected error happened in server")
        .inspect_err(|e| {
            tracing::error!(
                error.cause_chain = ?e, error.message = %e, "Unexpected error"
            )
        })
}

/// Registers the configured administrator and its well-known token so
/// the API is reachable before any external auth flow has run.
async fn seed_bootstrap_admin(registry: &AppRegistry, app_config: &AppConfig) -> Result<()> {
    let existing = registry
        .user_repository()
        .find_by_email(&app_config.auth.bootstrap_admin_email)
        .await;

    let admin = match existing {
        Ok(Some(admin)) => admin,
        Ok(None) => registry
            .user_repository()
            .create(CreateUser::new(
                app_config.auth.bootstrap_admin_name.clone(),
                app_config.auth.bootstrap_admin_email.clone(),
                Role::Admin,
                None,
            ))
            .await?,
        Err(e) => return Err(e.into()),
    };

    registry
        .auth_repository()
        .register_access_token(
            AccessToken(app_config.auth.bootstrap_admin_token.clone()),
            admin.user_id,
        )
        .await?;

    tracing::info!(admin_id = %admin.user_id, "bootstrap administrator ready");
    Ok(())
}

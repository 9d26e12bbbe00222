//! ProofMint Server Library
//!
//! HTTP API over the credential registry. The library exposes the router for
//! integration testing and `run` for the binaries.

pub mod admin;
pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod routes;
pub mod state;

use anyhow::Context;
use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use config::ServerConfig;
use state::AppState;

/// Pause and role management
fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/stats", get(admin::stats))
        .route("/pause", post(admin::pause))
        .route("/unpause", post(admin::unpause))
        .route("/roles/grant", post(admin::grant_role))
        .route("/roles/revoke", post(admin::revoke_role))
        .route("/roles/renounce", post(admin::renounce_role))
        .route("/roles/:role", get(admin::role_members))
        .route("/roles/:role/:address", get(admin::has_role))
        .route("/accounts/:address/roles", get(admin::account_roles))
        .route("/issuers", get(admin::list_issuers))
}

/// Build the CORS layer.
///
/// `origins` is a comma-separated list, or `*` to allow any origin.
fn cors_layer(origins: &str) -> CorsLayer {
    let allow_origin = if origins.trim() == "*" {
        AllowOrigin::any()
    } else {
        let parsed: Vec<_> = origins
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        AllowOrigin::list(parsed)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .max_age(std::time::Duration::from_secs(3600))
}

fn core_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(routes::health))
        .route("/info", get(routes::info))
        // Issuers
        .route("/issuers", post(routes::register_issuer))
        .route("/issuers/:address", get(routes::get_issuer))
        .route("/issuers/:address/credentials", get(routes::issuer_credentials))
        .route(
            "/issuers/:address/certificate-types",
            get(routes::issuer_certificate_types),
        )
        // Certificate types
        .route("/certificate-types", post(routes::create_certificate_type))
        .route("/certificate-types/:id", get(routes::get_certificate_type))
        .route(
            "/certificate-types/:id/deactivate",
            post(routes::deactivate_certificate_type),
        )
        // Credentials
        .route("/credentials", post(routes::mint_credential))
        .route("/credentials/:id", get(routes::get_credential))
        .route("/credentials/:id/verify", get(routes::verify_credential))
        .route("/credentials/:id/revoke", post(routes::revoke_credential))
        .route("/credentials/:id/burn", post(routes::burn_credential))
        .route("/credentials/:id/transfer", post(routes::transfer_credential))
        .route("/credentials/:id/approve", post(routes::approve_credential))
        .route("/operators", post(routes::set_operator))
        .route(
            "/recipients/:address/credentials",
            get(routes::recipient_credentials),
        )
        .route("/accounts/:address/balance", get(routes::balance))
        // Journal and helpers
        .route("/events", get(routes::events))
        .route("/metadata/hash", post(routes::hash_metadata))
        .nest("/admin", admin_router())
}

/// Create the main router with all routes configured
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_origins);

    core_routes()
        .with_state(state)
        .layer(axum_middleware::from_fn(middleware::audit_log_middleware))
        .layer(axum_middleware::from_fn(
            middleware::security_headers_middleware,
        ))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Restore state, bind and serve until the process is stopped
pub async fn run(config: ServerConfig) -> anyhow::Result<()> {
    let addr = config.bind.clone();

    let state = AppState::bootstrap(config)
        .await
        .context("failed to load registry snapshot")?;
    let app = create_router(state);

    tracing::info!("Starting ProofMint server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}

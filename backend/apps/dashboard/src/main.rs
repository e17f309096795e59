//! Dashboard Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but request-level
//! errors go through the crates' own error types.

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use auth::{
    AuthConfig, AuthController, AuthGateway, CookieCredentialStore, CredentialStore, Gatekeeper,
    GatekeeperState, HttpAuthGateway, auth_router, session_gatekeeper,
};
use axum::{
    Router, http,
    http::{Method, header},
};
use query::QueryClient;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wallet::{ApiConfig, DashboardApi, DashboardQueries, dashboard_router};

const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:31114";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "dashboard=info,auth=info,query=info,wallet=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Configuration
    let mut auth_config = AuthConfig::development();
    let mut api_config = ApiConfig::development();
    if let Ok(url) = env::var("DASHBOARD_API_URL") {
        auth_config = auth_config.with_api_base_url(&url);
        api_config = api_config.with_base_url(url);
    }
    if let Ok(path) = env::var("DASHBOARD_CREDENTIALS_PATH") {
        auth_config = auth_config.with_credentials_path(path);
    }
    let addr: SocketAddr = env::var("DASHBOARD_LISTEN_ADDR")
        .unwrap_or_else(|_| DEFAULT_LISTEN_ADDR.to_string())
        .parse()?;

    // Session
    let store = Arc::new(CookieCredentialStore::open(&auth_config)?);
    let queries = QueryClient::new();
    let gateway = Arc::new(HttpAuthGateway::new(&auth_config));
    let controller = Arc::new(AuthController::new(
        store.clone(),
        gateway,
        queries.clone(),
        Arc::new(auth_config),
    ));

    let snapshot = controller.initialize();
    tracing::info!(status = %snapshot.status, "Session restored from credential store");

    // Dashboard data
    let dashboard = Arc::new(DashboardQueries::new(
        DashboardApi::new(Arc::new(api_config), store.clone()),
        queries,
    ));

    // CORS configuration
    let frontend_origins = env::var("DASHBOARD_FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:3000,http://127.0.0.1:3000".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([header::CONTENT_TYPE, header::ACCEPT]))
        .allow_credentials(true);

    // Build router
    let app = app(controller, dashboard, store)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Every route, behind the session gatekeeper
fn app<S, G>(
    controller: Arc<AuthController<S, G>>,
    dashboard: Arc<DashboardQueries<S>>,
    store: Arc<S>,
) -> Router
where
    S: CredentialStore + 'static,
    G: AuthGateway + Sync + 'static,
{
    let gate = GatekeeperState::new(store, Gatekeeper::default());

    Router::new()
        .merge(auth_router(controller))
        .merge(dashboard_router(dashboard))
        .fallback(|| async { http::StatusCode::NOT_FOUND })
        .layer(axum::middleware::from_fn_with_state(
            gate,
            session_gatekeeper::<S>,
        ))
}

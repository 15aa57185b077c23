//! HTTP gateway: identity middleware, routing, server startup

pub mod handlers;
pub mod openapi;
pub mod state;
pub mod types;

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::Request,
    middleware::{Next, from_fn},
    response::Response,
    routing::{get, post},
};
use tokio::net::TcpListener;

use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use state::AppState;
use types::ApiError;

/// Account identity resolved by the edge middleware.
///
/// The gateway sits behind a trusted front door that authenticates the
/// user and forwards the account id in the `X-Account-Id` header. The
/// header is trusted as-is; there is no signature check here.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedAccount {
    pub account_id: i64,
}

/// Resolve `X-Account-Id` into an [`AuthenticatedAccount`] extension.
///
/// Missing or malformed header is a 401; handlers behind this layer can
/// assume the extension is present.
async fn identity_middleware(mut request: Request<Body>, next: Next) -> Result<Response, ApiError> {
    let header = request
        .headers()
        .get("X-Account-Id")
        .ok_or_else(|| ApiError::unauthorized("missing X-Account-Id header"))?;

    let account_id: i64 = header
        .to_str()
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .filter(|id| *id > 0)
        .ok_or_else(|| ApiError::unauthorized("invalid X-Account-Id header"))?;

    request
        .extensions_mut()
        .insert(AuthenticatedAccount { account_id });

    Ok(next.run(request).await)
}

/// Start the HTTP gateway server
pub async fn run_server(state: Arc<AppState>, host: &str, port: u16) {
    // Routes that carry an account identity
    let account_routes = Router::new()
        .route("/transfers/p2p", post(handlers::create_p2p_transfer))
        .route("/transfers/p2p/{transfer_id}", get(handlers::get_p2p_transfer))
        .route("/onramp", post(handlers::initiate_onramp))
        .route("/onramp/{onramp_id}", get(handlers::get_onramp))
        .route("/balance", get(handlers::get_balance))
        .route("/ledger", get(handlers::get_ledger))
        .route("/ledger/latest", get(handlers::get_latest_entry))
        .layer(from_fn(identity_middleware));

    // The bank callback authenticates by settlement token, not account
    let callback_routes =
        Router::new().route("/onramp/callback", post(handlers::settlement_callback));

    let app = Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", account_routes.merge(callback_routes))
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", openapi::ApiDoc::openapi()));

    let addr = format!("{}:{}", host, port);
    let listener = match TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("❌ FATAL: Failed to bind to {}: {}", addr, e);
            eprintln!(
                "   Hint: Port {} may already be in use. Check with: lsof -i :{}",
                port, port
            );
            std::process::exit(1);
        }
    };

    println!("🚀 Gateway listening on http://{}", addr);
    println!("📖 API Docs: http://{}/docs", addr);

    if let Err(e) = axum::serve(listener, app).await {
        eprintln!("❌ FATAL: Server error: {}", e);
        std::process::exit(1);
    }
}

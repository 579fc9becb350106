use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::app::App;

async fn ok() -> &'static str {
    "OK"
}

/// Wrap the host's routes with liveness/readiness probes and request
/// tracing.
///
/// Group gates and lookup guards are applied by the host inside
/// `app_router`, per route, so different pages can declare different
/// permissions and filter catalogs.
pub fn router(app: App, app_router: fn(App) -> Router) -> Router {
    Router::new()
        .route("/liveness", get(ok))
        .route("/readiness", get(ok))
        .merge(app_router(app))
        .layer(TraceLayer::new_for_http())
}

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tracing::{debug, instrument};

use super::{GroupGate, GroupMembership};
use crate::config::AuthConfig;

/// State for [`group_gate_middleware`]: the gate to consult plus the
/// denial behavior.
///
/// # Example
/// ```rust,ignore
/// let gate = AllGroupsForMethod::new(
///     PermissionDict::new().require(Method::POST, ["site_admins"]),
/// );
/// let router = Router::new()
///     .route("/projects", get(list_projects).post(create_project))
///     .layer(axum::middleware::from_fn_with_state(
///         GateState::new(gate, app.config.auth.clone()),
///         group_gate_middleware,
///     ));
/// ```
#[derive(Clone)]
pub struct GateState {
    gate: Arc<dyn GroupGate>,
    auth: AuthConfig,
}

impl GateState {
    pub fn new(gate: impl GroupGate + 'static, auth: AuthConfig) -> Self {
        Self {
            gate: Arc::new(gate),
            auth,
        }
    }
}

/// Middleware that admits or denies a request via a [`GroupGate`].
///
/// The membership snapshot is read from request extensions; a request
/// without one belongs to no groups. On denial, responds with a
/// redirect to the configured login URL carrying the original path in
/// the return-to parameter, or with 403 Forbidden when no login URL is
/// configured. Admission forwards to the inner service untouched.
#[instrument(skip(state, req, next), fields(method, path))]
pub async fn group_gate_middleware(
    State(state): State<GateState>,
    req: Request,
    next: Next,
) -> Response {
    tracing::Span::current().record("method", tracing::field::display(req.method()));
    tracing::Span::current().record("path", req.uri().path());

    let membership = req
        .extensions()
        .get::<GroupMembership>()
        .cloned()
        .unwrap_or_default();

    if state.gate.admits(req.method(), &membership) {
        return next.run(req).await;
    }

    debug!(method = %req.method(), "Request denied by group gate");

    match &state.auth.login_url {
        Some(login_url) => {
            let full_path = req
                .uri()
                .path_and_query()
                .map_or_else(|| req.uri().path(), |pq| pq.as_str());
            login_redirect(login_url, &state.auth.redirect_field, full_path)
        }
        None => StatusCode::FORBIDDEN.into_response(),
    }
}

fn login_redirect(login_url: &str, redirect_field: &str, full_path: &str) -> Response {
    let query = serde_urlencoded::to_string([(redirect_field, full_path)]).unwrap_or_default();
    Redirect::to(&format!("{login_url}?{query}")).into_response()
}

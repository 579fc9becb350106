use std::sync::Arc;

use axum::{
    extract::Query,
    http::Method,
    middleware::from_fn_with_state,
    response::Response,
    routing::get,
    Extension, Router,
};
use axum_test::TestServer;
use plinth::{
    config::{AuthConfig, PagesConfig},
    filtering::{invalid_lookup_middleware, LookupGuard, ModelInfo},
    groups::{
        group_gate_middleware, AnyGroupForMethod, GateState, GroupMembership, PermissionDict,
    },
    pages::{respond, Card, IndexPage, ListPage, PageConfig, RenderError, TemplateRenderer},
};

/// Stand-in for the host's template engine: serializes the template
/// name and context so tests can assert on what would be rendered.
struct StubRenderer;

impl TemplateRenderer for StubRenderer {
    fn render(&self, template: &str, context: &serde_json::Value) -> Result<String, RenderError> {
        if template == "generic/missing.html" {
            return Err(RenderError::TemplateNotFound(template.to_string()));
        }
        Ok(format!("{template}|{context}"))
    }
}

async fn list_projects(Query(params): Query<Vec<(String, String)>>) -> Response {
    let page = ListPage::new(
        PageConfig::new(&PagesConfig::default())
            .title("Projects")
            .table("table/table_projects.htm"),
    );
    let context = page.context(&vec!["alpha", "beta"], &params);
    respond(&StubRenderer, page.template(), &context)
}

async fn broken_page() -> Response {
    respond(&StubRenderer, "generic/missing.html", &serde_json::json!({}))
}

async fn index(Extension(membership): Extension<GroupMembership>) -> Response {
    let page = IndexPage::new(
        PageConfig::new(&PagesConfig::default()).title("Home"),
        vec![Card::new("Projects", "/projects/")],
    )
    .with_protected("site_admins", vec![Card::new("Admin", "/admin/")]);
    respond(&StubRenderer, page.template(), &page.context(&membership))
}

#[tokio::test]
async fn test_list_page_renders_through_the_template_seam() {
    let server = TestServer::new(Router::new().route("/projects", get(list_projects)))
        .expect("Failed to create test server");

    let response = server.get("/projects").await;
    response.assert_status_ok();
    let body = response.text();
    assert!(body.starts_with("generic/generic_list.html|"), "unexpected body: {body}");
    assert!(body.contains(r#""title":"Projects""#), "unexpected body: {body}");
    assert!(body.contains(r#""queryset":["alpha","beta"]"#), "unexpected body: {body}");
}

#[tokio::test]
async fn test_page_description_param_reaches_the_context() {
    let server = TestServer::new(Router::new().route("/projects", get(list_projects)))
        .expect("Failed to create test server");

    let response = server
        .get("/projects")
        .add_query_param("page_description", "my cool projects")
        .await;
    assert!(response.text().contains(r#""sub_title":"my cool projects""#));
}

#[tokio::test]
async fn test_render_failures_surface_as_error_responses() {
    let server = TestServer::new(Router::new().route("/broken", get(broken_page)))
        .expect("Failed to create test server");

    server.get("/broken").await.assert_status_not_found();
}

#[tokio::test]
async fn test_protected_cards_render_only_for_members() {
    let admin_router = Router::new()
        .route("/", get(index))
        .layer(Extension(GroupMembership::new(["site_admins"])));
    let server = TestServer::new(admin_router).expect("Failed to create test server");
    assert!(server.get("/").await.text().contains("Admin"));

    let visitor_router = Router::new()
        .route("/", get(index))
        .layer(Extension(GroupMembership::new(["site_operators"])));
    let server = TestServer::new(visitor_router).expect("Failed to create test server");
    assert!(!server.get("/").await.text().contains("Admin"));
}

// The full pipeline: gate, then lookup guard, then the page view.
#[tokio::test]
async fn test_gate_guard_and_page_compose() {
    let gate = AnyGroupForMethod::new(
        PermissionDict::new().require(Method::GET, ["site_operators"]),
    );
    let guard = LookupGuard::for_model(ModelInfo::new("project", ["name", "status"]));

    let build = |membership: GroupMembership| {
        let router = Router::new()
            .route("/projects", get(list_projects))
            .layer(from_fn_with_state(
                Arc::new(guard.clone()),
                invalid_lookup_middleware,
            ))
            .layer(from_fn_with_state(
                GateState::new(gate.clone(), AuthConfig::default()),
                group_gate_middleware,
            ))
            .layer(Extension(membership));
        TestServer::new(router).expect("Failed to create test server")
    };

    let operator = build(GroupMembership::new(["site_operators"]));
    operator
        .get("/projects")
        .add_query_param("status", "active")
        .await
        .assert_status_ok();
    operator
        .get("/projects")
        .add_query_param("bogus", "1")
        .await
        .assert_status_not_found();

    let visitor = build(GroupMembership::new(["visitors"]));
    visitor.get("/projects").await.assert_status_forbidden();
}

use axum::{response::Redirect, routing::post, Router};
use axum_test::TestServer;
use plinth::api::{ValidatedForm, ValidatedJson};
use serde::Deserialize;
use serde_json::json;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
struct CreateProject {
    #[validate(length(min = 1, message = "name must not be empty"))]
    name: String,
}

async fn create_from_form(ValidatedForm(payload): ValidatedForm<CreateProject>) -> Redirect {
    Redirect::to(&format!("/projects/{}", payload.name))
}

async fn create_from_json(ValidatedJson(payload): ValidatedJson<CreateProject>) -> String {
    payload.name
}

fn server() -> TestServer {
    let router = Router::new()
        .route("/projects", post(create_from_form))
        .route("/api/projects", post(create_from_json));
    TestServer::new(router).expect("Failed to create test server")
}

#[tokio::test]
async fn test_valid_form_submission_passes_the_extractor() {
    let response = server()
        .post("/projects")
        .form(&[("name", "felix")])
        .await;
    response.assert_status(axum::http::StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), "/projects/felix");
}

#[tokio::test]
async fn test_failing_validation_rejects_the_form_with_400() {
    let response = server().post("/projects").form(&[("name", "")]).await;
    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_malformed_form_body_is_rejected() {
    let response = server()
        .post("/projects")
        .form(&[("unrelated", "field")])
        .await;
    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_json_extractor_validates_too() {
    let response = server()
        .post("/api/projects")
        .json(&json!({"name": "felix"}))
        .await;
    response.assert_status_ok();
    assert_eq!(response.text(), "felix");

    server()
        .post("/api/projects")
        .json(&json!({"name": ""}))
        .await
        .assert_status_bad_request();
}

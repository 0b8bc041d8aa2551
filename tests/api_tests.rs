//! REST API tests against the in-memory store

mod common;

use axum::{
    body::{to_bytes, Body},
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("Failed to build request");

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("Failed to send request");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("Body is not JSON")
    };
    (status, value)
}

fn hamlet() -> Value {
    json!({
        "name": "Hamlet",
        "writer": "William Shakespeare",
        "year": "1603",
        "main_contents": "The prince of Denmark"
    })
}

async fn create(app: &Router, body: Value) -> Value {
    let (status, book) = send(app, Method::POST, "/api/books/", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    book
}

#[tokio::test]
async fn test_health_check() {
    let app = common::app();

    let (status, body) = send(&app, Method::GET, "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = send(&app, Method::GET, "/api/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn test_list_starts_empty() {
    let app = common::app();

    let (status, body) = send(&app, Method::GET, "/api/books/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_create_and_list() {
    let app = common::app();

    let book = create(&app, hamlet()).await;
    assert_eq!(book["id"], 1);
    assert_eq!(book["name"], "Hamlet");

    create(
        &app,
        json!({
            "name": "  Macbeth ",
            "writer": "William Shakespeare",
            "year": "1623",
            "main_contents": "A Scottish tragedy"
        }),
    )
    .await;

    let (_, body) = send(&app, Method::GET, "/api/books/", None).await;
    let names: Vec<&str> = body
        .as_array()
        .expect("List is not an array")
        .iter()
        .map(|b| b["name"].as_str().unwrap_or_default())
        .collect();
    assert_eq!(names, vec!["Hamlet", "Macbeth"]);
}

#[tokio::test]
async fn test_create_with_missing_fields_reports_each_field() {
    let app = common::app();

    let (status, body) = send(&app, Method::POST, "/api/books/", Some(json!({ "name": "" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 18);
    assert_eq!(body["error"], "BadValue");
    assert_eq!(body["fields"]["name"], json!(["Title is required"]));
    assert_eq!(body["fields"]["writer"], json!(["Writer is required"]));
    assert_eq!(body["fields"]["year"], json!(["Year is required"]));
    assert_eq!(body["fields"]["main_contents"], json!(["Main contents are required"]));
}

#[tokio::test]
async fn test_create_accepts_numeric_year() {
    let app = common::app();

    let mut body = hamlet();
    body["year"] = json!(1603);
    let book = create(&app, body).await;
    assert_eq!(book["year"], "1603");

    let (_, body) = send(&app, Method::GET, "/api/books/1", None).await;
    assert_eq!(body["year"], "1603");
}

#[tokio::test]
async fn test_create_rejects_boolean_field() {
    let app = common::app();

    let mut body = hamlet();
    body["year"] = json!(true);
    let (status, _) = send(&app, Method::POST, "/api/books/", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = send(&app, Method::GET, "/api/books/", None).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = common::app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/books/")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from("{\"name\":"))
        .expect("Failed to build request");

    let response = app.oneshot(request).await.expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_missing_and_non_numeric_ids() {
    let app = common::app();

    let (status, body) = send(&app, Method::GET, "/api/books/42", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NoSuchBook");

    let (status, _) = send(&app, Method::GET, "/api/books/abc", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_put_replaces_record() {
    let app = common::app();
    let book = create(&app, hamlet()).await;

    let mut updated = book.clone();
    updated["year"] = json!("1604");
    let (status, body) = send(&app, Method::PUT, "/api/books/1", Some(updated)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["year"], "1604");

    let (_, body) = send(&app, Method::GET, "/api/books/1", None).await;
    assert_eq!(body["year"], "1604");
    assert_eq!(body["name"], "Hamlet");
}

#[tokio::test]
async fn test_put_with_blank_title_leaves_record_unchanged() {
    let app = common::app();
    create(&app, hamlet()).await;

    let mut invalid = hamlet();
    invalid["name"] = json!("   ");
    let (status, body) = send(&app, Method::PUT, "/api/books/1", Some(invalid)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["fields"]["name"], json!(["Title is required"]));

    let (_, body) = send(&app, Method::GET, "/api/books/1", None).await;
    assert_eq!(body["name"], "Hamlet");
}

#[tokio::test]
async fn test_put_missing_book_is_not_found() {
    let app = common::app();

    let (status, _) = send(&app, Method::PUT, "/api/books/5", Some(hamlet())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_patch_updates_given_fields() {
    let app = common::app();
    create(&app, hamlet()).await;

    let (status, body) = send(
        &app,
        Method::PATCH,
        "/api/books/1",
        Some(json!({ "writer": "W. Shakespeare" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["writer"], "W. Shakespeare");
    assert_eq!(body["main_contents"], "The prince of Denmark");
}

#[tokio::test]
async fn test_patch_with_null_field_is_rejected() {
    let app = common::app();
    create(&app, hamlet()).await;

    let (status, body) = send(
        &app,
        Method::PATCH,
        "/api/books/1",
        Some(json!({ "name": null, "year": 1604 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BadValue");
    assert_eq!(body["fields"]["name"], json!(["Title is required"]));
    assert!(body["fields"].get("year").is_none());

    let (_, body) = send(&app, Method::GET, "/api/books/1", None).await;
    assert_eq!(body["name"], "Hamlet");
    assert_eq!(body["year"], "1603");
}

#[tokio::test]
async fn test_delete_then_get_is_not_found() {
    let app = common::app();
    create(&app, hamlet()).await;

    let (status, body) = send(&app, Method::DELETE, "/api/books/1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, _) = send(&app, Method::GET, "/api/books/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, "/api/books/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_openapi_document_lists_book_paths() {
    let app = common::app();

    let (status, body) = send(&app, Method::GET, "/api-docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/books/"].is_object());
    assert!(body["paths"]["/books/{id}"]["put"].is_object());
}
